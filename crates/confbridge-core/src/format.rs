// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Diagnostic rendering of configuration maps
//!
//! The layout is a leading newline followed by one ` [key, value]` line per
//! entry, which reads well when the string is appended to a log message.
//! Keys and values are written verbatim.

use std::fmt;

use crate::ConfMap;

/// Render `conf` in the map's own iteration order.
///
/// The set of lines is deterministic, their order is not.
pub fn print_config(conf: &ConfMap) -> String {
    ConfDisplay::new(conf).to_string()
}

/// Render `conf` with entries ordered by key.
pub fn print_config_sorted(conf: &ConfMap) -> String {
    ConfDisplay::sorted(conf).to_string()
}

/// [`fmt::Display`] adapter producing the same text as [`print_config`]
///
/// Lets callers pass a map straight into a tracing field
/// (`config = %ConfDisplay::new(&map)`) without allocating the string first.
#[derive(Clone, Copy, Debug)]
pub struct ConfDisplay<'a> {
    conf: &'a ConfMap,
    sorted: bool,
}

impl<'a> ConfDisplay<'a> {
    pub fn new(conf: &'a ConfMap) -> Self {
        Self {
            conf,
            sorted: false,
        }
    }

    pub fn sorted(conf: &'a ConfMap) -> Self {
        Self { conf, sorted: true }
    }
}

impl fmt::Display for ConfDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\n")?;
        if self.sorted {
            let mut entries: Vec<_> = self.conf.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
            for (key, value) in entries {
                write_entry(f, key, value)?;
            }
        } else {
            for (key, value) in self.conf {
                write_entry(f, key, value)?;
            }
        }
        Ok(())
    }
}

fn write_entry(f: &mut fmt::Formatter<'_>, key: &str, value: &str) -> fmt::Result {
    writeln!(f, " [{}, {}]", key, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conf(pairs: &[(&str, &str)]) -> ConfMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[confbridge_test_utils::logged_test]
    fn test_empty_map_is_single_newline() {
        assert_eq!(print_config(&ConfMap::new()), "\n");
        assert_eq!(print_config_sorted(&ConfMap::new()), "\n");
    }

    #[confbridge_test_utils::logged_test]
    fn test_single_entry_layout() {
        assert_eq!(print_config(&conf(&[("k", "v")])), "\n [k, v]\n");
    }

    #[confbridge_test_utils::logged_test]
    fn test_sorted_layout() {
        let map = conf(&[("zeta", "26"), ("alpha", "1"), ("mu", "12")]);
        assert_eq!(
            print_config_sorted(&map),
            "\n [alpha, 1]\n [mu, 12]\n [zeta, 26]\n"
        );
    }

    #[confbridge_test_utils::logged_test]
    fn test_unsorted_has_same_lines_as_sorted() {
        let map = conf(&[("b", "2"), ("a", "1"), ("c", "3")]);

        let mut plain: Vec<_> = print_config(&map).lines().map(str::to_owned).collect();
        let sorted: Vec<_> = print_config_sorted(&map).lines().map(str::to_owned).collect();
        plain.sort();

        let mut expected = sorted.clone();
        expected.sort();
        assert_eq!(plain, expected);
    }

    #[confbridge_test_utils::logged_test]
    fn test_no_escaping() {
        let map = conf(&[("path, with comma", "[brackets]\nnext line")]);
        assert_eq!(
            print_config(&map),
            "\n [path, with comma, [brackets]\nnext line]\n"
        );
    }

    #[confbridge_test_utils::logged_test]
    fn test_display_adapter_matches_string() {
        let map = conf(&[("x", "1"), ("y", "2")]);
        assert_eq!(format!("{}", ConfDisplay::sorted(&map)), print_config_sorted(&map));
    }
}
