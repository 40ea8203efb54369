// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! `confbridge` command-line tool
//!
//! Produces configuration buffers in the wire format the native side expects
//! and decodes existing buffers for inspection.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use confbridge_core::{ConfMap, parse_conf_map, print_config, print_config_sorted};
use confbridge_logging::CliLoggingArgs;
use confbridge_proto::{ConfigMap, encode_config};
use tracing::info;

pub use clap::Parser;
use clap::Subcommand;

#[derive(Parser, Debug)]
#[command(
    name = "confbridge",
    author,
    version,
    about = "Encode and inspect serialized configuration buffers"
)]
pub struct Cli {
    #[command(flatten)]
    pub logging: CliLoggingArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serialize KEY=VALUE pairs into a configuration buffer
    Encode {
        /// Settings in KEY=VALUE form, encoded in the order given
        #[arg(value_name = "KEY=VALUE")]
        pairs: Vec<String>,
        /// Write the buffer here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Decode a configuration buffer and print its entries
    Dump {
        /// Buffer to read ('-' or omitted for stdin)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
        /// Order entries by key
        #[arg(long)]
        sorted: bool,
        /// Print a JSON object instead of the diagnostic listing
        #[arg(long, conflicts_with = "sorted")]
        json: bool,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        match self.command {
            Command::Encode { pairs, output } => {
                let buffer = encode_pairs(&pairs)?;
                match output {
                    Some(path) => fs::write(&path, &buffer)
                        .with_context(|| format!("failed to write {}", path.display()))?,
                    None => out.write_all(&buffer)?,
                }
                info!(entries = pairs.len(), bytes = buffer.len(), "Encoded configuration");
            }
            Command::Dump {
                input,
                sorted,
                json,
            } => {
                let data = read_input(input.as_deref())?;
                let conf = parse_conf_map(&data).context("failed to decode configuration")?;
                out.write_all(render(&conf, sorted, json)?.as_bytes())?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

/// Split each `KEY=VALUE` argument at its first `=` and encode in order.
pub fn encode_pairs(pairs: &[String]) -> Result<Vec<u8>> {
    let entries = pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .ok_or_else(|| anyhow!("expected KEY=VALUE, got '{}'", pair))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(encode_config(&ConfigMap::from_pairs(entries)))
}

pub fn render(conf: &ConfMap, sorted: bool, json: bool) -> Result<String> {
    if json {
        let ordered: BTreeMap<_, _> = conf.iter().collect();
        let mut text = serde_json::to_string_pretty(&ordered)?;
        text.push('\n');
        Ok(text)
    } else if sorted {
        Ok(print_config_sorted(conf))
    } else {
        Ok(print_config(conf))
    }
}

fn read_input(input: Option<&Path>) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    match input {
        None => io::stdin().lock().read_to_end(&mut data)?,
        Some(path) if path == Path::new("-") => io::stdin().lock().read_to_end(&mut data)?,
        Some(path) => File::open(path)
            .and_then(|mut file| file.read_to_end(&mut data))
            .with_context(|| format!("failed to read {}", path.display()))?,
    };
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[confbridge_test_utils::logged_test]
    fn test_encode_pairs_splits_on_first_equals() {
        let data = encode_pairs(&["spark.driver.extraJavaOptions=-Da=b".to_string()]).unwrap();
        let conf = parse_conf_map(&data).unwrap();

        assert_eq!(conf["spark.driver.extraJavaOptions"], "-Da=b");
    }

    #[confbridge_test_utils::logged_test]
    fn test_encode_pairs_rejects_missing_equals() {
        let err = encode_pairs(&["a=1".to_string(), "novalue".to_string()]).unwrap_err();
        assert!(err.to_string().contains("novalue"));
    }

    #[confbridge_test_utils::logged_test]
    fn test_render_json() {
        let conf: ConfMap = [("b", "2"), ("a", "1")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        assert_eq!(
            render(&conf, false, true).unwrap(),
            "{\n  \"a\": \"1\",\n  \"b\": \"2\"\n}\n"
        );
        assert_eq!(render(&conf, true, false).unwrap(), "\n [a, 1]\n [b, 2]\n");
    }

    #[confbridge_test_utils::logged_test]
    fn test_cli_parses_logging_flags() {
        let cli = Cli::try_parse_from(["confbridge", "--log-level", "debug", "dump", "--sorted"])
            .unwrap();

        assert_eq!(cli.logging.log_level, Some(confbridge_logging::CliLogLevel::Debug));
        assert!(matches!(cli.command, Command::Dump { sorted: true, json: false, input: None }));
    }
}
