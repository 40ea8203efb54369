// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Configuration marshalling for the native side of the host boundary
//!
//! The host runtime serializes its settings as a [`confbridge_proto::ConfigMap`]
//! and passes the bytes across the foreign-function boundary. This crate turns
//! such a buffer into a plain [`ConfMap`] and renders maps for log output.
//!
//! Both operations are single-shot and stateless: [`parse_conf_map`] borrows the
//! buffer for the duration of the call only, and [`print_config`] is a pure
//! function of its input.

pub mod decode;
pub mod error;
pub mod format;

use std::collections::HashMap;

pub use decode::{parse_conf_map, parse_conf_map_from_reader};
pub use error::ConfError;
pub use format::{ConfDisplay, print_config, print_config_sorted};

/// Decoded configuration: setting name to setting value.
///
/// Iteration order is unspecified. Use [`print_config_sorted`] when output has
/// to be reproducible.
pub type ConfMap = HashMap<String, String>;
