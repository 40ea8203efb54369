// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Buffer-to-map decoding

use std::io::Read;

use confbridge_proto::{ConfigEntry, decode_config};
use tracing::{debug, trace, warn};

use crate::format::ConfDisplay;
use crate::{ConfError, ConfMap};

/// Decode a serialized `ConfigMap` into a fresh [`ConfMap`].
///
/// `data` is only read, never retained. Entries are inserted in wire order,
/// so when a key repeats the last occurrence wins. Keys and values are copied
/// as-is.
///
/// An empty buffer is the encoding of a message with no entries and yields an
/// empty map. Anything that does not parse as the schema (truncated length
/// prefixes, bad wire types, non-UTF-8 strings) is returned as
/// [`ConfError::MalformedConfig`].
pub fn parse_conf_map(data: &[u8]) -> Result<ConfMap, ConfError> {
    let message = match decode_config(data) {
        Ok(message) => message,
        Err(e) => {
            warn!(bytes = data.len(), error = %e, "Rejected malformed configuration buffer");
            return Err(e.into());
        }
    };

    let received = message.len();
    let mut confs = ConfMap::with_capacity(received);
    for ConfigEntry { key, value } in message.configs {
        confs.insert(key, value);
    }

    debug!(
        bytes = data.len(),
        received,
        entries = confs.len(),
        "Decoded configuration buffer"
    );
    trace!(config = %ConfDisplay::sorted(&confs), "Configuration entries");

    Ok(confs)
}

/// Read `reader` to the end and decode the bytes with [`parse_conf_map`].
pub fn parse_conf_map_from_reader<R: Read>(mut reader: R) -> Result<ConfMap, ConfError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    parse_conf_map(&data)
}
