// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Protobuf message types for the configuration buffer

/// Serialized configuration handed over by the host runtime
///
/// Entries are kept as a repeated field so duplicate keys survive decoding
/// and can be collapsed by the consumer. The encoding is identical to a
/// protobuf `map<string, string>` on tag 1.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct ConfigMap {
    #[prost(message, repeated, tag = "1")]
    pub configs: Vec<ConfigEntry>,
}

/// A single key/value setting
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct ConfigEntry {
    #[prost(string, tag = "1")]
    pub key: String,
    #[prost(string, tag = "2")]
    pub value: String,
}

impl ConfigMap {
    /// Build a message from pairs, preserving their order on the wire.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            configs: pairs.into_iter().map(|(key, value)| ConfigEntry::new(key, value)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

impl ConfigEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
