// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Configuration wire protocol
//!
//! This crate defines the protobuf schema for the configuration buffer that
//! the host runtime serializes and hands to the native side. The reference
//! definition lives in `proto/config.proto`; the types here are derived by
//! hand so the crate builds without `protoc`.

pub mod messages;

// Re-export key types
pub use messages::{ConfigEntry, ConfigMap};

// Protobuf encoding/decoding functions for the host boundary
pub fn encode_config(config: &ConfigMap) -> Vec<u8> {
    prost::Message::encode_to_vec(config)
}

pub fn decode_config(data: &[u8]) -> Result<ConfigMap, prost::DecodeError> {
    <ConfigMap as prost::Message>::decode(data)
}
