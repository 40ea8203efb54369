// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use thiserror::Error;

/// Errors produced while turning a configuration buffer into a [`crate::ConfMap`]
///
/// A malformed buffer is permanent for that input. Callers decide whether to
/// retry with fresh bytes; nothing here falls back to an empty map.
#[derive(Error, Debug)]
pub enum ConfError {
    #[error("malformed configuration input: {0}")]
    MalformedConfig(#[from] prost::DecodeError),

    #[error("failed to read configuration input: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, ConfError::MalformedConfig(_))
    }
}
