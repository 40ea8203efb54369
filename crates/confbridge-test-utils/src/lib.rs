// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Test utilities shared by the confbridge crates
//!
//! Every test annotated with [`logged_test`] writes its diagnostics to a
//! unique file under `target/test-logs/<date>/`. A passing test prints a
//! single line; a failing one prints the log path and size so the full
//! output can be opened directly.

mod guard;
pub mod logging;

pub use confbridge_test_utils_macros::logged_test;
pub use guard::TestLoggerGuard;
pub use logging::{TestLogError, TestLogger, create_unique_test_log};
