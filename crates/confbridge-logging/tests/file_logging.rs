// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Installs the process-wide subscriber, so this binary holds a single test.

use std::fs;

use confbridge_logging::{LogFormat, init_to_file};
use tracing::Level;

#[confbridge_test_utils::logged_test]
fn test_json_events_are_written_to_file() {
    std::env::remove_var("RUST_LOG");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("confbridge-logging.log");

    init_to_file("confbridge-logging", Level::INFO, LogFormat::Json, &path).unwrap();
    tracing::debug!("below the default level");
    tracing::info!(entries = 3, "decoded configuration");

    let contents = fs::read_to_string(&path).unwrap();
    logger.log(&format!("log file contents: {}", contents)).unwrap();

    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1);

    let event: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(event["level"], "INFO");
    assert_eq!(event["fields"]["message"], "decoded configuration");
    assert_eq!(event["fields"]["entries"], 3);

    // A second install in the same process is refused
    assert!(init_to_file("confbridge-logging", Level::INFO, LogFormat::Json, &path).is_err());
}
