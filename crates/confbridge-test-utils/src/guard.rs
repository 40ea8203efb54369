// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! RAII guard used by `#[logged_test]`.

use std::path::PathBuf;

use crate::{TestLogError, TestLogger};

/// Finalizes a [`TestLogger`] exactly once.
///
/// Dropping the guard without calling [`TestLoggerGuard::finish_success`]
/// (including during a panic unwind) records the test as failed.
pub struct TestLoggerGuard {
    logger: Option<TestLogger>,
    log_path: PathBuf,
}

impl TestLoggerGuard {
    pub fn new(test_name: &str) -> Result<Self, TestLogError> {
        let logger = TestLogger::new(test_name)?;
        let log_path = logger.log_path().to_path_buf();
        Ok(Self {
            logger: Some(logger),
            log_path,
        })
    }

    /// Borrow the underlying logger for writing test diagnostics.
    pub fn logger(&mut self) -> &mut TestLogger {
        self.logger.as_mut().expect("TestLoggerGuard logger already finalized")
    }

    pub fn finish_success(mut self) -> Result<PathBuf, TestLogError> {
        match self.logger.take() {
            Some(logger) => logger.finish_success(),
            None => Ok(self.log_path.clone()),
        }
    }

    pub fn finish_failure(mut self, message: &str) -> Result<PathBuf, TestLogError> {
        match self.logger.take() {
            Some(logger) => logger.finish_failure(message),
            None => Ok(self.log_path.clone()),
        }
    }
}

impl Drop for TestLoggerGuard {
    fn drop(&mut self) {
        let Some(logger) = self.logger.take() else {
            return;
        };

        let reason = if std::thread::panicking() {
            "test panicked"
        } else {
            "test exited without calling finish_success()"
        };

        if let Err(err) = logger.finish_failure(reason) {
            eprintln!(
                "failed to finalize TestLogger for {}: {}",
                self.log_path.display(),
                err
            );
        }
    }
}
