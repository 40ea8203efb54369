// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Status codes and the per-thread last-error slot

use std::cell::RefCell;
use std::ffi::CString;
use std::panic::{AssertUnwindSafe, catch_unwind};

use confbridge_core::ConfError;
use libc::{c_char, c_int};
use thiserror::Error;
use tracing::warn;

pub const CONFBRIDGE_OK: c_int = 0;
pub const CONFBRIDGE_ERR_NULL_POINTER: c_int = 1;
pub const CONFBRIDGE_ERR_MALFORMED: c_int = 2;
pub const CONFBRIDGE_ERR_INTERNAL: c_int = 3;
pub const CONFBRIDGE_ERR_INVALID_ARGUMENT: c_int = 4;

#[derive(Error, Debug)]
pub enum FfiError {
    #[error("null pointer passed for `{0}`")]
    NullPointer(&'static str),

    #[error("`{0}` is not valid UTF-8")]
    InvalidUtf8(&'static str),

    #[error("log level {0} is out of range (0..=4)")]
    InvalidLogLevel(c_int),

    #[error(transparent)]
    Conf(#[from] ConfError),

    #[error("value cannot be returned as a C string: it contains a NUL byte")]
    InteriorNul(#[from] std::ffi::NulError),

    #[error("failed to serialize configuration map: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to initialize logging: {0}")]
    Logging(String),

    #[error("panic in {operation}: {message}")]
    Panic {
        operation: &'static str,
        message: String,
    },
}

impl FfiError {
    pub fn status(&self) -> c_int {
        match self {
            FfiError::NullPointer(_) => CONFBRIDGE_ERR_NULL_POINTER,
            FfiError::Conf(e) if e.is_malformed() => CONFBRIDGE_ERR_MALFORMED,
            FfiError::InvalidUtf8(_) | FfiError::InvalidLogLevel(_) => {
                CONFBRIDGE_ERR_INVALID_ARGUMENT
            }
            FfiError::Conf(_)
            | FfiError::InteriorNul(_)
            | FfiError::Json(_)
            | FfiError::Logging(_)
            | FfiError::Panic { .. } => CONFBRIDGE_ERR_INTERNAL,
        }
    }
}

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Run one exported operation: clear the last error, contain panics, and
/// record any failure for [`last_error_ptr`].
pub(crate) fn ffi_boundary<T, F>(operation: &'static str, f: F) -> Result<T, c_int>
where
    F: FnOnce() -> Result<T, FfiError>,
{
    clear_last_error();

    let result = catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        Err(FfiError::Panic { operation, message })
    });

    result.map_err(|err| {
        let status = err.status();
        warn!(operation, status, error = %err, "FFI call failed");
        set_last_error(&err);
        status
    })
}

pub(crate) fn set_last_error(err: &FfiError) {
    // Host data echoed in a message may carry NUL bytes.
    let text = err.to_string().replace('\0', "\\0");
    let message = CString::new(text).unwrap_or_default();
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(message));
}

pub(crate) fn clear_last_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

/// Pointer to the current thread's last error message, or null.
///
/// The pointer stays valid until the next exported call on this thread.
pub(crate) fn last_error_ptr() -> *const c_char {
    LAST_ERROR.with(|slot| {
        slot.borrow().as_ref().map_or(std::ptr::null(), |message| message.as_ptr())
    })
}
