// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! C ABI for the host runtime
//!
//! The host passes its serialized configuration as a pointer/length pair and
//! receives an opaque [`ConfMapHandle`]. Every fallible function returns a
//! `CONFBRIDGE_*` status code (or null) and leaves a message for
//! [`confbridge_last_error`] on the calling thread.
//!
//! Ownership rules:
//! - input buffers stay owned by the host and are only read during the call;
//! - handles and strings returned here are owned by this library and must be
//!   released with [`confbridge_conf_map_free`] / [`confbridge_string_free`].

pub mod buffer;
pub mod error;

use std::collections::BTreeMap;
use std::ffi::CString;
use std::io;
use std::sync::OnceLock;

use confbridge_core::{ConfMap, parse_conf_map, print_config};
use confbridge_logging::{CliLogLevel, LogFormat};
use libc::{c_char, c_int};
use tracing::debug;

pub use buffer::BorrowedBuffer;
pub use error::{
    CONFBRIDGE_ERR_INTERNAL, CONFBRIDGE_ERR_INVALID_ARGUMENT, CONFBRIDGE_ERR_MALFORMED,
    CONFBRIDGE_ERR_NULL_POINTER, CONFBRIDGE_OK, FfiError,
};

use error::{clear_last_error, ffi_boundary, last_error_ptr};

const COMPONENT: &str = "confbridge-ffi";

/// Decoded configuration owned by this library
pub struct ConfMapHandle {
    conf: ConfMap,
}

impl ConfMapHandle {
    pub fn conf(&self) -> &ConfMap {
        &self.conf
    }
}

/// Borrow a handle passed back by the host.
///
/// # Safety
///
/// `map` must be null or a live pointer returned by
/// [`confbridge_parse_conf_map`].
unsafe fn handle_ref<'a>(map: *const ConfMapHandle) -> Result<&'a ConfMapHandle, FfiError> {
    unsafe { map.as_ref() }.ok_or(FfiError::NullPointer("map"))
}

fn into_c_string(text: String) -> Result<*mut c_char, FfiError> {
    Ok(CString::new(text)?.into_raw())
}

/// Decode a serialized `ConfigMap` from host memory.
///
/// On success stores a new handle in `*out` and returns `CONFBRIDGE_OK`.
/// On failure `*out` is left untouched. `data` may be null only when `len`
/// is 0.
///
/// # Safety
///
/// `data` must point to `len` readable bytes for the duration of the call and
/// `out` must be a valid pointer to writable storage for one pointer.
#[no_mangle]
pub unsafe extern "C" fn confbridge_parse_conf_map(
    data: *const u8,
    len: usize,
    out: *mut *mut ConfMapHandle,
) -> c_int {
    let result = ffi_boundary("parse_conf_map", || {
        if out.is_null() {
            return Err(FfiError::NullPointer("out"));
        }
        let buffer = unsafe { BorrowedBuffer::from_raw(data, len, "data") }?;
        let conf = parse_conf_map(buffer.as_slice())?;
        Ok(Box::into_raw(Box::new(ConfMapHandle { conf })))
    });

    match result {
        Ok(handle) => {
            debug!(bytes = len, "Handing configuration map to host");
            unsafe { *out = handle };
            CONFBRIDGE_OK
        }
        Err(status) => status,
    }
}

/// Number of entries in `map`. A null handle yields 0 and records a
/// null-pointer error.
///
/// # Safety
///
/// `map` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn confbridge_conf_map_len(map: *const ConfMapHandle) -> usize {
    ffi_boundary("conf_map_len", || Ok(unsafe { handle_ref(map) }?.conf.len())).unwrap_or(0)
}

/// Copy of the value stored under `key`, or null when the key is absent or
/// an error occurred (check [`confbridge_last_error`] to tell them apart).
///
/// # Safety
///
/// `map` must be a live handle and `key` must point to `key_len` readable
/// bytes.
#[no_mangle]
pub unsafe extern "C" fn confbridge_conf_map_get(
    map: *const ConfMapHandle,
    key: *const u8,
    key_len: usize,
) -> *mut c_char {
    ffi_boundary("conf_map_get", || {
        let handle = unsafe { handle_ref(map) }?;
        let key = unsafe { BorrowedBuffer::from_raw(key, key_len, "key") }?.to_str("key")?;
        match handle.conf.get(key) {
            Some(value) => into_c_string(value.clone()),
            None => Ok(std::ptr::null_mut()),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Diagnostic rendering of `map` (see `confbridge_core::print_config`).
///
/// # Safety
///
/// `map` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn confbridge_print_config(map: *const ConfMapHandle) -> *mut c_char {
    ffi_boundary("print_config", || {
        let handle = unsafe { handle_ref(map) }?;
        into_c_string(print_config(&handle.conf))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// JSON object with the entries of `map`, keys in ascending order.
///
/// # Safety
///
/// `map` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn confbridge_conf_map_to_json(map: *const ConfMapHandle) -> *mut c_char {
    ffi_boundary("conf_map_to_json", || {
        let handle = unsafe { handle_ref(map) }?;
        let ordered: BTreeMap<&str, &str> =
            handle.conf.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        into_c_string(serde_json::to_string(&ordered)?)
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Release a handle. Null is ignored.
///
/// # Safety
///
/// `map` must be null or a handle from [`confbridge_parse_conf_map`] that has
/// not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn confbridge_conf_map_free(map: *mut ConfMapHandle) {
    clear_last_error();
    if !map.is_null() {
        drop(unsafe { Box::from_raw(map) });
    }
}

/// Release a string returned by this library. Null is ignored.
///
/// # Safety
///
/// `s` must be null or a string from this library that has not been freed
/// yet.
#[no_mangle]
pub unsafe extern "C" fn confbridge_string_free(s: *mut c_char) {
    clear_last_error();
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Message describing the last failed call on this thread, or null if the
/// last call succeeded. Owned by the library; do not free.
#[no_mangle]
pub extern "C" fn confbridge_last_error() -> *const c_char {
    last_error_ptr()
}

static LOGGING_INIT: OnceLock<Result<(), String>> = OnceLock::new();

/// Install a stderr tracing subscriber for the process.
///
/// `level` is 0 (error) through 4 (trace); `RUST_LOG` overrides it. Only the
/// first valid call attempts the install. Later calls return its outcome
/// again, so a failed install keeps reporting `CONFBRIDGE_ERR_INTERNAL`.
#[no_mangle]
pub extern "C" fn confbridge_init_logging(level: c_int) -> c_int {
    let result = ffi_boundary("init_logging", || {
        let level = CliLogLevel::try_from(level).map_err(FfiError::InvalidLogLevel)?;

        LOGGING_INIT
            .get_or_init(|| {
                confbridge_logging::init_with_writer(
                    COMPONENT,
                    level.into(),
                    LogFormat::Plaintext,
                    io::stderr,
                )
                .map_err(|e| e.to_string())
            })
            .clone()
            .map_err(FfiError::Logging)
    });

    match result {
        Ok(()) => CONFBRIDGE_OK,
        Err(status) => status,
    }
}
