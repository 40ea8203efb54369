// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Read-only views over memory owned by the host runtime

use crate::error::FfiError;

/// Bytes borrowed from the caller for the duration of one call
///
/// The view never frees or writes through the pointer; releasing the memory
/// stays with whoever allocated it. The lifetime ties the view to the FFI
/// call that produced it, so it cannot be stored past that call.
#[derive(Clone, Copy, Debug)]
pub struct BorrowedBuffer<'a> {
    bytes: &'a [u8],
}

impl<'a> BorrowedBuffer<'a> {
    /// Wrap a pointer/length pair handed over by the host.
    ///
    /// A null pointer is accepted only together with `len == 0` and yields
    /// the empty buffer.
    ///
    /// # Safety
    ///
    /// When `data` is non-null it must point to `len` initialized bytes that
    /// remain valid and unmodified for `'a`.
    pub unsafe fn from_raw(
        data: *const u8,
        len: usize,
        name: &'static str,
    ) -> Result<Self, FfiError> {
        if data.is_null() {
            return if len == 0 {
                Ok(Self::from_slice(&[]))
            } else {
                Err(FfiError::NullPointer(name))
            };
        }
        Ok(Self::from_slice(unsafe { std::slice::from_raw_parts(data, len) }))
    }

    pub fn from_slice(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn as_slice(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Interpret the bytes as UTF-8 text.
    pub fn to_str(&self, name: &'static str) -> Result<&'a str, FfiError> {
        std::str::from_utf8(self.bytes).map_err(|_| FfiError::InvalidUtf8(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[confbridge_test_utils::logged_test]
    fn test_null_with_zero_length_is_empty() {
        let buffer = unsafe { BorrowedBuffer::from_raw(std::ptr::null(), 0, "data") }.unwrap();
        assert!(buffer.is_empty());
    }

    #[confbridge_test_utils::logged_test]
    fn test_null_with_length_is_rejected() {
        let err = unsafe { BorrowedBuffer::from_raw(std::ptr::null(), 4, "data") }.unwrap_err();
        assert!(matches!(err, FfiError::NullPointer("data")));
    }

    #[confbridge_test_utils::logged_test]
    fn test_view_covers_exact_extent() {
        let owned = vec![1u8, 2, 3, 4, 5];
        let buffer = unsafe { BorrowedBuffer::from_raw(owned.as_ptr(), 3, "data") }.unwrap();

        assert_eq!(buffer.as_slice(), &[1, 2, 3]);
        assert_eq!(owned, vec![1, 2, 3, 4, 5]);
    }

    #[confbridge_test_utils::logged_test]
    fn test_to_str() {
        assert_eq!(BorrowedBuffer::from_slice(b"spark.master").to_str("key").unwrap(), "spark.master");
        assert!(matches!(
            BorrowedBuffer::from_slice(&[0xff]).to_str("key"),
            Err(FfiError::InvalidUtf8("key"))
        ));
    }
}
