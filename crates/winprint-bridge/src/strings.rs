// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// UTF-16 conversions for the wide-character Win32 API, plus a hex dumper for
// tracing raw structures.

use std::fmt::Write;

/// Encode `s` as a NUL-terminated UTF-16 buffer.
pub fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Decode a fixed-size UTF-16 field, stopping at the first NUL.
pub fn from_wide_until_nul(wide: &[u16]) -> String {
    let len = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    String::from_utf16_lossy(&wide[..len])
}

/// Copy a NUL-terminated UTF-16 string out of foreign memory.
///
/// A null pointer yields an empty string.
///
/// # Safety
///
/// `ptr` must be null or point to a readable, NUL-terminated UTF-16 string.
pub unsafe fn from_wide_ptr(ptr: *const u16) -> String {
    if ptr.is_null() {
        return String::new();
    }
    let mut len = 0;
    // SAFETY: the caller guarantees a terminating NUL within the allocation.
    unsafe {
        while *ptr.add(len) != 0 {
            len += 1;
        }
        String::from_utf16_lossy(std::slice::from_raw_parts(ptr, len))
    }
}

/// Render `bytes` as space-separated uppercase hex, `column` bytes per line.
pub fn hex_dump(bytes: &[u8], column: usize) -> String {
    let column = column.max(1);
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && i % column == 0 {
            out.push('\n');
        }
        let _ = write!(out, "{b:02X} ");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_round_trip_through_pointer() {
        let wide = to_wide("WSD - EPSON3DEF75 (L6290 Series)");
        assert_eq!(wide.last(), Some(&0));
        let back = unsafe { from_wide_ptr(wide.as_ptr()) };
        assert_eq!(back, "WSD - EPSON3DEF75 (L6290 Series)");
    }

    #[test]
    fn null_pointer_is_empty() {
        assert_eq!(unsafe { from_wide_ptr(std::ptr::null()) }, "");
    }

    #[test]
    fn fixed_field_stops_at_nul() {
        let mut field = [0u16; 16];
        for (slot, c) in field.iter_mut().zip("10.0.0.5".encode_utf16()) {
            *slot = c;
        }
        assert_eq!(from_wide_until_nul(&field), "10.0.0.5");
        // No terminator: the whole field is used.
        let full: Vec<u16> = "abcd".encode_utf16().collect();
        assert_eq!(from_wide_until_nul(&full), "abcd");
    }

    #[test]
    fn hex_dump_wraps_at_column() {
        let dump = hex_dump(&[0x00, 0x0A, 0xFF, 0x10, 0x7F], 2);
        assert_eq!(dump, "00 0A \nFF 10 \n7F ");
        assert_eq!(hex_dump(&[], 16), "");
    }
}
