//! UTF-8 Safe String Utilities
//!
//! Field limits are expressed in characters, not bytes. Characters like `ø`,
//! `中` or `🎉` are multi-byte in UTF-8, so a limit of `n` must be converted
//! to a byte offset on a character boundary before slicing, or Rust panics.
//!
//! # Example
//! ```ignore
//! use crate::string_utils::{char_count, char_to_byte_index};
//!
//! let text = "Hei på deg";
//! assert_eq!(char_count(text), 10);
//! assert_eq!(&text[..char_to_byte_index(text, 5)], "Hei p");
//! ```

/// Number of characters (Unicode scalar values) in `s`.
#[inline]
pub fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of the `char_index`-th character of `s`.
///
/// Returns `s.len()` when `char_index` is past the end, so the result is
/// always a valid slice boundary.
#[inline]
pub fn char_to_byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(byte, _)| byte)
        .unwrap_or(s.len())
}

/// Safely take the first `n` characters of `s`.
#[inline]
pub fn prefix_chars(s: &str, n: usize) -> &str {
    &s[..char_to_byte_index(s, n)]
}
