//! Text segmentation for the snippet
//!
//! Fields are truncated to their limit first, then split into word tokens
//! on single spaces. Each token becomes one hoverable unit; matching between
//! units is case-insensitive.

use crate::string_utils::{char_count, prefix_chars};
use std::borrow::Cow;

/// Marker appended to a truncated field.
pub const ELLIPSIS: &str = "...";

/// Truncate `text` to at most `limit` characters, appending [`ELLIPSIS`]
/// when anything was cut.
///
/// Text at or under the limit is borrowed unchanged.
pub fn truncate(text: &str, limit: usize) -> Cow<'_, str> {
    if char_count(text) > limit {
        let mut out = String::with_capacity(text.len() + ELLIPSIS.len());
        out.push_str(prefix_chars(text, limit));
        out.push_str(ELLIPSIS);
        Cow::Owned(out)
    } else {
        Cow::Borrowed(text)
    }
}

/// Split `text` on single spaces.
///
/// Consecutive spaces produce empty tokens, and an empty string yields a
/// single empty token, so `chunk_words(t).join(" ") == t` for every `t`.
pub fn chunk_words(text: &str) -> Vec<&str> {
    text.split(' ').collect()
}

/// Case-insensitive equality used for keyword highlighting.
pub fn keywords_match(a: &str, b: &str) -> bool {
    if a.len() == b.len() && a.eq_ignore_ascii_case(b) {
        return true;
    }
    a.to_lowercase() == b.to_lowercase()
}
