// SPDX-License-Identifier: GPL-3.0-only

//! Keyword completion.
//!
//! Suggestions are recomputed from the buffer on demand and never stored.

/// Returns the trailing whitespace-delimited token of the buffer.
///
/// Empty if the buffer is empty or ends in whitespace.
pub fn trailing_token(buffer: &str) -> &str {
    buffer.rsplit(char::is_whitespace).next().unwrap_or("")
}

/// Returns up to `max` keywords whose lowercase form starts with the
/// lowercased trailing token, in dictionary order.
pub fn suggestions<'a>(buffer: &str, keywords: &'a [String], max: usize) -> Vec<&'a str> {
    let token = trailing_token(buffer).to_lowercase();
    if token.is_empty() {
        return Vec::new();
    }

    keywords
        .iter()
        .filter(|keyword| keyword.to_lowercase().starts_with(&token))
        .take(max)
        .map(String::as_str)
        .collect()
}

/// Replaces the trailing token with `word` followed by one space.
pub fn apply_suggestion(buffer: &str, word: &str) -> String {
    let mut value = buffer
        .trim_end_matches(|c: char| !c.is_whitespace())
        .to_string();
    value.push_str(word);
    value.push(' ');
    value
}
