//! Slicing helpers shared by the header and subfile decoders.
//!
//! AAMVA payloads coming off real scanners are routinely shorter than the
//! layout promises, so every fixed-width read clamps to the available input
//! instead of failing.

/// Returns `text[start..end]`, clamped to the end of the input. A range that
/// falls entirely past the end (or lands on a non-ASCII boundary) yields `""`.
pub(crate) fn clamped(text: &str, start: usize, end: usize) -> &str {
    let end = end.min(text.len());
    let start = start.min(end);
    text.get(start..end).unwrap_or("")
}

/// Parses the leading digit run of a token, skipping leading whitespace.
/// Tokens with no digits parse as 0.
///
/// Some jurisdictions wrap the header early, so a numeric token can carry a
/// stray separator character (e.g. `"\n2"` for the entry count).
pub(crate) fn lenient_uint(token: &str) -> usize {
    let token = token.trim_start();
    let digits = token
        .find(|c: char| !c.is_ascii_digit())
        .map_or(token, |i| &token[..i]);
    digits.parse().unwrap_or(0)
}
