//! Small text helpers shared across the pipeline

/// Clip a string to at most `max` characters, respecting UTF-8 boundaries.
///
/// Byte-indexed slicing would panic inside a multi-byte character; article
/// bodies routinely contain them.
pub(crate) fn clip_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends.
///
/// DOM text nodes carry the source document's indentation and newlines;
/// extracted article text should read as plain prose.
pub(crate) fn squash_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
