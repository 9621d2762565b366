//! UTF-16 offset utilities
//!
//! The browser addresses text in UTF-16 code units while Rust strings are
//! UTF-8. These helpers translate between the two and keep every offset on
//! a Unicode scalar boundary, so a surrogate pair is never split.

/// Length of `text` in UTF-16 code units
pub fn len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Byte index of the UTF-16 `offset` in `text`
///
/// An offset that falls inside a surrogate pair snaps down to the start of
/// that character. Offsets past the end map to `text.len()`.
pub fn byte_index(text: &str, offset: usize) -> usize {
    let mut units = 0;
    for (byte, ch) in text.char_indices() {
        let next = units + ch.len_utf16();
        if next > offset {
            return byte;
        }
        units = next;
    }
    text.len()
}

/// Snap `offset` down to the nearest scalar boundary, clamped to the text length
pub fn floor_boundary(text: &str, offset: usize) -> usize {
    let mut units = 0;
    for ch in text.chars() {
        let next = units + ch.len_utf16();
        if next > offset {
            return units;
        }
        units = next;
    }
    units
}

/// Offset of the character boundary before `offset` (0 stays at 0)
pub fn prev_boundary(text: &str, offset: usize) -> usize {
    let byte = byte_index(text, offset);
    match text[..byte].chars().next_back() {
        Some(ch) => floor_boundary(text, offset) - ch.len_utf16(),
        None => 0,
    }
}

/// Offset of the character boundary after `offset` (the end stays at the end)
pub fn next_boundary(text: &str, offset: usize) -> usize {
    let byte = byte_index(text, offset);
    match text[byte..].chars().next() {
        Some(ch) => floor_boundary(text, offset) + ch.len_utf16(),
        None => len(text),
    }
}

/// Slice `text` between two UTF-16 offsets
pub fn slice(text: &str, from: usize, to: usize) -> &str {
    let start = byte_index(text, from);
    let end = byte_index(text, to).max(start);
    &text[start..end]
}
