//! Conversions between byte offsets, `(line, column)` pairs and the char
//! indices used by the text widget.
//!
//! Lines are split on `\n` only, so a buffer ending in a newline has an empty
//! last line (`"a\n"` has two lines).

/// Caret location: `line` is 1-indexed, `column` is a 0-indexed char count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretPosition {
    pub line: usize,
    pub column: usize,
}

impl CaretPosition {
    /// Column as shown to the user.
    pub fn display_column(&self) -> usize {
        self.column + 1
    }
}

pub fn line_count(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count() + 1
}

/// Byte offset of the first character of `line` (1-indexed).
///
/// `line` is clamped to `[1, line_count]`; returns the clamped line too.
pub fn line_start(text: &str, line: usize) -> (usize, usize) {
    let target = line.clamp(1, line_count(text));
    if target == 1 {
        return (0, 1);
    }

    let offset = text
        .match_indices('\n')
        .nth(target - 2)
        .map(|(idx, _)| idx + 1)
        .unwrap_or(text.len());
    (offset, target)
}

pub fn position_at(text: &str, offset: usize) -> CaretPosition {
    let offset = clamp_to_boundary(text, offset);
    let before = &text[..offset];
    let line_begin = before.rfind('\n').map(|idx| idx + 1).unwrap_or(0);

    CaretPosition {
        line: before.bytes().filter(|&b| b == b'\n').count() + 1,
        column: before[line_begin..].chars().count(),
    }
}

/// Largest char boundary at or below `offset`.
pub fn clamp_to_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

pub fn char_index(text: &str, offset: usize) -> usize {
    text[..clamp_to_boundary(text, offset)].chars().count()
}

pub fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}
