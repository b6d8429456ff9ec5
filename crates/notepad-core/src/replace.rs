use crate::buffer::BufferHandle;
use crate::search::{FindOutcome, SearchQuery};

/// Replaces the first match at or after the caret.
///
/// On success the caret sits immediately after the inserted text and the
/// returned span covers that text.
pub fn replace_one<B: BufferHandle + ?Sized>(
    buffer: &mut B,
    query: &SearchQuery,
    replacement: &str,
) -> FindOutcome {
    if query.is_empty() {
        return FindOutcome::EmptyNeedle;
    }

    let Some(found) = buffer.search(query, buffer.caret()) else {
        return FindOutcome::NotFound;
    };

    let start = found.start;
    buffer.replace_range(found, replacement);
    let end = start + replacement.len();
    buffer.set_caret(end);
    FindOutcome::Found(start..end)
}

/// Replaces every non-overlapping match in one left-to-right pass from the
/// start of the buffer and returns how many were replaced.
///
/// Scanning resumes after each inserted replacement, so a replacement that
/// contains the needle is never matched again.
pub fn replace_all<B: BufferHandle + ?Sized>(
    buffer: &mut B,
    query: &SearchQuery,
    replacement: &str,
) -> usize {
    if query.is_empty() {
        return 0;
    }

    // Literal matches never depend on preceding text, so scanning the
    // original equals resuming after each inserted replacement.
    let mut matches = Vec::new();
    let mut pos = 0;
    while let Some(found) = buffer.search(query, pos) {
        pos = found.end;
        matches.push(found);
    }
    if !matches.is_empty() {
        buffer.replace_ranges(&matches, replacement);
    }

    let count = matches.len();
    tracing::debug!(needle = query.needle(), count, "replace all");
    count
}
