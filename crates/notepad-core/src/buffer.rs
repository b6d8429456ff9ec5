use std::ops::Range;

use crate::search::SearchQuery;

/// The narrow editing surface handed to the find/replace dialogs.
///
/// Offsets are bytes on char boundaries of the current buffer text.
pub trait BufferHandle {
    fn search(&self, query: &SearchQuery, from: usize) -> Option<Range<usize>>;

    /// Replaces `range` with `replacement` as one recorded edit.
    fn replace_range(&mut self, range: Range<usize>, replacement: &str);

    fn caret(&self) -> usize;

    /// Moves the caret and clears any selection.
    fn set_caret(&mut self, offset: usize);

    /// Selects `range`, leaving the caret at its end.
    fn select(&mut self, range: Range<usize>) {
        self.set_caret(range.end);
    }

    /// Replaces each of the sorted, disjoint `ranges` with `replacement` as
    /// one undo step, leaving the caret after the last replacement.
    fn replace_ranges(&mut self, ranges: &[Range<usize>], replacement: &str) {
        let Some(last) = ranges.last() else {
            return;
        };
        let removed: usize = ranges.iter().map(|r| r.len()).sum();
        let caret = last.end - removed + ranges.len() * replacement.len();

        self.begin_batch();
        for range in ranges.iter().rev() {
            self.replace_range(range.clone(), replacement);
        }
        self.end_batch();
        self.set_caret(caret);
    }

    /// Edits between `begin_batch` and `end_batch` undo as one step.
    fn begin_batch(&mut self) {}

    fn end_batch(&mut self) {}
}
