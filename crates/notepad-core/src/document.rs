use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::buffer::BufferHandle;
use crate::error::Result;
use crate::file_io::{self, TrailingNewline};
use crate::history::{EditHistory, EditOperation};
use crate::line_index::{self, CaretPosition};
use crate::search::SearchQuery;

pub const UNTITLED: &str = "Untitled";

/// The single open text document.
///
/// `dirty` always equals `text != saved`; `saved` is empty for a document
/// that has never been written, so a non-empty untitled buffer is dirty.
#[derive(Debug, Clone, Default)]
pub struct Document {
    text: String,
    // Text as of the last recorded history step; widget edits are diffed
    // against it.
    committed: String,
    saved: String,
    path: Option<PathBuf>,
    dirty: bool,

    anchor: usize,
    caret: usize,
    highlight: Option<Range<usize>>,
    caret_jump: bool,

    history: EditHistory,
    // While set, `committed` and `dirty` are brought up to date by `end_batch`.
    in_batch: bool,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `path` into a fresh, clean document.
    pub fn open(path: &Path) -> Result<Self> {
        let text = file_io::read_text(path)?;
        Ok(Self::loaded(text, Some(path.to_path_buf())))
    }

    fn loaded(text: String, path: Option<PathBuf>) -> Self {
        Self {
            committed: text.clone(),
            saved: text.clone(),
            text,
            path,
            caret_jump: true,
            ..Self::default()
        }
    }

    /// Writes the buffer to `path` and adopts it as the document's path.
    ///
    /// On failure nothing changes: the path stays and the dirty flag stays.
    pub fn save_to(&mut self, path: &Path, policy: TrailingNewline) -> Result<()> {
        file_io::write_text(path, &self.text, policy)?;
        self.saved.clone_from(&self.text);
        self.path = Some(path.to_path_buf());
        self.refresh_dirty();
        Ok(())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Basename of the path, or "Untitled".
    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNTITLED.to_owned())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn line_count(&self) -> usize {
        line_index::line_count(&self.text)
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn anchor(&self) -> usize {
        self.anchor
    }

    pub fn caret_position(&self) -> CaretPosition {
        line_index::position_at(&self.text, self.caret)
    }

    /// Selected span, ordered; empty when nothing is selected.
    pub fn selection(&self) -> Range<usize> {
        self.anchor.min(self.caret)..self.anchor.max(self.caret)
    }

    pub fn selected_text(&self) -> Option<&str> {
        let range = self.selection();
        if range.is_empty() {
            None
        } else {
            Some(&self.text[range])
        }
    }

    /// Span marked by the last successful find, until the next edit or move.
    pub fn highlight(&self) -> Option<Range<usize>> {
        self.highlight.clone()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// True once after each programmatic caret move, so the view can push the
    /// new selection into the widget and scroll to it.
    pub fn take_caret_jump(&mut self) -> bool {
        std::mem::take(&mut self.caret_jump)
    }

    /// Lets a text widget edit the buffer in place, then records whatever it
    /// changed as one history step.
    pub fn edit_with<R>(&mut self, edit: impl FnOnce(&mut String) -> R) -> R {
        let result = edit(&mut self.text);
        self.record_widget_edit();
        result
    }

    fn record_widget_edit(&mut self) {
        let Some(op) = diff(&self.committed, &self.text) else {
            return;
        };
        self.history.push_typing(op);
        self.committed.clone_from(&self.text);
        self.highlight = None;
        self.anchor = line_index::clamp_to_boundary(&self.text, self.anchor);
        self.caret = line_index::clamp_to_boundary(&self.text, self.caret);
        self.refresh_dirty();
    }

    /// Adopts the selection reported by the text widget.
    pub fn sync_selection(&mut self, anchor: usize, caret: usize) {
        let anchor = line_index::clamp_to_boundary(&self.text, anchor);
        let caret = line_index::clamp_to_boundary(&self.text, caret);
        if self.highlight.as_ref() != Some(&(anchor.min(caret)..anchor.max(caret))) {
            self.highlight = None;
        }
        self.anchor = anchor;
        self.caret = caret;
    }

    pub fn set_caret(&mut self, offset: usize) {
        let offset = line_index::clamp_to_boundary(&self.text, offset);
        self.anchor = offset;
        self.caret = offset;
        self.highlight = None;
        self.caret_jump = true;
    }

    /// Selects and marks `range`; the caret ends up after it.
    pub fn select(&mut self, range: Range<usize>) {
        let start = line_index::clamp_to_boundary(&self.text, range.start);
        let end = line_index::clamp_to_boundary(&self.text, range.end).max(start);
        self.anchor = start;
        self.caret = end;
        self.highlight = Some(start..end);
        self.caret_jump = true;
    }

    /// Moves the caret to column 0 of `line`, clamped to `[1, line_count]`.
    /// Returns the line actually used.
    pub fn goto_line(&mut self, line: usize) -> usize {
        let (offset, line) = line_index::line_start(&self.text, line);
        self.set_caret(offset);
        line
    }

    pub fn replace_range(&mut self, range: Range<usize>, replacement: &str) {
        let start = line_index::clamp_to_boundary(&self.text, range.start);
        let end = line_index::clamp_to_boundary(&self.text, range.end).max(start);
        if start == end && replacement.is_empty() {
            return;
        }

        let op = EditOperation::new(start, &self.text[start..end], replacement);
        let caret = op.apply(&mut self.text);
        self.history.push(op);
        self.set_caret(caret);
        if !self.in_batch {
            self.committed.clone_from(&self.text);
            self.refresh_dirty();
        }
    }

    /// Replaces every range with `replacement` as a single splice covering
    /// the first through the last range. Ranges must be sorted and disjoint.
    /// The caret ends up after the last replacement.
    pub fn replace_ranges(&mut self, ranges: &[Range<usize>], replacement: &str) {
        let (Some(first), Some(last)) = (ranges.first(), ranges.last()) else {
            return;
        };

        let mut spliced = String::with_capacity(last.end - first.start);
        let mut pos = first.start;
        for range in ranges {
            spliced.push_str(&self.text[pos..range.start]);
            spliced.push_str(replacement);
            pos = range.end;
        }
        self.replace_range(first.start..last.end, &spliced);
    }

    /// Replaces the selection (or inserts at the caret).
    pub fn insert_at_selection(&mut self, text: &str) {
        self.replace_range(self.selection(), text);
    }

    /// Removes and returns the selected text.
    pub fn delete_selection(&mut self) -> Option<String> {
        let removed = self.selected_text()?.to_owned();
        self.replace_range(self.selection(), "");
        Some(removed)
    }

    pub fn begin_batch(&mut self) {
        self.history.begin_group();
        self.in_batch = true;
    }

    pub fn end_batch(&mut self) {
        self.history.end_group();
        if std::mem::take(&mut self.in_batch) {
            self.committed.clone_from(&self.text);
            self.refresh_dirty();
        }
    }

    pub fn undo(&mut self) -> bool {
        let Some(transaction) = self.history.pop_undo() else {
            return false;
        };

        let mut caret = self.caret;
        for op in transaction.iter().rev() {
            caret = op.inverse().apply(&mut self.text);
        }
        self.after_history_step(caret);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(transaction) = self.history.pop_redo() else {
            return false;
        };

        let mut caret = self.caret;
        for op in &transaction {
            caret = op.apply(&mut self.text);
        }
        self.after_history_step(caret);
        true
    }

    fn after_history_step(&mut self, caret: usize) {
        self.in_batch = false;
        self.committed.clone_from(&self.text);
        self.set_caret(caret);
        self.refresh_dirty();
    }

    fn refresh_dirty(&mut self) {
        self.dirty = self.text != self.saved;
    }
}

impl BufferHandle for Document {
    fn search(&self, query: &SearchQuery, from: usize) -> Option<Range<usize>> {
        query.find_from(&self.text, from)
    }

    fn replace_range(&mut self, range: Range<usize>, replacement: &str) {
        Document::replace_range(self, range, replacement);
    }

    fn caret(&self) -> usize {
        self.caret
    }

    fn set_caret(&mut self, offset: usize) {
        Document::set_caret(self, offset);
    }

    fn select(&mut self, range: Range<usize>) {
        Document::select(self, range);
    }

    fn replace_ranges(&mut self, ranges: &[Range<usize>], replacement: &str) {
        Document::replace_ranges(self, ranges, replacement);
    }

    fn begin_batch(&mut self) {
        Document::begin_batch(self);
    }

    fn end_batch(&mut self) {
        Document::end_batch(self);
    }
}

/// Smallest single splice turning `old` into `new`, or `None` if equal.
fn diff(old: &str, new: &str) -> Option<EditOperation> {
    if old == new {
        return None;
    }

    let mut prefix = old
        .bytes()
        .zip(new.bytes())
        .take_while(|(a, b)| a == b)
        .count();
    while !old.is_char_boundary(prefix) || !new.is_char_boundary(prefix) {
        prefix -= 1;
    }

    let max_suffix = old.len().min(new.len()) - prefix;
    let mut suffix = old
        .bytes()
        .rev()
        .zip(new.bytes().rev())
        .take(max_suffix)
        .take_while(|(a, b)| a == b)
        .count();
    while !old.is_char_boundary(old.len() - suffix) || !new.is_char_boundary(new.len() - suffix) {
        suffix -= 1;
    }

    Some(EditOperation::new(
        prefix,
        &old[prefix..old.len() - suffix],
        &new[prefix..new.len() - suffix],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(doc: &mut Document, text: &str) {
        doc.edit_with(|buffer| buffer.push_str(text));
    }

    #[test]
    fn test_new_document_is_clean_and_untitled() {
        let doc = Document::new();
        assert!(!doc.is_dirty());
        assert_eq!(doc.display_name(), "Untitled");
        assert_eq!(doc.line_count(), 1);
    }

    #[test]
    fn test_widget_edit_sets_dirty_and_undo_clears_it() {
        let mut doc = Document::new();
        typed(&mut doc, "abc");
        assert!(doc.is_dirty());
        assert!(doc.undo());
        assert_eq!(doc.text(), "");
        assert!(!doc.is_dirty());
        assert!(doc.redo());
        assert_eq!(doc.text(), "abc");
        assert!(doc.is_dirty());
    }

    #[test]
    fn test_diff_finds_middle_splice() {
        let op = diff("hello world", "hello brave world").unwrap();
        assert_eq!(op, EditOperation::new(6, "", "brave "));

        let op = diff("aaa", "aa").unwrap();
        assert_eq!(op.deleted.len(), 1);
        assert_eq!(op.inserted, "");

        assert!(diff("same", "same").is_none());
    }

    #[test]
    fn test_diff_respects_char_boundaries() {
        // é (c3 a9) and è (c3 a8) share a leading byte.
        let op = diff("é", "è").unwrap();
        assert_eq!(op, EditOperation::new(0, "é", "è"));
    }

    #[test]
    fn test_replace_range_moves_caret_after_insert() {
        let mut doc = Document::new();
        typed(&mut doc, "one two three");
        doc.replace_range(4..7, "2");
        assert_eq!(doc.text(), "one 2 three");
        assert_eq!(doc.caret(), 5);
        assert!(doc.take_caret_jump());
        assert!(!doc.take_caret_jump());
    }

    #[test]
    fn test_cut_and_paste() {
        let mut doc = Document::new();
        typed(&mut doc, "hello world");
        doc.sync_selection(0, 6);
        assert_eq!(doc.delete_selection().as_deref(), Some("hello "));
        assert_eq!(doc.text(), "world");
        doc.set_caret(5);
        doc.insert_at_selection("!");
        assert_eq!(doc.text(), "world!");
        assert!(doc.undo());
        assert!(doc.undo());
        assert_eq!(doc.text(), "hello world");
    }

    #[test]
    fn test_goto_line_clamps() {
        let mut doc = Document::new();
        typed(&mut doc, "a\nbb\nccc");
        assert_eq!(doc.goto_line(0), 1);
        assert_eq!(doc.caret(), 0);
        assert_eq!(doc.goto_line(1_000_000), 3);
        assert_eq!(doc.caret_position(), CaretPosition { line: 3, column: 0 });
        assert_eq!(doc.goto_line(2), 2);
        assert_eq!(doc.caret(), 2);
    }

    #[test]
    fn test_select_marks_highlight_until_moved() {
        let mut doc = Document::new();
        typed(&mut doc, "find me here");
        doc.select(5..7);
        assert_eq!(doc.highlight(), Some(5..7));
        assert_eq!(doc.caret(), 7);
        // The widget echoing the same selection keeps the mark.
        doc.sync_selection(5, 7);
        assert_eq!(doc.highlight(), Some(5..7));
        doc.sync_selection(2, 2);
        assert_eq!(doc.highlight(), None);
    }

    #[test]
    fn test_batch_undoes_as_one_step() {
        let mut doc = Document::new();
        typed(&mut doc, "a-a-a");
        doc.begin_batch();
        doc.replace_range(0..1, "b");
        doc.replace_range(2..3, "b");
        doc.end_batch();
        assert_eq!(doc.text(), "b-b-a");
        assert!(doc.is_dirty());

        // The widget diff baseline includes the batch.
        typed(&mut doc, "!");
        assert!(doc.undo());
        assert_eq!(doc.text(), "b-b-a");
        assert!(doc.undo());
        assert_eq!(doc.text(), "a-a-a");
    }

    #[test]
    fn test_replace_all_over_many_matches() {
        let original = "ab ".repeat(50_000);
        let mut doc = Document::loaded(original.clone(), None);

        let count = crate::replace::replace_all(&mut doc, &SearchQuery::new("a", true), "xy");
        assert_eq!(count, 50_000);
        assert_eq!(doc.text(), "xyb ".repeat(50_000));
        assert_eq!(doc.caret(), doc.text().len() - 2);
        assert!(doc.is_dirty());

        assert!(doc.undo());
        assert_eq!(doc.text(), original);
        assert!(!doc.is_dirty());
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_replace_ranges_keeps_gaps() {
        let mut doc = Document::new();
        typed(&mut doc, "a-a-a");
        doc.replace_ranges(&[0..1, 4..5], "bb");
        assert_eq!(doc.text(), "bb-a-bb");
        assert_eq!(doc.caret(), 7);
        doc.replace_ranges(&[], "zz");
        assert_eq!(doc.text(), "bb-a-bb");
    }

    #[test]
    fn test_typing_after_paste_is_its_own_step() {
        let mut doc = Document::new();
        doc.insert_at_selection("foo");
        typed(&mut doc, "x");
        assert!(doc.undo());
        assert_eq!(doc.text(), "foo");
        assert!(doc.undo());
        assert_eq!(doc.text(), "");
    }

    #[test]
    fn test_backspace_after_cut_is_its_own_step() {
        let mut doc = Document::new();
        typed(&mut doc, "hello world");
        doc.sync_selection(6, 11);
        assert_eq!(doc.delete_selection().as_deref(), Some("world"));
        doc.edit_with(|buffer| buffer.pop());
        assert_eq!(doc.text(), "hello");

        assert!(doc.undo());
        assert_eq!(doc.text(), "hello ");
        assert!(doc.undo());
        assert_eq!(doc.text(), "hello world");
    }

    #[test]
    fn test_save_to_clears_dirty_and_adopts_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let mut doc = Document::new();
        typed(&mut doc, "content");
        doc.save_to(&path, TrailingNewline::Preserve).unwrap();
        assert!(!doc.is_dirty());
        assert_eq!(doc.display_name(), "notes.txt");

        typed(&mut doc, "!");
        assert!(doc.is_dirty());
    }
}
