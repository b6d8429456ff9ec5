use notepad_core::replace::{replace_all, replace_one};
use notepad_core::search::find_next;
use notepad_core::*;
use std::collections::VecDeque;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

// Helper function to create test files
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Answers prompts and pickers from a script and records notifications.
#[derive(Default)]
struct ScriptedDialogs {
    open_paths: VecDeque<PathBuf>,
    save_paths: VecDeque<PathBuf>,
    choices: VecDeque<PromptChoice>,
    prompts: usize,
    errors: Vec<String>,
}

impl Dialogs for ScriptedDialogs {
    fn pick_open_path(&mut self) -> Option<PathBuf> {
        self.open_paths.pop_front()
    }

    fn pick_save_path(&mut self, _suggested_name: &str) -> Option<PathBuf> {
        self.save_paths.pop_front()
    }

    fn confirm_unsaved_changes(&mut self, _document_name: &str) -> PromptChoice {
        self.prompts += 1;
        self.choices.pop_front().unwrap_or(PromptChoice::Cancel)
    }

    fn show_error(&mut self, _title: &str, message: &str) {
        self.errors.push(message.to_owned());
    }

    fn show_info(&mut self, _title: &str, _message: &str) {}
}

fn dirty_notepad(text: &str) -> Notepad {
    let mut notepad = Notepad::default();
    notepad
        .document_mut()
        .edit_with(|buffer| buffer.push_str(text));
    notepad
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_save_then_open_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("round.txt");
        let content = "first line\nsecond line\n\nlast";

        let mut notepad = dirty_notepad(content);
        let mut dialogs = ScriptedDialogs::default();
        assert!(notepad.save_as(Some(path.clone()), &mut dialogs));
        assert!(!notepad.document().is_dirty());

        let mut other = Notepad::default();
        assert!(other.open(Some(path), &mut dialogs));
        assert_eq!(other.document().text(), content);
        assert!(!other.document().is_dirty());
        assert_eq!(other.title(), "round.txt - Notepad");
    }

    #[test]
    fn test_save_without_path_uses_picker() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picked.txt");
        let mut notepad = dirty_notepad("hello");
        let mut dialogs = ScriptedDialogs {
            save_paths: VecDeque::from([path.clone()]),
            ..Default::default()
        };

        notepad.dispatch(Command::Save, &mut dialogs);
        assert_eq!(notepad.document().path(), Some(path.as_path()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");

        // Subsequent saves go straight to the adopted path.
        notepad.document_mut().edit_with(|b| b.push_str(" again"));
        notepad.dispatch(Command::Save, &mut dialogs);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello again");
    }

    #[test]
    fn test_trim_one_trailing_newline_policy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trim.txt");
        let mut notepad = Notepad::new(DisplaySettings::default(), TrailingNewline::TrimOne);
        notepad.document_mut().edit_with(|b| b.push_str("text\n\n"));
        assert!(notepad.save_as(Some(path.clone()), &mut ScriptedDialogs::default()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "text\n");
    }

    #[test]
    fn test_dirty_flag_after_open_and_edit() {
        let file = create_test_file("abc");
        let mut notepad = Notepad::default();
        assert!(notepad.open(Some(file.path().to_path_buf()), &mut ScriptedDialogs::default()));
        assert!(!notepad.document().is_dirty());

        notepad.document_mut().edit_with(|b| b.insert(0, 'x'));
        assert!(notepad.document().is_dirty());
        assert!(notepad.title().contains('*'));
    }

    #[test]
    fn test_open_failure_leaves_document_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut notepad = dirty_notepad("keep me");
        let mut dialogs = ScriptedDialogs {
            choices: VecDeque::from([PromptChoice::Discard]),
            ..Default::default()
        };

        let opened = notepad.open(Some(dir.path().join("missing.txt")), &mut dialogs);
        assert!(!opened);
        assert_eq!(dialogs.errors.len(), 1);
        assert_eq!(notepad.document().text(), "keep me");
        assert!(notepad.document().is_dirty());
    }

    #[test]
    fn test_open_rejects_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xc3, 0x28]).unwrap();
        file.flush().unwrap();

        let mut notepad = Notepad::default();
        let mut dialogs = ScriptedDialogs::default();
        assert!(!notepad.open(Some(file.path().to_path_buf()), &mut dialogs));
        assert_eq!(dialogs.errors.len(), 1);
        assert_eq!(notepad.document().path(), None);
    }

    #[test]
    fn test_write_failure_keeps_dirty_flag() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("no-such-dir").join("out.txt");
        let mut notepad = dirty_notepad("data");
        let mut dialogs = ScriptedDialogs::default();

        assert!(!notepad.save_as(Some(bad), &mut dialogs));
        assert_eq!(dialogs.errors.len(), 1);
        assert!(notepad.document().is_dirty());
        assert_eq!(notepad.document().path(), None);
    }

    #[test]
    fn test_cancel_prompt_on_new_open_exit() {
        let file = create_test_file("other");
        let mut notepad = dirty_notepad("unsaved work");
        notepad.document_mut().set_caret(3);
        let mut dialogs = ScriptedDialogs {
            open_paths: VecDeque::from([file.path().to_path_buf()]),
            ..Default::default()
        };

        notepad.dispatch(Command::New, &mut dialogs);
        notepad.dispatch(Command::Open(None), &mut dialogs);
        let flow = notepad.dispatch(Command::Exit, &mut dialogs);

        assert_eq!(dialogs.prompts, 3);
        assert_eq!(flow, Flow::Continue);
        assert_eq!(notepad.document().text(), "unsaved work");
        assert_eq!(notepad.document().path(), None);
        assert!(notepad.document().is_dirty());
        assert_eq!(notepad.document().caret(), 3);
        // The picker was never consulted.
        assert_eq!(dialogs.open_paths.len(), 1);
    }

    #[test]
    fn test_discard_prompt_then_new() {
        let mut notepad = dirty_notepad("throw away");
        let mut dialogs = ScriptedDialogs {
            choices: VecDeque::from([PromptChoice::Discard]),
            ..Default::default()
        };
        assert!(notepad.new_document(&mut dialogs));
        assert_eq!(notepad.document().text(), "");
        assert!(!notepad.document().is_dirty());
        assert_eq!(notepad.title(), "Untitled - Notepad");
    }

    #[test]
    fn test_save_prompt_proceeds_only_when_save_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("kept.txt");

        // Save chosen but the picker is cancelled: exit is aborted.
        let mut notepad = dirty_notepad("important");
        let mut dialogs = ScriptedDialogs {
            choices: VecDeque::from([PromptChoice::Save, PromptChoice::Save]),
            ..Default::default()
        };
        assert_eq!(notepad.exit(&mut dialogs), Flow::Continue);
        assert!(notepad.document().is_dirty());

        // Save chosen and the picker answers: exit goes ahead.
        dialogs.save_paths.push_back(good.clone());
        assert_eq!(notepad.exit(&mut dialogs), Flow::Exit);
        assert_eq!(std::fs::read_to_string(&good).unwrap(), "important");
    }

    #[test]
    fn test_goto_line_clamps_through_command() {
        let mut notepad = dirty_notepad("1\n2\n3\n4");
        let mut dialogs = ScriptedDialogs::default();

        notepad.dispatch(Command::GotoLine(0), &mut dialogs);
        assert_eq!(notepad.document().caret_position().line, 1);

        notepad.dispatch(Command::GotoLine(usize::MAX), &mut dialogs);
        assert_eq!(
            notepad.document().caret_position(),
            CaretPosition { line: 4, column: 0 }
        );
    }

    #[test]
    fn test_find_walks_forward_without_wrapping() {
        let mut doc = Document::new();
        doc.edit_with(|b| b.push_str("alpha beta alpha"));
        doc.set_caret(0);
        let query = SearchQuery::new("alpha", true);

        assert_eq!(find_next(&mut doc, &query), FindOutcome::Found(0..5));
        assert_eq!(doc.caret(), 5);
        assert_eq!(doc.highlight(), Some(0..5));
        assert_eq!(find_next(&mut doc, &query), FindOutcome::Found(11..16));
        assert_eq!(find_next(&mut doc, &query), FindOutcome::NotFound);
        assert_eq!(doc.caret(), 16);
    }

    #[test]
    fn test_find_before_caret_is_not_found() {
        let mut doc = Document::new();
        doc.edit_with(|b| b.push_str("target and more text"));
        doc.set_caret(7);
        let outcome = find_next(&mut doc, &SearchQuery::new("target", false));
        assert_eq!(outcome, FindOutcome::NotFound);
        assert_eq!(doc.caret(), 7);
    }

    #[test]
    fn test_find_case_sensitivity() {
        let mut doc = Document::new();
        doc.edit_with(|b| b.push_str("well hello there"));

        doc.set_caret(0);
        assert_eq!(
            find_next(&mut doc, &SearchQuery::new("Hello", false)),
            FindOutcome::Found(5..10)
        );

        doc.set_caret(0);
        assert_eq!(
            find_next(&mut doc, &SearchQuery::new("Hello", true)),
            FindOutcome::NotFound
        );
    }

    #[test]
    fn test_empty_needle_is_no_op() {
        let mut doc = Document::new();
        doc.edit_with(|b| b.push_str("abc"));
        doc.set_caret(1);
        let empty = SearchQuery::new("", false);
        assert_eq!(find_next(&mut doc, &empty), FindOutcome::EmptyNeedle);
        assert_eq!(replace_one(&mut doc, &empty, "x"), FindOutcome::EmptyNeedle);
        assert_eq!(replace_all(&mut doc, &empty, "x"), 0);
        assert_eq!(doc.text(), "abc");
        assert_eq!(doc.caret(), 1);
    }

    #[test]
    fn test_replace_all_on_document_is_one_undo_step() {
        let mut doc = Document::new();
        doc.edit_with(|b| b.push_str("aaaa"));
        let count = replace_all(&mut doc, &SearchQuery::new("aa", true), "aaa");
        assert_eq!(count, 2);
        assert_eq!(doc.text(), "aaaaaa");

        assert!(doc.undo());
        assert_eq!(doc.text(), "aaaa");
    }

    #[test]
    fn test_replace_one_positions_caret_after_replacement() {
        let mut doc = Document::new();
        doc.edit_with(|b| b.push_str("The cat sat"));
        doc.set_caret(0);
        let outcome = replace_one(&mut doc, &SearchQuery::new("CAT", false), "dog");
        assert_eq!(outcome, FindOutcome::Found(4..7));
        assert_eq!(doc.text(), "The dog sat");
        assert_eq!(doc.caret(), 7);
        assert!(doc.is_dirty());
    }

    #[test]
    fn test_undo_after_save_marks_dirty_again() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("u.txt");
        let mut notepad = dirty_notepad("v1");
        let mut dialogs = ScriptedDialogs::default();
        notepad.save_as(Some(path), &mut dialogs);

        notepad.document_mut().edit_with(|b| b.push_str(" v2"));
        notepad.dispatch(Command::Undo, &mut dialogs);
        assert_eq!(notepad.document().text(), "v1");
        assert!(!notepad.document().is_dirty());

        notepad.dispatch(Command::Undo, &mut dialogs);
        assert_eq!(notepad.document().text(), "");
        assert!(notepad.document().is_dirty());

        notepad.dispatch(Command::Redo, &mut dialogs);
        assert!(!notepad.document().is_dirty());
    }
}
