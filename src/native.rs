use notepad_core::{Dialogs, PromptChoice};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::path::PathBuf;

/// Native pickers and message boxes. Every call blocks until answered.
#[derive(Debug, Default)]
pub struct NativeDialogs;

fn text_file_dialog() -> FileDialog {
    FileDialog::new()
        .add_filter("Text Documents", &["txt"])
        .add_filter("All Files", &["*"])
}

impl Dialogs for NativeDialogs {
    fn pick_open_path(&mut self) -> Option<PathBuf> {
        text_file_dialog().pick_file()
    }

    fn pick_save_path(&mut self, suggested_name: &str) -> Option<PathBuf> {
        let mut path = text_file_dialog().set_file_name(suggested_name).save_file()?;
        if path.extension().is_none() {
            path.set_extension("txt");
        }
        Some(path)
    }

    fn confirm_unsaved_changes(&mut self, document_name: &str) -> PromptChoice {
        let answer = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title("Save")
            .set_description(format!(
                "You have unsaved changes to {document_name}. Save before continuing?"
            ))
            .set_buttons(MessageButtons::YesNoCancel)
            .show();

        match answer {
            MessageDialogResult::Yes => PromptChoice::Save,
            MessageDialogResult::No => PromptChoice::Discard,
            _ => PromptChoice::Cancel,
        }
    }

    fn show_error(&mut self, title: &str, message: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn show_info(&mut self, title: &str, message: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}
