//! The main-window controller: owns the document and display settings and
//! handles every file/edit/view command.
//!
//! User interaction (pickers, the unsaved-changes prompt, notifications) goes
//! through [`Dialogs`], so the same flow runs against native dialogs in the
//! app and a scripted fake in tests.

use std::path::PathBuf;

use crate::document::Document;
use crate::file_io::TrailingNewline;
use crate::settings::{DisplaySettings, FontSelection};

pub const APP_NAME: &str = "Notepad";

/// Answer to "save changes before continuing?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    Save,
    Discard,
    Cancel,
}

/// Blocking user interaction needed by the controller.
pub trait Dialogs {
    fn pick_open_path(&mut self) -> Option<PathBuf>;

    fn pick_save_path(&mut self, suggested_name: &str) -> Option<PathBuf>;

    fn confirm_unsaved_changes(&mut self, document_name: &str) -> PromptChoice;

    fn show_error(&mut self, title: &str, message: &str);

    fn show_info(&mut self, title: &str, message: &str);
}

/// Document-level commands, whether they came from the menu or a shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    Open(Option<PathBuf>),
    Save,
    SaveAs(Option<PathBuf>),
    Exit,
    Undo,
    Redo,
    GotoLine(usize),
    ToggleWordWrap,
    SetFont(FontSelection),
}

/// What the window should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Default)]
pub struct Notepad {
    document: Document,
    settings: DisplaySettings,
    save_policy: TrailingNewline,
    font_families: Vec<String>,
}

impl Notepad {
    pub fn new(settings: DisplaySettings, save_policy: TrailingNewline) -> Self {
        Self {
            document: Document::new(),
            settings,
            save_policy,
            font_families: Vec::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    /// Families the view can render; `SetFont` only accepts these.
    pub fn set_font_families(&mut self, families: Vec<String>) {
        self.font_families = families;
    }

    pub fn font_families(&self) -> &[String] {
        &self.font_families
    }

    pub fn dispatch(&mut self, command: Command, dialogs: &mut dyn Dialogs) -> Flow {
        tracing::debug!(?command, "dispatch");
        match command {
            Command::New => {
                self.new_document(dialogs);
            }
            Command::Open(path) => {
                self.open(path, dialogs);
            }
            Command::Save => {
                self.save(dialogs);
            }
            Command::SaveAs(path) => {
                self.save_as(path, dialogs);
            }
            Command::Exit => return self.exit(dialogs),
            Command::Undo => {
                self.document.undo();
            }
            Command::Redo => {
                self.document.redo();
            }
            Command::GotoLine(line) => {
                self.goto_line(line);
            }
            Command::ToggleWordWrap => {
                self.toggle_word_wrap();
            }
            Command::SetFont(selection) => {
                self.set_font(&selection);
            }
        }
        Flow::Continue
    }

    /// Starts an empty untitled document. Returns false if the user cancelled.
    pub fn new_document(&mut self, dialogs: &mut dyn Dialogs) -> bool {
        if !self.maybe_save(dialogs) {
            return false;
        }
        self.document = Document::new();
        tracing::info!("new document");
        true
    }

    /// Replaces the document with the file at `path` (or one picked by the
    /// user). Returns true only if a file was loaded.
    pub fn open(&mut self, path: Option<PathBuf>, dialogs: &mut dyn Dialogs) -> bool {
        if !self.maybe_save(dialogs) {
            return false;
        }
        let Some(path) = path.or_else(|| dialogs.pick_open_path()) else {
            return false;
        };

        match Document::open(&path) {
            Ok(document) => {
                tracing::info!(path = %path.display(), bytes = document.text().len(), "opened");
                self.document = document;
                true
            }
            Err(e) => {
                tracing::warn!("{e}");
                dialogs.show_error("Open File", &e.to_string());
                false
            }
        }
    }

    /// Saves to the current path, or asks for one. Returns whether the file
    /// was written.
    pub fn save(&mut self, dialogs: &mut dyn Dialogs) -> bool {
        match self.document.path().map(|p| p.to_path_buf()) {
            Some(path) => self.write_to(path, dialogs),
            None => self.save_as(None, dialogs),
        }
    }

    pub fn save_as(&mut self, path: Option<PathBuf>, dialogs: &mut dyn Dialogs) -> bool {
        let suggested = self.suggested_file_name();
        let Some(path) = path.or_else(|| dialogs.pick_save_path(&suggested)) else {
            return false;
        };
        self.write_to(path, dialogs)
    }

    fn write_to(&mut self, path: PathBuf, dialogs: &mut dyn Dialogs) -> bool {
        match self.document.save_to(&path, self.save_policy) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "saved");
                true
            }
            Err(e) => {
                tracing::warn!("{e}");
                dialogs.show_error("Save File", &e.to_string());
                false
            }
        }
    }

    fn suggested_file_name(&self) -> String {
        match self.document.path() {
            Some(_) => self.document.display_name(),
            None => format!("{}.txt", self.document.display_name()),
        }
    }

    /// Returns `Flow::Exit` unless the user cancelled.
    pub fn exit(&mut self, dialogs: &mut dyn Dialogs) -> Flow {
        if self.maybe_save(dialogs) {
            tracing::info!("exit");
            Flow::Exit
        } else {
            Flow::Continue
        }
    }

    /// Unsaved-changes policy shared by New, Open and Exit. True means the
    /// triggering action may go ahead.
    fn maybe_save(&mut self, dialogs: &mut dyn Dialogs) -> bool {
        if !self.document.is_dirty() {
            return true;
        }
        match dialogs.confirm_unsaved_changes(&self.document.display_name()) {
            PromptChoice::Save => self.save(dialogs),
            PromptChoice::Discard => true,
            PromptChoice::Cancel => false,
        }
    }

    pub fn goto_line(&mut self, line: usize) -> usize {
        self.document.goto_line(line)
    }

    pub fn toggle_word_wrap(&mut self) -> bool {
        self.settings.word_wrap = !self.settings.word_wrap;
        self.settings.word_wrap
    }

    pub fn set_font(&mut self, selection: &FontSelection) -> bool {
        self.settings.apply_font(selection, &self.font_families)
    }

    /// `"name    Ln 3, Col 7    NOWRAP"`
    pub fn status_line(&self) -> String {
        let position = self.document.caret_position();
        let mode = if self.settings.word_wrap {
            "WRAP"
        } else {
            "NOWRAP"
        };
        format!(
            "{}    Ln {}, Col {}    {}",
            self.document.display_name(),
            position.line,
            position.display_column(),
            mode
        )
    }

    /// `"name* - Notepad"`, with the star only while dirty.
    pub fn title(&self) -> String {
        let marker = if self.document.is_dirty() { "*" } else { "" };
        format!("{}{} - {}", self.document.display_name(), marker, APP_NAME)
    }
}
