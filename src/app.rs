use crate::cli::StartupConfig;
use crate::dialogs::{
    FindDialog, FontDialog, FontDialogResponse, GotoLineDialog, GotoLineResponse, ReplaceDialog,
};
use crate::fonts;
use crate::native::NativeDialogs;
use eframe::egui;
use egui::text::{CCursor, CCursorRange, LayoutJob, TextFormat};
use notepad_core::line_index;
use notepad_core::{Command, Dialogs, Document, Flow, FontSelection, Notepad};
use std::ops::Range;

pub const ABOUT_TEXT: &str = "Simple Notepad in Rust\nBuilt with egui";

const EDITOR_ID: &str = "document_editor";

/// Everything a menu entry, shortcut or the window close button can ask for.
/// Collected while drawing and handled once the frame is laid out.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Core(Command),
    Cut,
    Copy,
    Paste,
    ShowFind,
    ShowReplace,
    ShowGotoLine,
    ShowFont,
    About,
}

/// Keyboard accelerators. Shifted combinations come first because
/// `consume_key` ignores extra modifiers it was not asked about.
pub fn shortcuts() -> Vec<(egui::Modifiers, egui::Key, Action)> {
    use egui::{Key, Modifiers};
    let shift = Modifiers::COMMAND | Modifiers::SHIFT;
    vec![
        (shift, Key::S, Action::Core(Command::SaveAs(None))),
        (shift, Key::Z, Action::Core(Command::Redo)),
        (Modifiers::COMMAND, Key::N, Action::Core(Command::New)),
        (Modifiers::COMMAND, Key::O, Action::Core(Command::Open(None))),
        (Modifiers::COMMAND, Key::S, Action::Core(Command::Save)),
        (Modifiers::COMMAND, Key::Z, Action::Core(Command::Undo)),
        (Modifiers::COMMAND, Key::Y, Action::Core(Command::Redo)),
        (Modifiers::COMMAND, Key::F, Action::ShowFind),
        (Modifiers::COMMAND, Key::H, Action::ShowReplace),
        (Modifiers::COMMAND, Key::G, Action::ShowGotoLine),
    ]
}

/// Lays out the editor text, marking `highlight` with a background and an
/// underline. Pass `f32::INFINITY` as `wrap_width` to disable wrapping.
pub fn layout_job(
    text: &str,
    font_id: egui::FontId,
    color: egui::Color32,
    highlight: Option<(Range<usize>, egui::Color32)>,
    wrap_width: f32,
) -> LayoutJob {
    let mut job = LayoutJob::default();
    job.wrap.max_width = wrap_width;
    let normal = TextFormat::simple(font_id, color);

    let highlight = highlight.filter(|(range, _)| {
        range.start < range.end
            && range.end <= text.len()
            && text.is_char_boundary(range.start)
            && text.is_char_boundary(range.end)
    });
    match highlight {
        Some((range, background)) => {
            let marked = TextFormat {
                background,
                underline: egui::Stroke::new(1.0, color),
                ..normal.clone()
            };
            for (part, format) in [
                (&text[..range.start], &normal),
                (&text[range.clone()], &marked),
                (&text[range.end..], &normal),
            ] {
                if !part.is_empty() {
                    job.append(part, 0.0, format.clone());
                }
            }
        }
        None => job.append(text, 0.0, normal),
    }
    job
}

/// The document state the status bar and the find highlight are drawn from.
/// The status bar is laid out before the editor and dialogs run, so a change
/// during the frame needs one more frame to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    anchor: usize,
    caret: usize,
    highlight: Option<Range<usize>>,
    len: usize,
    dirty: bool,
}

impl ViewSnapshot {
    pub fn capture(document: &Document) -> Self {
        Self {
            anchor: document.anchor(),
            caret: document.caret(),
            highlight: document.highlight(),
            len: document.text().len(),
            dirty: document.is_dirty(),
        }
    }
}

pub struct NotepadApp {
    notepad: Notepad,
    dialogs: NativeDialogs,
    clipboard: Option<arboard::Clipboard>,
    find: Option<FindDialog>,
    replace: Option<ReplaceDialog>,
    font: Option<FontDialog>,
    goto_line: Option<GotoLineDialog>,
    pending: Vec<Action>,
    allow_close: bool,
    last_title: String,
}

impl NotepadApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: StartupConfig) -> Self {
        let families = fonts::install(&cc.egui_ctx, &config.font_files);
        let mut app = Self::with_notepad(Notepad::new(Default::default(), config.save_policy));
        app.notepad.set_font_families(families);
        app.apply_startup(config);
        app
    }

    fn with_notepad(notepad: Notepad) -> Self {
        Self {
            notepad,
            dialogs: NativeDialogs,
            clipboard: None,
            find: None,
            replace: None,
            font: None,
            goto_line: None,
            pending: Vec::new(),
            allow_close: false,
            last_title: String::new(),
        }
    }

    fn apply_startup(&mut self, config: StartupConfig) {
        let display = config.display;
        // Family and size are applied separately so a bad family keeps the size.
        self.notepad.set_font(&FontSelection {
            family: Some(display.font_family),
            size: None,
        });
        self.notepad.set_font(&FontSelection {
            family: None,
            size: Some(display.font_size),
        });
        if display.word_wrap != self.notepad.settings().word_wrap {
            self.notepad.toggle_word_wrap();
        }

        if let Some(path) = config.file {
            tracing::info!("opening {} from the command line", path.display());
            if self.notepad.open(Some(path), &mut self.dialogs) {
                if let Some(line) = config.line {
                    self.notepad.goto_line(line);
                }
            }
        }
    }

    fn handle_close_request(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.viewport().close_requested()) && !self.allow_close {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.pending.push(Action::Core(Command::Exit));
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Runs before the editor so its built-in undo never sees Ctrl+Z.
        for (modifiers, key, action) in shortcuts() {
            if ctx.input_mut(|i| i.consume_key(modifiers, key)) {
                self.pending.push(action);
            }
        }
    }

    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        let document = self.notepad.document();
        let can_undo = document.can_undo();
        let can_redo = document.can_redo();
        let has_selection = document.selected_text().is_some();
        let mut word_wrap = self.notepad.settings().word_wrap;
        let pending = &mut self.pending;

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    menu_item(ui, pending, "New", "Ctrl+N", true, Action::Core(Command::New));
                    menu_item(
                        ui,
                        pending,
                        "Open...",
                        "Ctrl+O",
                        true,
                        Action::Core(Command::Open(None)),
                    );
                    menu_item(ui, pending, "Save", "Ctrl+S", true, Action::Core(Command::Save));
                    menu_item(
                        ui,
                        pending,
                        "Save As...",
                        "Ctrl+Shift+S",
                        true,
                        Action::Core(Command::SaveAs(None)),
                    );
                    ui.separator();
                    menu_item(ui, pending, "Exit", "Alt+F4", true, Action::Core(Command::Exit));
                });

                ui.menu_button("Edit", |ui| {
                    menu_item(ui, pending, "Undo", "Ctrl+Z", can_undo, Action::Core(Command::Undo));
                    menu_item(ui, pending, "Redo", "Ctrl+Y", can_redo, Action::Core(Command::Redo));
                    ui.separator();
                    menu_item(ui, pending, "Cut", "Ctrl+X", has_selection, Action::Cut);
                    menu_item(ui, pending, "Copy", "Ctrl+C", has_selection, Action::Copy);
                    menu_item(ui, pending, "Paste", "Ctrl+V", true, Action::Paste);
                    ui.separator();
                    menu_item(ui, pending, "Find...", "Ctrl+F", true, Action::ShowFind);
                    menu_item(ui, pending, "Replace...", "Ctrl+H", true, Action::ShowReplace);
                    menu_item(ui, pending, "Go To Line...", "Ctrl+G", true, Action::ShowGotoLine);
                });

                ui.menu_button("View", |ui| {
                    if ui.checkbox(&mut word_wrap, "Word Wrap").clicked() {
                        pending.push(Action::Core(Command::ToggleWordWrap));
                        ui.close_menu();
                    }
                    if ui.button("Font...").clicked() {
                        pending.push(Action::ShowFont);
                        ui.close_menu();
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        pending.push(Action::About);
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        let status = self.notepad.status_line();
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(status);
            });
        });
    }

    fn render_text_area(&mut self, ctx: &egui::Context) {
        let settings = self.notepad.settings().clone();
        let font_id = egui::FontId::new(
            settings.font_size as f32,
            fonts::family_for(&settings.font_family),
        );
        let editor_id = egui::Id::new(EDITOR_ID);
        let focus_on_jump = self.find.is_none() && self.replace.is_none();
        let document = self.notepad.document_mut();

        let jump = document.take_caret_jump();
        if jump {
            let text = document.text();
            let anchor = line_index::char_index(text, document.anchor());
            let caret = line_index::char_index(text, document.caret());
            let mut state = egui::TextEdit::load_state(ctx, editor_id).unwrap_or_default();
            state.cursor.set_char_range(Some(CCursorRange::two(
                CCursor::new(anchor),
                CCursor::new(caret),
            )));
            state.store(ctx, editor_id);
        }
        let highlight = document.highlight();

        egui::CentralPanel::default().show(ctx, |ui| {
            let scroll_area = if settings.word_wrap {
                egui::ScrollArea::vertical()
            } else {
                egui::ScrollArea::both()
            }
            .id_salt("editor_scroll")
            .auto_shrink([false, false]);

            scroll_area.show(ui, |ui| {
                let text_color = ui.visuals().text_color();
                let marked = highlight
                    .clone()
                    .map(|range| (range, ui.visuals().selection.bg_fill));
                let mut layouter = |ui: &egui::Ui, text: &str, wrap_width: f32| {
                    let width = if settings.word_wrap {
                        wrap_width
                    } else {
                        f32::INFINITY
                    };
                    let job = layout_job(text, font_id.clone(), text_color, marked.clone(), width);
                    ui.fonts(|f| f.layout_job(job))
                };
                let min_size = ui.available_size();

                let output = document.edit_with(|text| {
                    egui::TextEdit::multiline(text)
                        .id(editor_id)
                        .font(font_id.clone())
                        .frame(false)
                        .lock_focus(true)
                        .desired_width(f32::INFINITY)
                        .min_size(min_size)
                        .layouter(&mut layouter)
                        .show(ui)
                });

                if let Some(range) = output.cursor_range {
                    let text = document.text();
                    let anchor = line_index::byte_offset(text, range.secondary.ccursor.index);
                    let caret = line_index::byte_offset(text, range.primary.ccursor.index);
                    document.sync_selection(anchor, caret);
                }

                if jump {
                    let caret = line_index::char_index(document.text(), document.caret());
                    let cursor = output.galley.from_ccursor(CCursor::new(caret));
                    let rect = output
                        .galley
                        .pos_from_cursor(&cursor)
                        .translate(output.galley_pos.to_vec2());
                    ui.scroll_to_rect(rect, Some(egui::Align::Center));
                    if focus_on_jump {
                        output.response.request_focus();
                    }
                }
            });
        });
    }

    fn render_dialogs(&mut self, ctx: &egui::Context) {
        let Self {
            notepad,
            dialogs,
            find,
            replace,
            font,
            goto_line,
            pending,
            ..
        } = self;

        if let Some(dialog) = find.as_mut() {
            if !dialog.show(ctx, notepad.document_mut(), dialogs) {
                *find = None;
            }
        }

        if let Some(dialog) = replace.as_mut() {
            if !dialog.show(ctx, notepad.document_mut(), dialogs) {
                *replace = None;
            }
        }

        if let Some(dialog) = font.as_mut() {
            match dialog.show(ctx, notepad.font_families()) {
                FontDialogResponse::Open => {}
                FontDialogResponse::Apply(selection) => {
                    pending.push(Action::Core(Command::SetFont(selection)));
                    *font = None;
                }
                FontDialogResponse::Cancel => *font = None,
            }
        }

        if let Some(dialog) = goto_line.as_mut() {
            match dialog.show(ctx) {
                GotoLineResponse::Open => {}
                GotoLineResponse::Go(line) => {
                    pending.push(Action::Core(Command::GotoLine(line)));
                    *goto_line = None;
                }
                GotoLineResponse::Cancel => *goto_line = None,
            }
        }
    }

    fn process_actions(&mut self, ctx: &egui::Context) {
        let actions = std::mem::take(&mut self.pending);
        if actions.is_empty() {
            return;
        }

        for action in actions {
            tracing::debug!(?action, "handling action");
            match action {
                Action::Core(command) => {
                    if self.notepad.dispatch(command, &mut self.dialogs) == Flow::Exit {
                        self.allow_close = true;
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                }
                Action::Cut => self.cut(ctx),
                Action::Copy => self.copy(ctx),
                Action::Paste => self.paste(),
                Action::ShowFind => {
                    let seed = self.selection_seed();
                    self.find
                        .get_or_insert_with(|| FindDialog::new(seed.as_deref()))
                        .request_focus();
                }
                Action::ShowReplace => {
                    let seed = self.selection_seed();
                    self.replace
                        .get_or_insert_with(|| ReplaceDialog::new(seed.as_deref()))
                        .request_focus();
                }
                Action::ShowGotoLine => {
                    let line = self.notepad.document().caret_position().line;
                    self.goto_line
                        .get_or_insert_with(|| GotoLineDialog::new(line))
                        .request_focus();
                }
                Action::ShowFont => {
                    if self.font.is_none() {
                        self.font = Some(FontDialog::new(
                            self.notepad.settings(),
                            self.notepad.font_families(),
                        ));
                    }
                }
                Action::About => self.dialogs.show_info("About", ABOUT_TEXT),
            }
        }
        ctx.request_repaint();
    }

    /// Single-line selections prefill the search field.
    fn selection_seed(&self) -> Option<String> {
        self.notepad
            .document()
            .selected_text()
            .filter(|s| !s.contains('\n'))
            .map(str::to_owned)
    }

    fn clipboard(&mut self) -> Option<&mut arboard::Clipboard> {
        if self.clipboard.is_none() {
            match arboard::Clipboard::new() {
                Ok(clipboard) => self.clipboard = Some(clipboard),
                Err(e) => tracing::warn!("clipboard unavailable: {e}"),
            }
        }
        self.clipboard.as_mut()
    }

    fn put_on_clipboard(&mut self, ctx: &egui::Context, text: String) {
        let copied = match self.clipboard() {
            Some(clipboard) => match clipboard.set_text(text.clone()) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("clipboard write failed: {e}");
                    false
                }
            },
            None => false,
        };
        if !copied {
            ctx.copy_text(text);
        }
    }

    fn copy(&mut self, ctx: &egui::Context) {
        if let Some(text) = self.notepad.document().selected_text().map(str::to_owned) {
            self.put_on_clipboard(ctx, text);
        }
    }

    fn cut(&mut self, ctx: &egui::Context) {
        if let Some(text) = self.notepad.document_mut().delete_selection() {
            self.put_on_clipboard(ctx, text);
        }
    }

    fn paste(&mut self) {
        let text = match self.clipboard().map(|c| c.get_text()) {
            Some(Ok(text)) => text,
            Some(Err(e)) => {
                tracing::warn!("clipboard read failed: {e}");
                return;
            }
            None => return,
        };
        if !text.is_empty() {
            self.notepad.document_mut().insert_at_selection(&text);
        }
    }

    fn update_title(&mut self, ctx: &egui::Context) {
        let title = self.notepad.title();
        if title != self.last_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.last_title = title;
        }
    }
}

fn menu_item(
    ui: &mut egui::Ui,
    pending: &mut Vec<Action>,
    label: &str,
    shortcut: &str,
    enabled: bool,
    action: Action,
) {
    if ui
        .add_enabled(enabled, egui::Button::new(label).shortcut_text(shortcut))
        .clicked()
    {
        pending.push(action);
        ui.close_menu();
    }
}

impl eframe::App for NotepadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let before = ViewSnapshot::capture(self.notepad.document());
        self.handle_close_request(ctx);
        self.handle_shortcuts(ctx);

        self.render_menu_bar(ctx);
        self.render_status_bar(ctx);
        self.render_text_area(ctx);
        self.render_dialogs(ctx);

        self.process_actions(ctx);
        self.update_title(ctx);

        if ViewSnapshot::capture(self.notepad.document()) != before {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(job: &LayoutJob) -> Vec<(&str, bool)> {
        job.sections
            .iter()
            .map(|s| {
                (
                    &job.text[s.byte_range.clone()],
                    s.format.background != egui::Color32::TRANSPARENT,
                )
            })
            .collect()
    }

    #[test]
    fn test_layout_job_marks_highlight() {
        let job = layout_job(
            "hello world",
            egui::FontId::monospace(14.0),
            egui::Color32::BLACK,
            Some((6..11, egui::Color32::YELLOW)),
            f32::INFINITY,
        );
        assert_eq!(sections(&job), vec![("hello ", false), ("world", true)]);
        assert_eq!(job.wrap.max_width, f32::INFINITY);
    }

    #[test]
    fn test_layout_job_ignores_stale_highlight() {
        let job = layout_job(
            "héllo",
            egui::FontId::monospace(14.0),
            egui::Color32::BLACK,
            Some((2..4, egui::Color32::YELLOW)),
            300.0,
        );
        assert_eq!(sections(&job), vec![("héllo", false)]);
        assert_eq!(job.wrap.max_width, 300.0);

        let job = layout_job(
            "abc",
            egui::FontId::monospace(14.0),
            egui::Color32::BLACK,
            Some((1..10, egui::Color32::YELLOW)),
            300.0,
        );
        assert_eq!(sections(&job), vec![("abc", false)]);
    }

    #[test]
    fn test_view_snapshot_tracks_caret_and_highlight() {
        let mut document = Document::new();
        document.edit_with(|t| t.push_str("find the word"));
        document.sync_selection(0, 0);
        let before = ViewSnapshot::capture(&document);

        document.sync_selection(0, 0);
        assert_eq!(ViewSnapshot::capture(&document), before);

        document.select(9..13);
        let found = ViewSnapshot::capture(&document);
        assert_ne!(found, before);

        document.sync_selection(9, 13);
        assert_eq!(ViewSnapshot::capture(&document), found);

        document.edit_with(|t| t.push('!'));
        assert_ne!(ViewSnapshot::capture(&document), found);
    }

    #[test]
    fn test_shift_shortcuts_come_first() {
        let all = shortcuts();
        let first_plain = all
            .iter()
            .position(|(m, _, _)| !m.shift)
            .unwrap_or(all.len());
        assert!(all[..first_plain].iter().all(|(m, _, _)| m.shift));
        assert!(all[first_plain..].iter().all(|(m, _, _)| !m.shift));
        assert!(all
            .iter()
            .any(|(_, k, a)| *k == egui::Key::G && *a == Action::ShowGotoLine));
    }
}
