use eframe::egui;
use notepad_core::search::{self, FindOutcome, SearchQuery};
use notepad_core::{BufferHandle, Dialogs};
use std::ops::Range;

/// Modeless "Find" window. Its search state lives and dies with the window.
#[derive(Debug, Default)]
pub struct FindDialog {
    needle: String,
    case_sensitive: bool,
    last_match: Option<Range<usize>>,
    focus_input: bool,
}

impl FindDialog {
    pub fn new(needle: Option<&str>) -> Self {
        Self {
            needle: needle.unwrap_or_default().to_owned(),
            focus_input: true,
            ..Self::default()
        }
    }

    pub fn request_focus(&mut self) {
        self.focus_input = true;
    }

    pub fn set_needle(&mut self, needle: &str) {
        needle.clone_into(&mut self.needle);
    }

    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.case_sensitive = case_sensitive;
    }

    pub fn last_match(&self) -> Option<Range<usize>> {
        self.last_match.clone()
    }

    /// Draws the window; returns false once it has been closed.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        buffer: &mut dyn BufferHandle,
        notices: &mut dyn Dialogs,
    ) -> bool {
        let mut open = true;
        let mut cancelled = false;
        let mut submitted = false;

        egui::Window::new("Find")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                egui::Grid::new("find_grid").num_columns(2).show(ui, |ui| {
                    ui.label("Find:");
                    let response =
                        ui.add(egui::TextEdit::singleline(&mut self.needle).desired_width(240.0));
                    if self.focus_input {
                        response.request_focus();
                        self.focus_input = false;
                    }
                    submitted =
                        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    ui.end_row();

                    ui.label("");
                    ui.checkbox(&mut self.case_sensitive, "Match case");
                    ui.end_row();
                });

                ui.horizontal(|ui| {
                    if ui.button("Find Next").clicked() {
                        submitted = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });
            });

        if submitted {
            self.find_next(buffer, notices);
            self.focus_input = true;
        }
        open && !cancelled
    }

    pub fn find_next(&mut self, buffer: &mut dyn BufferHandle, notices: &mut dyn Dialogs) {
        let query = SearchQuery::new(self.needle.as_str(), self.case_sensitive);
        match search::find_next(buffer, &query) {
            FindOutcome::Found(range) => self.last_match = Some(range),
            FindOutcome::NotFound => {
                self.last_match = None;
                notices.show_info("Find", "No more matches found");
            }
            FindOutcome::EmptyNeedle => {}
        }
    }
}
