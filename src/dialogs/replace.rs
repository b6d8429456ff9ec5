use eframe::egui;
use notepad_core::replace;
use notepad_core::search::{FindOutcome, SearchQuery};
use notepad_core::{BufferHandle, Dialogs};
use std::ops::Range;

#[derive(Debug, Default)]
pub struct ReplaceDialog {
    needle: String,
    replacement: String,
    case_sensitive: bool,
    last_match: Option<Range<usize>>,
    focus_input: bool,
}

enum Clicked {
    Replace,
    ReplaceAll,
}

impl ReplaceDialog {
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

    pub fn set_fields(&mut self, needle: &str, replacement: &str, case_sensitive: bool) {
        needle.clone_into(&mut self.needle);
        replacement.clone_into(&mut self.replacement);
        self.case_sensitive = case_sensitive;
    }

    /// Span of the most recently inserted replacement.
    pub fn last_match(&self) -> Option<Range<usize>> {
        self.last_match.clone()
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        buffer: &mut dyn BufferHandle,
        notices: &mut dyn Dialogs,
    ) -> bool {
        let mut open = true;
        let mut cancelled = false;
        let mut clicked = None;

        egui::Window::new("Replace")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                egui::Grid::new("replace_grid")
                    .num_columns(2)
                    .show(ui, |ui| {
                        ui.label("Find:");
                        let response = ui
                            .add(egui::TextEdit::singleline(&mut self.needle).desired_width(240.0));
                        if self.focus_input {
                            response.request_focus();
                            self.focus_input = false;
                        }
                        ui.end_row();

                        ui.label("Replace:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.replacement).desired_width(240.0),
                        );
                        ui.end_row();

                        ui.label("");
                        ui.checkbox(&mut self.case_sensitive, "Match case");
                        ui.end_row();
                    });

                ui.horizontal(|ui| {
                    if ui.button("Replace").clicked() {
                        clicked = Some(Clicked::Replace);
                    }
                    if ui.button("Replace All").clicked() {
                        clicked = Some(Clicked::ReplaceAll);
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });
            });

        match clicked {
            Some(Clicked::Replace) => self.replace_one(buffer, notices),
            Some(Clicked::ReplaceAll) => {
                self.replace_all(buffer, notices);
            }
            None => {}
        }
        open && !cancelled
    }

    fn query(&self) -> SearchQuery {
        SearchQuery::new(self.needle.as_str(), self.case_sensitive)
    }

    pub fn replace_one(&mut self, buffer: &mut dyn BufferHandle, notices: &mut dyn Dialogs) {
        match replace::replace_one(buffer, &self.query(), &self.replacement) {
            FindOutcome::Found(inserted) => self.last_match = Some(inserted),
            FindOutcome::NotFound => {
                self.last_match = None;
                notices.show_info("Replace", "No matches found");
            }
            FindOutcome::EmptyNeedle => {}
        }
    }

    /// Returns the number of replacements, which is also reported to the user.
    pub fn replace_all(
        &mut self,
        buffer: &mut dyn BufferHandle,
        notices: &mut dyn Dialogs,
    ) -> usize {
        if self.needle.is_empty() {
            return 0;
        }
        let count = replace::replace_all(buffer, &self.query(), &self.replacement);
        self.last_match = None;
        notices.show_info("Replace All", &format!("Replaced {count} occurrence(s)"));
        count
    }
}
