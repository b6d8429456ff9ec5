use crate::fonts;
use eframe::egui;
use notepad_core::{DisplaySettings, FontSelection, FONT_SIZES};

const PREVIEW_TEXT: &str = "AaBbYyZz 0123";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontDialogResponse {
    Open,
    Apply(FontSelection),
    Cancel,
}

/// Family and size chooser. Nothing is applied until OK.
#[derive(Debug, Default)]
pub struct FontDialog {
    family: Option<String>,
    size: Option<u32>,
}

impl FontDialog {
    /// Preselects the current font when it appears in the offered lists.
    pub fn new(current: &DisplaySettings, families: &[String]) -> Self {
        Self {
            family: families
                .iter()
                .find(|f| **f == current.font_family)
                .cloned(),
            size: FONT_SIZES
                .contains(&current.font_size)
                .then_some(current.font_size),
        }
    }

    pub fn select_family(&mut self, family: &str) {
        self.family = Some(family.to_owned());
    }

    pub fn select_size(&mut self, size: u32) {
        self.size = Some(size);
    }

    pub fn selection(&self) -> FontSelection {
        FontSelection {
            family: self.family.clone(),
            size: self.size,
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, families: &[String]) -> FontDialogResponse {
        let mut open = true;
        let mut response = FontDialogResponse::Open;

        egui::Window::new("Font")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.horizontal_top(|ui| {
                    ui.vertical(|ui| {
                        ui.label("Family:");
                        egui::ScrollArea::vertical()
                            .id_salt("font_families")
                            .max_height(180.0)
                            .show(ui, |ui| {
                                for family in families {
                                    let selected = self.family.as_deref() == Some(family.as_str());
                                    if ui.selectable_label(selected, family).clicked() {
                                        self.family = Some(family.clone());
                                    }
                                }
                            });
                    });

                    ui.separator();

                    ui.vertical(|ui| {
                        ui.label("Size:");
                        egui::ScrollArea::vertical()
                            .id_salt("font_sizes")
                            .max_height(180.0)
                            .show(ui, |ui| {
                                for size in FONT_SIZES {
                                    let selected = self.size == Some(size);
                                    if ui.selectable_label(selected, size.to_string()).clicked() {
                                        self.size = Some(size);
                                    }
                                }
                            });
                    });
                });

                ui.separator();
                if let (Some(family), Some(size)) = (&self.family, self.size) {
                    let font = egui::FontId::new(size as f32, fonts::family_for(family));
                    ui.label(egui::RichText::new(PREVIEW_TEXT).font(font));
                }

                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        response = FontDialogResponse::Apply(self.selection());
                    }
                    if ui.button("Cancel").clicked() {
                        response = FontDialogResponse::Cancel;
                    }
                });
            });

        if !open {
            return FontDialogResponse::Cancel;
        }
        response
    }
}
