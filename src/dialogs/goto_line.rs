use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GotoLineResponse {
    Open,
    Go(usize),
    Cancel,
}

#[derive(Debug, Default)]
pub struct GotoLineDialog {
    input: String,
    invalid: bool,
    focus_input: bool,
}

/// Parses a line number typed by the user.
///
/// Negative numbers parse as 0 and oversized ones as `usize::MAX`; the
/// document clamps both into range.
pub fn parse_line_number(input: &str) -> Option<usize> {
    let input = input.trim();
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if negative {
        return Some(0);
    }
    Some(digits.parse().unwrap_or(usize::MAX))
}

impl GotoLineDialog {
    pub fn new(current_line: usize) -> Self {
        Self {
            input: current_line.to_string(),
            invalid: false,
            focus_input: true,
        }
    }

    pub fn request_focus(&mut self) {
        self.focus_input = true;
    }

    pub fn show(&mut self, ctx: &egui::Context) -> GotoLineResponse {
        let mut open = true;
        let mut response = GotoLineResponse::Open;
        let mut submitted = false;

        egui::Window::new("Go To Line")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Line number:");
                    let edit = ui.add(
                        egui::TextEdit::singleline(&mut self.input).desired_width(100.0),
                    );
                    if self.focus_input {
                        edit.request_focus();
                        self.focus_input = false;
                    }
                    if edit.changed() {
                        self.invalid = false;
                    }
                    submitted =
                        edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                });

                if self.invalid {
                    ui.colored_label(ui.visuals().error_fg_color, "Enter a whole number");
                }

                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        submitted = true;
                    }
                    if ui.button("Cancel").clicked() {
                        response = GotoLineResponse::Cancel;
                    }
                });
            });

        if !open {
            return GotoLineResponse::Cancel;
        }
        if submitted {
            match parse_line_number(&self.input) {
                Some(line) => return GotoLineResponse::Go(line),
                None => {
                    self.invalid = true;
                    self.focus_input = true;
                }
            }
        }
        response
    }
}
