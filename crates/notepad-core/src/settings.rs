/// Point sizes offered by the font chooser.
pub const FONT_SIZES: [u32; 12] = [8, 9, 10, 11, 12, 14, 16, 18, 20, 24, 28, 32];

pub const DEFAULT_FONT_FAMILY: &str = "Monospace";
pub const DEFAULT_FONT_SIZE: u32 = 14;

/// Process-wide view preferences. Reset on every start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySettings {
    pub font_family: String,
    pub font_size: u32,
    pub word_wrap: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            font_size: DEFAULT_FONT_SIZE,
            word_wrap: false,
        }
    }
}

/// A confirmed font chooser selection; either half may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontSelection {
    pub family: Option<String>,
    pub size: Option<u32>,
}

impl DisplaySettings {
    /// Applies `selection` if every part of it is usable.
    ///
    /// An unknown family or a zero size leaves the current font untouched.
    /// Returns whether anything changed.
    pub fn apply_font(&mut self, selection: &FontSelection, families: &[String]) -> bool {
        if let Some(family) = &selection.family {
            if !families.iter().any(|f| f == family) {
                tracing::warn!("font family {family:?} is not available; keeping current font");
                return false;
            }
        }
        if selection.size == Some(0) {
            tracing::warn!("ignoring zero font size");
            return false;
        }

        let before = self.clone();
        if let Some(family) = &selection.family {
            self.font_family.clone_from(family);
        }
        if let Some(size) = selection.size {
            self.font_size = size;
        }
        *self != before
    }
}
