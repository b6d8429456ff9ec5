use egui::{FontData, FontDefinitions, FontFamily};
use std::path::PathBuf;

pub const MONOSPACE: &str = "Monospace";
pub const PROPORTIONAL: &str = "Proportional";

/// Installs egui's bundled fonts plus `extra_files` into `ctx`, exposing each
/// font as its own family. Returns the selectable family names.
pub fn install(ctx: &egui::Context, extra_files: &[PathBuf]) -> Vec<String> {
    let mut definitions = FontDefinitions::default();
    for path in extra_files {
        add_font_file(&mut definitions, path);
    }
    let families = register_families(&mut definitions);
    ctx.set_fonts(definitions);
    families
}

fn add_font_file(definitions: &mut FontDefinitions, path: &PathBuf) {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("skipping font {}: {e}", path.display());
            return;
        }
    };
    if !looks_like_font(&bytes) {
        tracing::warn!("skipping font {}: not a TTF/OTF file", path.display());
        return;
    }

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    tracing::info!(family = %name, "registered font file");
    definitions
        .font_data
        .insert(name, FontData::from_owned(bytes));
}

/// sfnt magic numbers: TrueType, OpenType/CFF, legacy Apple, collections.
fn looks_like_font(bytes: &[u8]) -> bool {
    matches!(
        bytes.get(..4),
        Some([0x00, 0x01, 0x00, 0x00]) | Some(b"OTTO") | Some(b"true") | Some(b"ttcf")
    )
}

/// Adds a named family for every font in `definitions`, falling back to the
/// proportional chain for missing glyphs.
pub fn register_families(definitions: &mut FontDefinitions) -> Vec<String> {
    let fallbacks = definitions
        .families
        .get(&FontFamily::Proportional)
        .cloned()
        .unwrap_or_default();

    let mut names: Vec<String> = definitions.font_data.keys().cloned().collect();
    names.sort();
    for name in &names {
        let mut chain = vec![name.clone()];
        chain.extend(fallbacks.iter().filter(|f| *f != name).cloned());
        definitions
            .families
            .insert(FontFamily::Name(name.as_str().into()), chain);
    }

    let mut families = vec![MONOSPACE.to_owned(), PROPORTIONAL.to_owned()];
    families.extend(names);
    families
}

pub fn family_for(name: &str) -> FontFamily {
    match name {
        MONOSPACE => FontFamily::Monospace,
        PROPORTIONAL => FontFamily::Proportional,
        other => FontFamily::Name(other.into()),
    }
}
