//! Command-line arguments. Nothing is read from config files; every setting
//! not given here starts at its default.

use clap::{ArgAction, Parser};
use notepad_core::settings::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE};
use notepad_core::{DisplaySettings, TrailingNewline};
use std::path::PathBuf;

/// A small plain-text notepad
#[derive(Parser, Debug)]
#[command(name = "notepad", version, about = "A small plain-text notepad")]
pub struct CliArgs {
    /// File to open
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Put the caret on line N after opening
    #[arg(long, value_name = "N")]
    pub line: Option<usize>,

    /// Start with word wrap enabled
    #[arg(long)]
    pub wrap: bool,

    /// Initial font family
    #[arg(long, value_name = "NAME", default_value = DEFAULT_FONT_FAMILY)]
    pub font_family: String,

    /// Initial font size in points
    #[arg(long, value_name = "N", default_value_t = DEFAULT_FONT_SIZE,
          value_parser = clap::value_parser!(u32).range(1..=400))]
    pub font_size: u32,

    /// Extra TTF/OTF font file to offer as a family (repeatable)
    #[arg(long = "font-file", value_name = "FILE")]
    pub font_files: Vec<PathBuf>,

    /// Drop one trailing newline when saving
    #[arg(long)]
    pub trim_trailing_newline: bool,

    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Everything the window needs at startup.
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub file: Option<PathBuf>,
    pub line: Option<usize>,
    pub display: DisplaySettings,
    pub font_files: Vec<PathBuf>,
    pub save_policy: TrailingNewline,
}

impl CliArgs {
    pub fn into_config(self) -> StartupConfig {
        StartupConfig {
            file: self.path,
            line: self.line,
            display: DisplaySettings {
                font_family: self.font_family,
                font_size: self.font_size,
                word_wrap: self.wrap,
            },
            font_files: self.font_files,
            save_policy: if self.trim_trailing_newline {
                TrailingNewline::TrimOne
            } else {
                TrailingNewline::Preserve
            },
        }
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
