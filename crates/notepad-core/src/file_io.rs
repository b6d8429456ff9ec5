use encoding_rs::UTF_8;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{NotepadError, Result};

/// How a buffer's final line break is written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingNewline {
    /// Write the buffer exactly as it is.
    #[default]
    Preserve,
    /// Drop exactly one trailing `\n` (or `\r\n`) if present.
    TrimOne,
}

impl TrailingNewline {
    pub fn apply<'a>(&self, text: &'a str) -> &'a str {
        match self {
            Self::Preserve => text,
            Self::TrimOne => text
                .strip_suffix("\r\n")
                .or_else(|| text.strip_suffix('\n'))
                .unwrap_or(text),
        }
    }
}

/// Reads a whole file as UTF-8 text.
///
/// Malformed UTF-8 is rejected rather than replaced, so the caller never
/// silently rewrites bytes it could not decode.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| NotepadError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    match UTF_8.decode_without_bom_handling_and_without_replacement(&bytes) {
        Some(text) => Ok(text.into_owned()),
        None => Err(NotepadError::FileRead {
            path: path.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::InvalidData,
                "file is not valid UTF-8 text",
            ),
        }),
    }
}

pub fn write_text(path: &Path, text: &str, policy: TrailingNewline) -> Result<()> {
    let write = || -> io::Result<()> {
        let mut out = BufWriter::new(fs::File::create(path)?);
        out.write_all(policy.apply(text).as_bytes())?;
        out.flush()?;
        Ok(())
    };

    write().map_err(|source| NotepadError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}
