use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Recoverable failures surfaced to the user.
///
/// Both kinds leave in-memory state untouched: a failed read never replaces
/// the current document and a failed write never clears the dirty flag.
#[derive(Debug, Error)]
pub enum NotepadError {
    #[error("Failed to open {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to save {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl NotepadError {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::FileRead { path, .. } | Self::FileWrite { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, NotepadError>;
