pub mod buffer;
pub mod controller;
pub mod document;
pub mod error;
pub mod file_io;
pub mod history;
pub mod line_index;
pub mod replace;
pub mod search;
pub mod settings;

// Re-export commonly used types
pub use buffer::BufferHandle;
pub use controller::{Command, Dialogs, Flow, Notepad, PromptChoice};
pub use document::Document;
pub use error::{NotepadError, Result};
pub use file_io::TrailingNewline;
pub use line_index::CaretPosition;
pub use search::{FindOutcome, SearchQuery};
pub use settings::{DisplaySettings, FontSelection, FONT_SIZES};
