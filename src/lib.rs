pub mod app;
pub mod cli;
pub mod dialogs;
pub mod fonts;
pub mod logging;
pub mod native;

// Re-export commonly used types
pub use app::{Action, NotepadApp};
pub use cli::{CliArgs, StartupConfig};
pub use native::NativeDialogs;
