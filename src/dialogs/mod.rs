//! Auxiliary windows. At most one of each kind is open at a time.

pub mod find;
pub mod font;
pub mod goto_line;
pub mod replace;

pub use find::FindDialog;
pub use font::{FontDialog, FontDialogResponse};
pub use goto_line::{GotoLineDialog, GotoLineResponse};
pub use replace::ReplaceDialog;
