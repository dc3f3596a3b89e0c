pub mod clipboard;
pub mod commands;
pub mod editor;
pub mod error;
pub mod grid;
pub mod paste;
pub mod selection;
pub mod tsv;

pub use clipboard::{ClipboardService, MemoryClipboard, UnavailableClipboard};
#[cfg(feature = "system-clipboard")]
pub use clipboard::SystemClipboard;
pub use commands::Command;
pub use editor::{CellMarks, ClipMark, Editor};
pub use error::{ClipboardError, GridError};
pub use grid::{Draft, Grid, Matrix};
pub use selection::{Focus, ScheduledRefocus, Selection};
