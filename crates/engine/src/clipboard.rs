//! Host clipboard service.
//!
//! The engine only ever exchanges plain text with the host. Failures are
//! reported to the caller, which logs and carries on: the in-memory copy
//! state stays authoritative for internal pastes.

use crate::error::ClipboardError;

pub trait ClipboardService {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
    fn read_text(&mut self) -> Result<String, ClipboardError>;
}

/// Process-local clipboard. Used headless and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self { contents: Some(text.into()) }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardService for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }

    fn read_text(&mut self) -> Result<String, ClipboardError> {
        self.contents.clone().ok_or(ClipboardError::Empty)
    }
}

/// A clipboard that is never there (no display server, sandboxed session).
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableClipboard;

impl ClipboardService for UnavailableClipboard {
    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable("no host clipboard".to_string()))
    }

    fn read_text(&mut self) -> Result<String, ClipboardError> {
        Err(ClipboardError::Unavailable("no host clipboard".to_string()))
    }
}

/// System clipboard via arboard.
///
/// `arboard::Clipboard` is opened per call rather than held: it isn't `Send`
/// on every platform and opening it is cheap.
#[cfg(feature = "system-clipboard")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

#[cfg(feature = "system-clipboard")]
impl ClipboardService for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clip = open_clipboard()?;
        clip.set_text(text.to_string())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }

    fn read_text(&mut self) -> Result<String, ClipboardError> {
        let mut clip = open_clipboard()?;
        clip.get_text().map_err(|e| match e {
            arboard::Error::ContentNotAvailable => ClipboardError::Empty,
            other => ClipboardError::Read(other.to_string()),
        })
    }
}

#[cfg(feature = "system-clipboard")]
fn open_clipboard() -> Result<arboard::Clipboard, ClipboardError> {
    arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard() {
        let mut clip = MemoryClipboard::new();
        assert_eq!(clip.read_text(), Err(ClipboardError::Empty));
        clip.write_text("a\tb").unwrap();
        assert_eq!(clip.contents(), Some("a\tb"));
        assert_eq!(clip.read_text().unwrap(), "a\tb");
    }

    #[test]
    fn test_unavailable_clipboard() {
        let mut clip = UnavailableClipboard;
        assert!(matches!(clip.write_text("x"), Err(ClipboardError::Unavailable(_))));
        assert!(clip.read_text().is_err());
    }
}
