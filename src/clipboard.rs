use arboard::Clipboard;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard not available on this system")]
    Unavailable,

    #[error("Clipboard backend error: {0}")]
    Backend(#[from] arboard::Error),
}

/// Clipboard wrapper used for copying bookmark URLs.
///
/// Initialization is best-effort: on headless systems the clipboard stays
/// unavailable and copy requests fail with a status message instead of
/// taking the whole app down.
pub struct ClipboardManager {
    clipboard: Option<Clipboard>,
}

impl ClipboardManager {
    pub fn new() -> Self {
        let clipboard = match Clipboard::new() {
            Ok(cb) => Some(cb),
            Err(e) => {
                tracing::warn!("Failed to initialize clipboard: {} - copy will be unavailable", e);
                None
            }
        };
        Self { clipboard }
    }

    /// Copy text to the system clipboard
    pub fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = self.clipboard.as_mut().ok_or(ClipboardError::Unavailable)?;
        clipboard.set_text(text)?;
        tracing::debug!("Copied {} characters to clipboard", text.len());
        Ok(())
    }

    pub fn is_available(&self) -> bool {
        self.clipboard.is_some()
    }
}

impl Default for ClipboardManager {
    fn default() -> Self {
        Self::new()
    }
}
