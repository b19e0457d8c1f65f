//! System clipboard access for the copy action
//!
//! The session only ever writes: the engineered prompt goes out verbatim,
//! and a failed write becomes the transient "Failed!" label. The
//! [`Clipboard`] trait keeps the platform backend out of the session logic
//! and the tests. The real backend is `arboard`, opened once at startup and
//! held for the life of the app - on X11/Wayland the selection is served
//! from a thread the handle owns, so the handle must outlive every paste.

use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tracing::{debug, error};

/// Why a clipboard write could not be completed
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no system clipboard: {0}")]
    Unavailable(String),

    #[error("clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Write-only clipboard API used by the copy action
pub trait Clipboard {
    /// Write `text` to the clipboard or return a reason why it failed
    fn set_text(&mut self, text: String) -> Result<(), ClipboardError>;
}

/// Clipboard backed by `arboard`
pub struct SystemClipboard {
    /// Handle, if the platform clipboard could be opened
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        debug!("SystemClipboard::new: called");
        match arboard::Clipboard::new() {
            Ok(cb) => Self { inner: Some(cb) },
            Err(err) => {
                error!(error = %err, "failed to open system clipboard");
                Self { inner: None }
            }
        }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: String) -> Result<(), ClipboardError> {
        let Some(cb) = &mut self.inner else {
            return Err(ClipboardError::Unavailable(
                "could not open a system clipboard (headless session?)".to_string(),
            ));
        };
        cb.set_text(text).map_err(|e| ClipboardError::WriteFailed(e.to_string()))
    }
}

/// One clipboard shared between the runner and its blocking copy tasks
///
/// Cloning shares the same underlying handle. Every copy in a run goes
/// through the same platform clipboard, never a per-write temporary whose
/// drop would take the selection with it.
#[derive(Clone)]
pub struct SharedClipboard {
    inner: Arc<Mutex<Box<dyn Clipboard + Send>>>,
}

impl SharedClipboard {
    /// Wrap an existing clipboard backend
    pub fn new(clipboard: Box<dyn Clipboard + Send>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(clipboard)),
        }
    }

    /// Open the platform clipboard
    pub fn system() -> Self {
        Self::new(Box::new(SystemClipboard::new()))
    }

    /// Write `text` through the shared handle
    pub fn set_text(&self, text: String) -> Result<(), ClipboardError> {
        debug!(text_len = text.len(), "SharedClipboard::set_text: called");
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        guard.set_text(text)
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;

    /// Test clipboard that records writes and can be told to fail
    #[derive(Default)]
    pub struct MockClipboard {
        pub written: Arc<Mutex<Vec<String>>>,
        pub fail: bool,
    }

    impl Clipboard for MockClipboard {
        fn set_text(&mut self, text: String) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::WriteFailed("mock failure".to_string()));
            }
            self.written.lock().unwrap().push(text);
            Ok(())
        }
    }
}
