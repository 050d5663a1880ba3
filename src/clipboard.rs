//! Clipboard capability
//!
//! The engine only needs `write`; hosts provide a platform
//! implementation. A failed primary write falls back to a secondary
//! path (the host's select-and-copy equivalent) before giving up.

use crate::{Error, Result};
use tracing::warn;

/// Write-only clipboard capability.
pub trait Clipboard {
    fn write(&mut self, text: &str) -> Result<()>;
}

/// Which path a copy ultimately took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Primary,
    Fallback,
}

/// Try the primary clipboard, then the fallback.
pub fn copy_with_fallback(
    primary: &mut dyn Clipboard,
    fallback: &mut dyn Clipboard,
    text: &str,
) -> Result<CopyOutcome> {
    match primary.write(text) {
        Ok(()) => Ok(CopyOutcome::Primary),
        Err(primary_err) => {
            warn!(error = %primary_err, "primary clipboard write failed, trying fallback");
            fallback
                .write(text)
                .map(|()| CopyOutcome::Fallback)
                .map_err(|fallback_err| {
                    Error::Clipboard(format!(
                        "both clipboard paths failed: {primary_err}; {fallback_err}"
                    ))
                })
        }
    }
}

/// In-memory clipboard for tests and the CLI demo.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Always-failing clipboard, for exercising the fallback path.
#[derive(Debug, Default)]
pub struct FailingClipboard;

impl Clipboard for FailingClipboard {
    fn write(&mut self, _text: &str) -> Result<()> {
        Err(Error::Clipboard("clipboard write denied".to_string()))
    }
}
