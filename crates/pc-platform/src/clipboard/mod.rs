use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use clipboard_rs::{Clipboard, ClipboardContext, ContentFormat};
use pc_core::ports::SystemClipboardPort;

/// Plain-text access to the OS clipboard.
pub struct SystemClipboard {
    inner: Arc<Mutex<ClipboardContext>>,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let context =
            ClipboardContext::new().map_err(|e| anyhow!("ClipboardContext::new failed: {e}"))?;
        Ok(Self {
            inner: Arc::new(Mutex::new(context)),
        })
    }
}

impl SystemClipboardPort for SystemClipboard {
    /// Non-text content reads as the empty string.
    fn read_text(&self) -> Result<String> {
        let ctx = self
            .inner
            .lock()
            .map_err(|_| anyhow!("clipboard lock poisoned"))?;
        if !ctx.has(ContentFormat::Text) {
            return Ok(String::new());
        }
        ctx.get_text()
            .map_err(|e| anyhow!("failed to read clipboard text: {e}"))
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let ctx = self
            .inner
            .lock()
            .map_err(|_| anyhow!("clipboard lock poisoned"))?;
        ctx.set_text(text.to_string())
            .map_err(|e| anyhow!("failed to write clipboard text: {e}"))
    }
}
