use std::sync::Arc;

use anyhow::{Context, Result};
use pc_core::ports::SystemClipboardPort;
use pc_core::Staged;
use tracing::debug;

/// Writes entries chosen by the history runtime into the OS clipboard.
///
/// The runtime has already recorded the content as its own write, so the
/// monitor will not capture it back.
#[derive(Clone)]
pub struct StageClipboard {
    clipboard: Arc<dyn SystemClipboardPort>,
}

impl StageClipboard {
    pub fn new(clipboard: Arc<dyn SystemClipboardPort>) -> Self {
        Self { clipboard }
    }

    pub fn write(&self, staged: &Staged) -> Result<()> {
        self.clipboard
            .write_text(&staged.entry.content)
            .with_context(|| format!("Failed to stage history entry {}", staged.index))?;
        debug!(
            index = staged.index,
            cycle_completed = staged.cycle_completed,
            "Staged history entry into clipboard"
        );
        Ok(())
    }

    pub fn write_if_some(&self, staged: Option<&Staged>) -> Result<()> {
        match staged {
            Some(staged) => self.write(staged),
            None => Ok(()),
        }
    }
}
