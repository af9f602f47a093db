use std::sync::Arc;

use anyhow::{Context, Result};
use pc_core::ports::SystemClipboardPort;
use pc_core::ClearScope;
use tracing::info;

use crate::runtime::HistoryHandle;

/// Remove all entries (or only the pasted ones) and empty the OS clipboard.
pub struct ClearHistory {
    history: HistoryHandle,
    clipboard: Arc<dyn SystemClipboardPort>,
}

impl ClearHistory {
    pub fn new(history: HistoryHandle, clipboard: Arc<dyn SystemClipboardPort>) -> Self {
        Self { history, clipboard }
    }

    #[tracing::instrument(name = "usecase.clear_history.execute", skip(self))]
    pub async fn execute(&self, scope: ClearScope) -> Result<usize> {
        let removed = self.history.clear(scope).await?;
        self.clipboard
            .write_text("")
            .context("Failed to clear system clipboard")?;
        info!(removed, "Cleared history");
        Ok(removed)
    }
}
