use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use pc_core::ports::{ClockPort, PastedExportPort};
use tracing::{debug, info};

use crate::runtime::HistoryHandle;

/// Write pasted, not yet exported entries to a text file and mark them exported.
pub struct ExportPastedHistory {
    history: HistoryHandle,
    exporter: Arc<dyn PastedExportPort>,
    clock: Arc<dyn ClockPort>,
}

impl ExportPastedHistory {
    pub fn new(
        history: HistoryHandle,
        exporter: Arc<dyn PastedExportPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            history,
            exporter,
            clock,
        }
    }

    /// Returns the written file, or `None` when nothing was pending.
    #[tracing::instrument(name = "usecase.export_pasted.execute", skip(self))]
    pub async fn execute(&self) -> Result<Option<PathBuf>> {
        let pending = self.history.pending_export().await?;
        if pending.is_empty() {
            debug!("No pasted entries pending export");
            return Ok(None);
        }

        let path = self
            .exporter
            .export(&pending, self.clock.now())
            .await
            .context("Failed to export pasted history")?;

        let hashes = pending.into_iter().map(|e| e.content_hash).collect();
        let marked = self.history.mark_exported(hashes, path.clone()).await?;

        info!(count = marked, path = %path.display(), "Exported pasted history");
        Ok(Some(path))
    }
}
