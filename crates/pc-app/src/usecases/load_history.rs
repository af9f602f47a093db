use std::sync::Arc;

use anyhow::{Context, Result};
use pc_core::ports::HistoryRepositoryPort;
use pc_core::TrimReport;
use tracing::{debug, info, warn};

use crate::runtime::{HistoryHandle, Restaged};

use super::StageClipboard;

/// Load persisted history into the runtime and stage the first entry.
///
/// An unreadable history file is logged and treated as an empty history.
pub struct LoadHistory {
    repository: Arc<dyn HistoryRepositoryPort>,
    history: HistoryHandle,
    stage: StageClipboard,
}

impl LoadHistory {
    pub fn new(
        repository: Arc<dyn HistoryRepositoryPort>,
        history: HistoryHandle,
        stage: StageClipboard,
    ) -> Self {
        Self {
            repository,
            history,
            stage,
        }
    }

    #[tracing::instrument(name = "usecase.load_history.execute", skip(self))]
    pub async fn execute(&self) -> Result<Restaged<TrimReport>> {
        let restored = self.restore().await?;

        if let Err(err) = self.stage.write_if_some(restored.staged.as_ref()) {
            warn!(error = %err, "Failed to stage entry after loading history");
        }

        info!(
            trimmed = restored.value.dropped,
            staged = ?restored.staged.as_ref().map(|s| s.index),
            "History loaded"
        );
        Ok(restored)
    }

    /// Load into the runtime without touching the OS clipboard.
    #[tracing::instrument(name = "usecase.load_history.restore_only", skip(self))]
    pub async fn restore_only(&self) -> Result<TrimReport> {
        let restored = self.restore().await?;
        debug!(trimmed = restored.value.dropped, "History restored without staging");
        Ok(restored.value)
    }

    async fn restore(&self) -> Result<Restaged<TrimReport>> {
        let entries = match self.repository.load().await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(error = %err, "Failed to load history, starting empty");
                Vec::new()
            }
        };

        self.history
            .restore(entries)
            .await
            .context("History runtime unavailable")
    }
}
