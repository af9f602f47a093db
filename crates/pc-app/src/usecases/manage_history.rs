use std::collections::HashSet;

use anyhow::Result;
use pc_core::{ContentHash, Staged, TrimReport};
use tracing::{info, warn};

use crate::runtime::{HistoryHandle, HistorySnapshot, Restaged};

use super::StageClipboard;

/// Host-facing edits of the history.
///
/// Every edit that restages an entry also writes it into the OS clipboard.
/// A failed clipboard write is logged; the edit itself stands.
pub struct ManageHistory {
    history: HistoryHandle,
    stage: StageClipboard,
}

impl ManageHistory {
    pub fn new(history: HistoryHandle, stage: StageClipboard) -> Self {
        Self { history, stage }
    }

    #[tracing::instrument(name = "usecase.manage_history.delete", skip(self, hashes), fields(count = hashes.len()))]
    pub async fn delete(&self, hashes: HashSet<ContentHash>) -> Result<usize> {
        let result = self.history.delete(hashes).await?;
        info!(removed = result.value, "Deleted history entries");
        Ok(self.restaged(result))
    }

    #[tracing::instrument(name = "usecase.manage_history.move_up", skip(self))]
    pub async fn move_up(&self, index: usize) -> Result<bool> {
        let result = self.history.move_up(index).await?;
        Ok(self.restaged(result))
    }

    #[tracing::instrument(name = "usecase.manage_history.move_down", skip(self))]
    pub async fn move_down(&self, index: usize) -> Result<bool> {
        let result = self.history.move_down(index).await?;
        Ok(self.restaged(result))
    }

    #[tracing::instrument(name = "usecase.manage_history.mark_unpasted", skip(self))]
    pub async fn mark_unpasted(&self, index: usize) -> Result<bool> {
        let result = self.history.mark_unpasted(index).await?;
        Ok(self.restaged(result))
    }

    /// Stage the entry at `index`; the next paste advances from there.
    #[tracing::instrument(name = "usecase.manage_history.select_for_paste", skip(self))]
    pub async fn select_for_paste(&self, index: usize) -> Result<Staged> {
        let staged = self.history.select_for_paste(index).await?;
        self.stage.write(&staged)?;
        info!(index, preview = %staged.entry.preview(), "Entry selected for paste");
        Ok(staged)
    }

    /// Start the cycle over from the oldest entry.
    #[tracing::instrument(name = "usecase.manage_history.rewind", skip(self))]
    pub async fn rewind(&self) -> Result<Option<Staged>> {
        let staged = self.history.rewind().await?;
        self.stage.write_if_some(staged.as_ref())?;
        Ok(staged)
    }

    #[tracing::instrument(name = "usecase.manage_history.set_capacity", skip(self))]
    pub async fn set_capacity(&self, capacity: usize) -> Result<TrimReport> {
        let trimmed = self.history.set_capacity(capacity).await?;
        Ok(trimmed)
    }

    pub async fn snapshot(&self) -> Result<HistorySnapshot> {
        Ok(self.history.snapshot().await?)
    }

    fn restaged<T>(&self, result: Restaged<T>) -> T {
        if let Err(err) = self.stage.write_if_some(result.staged.as_ref()) {
            warn!(error = %err, "Failed to stage entry after history edit");
        }
        result.value
    }
}
