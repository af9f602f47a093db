use anyhow::Result;
use async_trait::async_trait;

use crate::history::HistoryEntry;

/// Durable storage for the full, ordered history.
///
/// `save` always receives the complete history; there is no incremental diff.
#[async_trait]
pub trait HistoryRepositoryPort: Send + Sync {
    /// Load the persisted history in stored order. A missing store loads as empty.
    async fn load(&self) -> Result<Vec<HistoryEntry>>;

    async fn save(&self, entries: &[HistoryEntry]) -> Result<()>;
}
