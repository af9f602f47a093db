use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::history::HistoryEntry;

/// Sink for consumed entries that have not been exported yet.
#[async_trait]
pub trait PastedExportPort: Send + Sync {
    /// Write `entries` and return the location they were written to.
    async fn export(&self, entries: &[HistoryEntry], now: DateTime<Utc>) -> Result<PathBuf>;
}
