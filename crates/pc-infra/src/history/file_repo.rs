use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use pc_core::ports::HistoryRepositoryPort;
use pc_core::HistoryEntry;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use super::mapper::PersistedEntryRow;

/// History persisted as one pretty-printed JSON array, rewritten in full on every save.
pub struct JsonFileHistoryRepository {
    path: PathBuf,
}

impl JsonFileHistoryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create history dir failed: {}", dir.display()))?;
        }
        Ok(())
    }

    /// Write to a sibling temp file, then rename over the target.
    async fn atomic_write(&self, content: &str) -> Result<()> {
        self.ensure_parent_dir().await?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp history failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp history to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    /// Move an unparsable file aside so the next save does not overwrite it.
    async fn quarantine(&self) {
        let aside = self.path.with_extension("json.corrupt");
        match fs::rename(&self.path, &aside).await {
            Ok(()) => warn!(path = %aside.display(), "Moved unreadable history file aside"),
            Err(err) => warn!(error = %err, "Failed to move unreadable history file aside"),
        }
    }
}

#[async_trait]
impl HistoryRepositoryPort for JsonFileHistoryRepository {
    /// Missing file means empty history. Rows that cannot be read are skipped.
    async fn load(&self) -> Result<Vec<HistoryEntry>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No history file yet");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read history failed: {}", self.path.display()))
            }
        };

        let rows: Vec<serde_json::Value> = match serde_json::from_str(&content) {
            Ok(rows) => rows,
            Err(err) => {
                self.quarantine().await;
                return Err(err)
                    .with_context(|| format!("parse history failed: {}", self.path.display()));
            }
        };

        let loaded_at = Utc::now();
        let total = rows.len();
        let entries: Vec<HistoryEntry> = rows
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<PersistedEntryRow>(value) {
                Ok(row) => Some(row.into_entry(loaded_at)),
                Err(err) => {
                    warn!(error = %err, "Skipping unreadable history row");
                    None
                }
            })
            .collect();

        debug!(total, kept = entries.len(), "Loaded history file");
        Ok(entries)
    }

    async fn save(&self, entries: &[HistoryEntry]) -> Result<()> {
        let content =
            serde_json::to_string_pretty(entries).context("serialize history failed")?;

        self.atomic_write(&content).await
    }
}
