use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use pc_core::ports::PastedExportPort;
use pc_core::HistoryEntry;
use std::path::PathBuf;
use tokio::fs;

/// Exports pasted entries to `<root>/<YYYYMMDD>/pasted_history_<HHMMSS>.txt`, local time.
pub struct DatedTextExporter {
    root: PathBuf,
}

impl DatedTextExporter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// First free file name for this second; a suffix is added on collision.
    fn target_path(&self, now: DateTime<Local>) -> PathBuf {
        let dir = self.root.join(now.format("%Y%m%d").to_string());
        let stem = format!("pasted_history_{}", now.format("%H%M%S"));

        let mut candidate = dir.join(format!("{stem}.txt"));
        let mut n = 1;
        while candidate.exists() {
            candidate = dir.join(format!("{stem}_{n}.txt"));
            n += 1;
        }
        candidate
    }
}

/// Each entry keeps only its non-blank lines; entries are separated by one blank line.
pub(crate) fn render(entries: &[HistoryEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            entry
                .content
                .trim()
                .lines()
                .filter(|line| !line.trim().is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[async_trait]
impl PastedExportPort for DatedTextExporter {
    async fn export(&self, entries: &[HistoryEntry], now: DateTime<Utc>) -> Result<PathBuf> {
        let path = self.target_path(now.with_timezone(&Local));
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create export dir failed: {}", dir.display()))?;
        }

        fs::write(&path, render(entries))
            .await
            .with_context(|| format!("write export failed: {}", path.display()))?;

        Ok(path)
    }
}
