use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use pc_core::history::import_sections;
use pc_core::ports::TextImportPort;
use pc_core::{ImportMode, ImportOutcome};
use tracing::{info, warn};

use crate::runtime::HistoryHandle;

use super::StageClipboard;

/// Import a text file into the history.
pub struct ImportHistory {
    source: Arc<dyn TextImportPort>,
    history: HistoryHandle,
    stage: StageClipboard,
}

impl ImportHistory {
    pub fn new(
        source: Arc<dyn TextImportPort>,
        history: HistoryHandle,
        stage: StageClipboard,
    ) -> Self {
        Self {
            source,
            history,
            stage,
        }
    }

    #[tracing::instrument(
        name = "usecase.import_history.execute",
        skip(self),
        fields(path = %path.display())
    )]
    pub async fn execute(&self, path: &Path, mode: ImportMode) -> Result<ImportOutcome> {
        let text = self
            .source
            .read_text(path)
            .await
            .with_context(|| format!("Failed to read import file {}", path.display()))?;

        if text.trim().is_empty() {
            bail!("Import file {} is empty", path.display());
        }

        let sections = import_sections(&text, mode);
        let result = self.history.import(sections).await?;

        if let Err(err) = self.stage.write_if_some(result.staged.as_ref()) {
            warn!(error = %err, "Failed to stage entry after import");
        }

        info!(
            imported = result.value.imported,
            trimmed = result.value.trimmed.dropped,
            "Imported text file"
        );
        Ok(result.value)
    }
}
