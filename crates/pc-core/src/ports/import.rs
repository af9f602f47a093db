use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

/// Source of text files imported into the history.
#[async_trait]
pub trait TextImportPort: Send + Sync {
    /// Read the whole file as text. Bytes that are not valid UTF-8 are replaced, not rejected.
    async fn read_text(&self, path: &Path) -> Result<String>;
}
