use anyhow::{Context, Result};
use async_trait::async_trait;
use pc_core::ports::TextImportPort;
use std::path::Path;
use tokio::fs;
use tracing::warn;

/// Reads import files from disk, replacing invalid UTF-8 sequences.
pub struct FileTextSource;

#[async_trait]
impl TextImportPort for FileTextSource {
    async fn read_text(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)
            .await
            .with_context(|| format!("read import file failed: {}", path.display()))?;

        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(err) => {
                warn!(path = %path.display(), "Import file is not valid UTF-8, decoding lossily");
                Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn reads_utf8_and_repairs_invalid_bytes() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.txt");
        let bad = dir.path().join("bad.txt");
        std::fs::write(&good, "héllo").unwrap();
        std::fs::write(&bad, [b'o', b'k', 0xff, b'!']).unwrap();

        assert_eq!(FileTextSource.read_text(&good).await.unwrap(), "héllo");
        assert_eq!(FileTextSource.read_text(&bad).await.unwrap(), "ok\u{FFFD}!");
        assert!(FileTextSource.read_text(&dir.path().join("missing.txt")).await.is_err());
    }
}
