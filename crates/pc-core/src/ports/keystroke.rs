use anyhow::Result;

/// Synthesises the platform paste shortcut into the foreground application.
pub trait PasteKeystrokePort: Send + Sync {
    fn inject_paste(&self) -> Result<()>;
}
