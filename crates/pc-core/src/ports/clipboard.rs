//! Clipboard port - abstracts OS clipboard text access

use anyhow::Result;

/// Platform-agnostic access to the text content of the OS clipboard.
///
/// Calls may block briefly (another process can hold the clipboard open), so
/// they must never be made while holding history state.
pub trait SystemClipboardPort: Send + Sync {
    /// Read the current clipboard text.
    ///
    /// An empty clipboard or one without a text representation reads as `""`.
    /// Errors are transient conditions such as the clipboard being locked.
    fn read_text(&self) -> Result<String>;

    /// Replace the clipboard content with `text`.
    fn write_text(&self, text: &str) -> Result<()>;
}
