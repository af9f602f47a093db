//! Clipboard history domain models.
mod entry;
mod error;
mod hash;
mod import;
mod store;

pub use entry::{preview_of, Classification, HistoryEntry, PREVIEW_CHARS};
pub use error::HistoryError;
pub use hash::ContentHash;
pub use import::{import_sections, ImportMode};
pub use store::{AppendOutcome, ClearScope, HistoryStore, ImportOutcome, TrimReport};
