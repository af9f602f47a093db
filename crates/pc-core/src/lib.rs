//! # pc-core
//!
//! Core domain models and dispatch logic for PasteCycle.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! the clipboard history store, the cycling dispatch cursor, the paste state
//! machine and the ports implemented by the outer layers.

pub mod app_dirs;
pub mod config;
pub mod dispatch;
pub mod events;
pub mod history;
pub mod ports;

// Re-export commonly used types at the crate root
pub use config::{AppConfig, HotkeyChord};
pub use dispatch::{next_to_stage, DispatchCursor, DispatchGuard, PasteState, PasteStateMachine, Staged};
pub use events::HistoryEvent;
pub use history::{
    AppendOutcome, Classification, ClearScope, ContentHash, HistoryEntry, HistoryError,
    HistoryStore, ImportMode, ImportOutcome, TrimReport,
};
