//! Port interfaces for the application layer
//!
//! Ports define the contract between the dispatch engine (use cases) and the
//! operating system or storage implementations. The engine only ever talks
//! to these traits, so every OS primitive can be replaced by a test double.

pub mod app_dirs;
mod clipboard;
mod clock;
mod export;
mod history_repository;
pub mod hotkey;
mod import;
mod keystroke;

pub use app_dirs::{AppDirsError, AppDirsPort};
pub use clipboard::SystemClipboardPort;
pub use clock::ClockPort;
pub use export::PastedExportPort;
pub use history_repository::HistoryRepositoryPort;
pub use hotkey::{HotkeyError, HotkeyPort};
pub use import::TextImportPort;
pub use keystroke::PasteKeystrokePort;
