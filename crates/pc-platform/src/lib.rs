//! # pc-platform
//!
//! Operating system adapters for PasteCycle: the system clipboard, global
//! hotkeys, paste keystroke injection and application directories.

pub mod app_dirs;
pub mod clipboard;
pub mod hotkey;
pub mod keystroke;

pub use app_dirs::DirsAppDirsAdapter;
pub use clipboard::SystemClipboard;
pub use hotkey::{GlobalHotkeyRegistry, HotkeyAction, HotkeyBindings, HotkeyListener};
pub use keystroke::EnigoPasteKeystroke;
