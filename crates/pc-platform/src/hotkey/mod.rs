//! Global hotkeys.
//!
//! The OS hotkey manager is not thread-safe on every platform, so it lives
//! on one listener thread for its whole life. Actions are handed to a
//! callback together with the registry, which the callback may use to
//! temporarily release a chord.

mod chord;
mod listener;
mod registry;

pub use chord::parse_chord;
pub use listener::{HotkeyAction, HotkeyBindings, HotkeyListener};
pub use registry::GlobalHotkeyRegistry;
