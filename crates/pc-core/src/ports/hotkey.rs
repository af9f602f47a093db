use thiserror::Error;

use crate::config::HotkeyChord;

/// Registration of global hotkeys.
///
/// Not `Send`: on some platforms the OS hotkey registry must be used from the
/// thread that created it, so implementations live on the hotkey listener
/// thread and are lent to the paste coordinator by reference.
pub trait HotkeyPort {
    fn register(&self, chord: &HotkeyChord) -> Result<(), HotkeyError>;

    fn unregister(&self, chord: &HotkeyChord) -> Result<(), HotkeyError>;
}

#[derive(Debug, Error)]
pub enum HotkeyError {
    #[error("invalid hotkey chord '{chord}': {reason}")]
    InvalidChord { chord: String, reason: String },

    #[error("hotkey '{chord}' is already registered")]
    AlreadyRegistered { chord: String },

    #[error("failed to register hotkey '{chord}': {reason}")]
    RegisterFailed { chord: String, reason: String },

    #[error("failed to unregister hotkey '{chord}': {reason}")]
    UnregisterFailed { chord: String, reason: String },
}
