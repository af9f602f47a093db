use global_hotkey::{Error as GlobalHotkeyError, GlobalHotKeyManager};
use pc_core::ports::{HotkeyError, HotkeyPort};
use pc_core::HotkeyChord;
use tracing::debug;

use super::chord::parse_chord;

/// [`HotkeyPort`] over the OS hotkey manager. Stays on the thread that created it.
pub struct GlobalHotkeyRegistry {
    manager: GlobalHotKeyManager,
}

impl GlobalHotkeyRegistry {
    pub fn new() -> anyhow::Result<Self> {
        let manager = GlobalHotKeyManager::new()
            .map_err(|e| anyhow::anyhow!("Failed to create hotkey manager: {e}"))?;
        Ok(Self { manager })
    }
}

impl HotkeyPort for GlobalHotkeyRegistry {
    fn register(&self, chord: &HotkeyChord) -> Result<(), HotkeyError> {
        let hotkey = parse_chord(chord)?;
        let id = hotkey.id();
        self.manager.register(hotkey).map_err(|e| match e {
            GlobalHotkeyError::AlreadyRegistered(_) => HotkeyError::AlreadyRegistered {
                chord: chord.to_string(),
            },
            other => HotkeyError::RegisterFailed {
                chord: chord.to_string(),
                reason: other.to_string(),
            },
        })?;
        debug!(%chord, id, "Registered hotkey");
        Ok(())
    }

    fn unregister(&self, chord: &HotkeyChord) -> Result<(), HotkeyError> {
        let hotkey = parse_chord(chord)?;
        self.manager
            .unregister(hotkey)
            .map_err(|e| HotkeyError::UnregisterFailed {
                chord: chord.to_string(),
                reason: e.to_string(),
            })?;
        debug!(%chord, "Unregistered hotkey");
        Ok(())
    }
}
