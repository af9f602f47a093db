use anyhow::{anyhow, Result};
use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use pc_core::ports::PasteKeystrokePort;
use tracing::debug;

#[cfg(target_os = "macos")]
const PASTE_MODIFIER: Key = Key::Meta;
#[cfg(not(target_os = "macos"))]
const PASTE_MODIFIER: Key = Key::Control;

/// Sends the platform paste shortcut to the focused window.
///
/// A fresh `Enigo` is created per keystroke, so the adapter can be shared
/// between threads.
#[derive(Debug, Default)]
pub struct EnigoPasteKeystroke;

impl EnigoPasteKeystroke {
    pub fn new() -> Self {
        Self
    }
}

impl PasteKeystrokePort for EnigoPasteKeystroke {
    fn inject_paste(&self) -> Result<()> {
        let mut enigo = Enigo::new(&Settings::default())
            .map_err(|e| anyhow!("failed to connect input simulator: {e}"))?;

        enigo
            .key(PASTE_MODIFIER, Direction::Press)
            .map_err(|e| anyhow!("failed to press paste modifier: {e}"))?;
        let clicked = enigo
            .key(Key::Unicode('v'), Direction::Click)
            .map_err(|e| anyhow!("failed to press V: {e}"));
        // Release the modifier even when the click failed.
        enigo
            .key(PASTE_MODIFIER, Direction::Release)
            .map_err(|e| anyhow!("failed to release paste modifier: {e}"))?;
        clicked?;

        debug!("Paste keystroke injected");
        Ok(())
    }
}
