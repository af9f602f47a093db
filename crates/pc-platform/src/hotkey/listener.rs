use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use global_hotkey::{GlobalHotKeyEvent, HotKeyState};
use pc_core::config::HotkeyConfig;
use pc_core::ports::{HotkeyError, HotkeyPort};
use pc_core::HotkeyChord;
use tracing::{debug, info, warn};

use super::chord::parse_chord;
use super::registry::GlobalHotkeyRegistry;

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyAction {
    Paste,
    QuickPaste,
    ToggleVisibility,
}

/// Chords the listener registers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyBindings {
    pub paste: HotkeyChord,
    pub visibility: Option<HotkeyChord>,
    /// Only bound while quick paste mode is on.
    pub quick_paste: Option<HotkeyChord>,
}

impl HotkeyBindings {
    pub fn from_config(config: &HotkeyConfig) -> Self {
        let non_empty = |chord: &HotkeyChord| (!chord.is_empty()).then(|| chord.clone());
        Self {
            paste: config.paste.clone(),
            visibility: non_empty(&config.visibility),
            quick_paste: if config.quick_paste_enabled {
                non_empty(&config.quick_paste)
            } else {
                None
            },
        }
    }

    pub fn chords(&self) -> Vec<(HotkeyAction, &HotkeyChord)> {
        let mut chords = vec![(HotkeyAction::Paste, &self.paste)];
        if let Some(chord) = &self.visibility {
            chords.push((HotkeyAction::ToggleVisibility, chord));
        }
        if let Some(chord) = &self.quick_paste {
            chords.push((HotkeyAction::QuickPaste, chord));
        }
        chords
    }

    /// Map OS hotkey ids to actions. Fails on the first chord that does not parse.
    pub fn action_ids(&self) -> Result<HashMap<u32, HotkeyAction>, HotkeyError> {
        self.chords()
            .into_iter()
            .map(|(action, chord)| parse_chord(chord).map(|hotkey| (hotkey.id(), action)))
            .collect()
    }
}

/// Owns the OS hotkey registry on the current thread and dispatches presses.
pub struct HotkeyListener {
    bindings: HotkeyBindings,
    shutdown: Arc<AtomicBool>,
}

impl HotkeyListener {
    pub fn new(bindings: HotkeyBindings) -> Self {
        Self {
            bindings,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Setting the flag makes [`run`](Self::run) return within one poll interval.
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        self.shutdown.clone()
    }

    /// Register every chord and block, calling `on_action` for each key press.
    ///
    /// Failing to register the paste chord is an error; the other chords are
    /// optional and only logged.
    pub fn run<F>(self, mut on_action: F) -> anyhow::Result<()>
    where
        F: FnMut(HotkeyAction, &dyn HotkeyPort),
    {
        let registry = GlobalHotkeyRegistry::new()?;
        let actions = self.bindings.action_ids()?;

        for (action, chord) in self.bindings.chords() {
            match registry.register(chord) {
                Ok(()) => info!(?action, %chord, "Hotkey bound"),
                Err(err) if action == HotkeyAction::Paste => return Err(err.into()),
                Err(err) => warn!(?action, error = %err, "Failed to bind hotkey"),
            }
        }

        let receiver = GlobalHotKeyEvent::receiver();
        while !self.shutdown.load(Ordering::SeqCst) {
            pump_platform_events();

            match receiver.recv_timeout(EVENT_POLL_INTERVAL) {
                Ok(event) => {
                    if event.state != HotKeyState::Pressed {
                        continue;
                    }
                    match actions.get(&event.id) {
                        Some(action) => {
                            debug!(?action, id = event.id, "Hotkey pressed");
                            on_action(*action, &registry);
                        }
                        None => debug!(id = event.id, "Ignoring unknown hotkey id"),
                    }
                }
                Err(err) if err.is_disconnected() => break,
                Err(_) => {}
            }
        }

        for (_, chord) in self.bindings.chords() {
            if let Err(err) = registry.unregister(chord) {
                debug!(error = %err, "Hotkey already released");
            }
        }
        info!("Hotkey listener stopped");
        Ok(())
    }
}

/// Hotkey messages are delivered through the thread's message queue on Windows.
#[cfg(windows)]
fn pump_platform_events() {
    use winapi::um::winuser::{DispatchMessageW, PeekMessageW, TranslateMessage, MSG, PM_REMOVE};

    // SAFETY: MSG is plain data and is only touched by this thread.
    unsafe {
        let mut msg: MSG = std::mem::zeroed();
        while PeekMessageW(&mut msg, std::ptr::null_mut(), 0, 0, PM_REMOVE) != 0 {
            TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

#[cfg(not(windows))]
fn pump_platform_events() {}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_core::AppConfig;

    #[test]
    fn quick_paste_is_bound_only_when_enabled() {
        let mut config = AppConfig::default().hotkeys;
        let bindings = HotkeyBindings::from_config(&config);
        assert_eq!(bindings.quick_paste, None);
        assert_eq!(bindings.chords().len(), 2);

        config.quick_paste_enabled = true;
        let bindings = HotkeyBindings::from_config(&config);
        assert_eq!(bindings.quick_paste, Some(HotkeyChord::new("f8")));
        assert_eq!(bindings.chords().len(), 3);
    }

    #[test]
    fn empty_visibility_chord_is_not_bound() {
        let mut config = AppConfig::default().hotkeys;
        config.visibility = HotkeyChord::new("");
        assert_eq!(HotkeyBindings::from_config(&config).visibility, None);
    }

    #[test]
    fn action_ids_resolve_each_chord() {
        let mut config = AppConfig::default().hotkeys;
        config.quick_paste_enabled = true;
        let bindings = HotkeyBindings::from_config(&config);

        let ids = bindings.action_ids().unwrap();
        let paste_id = parse_chord(&bindings.paste).unwrap().id();

        assert_eq!(ids.len(), 3);
        assert_eq!(ids.get(&paste_id), Some(&HotkeyAction::Paste));
    }

    #[test]
    fn bad_chord_is_reported() {
        let mut config = AppConfig::default().hotkeys;
        config.paste = HotkeyChord::new("ctrl+???");
        assert!(HotkeyBindings::from_config(&config).action_ids().is_err());
    }
}
