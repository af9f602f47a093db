//! Sequential paste dispatch.
//!
//! Runs on the thread that received the paste hotkey. The coordinator lets
//! the real paste go through (the hotkey is swallowed by the OS while it is
//! registered, so it is briefly unregistered and the keystroke re-injected),
//! then asks the history runtime what was pasted and stages the next entry.

use std::sync::Arc;
use std::time::Duration;

use pc_core::config::DispatchConfig;
use pc_core::ports::{HotkeyPort, PasteKeystrokePort, SystemClipboardPort};
use pc_core::{HotkeyChord, PasteStateMachine};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::runtime::HistoryHandle;

use super::StageClipboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasteTiming {
    /// Pause after injecting the keystroke, before the hotkey is registered again.
    pub keystroke_pause: Duration,
    /// Delay before matching the pasted text and staging the next entry.
    pub settle_delay: Duration,
}

impl From<&DispatchConfig> for PasteTiming {
    fn from(config: &DispatchConfig) -> Self {
        Self {
            keystroke_pause: config.keystroke_pause(),
            settle_delay: config.settle_delay(),
        }
    }
}

#[derive(Debug)]
pub enum TriggerOutcome {
    /// The paste went through; match-and-advance runs on the returned task.
    Dispatched(JoinHandle<()>),
    /// Another dispatch was in flight.
    Dropped,
    /// The clipboard was empty or unreadable; nothing was injected.
    Aborted,
}

impl TriggerOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, TriggerOutcome::Dispatched(_))
    }
}

pub struct PasteCoordinator {
    clipboard: Arc<dyn SystemClipboardPort>,
    keystroke: Arc<dyn PasteKeystrokePort>,
    history: HistoryHandle,
    stage: StageClipboard,
    state: PasteStateMachine,
    paste_chord: HotkeyChord,
    timing: PasteTiming,
    runtime: Handle,
}

impl PasteCoordinator {
    pub fn new(
        clipboard: Arc<dyn SystemClipboardPort>,
        keystroke: Arc<dyn PasteKeystrokePort>,
        history: HistoryHandle,
        paste_chord: HotkeyChord,
        timing: PasteTiming,
        runtime: Handle,
    ) -> Self {
        Self {
            stage: StageClipboard::new(clipboard.clone()),
            clipboard,
            keystroke,
            history,
            state: PasteStateMachine::new(),
            paste_chord,
            timing,
            runtime,
        }
    }

    pub fn paste_chord(&self) -> &HotkeyChord {
        &self.paste_chord
    }

    pub fn is_dispatching(&self) -> bool {
        self.state.is_dispatching()
    }

    /// Handle one paste trigger. Blocks for the keystroke pause.
    ///
    /// A trigger arriving while a dispatch is in flight is dropped, not queued.
    #[tracing::instrument(name = "usecase.paste_coordinator.trigger", skip_all)]
    pub fn trigger(&self, hotkeys: &dyn HotkeyPort) -> TriggerOutcome {
        let Some(guard) = self.state.try_begin() else {
            debug!("Paste trigger dropped, dispatch already in flight");
            return TriggerOutcome::Dropped;
        };

        let before = match self.clipboard.read_text() {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => {
                debug!("Clipboard empty, nothing to paste");
                return TriggerOutcome::Aborted;
            }
            Err(err) => {
                warn!(error = %err, "Failed to read clipboard before paste");
                return TriggerOutcome::Aborted;
            }
        };

        if let Err(err) = hotkeys.unregister(&self.paste_chord) {
            warn!(error = %err, "Failed to release paste hotkey before injecting");
        }

        if let Err(err) = self.keystroke.inject_paste() {
            error!(error = %err, "Failed to inject paste keystroke");
        }
        if !self.timing.keystroke_pause.is_zero() {
            std::thread::sleep(self.timing.keystroke_pause);
        }

        if let Err(err) = hotkeys.register(&self.paste_chord) {
            error!(error = %err, chord = %self.paste_chord, "Failed to re-register paste hotkey");
        }

        let elapsed_ms = guard.started_at().map(|t| t.elapsed().as_millis() as u64);
        drop(guard);
        debug!(?elapsed_ms, "Paste keystroke dispatched");

        TriggerOutcome::Dispatched(self.schedule_advance(before))
    }

    fn schedule_advance(&self, pasted: String) -> JoinHandle<()> {
        let history = self.history.clone();
        let stage = self.stage.clone();
        let settle_delay = self.timing.settle_delay;

        self.runtime.spawn(async move {
            if !settle_delay.is_zero() {
                tokio::time::sleep(settle_delay).await;
            }

            match history.match_and_advance(pasted).await {
                Ok(Some(staged)) => {
                    if let Err(err) = stage.write(&staged) {
                        warn!(error = %err, "Failed to stage next entry after paste");
                    } else if staged.cycle_completed {
                        info!("Every history entry has been dispatched, cycle restarted");
                    }
                }
                Ok(None) => debug!("History empty, nothing to stage"),
                Err(err) => warn!(error = %err, "History runtime unavailable after paste"),
            }
        })
    }
}
