//! Polling capture of externally copied text.

use std::sync::Arc;
use std::time::Duration;

use pc_core::config::MonitorConfig;
use pc_core::ports::SystemClipboardPort;
use pc_core::HistoryError;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::runtime::{HistoryHandle, ObserveOutcome};

use super::StageClipboard;

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("failed to read clipboard: {0:#}")]
    ReadFailed(anyhow::Error),

    #[error(transparent)]
    History(#[from] HistoryError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorSettings {
    pub poll_interval: Duration,
    pub retry_interval: Duration,
    pub stage_on_capture: bool,
}

impl From<&MonitorConfig> for MonitorSettings {
    fn from(config: &MonitorConfig) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            retry_interval: config.retry_interval(),
            stage_on_capture: config.stage_on_capture,
        }
    }
}

/// Polls the OS clipboard and forwards changed text to the history runtime.
///
/// The runtime decides whether the text is new, a duplicate or our own
/// staged write; the monitor only suppresses reads identical to the
/// previous one.
pub struct ClipboardMonitor {
    clipboard: Arc<dyn SystemClipboardPort>,
    history: HistoryHandle,
    stage: StageClipboard,
    settings: MonitorSettings,
    last_seen: Option<String>,
}

impl ClipboardMonitor {
    pub fn new(
        clipboard: Arc<dyn SystemClipboardPort>,
        history: HistoryHandle,
        stage: StageClipboard,
        settings: MonitorSettings,
    ) -> Self {
        Self {
            clipboard,
            history,
            stage,
            settings,
            last_seen: None,
        }
    }

    /// Start from whatever is in the clipboard now, so it is not captured.
    pub fn prime(&mut self) {
        match self.clipboard.read_text() {
            Ok(text) => self.last_seen = Some(text),
            Err(err) => debug!(error = %err, "Could not prime clipboard monitor"),
        }
    }

    /// Poll until `cancel` fires or the history runtime goes away.
    pub async fn run(mut self, cancel: CancellationToken) {
        let span = info_span!(
            "usecase.clipboard_monitor.run",
            poll_ms = self.settings.poll_interval.as_millis() as u64
        );

        async {
            info!("Clipboard monitor started");
            let mut ticker = tokio::time::interval(self.settings.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                match self.poll_once().await {
                    Ok(_) => {}
                    Err(MonitorError::History(err)) => {
                        warn!(error = %err, "History runtime unavailable, stopping monitor");
                        break;
                    }
                    Err(err @ MonitorError::ReadFailed(_)) => {
                        warn!(error = %err, "Clipboard read failed, backing off");
                        tokio::select! {
                            _ = cancel.cancelled() => break,
                            _ = tokio::time::sleep(self.settings.retry_interval) => {}
                        }
                    }
                }
            }
            info!("Clipboard monitor stopped");
        }
        .instrument(span)
        .await
    }

    /// Read the clipboard once and hand any change to the runtime.
    ///
    /// Returns `Ok(None)` when the clipboard did not change since the last poll.
    pub async fn poll_once(&mut self) -> Result<Option<ObserveOutcome>, MonitorError> {
        let text = self.clipboard.read_text().map_err(MonitorError::ReadFailed)?;
        if text.is_empty() {
            // An emptied clipboard forgets the last read, so copying it again counts.
            self.last_seen = None;
            return Ok(None);
        }
        if self.last_seen.as_deref() == Some(text.as_str()) {
            return Ok(None);
        }
        self.last_seen = Some(text.clone());

        let outcome = self
            .history
            .observe(text, self.settings.stage_on_capture)
            .await?;

        if let ObserveOutcome::Inserted {
            staged: Some(staged),
            ..
        } = &outcome
        {
            match self.stage.write(staged) {
                Ok(()) => self.last_seen = Some(staged.entry.content.clone()),
                Err(err) => warn!(error = %err, "Failed to stage entry after capture"),
            }
        }

        Ok(Some(outcome))
    }
}
