use std::collections::HashSet;
use std::path::PathBuf;

use pc_core::{
    ClearScope, ContentHash, HistoryEntry, HistoryError, HistoryEvent, ImportOutcome, Staged,
    TrimReport,
};
use tokio::sync::oneshot;

use super::command::{HistoryCommand, ObserveOutcome, Restaged};
use super::snapshot::HistorySnapshot;
use super::{HistoryCommandSender, HistoryEventReceiver, HistoryEventSender};

/// Cloneable client of the [`HistoryRuntime`](super::HistoryRuntime).
///
/// Every method is one round trip through the command channel; once the
/// runtime is gone they fail with [`HistoryError::RuntimeClosed`].
#[derive(Clone)]
pub struct HistoryHandle {
    command_tx: HistoryCommandSender,
    event_tx: HistoryEventSender,
}

impl HistoryHandle {
    pub(crate) fn new(command_tx: HistoryCommandSender, event_tx: HistoryEventSender) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    pub fn subscribe(&self) -> HistoryEventReceiver {
        self.event_tx.subscribe()
    }

    /// Publish an event that does not come from a history mutation.
    pub fn publish(&self, event: HistoryEvent) {
        let _ = self.event_tx.send(event);
    }

    pub fn is_closed(&self) -> bool {
        self.command_tx.is_closed()
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> HistoryCommand,
    ) -> Result<T, HistoryError> {
        let (reply, rx) = oneshot::channel();
        self.command_tx
            .send(build(reply))
            .await
            .map_err(|_| HistoryError::RuntimeClosed)?;
        rx.await.map_err(|_| HistoryError::RuntimeClosed)
    }

    pub async fn restore(
        &self,
        entries: Vec<HistoryEntry>,
    ) -> Result<Restaged<TrimReport>, HistoryError> {
        self.request(|reply| HistoryCommand::Restore { entries, reply })
            .await
    }

    pub async fn observe(
        &self,
        content: String,
        stage_on_capture: bool,
    ) -> Result<ObserveOutcome, HistoryError> {
        self.request(|reply| HistoryCommand::Observe {
            content,
            stage_on_capture,
            reply,
        })
        .await
    }

    pub async fn match_and_advance(&self, pasted: String) -> Result<Option<Staged>, HistoryError> {
        self.request(|reply| HistoryCommand::MatchAndAdvance { pasted, reply })
            .await
    }

    pub async fn delete(
        &self,
        hashes: HashSet<ContentHash>,
    ) -> Result<Restaged<usize>, HistoryError> {
        self.request(|reply| HistoryCommand::Delete { hashes, reply })
            .await
    }

    pub async fn move_up(&self, index: usize) -> Result<Restaged<bool>, HistoryError> {
        self.request(|reply| HistoryCommand::MoveUp { index, reply })
            .await?
    }

    pub async fn move_down(&self, index: usize) -> Result<Restaged<bool>, HistoryError> {
        self.request(|reply| HistoryCommand::MoveDown { index, reply })
            .await?
    }

    pub async fn mark_unpasted(&self, index: usize) -> Result<Restaged<bool>, HistoryError> {
        self.request(|reply| HistoryCommand::MarkUnpasted { index, reply })
            .await?
    }

    pub async fn select_for_paste(&self, index: usize) -> Result<Staged, HistoryError> {
        self.request(|reply| HistoryCommand::SelectForPaste { index, reply })
            .await?
    }

    pub async fn rewind(&self) -> Result<Option<Staged>, HistoryError> {
        self.request(|reply| HistoryCommand::Rewind { reply }).await
    }

    pub async fn clear(&self, scope: ClearScope) -> Result<usize, HistoryError> {
        self.request(|reply| HistoryCommand::Clear { scope, reply })
            .await
    }

    pub async fn import(
        &self,
        contents: Vec<String>,
    ) -> Result<Restaged<ImportOutcome>, HistoryError> {
        self.request(|reply| HistoryCommand::Import { contents, reply })
            .await
    }

    pub async fn set_capacity(&self, capacity: usize) -> Result<TrimReport, HistoryError> {
        self.request(|reply| HistoryCommand::SetCapacity { capacity, reply })
            .await
    }

    pub async fn pending_export(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        self.request(|reply| HistoryCommand::PendingExport { reply })
            .await
    }

    pub async fn mark_exported(
        &self,
        hashes: Vec<ContentHash>,
        path: PathBuf,
    ) -> Result<usize, HistoryError> {
        self.request(|reply| HistoryCommand::MarkExported {
            hashes,
            path,
            reply,
        })
        .await
    }

    pub async fn snapshot(&self) -> Result<HistorySnapshot, HistoryError> {
        self.request(|reply| HistoryCommand::Snapshot { reply })
            .await
    }

    pub async fn shutdown(&self) -> Result<(), HistoryError> {
        self.command_tx
            .send(HistoryCommand::Shutdown)
            .await
            .map_err(|_| HistoryError::RuntimeClosed)
    }
}
