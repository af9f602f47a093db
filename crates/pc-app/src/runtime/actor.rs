use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use pc_core::ports::{ClockPort, HistoryRepositoryPort};
use pc_core::{
    ClearScope, ContentHash, DispatchCursor, HistoryEntry, HistoryError, HistoryEvent,
    HistoryStore, ImportOutcome, Staged, TrimReport,
};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::command::{HistoryCommand, ObserveOutcome, Restaged};
use super::handle::HistoryHandle;
use super::snapshot::HistorySnapshot;
use super::{
    HistoryCommandReceiver, HistoryEventSender, COMMAND_CHANNEL_CAPACITY,
    EVENT_CHANNEL_CAPACITY,
};

/// Single owner of the history store, the dispatch cursor and the last
/// text staged into the OS clipboard.
pub struct HistoryRuntime {
    store: HistoryStore,
    cursor: DispatchCursor,
    /// Content most recently handed out for writing into the OS clipboard.
    last_known_write: Option<String>,
    repository: Arc<dyn HistoryRepositoryPort>,
    clock: Arc<dyn ClockPort>,
    command_rx: HistoryCommandReceiver,
    event_tx: HistoryEventSender,
}

impl HistoryRuntime {
    pub fn new(
        capacity: usize,
        repository: Arc<dyn HistoryRepositoryPort>,
        clock: Arc<dyn ClockPort>,
    ) -> (Self, HistoryHandle) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let handle = HistoryHandle::new(command_tx, event_tx.clone());

        let runtime = Self {
            store: HistoryStore::new(capacity),
            cursor: DispatchCursor::new(),
            last_known_write: None,
            repository,
            clock,
            command_rx,
            event_tx,
        };

        (runtime, handle)
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Process commands until `Shutdown` arrives or every handle is dropped.
    pub async fn run(mut self) {
        info!(capacity = self.store.capacity(), "History runtime started");
        while let Some(command) = self.command_rx.recv().await {
            if matches!(command, HistoryCommand::Shutdown) {
                break;
            }
            self.handle_command(command).await;
        }
        info!("History runtime stopped");
    }

    async fn handle_command(&mut self, command: HistoryCommand) {
        // A dropped reply receiver only means the caller stopped waiting.
        match command {
            HistoryCommand::Restore { entries, reply } => {
                let _ = reply.send(self.restore(entries).await);
            }
            HistoryCommand::Observe {
                content,
                stage_on_capture,
                reply,
            } => {
                let _ = reply.send(self.observe(content, stage_on_capture).await);
            }
            HistoryCommand::MatchAndAdvance { pasted, reply } => {
                let _ = reply.send(self.match_and_advance(&pasted).await);
            }
            HistoryCommand::Delete { hashes, reply } => {
                let _ = reply.send(self.delete(&hashes).await);
            }
            HistoryCommand::MoveUp { index, reply } => {
                let result = self.store.move_up(index);
                let _ = reply.send(self.after_edit(result).await);
            }
            HistoryCommand::MoveDown { index, reply } => {
                let result = self.store.move_down(index);
                let _ = reply.send(self.after_edit(result).await);
            }
            HistoryCommand::MarkUnpasted { index, reply } => {
                let result = self.store.mark_unpasted(index);
                let _ = reply.send(self.after_edit(result).await);
            }
            HistoryCommand::SelectForPaste { index, reply } => {
                let _ = reply.send(self.select_for_paste(index));
            }
            HistoryCommand::Rewind { reply } => {
                self.cursor.reset();
                let _ = reply.send(self.stage_next());
            }
            HistoryCommand::Clear { scope, reply } => {
                let _ = reply.send(self.clear(scope).await);
            }
            HistoryCommand::Import { contents, reply } => {
                let _ = reply.send(self.import(contents).await);
            }
            HistoryCommand::SetCapacity { capacity, reply } => {
                let _ = reply.send(self.set_capacity(capacity).await);
            }
            HistoryCommand::PendingExport { reply } => {
                let _ = reply.send(self.store.pending_export());
            }
            HistoryCommand::MarkExported {
                hashes,
                path,
                reply,
            } => {
                let _ = reply.send(self.mark_exported(&hashes, path).await);
            }
            HistoryCommand::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
            HistoryCommand::Shutdown => {}
        }
    }

    async fn restore(&mut self, entries: Vec<HistoryEntry>) -> Restaged<TrimReport> {
        let loaded = entries.len();
        let trimmed = self.store.replace_all(entries);
        self.cursor.reset();
        self.report_trim(trimmed);

        let staged = if self.store.unconsumed_count() == 0 {
            self.stage_newest()
        } else {
            self.stage_next()
        };

        if !trimmed.is_empty() {
            self.persist().await;
        }
        self.emit_reset();

        info!(
            loaded,
            kept = self.store.len(),
            unconsumed = self.store.unconsumed_count(),
            "History restored"
        );
        Restaged::new(trimmed, staged)
    }

    async fn observe(&mut self, content: String, stage_on_capture: bool) -> ObserveOutcome {
        if content.is_empty() || self.last_known_write.as_deref() == Some(content.as_str()) {
            return ObserveOutcome::Ignored;
        }

        let outcome = self.store.append(&content, self.clock.now());
        if !outcome.inserted {
            return ObserveOutcome::Duplicate {
                index: outcome.index,
            };
        }

        self.cursor.reset();
        self.emit(HistoryEvent::EntryAppended {
            index: outcome.index,
            preview: pc_core::history::preview_of(&content),
        });
        self.report_trim(outcome.trimmed);
        self.persist().await;

        let staged = if stage_on_capture {
            self.stage_next()
        } else {
            None
        };

        debug!(
            index = outcome.index,
            len = self.store.len(),
            "Captured new clipboard text"
        );
        ObserveOutcome::Inserted {
            index: outcome.index,
            trimmed: outcome.trimmed,
            staged,
        }
    }

    async fn match_and_advance(&mut self, pasted: &str) -> Option<Staged> {
        match self.store.find_last_by_exact_content(pasted) {
            Some(index) => {
                if let Ok(true) = self.store.mark_pasted(index) {
                    let preview = self.store.get(index).map(HistoryEntry::preview).unwrap_or_default();
                    self.emit(HistoryEvent::EntryConsumed { index, preview });
                }
                self.cursor.set(index);
            }
            None => {
                debug!(
                    last_dispatched = ?self.cursor.last_dispatched(),
                    "Pasted text not found in history, advancing from current cursor"
                );
            }
        }

        let staged = self.stage_next();
        self.persist().await;
        staged
    }

    async fn delete(&mut self, hashes: &HashSet<ContentHash>) -> Restaged<usize> {
        let removed = self.store.delete(hashes);
        if removed == 0 {
            return Restaged::new(0, None);
        }
        Restaged::new(removed, self.restage_after_edit().await)
    }

    async fn after_edit(
        &mut self,
        result: Result<bool, HistoryError>,
    ) -> Result<Restaged<bool>, HistoryError> {
        let changed = result?;
        if !changed {
            return Ok(Restaged::new(false, None));
        }
        Ok(Restaged::new(true, self.restage_after_edit().await))
    }

    fn select_for_paste(&mut self, index: usize) -> Result<Staged, HistoryError> {
        let entry = self
            .store
            .get(index)
            .cloned()
            .ok_or(HistoryError::IndexOutOfRange {
                index,
                len: self.store.len(),
            })?;
        self.cursor.set(index);

        let staged = Staged {
            index,
            entry,
            cycle_completed: false,
        };
        self.publish_staged(&staged);
        Ok(staged)
    }

    async fn clear(&mut self, scope: ClearScope) -> usize {
        let removed = self.store.clear(scope);
        self.cursor.reset();
        self.last_known_write = None;
        self.persist().await;
        self.emit_reset();
        info!(?scope, removed, "History cleared");
        removed
    }

    async fn import(&mut self, contents: Vec<String>) -> Restaged<ImportOutcome> {
        let outcome = self.store.import(contents, self.clock.now());
        if outcome.imported == 0 {
            return Restaged::new(outcome, None);
        }
        self.report_trim(outcome.trimmed);
        Restaged::new(outcome, self.restage_after_edit().await)
    }

    async fn set_capacity(&mut self, capacity: usize) -> TrimReport {
        let trimmed = self.store.set_capacity(capacity);
        if !trimmed.is_empty() {
            self.cursor.reset();
            self.report_trim(trimmed);
            self.persist().await;
            self.emit_reset();
        }
        trimmed
    }

    async fn mark_exported(&mut self, hashes: &[ContentHash], path: PathBuf) -> usize {
        let count = hashes
            .iter()
            .filter(|hash| self.store.mark_exported(hash))
            .count();
        if count > 0 {
            self.persist().await;
            self.emit(HistoryEvent::Exported { count, path });
        }
        count
    }

    fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            entries: self.store.entries().to_vec(),
            capacity: self.store.capacity(),
            last_dispatched: self.cursor.last_dispatched(),
            unconsumed: self.store.unconsumed_count(),
        }
    }

    /// Reset the cursor after a structural edit, persist and stage the oldest entry.
    async fn restage_after_edit(&mut self) -> Option<Staged> {
        self.cursor.reset();
        self.persist().await;
        self.emit_reset();
        self.stage_next()
    }

    fn stage_next(&mut self) -> Option<Staged> {
        let staged = self.cursor.next_in(&self.store)?;
        self.publish_staged(&staged);
        Some(staged)
    }

    fn stage_newest(&mut self) -> Option<Staged> {
        let index = self.store.len().checked_sub(1)?;
        let entry = self.store.get(index)?.clone();
        let staged = Staged {
            index,
            entry,
            cycle_completed: false,
        };
        self.publish_staged(&staged);
        Some(staged)
    }

    /// Record the staged content as our own write before anyone writes it.
    ///
    /// If the caller's clipboard write then fails the marker names text that
    /// is not in the clipboard. Staged text is always an existing entry, so the
    /// only effect is that an external copy of it is ignored rather than
    /// reported as a duplicate, until the next staging replaces the marker.
    fn publish_staged(&mut self, staged: &Staged) {
        self.last_known_write = Some(staged.entry.content.clone());
        if staged.cycle_completed {
            self.emit(HistoryEvent::CycleWrapped);
        }
        self.emit(HistoryEvent::Staged {
            index: staged.index,
            preview: staged.entry.preview(),
        });
    }

    fn report_trim(&self, trimmed: TrimReport) {
        if trimmed.is_empty() {
            return;
        }
        if trimmed.unconsumed_lost > 0 {
            warn!(
                dropped = trimmed.dropped,
                unconsumed_lost = trimmed.unconsumed_lost,
                "History trimmed, unpasted entries were dropped"
            );
        }
        self.emit(HistoryEvent::HistoryTrimmed {
            dropped: trimmed.dropped,
            unconsumed_lost: trimmed.unconsumed_lost,
        });
    }

    fn emit_reset(&self) {
        self.emit(HistoryEvent::HistoryReset {
            len: self.store.len(),
            unconsumed: self.store.unconsumed_count(),
        });
    }

    fn emit(&self, event: HistoryEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("No history event subscribers");
        }
    }

    async fn persist(&self) {
        if let Err(err) = self.repository.save(self.store.entries()).await {
            warn!(error = %err, len = self.store.len(), "Failed to persist history, keeping in-memory state");
        }
    }
}
