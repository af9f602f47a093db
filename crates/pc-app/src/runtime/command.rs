use std::collections::HashSet;
use std::path::PathBuf;

use pc_core::{
    ClearScope, ContentHash, HistoryEntry, HistoryError, ImportOutcome, Staged, TrimReport,
};
use tokio::sync::oneshot;

use super::snapshot::HistorySnapshot;

/// Result of a mutation that may have staged a new entry.
///
/// The runtime never touches the OS clipboard: whoever receives a `Restaged`
/// with `staged: Some(..)` is expected to write that entry's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restaged<T> {
    pub value: T,
    pub staged: Option<Staged>,
}

impl<T> Restaged<T> {
    pub(crate) fn new(value: T, staged: Option<Staged>) -> Self {
        Self { value, staged }
    }
}

/// What the runtime made of one clipboard observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserveOutcome {
    /// Empty text, or the text the engine itself staged last.
    Ignored,
    /// Already in the history.
    Duplicate { index: usize },
    Inserted {
        index: usize,
        trimmed: TrimReport,
        staged: Option<Staged>,
    },
}

pub enum HistoryCommand {
    /// Replace the history with persisted entries and stage the first one.
    Restore {
        entries: Vec<HistoryEntry>,
        reply: oneshot::Sender<Restaged<TrimReport>>,
    },
    /// Text read from the OS clipboard by the monitor.
    Observe {
        content: String,
        stage_on_capture: bool,
        reply: oneshot::Sender<ObserveOutcome>,
    },
    /// A paste of `pasted` completed; mark it and stage what follows.
    MatchAndAdvance {
        pasted: String,
        reply: oneshot::Sender<Option<Staged>>,
    },
    Delete {
        hashes: HashSet<ContentHash>,
        reply: oneshot::Sender<Restaged<usize>>,
    },
    MoveUp {
        index: usize,
        reply: oneshot::Sender<Result<Restaged<bool>, HistoryError>>,
    },
    MoveDown {
        index: usize,
        reply: oneshot::Sender<Result<Restaged<bool>, HistoryError>>,
    },
    MarkUnpasted {
        index: usize,
        reply: oneshot::Sender<Result<Restaged<bool>, HistoryError>>,
    },
    SelectForPaste {
        index: usize,
        reply: oneshot::Sender<Result<Staged, HistoryError>>,
    },
    /// Reset the cursor and stage the oldest entry.
    Rewind {
        reply: oneshot::Sender<Option<Staged>>,
    },
    Clear {
        scope: ClearScope,
        reply: oneshot::Sender<usize>,
    },
    Import {
        contents: Vec<String>,
        reply: oneshot::Sender<Restaged<ImportOutcome>>,
    },
    SetCapacity {
        capacity: usize,
        reply: oneshot::Sender<TrimReport>,
    },
    PendingExport {
        reply: oneshot::Sender<Vec<HistoryEntry>>,
    },
    MarkExported {
        hashes: Vec<ContentHash>,
        path: PathBuf,
        reply: oneshot::Sender<usize>,
    },
    Snapshot {
        reply: oneshot::Sender<HistorySnapshot>,
    },
    Shutdown,
}
