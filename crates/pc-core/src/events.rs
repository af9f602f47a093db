//! Facts published by the history runtime for whoever renders history.
//!
//! Events describe what happened, never what the consumer should do next.

use std::path::PathBuf;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HistoryEvent {
    /// New external content was recorded.
    EntryAppended { index: usize, preview: String },

    /// An entry was matched as the content of a completed paste for the first time.
    EntryConsumed { index: usize, preview: String },

    /// An entry was written into the OS clipboard, ready for the next paste.
    Staged { index: usize, preview: String },

    /// The dispatch cursor wrapped from the newest entry back to the oldest.
    CycleWrapped,

    /// Capacity trimming removed entries from the front of the history.
    HistoryTrimmed { dropped: usize, unconsumed_lost: usize },

    /// Entries were deleted, reordered, reloaded or re-marked; the cursor was reset.
    HistoryReset { len: usize, unconsumed: usize },

    /// Consumed entries were written to an export file.
    Exported { count: usize, path: PathBuf },

    /// The visibility hotkey fired.
    VisibilityToggleRequested,
}
