use pc_core::HistoryEntry;
use serde::Serialize;

/// Read-only copy of the history for the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySnapshot {
    pub entries: Vec<HistoryEntry>,
    pub capacity: usize,
    pub last_dispatched: Option<usize>,
    pub unconsumed: usize,
}

impl HistorySnapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `[unconsumed/total]`
    pub fn status_line(&self) -> String {
        format!("[{}/{}]", self.unconsumed, self.entries.len())
    }

    /// Entries still waiting to be pasted, with their store index.
    pub fn unconsumed_entries(&self) -> impl Iterator<Item = (usize, &HistoryEntry)> {
        self.entries.iter().enumerate().filter(|(_, e)| !e.pasted)
    }

    /// Entries already pasted, with their store index.
    pub fn consumed_entries(&self) -> impl Iterator<Item = (usize, &HistoryEntry)> {
        self.entries.iter().enumerate().filter(|(_, e)| e.pasted)
    }
}
