use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::entry::HistoryEntry;
use super::error::HistoryError;
use super::hash::ContentHash;

/// Result of [`HistoryStore::append`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOutcome {
    /// Position of the appended entry, or of the existing entry with the same hash.
    pub index: usize,
    pub inserted: bool,
    pub trimmed: TrimReport,
}

/// What capacity trimming removed from the front of the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrimReport {
    pub dropped: usize,
    /// Dropped entries that had never been pasted. These are lost for good.
    pub unconsumed_lost: usize,
}

impl TrimReport {
    pub fn is_empty(&self) -> bool {
        self.dropped == 0
    }

    fn merge(self, other: TrimReport) -> TrimReport {
        TrimReport {
            dropped: self.dropped + other.dropped,
            unconsumed_lost: self.unconsumed_lost + other.unconsumed_lost,
        }
    }
}

/// Result of [`HistoryStore::import`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    pub imported: usize,
    pub trimmed: TrimReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearScope {
    All,
    PastedOnly,
}

/// Ordered, capacity-bounded, hash-deduplicated clipboard history.
///
/// Insertion order is both the display order and the cycling order (oldest
/// first). The store never holds two entries with the same [`ContentHash`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    capacity: usize,
}

impl HistoryStore {
    /// Create an empty store. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn unconsumed_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.pasted).count()
    }

    pub fn contains_hash(&self, hash: &ContentHash) -> bool {
        self.position_of(hash).is_some()
    }

    pub fn position_of(&self, hash: &ContentHash) -> Option<usize> {
        self.entries.iter().position(|e| &e.content_hash == hash)
    }

    /// Append `content` unless an entry with the same hash already exists anywhere
    /// in the store (pasted or not). Capacity is enforced afterwards.
    pub fn append(&mut self, content: &str, now: DateTime<Utc>) -> AppendOutcome {
        let hash = ContentHash::of(content);
        if let Some(index) = self.position_of(&hash) {
            return AppendOutcome {
                index,
                inserted: false,
                trimmed: TrimReport::default(),
            };
        }

        self.entries.push(HistoryEntry::new(content, now));
        let trimmed = self.trim(self.capacity);

        AppendOutcome {
            index: self.entries.len() - 1,
            inserted: true,
            trimmed,
        }
    }

    /// Drop leading (oldest) entries until `len <= capacity`.
    pub fn trim(&mut self, capacity: usize) -> TrimReport {
        if self.entries.len() <= capacity {
            return TrimReport::default();
        }

        let excess = self.entries.len() - capacity;
        let dropped: Vec<HistoryEntry> = self.entries.drain(..excess).collect();
        let report = TrimReport {
            dropped: dropped.len(),
            unconsumed_lost: dropped.iter().filter(|e| !e.pasted).count(),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            dropped = report.dropped,
            unconsumed_lost = report.unconsumed_lost,
            capacity,
            "Trimmed clipboard history"
        );

        report
    }

    /// Change the capacity and trim immediately.
    pub fn set_capacity(&mut self, capacity: usize) -> TrimReport {
        self.capacity = capacity.max(1);
        self.trim(self.capacity)
    }

    /// Most recent entry whose content equals `content` exactly.
    pub fn find_last_by_exact_content(&self, content: &str) -> Option<usize> {
        self.entries.iter().rposition(|e| e.content == content)
    }

    /// Remove every entry whose hash is in `hashes`. Returns how many were removed.
    pub fn delete(&mut self, hashes: &HashSet<ContentHash>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !hashes.contains(&e.content_hash));
        before - self.entries.len()
    }

    /// Swap the entry at `index` with its predecessor.
    ///
    /// Returns `Ok(false)` when the entry is already first.
    pub fn move_up(&mut self, index: usize) -> Result<bool, HistoryError> {
        self.check_index(index)?;
        if index == 0 {
            return Ok(false);
        }
        self.entries.swap(index, index - 1);
        Ok(true)
    }

    /// Swap the entry at `index` with its successor.
    ///
    /// Returns `Ok(false)` when the entry is already last.
    pub fn move_down(&mut self, index: usize) -> Result<bool, HistoryError> {
        self.check_index(index)?;
        if index + 1 == self.entries.len() {
            return Ok(false);
        }
        self.entries.swap(index, index + 1);
        Ok(true)
    }

    /// Put a consumed entry back into the unconsumed set; it becomes exportable again.
    pub fn mark_unpasted(&mut self, index: usize) -> Result<bool, HistoryError> {
        self.check_index(index)?;
        let entry = &mut self.entries[index];
        let changed = entry.pasted || entry.exported;
        entry.pasted = false;
        entry.exported = false;
        Ok(changed)
    }

    /// Returns `Ok(true)` if the entry was unconsumed before the call.
    pub fn mark_pasted(&mut self, index: usize) -> Result<bool, HistoryError> {
        self.check_index(index)?;
        let entry = &mut self.entries[index];
        let newly = !entry.pasted;
        entry.pasted = true;
        Ok(newly)
    }

    pub fn mark_exported(&mut self, hash: &ContentHash) -> bool {
        match self.entries.iter_mut().find(|e| &e.content_hash == hash) {
            Some(entry) => {
                entry.exported = true;
                true
            }
            None => false,
        }
    }

    /// Entries that were consumed but not yet exported, in store order.
    pub fn pending_export(&self) -> Vec<HistoryEntry> {
        self.entries
            .iter()
            .filter(|e| e.pasted && !e.exported)
            .cloned()
            .collect()
    }

    pub fn clear(&mut self, scope: ClearScope) -> usize {
        let before = self.entries.len();
        match scope {
            ClearScope::All => self.entries.clear(),
            ClearScope::PastedOnly => self.entries.retain(|e| !e.pasted),
        }
        before - self.entries.len()
    }

    /// Append several texts in the given order, skipping blanks and anything
    /// already present (including duplicates within the batch).
    pub fn import<I>(&mut self, contents: I, now: DateTime<Utc>) -> ImportOutcome
    where
        I: IntoIterator<Item = String>,
    {
        let mut imported = 0;
        for content in contents {
            if content.trim().is_empty() {
                continue;
            }
            let hash = ContentHash::of(&content);
            if self.contains_hash(&hash) {
                continue;
            }
            self.entries.push(HistoryEntry::new(content, now));
            imported += 1;
        }

        ImportOutcome {
            imported,
            trimmed: self.trim(self.capacity),
        }
    }

    /// Replace the whole history, e.g. after loading from disk.
    ///
    /// Entries with a hash already seen earlier in `entries` are dropped.
    pub fn replace_all(&mut self, entries: Vec<HistoryEntry>) -> TrimReport {
        let mut seen = HashSet::new();
        let mut duplicates = TrimReport::default();
        self.entries = entries
            .into_iter()
            .filter(|e| {
                let fresh = seen.insert(e.content_hash.clone());
                if !fresh {
                    duplicates.dropped += 1;
                    if !e.pasted {
                        duplicates.unconsumed_lost += 1;
                    }
                }
                fresh
            })
            .collect();

        if !duplicates.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::warn!(duplicates = duplicates.dropped, "Dropped duplicate history entries");
        }

        duplicates.merge(self.trim(self.capacity))
    }

    fn check_index(&self, index: usize) -> Result<(), HistoryError> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(HistoryError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
        }
    }
}
