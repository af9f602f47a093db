use crate::history::{HistoryEntry, HistoryStore};

/// Position of the most recently dispatched entry.
///
/// This is a position, not an identity: any structural change of the store
/// must [`reset`](DispatchCursor::reset) it so the next dispatch restarts at
/// the oldest entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchCursor {
    last_dispatched: Option<usize>,
}

impl DispatchCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_dispatched(&self) -> Option<usize> {
        self.last_dispatched
    }

    pub fn reset(&mut self) {
        self.last_dispatched = None;
    }

    pub fn set(&mut self, index: usize) {
        self.last_dispatched = Some(index);
    }

    pub fn next_in(&self, store: &HistoryStore) -> Option<Staged> {
        next_to_stage(store, self.last_dispatched)
    }
}

/// Entry chosen for staging into the OS clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staged {
    pub index: usize,
    pub entry: HistoryEntry,
    /// The cursor wrapped from the newest entry back to the oldest.
    pub cycle_completed: bool,
}

/// Compute the entry following `last_dispatched`, wrapping to the oldest one.
///
/// Already consumed entries are not skipped: the cycle is a ring over every
/// entry. `None` means nothing was dispatched since the last reset.
pub fn next_to_stage(store: &HistoryStore, last_dispatched: Option<usize>) -> Option<Staged> {
    if store.is_empty() {
        return None;
    }

    let candidate = last_dispatched.map_or(0, |i| i.saturating_add(1));
    let (index, cycle_completed) = if candidate >= store.len() {
        (0, true)
    } else {
        (candidate, false)
    };

    store.get(index).map(|entry| Staged {
        index,
        entry: entry.clone(),
        cycle_completed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashSet;

    fn store_of(contents: &[&str]) -> HistoryStore {
        let mut store = HistoryStore::new(100);
        for c in contents {
            store.append(c, Utc::now());
        }
        store
    }

    #[test]
    fn empty_store_stages_nothing() {
        let store = HistoryStore::new(10);
        assert!(next_to_stage(&store, None).is_none());
        assert!(next_to_stage(&store, Some(3)).is_none());
    }

    #[test]
    fn reset_cursor_starts_at_oldest() {
        let store = store_of(&["a", "b", "c"]);
        let staged = next_to_stage(&store, None).unwrap();
        assert_eq!(staged.index, 0);
        assert_eq!(staged.entry.content, "a");
        assert!(!staged.cycle_completed);
    }

    #[test]
    fn advances_by_one_below_last_index() {
        let store = store_of(&["a", "b", "c", "d"]);
        for k in 0..3 {
            let staged = next_to_stage(&store, Some(k)).unwrap();
            assert_eq!(staged.index, k + 1);
            assert!(!staged.cycle_completed);
        }
    }

    #[test]
    fn wraps_after_newest_entry() {
        let store = store_of(&["a", "b", "c"]);
        let staged = next_to_stage(&store, Some(2)).unwrap();
        assert_eq!(staged.index, 0);
        assert!(staged.cycle_completed);
    }

    #[test]
    fn stale_index_beyond_len_wraps() {
        let store = store_of(&["a", "b"]);
        let staged = next_to_stage(&store, Some(7)).unwrap();
        assert_eq!(staged.index, 0);
        assert!(staged.cycle_completed);
    }

    #[test]
    fn consumed_entries_are_not_skipped() {
        let mut store = store_of(&["a", "b", "c"]);
        store.mark_pasted(1).unwrap();

        let staged = next_to_stage(&store, Some(0)).unwrap();
        assert_eq!(staged.index, 1);
        assert!(staged.entry.pasted);
    }

    #[test]
    fn all_consumed_still_wraps_to_oldest() {
        let mut store = store_of(&["a", "b"]);
        store.mark_pasted(0).unwrap();
        store.mark_pasted(1).unwrap();

        let staged = next_to_stage(&store, Some(1)).unwrap();
        assert_eq!(staged.index, 0);
        assert!(staged.cycle_completed);
    }

    #[test]
    fn reset_after_each_mutation_restarts_at_zero() {
        let mut store = store_of(&["a", "b", "c", "d"]);
        let mut cursor = DispatchCursor::new();

        cursor.set(2);
        store.move_up(3).unwrap();
        cursor.reset();
        assert_eq!(cursor.next_in(&store).unwrap().index, 0);

        cursor.set(2);
        store.move_down(0).unwrap();
        cursor.reset();
        assert_eq!(cursor.next_in(&store).unwrap().index, 0);

        cursor.set(1);
        store.mark_pasted(1).unwrap();
        store.mark_unpasted(1).unwrap();
        cursor.reset();
        assert_eq!(cursor.next_in(&store).unwrap().index, 0);

        cursor.set(2);
        let victim: HashSet<_> = [store.get(0).unwrap().content_hash.clone()].into_iter().collect();
        store.delete(&victim);
        cursor.reset();
        assert_eq!(cursor.next_in(&store).unwrap().index, 0);
    }
}
