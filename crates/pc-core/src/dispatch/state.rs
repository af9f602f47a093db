use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

/// Reentrancy state of the paste hotkey handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteState {
    Idle,
    /// Between "unregister hotkey" and "re-register hotkey".
    Dispatching { started_at: Instant },
}

/// Explicit `Idle -> Dispatching -> Idle` machine.
///
/// [`try_begin`](PasteStateMachine::try_begin) is the only way into
/// `Dispatching`, and the returned guard is the only way out. A trigger that
/// arrives while dispatching gets `None` and is dropped, not queued.
#[derive(Debug)]
pub struct PasteStateMachine {
    state: Mutex<PasteState>,
}

impl Default for PasteStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PasteStateMachine {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PasteState::Idle),
        }
    }

    pub fn current(&self) -> PasteState {
        *self.lock()
    }

    pub fn is_dispatching(&self) -> bool {
        matches!(self.current(), PasteState::Dispatching { .. })
    }

    pub fn try_begin(&self) -> Option<DispatchGuard<'_>> {
        let mut state = self.lock();
        match *state {
            PasteState::Dispatching { .. } => None,
            PasteState::Idle => {
                *state = PasteState::Dispatching {
                    started_at: Instant::now(),
                };
                Some(DispatchGuard { machine: self })
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, PasteState> {
        // The state is a plain enum; a panic elsewhere cannot leave it torn.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Holds the machine in `Dispatching`; dropping it returns to `Idle`.
#[derive(Debug)]
pub struct DispatchGuard<'a> {
    machine: &'a PasteStateMachine,
}

impl DispatchGuard<'_> {
    pub fn started_at(&self) -> Option<Instant> {
        match self.machine.current() {
            PasteState::Dispatching { started_at } => Some(started_at),
            PasteState::Idle => None,
        }
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        *self.machine.lock() = PasteState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn starts_idle() {
        let machine = PasteStateMachine::new();
        assert_eq!(machine.current(), PasteState::Idle);
    }

    #[test]
    fn second_begin_is_rejected_while_dispatching() {
        let machine = PasteStateMachine::new();
        let guard = machine.try_begin();
        assert!(guard.is_some());
        assert!(machine.is_dispatching());
        assert!(machine.try_begin().is_none());
    }

    #[test]
    fn dropping_guard_returns_to_idle() {
        let machine = PasteStateMachine::new();
        {
            let guard = machine.try_begin().unwrap();
            assert!(guard.started_at().is_some());
        }
        assert_eq!(machine.current(), PasteState::Idle);
        assert!(machine.try_begin().is_some());
    }

    #[test]
    fn only_one_thread_enters_at_a_time() {
        let machine = Arc::new(PasteStateMachine::new());
        let guard = machine.try_begin().unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let machine = Arc::clone(&machine);
                std::thread::spawn(move || machine.try_begin().is_some())
            })
            .collect();

        let entered = handles.into_iter().filter_map(|h| h.join().ok()).filter(|ok| *ok).count();
        assert_eq!(entered, 0);
        drop(guard);
        assert!(!machine.is_dispatching());
    }
}
