//! Sequential dispatch: which entry goes into the clipboard next, and the
//! reentrancy state of the paste hotkey handler.
mod cursor;
mod state;

pub use cursor::{next_to_stage, DispatchCursor, Staged};
pub use state::{DispatchGuard, PasteState, PasteStateMachine};
