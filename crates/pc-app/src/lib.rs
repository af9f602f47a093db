//! PasteCycle application layer
//!
//! Use cases plus the history runtime: a single task that owns the history
//! store and the dispatch cursor, fed by the clipboard monitor, the paste
//! coordinator and the host.

pub mod runtime;
pub mod usecases;

pub use runtime::{HistoryHandle, HistoryRuntime, HistorySnapshot, Restaged};
