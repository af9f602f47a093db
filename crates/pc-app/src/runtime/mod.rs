//! The history runtime.
//!
//! [`HistoryRuntime`] is the only owner of the [`HistoryStore`](pc_core::HistoryStore),
//! the [`DispatchCursor`](pc_core::DispatchCursor) and the last text the engine
//! wrote into the OS clipboard. Everything else talks to it through a
//! cloneable [`HistoryHandle`]; commands are processed one at a time in
//! arrival order.

mod actor;
mod command;
mod handle;
mod snapshot;

pub use actor::HistoryRuntime;
pub use command::{HistoryCommand, ObserveOutcome, Restaged};
pub use handle::HistoryHandle;
pub use snapshot::HistorySnapshot;

use tokio::sync::{broadcast, mpsc};

pub type HistoryCommandSender = mpsc::Sender<HistoryCommand>;
pub type HistoryCommandReceiver = mpsc::Receiver<HistoryCommand>;
pub type HistoryEventSender = broadcast::Sender<pc_core::HistoryEvent>;
pub type HistoryEventReceiver = broadcast::Receiver<pc_core::HistoryEvent>;

pub(crate) const COMMAND_CHANNEL_CAPACITY: usize = 64;
pub(crate) const EVENT_CHANNEL_CAPACITY: usize = 256;
