pub mod clear_history;
pub mod clipboard_monitor;
pub mod export_pasted;
pub mod import_history;
pub mod load_history;
pub mod manage_history;
pub mod paste_coordinator;
pub mod stage_clipboard;

pub use clear_history::ClearHistory;
pub use clipboard_monitor::{ClipboardMonitor, MonitorError, MonitorSettings};
pub use export_pasted::ExportPastedHistory;
pub use import_history::ImportHistory;
pub use load_history::LoadHistory;
pub use manage_history::ManageHistory;
pub use paste_coordinator::{PasteCoordinator, PasteTiming, TriggerOutcome};
pub use stage_clipboard::StageClipboard;
