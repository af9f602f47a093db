pub mod export;
pub mod history;
pub mod import;
pub mod time;

pub use export::DatedTextExporter;
pub use history::JsonFileHistoryRepository;
pub use import::FileTextSource;
pub use time::SystemClock;
