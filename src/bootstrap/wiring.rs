//! # Dependency injection
//!
//! The only place that depends on `pc-infra`, `pc-platform` and `pc-app` at
//! once. It assembles concrete adapters behind their port traits and makes no
//! decisions of its own.

use std::sync::Arc;

use pc_core::ports::{
    ClockPort, HistoryRepositoryPort, PasteKeystrokePort, PastedExportPort, SystemClipboardPort,
    TextImportPort,
};
use pc_infra::{DatedTextExporter, FileTextSource, JsonFileHistoryRepository, SystemClock};
use pc_platform::{EnigoPasteKeystroke, SystemClipboard};
use tracing::debug;

use super::config::ResolvedPaths;

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Clipboard initialization failed: {0}")]
    ClipboardInit(String),
}

/// Every port the use cases need, as shared trait objects.
#[derive(Clone)]
pub struct AppDeps {
    pub clipboard: Arc<dyn SystemClipboardPort>,
    pub keystroke: Arc<dyn PasteKeystrokePort>,
    pub history_repo: Arc<dyn HistoryRepositoryPort>,
    pub exporter: Arc<dyn PastedExportPort>,
    pub text_source: Arc<dyn TextImportPort>,
    pub clock: Arc<dyn ClockPort>,
}

/// Create file-backed infrastructure adapters.
fn create_infra_layer(
    paths: &ResolvedPaths,
) -> (
    Arc<dyn HistoryRepositoryPort>,
    Arc<dyn PastedExportPort>,
    Arc<dyn TextImportPort>,
    Arc<dyn ClockPort>,
) {
    (
        Arc::new(JsonFileHistoryRepository::new(paths.data_file.clone())),
        Arc::new(DatedTextExporter::new(paths.export_dir.clone())),
        Arc::new(FileTextSource),
        Arc::new(SystemClock),
    )
}

/// Create OS adapters. The clipboard context is opened here and fails fast
/// when no display or clipboard service is reachable.
fn create_platform_layer(
) -> WiringResult<(Arc<dyn SystemClipboardPort>, Arc<dyn PasteKeystrokePort>)> {
    let clipboard =
        SystemClipboard::new().map_err(|e| WiringError::ClipboardInit(format!("{e:#}")))?;
    Ok((Arc::new(clipboard), Arc::new(EnigoPasteKeystroke::new())))
}

pub fn wire_dependencies(paths: &ResolvedPaths) -> WiringResult<AppDeps> {
    debug!(
        data_file = %paths.data_file.display(),
        export_dir = %paths.export_dir.display(),
        "Wiring dependencies"
    );

    let (history_repo, exporter, text_source, clock) = create_infra_layer(paths);
    let (clipboard, keystroke) = create_platform_layer()?;

    Ok(AppDeps {
        clipboard,
        keystroke,
        history_repo,
        exporter,
        text_source,
        clock,
    })
}
