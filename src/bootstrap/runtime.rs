//! Running application state: the injected ports plus the spawned history
//! runtime, with a factory for every use case.

use pc_app::usecases::{
    ClearHistory, ClipboardMonitor, ExportPastedHistory, ImportHistory, LoadHistory,
    ManageHistory, MonitorSettings, PasteCoordinator, PasteTiming, StageClipboard,
};
use pc_app::{HistoryHandle, HistoryRuntime};
use pc_core::config::AppConfig;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::config::ResolvedPaths;
use super::wiring::AppDeps;

pub struct AppRuntime {
    deps: AppDeps,
    config: AppConfig,
    paths: ResolvedPaths,
    history: HistoryHandle,
    history_task: JoinHandle<()>,
}

impl AppRuntime {
    /// Spawn the history runtime. Must be called from within a tokio runtime.
    pub fn start(config: AppConfig, paths: ResolvedPaths, deps: AppDeps) -> Self {
        let (runtime, history) = HistoryRuntime::new(
            config.history.max_history,
            deps.history_repo.clone(),
            deps.clock.clone(),
        );
        let history_task = runtime.spawn();

        Self {
            deps,
            config,
            paths,
            history,
            history_task,
        }
    }

    pub fn history(&self) -> &HistoryHandle {
        &self.history
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn paths(&self) -> &ResolvedPaths {
        &self.paths
    }

    pub fn usecases(&self) -> UseCases<'_> {
        UseCases::new(self)
    }

    /// Export anything pasted but not yet exported, then stop the history runtime.
    pub async fn shutdown(self) {
        match self.usecases().export_pasted().execute().await {
            Ok(Some(path)) => info!(path = %path.display(), "Exported pasted history on shutdown"),
            Ok(None) => {}
            Err(err) => warn!(error = %err, "Failed to export pasted history on shutdown"),
        }

        if let Err(err) = self.history.shutdown().await {
            warn!(error = %err, "History runtime already stopped");
        }
        if let Err(err) = self.history_task.await {
            warn!(error = %err, "History runtime task failed");
        }
    }
}

/// Use case accessor for [`AppRuntime`].
///
/// Commands never need to know which ports a use case takes; they are all
/// connected here.
pub struct UseCases<'a> {
    runtime: &'a AppRuntime,
}

impl<'a> UseCases<'a> {
    pub fn new(runtime: &'a AppRuntime) -> Self {
        Self { runtime }
    }

    fn stage(&self) -> StageClipboard {
        StageClipboard::new(self.runtime.deps.clipboard.clone())
    }

    pub fn load_history(&self) -> LoadHistory {
        LoadHistory::new(
            self.runtime.deps.history_repo.clone(),
            self.runtime.history.clone(),
            self.stage(),
        )
    }

    pub fn clear_history(&self) -> ClearHistory {
        ClearHistory::new(self.runtime.history.clone(), self.runtime.deps.clipboard.clone())
    }

    pub fn manage_history(&self) -> ManageHistory {
        ManageHistory::new(self.runtime.history.clone(), self.stage())
    }

    pub fn import_history(&self) -> ImportHistory {
        ImportHistory::new(
            self.runtime.deps.text_source.clone(),
            self.runtime.history.clone(),
            self.stage(),
        )
    }

    pub fn export_pasted(&self) -> ExportPastedHistory {
        ExportPastedHistory::new(
            self.runtime.history.clone(),
            self.runtime.deps.exporter.clone(),
            self.runtime.deps.clock.clone(),
        )
    }

    pub fn clipboard_monitor(&self) -> ClipboardMonitor {
        ClipboardMonitor::new(
            self.runtime.deps.clipboard.clone(),
            self.runtime.history.clone(),
            self.stage(),
            MonitorSettings::from(&self.runtime.config.monitor),
        )
    }

    /// `runtime` is where match-and-advance runs after each paste.
    pub fn paste_coordinator(&self, runtime: Handle) -> PasteCoordinator {
        PasteCoordinator::new(
            self.runtime.deps.clipboard.clone(),
            self.runtime.deps.keystroke.clone(),
            self.runtime.history.clone(),
            self.runtime.config.hotkeys.paste.clone(),
            PasteTiming::from(&self.runtime.config.dispatch),
            runtime,
        )
    }
}
