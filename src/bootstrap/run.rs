//! Entry points used by `main`: the long-running dispatcher and the one-shot
//! history commands.

use std::sync::atomic::Ordering;

use anyhow::Context;
use pc_app::runtime::HistoryEventReceiver;
use pc_app::usecases::TriggerOutcome;
use pc_core::config::AppConfig;
use pc_core::{ClearScope, HistoryEvent, ImportMode};
use pc_platform::{HotkeyAction, HotkeyBindings, HotkeyListener};
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::config::ResolvedPaths;
use super::runtime::AppRuntime;
use super::wiring::wire_dependencies;
use crate::cli::Command;

fn build_tokio_runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("pastecycle-worker")
        .build()
        .context("Failed to build tokio runtime")
}

/// Run the clipboard monitor and the paste hotkey until Ctrl-C.
///
/// The hotkey listener owns the calling thread; everything else runs on the
/// tokio runtime. On exit the monitor is stopped, pending pasted entries are
/// exported and the history runtime is shut down.
pub fn run_app(config: AppConfig, paths: ResolvedPaths) -> anyhow::Result<()> {
    let deps = wire_dependencies(&paths)?;
    let tokio_rt = build_tokio_runtime()?;
    let cancel = CancellationToken::new();

    let app = tokio_rt.block_on(async {
        let app = AppRuntime::start(config, paths, deps);
        tokio::spawn(log_history_events(app.history().subscribe(), cancel.clone()));
        app.usecases().load_history().execute().await?;
        anyhow::Ok(app)
    })?;

    let mut monitor = app.usecases().clipboard_monitor();
    monitor.prime();
    let monitor_task = tokio_rt.spawn(monitor.run(cancel.clone()));

    let listener = HotkeyListener::new(HotkeyBindings::from_config(&app.config().hotkeys));
    let shutdown = listener.shutdown_flag();
    tokio_rt.spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Ctrl-C received, shutting down"),
            Err(err) => error!(error = %err, "Failed to listen for Ctrl-C"),
        }
        shutdown.store(true, Ordering::SeqCst);
    });

    let coordinator = app.usecases().paste_coordinator(tokio_rt.handle().clone());
    let history = app.history().clone();
    info!(paste = %coordinator.paste_chord(), "PasteCycle running");

    let listen_result = listener.run(|action, hotkeys| match action {
        HotkeyAction::Paste | HotkeyAction::QuickPaste => match coordinator.trigger(hotkeys) {
            TriggerOutcome::Dispatched(_) => debug!(?action, "Paste dispatched"),
            TriggerOutcome::Dropped => debug!(?action, "Paste dropped while dispatching"),
            TriggerOutcome::Aborted => debug!(?action, "Paste aborted"),
        },
        HotkeyAction::ToggleVisibility => history.publish(HistoryEvent::VisibilityToggleRequested),
    });
    if let Err(err) = &listen_result {
        error!(error = %err, "Hotkey listener failed");
    }

    tokio_rt.block_on(async {
        cancel.cancel();
        if let Err(err) = monitor_task.await {
            warn!(error = %err, "Clipboard monitor task failed");
        }
        app.shutdown().await;
    });

    listen_result
}

/// Run one history command against the persisted history and exit.
pub fn run_command(config: AppConfig, paths: ResolvedPaths, command: Command) -> anyhow::Result<()> {
    let deps = wire_dependencies(&paths)?;
    let tokio_rt = build_tokio_runtime()?;

    tokio_rt.block_on(async {
        let app = AppRuntime::start(config, paths, deps);
        let result = execute_command(&app, command).await;
        if let Err(err) = app.history().shutdown().await {
            debug!(error = %err, "History runtime already stopped");
        }
        result
    })
}

async fn execute_command(app: &AppRuntime, command: Command) -> anyhow::Result<()> {
    let usecases = app.usecases();
    usecases.load_history().restore_only().await?;

    match command {
        Command::Run => anyhow::bail!("`run` is not a one-shot command"),
        Command::Import { path, whole } => {
            let mode = if whole {
                ImportMode::Whole
            } else {
                ImportMode::SplitOnBlankLines
            };
            let outcome = usecases.import_history().execute(&path, mode).await?;
            println!("Imported {} entries", outcome.imported);
            if outcome.trimmed.unconsumed_lost > 0 {
                println!(
                    "Capacity reached: {} unpasted entries were dropped",
                    outcome.trimmed.unconsumed_lost
                );
            }
        }
        Command::Export => match usecases.export_pasted().execute().await? {
            Some(path) => println!("Exported to {}", path.display()),
            None => println!("Nothing to export"),
        },
        Command::Clear { pasted_only } => {
            let scope = if pasted_only {
                ClearScope::PastedOnly
            } else {
                ClearScope::All
            };
            let removed = usecases.clear_history().execute(scope).await?;
            println!("Removed {removed} entries");
        }
        Command::Status => {
            let snapshot = usecases.manage_history().snapshot().await?;
            println!("{} {}", snapshot.status_line(), app.paths().data_file.display());
            for (index, entry) in snapshot.entries.iter().enumerate() {
                let marker = if entry.pasted { "x" } else { " " };
                println!("{index:>4} [{marker}] {}", entry.preview());
            }
        }
    }

    Ok(())
}

/// Log every history event until cancelled or the runtime goes away.
async fn log_history_events(mut events: HistoryEventReceiver, cancel: CancellationToken) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            received = events.recv() => match received {
                Ok(event) => log_event(&event),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "History event log lagged"),
                Err(RecvError::Closed) => break,
            },
        }
    }
}

fn log_event(event: &HistoryEvent) {
    match event {
        HistoryEvent::HistoryTrimmed {
            dropped,
            unconsumed_lost,
        } if *unconsumed_lost > 0 => {
            warn!(dropped, unconsumed_lost, "History trimmed, unpasted entries lost")
        }
        HistoryEvent::VisibilityToggleRequested => info!("Visibility toggle requested"),
        other => info!(event = ?other, "History event"),
    }
}
