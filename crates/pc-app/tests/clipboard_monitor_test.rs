//! Clipboard monitor against the history runtime.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use pc_app::runtime::ObserveOutcome;
use pc_app::usecases::{ClearHistory, ClipboardMonitor, LoadHistory, MonitorSettings, StageClipboard};
use pc_core::ClearScope;
use pc_app::HistoryHandle;
use pc_core::HistoryEvent;
use tokio_util::sync::CancellationToken;

fn settings(stage_on_capture: bool) -> MonitorSettings {
    MonitorSettings {
        poll_interval: Duration::from_millis(10),
        retry_interval: Duration::from_millis(30),
        stage_on_capture,
    }
}

async fn setup(contents: &[&str], stage_on_capture: bool) -> (HistoryHandle, Arc<MemoryClipboard>, ClipboardMonitor) {
    let entries = contents.iter().map(|c| entry(c, false)).collect();
    let repository = Arc::new(MemoryRepository::with_entries(entries));
    let handle = spawn_runtime(100, repository.clone());
    let clipboard = Arc::new(MemoryClipboard::default());
    let stage = StageClipboard::new(clipboard.clone());

    LoadHistory::new(repository, handle.clone(), stage.clone())
        .execute()
        .await
        .unwrap();

    let monitor = ClipboardMonitor::new(clipboard.clone(), handle.clone(), stage, settings(stage_on_capture));
    (handle, clipboard, monitor)
}

#[tokio::test]
async fn external_copy_is_appended_and_oldest_entry_staged() {
    let (handle, clipboard, mut monitor) = setup(&["A"], true).await;
    monitor.prime();
    let mut events = handle.subscribe();

    clipboard.external_copy("X");
    let outcome = monitor.poll_once().await.unwrap();

    match outcome {
        Some(ObserveOutcome::Inserted { index, staged, .. }) => {
            assert_eq!(index, 1);
            assert_eq!(staged.map(|s| s.index), Some(0));
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(clipboard.current(), "A");
    assert_eq!(
        events.try_recv().unwrap(),
        HistoryEvent::EntryAppended {
            index: 1,
            preview: "X".to_string()
        }
    );

    // The staged write is not captured back.
    assert_eq!(monitor.poll_once().await.unwrap(), None);
    assert_eq!(handle.snapshot().await.unwrap().len(), 2);
}

#[tokio::test]
async fn staged_write_is_not_recaptured_by_a_fresh_monitor() {
    let (handle, clipboard, mut monitor) = setup(&["A", "B"], true).await;
    assert_eq!(clipboard.current(), "A");

    assert_eq!(monitor.poll_once().await.unwrap(), Some(ObserveOutcome::Ignored));

    handle.match_and_advance("A".to_string()).await.unwrap();
    clipboard.external_copy("B");
    assert_eq!(monitor.poll_once().await.unwrap(), Some(ObserveOutcome::Ignored));
    assert_eq!(handle.snapshot().await.unwrap().len(), 2);
}

#[tokio::test]
async fn empty_and_unchanged_reads_are_skipped() {
    let (handle, clipboard, mut monitor) = setup(&[], true).await;

    assert_eq!(monitor.poll_once().await.unwrap(), None);
    clipboard.external_copy("X");
    assert!(monitor.poll_once().await.unwrap().is_some());
    assert_eq!(monitor.poll_once().await.unwrap(), None);
    assert_eq!(handle.snapshot().await.unwrap().len(), 1);
}

#[tokio::test]
async fn text_copied_again_after_clear_is_captured() {
    let (handle, clipboard, mut monitor) = setup(&[], true).await;

    clipboard.external_copy("X");
    assert!(matches!(
        monitor.poll_once().await.unwrap(),
        Some(ObserveOutcome::Inserted { index: 0, .. })
    ));

    ClearHistory::new(handle.clone(), clipboard.clone())
        .execute(ClearScope::All)
        .await
        .unwrap();
    assert_eq!(clipboard.current(), "");
    assert_eq!(monitor.poll_once().await.unwrap(), None);

    clipboard.external_copy("X");
    assert!(matches!(
        monitor.poll_once().await.unwrap(),
        Some(ObserveOutcome::Inserted { index: 0, .. })
    ));
    assert_eq!(handle.snapshot().await.unwrap().len(), 1);
}

#[tokio::test]
async fn copying_known_text_again_is_a_duplicate() {
    let (handle, clipboard, mut monitor) = setup(&["A", "B"], true).await;
    monitor.prime();

    clipboard.external_copy("B");
    assert_eq!(
        monitor.poll_once().await.unwrap(),
        Some(ObserveOutcome::Duplicate { index: 1 })
    );
    assert_eq!(handle.snapshot().await.unwrap().len(), 2);
}

#[tokio::test]
async fn capture_without_staging_leaves_clipboard_alone() {
    let (handle, clipboard, mut monitor) = setup(&["A"], false).await;
    monitor.prime();

    clipboard.external_copy("X");
    let outcome = monitor.poll_once().await.unwrap();

    assert!(matches!(outcome, Some(ObserveOutcome::Inserted { staged: None, .. })));
    assert_eq!(clipboard.current(), "X");
    assert_eq!(handle.snapshot().await.unwrap().last_dispatched, None);
}

#[tokio::test(start_paused = true)]
async fn monitor_survives_read_errors_and_stops_on_cancel() {
    let (handle, clipboard, monitor) = setup(&[], true).await;
    let cancel = CancellationToken::new();

    clipboard.set_fail_reads(true);
    let task = tokio::spawn(monitor.run(cancel.clone()));
    tokio::time::sleep(Duration::from_millis(100)).await;

    clipboard.set_fail_reads(false);
    clipboard.external_copy("after recovery");
    tokio::time::sleep(Duration::from_millis(100)).await;

    cancel.cancel();
    task.await.unwrap();

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.entries[0].content, "after recovery");
}

#[tokio::test(start_paused = true)]
async fn monitor_stops_when_runtime_is_gone() {
    let (handle, clipboard, monitor) = setup(&[], true).await;
    handle.shutdown().await.unwrap();
    clipboard.external_copy("X");

    let task = tokio::spawn(monitor.run(CancellationToken::new()));
    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("monitor should stop on its own")
        .unwrap();
}
