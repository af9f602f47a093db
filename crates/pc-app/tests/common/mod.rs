//! Test doubles shared by the integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use pc_app::HistoryHandle;
use pc_app::HistoryRuntime;
use pc_core::ports::{
    ClockPort, HistoryRepositoryPort, HotkeyError, HotkeyPort, PasteKeystrokePort,
    SystemClipboardPort,
};
use pc_core::{HistoryEntry, HotkeyChord};

/// In-memory OS clipboard.
#[derive(Default)]
pub struct MemoryClipboard {
    text: Mutex<String>,
    writes: Mutex<Vec<String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryClipboard {
    pub fn with_text(text: &str) -> Self {
        let clipboard = Self::default();
        *clipboard.text.lock().unwrap() = text.to_string();
        clipboard
    }

    /// Simulate a copy made by another application.
    pub fn external_copy(&self, text: &str) {
        *self.text.lock().unwrap() = text.to_string();
    }

    pub fn current(&self) -> String {
        self.text.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl SystemClipboardPort for MemoryClipboard {
    fn read_text(&self) -> Result<String> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(anyhow!("clipboard busy"));
        }
        Ok(self.current())
    }

    fn write_text(&self, text: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("clipboard locked"));
        }
        *self.text.lock().unwrap() = text.to_string();
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Repository keeping the last saved snapshot in memory.
#[derive(Default)]
pub struct MemoryRepository {
    entries: Mutex<Vec<HistoryEntry>>,
    saves: AtomicUsize,
}

impl MemoryRepository {
    pub fn with_entries(entries: Vec<HistoryEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn saved(&self) -> Vec<HistoryEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HistoryRepositoryPort for MemoryRepository {
    async fn load(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.saved())
    }

    async fn save(&self, entries: &[HistoryEntry]) -> Result<()> {
        *self.entries.lock().unwrap() = entries.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 15).unwrap())
    }
}

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Records register/unregister calls.
#[derive(Default)]
pub struct RecordingHotkeys {
    calls: Mutex<Vec<String>>,
}

impl RecordingHotkeys {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl HotkeyPort for RecordingHotkeys {
    fn register(&self, chord: &HotkeyChord) -> Result<(), HotkeyError> {
        self.calls.lock().unwrap().push(format!("register {chord}"));
        Ok(())
    }

    fn unregister(&self, chord: &HotkeyChord) -> Result<(), HotkeyError> {
        self.calls.lock().unwrap().push(format!("unregister {chord}"));
        Ok(())
    }
}

/// Keystroke injector that only counts.
#[derive(Default)]
pub struct CountingKeystroke {
    injected: AtomicUsize,
}

impl CountingKeystroke {
    pub fn count(&self) -> usize {
        self.injected.load(Ordering::SeqCst)
    }
}

impl PasteKeystrokePort for CountingKeystroke {
    fn inject_paste(&self) -> Result<()> {
        self.injected.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn spawn_runtime(capacity: usize, repository: Arc<dyn HistoryRepositoryPort>) -> HistoryHandle {
    let (runtime, handle) = HistoryRuntime::new(capacity, repository, Arc::new(FixedClock::default()));
    runtime.spawn();
    handle
}

pub fn entry(content: &str, pasted: bool) -> HistoryEntry {
    let mut entry = HistoryEntry::new(content, FixedClock::default().0);
    entry.pasted = pasted;
    entry
}
