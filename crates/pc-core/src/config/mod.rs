//! Application configuration domain model
//!
//! `AppConfig::from_toml` maps a parsed TOML document onto the model. Keys
//! that are missing (or have the wrong type) keep their default value;
//! reading the file is the caller's job.

mod hotkey;

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use hotkey::HotkeyChord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub history: HistoryConfig,
    pub hotkeys: HotkeyConfig,
    pub monitor: MonitorConfig,
    pub dispatch: DispatchConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Capacity of the history store.
    pub max_history: usize,
    /// Empty means "default location under the app data directory".
    pub data_file: PathBuf,
    /// Empty means "default location under the app data directory".
    pub export_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeyConfig {
    pub paste: HotkeyChord,
    pub visibility: HotkeyChord,
    pub quick_paste: HotkeyChord,
    /// Quick paste mode: the quick paste chord triggers a dispatch too.
    pub quick_paste_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub poll_interval_ms: u64,
    /// Back-off after a failed clipboard read.
    pub retry_interval_ms: u64,
    /// Stage the oldest entry as soon as new content is captured.
    pub stage_on_capture: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Pause after injecting the paste keystroke, before re-registering the hotkey.
    pub keystroke_pause_ms: u64,
    /// Delay before matching what was pasted and staging the next entry.
    pub settle_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history: HistoryConfig {
                max_history: 100,
                data_file: PathBuf::new(),
                export_dir: PathBuf::new(),
            },
            hotkeys: HotkeyConfig {
                paste: HotkeyChord::new("ctrl+v"),
                visibility: HotkeyChord::new("ctrl+alt+c"),
                quick_paste: HotkeyChord::new("f8"),
                quick_paste_enabled: false,
            },
            monitor: MonitorConfig {
                poll_interval_ms: 500,
                retry_interval_ms: 1000,
                stage_on_capture: true,
            },
            dispatch: DispatchConfig {
                keystroke_pause_ms: 50,
                settle_delay_ms: 50,
            },
        }
    }
}

impl MonitorConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms.max(1))
    }
}

impl DispatchConfig {
    pub fn keystroke_pause(&self) -> Duration {
        Duration::from_millis(self.keystroke_pause_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl AppConfig {
    /// Build a config from a parsed TOML document, falling back to defaults per key.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let get = |section: &str, key: &str| toml_value.get(section).and_then(|s| s.get(key));

        let int = |section: &str, key: &str, default: u64| -> u64 {
            get(section, key)
                .and_then(|v| v.as_integer())
                .and_then(|v| u64::try_from(v).ok())
                .unwrap_or(default)
        };
        let boolean = |section: &str, key: &str, default: bool| -> bool {
            get(section, key).and_then(|v| v.as_bool()).unwrap_or(default)
        };
        let string = |section: &str, key: &str| -> Option<String> {
            get(section, key).and_then(|v| v.as_str()).map(str::to_string)
        };
        let chord = |key: &str, default: &HotkeyChord| -> HotkeyChord {
            string("hotkeys", key)
                .map(HotkeyChord::new)
                .unwrap_or_else(|| default.clone())
        };

        Ok(Self {
            history: HistoryConfig {
                max_history: int("history", "max_history", defaults.history.max_history as u64)
                    as usize,
                data_file: string("history", "data_file")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.history.data_file),
                export_dir: string("history", "export_dir")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.history.export_dir),
            },
            hotkeys: HotkeyConfig {
                paste: chord("paste", &defaults.hotkeys.paste),
                visibility: chord("visibility", &defaults.hotkeys.visibility),
                quick_paste: chord("quick_paste", &defaults.hotkeys.quick_paste),
                quick_paste_enabled: boolean(
                    "hotkeys",
                    "quick_paste_enabled",
                    defaults.hotkeys.quick_paste_enabled,
                ),
            },
            monitor: MonitorConfig {
                poll_interval_ms: int("monitor", "poll_interval_ms", defaults.monitor.poll_interval_ms),
                retry_interval_ms: int(
                    "monitor",
                    "retry_interval_ms",
                    defaults.monitor.retry_interval_ms,
                ),
                stage_on_capture: boolean(
                    "monitor",
                    "stage_on_capture",
                    defaults.monitor.stage_on_capture,
                ),
            },
            dispatch: DispatchConfig {
                keystroke_pause_ms: int(
                    "dispatch",
                    "keystroke_pause_ms",
                    defaults.dispatch.keystroke_pause_ms,
                ),
                settle_delay_ms: int("dispatch", "settle_delay_ms", defaults.dispatch.settle_delay_ms),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_uses_defaults_for_empty_document() {
        let toml_value: Value = toml::from_str("").unwrap();
        let config = AppConfig::from_toml(&toml_value).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_from_toml_parses_all_sections() {
        let toml_str = r#"
            [history]
            max_history = 300
            data_file = "/tmp/history.json"

            [hotkeys]
            paste = "Ctrl+V"
            visibility = "ctrl+shift+h"
            quick_paste_enabled = true

            [monitor]
            poll_interval_ms = 250
            stage_on_capture = false

            [dispatch]
            settle_delay_ms = 120
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.history.max_history, 300);
        assert_eq!(config.history.data_file, PathBuf::from("/tmp/history.json"));
        assert_eq!(config.history.export_dir, PathBuf::new());
        assert_eq!(config.hotkeys.paste.as_str(), "ctrl+v");
        assert_eq!(config.hotkeys.visibility.as_str(), "ctrl+shift+h");
        assert_eq!(config.hotkeys.quick_paste.as_str(), "f8");
        assert!(config.hotkeys.quick_paste_enabled);
        assert_eq!(config.monitor.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.monitor.retry_interval_ms, 1000);
        assert!(!config.monitor.stage_on_capture);
        assert_eq!(config.dispatch.settle_delay(), Duration::from_millis(120));
        assert_eq!(config.dispatch.keystroke_pause_ms, 50);
    }

    #[test]
    fn test_from_toml_ignores_wrong_types_and_negative_numbers() {
        let toml_str = r#"
            [history]
            max_history = "lots"

            [monitor]
            poll_interval_ms = -5
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.history.max_history, 100);
        assert_eq!(config.monitor.poll_interval_ms, 500);
    }
}
