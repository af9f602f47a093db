//! Configuration loading
//!
//! Reads the TOML file and hands the parsed value to [`AppConfig::from_toml`].
//! This module only does I/O and parsing; defaults and per-key fallbacks live
//! in `pc-core`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use pc_core::app_dirs::AppDirs;
use pc_core::config::AppConfig;
use tracing::info;

/// Load configuration from `config_path`.
///
/// A missing file yields [`AppConfig::default`]. An unreadable or malformed
/// file is an error.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    if !config_path.exists() {
        info!(path = %config_path.display(), "No config file, using defaults");
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// History and export locations after applying app-directory defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub data_file: PathBuf,
    pub export_dir: PathBuf,
}

/// Empty paths in the config fall back to the app data directory.
pub fn resolve_paths(config: &AppConfig, dirs: &AppDirs) -> ResolvedPaths {
    ResolvedPaths {
        data_file: non_empty_or(&config.history.data_file, || dirs.history_file()),
        export_dir: non_empty_or(&config.history.export_dir, || dirs.exports_dir()),
    }
}

fn non_empty_or(path: &Path, fallback: impl FnOnce() -> PathBuf) -> PathBuf {
    if path.as_os_str().is_empty() {
        fallback()
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn dirs() -> AppDirs {
        AppDirs {
            app_data_root: PathBuf::from("/data/pastecycle"),
        }
    }

    #[test]
    fn test_load_config_reads_valid_toml() {
        let toml_content = r#"
            [history]
            max_history = 25
            data_file = "/tmp/history.json"

            [hotkeys]
            paste = "Ctrl+Shift+V"
            quick_paste_enabled = true

            [monitor]
            poll_interval_ms = 250

            [dispatch]
            settle_delay_ms = 120
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config.history.max_history, 25);
        assert_eq!(config.history.data_file, PathBuf::from("/tmp/history.json"));
        assert_eq!(config.hotkeys.paste.as_str(), "ctrl+shift+v");
        assert!(config.hotkeys.quick_paste_enabled);
        assert_eq!(config.monitor.poll_interval_ms, 250);
        assert_eq!(config.dispatch.settle_delay_ms, 120);
        // untouched keys keep their defaults
        assert_eq!(config.dispatch.keystroke_pause_ms, 50);
    }

    #[test]
    fn test_load_config_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_config_rejects_malformed_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[history\nmax_history = ").unwrap();

        let err = load_config(temp_file.path().to_path_buf()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn empty_paths_resolve_under_app_data_root() {
        let paths = resolve_paths(&AppConfig::default(), &dirs());
        assert_eq!(
            paths.data_file,
            PathBuf::from("/data/pastecycle/clipboard_history.json")
        );
        assert_eq!(paths.export_dir, PathBuf::from("/data/pastecycle/exports"));
    }

    #[test]
    fn configured_paths_win() {
        let mut config = AppConfig::default();
        config.history.export_dir = PathBuf::from("/srv/exports");

        let paths = resolve_paths(&config, &dirs());
        assert_eq!(paths.export_dir, PathBuf::from("/srv/exports"));
        assert!(paths.data_file.starts_with("/data/pastecycle"));
    }
}
