use std::path::PathBuf;

/// Resolved application directories. Pure facts; nothing is created here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    pub app_data_root: PathBuf,
}

impl AppDirs {
    pub fn history_file(&self) -> PathBuf {
        self.app_data_root.join("clipboard_history.json")
    }

    pub fn config_file(&self) -> PathBuf {
        self.app_data_root.join("config.toml")
    }

    pub fn exports_dir(&self) -> PathBuf {
        self.app_data_root.join("exports")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.app_data_root.join("logs")
    }
}
