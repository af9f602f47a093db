use thiserror::Error;

use crate::app_dirs::AppDirs;

pub trait AppDirsPort: Send + Sync {
    fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError>;
}

#[derive(Debug, Error)]
pub enum AppDirsError {
    #[error("data local directory is unavailable")]
    DataLocalDirUnavailable,
}
