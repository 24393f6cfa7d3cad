mod config;
mod state;

pub use config::{Config, NotificationsConfig, UiConfig};
pub use state::StateDb;

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/focusloop[-dev]/` based on FOCUSLOOP_ENV.
///
/// Set FOCUSLOOP_ENV=dev to use a development data directory, or
/// FOCUSLOOP_DATA_DIR to point somewhere else entirely (used by the CLI
/// integration tests).
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = if let Ok(dir) = std::env::var("FOCUSLOOP_DATA_DIR") {
        PathBuf::from(dir)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");
        let env = std::env::var("FOCUSLOOP_ENV").unwrap_or_else(|_| "production".to_string());
        if env == "dev" {
            base_dir.join("focusloop-dev")
        } else {
            base_dir.join("focusloop")
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}
