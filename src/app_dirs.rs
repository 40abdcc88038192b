//! Application directory helpers anchored to a single `.salecast` folder.
//!
//! The helpers centralize where settings, models and log files live across
//! platforms, defaulting to the OS config directory (e.g., `%APPDATA%` on
//! Windows) and allowing a `SALECAST_CONFIG_HOME` override for tests or
//! portable setups.

use std::{
    path::PathBuf,
    sync::{LazyLock, Mutex},
};

use directories::BaseDirs;
use thiserror::Error;

/// Name of the application directory that lives under the OS config root.
pub const APP_DIR_NAME: &str = ".salecast";

static CONFIG_BASE_OVERRIDE: LazyLock<Mutex<Option<PathBuf>>> = LazyLock::new(|| Mutex::new(None));

/// Errors that can occur while resolving or preparing application directories.
#[derive(Debug, Error)]
pub enum AppDirError {
    /// No suitable base config directory could be resolved.
    #[error("No suitable base config directory available for application files")]
    NoBaseDir,
    /// Failed to create the application directory.
    #[error("Failed to create application directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Return the root `.salecast` directory, creating it if needed.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let base = config_base_dir().ok_or(AppDirError::NoBaseDir)?;
    let path = base.join(APP_DIR_NAME);
    std::fs::create_dir_all(&path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Return the logs directory inside the `.salecast` root, creating it if needed.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    let path = app_root_dir()?.join("logs");
    std::fs::create_dir_all(&path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Return the models directory inside the `.salecast` root, creating it if needed.
pub fn models_dir() -> Result<PathBuf, AppDirError> {
    let path = app_root_dir()?.join("models");
    std::fs::create_dir_all(&path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn config_base_dir() -> Option<PathBuf> {
    if let Some(path) = CONFIG_BASE_OVERRIDE
        .lock()
        .ok()
        .and_then(|guard| guard.clone())
    {
        return Some(path);
    }
    if let Ok(path) = std::env::var("SALECAST_CONFIG_HOME") {
        return Some(PathBuf::from(path));
    }
    BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Test-only redirection of the app root, shared by every module whose
/// tests touch the filesystem layout.
#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;
    use std::sync::{Mutex, MutexGuard};

    use super::CONFIG_BASE_OVERRIDE;

    static EXCLUSIVE: Mutex<()> = Mutex::new(());

    /// Points the app root at a temporary base for the guard's lifetime.
    ///
    /// Holds a process-wide lock so tests that redirect the root cannot
    /// interleave with each other.
    pub(crate) struct ConfigBaseGuard {
        _exclusive: MutexGuard<'static, ()>,
    }

    impl ConfigBaseGuard {
        pub(crate) fn set(path: PathBuf) -> Self {
            let exclusive = EXCLUSIVE.lock().unwrap_or_else(|err| err.into_inner());
            let mut guard = CONFIG_BASE_OVERRIDE
                .lock()
                .expect("config base override mutex poisoned");
            *guard = Some(path);
            Self {
                _exclusive: exclusive,
            }
        }
    }

    impl Drop for ConfigBaseGuard {
        fn drop(&mut self) {
            let mut guard = CONFIG_BASE_OVERRIDE
                .lock()
                .expect("config base override mutex poisoned");
            *guard = None;
        }
    }
}
