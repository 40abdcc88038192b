//! Pre-trained model loading and inference.
//!
//! The regression model is an opaque, already-fitted artifact. This module
//! only loads and invokes it; there is no training path in this crate.

pub mod gbdt;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use gbdt::{GbdtRegressor, Stump};

/// Identifier of the bundled default sales model.
pub const BUNDLED_MODEL_ID: &str = "sales_gbdt_v1";

pub(crate) const BUNDLED_MODEL_JSON: &str = include_str!("../../assets/sales_gbdt_v1.json");

/// Errors that may occur while resolving and loading a model artifact.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    /// A model file was named explicitly or via settings but failed to load.
    #[error("Failed to load model from {path}: {reason}")]
    File { path: PathBuf, reason: String },
    /// The models directory could not be resolved for a relative override.
    #[error("App directory error: {0}")]
    Dirs(#[from] crate::app_dirs::AppDirError),
    /// The embedded default model failed to parse or validate.
    #[error("Bundled model sales_gbdt_v1 failed to load: {0}")]
    Bundled(String),
}

/// Load the regression model used for predictions.
///
/// Precedence: an explicit path beats the settings override, which beats the
/// bundled default. A relative settings override names a file inside the app
/// models directory; explicit paths are taken as given. The caller loads
/// once at startup and shares the result for the process lifetime.
pub fn load_model(
    explicit: Option<&Path>,
    settings: &crate::config::Settings,
) -> Result<GbdtRegressor, ModelLoadError> {
    if let Some(path) = explicit {
        return load_file(path.to_path_buf());
    }
    if let Some(path) = &settings.model_path {
        let path = if path.is_relative() {
            crate::app_dirs::models_dir()?.join(path)
        } else {
            path.clone()
        };
        return load_file(path);
    }
    let model = GbdtRegressor::bundled().map_err(ModelLoadError::Bundled)?;
    tracing::debug!("Using bundled model {BUNDLED_MODEL_ID}");
    Ok(model)
}

fn load_file(path: PathBuf) -> Result<GbdtRegressor, ModelLoadError> {
    let model = GbdtRegressor::load_json(&path).map_err(|reason| ModelLoadError::File {
        path: path.clone(),
        reason,
    })?;
    tracing::info!("Loaded model from {}", path.display());
    Ok(model)
}
