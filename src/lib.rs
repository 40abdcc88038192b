//! Library exports for the salecast prediction tools.
/// Application directory helpers.
pub mod app_dirs;
/// Settings file load/save.
pub mod config;
/// Logging setup.
pub mod logging;
/// Pre-trained model loading and inference.
pub mod ml;
/// Feature derivation and prediction pipeline.
pub mod pipeline;
