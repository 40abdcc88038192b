//! Uniform prediction calls over the loaded model.

use std::sync::Arc;

use super::PipelineError;
use crate::ml::GbdtRegressor;

/// Wraps one pre-fitted regression model behind uniform single and batch
/// prediction calls.
///
/// The model is loaded once at startup and shared read-only for the process
/// lifetime; cloning the engine clones the handle, not the model. Width
/// mismatches are rejected before the model is invoked and never retried,
/// since a mismatch is a schema defect rather than a transient fault.
#[derive(Debug, Clone)]
pub struct PredictionEngine {
    model: Arc<GbdtRegressor>,
}

impl PredictionEngine {
    /// Take ownership of a loaded model.
    pub fn new(model: GbdtRegressor) -> Self {
        Self {
            model: Arc::new(model),
        }
    }

    /// Feature width the model expects.
    pub fn feature_len(&self) -> usize {
        self.model.feature_len_f32
    }

    /// Predict the sales value for one feature vector.
    pub fn predict_one(&self, features: &[f32]) -> Result<f32, PipelineError> {
        self.check_width(features)?;
        Ok(self.model.predict(features))
    }

    /// Predict one sales value per row, index-aligned with the input.
    ///
    /// Every row is width-checked before the first prediction runs, so a
    /// malformed batch never produces partial results.
    pub fn predict_batch(&self, rows: &[Vec<f32>]) -> Result<Vec<f32>, PipelineError> {
        for row in rows {
            self.check_width(row)?;
        }
        Ok(rows.iter().map(|row| self.model.predict(row)).collect())
    }

    fn check_width(&self, features: &[f32]) -> Result<(), PipelineError> {
        if features.len() != self.model.feature_len_f32 {
            return Err(PipelineError::ModelInput {
                expected: self.model.feature_len_f32,
                got: features.len(),
            });
        }
        Ok(())
    }
}
