use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::pipeline::vector::FEATURE_VERSION;

/// Single-node decision tree used as a boosting round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stump {
    /// Feature index used for the split.
    pub feature_index: u16,
    /// Threshold in feature units.
    pub threshold: f32,
    /// Contribution for `feature <= threshold`.
    pub left_value: f32,
    /// Contribution for `feature > threshold`.
    pub right_value: f32,
}

impl Stump {
    /// Contribution of this stump for a feature vector.
    pub fn predict(&self, features: &[f32]) -> f32 {
        let idx = self.feature_index as usize;
        let value = features.get(idx).copied().unwrap_or(0.0);
        if value <= self.threshold {
            self.left_value
        } else {
            self.right_value
        }
    }
}

/// Pre-fitted gradient-boosted stump regressor.
///
/// The model file is the only artifact this crate consumes; nothing here
/// trains or refits. Predictions sum the base value with the learning-rate
/// scaled contribution of every boosting round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbdtRegressor {
    /// Model format version.
    pub model_version: i64,
    /// Feature vector version expected by this model.
    pub feat_version: i64,
    /// Number of `f32` values per feature vector.
    pub feature_len_f32: usize,
    /// Learning rate applied to each stump contribution.
    pub learning_rate: f32,
    /// Base prediction before any boosting round.
    pub init_value: f32,
    /// One stump per boosting round.
    pub stumps: Vec<Stump>,
}

impl GbdtRegressor {
    /// Validate structural invariants of the model.
    ///
    /// A model fitted against a different feature vector layout is rejected
    /// here, before it can silently mispredict.
    pub fn validate(&self) -> Result<(), String> {
        if self.feat_version != FEATURE_VERSION {
            return Err(format!(
                "Unsupported feat_version {} (expected {FEATURE_VERSION})",
                self.feat_version
            ));
        }
        if self.feature_len_f32 == 0 {
            return Err("Model must declare a non-zero feature width".to_string());
        }
        if !self.learning_rate.is_finite() {
            return Err("learning_rate must be finite".to_string());
        }
        if !self.init_value.is_finite() {
            return Err("init_value must be finite".to_string());
        }
        for (round_idx, stump) in self.stumps.iter().enumerate() {
            if (stump.feature_index as usize) >= self.feature_len_f32 {
                return Err(format!(
                    "Round {round_idx} splits on feature {} but the model width is {}",
                    stump.feature_index, self.feature_len_f32
                ));
            }
        }
        Ok(())
    }

    /// Load a model from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self, String> {
        let bytes = std::fs::read(path).map_err(|err| err.to_string())?;
        let model: Self = serde_json::from_slice(&bytes).map_err(|err| err.to_string())?;
        model.validate()?;
        Ok(model)
    }

    /// Load the bundled default sales model.
    pub fn bundled() -> Result<Self, String> {
        let model: Self = serde_json::from_str(super::BUNDLED_MODEL_JSON)
            .map_err(|err| format!("Bundled model is invalid: {err}"))?;
        model.validate()?;
        Ok(model)
    }

    /// Predict the regression target for one feature vector.
    pub fn predict(&self, features: &[f32]) -> f32 {
        let mut value = self.init_value;
        for stump in &self.stumps {
            value += self.learning_rate * stump.predict(features);
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_round_model() -> GbdtRegressor {
        GbdtRegressor {
            model_version: 1,
            feat_version: 1,
            feature_len_f32: 2,
            learning_rate: 0.5,
            init_value: 100.0,
            stumps: vec![
                Stump {
                    feature_index: 0,
                    threshold: 1.0,
                    left_value: -10.0,
                    right_value: 10.0,
                },
                Stump {
                    feature_index: 1,
                    threshold: 0.0,
                    left_value: 0.0,
                    right_value: 4.0,
                },
            ],
        }
    }

    #[test]
    fn stump_predict_branches() {
        let stump = Stump {
            feature_index: 0,
            threshold: 0.5,
            left_value: -1.0,
            right_value: 2.0,
        };
        assert_eq!(stump.predict(&[0.0]), -1.0);
        assert_eq!(stump.predict(&[0.5]), -1.0);
        assert_eq!(stump.predict(&[0.6]), 2.0);
    }

    #[test]
    fn prediction_sums_scaled_rounds() {
        let model = two_round_model();
        // 100 + 0.5 * (-10) + 0.5 * 0 = 95
        assert_eq!(model.predict(&[0.0, 0.0]), 95.0);
        // 100 + 0.5 * 10 + 0.5 * 4 = 107
        assert_eq!(model.predict(&[2.0, 1.0]), 107.0);
    }

    #[test]
    fn validate_rejects_unknown_feature_version() {
        let mut model = two_round_model();
        model.feat_version = 2;
        let err = model.validate().unwrap_err();
        assert!(err.contains("feat_version 2"));
    }

    #[test]
    fn validate_rejects_out_of_width_splits() {
        let mut model = two_round_model();
        model.stumps[1].feature_index = 9;
        let err = model.validate().unwrap_err();
        assert!(err.contains("feature 9"));
    }

    #[test]
    fn bundled_model_validates_and_predicts() {
        let model = GbdtRegressor::bundled().unwrap();
        assert_eq!(model.feature_len_f32, 6);
        let value = model.predict(&[10.0, 45.0, 12.0, 1.0, 0.0, 450.0]);
        assert!(value.is_finite());
    }
}
