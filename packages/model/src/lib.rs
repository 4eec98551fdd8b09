#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Risk model adapter.
//!
//! Wraps the pre-trained linear regression consumed as an opaque
//! artifact: a JSON file carrying the feature names (in column order),
//! one coefficient per feature, and an intercept. Training lives
//! elsewhere; this crate only loads, validates, and scores.
//!
//! The artifact is validated against the compiled feature set once at
//! load, so a model/feature mismatch is a startup failure rather than a
//! per-query surprise.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use storm_map_geodata_models::RiskFeatureVector;
use thiserror::Error;

/// Fixed additive calibration applied to the raw model output.
///
/// Post-hoc calibration constant baked into the deployed model; the
/// served score is always `raw + CALIBRATION_OFFSET`, exactly.
pub const CALIBRATION_OFFSET: f64 = 0.5;

/// The model's input columns, in the order the artifact must declare them.
pub const FEATURE_NAMES: [&str; 3] = [
    "distance_to_coast_km",
    "hurricane_exposure_count",
    "svi_score",
];

/// Serialized regression artifact as written by the training pipeline.
#[derive(Debug, Clone, Deserialize)]
struct ModelArtifact {
    features: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
}

/// Errors from loading or validating the model artifact.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Artifact file could not be read.
    #[error("Failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact JSON could not be parsed.
    #[error("Failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    /// Artifact declares different features than the extractor produces.
    #[error("Model artifact features {actual:?} do not match expected {expected:?}")]
    FeatureMismatch {
        /// The feature names this build scores with.
        expected: Vec<String>,
        /// The feature names the artifact declares.
        actual: Vec<String>,
    },

    /// Coefficient count disagrees with the declared feature count.
    #[error("Model artifact has {coefficients} coefficients for {features} features")]
    ShapeMismatch {
        /// Number of declared features.
        features: usize,
        /// Number of coefficients.
        coefficients: usize,
    },
}

/// A validated, ready-to-score regression model.
#[derive(Debug, Clone)]
pub struct RiskModel {
    coefficients: [f64; 3],
    intercept: f64,
}

impl RiskModel {
    /// Loads and validates the artifact from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the file cannot be read, parsed, or if
    /// its declared features do not match [`FEATURE_NAMES`].
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let text = fs::read_to_string(path)?;
        let model = Self::from_json(&text)?;
        log::info!("Loaded risk model artifact from {}", path.display());
        Ok(model)
    }

    /// Parses and validates an artifact from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] on parse failure or feature mismatch.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let artifact: ModelArtifact = serde_json::from_str(json)?;

        if artifact.features.len() != artifact.coefficients.len() {
            return Err(ModelError::ShapeMismatch {
                features: artifact.features.len(),
                coefficients: artifact.coefficients.len(),
            });
        }

        if artifact.features != FEATURE_NAMES {
            return Err(ModelError::FeatureMismatch {
                expected: FEATURE_NAMES.iter().map(ToString::to_string).collect(),
                actual: artifact.features,
            });
        }

        Ok(Self {
            coefficients: [
                artifact.coefficients[0],
                artifact.coefficients[1],
                artifact.coefficients[2],
            ],
            intercept: artifact.intercept,
        })
    }

    /// Builds a model directly from coefficients and intercept.
    ///
    /// Coefficient order follows [`FEATURE_NAMES`].
    #[must_use]
    pub const fn from_parts(coefficients: [f64; 3], intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Scores a feature vector, applying the calibration offset.
    #[must_use]
    pub fn predict(&self, features: &RiskFeatureVector) -> f64 {
        let raw = self.coefficients[0] * features.distance_to_coast_km
            + self.coefficients[1] * f64::from(features.hurricane_exposure_count)
            + self.coefficients[2] * features.svi_score
            + self.intercept;
        raw + CALIBRATION_OFFSET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(distance: f64, count: u32, svi: f64) -> RiskFeatureVector {
        RiskFeatureVector {
            distance_to_coast_km: distance,
            hurricane_exposure_count: count,
            svi_score: svi,
        }
    }

    #[test]
    fn parses_valid_artifact() {
        let json = r#"{
            "features": ["distance_to_coast_km", "hurricane_exposure_count", "svi_score"],
            "coefficients": [-0.05, 0.3, 1.2],
            "intercept": 0.8
        }"#;
        let model = RiskModel::from_json(json).unwrap();
        let score = model.predict(&vector(0.0, 0, 0.0));
        assert!((score - (0.8 + CALIBRATION_OFFSET)).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_reordered_features() {
        let json = r#"{
            "features": ["svi_score", "hurricane_exposure_count", "distance_to_coast_km"],
            "coefficients": [1.2, 0.3, -0.05],
            "intercept": 0.8
        }"#;
        assert!(matches!(
            RiskModel::from_json(json),
            Err(ModelError::FeatureMismatch { .. })
        ));
    }

    #[test]
    fn rejects_coefficient_shape_mismatch() {
        let json = r#"{
            "features": ["distance_to_coast_km", "hurricane_exposure_count", "svi_score"],
            "coefficients": [1.0, 2.0],
            "intercept": 0.0
        }"#;
        assert!(matches!(
            RiskModel::from_json(json),
            Err(ModelError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn calibration_offset_is_exact() {
        let model = RiskModel::from_parts([0.5, 0.25, 1.0], 0.0);
        let features = vector(2.0, 4, 0.5);
        // raw = 0.5*2.0 + 0.25*4 + 1.0*0.5 = 2.5
        assert!((model.predict(&features) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_exposure_is_a_valid_input() {
        let model = RiskModel::from_parts([0.0, 1.0, 0.0], 0.0);
        assert!((model.predict(&vector(12.0, 0, 0.9)) - CALIBRATION_OFFSET).abs() < f64::EPSILON);
    }
}
