use std::fs;
use std::path::Path;

use anyhow::Context;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{GymError, GymResult};
use crate::models::{ChurnFeatureRecord, FEATURE_COUNT};

/// Probabilistic classifier scoring the positive ("churned") class.
///
/// Implementations are loaded once at startup and shared read-only across
/// requests.
pub trait ChurnClassifier: Send + Sync {
    fn model_version(&self) -> &str;

    /// Probability in `[0, 1]` that the member described by `features` churns.
    fn predict_proba(&self, features: &Array1<f64>) -> GymResult<f64>;
}

/// Feature scaling for normalization
#[derive(Debug, Clone)]
pub struct FeatureScaler {
    pub means: Array1<f64>,
    pub stds: Array1<f64>,
}

impl FeatureScaler {
    /// Transform a single feature vector
    pub fn transform_single(&self, features: &Array1<f64>) -> Array1<f64> {
        (features - &self.means) / &self.stds
    }
}

/// On-disk form of a trained logistic regression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChurnModelArtifact {
    pub model_version: String,
    pub feature_names: Vec<String>,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub scaler: Option<ScalerArtifact>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerArtifact {
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
}

/// Logistic regression over the four attendance features.
#[derive(Debug, Clone)]
pub struct LogisticChurnModel {
    model_version: String,
    intercept: f64,
    coefficients: Array1<f64>,
    scaler: Option<FeatureScaler>,
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

impl LogisticChurnModel {
    pub fn new(model_version: impl Into<String>, intercept: f64, coefficients: [f64; FEATURE_COUNT]) -> Self {
        Self {
            model_version: model_version.into(),
            intercept,
            coefficients: Array1::from(coefficients.to_vec()),
            scaler: None,
        }
    }

    /// Build a model from a parsed artifact, checking that its shape matches
    /// the feature vector produced by [`ChurnFeatureRecord::to_ndarray`].
    pub fn from_artifact(artifact: ChurnModelArtifact) -> GymResult<Self> {
        if artifact.feature_names != ChurnFeatureRecord::feature_names() {
            return Err(GymError::Model(format!(
                "unexpected feature columns {:?}",
                artifact.feature_names
            )));
        }

        if artifact.coefficients.len() != FEATURE_COUNT {
            return Err(GymError::Model(format!(
                "expected {} coefficients, got {}",
                FEATURE_COUNT,
                artifact.coefficients.len()
            )));
        }

        if !artifact.intercept.is_finite() || !all_finite(&artifact.coefficients) {
            return Err(GymError::Model("non-finite model weights".to_string()));
        }

        let scaler = match artifact.scaler {
            Some(scaler) => {
                if scaler.means.len() != FEATURE_COUNT || scaler.stds.len() != FEATURE_COUNT {
                    return Err(GymError::Model("scaler shape mismatch".to_string()));
                }
                if !all_finite(&scaler.means)
                    || !all_finite(&scaler.stds)
                    || scaler.stds.iter().any(|s| *s == 0.0)
                {
                    return Err(GymError::Model(
                        "scaler needs finite means and non-zero standard deviations".to_string(),
                    ));
                }
                Some(FeatureScaler {
                    means: Array1::from(scaler.means),
                    stds: Array1::from(scaler.stds),
                })
            }
            None => None,
        };

        Ok(Self {
            model_version: artifact.model_version,
            intercept: artifact.intercept,
            coefficients: Array1::from(artifact.coefficients),
            scaler,
        })
    }

    pub fn from_json(json: &str) -> GymResult<Self> {
        let artifact: ChurnModelArtifact = serde_json::from_str(json)
            .map_err(|e| GymError::Model(format!("malformed model artifact: {}", e)))?;
        Self::from_artifact(artifact)
    }

    /// Read and validate the artifact at `path`.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read churn model from {}", path.display()))?;
        let model = Self::from_json(&json)
            .with_context(|| format!("Failed to load churn model from {}", path.display()))?;

        info!("Loaded churn model {} from {}", model.model_version, path.display());
        Ok(model)
    }
}

impl ChurnClassifier for LogisticChurnModel {
    fn model_version(&self) -> &str {
        &self.model_version
    }

    fn predict_proba(&self, features: &Array1<f64>) -> GymResult<f64> {
        if features.len() != FEATURE_COUNT {
            return Err(GymError::Model(format!(
                "expected {} features, got {}",
                FEATURE_COUNT,
                features.len()
            )));
        }
        if features.iter().any(|v| !v.is_finite()) {
            return Err(GymError::InvalidInput("non-finite feature value".to_string()));
        }

        let scaled = match &self.scaler {
            Some(scaler) => scaler.transform_single(features),
            None => features.clone(),
        };

        let logit = self.intercept + self.coefficients.dot(&scaled);
        Ok(1.0 / (1.0 + (-logit).exp()))
    }
}
