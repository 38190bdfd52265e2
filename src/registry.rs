//! Model registry: the loaded-once, process-lifetime model set.
//!
//! Loads the 12 frozen artifacts from an [`ArtifactSource`], deserializes
//! each into its family adapter, and owns the resulting models immutably
//! for the rest of the process. A failed load is fatal to the session; no
//! fallback model is ever substituted and nothing is retried.
//!
//! Construct once at startup and share by `Arc`; there is no hidden global
//! cache.

use std::collections::HashMap;
use std::fmt;

use sha2::{Digest, Sha256};

use crate::adapters::artifact::ArtifactError;
use crate::adapters::bayes::{ExportedGaussianNb, GaussianNbModel};
use crate::adapters::boosted::{BoostedClassifierModel, BoostedRegressorModel, ExportedBoostedModel};
use crate::adapters::forest::{
    ExportedForest, ExportedGradientBoosting, GradientBoostingRegressorModel, RandomForestModel,
};
use crate::adapters::linear::{ExportedLinearModel, ExportedSvm, LogisticRegressionModel, SvmModel};
use crate::domain::{CONTINUOUS_FEATURE_NAMES, MIXED_FEATURE_NAMES, ONE_HOT_FEATURE_NAMES};
use crate::ports::{ArtifactSource, Model};

/// Error type for registry loading.
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("Artifact '{name}' unavailable: {source}")]
    Artifact {
        name: String,
        #[source]
        source: ArtifactError,
    },

    #[error("Artifact '{name}' failed to deserialize: {source}")]
    Deserialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Model '{name}' has an invalid shape: {reason}")]
    Shape { name: String, reason: String },
}

/// Names of the 12 expected artifacts.
pub const MODEL_NAMES: [&str; 12] = [
    "svm1", "svm2", "logit1", "logit2", "nbc1", "nbc2", "rf1", "rf2", "errGBR", "cb1", "cb2",
    "errCBR",
];

/// The forest folds were trained without the `work_type_Never_worked`
/// column; their trained shape is one short of the full frame.
const FOREST_FEATURE_COUNT: usize = ONE_HOT_FEATURE_NAMES.len() - 1;

/// Immutable registry of the loaded models, keyed by artifact name.
pub struct ModelRegistry {
    models: HashMap<String, Box<dyn Model>>,
    fingerprints: HashMap<String, String>,
}

impl ModelRegistry {
    /// Load all 12 artifacts from the given source.
    ///
    /// Fails fast on the first missing, unreadable, undeserializable or
    /// wrongly shaped artifact.
    ///
    /// # Errors
    /// Returns `ModelLoadError` describing the offending artifact.
    pub fn load<A>(source: &A) -> Result<Self, ModelLoadError>
    where
        A: ArtifactSource,
        A::Error: Into<ArtifactError>,
    {
        tracing::info!("Loading {} model artifacts...", MODEL_NAMES.len());

        let mut models: HashMap<String, Box<dyn Model>> = HashMap::new();
        let mut fingerprints = HashMap::new();

        for name in MODEL_NAMES {
            let bytes = source.fetch(name).map_err(|e| ModelLoadError::Artifact {
                name: name.to_string(),
                source: e.into(),
            })?;
            let fingerprint = compute_fingerprint(&bytes);

            let model = build_model(name, &bytes)?;

            tracing::info!(
                "Loaded model '{}' (fingerprint: {}, {} bytes)",
                name,
                fingerprint,
                bytes.len()
            );

            fingerprints.insert(name.to_string(), fingerprint);
            models.insert(name.to_string(), model);
        }

        tracing::info!("All model artifacts loaded");

        Ok(Self {
            models,
            fingerprints,
        })
    }

    /// Look up a loaded model by artifact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Model> {
        self.models.get(name).map(Box::as_ref)
    }

    /// Short SHA-256 fingerprint of the named artifact's bytes.
    #[must_use]
    pub fn fingerprint(&self, name: &str) -> Option<&str> {
        self.fingerprints.get(name).map(String::as_str)
    }

    /// Number of loaded models (always 12 after a successful load).
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.models.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ModelRegistry")
            .field("models", &names)
            .finish()
    }
}

fn build_model(name: &str, bytes: &[u8]) -> Result<Box<dyn Model>, ModelLoadError> {
    let shape_err = |reason: String| ModelLoadError::Shape {
        name: name.to_string(),
        reason,
    };

    match name {
        "svm1" | "svm2" => {
            let params: ExportedSvm = deserialize(name, bytes)?;
            let model = SvmModel::new(name, params).map_err(shape_err)?;
            check_feature_count(name, model.feature_count(), CONTINUOUS_FEATURE_NAMES.len())?;
            Ok(Box::new(model))
        }
        "logit1" | "logit2" => {
            let params: ExportedLinearModel = deserialize(name, bytes)?;
            let model = LogisticRegressionModel::new(name, params).map_err(shape_err)?;
            check_feature_count(name, model.feature_count(), ONE_HOT_FEATURE_NAMES.len())?;
            Ok(Box::new(model))
        }
        "nbc1" | "nbc2" => {
            let params: ExportedGaussianNb = deserialize(name, bytes)?;
            let model = GaussianNbModel::new(name, params).map_err(shape_err)?;
            check_feature_count(name, model.feature_count(), CONTINUOUS_FEATURE_NAMES.len())?;
            Ok(Box::new(model))
        }
        "rf1" | "rf2" => {
            let params: ExportedForest = deserialize(name, bytes)?;
            let model = RandomForestModel::new(name, params).map_err(shape_err)?;
            check_feature_count(name, model.feature_count(), FOREST_FEATURE_COUNT)?;
            Ok(Box::new(model))
        }
        "errGBR" => {
            let params: ExportedGradientBoosting = deserialize(name, bytes)?;
            let model = GradientBoostingRegressorModel::new(name, params).map_err(shape_err)?;
            check_feature_count(name, model.feature_count(), ONE_HOT_FEATURE_NAMES.len())?;
            Ok(Box::new(model))
        }
        "cb1" | "cb2" => {
            let params: ExportedBoostedModel = deserialize(name, bytes)?;
            let model = BoostedClassifierModel::new(name, params).map_err(shape_err)?;
            check_feature_count(name, model.feature_count(), MIXED_FEATURE_NAMES.len())?;
            Ok(Box::new(model))
        }
        "errCBR" => {
            let params: ExportedBoostedModel = deserialize(name, bytes)?;
            let model = BoostedRegressorModel::new(name, params).map_err(shape_err)?;
            check_feature_count(name, model.feature_count(), MIXED_FEATURE_NAMES.len())?;
            Ok(Box::new(model))
        }
        other => Err(ModelLoadError::Shape {
            name: other.to_string(),
            reason: "not one of the expected artifact names".into(),
        }),
    }
}

fn deserialize<'a, T: serde::Deserialize<'a>>(
    name: &str,
    bytes: &'a [u8],
) -> Result<T, ModelLoadError> {
    serde_json::from_slice(bytes).map_err(|source| ModelLoadError::Deserialize {
        name: name.to_string(),
        source,
    })
}

fn check_feature_count(name: &str, got: usize, expected: usize) -> Result<(), ModelLoadError> {
    if got == expected {
        Ok(())
    } else {
        Err(ModelLoadError::Shape {
            name: name.to_string(),
            reason: format!("trained on {got} features, expected {expected}"),
        })
    }
}

/// Short SHA-256 fingerprint of an artifact's bytes, for logging.
fn compute_fingerprint(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest[..8].iter().map(|b| format!("{b:02x}")).collect()
}
