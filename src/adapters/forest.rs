//! Tree ensemble adapters over dense features: random forest folds and the
//! dense gradient boosting error regressor.
//!
//! Trees are exported in flat-array form (children, split feature,
//! threshold, node value); a leaf is marked by `children_left[i] == -1`.
//! Forest leaf values are positive-class fractions; boosting leaf values
//! are raw regression contributions.

use serde::{Deserialize, Serialize};

use crate::ports::{dense_input, ensure_finite, Model, ModelInput, PredictionError};

/// One decision tree in flat-array form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl ExportedTree {
    /// Check internal consistency against a feature count.
    fn check(&self, n_features: usize) -> Result<(), String> {
        let n = self.children_left.len();
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err("tree node arrays have inconsistent lengths".into());
        }
        if n == 0 {
            return Err("tree has no nodes".into());
        }
        for i in 0..n {
            let leaf = self.children_left[i] < 0;
            if leaf != (self.children_right[i] < 0) {
                return Err(format!("node {i} has exactly one child"));
            }
            if leaf {
                continue;
            }
            let (l, r) = (self.children_left[i], self.children_right[i]);
            if l as usize >= n || r as usize >= n {
                return Err(format!("node {i} child index out of range"));
            }
            // The flat-array export lists children after their parent;
            // anything else could cycle and never reach a leaf.
            if l <= i as i64 || r <= i as i64 {
                return Err(format!("node {i} child index does not advance"));
            }
            let f = self.feature[i];
            if f < 0 || f as usize >= n_features {
                return Err(format!("node {i} split feature {f} out of range"));
            }
        }
        Ok(())
    }

    /// Walk the tree to a leaf value.
    fn decide(&self, features: &[f64]) -> f64 {
        let mut node = 0usize;
        while self.children_left[node] >= 0 {
            let f = self.feature[node] as usize;
            node = if features[f] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        self.value[node]
    }
}

/// Random forest parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedForest {
    pub feature_names: Vec<String>,
    pub trees: Vec<ExportedTree>,
}

/// One random forest fold; the positive-class probability is the mean of
/// leaf fractions across trees.
pub struct RandomForestModel {
    name: String,
    params: ExportedForest,
}

impl RandomForestModel {
    /// Build the model, validating every tree.
    ///
    /// # Errors
    /// Returns a shape description if any tree is inconsistent.
    pub fn new(name: impl Into<String>, params: ExportedForest) -> Result<Self, String> {
        if params.trees.is_empty() {
            return Err("forest has no trees".into());
        }
        let n = params.feature_names.len();
        for (i, tree) in params.trees.iter().enumerate() {
            tree.check(n).map_err(|e| format!("tree {i}: {e}"))?;
        }
        Ok(Self {
            name: name.into(),
            params,
        })
    }

    /// Number of features this fold was trained on.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.params.feature_names.len()
    }
}

impl Model for RandomForestModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict_probability(&self, input: &ModelInput<'_>) -> Result<f64, PredictionError> {
        let features = dense_input(&self.name, input, self.feature_count())?;

        let sum: f64 = self.params.trees.iter().map(|t| t.decide(features)).sum();
        ensure_finite(&self.name, sum / self.params.trees.len() as f64)
    }
}

/// Gradient boosting regressor parameters exported by the training
/// pipeline: staged trees around an initial constant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedGradientBoosting {
    pub feature_names: Vec<String>,
    pub init: f64,
    pub learning_rate: f64,
    pub trees: Vec<ExportedTree>,
}

/// The dense gradient boosting error regressor.
pub struct GradientBoostingRegressorModel {
    name: String,
    params: ExportedGradientBoosting,
}

impl GradientBoostingRegressorModel {
    /// Build the model, validating every tree.
    ///
    /// # Errors
    /// Returns a shape description if any tree is inconsistent.
    pub fn new(name: impl Into<String>, params: ExportedGradientBoosting) -> Result<Self, String> {
        if params.trees.is_empty() {
            return Err("boosting ensemble has no trees".into());
        }
        let n = params.feature_names.len();
        for (i, tree) in params.trees.iter().enumerate() {
            tree.check(n).map_err(|e| format!("tree {i}: {e}"))?;
        }
        Ok(Self {
            name: name.into(),
            params,
        })
    }

    /// Number of features this model was trained on.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.params.feature_names.len()
    }
}

impl Model for GradientBoostingRegressorModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict_scalar(&self, input: &ModelInput<'_>) -> Result<f64, PredictionError> {
        let features = dense_input(&self.name, input, self.feature_count())?;

        let staged: f64 = self.params.trees.iter().map(|t| t.decide(features)).sum();
        ensure_finite(&self.name, self.params.init + self.params.learning_rate * staged)
    }
}
