//! Categorical-native boosted tree adapters.
//!
//! The two boosted classifier folds and the boosted error regressor consume
//! the mixed view directly: tree splits address columns by name and may
//! split on a raw category label instead of a numeric threshold. The
//! exported document is a bias plus recursive trees; classifier output goes
//! through a sigmoid, regressor output is the raw score.

use serde::{Deserialize, Serialize};

use crate::adapters::linear::sigmoid;
use crate::domain::MixedView;
use crate::ports::{ensure_finite, mixed_input, Model, ModelInput, PredictionError};

/// One node of an exported boosted tree.
///
/// Numeric splits go left when `x <= threshold`; categorical splits go left
/// when the column equals `category`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoostedNode {
    Numeric {
        feature: String,
        threshold: f64,
        left: Box<BoostedNode>,
        right: Box<BoostedNode>,
    },
    Categorical {
        feature: String,
        category: String,
        left: Box<BoostedNode>,
        right: Box<BoostedNode>,
    },
    Leaf {
        value: f64,
    },
}

impl BoostedNode {
    /// Check that every split references a known mixed-view column of the
    /// right kind.
    fn check(&self) -> Result<(), String> {
        match self {
            Self::Leaf { .. } => Ok(()),
            Self::Numeric {
                feature,
                left,
                right,
                ..
            } => {
                if !MixedView::is_numeric_column(feature) {
                    return Err(format!("numeric split on unknown column '{feature}'"));
                }
                left.check()?;
                right.check()
            }
            Self::Categorical {
                feature,
                left,
                right,
                ..
            } => {
                if !MixedView::is_categorical_column(feature) {
                    return Err(format!("categorical split on unknown column '{feature}'"));
                }
                left.check()?;
                right.check()
            }
        }
    }

    /// Walk the tree to a leaf value.
    fn decide(&self, view: &MixedView, model: &str) -> Result<f64, PredictionError> {
        match self {
            Self::Leaf { value } => Ok(*value),
            Self::Numeric {
                feature,
                threshold,
                left,
                right,
            } => {
                let x = view
                    .numeric(feature)
                    .ok_or_else(|| PredictionError::UnknownFeature {
                        model: model.to_string(),
                        feature: feature.clone(),
                    })?;
                if x <= *threshold {
                    left.decide(view, model)
                } else {
                    right.decide(view, model)
                }
            }
            Self::Categorical {
                feature,
                category,
                left,
                right,
            } => {
                let label = view
                    .categorical(feature)
                    .ok_or_else(|| PredictionError::UnknownFeature {
                        model: model.to_string(),
                        feature: feature.clone(),
                    })?;
                if label == category {
                    left.decide(view, model)
                } else {
                    right.decide(view, model)
                }
            }
        }
    }
}

/// Boosted model parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedBoostedModel {
    pub feature_names: Vec<String>,
    pub bias: f64,
    pub trees: Vec<BoostedNode>,
}

impl ExportedBoostedModel {
    fn check(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("boosted model has no trees".into());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.check().map_err(|e| format!("tree {i}: {e}"))?;
        }
        Ok(())
    }

    fn score(&self, view: &MixedView, model: &str) -> Result<f64, PredictionError> {
        let mut score = self.bias;
        for tree in &self.trees {
            score += tree.decide(view, model)?;
        }
        Ok(score)
    }
}

/// One boosted classifier fold; emits a positive-class probability via a
/// sigmoid over the boosted score.
pub struct BoostedClassifierModel {
    name: String,
    params: ExportedBoostedModel,
}

impl BoostedClassifierModel {
    /// Build the model, validating every tree.
    ///
    /// # Errors
    /// Returns a shape description if any split is invalid.
    pub fn new(name: impl Into<String>, params: ExportedBoostedModel) -> Result<Self, String> {
        params.check()?;
        Ok(Self {
            name: name.into(),
            params,
        })
    }

    /// Number of mixed-view columns this fold was trained on.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.params.feature_names.len()
    }
}

impl Model for BoostedClassifierModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict_probability(&self, input: &ModelInput<'_>) -> Result<f64, PredictionError> {
        let view = mixed_input(&self.name, input)?;
        let score = self.params.score(view, &self.name)?;
        ensure_finite(&self.name, sigmoid(score))
    }
}

/// The boosted error regressor; emits the raw boosted score.
pub struct BoostedRegressorModel {
    name: String,
    params: ExportedBoostedModel,
}

impl BoostedRegressorModel {
    /// Build the model, validating every tree.
    ///
    /// # Errors
    /// Returns a shape description if any split is invalid.
    pub fn new(name: impl Into<String>, params: ExportedBoostedModel) -> Result<Self, String> {
        params.check()?;
        Ok(Self {
            name: name.into(),
            params,
        })
    }

    /// Number of mixed-view columns this model was trained on.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.params.feature_names.len()
    }
}

impl Model for BoostedRegressorModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict_scalar(&self, input: &ModelInput<'_>) -> Result<f64, PredictionError> {
        let view = mixed_input(&self.name, input)?;
        let score = self.params.score(view, &self.name)?;
        ensure_finite(&self.name, score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MIXED_FEATURE_NAMES;

    fn view() -> MixedView {
        MixedView {
            age: 40.0,
            hypertension: 0.0,
            heart_disease: 0.0,
            work_type: "Private".into(),
            avg_glucose_level: 100.0,
            bmi: 20.0,
            smoking_status: "never smoked".into(),
            gender_male: 1.0,
            ever_married_yes: 1.0,
            residence_type_urban: 1.0,
        }
    }

    fn mixed_names() -> Vec<String> {
        MIXED_FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect()
    }

    fn leaf(value: f64) -> Box<BoostedNode> {
        Box::new(BoostedNode::Leaf { value })
    }

    #[test]
    fn test_numeric_and_categorical_splits() {
        let params = ExportedBoostedModel {
            feature_names: mixed_names(),
            bias: 0.0,
            trees: vec![
                BoostedNode::Numeric {
                    feature: "age".into(),
                    threshold: 50.0,
                    left: leaf(-1.0),
                    right: leaf(1.0),
                },
                BoostedNode::Categorical {
                    feature: "smoking_status".into(),
                    category: "smokes".into(),
                    left: leaf(1.0),
                    right: leaf(-1.0),
                },
            ],
        };
        let model = BoostedClassifierModel::new("cb1", params).expect("valid shape");

        // age 40 -> -1, not a smoker -> -1, sigmoid(-2)
        let v = view();
        let p = model
            .predict_probability(&ModelInput::Mixed(&v))
            .expect("should predict");
        assert!((p - sigmoid(-2.0)).abs() < 1e-12);

        let mut smoker = view();
        smoker.smoking_status = "smokes".into();
        let p_smoker = model
            .predict_probability(&ModelInput::Mixed(&smoker))
            .expect("should predict");
        assert!(p_smoker > p);
    }

    #[test]
    fn test_regressor_returns_raw_score() {
        let params = ExportedBoostedModel {
            feature_names: mixed_names(),
            bias: 0.05,
            trees: vec![BoostedNode::Numeric {
                feature: "bmi".into(),
                threshold: 30.0,
                left: leaf(-0.02),
                right: leaf(0.10),
            }],
        };
        let model = BoostedRegressorModel::new("errCBR", params).expect("valid shape");

        let v = view();
        let out = model
            .predict_scalar(&ModelInput::Mixed(&v))
            .expect("should predict");
        assert!((out - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_split_column_rejected_at_build() {
        let params = ExportedBoostedModel {
            feature_names: mixed_names(),
            bias: 0.0,
            trees: vec![BoostedNode::Numeric {
                feature: "cholesterol".into(),
                threshold: 1.0,
                left: leaf(0.0),
                right: leaf(1.0),
            }],
        };
        assert!(BoostedClassifierModel::new("cb1", params).is_err());

        // Categorical split on a numeric column is also a shape error.
        let params = ExportedBoostedModel {
            feature_names: mixed_names(),
            bias: 0.0,
            trees: vec![BoostedNode::Categorical {
                feature: "age".into(),
                category: "old".into(),
                left: leaf(0.0),
                right: leaf(1.0),
            }],
        };
        assert!(BoostedClassifierModel::new("cb2", params).is_err());
    }

    #[test]
    fn test_dense_input_rejected() {
        let params = ExportedBoostedModel {
            feature_names: mixed_names(),
            bias: 0.0,
            trees: vec![BoostedNode::Leaf { value: 0.0 }],
        };
        let model = BoostedClassifierModel::new("cb1", params).expect("valid shape");
        let features = [1.0, 2.0];
        assert!(model
            .predict_probability(&ModelInput::Dense(&features))
            .is_err());
    }

    #[test]
    fn test_node_json_round_trip() {
        let node = BoostedNode::Categorical {
            feature: "work_type".into(),
            category: "children".into(),
            left: leaf(-0.5),
            right: Box::new(BoostedNode::Numeric {
                feature: "age".into(),
                threshold: 60.0,
                left: leaf(0.1),
                right: leaf(0.9),
            }),
        };
        let json = serde_json::to_string(&node).expect("serialize");
        let back: BoostedNode = serde_json::from_str(&json).expect("deserialize");
        assert!(back.check().is_ok());
        let v = MixedView {
            age: 70.0,
            hypertension: 0.0,
            heart_disease: 0.0,
            work_type: "Private".into(),
            avg_glucose_level: 100.0,
            bmi: 20.0,
            smoking_status: "Unknown".into(),
            gender_male: 0.0,
            ever_married_yes: 0.0,
            residence_type_urban: 0.0,
        };
        assert_eq!(back.decide(&v, "cb1").expect("decide"), 0.9);
    }
}
