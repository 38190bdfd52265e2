//! Test fixtures: a deterministic, fully loadable 12-artifact set.
//!
//! The fixture parameters are small hand-written stand-ins with the same
//! shapes as the production artifacts; tests that assert exact ensemble
//! numbers derive their expectations from these.

use crate::adapters::bayes::ExportedGaussianNb;
use crate::adapters::boosted::{BoostedNode, ExportedBoostedModel};
use crate::adapters::forest::{ExportedForest, ExportedGradientBoosting, ExportedTree};
use crate::adapters::linear::{ExportedLinearModel, ExportedScaler, ExportedSvm};
use crate::adapters::MemoryArtifactSource;
use crate::domain::{CONTINUOUS_FEATURE_NAMES, MIXED_FEATURE_NAMES, ONE_HOT_FEATURE_NAMES};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

fn continuous_names() -> Vec<String> {
    names(&CONTINUOUS_FEATURE_NAMES)
}

fn one_hot_names() -> Vec<String> {
    names(&ONE_HOT_FEATURE_NAMES)
}

fn forest_names() -> Vec<String> {
    let mut n = one_hot_names();
    n.remove(6); // work_type_Never_worked, absent from the forest frame
    n
}

fn mixed_names() -> Vec<String> {
    names(&MIXED_FEATURE_NAMES)
}

pub(crate) fn svm_artifact(fold: u8) -> ExportedSvm {
    let tweak = f64::from(fold) * 0.05;
    ExportedSvm {
        feature_names: continuous_names(),
        coefficients: vec![0.8 + tweak, 0.5, 0.3],
        intercept: -0.2,
        platt_a: -1.2,
        platt_b: -0.1,
        scaler: Some(ExportedScaler {
            mean: vec![45.0, 120.0, 25.0],
            std: vec![20.0, 50.0, 7.0],
        }),
    }
}

pub(crate) fn logit_artifact(fold: u8) -> ExportedLinearModel {
    let tweak = f64::from(fold) * 0.002;
    ExportedLinearModel {
        feature_names: one_hot_names(),
        coefficients: vec![
            0.06 + tweak,
            0.4,
            0.5,
            0.004,
            0.02,
            0.1,
            -0.3,
            0.05,
            0.1,
            -0.8,
            0.1,
            0.02,
            0.2,
            -0.1,
            0.3,
        ],
        intercept: -6.0,
        scaler: None,
    }
}

pub(crate) fn nbc_artifact(fold: u8) -> ExportedGaussianNb {
    let tweak = f64::from(fold);
    ExportedGaussianNb {
        feature_names: continuous_names(),
        class_prior: [0.95, 0.05],
        theta: [
            vec![40.0 + tweak, 100.0, 27.0],
            vec![65.0 + tweak, 130.0, 30.0],
        ],
        var: [
            vec![400.0, 2000.0, 60.0],
            vec![250.0, 3000.0, 50.0],
        ],
    }
}

/// A stump on `feature`: `x <= threshold` yields `left`, else `right`.
fn stump(feature: i64, threshold: f64, left: f64, right: f64) -> ExportedTree {
    ExportedTree {
        children_left: vec![1, -1, -1],
        children_right: vec![2, -1, -1],
        feature: vec![feature, -2, -2],
        threshold: vec![threshold, 0.0, 0.0],
        value: vec![0.0, left, right],
    }
}

pub(crate) fn forest_artifact(fold: u8) -> ExportedForest {
    let tweak = f64::from(fold) * 0.01;
    ExportedForest {
        feature_names: forest_names(),
        trees: vec![
            // age (column 0) and avg_glucose_level (column 3)
            stump(0, 55.0, 0.02 + tweak, 0.20),
            stump(3, 160.0, 0.03, 0.25),
        ],
    }
}

pub(crate) fn gbr_artifact() -> ExportedGradientBoosting {
    ExportedGradientBoosting {
        feature_names: one_hot_names(),
        init: 0.04,
        learning_rate: 0.1,
        trees: vec![stump(0, 60.0, -0.05, 0.30), stump(4, 32.0, -0.02, 0.10)],
    }
}

fn leaf(value: f64) -> Box<BoostedNode> {
    Box::new(BoostedNode::Leaf { value })
}

pub(crate) fn boosted_classifier_artifact(fold: u8) -> ExportedBoostedModel {
    let tweak = f64::from(fold) * 0.1;
    ExportedBoostedModel {
        feature_names: mixed_names(),
        bias: -3.0 + tweak,
        trees: vec![
            BoostedNode::Numeric {
                feature: "age".into(),
                threshold: 60.0,
                left: leaf(-0.4),
                right: leaf(0.8),
            },
            BoostedNode::Categorical {
                feature: "smoking_status".into(),
                category: "smokes".into(),
                left: leaf(0.5),
                right: leaf(-0.1),
            },
        ],
    }
}

/// Build the error regressor with a chosen bias so tests can steer the raw
/// predicted error (including negative values for the clamp).
pub(crate) fn boosted_regressor_artifact(bias: f64) -> ExportedBoostedModel {
    ExportedBoostedModel {
        feature_names: mixed_names(),
        bias,
        trees: vec![BoostedNode::Numeric {
            feature: "avg_glucose_level".into(),
            threshold: 200.0,
            left: leaf(0.01),
            right: leaf(0.08),
        }],
    }
}

/// Full 12-artifact in-memory source, deterministic across calls.
pub(crate) fn fixture_source() -> MemoryArtifactSource {
    fixture_source_with_err_bias(0.03)
}

/// Fixture source with a custom errCBR bias.
pub(crate) fn fixture_source_with_err_bias(bias: f64) -> MemoryArtifactSource {
    fn json<T: serde::Serialize>(value: &T) -> Vec<u8> {
        serde_json::to_vec(value).expect("fixture serializes")
    }

    let mut source = MemoryArtifactSource::new();
    source.insert("svm1", json(&svm_artifact(1)));
    source.insert("svm2", json(&svm_artifact(2)));
    source.insert("logit1", json(&logit_artifact(1)));
    source.insert("logit2", json(&logit_artifact(2)));
    source.insert("nbc1", json(&nbc_artifact(1)));
    source.insert("nbc2", json(&nbc_artifact(2)));
    source.insert("rf1", json(&forest_artifact(1)));
    source.insert("rf2", json(&forest_artifact(2)));
    source.insert("errGBR", json(&gbr_artifact()));
    source.insert("cb1", json(&boosted_classifier_artifact(1)));
    source.insert("cb2", json(&boosted_classifier_artifact(2)));
    source.insert("errCBR", json(&boosted_regressor_artifact(bias)));
    source
}
