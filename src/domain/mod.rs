//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no external dependencies.
//! All types are serializable and encoding is deterministic.

mod assessment;
mod features;
mod patient;

pub use assessment::{ContributionTable, FamilyContribution, RiskAssessment, SessionContext};
pub use features::{
    EncodedFeatures, MixedView, OneHotView, CONTINUOUS_FEATURE_NAMES, MIXED_FEATURE_NAMES,
    ONE_HOT_FEATURE_NAMES,
};
pub use patient::{
    BmiCategory, EncodingError, Gender, PatientRecord, ResidenceType, SmokingStatus, WorkType,
};

pub(crate) use assessment::uuid_v4;
