//! Age-based risk normalization.
//!
//! The raw ensemble probability is rescaled against an age-dependent
//! adjustment factor so the displayed figure is comparable across age
//! groups. The factor comes from the published calibration and is a fixed
//! part of the scoring contract.

use crate::domain::{PatientRecord, WorkType};

/// Adjustment factor for a child record. Children bypass the age curve.
pub const CHILD_ADJUSTMENT: f64 = 75.0;

/// Age-dependent normalization divisor.
///
/// `10000 / (age * 10 + 1)` for adults; a flat [`CHILD_ADJUSTMENT`] for
/// child records regardless of age. The `+ 1` keeps the divisor finite
/// even at age zero, so no input can divide by zero downstream.
#[must_use]
pub fn adjustment_factor(record: &PatientRecord) -> f64 {
    if record.work_type == WorkType::Child {
        CHILD_ADJUSTMENT
    } else {
        10000.0 / (f64::from(record.age) * 10.0 + 1.0)
    }
}

/// Rescale a raw ensemble probability into displayed risk points.
#[must_use]
pub fn normalize(raw: f64, record: &PatientRecord) -> f64 {
    raw * 100.0 / adjustment_factor(record)
}
