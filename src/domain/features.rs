//! Feature views derived from one patient record.
//!
//! The model families were trained on two encodings of the same frame: a
//! fully dummy-encoded numeric frame and a mixed frame that keeps work type
//! and smoking status as raw category labels. Column order matters; it
//! matches the training frames exactly.

use serde::{Deserialize, Serialize};

use super::patient::{Gender, PatientRecord, ResidenceType, SmokingStatus, WorkType};

/// Fully dummy-encoded numeric view of a patient record.
///
/// Baseline categories (all indicator columns zero): Government work,
/// smoking status Unknown, gender Female, Rural residence, never married.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotView {
    pub age: f64,
    pub hypertension: f64,
    pub heart_disease: f64,
    pub avg_glucose_level: f64,
    pub bmi: f64,
    pub gender_male: f64,
    pub work_type_never_worked: f64,
    pub work_type_private: f64,
    pub work_type_self_employed: f64,
    pub work_type_children: f64,
    pub ever_married_yes: f64,
    pub residence_type_urban: f64,
    pub smoking_status_formerly_smoked: f64,
    pub smoking_status_never_smoked: f64,
    pub smoking_status_smokes: f64,
}

/// Column names of [`OneHotView`] in training-frame order.
pub const ONE_HOT_FEATURE_NAMES: [&str; 15] = [
    "age",
    "hypertension",
    "heart_disease",
    "avg_glucose_level",
    "bmi",
    "gender_Male",
    "work_type_Never_worked",
    "work_type_Private",
    "work_type_Self-employed",
    "work_type_children",
    "ever_married_Yes",
    "Residence_type_Urban",
    "smoking_status_formerly smoked",
    "smoking_status_never smoked",
    "smoking_status_smokes",
];

/// Continuous columns scored by the SVM and naive Bayes families.
pub const CONTINUOUS_FEATURE_NAMES: [&str; 3] = ["age", "avg_glucose_level", "bmi"];

impl OneHotView {
    /// Convert the view to a vector in training-frame column order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        vec![
            self.age,
            self.hypertension,
            self.heart_disease,
            self.avg_glucose_level,
            self.bmi,
            self.gender_male,
            self.work_type_never_worked,
            self.work_type_private,
            self.work_type_self_employed,
            self.work_type_children,
            self.ever_married_yes,
            self.residence_type_urban,
            self.smoking_status_formerly_smoked,
            self.smoking_status_never_smoked,
            self.smoking_status_smokes,
        ]
    }

    /// The continuous columns only, in [`CONTINUOUS_FEATURE_NAMES`] order.
    #[must_use]
    pub fn continuous(&self) -> [f64; 3] {
        [self.age, self.avg_glucose_level, self.bmi]
    }

    /// All columns except `work_type_Never_worked`.
    ///
    /// The random forest folds were trained without this engineered column.
    /// This is a quirk of those artifacts and is reproduced exactly.
    #[must_use]
    pub fn without_never_worked(&self) -> Vec<f64> {
        let mut v = self.to_vec();
        v.remove(6);
        v
    }
}

/// Mixed view: work type and smoking status stay as raw category labels for
/// the model family that consumes categorical fields natively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixedView {
    pub age: f64,
    pub hypertension: f64,
    pub heart_disease: f64,
    pub work_type: String,
    pub avg_glucose_level: f64,
    pub bmi: f64,
    pub smoking_status: String,
    pub gender_male: f64,
    pub ever_married_yes: f64,
    pub residence_type_urban: f64,
}

impl MixedView {
    /// Look up a numeric column by its training-frame name.
    #[must_use]
    pub fn numeric(&self, name: &str) -> Option<f64> {
        match name {
            "age" => Some(self.age),
            "hypertension" => Some(self.hypertension),
            "heart_disease" => Some(self.heart_disease),
            "avg_glucose_level" => Some(self.avg_glucose_level),
            "bmi" => Some(self.bmi),
            "gender_Male" => Some(self.gender_male),
            "ever_married_Yes" => Some(self.ever_married_yes),
            "Residence_type_Urban" => Some(self.residence_type_urban),
            _ => None,
        }
    }

    /// Look up a categorical column by its training-frame name.
    #[must_use]
    pub fn categorical(&self, name: &str) -> Option<&str> {
        match name {
            "work_type" => Some(&self.work_type),
            "smoking_status" => Some(&self.smoking_status),
            _ => None,
        }
    }

    /// Whether the named column is a numeric mixed-view column.
    #[must_use]
    pub fn is_numeric_column(name: &str) -> bool {
        matches!(
            name,
            "age"
                | "hypertension"
                | "heart_disease"
                | "avg_glucose_level"
                | "bmi"
                | "gender_Male"
                | "ever_married_Yes"
                | "Residence_type_Urban"
        )
    }

    /// Whether the named column is a categorical mixed-view column.
    #[must_use]
    pub fn is_categorical_column(name: &str) -> bool {
        matches!(name, "work_type" | "smoking_status")
    }
}

/// Column names of [`MixedView`] in training-frame order.
pub const MIXED_FEATURE_NAMES: [&str; 10] = [
    "age",
    "hypertension",
    "heart_disease",
    "work_type",
    "avg_glucose_level",
    "bmi",
    "smoking_status",
    "gender_Male",
    "ever_married_Yes",
    "Residence_type_Urban",
];

/// The two co-derived, immutable feature views of one patient record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedFeatures {
    pub one_hot: OneHotView,
    pub mixed: MixedView,
}

impl PatientRecord {
    /// Encode this record into the two feature views the models expect.
    ///
    /// Pure and deterministic; identical records always produce identical
    /// views.
    #[must_use]
    pub fn encode(&self) -> EncodedFeatures {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };

        let one_hot = OneHotView {
            age: f64::from(self.age),
            hypertension: flag(self.hypertension),
            heart_disease: flag(self.heart_disease),
            avg_glucose_level: f64::from(self.avg_glucose_level),
            bmi: f64::from(self.bmi),
            gender_male: flag(self.gender == Gender::Male),
            work_type_never_worked: flag(self.work_type == WorkType::NeverWorked),
            work_type_private: flag(self.work_type == WorkType::Private),
            work_type_self_employed: flag(self.work_type == WorkType::SelfEmployed),
            work_type_children: flag(self.work_type == WorkType::Child),
            ever_married_yes: flag(self.ever_married),
            residence_type_urban: flag(self.residence_type == ResidenceType::Urban),
            smoking_status_formerly_smoked: flag(
                self.smoking_status == SmokingStatus::FormerlySmoked,
            ),
            smoking_status_never_smoked: flag(self.smoking_status == SmokingStatus::NeverSmoked),
            smoking_status_smokes: flag(self.smoking_status == SmokingStatus::Smokes),
        };

        let mixed = MixedView {
            age: one_hot.age,
            hypertension: one_hot.hypertension,
            heart_disease: one_hot.heart_disease,
            work_type: self.work_type.training_label().to_string(),
            avg_glucose_level: one_hot.avg_glucose_level,
            bmi: one_hot.bmi,
            smoking_status: self.smoking_status.training_label().to_string(),
            gender_male: one_hot.gender_male,
            ever_married_yes: one_hot.ever_married_yes,
            residence_type_urban: one_hot.residence_type_urban,
        };

        EncodedFeatures { one_hot, mixed }
    }
}
