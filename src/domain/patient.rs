//! Patient record types for stroke risk prediction.
//!
//! Field domains follow the training cohort of the frozen model artifacts;
//! the categorical labels and their baseline categories are an external
//! contract tied to those artifacts and must not be redesigned.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for encoding patient input.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("Unknown {field} value: '{value}'")]
    UnknownCategory { field: &'static str, value: String },
}

/// Patient gender as captured by the input form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

/// Residence type of the patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResidenceType {
    Urban,
    Rural,
}

/// Patient work type.
///
/// `Government` is the dummy-encoding baseline: it maps to all-zero
/// work-type indicator columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkType {
    Child,
    Government,
    NeverWorked,
    Private,
    SelfEmployed,
}

impl WorkType {
    /// Raw category label used by the categorical-native model family.
    #[must_use]
    pub fn training_label(&self) -> &'static str {
        match self {
            Self::Child => "children",
            Self::Government => "Govt_job",
            Self::NeverWorked => "Never_worked",
            Self::Private => "Private",
            Self::SelfEmployed => "Self-employed",
        }
    }
}

/// Patient smoking status.
///
/// `Unknown` is the dummy-encoding baseline: it maps to all-zero
/// smoking indicator columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmokingStatus {
    NeverSmoked,
    FormerlySmoked,
    Smokes,
    Unknown,
}

impl SmokingStatus {
    /// Raw category label used by the categorical-native model family.
    #[must_use]
    pub fn training_label(&self) -> &'static str {
        match self {
            Self::NeverSmoked => "never smoked",
            Self::FormerlySmoked => "formerly smoked",
            Self::Smokes => "smokes",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
        }
    }
}

impl fmt::Display for ResidenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Urban => write!(f, "Urban"),
            Self::Rural => write!(f, "Rural"),
        }
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Child => write!(f, "Child"),
            Self::Government => write!(f, "Government"),
            Self::NeverWorked => write!(f, "Never worked"),
            Self::Private => write!(f, "Private"),
            Self::SelfEmployed => write!(f, "Self-employed"),
        }
    }
}

impl fmt::Display for SmokingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NeverSmoked => write!(f, "Never Smoked"),
            Self::FormerlySmoked => write!(f, "Formerly Smoked"),
            Self::Smokes => write!(f, "Smokes"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

impl FromStr for Gender {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Self::Male),
            "Female" => Ok(Self::Female),
            other => Err(EncodingError::UnknownCategory {
                field: "gender",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for ResidenceType {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Urban" => Ok(Self::Urban),
            "Rural" => Ok(Self::Rural),
            other => Err(EncodingError::UnknownCategory {
                field: "residence_type",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for WorkType {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Child" => Ok(Self::Child),
            "Government" => Ok(Self::Government),
            "Never worked" => Ok(Self::NeverWorked),
            "Private" => Ok(Self::Private),
            "Self-employed" => Ok(Self::SelfEmployed),
            other => Err(EncodingError::UnknownCategory {
                field: "work_type",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for SmokingStatus {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Never Smoked" => Ok(Self::NeverSmoked),
            "Formerly Smoked" => Ok(Self::FormerlySmoked),
            "Smokes" => Ok(Self::Smokes),
            "Unknown" => Ok(Self::Unknown),
            other => Err(EncodingError::UnknownCategory {
                field: "smoking_status",
                value: other.to_string(),
            }),
        }
    }
}

/// One validated patient record, the single input entity of the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Age in years (0-100; 0-16 when `work_type` is Child)
    pub age: u32,

    /// Body mass index (5-45)
    pub bmi: u32,

    /// Average glucose level in mg/dL (50-400)
    pub avg_glucose_level: u32,

    /// Doctor-diagnosed hypertension
    pub hypertension: bool,

    /// Doctor-diagnosed heart disease
    pub heart_disease: bool,

    pub gender: Gender,

    pub ever_married: bool,

    pub residence_type: ResidenceType,

    pub work_type: WorkType,

    pub smoking_status: SmokingStatus,
}

impl PatientRecord {
    /// Validate that all fields are within expected ranges.
    ///
    /// Input collection normally enforces these bounds already; this is the
    /// core's own check so an out-of-contract value surfaces instead of
    /// silently feeding the models.
    ///
    /// # Errors
    /// Returns validation errors as a vector of strings.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.age > 100 {
            errors.push(format!("Age {} out of range [0, 100]", self.age));
        }
        match self.work_type {
            WorkType::Child => {
                if self.age > 16 {
                    errors.push(format!(
                        "Age {} out of range [0, 16] for work type Child",
                        self.age
                    ));
                }
            }
            _ => {
                if self.age < 17 {
                    errors.push(format!(
                        "Age {} out of range [17, 100] for work type {}",
                        self.age, self.work_type
                    ));
                }
            }
        }
        if !(5..=45).contains(&self.bmi) {
            errors.push(format!("BMI {} out of range [5, 45]", self.bmi));
        }
        if !(50..=400).contains(&self.avg_glucose_level) {
            errors.push(format!(
                "Average glucose level {} out of range [50, 400]",
                self.avg_glucose_level
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// BMI interpretation shown alongside the risk figure.
    #[must_use]
    pub fn bmi_category(&self) -> BmiCategory {
        BmiCategory::from_bmi(f64::from(self.bmi))
    }

    /// Whether the BMI reading is reliable at this age.
    ///
    /// The training cohort has no support for BMI above 45 past age 75, so
    /// the interpretation is flagged rather than reported as fact.
    #[must_use]
    pub fn bmi_is_reliable(&self) -> bool {
        !(self.bmi > 45 && self.age > 75)
    }
}

/// BMI classification bands reported with the assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    /// BMI at or below 10, outside any clinical band
    TooLow,
    /// BMI below 18.5
    Underweight,
    /// BMI 18.5 to 25
    Normal,
    /// BMI 25 to 30
    Overweight,
    /// BMI 30 to 35
    ModerateObesity,
    /// BMI 35 to 40
    SevereObesity,
    /// BMI 40 and above
    ExtremeObesity,
}

impl BmiCategory {
    /// Classify a BMI reading.
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi <= 10.0 {
            Self::TooLow
        } else if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else if bmi < 35.0 {
            Self::ModerateObesity
        } else if bmi < 40.0 {
            Self::SevereObesity
        } else {
            Self::ExtremeObesity
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::TooLow => "BMI too low",
            Self::Underweight => "Underweight",
            Self::Normal => "Normal weight",
            Self::Overweight => "Overweight",
            Self::ModerateObesity => "Moderate obesity",
            Self::SevereObesity => "Severe obesity",
            Self::ExtremeObesity => "Extreme obesity",
        }
    }
}
