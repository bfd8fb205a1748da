//! Form state for the ten student metrics.
//!
//! The range table here is the single source for both the terminal client and
//! the browser page, which receives it rendered as JSON.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::PredictionResult;

pub const RETRY_MESSAGE: &str = "Prediction failed. Please try again.";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum MetricField {
    StudyHours,
    Attendance,
    PreviousGrade,
    ProjectScore,
    QuizAverage,
    StudyGroupHours,
    TutorialAttendance,
    SleepHours,
    StressLevel,
    ExtracurricularHours,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct Limits {
    pub min: f64,
    pub max: f64,
}

impl MetricField {
    pub const ALL: [MetricField; 10] = [
        MetricField::StudyHours,
        MetricField::Attendance,
        MetricField::PreviousGrade,
        MetricField::ProjectScore,
        MetricField::QuizAverage,
        MetricField::StudyGroupHours,
        MetricField::TutorialAttendance,
        MetricField::SleepHours,
        MetricField::StressLevel,
        MetricField::ExtracurricularHours,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MetricField::StudyHours => "studyHours",
            MetricField::Attendance => "attendance",
            MetricField::PreviousGrade => "previousGrade",
            MetricField::ProjectScore => "projectScore",
            MetricField::QuizAverage => "quizAverage",
            MetricField::StudyGroupHours => "studyGroupHours",
            MetricField::TutorialAttendance => "tutorialAttendance",
            MetricField::SleepHours => "sleepHours",
            MetricField::StressLevel => "stressLevel",
            MetricField::ExtracurricularHours => "extracurricularHours",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricField::StudyHours => "Study Hours",
            MetricField::Attendance => "Attendance",
            MetricField::PreviousGrade => "Previous Grade",
            MetricField::ProjectScore => "Project Score",
            MetricField::QuizAverage => "Quiz Average",
            MetricField::StudyGroupHours => "Study Group Hours",
            MetricField::TutorialAttendance => "Tutorial Attendance",
            MetricField::SleepHours => "Sleep Hours",
            MetricField::StressLevel => "Stress Level",
            MetricField::ExtracurricularHours => "Extracurricular Hours",
        }
    }

    pub fn limits(self) -> Limits {
        let (min, max) = match self {
            MetricField::StudyHours => (0.0, 168.0),
            MetricField::Attendance => (0.0, 100.0),
            MetricField::PreviousGrade => (0.0, 100.0),
            MetricField::ProjectScore => (0.0, 100.0),
            MetricField::QuizAverage => (0.0, 100.0),
            MetricField::StudyGroupHours => (0.0, 50.0),
            MetricField::TutorialAttendance => (0.0, 100.0),
            MetricField::SleepHours => (0.0, 24.0),
            MetricField::StressLevel => (1.0, 10.0),
            MetricField::ExtracurricularHours => (0.0, 40.0),
        };
        Limits { min, max }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl fmt::Display for MetricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Display of each variant is the message shown next to the form.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please enter a valid number")]
    InvalidNumber,

    #[error("Minimum value is {0}")]
    BelowMinimum(f64),

    #[error("Maximum value is {0}")]
    AboveMaximum(f64),
}

pub fn validate_field(field: MetricField, value: &str) -> Result<f64, ValidationError> {
    let number = value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or(ValidationError::InvalidNumber)?;

    let limits = field.limits();
    if number < limits.min {
        return Err(ValidationError::BelowMinimum(limits.min));
    }
    if number > limits.max {
        return Err(ValidationError::AboveMaximum(limits.max));
    }
    Ok(number)
}

/// The verbatim field mapping sent to the proxy.
pub type MetricInput = BTreeMap<MetricField, String>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitBlocked {
    #[error("a prediction request is already in flight")]
    InFlight,

    #[error("{field}: {error}")]
    Invalid {
        field: MetricField,
        error: ValidationError,
    },
}

#[derive(Debug, Clone, Default)]
pub struct PredictionForm {
    values: BTreeMap<MetricField, String>,
    errors: BTreeMap<MetricField, ValidationError>,
    in_flight: bool,
    result: Option<PredictionResult>,
    failure: Option<String>,
}

impl PredictionForm {
    pub fn new() -> Self {
        let values = MetricField::ALL
            .into_iter()
            .map(|field| (field, String::new()))
            .collect();
        Self {
            values,
            ..Self::default()
        }
    }

    /// Stores the raw string and revalidates only this field.
    pub fn set_field(&mut self, field: MetricField, value: impl Into<String>) {
        let value = value.into();
        match validate_field(field, &value) {
            Ok(_) => {
                self.errors.remove(&field);
            }
            Err(error) => {
                self.errors.insert(field, error);
            }
        }
        self.values.insert(field, value);
    }

    pub fn value(&self, field: MetricField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn error(&self, field: MetricField) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    pub fn errors(&self) -> impl Iterator<Item = (MetricField, &ValidationError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Every field must hold an in-range number, edited or not.
    pub fn can_submit(&self) -> bool {
        !self.in_flight && self.first_invalid().is_none()
    }

    fn first_invalid(&self) -> Option<(MetricField, ValidationError)> {
        MetricField::ALL.into_iter().find_map(|field| {
            validate_field(field, self.value(field))
                .err()
                .map(|error| (field, error))
        })
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn begin_submit(&mut self) -> Result<MetricInput, SubmitBlocked> {
        if self.in_flight {
            return Err(SubmitBlocked::InFlight);
        }
        if let Some((field, error)) = self.first_invalid() {
            return Err(SubmitBlocked::Invalid { field, error });
        }
        self.in_flight = true;
        self.failure = None;
        Ok(self.values.clone())
    }

    pub fn complete(&mut self, result: PredictionResult) {
        self.in_flight = false;
        self.result = Some(result);
    }

    /// Keeps the previous result on screen, like the page does.
    pub fn fail(&mut self) {
        self.in_flight = false;
        self.failure = Some(RETRY_MESSAGE.to_string());
    }
}
