use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FeatureImportance {
    pub name: String,
    pub importance: f64,
}

// Display weights for the chart. Not derived from the model or the input.
pub const FEATURE_IMPORTANCE: [(&str, f64); 10] = [
    ("Study Hours", 0.20),
    ("Previous Grade", 0.18),
    ("Attendance", 0.15),
    ("Project Score", 0.12),
    ("Quiz Average", 0.10),
    ("Tutorial", 0.08),
    ("Study Group", 0.07),
    ("Sleep", 0.05),
    ("Stress", 0.03),
    ("Extracurricular", 0.02),
];

pub fn feature_importance() -> Vec<FeatureImportance> {
    FEATURE_IMPORTANCE
        .iter()
        .map(|&(name, importance)| FeatureImportance {
            name: name.to_string(),
            importance,
        })
        .collect()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub prediction: f64,
    pub feature_importance: Vec<FeatureImportance>,
}

impl PredictionResult {
    pub fn new(raw_prediction: f64) -> Self {
        Self {
            prediction: round_to_hundredths(raw_prediction),
            feature_importance: feature_importance(),
        }
    }
}

/// Rounds half away from zero at the second decimal place.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
