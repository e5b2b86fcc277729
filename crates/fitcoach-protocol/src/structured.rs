//! Structured metric fields recognized in, or declared for, a log entry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Typed fields attached to a log.
///
/// The flat fields are what the free-text extractor fills in; the nested
/// sub-records come from the structured entry forms.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StructuredData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<NutritionData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_measurements: Option<BodyMeasurements>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery: Option<RecoveryData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength_training: Option<StrengthTraining>,
    /// Soreness on a 1-10 scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doms: Option<u32>,
    /// Body weight in kilograms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Waist circumference in centimeters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist: Option<f64>,
    /// Body fat percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat: Option<f64>,
    /// Sleep duration in hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep: Option<f64>,
}

impl StructuredData {
    /// Look up a metric, preferring the flat field over the nested sub-record.
    pub fn metric(&self, kind: MetricKind) -> Option<f64> {
        let measurements = self.body_measurements.as_ref();
        match kind {
            MetricKind::Doms => self
                .doms
                .or_else(|| self.recovery.as_ref().and_then(|recovery| recovery.doms))
                .map(f64::from),
            MetricKind::Weight => self.weight.or_else(|| measurements.and_then(|m| m.weight)),
            MetricKind::Waist => self.waist.or_else(|| measurements.and_then(|m| m.waist)),
            MetricKind::BodyFat => self
                .body_fat
                .or_else(|| measurements.and_then(|m| m.body_fat)),
            MetricKind::Sleep => self.sleep,
        }
    }

    /// Doms as an integer score, flat field first.
    pub fn doms_score(&self) -> Option<u32> {
        self.doms
            .or_else(|| self.recovery.as_ref().and_then(|recovery| recovery.doms))
    }

    /// True when any of the summary metrics is present.
    pub fn has_metrics(&self) -> bool {
        MetricKind::ALL
            .iter()
            .any(|kind| self.metric(*kind).is_some())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NutritionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BodyMeasurements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_bicep: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_bicep: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hrv: Option<f64>,
    #[serde(default, rename = "restingHR", skip_serializing_if = "Option::is_none")]
    pub resting_hr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doms: Option<u32>,
}

/// One performed set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSet {
    pub reps: u32,
    pub weight: f64,
    /// Reps in reserve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rir: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub name: String,
    #[serde(default)]
    pub sets: Vec<WorkoutSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A full strength session entered through the structured form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StrengthTraining {
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_notes: Option<String>,
}

/// Metrics that can be trended over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKind {
    Doms,
    Weight,
    Waist,
    BodyFat,
    Sleep,
}

impl MetricKind {
    pub const ALL: [MetricKind; 5] = [
        MetricKind::Doms,
        MetricKind::Weight,
        MetricKind::Waist,
        MetricKind::BodyFat,
        MetricKind::Sleep,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Doms => "doms",
            MetricKind::Weight => "weight",
            MetricKind::Waist => "waist",
            MetricKind::BodyFat => "bodyFat",
            MetricKind::Sleep => "sleep",
        }
    }

    /// Display unit appended to values.
    pub fn unit(&self) -> &'static str {
        match self {
            MetricKind::Doms => "/10",
            MetricKind::Weight => "kg",
            MetricKind::Waist => "cm",
            MetricKind::BodyFat => "%",
            MetricKind::Sleep => "h",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a metric name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown metric: {0}")]
pub struct ParseMetricError(pub String);

impl FromStr for MetricKind {
    type Err = ParseMetricError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "doms" => Ok(MetricKind::Doms),
            "weight" => Ok(MetricKind::Weight),
            "waist" => Ok(MetricKind::Waist),
            "bodyfat" | "body_fat" | "body-fat" | "bf" => Ok(MetricKind::BodyFat),
            "sleep" => Ok(MetricKind::Sleep),
            _ => Err(ParseMetricError(value.to_string())),
        }
    }
}
