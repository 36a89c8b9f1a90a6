use chrono::{DateTime, Utc};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Number of predictor columns fed to the churn classifier.
pub const FEATURE_COUNT: usize = 4;

/// Attendance-derived features for one member at a reference instant.
/// Built on demand and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChurnFeatureRecord {
    /// Check-ins per week since the first recorded check-in
    pub weekly_frequency: f64,

    /// Whole days since the latest entry, or since enrollment when there are no check-ins
    pub days_since_last_checkin: i64,

    /// Mean visit length in minutes over checked-out visits only
    pub average_duration_minutes: f64,

    /// Subscription plan identifier, used as a raw feature
    pub plan_id: i32,

    /// 1 when the enrollment has a cancellation date, 0 otherwise
    pub churn_label: u8,
}

impl ChurnFeatureRecord {
    /// Predictor vector in model column order. The churn label is the
    /// training target and is left out.
    pub fn to_ndarray(&self) -> Array1<f64> {
        Array1::from(vec![
            self.weekly_frequency,
            self.days_since_last_checkin as f64,
            self.average_duration_minutes,
            self.plan_id as f64,
        ])
    }

    pub fn feature_names() -> Vec<String> {
        vec![
            "weekly_frequency".to_string(),
            "days_since_last_checkin".to_string(),
            "average_duration_minutes".to_string(),
            "plan_id".to_string(),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChurnPrediction {
    pub member_id: i64,
    pub churn_probability: f64,
    pub model_version: String,
    pub predicted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberMetricsResponse {
    pub member_id: i64,
    pub metrics: ChurnFeatureRecord,
    pub calculated_at: DateTime<Utc>,
}
