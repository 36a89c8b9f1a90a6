use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::errors::{GymError, GymResult};
use crate::models::{ChurnFeatureRecord, ChurnPrediction, Member};
use crate::services::churn_model_service::ChurnClassifier;
use crate::services::metrics_service::derive_metrics;
use crate::storage::{CheckinStore, MemberStore};

/// Score a derived feature record with `classifier`. The churn label is not
/// part of the predictor vector.
pub fn predict_churn_probability(
    classifier: &dyn ChurnClassifier,
    record: &ChurnFeatureRecord,
) -> GymResult<f64> {
    let probability = classifier.predict_proba(&record.to_ndarray())?;

    if !(0.0..=1.0).contains(&probability) {
        return Err(GymError::Model(format!(
            "classifier returned {} outside [0, 1]",
            probability
        )));
    }

    Ok(probability)
}

/// Reads member data from the stores and feeds it through the metrics
/// deriver and the injected classifier.
#[derive(Clone)]
pub struct ChurnPredictionService {
    members: Arc<dyn MemberStore>,
    checkins: Arc<dyn CheckinStore>,
    classifier: Arc<dyn ChurnClassifier>,
}

impl ChurnPredictionService {
    pub fn new(
        members: Arc<dyn MemberStore>,
        checkins: Arc<dyn CheckinStore>,
        classifier: Arc<dyn ChurnClassifier>,
    ) -> Self {
        Self {
            members,
            checkins,
            classifier,
        }
    }

    async fn load_member(&self, member_id: i64) -> GymResult<Member> {
        self.members
            .find_member(member_id)
            .await?
            .ok_or_else(|| GymError::member_not_found(member_id))
    }

    /// Feature record for `member_id` as of `now`.
    pub async fn member_metrics(&self, member_id: i64, now: DateTime<Utc>) -> GymResult<ChurnFeatureRecord> {
        let member = self.load_member(member_id).await?;
        let history = self.checkins.checkins_for_member(member_id).await?;

        derive_metrics(now, &member, &history)
    }

    pub async fn predict(&self, member_id: i64, now: DateTime<Utc>) -> GymResult<ChurnPrediction> {
        let metrics = self.member_metrics(member_id, now).await?;
        let churn_probability = predict_churn_probability(self.classifier.as_ref(), &metrics)?;

        info!(
            "Churn probability for member {}: {:.3} (model {})",
            member_id,
            churn_probability,
            self.classifier.model_version()
        );

        Ok(ChurnPrediction {
            member_id,
            churn_probability,
            model_version: self.classifier.model_version().to_string(),
            predicted_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::churn_model_service::LogisticChurnModel;
    use ndarray::Array1;

    struct FixedClassifier(f64);

    impl ChurnClassifier for FixedClassifier {
        fn model_version(&self) -> &str {
            "fixed"
        }

        fn predict_proba(&self, _features: &Array1<f64>) -> GymResult<f64> {
            Ok(self.0)
        }
    }

    fn record() -> ChurnFeatureRecord {
        ChurnFeatureRecord {
            weekly_frequency: 1.5,
            days_since_last_checkin: 4,
            average_duration_minutes: 62.0,
            plan_id: 2,
            churn_label: 1,
        }
    }

    #[test]
    fn test_probability_passed_through() {
        let p = predict_churn_probability(&FixedClassifier(0.27), &record()).unwrap();
        assert_eq!(p, 0.27);
    }

    #[test]
    fn test_out_of_range_probability_rejected() {
        let result = predict_churn_probability(&FixedClassifier(1.2), &record());
        assert!(matches!(result, Err(GymError::Model(_))));
    }

    #[test]
    fn test_label_not_used_as_predictor() {
        let model = LogisticChurnModel::new("weights", 0.3, [0.2, -0.01, 0.005, 0.1]);
        let churned = record();
        let retained = ChurnFeatureRecord {
            churn_label: 0,
            ..record()
        };

        assert_eq!(
            predict_churn_probability(&model, &churned).unwrap(),
            predict_churn_probability(&model, &retained).unwrap()
        );
    }
}
