// Business logic services

pub mod metrics_service;
pub mod checkin_service;
pub mod member_service;
pub mod churn_model_service;
pub mod churn_prediction_service;

pub use metrics_service::derive_metrics;
pub use checkin_service::{ensure_checkin_allowed, CheckinService};
pub use member_service::MemberService;
pub use churn_model_service::{ChurnClassifier, LogisticChurnModel};
pub use churn_prediction_service::{predict_churn_probability, ChurnPredictionService};
