// Domain models and derived feature records

pub mod member;
pub mod checkin;
pub mod churn_features;

pub use member::*;
pub use checkin::*;
pub use churn_features::*;
