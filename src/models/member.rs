use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub email: String,
    pub plan_id: i32,
    pub enrollment_start: NaiveDate,
    pub enrollment_active: bool,
    pub cancellation_date: Option<NaiveDate>,
}

/// Payload for registering a member. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMember {
    pub name: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub email: String,
    pub plan_id: i32,
    pub enrollment_start: NaiveDate,
    pub enrollment_active: bool,
    #[serde(default)]
    pub cancellation_date: Option<NaiveDate>,
}

impl Member {
    /// True when the member is flagged inactive but carries no cancellation
    /// date. Stores accept this state; callers may want to log it.
    pub fn is_inactive_without_cancellation(&self) -> bool {
        !self.enrollment_active && self.cancellation_date.is_none()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation_date.is_some()
    }
}
