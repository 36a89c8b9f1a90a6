use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One gym visit. `exit_at` stays empty until the member checks out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CheckinEvent {
    pub id: i64,
    pub member_id: i64,
    pub entry_at: DateTime<Utc>,
    pub exit_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCheckin {
    pub member_id: i64,
}

impl CheckinEvent {
    pub fn is_open(&self) -> bool {
        self.exit_at.is_none()
    }

    /// Visit length in minutes, or `None` while the visit is still open.
    pub fn duration_minutes(&self) -> Option<f64> {
        self.exit_at
            .map(|exit_at| (exit_at - self.entry_at).num_milliseconds() as f64 / 60_000.0)
    }
}
