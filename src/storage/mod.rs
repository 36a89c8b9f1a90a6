// Persistence seams for members and check-in events

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::GymResult;
use crate::models::{CheckinEvent, CreateMember, Member};

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

#[async_trait]
pub trait MemberStore: Send + Sync {
    async fn insert_member(&self, member: CreateMember) -> GymResult<Member>;

    async fn find_member(&self, member_id: i64) -> GymResult<Option<Member>>;

    async fn find_member_by_email(&self, email: &str) -> GymResult<Option<Member>>;

    async fn list_members(&self) -> GymResult<Vec<Member>>;
}

/// Check-in history. Listing methods make no ordering promise; callers that
/// need chronological order sort by entry timestamp themselves.
#[async_trait]
pub trait CheckinStore: Send + Sync {
    async fn insert_checkin(&self, member_id: i64, entry_at: DateTime<Utc>) -> GymResult<CheckinEvent>;

    async fn find_checkin(&self, checkin_id: i64) -> GymResult<Option<CheckinEvent>>;

    /// Sets the exit timestamp on an open event. Returns `None` when the
    /// event does not exist or was already checked out.
    async fn record_checkout(&self, checkin_id: i64, exit_at: DateTime<Utc>) -> GymResult<Option<CheckinEvent>>;

    async fn list_checkins(&self) -> GymResult<Vec<CheckinEvent>>;

    async fn checkins_for_member(&self, member_id: i64) -> GymResult<Vec<CheckinEvent>>;
}
