use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{CheckinStore, MemberStore};
use crate::errors::{GymError, GymResult};
use crate::models::{CheckinEvent, CreateMember, Member};

const MEMBER_COLUMNS: &str = "id, name, birth_date, gender, email, plan_id, enrollment_start, enrollment_active, cancellation_date";
const CHECKIN_COLUMNS: &str = "id, member_id, entry_at, exit_at";

/// Store backed by the `members` and `checkins` tables. Every call borrows a
/// connection from the pool for the duration of one statement.
#[derive(Clone)]
pub struct PostgresStore {
    db: PgPool,
}

impl PostgresStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}

#[async_trait]
impl MemberStore for PostgresStore {
    async fn insert_member(&self, member: CreateMember) -> GymResult<Member> {
        let query = format!(
            r#"
            INSERT INTO members (name, birth_date, gender, email, plan_id, enrollment_start, enrollment_active, cancellation_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            MEMBER_COLUMNS
        );

        sqlx::query_as::<_, Member>(&query)
            .bind(&member.name)
            .bind(member.birth_date)
            .bind(&member.gender)
            .bind(&member.email)
            .bind(member.plan_id)
            .bind(member.enrollment_start)
            .bind(member.enrollment_active)
            .bind(member.cancellation_date)
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    GymError::EmailAlreadyExists
                } else {
                    GymError::Database(e)
                }
            })
    }

    async fn find_member(&self, member_id: i64) -> GymResult<Option<Member>> {
        let query = format!("SELECT {} FROM members WHERE id = $1", MEMBER_COLUMNS);

        let member = sqlx::query_as::<_, Member>(&query)
            .bind(member_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(member)
    }

    async fn find_member_by_email(&self, email: &str) -> GymResult<Option<Member>> {
        let query = format!("SELECT {} FROM members WHERE email = $1", MEMBER_COLUMNS);

        let member = sqlx::query_as::<_, Member>(&query)
            .bind(email)
            .fetch_optional(&self.db)
            .await?;

        Ok(member)
    }

    async fn list_members(&self) -> GymResult<Vec<Member>> {
        let query = format!("SELECT {} FROM members ORDER BY id", MEMBER_COLUMNS);

        let members = sqlx::query_as::<_, Member>(&query)
            .fetch_all(&self.db)
            .await?;

        Ok(members)
    }
}

#[async_trait]
impl CheckinStore for PostgresStore {
    async fn insert_checkin(&self, member_id: i64, entry_at: DateTime<Utc>) -> GymResult<CheckinEvent> {
        let query = format!(
            "INSERT INTO checkins (member_id, entry_at) VALUES ($1, $2) RETURNING {}",
            CHECKIN_COLUMNS
        );

        let checkin = sqlx::query_as::<_, CheckinEvent>(&query)
            .bind(member_id)
            .bind(entry_at)
            .fetch_one(&self.db)
            .await?;

        Ok(checkin)
    }

    async fn find_checkin(&self, checkin_id: i64) -> GymResult<Option<CheckinEvent>> {
        let query = format!("SELECT {} FROM checkins WHERE id = $1", CHECKIN_COLUMNS);

        let checkin = sqlx::query_as::<_, CheckinEvent>(&query)
            .bind(checkin_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(checkin)
    }

    async fn record_checkout(&self, checkin_id: i64, exit_at: DateTime<Utc>) -> GymResult<Option<CheckinEvent>> {
        let query = format!(
            r#"
            UPDATE checkins
            SET exit_at = $2
            WHERE id = $1 AND exit_at IS NULL
            RETURNING {}
            "#,
            CHECKIN_COLUMNS
        );

        let checkin = sqlx::query_as::<_, CheckinEvent>(&query)
            .bind(checkin_id)
            .bind(exit_at)
            .fetch_optional(&self.db)
            .await?;

        Ok(checkin)
    }

    async fn list_checkins(&self) -> GymResult<Vec<CheckinEvent>> {
        let query = format!("SELECT {} FROM checkins ORDER BY id", CHECKIN_COLUMNS);

        let checkins = sqlx::query_as::<_, CheckinEvent>(&query)
            .fetch_all(&self.db)
            .await?;

        Ok(checkins)
    }

    async fn checkins_for_member(&self, member_id: i64) -> GymResult<Vec<CheckinEvent>> {
        let query = format!("SELECT {} FROM checkins WHERE member_id = $1", CHECKIN_COLUMNS);

        let checkins = sqlx::query_as::<_, CheckinEvent>(&query)
            .bind(member_id)
            .fetch_all(&self.db)
            .await?;

        Ok(checkins)
    }
}
