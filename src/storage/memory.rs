use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{CheckinStore, MemberStore};
use crate::errors::{GymError, GymResult};
use crate::models::{CheckinEvent, CreateMember, Member};

#[derive(Default)]
struct Tables {
    members: BTreeMap<i64, Member>,
    checkins: BTreeMap<i64, CheckinEvent>,
    next_member_id: i64,
    next_checkin_id: i64,
}

/// Process-local store used for development runs and tests.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemberStore for InMemoryStore {
    async fn insert_member(&self, member: CreateMember) -> GymResult<Member> {
        let mut tables = self.tables.write().await;

        if tables.members.values().any(|m| m.email == member.email) {
            return Err(GymError::EmailAlreadyExists);
        }

        tables.next_member_id += 1;
        let created = Member {
            id: tables.next_member_id,
            name: member.name,
            birth_date: member.birth_date,
            gender: member.gender,
            email: member.email,
            plan_id: member.plan_id,
            enrollment_start: member.enrollment_start,
            enrollment_active: member.enrollment_active,
            cancellation_date: member.cancellation_date,
        };
        tables.members.insert(created.id, created.clone());

        Ok(created)
    }

    async fn find_member(&self, member_id: i64) -> GymResult<Option<Member>> {
        Ok(self.tables.read().await.members.get(&member_id).cloned())
    }

    async fn find_member_by_email(&self, email: &str) -> GymResult<Option<Member>> {
        let tables = self.tables.read().await;
        Ok(tables.members.values().find(|m| m.email == email).cloned())
    }

    async fn list_members(&self) -> GymResult<Vec<Member>> {
        Ok(self.tables.read().await.members.values().cloned().collect())
    }
}

#[async_trait]
impl CheckinStore for InMemoryStore {
    async fn insert_checkin(&self, member_id: i64, entry_at: DateTime<Utc>) -> GymResult<CheckinEvent> {
        let mut tables = self.tables.write().await;

        tables.next_checkin_id += 1;
        let checkin = CheckinEvent {
            id: tables.next_checkin_id,
            member_id,
            entry_at,
            exit_at: None,
        };
        tables.checkins.insert(checkin.id, checkin.clone());

        Ok(checkin)
    }

    async fn find_checkin(&self, checkin_id: i64) -> GymResult<Option<CheckinEvent>> {
        Ok(self.tables.read().await.checkins.get(&checkin_id).cloned())
    }

    async fn record_checkout(&self, checkin_id: i64, exit_at: DateTime<Utc>) -> GymResult<Option<CheckinEvent>> {
        let mut tables = self.tables.write().await;

        match tables.checkins.get_mut(&checkin_id) {
            Some(checkin) if checkin.is_open() => {
                checkin.exit_at = Some(exit_at);
                Ok(Some(checkin.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn list_checkins(&self) -> GymResult<Vec<CheckinEvent>> {
        Ok(self.tables.read().await.checkins.values().cloned().collect())
    }

    async fn checkins_for_member(&self, member_id: i64) -> GymResult<Vec<CheckinEvent>> {
        let tables = self.tables.read().await;
        Ok(tables
            .checkins
            .values()
            .filter(|c| c.member_id == member_id)
            .cloned()
            .collect())
    }
}
