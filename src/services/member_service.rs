use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::{GymError, GymResult};
use crate::models::{CreateMember, Member};
use crate::storage::MemberStore;

#[derive(Clone)]
pub struct MemberService {
    members: Arc<dyn MemberStore>,
}

impl MemberService {
    pub fn new(members: Arc<dyn MemberStore>) -> Self {
        Self { members }
    }

    pub async fn create_member(&self, member_data: CreateMember) -> GymResult<Member> {
        if member_data.email.trim().is_empty() {
            return Err(GymError::InvalidInput("email must not be empty".to_string()));
        }

        if self
            .members
            .find_member_by_email(&member_data.email)
            .await?
            .is_some()
        {
            return Err(GymError::EmailAlreadyExists);
        }

        let member = self.members.insert_member(member_data).await?;

        if member.is_inactive_without_cancellation() {
            warn!(
                "Member {} registered as inactive without a cancellation date",
                member.id
            );
        }
        info!("Registered member {} on plan {}", member.id, member.plan_id);

        Ok(member)
    }

    pub async fn get_member(&self, member_id: i64) -> GymResult<Member> {
        self.members
            .find_member(member_id)
            .await?
            .ok_or_else(|| GymError::member_not_found(member_id))
    }

    pub async fn list_members(&self) -> GymResult<Vec<Member>> {
        self.members.list_members().await
    }
}
