use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};

use crate::errors::{GymError, GymResult};
use crate::models::{CheckinEvent, Member};
use crate::storage::{CheckinStore, MemberStore};

/// Gate evaluated on every check-in attempt.
///
/// An inactive enrollment is rejected when it has no cancellation date, or
/// when `today` is already past the cancellation date. Inactive members whose
/// cancellation date is today or later may still check in.
pub fn ensure_checkin_allowed(member: &Member, today: NaiveDate) -> GymResult<()> {
    if !member.enrollment_active {
        match member.cancellation_date {
            None => return Err(GymError::EnrollmentInactive),
            Some(cancelled_on) if today > cancelled_on => return Err(GymError::EnrollmentInactive),
            Some(_) => {}
        }
    }

    Ok(())
}

/// Records visits and exposes check-in history.
#[derive(Clone)]
pub struct CheckinService {
    members: Arc<dyn MemberStore>,
    checkins: Arc<dyn CheckinStore>,
}

impl CheckinService {
    pub fn new(members: Arc<dyn MemberStore>, checkins: Arc<dyn CheckinStore>) -> Self {
        Self { members, checkins }
    }

    /// Open a visit for `member_id` entering at `now`.
    pub async fn check_in(&self, member_id: i64, now: DateTime<Utc>) -> GymResult<CheckinEvent> {
        let member = self
            .members
            .find_member(member_id)
            .await?
            .ok_or_else(|| GymError::member_not_found(member_id))?;

        if let Err(e) = ensure_checkin_allowed(&member, now.date_naive()) {
            warn!(
                "Rejected check-in for member {} (active: {}, cancellation: {:?})",
                member.id, member.enrollment_active, member.cancellation_date
            );
            return Err(e);
        }

        let checkin = self.checkins.insert_checkin(member.id, now).await?;
        info!("Member {} checked in (check-in {})", member.id, checkin.id);

        Ok(checkin)
    }

    /// Close an open visit at `now`.
    pub async fn check_out(&self, checkin_id: i64, now: DateTime<Utc>) -> GymResult<CheckinEvent> {
        let checkin = self
            .checkins
            .find_checkin(checkin_id)
            .await?
            .ok_or_else(|| GymError::checkin_not_found(checkin_id))?;

        if !checkin.is_open() {
            return Err(GymError::InvalidInput(format!(
                "check-in {} is already checked out",
                checkin_id
            )));
        }

        if now < checkin.entry_at {
            return Err(GymError::InvalidInput(format!(
                "checkout time {} precedes entry {}",
                now, checkin.entry_at
            )));
        }

        let closed = self
            .checkins
            .record_checkout(checkin_id, now)
            .await?
            .ok_or_else(|| {
                GymError::InvalidInput(format!("check-in {} is already checked out", checkin_id))
            })?;
        info!("Member {} checked out (check-in {})", closed.member_id, closed.id);

        Ok(closed)
    }

    pub async fn list_checkins(&self) -> GymResult<Vec<CheckinEvent>> {
        self.checkins.list_checkins().await
    }

    /// Check-in history of one member, oldest entry first. A member with no
    /// recorded visits is reported as not found.
    pub async fn list_member_checkins(&self, member_id: i64) -> GymResult<Vec<CheckinEvent>> {
        let mut checkins = self.checkins.checkins_for_member(member_id).await?;

        if checkins.is_empty() {
            return Err(GymError::NotFound(format!(
                "Check-ins for member {}",
                member_id
            )));
        }

        checkins.sort_by_key(|c| c.entry_at);
        Ok(checkins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateMember;
    use crate::storage::InMemoryStore;
    use chrono::{Duration, TimeZone};

    fn create_test_member(active: bool, cancellation_date: Option<NaiveDate>) -> Member {
        Member {
            id: 1,
            name: "Beatriz Rocha".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1995, 9, 21).unwrap(),
            gender: "F".to_string(),
            email: "beatriz@example.com".to_string(),
            plan_id: 1,
            enrollment_start: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            enrollment_active: active,
            cancellation_date,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_active_member_allowed() {
        assert!(ensure_checkin_allowed(&create_test_member(true, None), today()).is_ok());
    }

    #[test]
    fn test_inactive_cancelled_yesterday_rejected() {
        let member = create_test_member(false, Some(today() - Duration::days(1)));
        assert!(matches!(
            ensure_checkin_allowed(&member, today()),
            Err(GymError::EnrollmentInactive)
        ));
    }

    #[test]
    fn test_inactive_without_cancellation_rejected() {
        let member = create_test_member(false, None);
        assert!(matches!(
            ensure_checkin_allowed(&member, today()),
            Err(GymError::EnrollmentInactive)
        ));
    }

    #[test]
    fn test_inactive_until_cancellation_date_allowed() {
        let cancelled_today = create_test_member(false, Some(today()));
        let cancelled_later = create_test_member(false, Some(today() + Duration::days(5)));

        assert!(ensure_checkin_allowed(&cancelled_today, today()).is_ok());
        assert!(ensure_checkin_allowed(&cancelled_later, today()).is_ok());
    }

    #[test]
    fn test_active_member_with_past_cancellation_allowed() {
        let member = create_test_member(true, Some(today() - Duration::days(30)));
        assert!(ensure_checkin_allowed(&member, today()).is_ok());
    }

    async fn create_test_service() -> (CheckinService, i64) {
        let store = Arc::new(InMemoryStore::new());
        let member = store
            .insert_member(CreateMember {
                name: "Diego Alves".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1992, 2, 2).unwrap(),
                gender: "M".to_string(),
                email: "diego@example.com".to_string(),
                plan_id: 2,
                enrollment_start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                enrollment_active: true,
                cancellation_date: None,
            })
            .await
            .unwrap();

        (CheckinService::new(store.clone(), store), member.id)
    }

    #[tokio::test]
    async fn test_check_in_and_out() {
        let (service, member_id) = create_test_service().await;
        let entry = Utc.with_ymd_and_hms(2024, 6, 15, 18, 0, 0).unwrap();

        let checkin = service.check_in(member_id, entry).await.unwrap();
        assert_eq!(checkin.entry_at, entry);
        assert!(checkin.is_open());

        let closed = service
            .check_out(checkin.id, entry + Duration::minutes(50))
            .await
            .unwrap();
        assert_eq!(closed.duration_minutes(), Some(50.0));

        let again = service.check_out(checkin.id, entry + Duration::minutes(60)).await;
        assert!(matches!(again, Err(GymError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_check_in_unknown_member() {
        let (service, _) = create_test_service().await;
        let result = service.check_in(404, Utc::now()).await;
        assert!(matches!(result, Err(GymError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_member_history_sorted_and_not_found_when_empty() {
        let (service, member_id) = create_test_service().await;
        let first = Utc.with_ymd_and_hms(2024, 6, 1, 7, 0, 0).unwrap();

        assert!(matches!(
            service.list_member_checkins(member_id).await,
            Err(GymError::NotFound(_))
        ));

        service.check_in(member_id, first + Duration::days(3)).await.unwrap();
        service.check_in(member_id, first).await.unwrap();

        let history = service.list_member_checkins(member_id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].entry_at, first);
    }
}
