use chrono::{DateTime, Utc};

use crate::errors::{GymError, GymResult};
use crate::models::{CheckinEvent, ChurnFeatureRecord, Member};

const DAYS_PER_WEEK: i64 = 7;

/// Derive the churn feature record for `member` at the reference instant `now`.
///
/// `events` may be in any order and may be empty. Only visits with an exit
/// timestamp contribute to the average duration. The observation window is
/// floored to whole weeks and never shorter than one week.
///
/// Timestamps that would produce negative spans are rejected rather than
/// clamped: `now` before any entry, an exit before its entry, or (with no
/// history) `now` before the enrollment start date.
pub fn derive_metrics(
    now: DateTime<Utc>,
    member: &Member,
    events: &[CheckinEvent],
) -> GymResult<ChurnFeatureRecord> {
    let mut history: Vec<&CheckinEvent> = events.iter().collect();
    history.sort_by_key(|event| event.entry_at);

    let (weekly_frequency, days_since_last_checkin, average_duration_minutes) =
        match (history.first(), history.last()) {
            (Some(earliest), Some(latest)) => {
                if now < latest.entry_at {
                    return Err(GymError::InvalidInput(format!(
                        "reference time {} precedes check-in {} entered at {}",
                        now, latest.id, latest.entry_at
                    )));
                }

                if let Some(event) = history
                    .iter()
                    .find(|event| event.exit_at.map_or(false, |exit_at| exit_at < event.entry_at))
                {
                    return Err(GymError::InvalidInput(format!(
                        "check-in {} exits before it enters",
                        event.id
                    )));
                }

                let span_weeks = ((now - earliest.entry_at).num_days() / DAYS_PER_WEEK).max(1);
                let weekly_frequency = history.len() as f64 / span_weeks as f64;
                let days_since_last_checkin = (now - latest.entry_at).num_days();

                let durations: Vec<f64> = history
                    .iter()
                    .filter_map(|event| event.duration_minutes())
                    .collect();
                let average_duration_minutes = if durations.is_empty() {
                    0.0
                } else {
                    durations.iter().sum::<f64>() / durations.len() as f64
                };

                (weekly_frequency, days_since_last_checkin, average_duration_minutes)
            }
            _ => {
                let today = now.date_naive();
                if today < member.enrollment_start {
                    return Err(GymError::InvalidInput(format!(
                        "reference date {} precedes enrollment start {}",
                        today, member.enrollment_start
                    )));
                }

                (0.0, (today - member.enrollment_start).num_days(), 0.0)
            }
        };

    Ok(ChurnFeatureRecord {
        weekly_frequency,
        days_since_last_checkin,
        average_duration_minutes,
        plan_id: member.plan_id,
        churn_label: if member.is_cancelled() { 1 } else { 0 },
    })
}
