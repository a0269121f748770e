//! Projected go-live date from remaining planned effort and observed pace.
//!
//! Blockers are deliberately absent from the arithmetic: they are reported
//! next to the projection rather than folded into it.

use crate::engagement::Engagement;
use crate::error::{GoliveError, Result};
use crate::pipeline;
use crate::velocity::DEFAULT_VELOCITY;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub anchor: DateTime<Utc>,
    /// True when the anchor is the active phase's start rather than "now".
    pub anchored_on_phase_start: bool,
    /// Canonical phases still to finish, current one included.
    pub remaining_phases: Vec<&'static str>,
    pub remaining_planned_days: f64,
    pub projected_remaining_days: f64,
    pub predicted_at: DateTime<Utc>,
}

impl Projection {
    pub fn predicted_date(&self) -> NaiveDate {
        self.predicted_at.date_naive()
    }
}

/// Project the go-live instant for `engagement`.
///
/// Remaining work is every canonical phase at or after the current one that
/// is not recorded complete, each at its planned duration (engagement
/// override, else pipeline default), scaled by `1 / velocity_ratio`.
pub fn project(
    engagement: &Engagement,
    velocity_ratio: f64,
    now: DateTime<Utc>,
) -> Result<Projection> {
    let current = engagement.current_pipeline_phase()?;
    let ratio = if velocity_ratio.is_finite() && velocity_ratio > 0.0 {
        velocity_ratio
    } else {
        DEFAULT_VELOCITY
    };

    let mut remaining_phases = Vec::new();
    let mut remaining_planned_days = 0.0;
    for phase in pipeline::from_order(current.order) {
        let record = engagement.record_for(phase.key);
        if record.is_some_and(|r| r.status.is_complete()) {
            continue;
        }
        remaining_planned_days += record
            .map(|r| r.planned_days())
            .unwrap_or_else(|| f64::from(phase.default_planned_days));
        remaining_phases.push(phase.key);
    }

    let projected_remaining_days = remaining_planned_days / ratio;

    let phase_start = engagement.active_record().and_then(|r| r.started_at);
    let anchor = phase_start.unwrap_or(now);

    let offset = Duration::try_seconds((projected_remaining_days * SECONDS_PER_DAY).round() as i64)
        .ok_or_else(|| GoliveError::malformed(&engagement.id, "projection out of range"))?;
    let predicted_at = anchor
        .checked_add_signed(offset)
        .ok_or_else(|| GoliveError::malformed(&engagement.id, "projection out of range"))?;

    tracing::debug!(
        engagement = %engagement.id,
        remaining = remaining_phases.len(),
        remaining_planned_days,
        projected_remaining_days,
        "projected go-live"
    );

    Ok(Projection {
        anchor,
        anchored_on_phase_start: phase_start.is_some(),
        remaining_phases,
        remaining_planned_days,
        projected_remaining_days,
        predicted_at,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engagement::PhaseRecord;
    use crate::types::PhaseStatus;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).unwrap()
    }

    fn total_plan_from(order: u32) -> f64 {
        pipeline::from_order(order)
            .map(|p| f64::from(p.default_planned_days))
            .sum()
    }

    #[test]
    fn no_history_projects_face_value_plan_from_now() {
        let e = Engagement::new("acme", "Acme", "Acme Ltd", "handover");
        let p = project(&e, 1.0, now()).unwrap();
        assert_eq!(p.anchor, now());
        assert!(!p.anchored_on_phase_start);
        assert_eq!(p.remaining_phases.len(), 8);
        assert_eq!(p.remaining_planned_days, total_plan_from(1));
        assert_eq!(
            p.predicted_at,
            now() + Duration::days(total_plan_from(1) as i64)
        );
    }

    #[test]
    fn anchors_on_active_phase_start() {
        let started = Utc.with_ymd_and_hms(2026, 3, 20, 0, 0, 0).unwrap();
        let mut e = Engagement::new("acme", "Acme", "Acme Ltd", "hypercare");
        let mut record = PhaseRecord::new("hypercare", PhaseStatus::InProgress);
        record.started_at = Some(started);
        e.phases.push(record);

        let p = project(&e, 1.0, now()).unwrap();
        assert!(p.anchored_on_phase_start);
        assert_eq!(p.anchor, started);
        assert_eq!(p.remaining_planned_days, 19.0);
        assert_eq!(p.predicted_at, started + Duration::days(19));
    }

    #[test]
    fn velocity_scales_remaining_time() {
        let e = Engagement::new("acme", "Acme", "Acme Ltd", "support_handover");
        let fast = project(&e, 2.0, now()).unwrap();
        assert_eq!(fast.projected_remaining_days, 2.5);
        let slow = project(&e, 0.5, now()).unwrap();
        assert_eq!(slow.projected_remaining_days, 10.0);
        assert!(fast.predicted_at < slow.predicted_at);
    }

    #[test]
    fn engagement_override_replaces_default() {
        let mut e = Engagement::new("acme", "Acme", "Acme Ltd", "support_handover");
        let mut record = PhaseRecord::new("support_handover", PhaseStatus::InProgress);
        record.planned_duration_days = Some(1.5);
        e.phases.push(record);
        let p = project(&e, 1.0, now()).unwrap();
        assert_eq!(p.remaining_planned_days, 1.5);
    }

    #[test]
    fn completed_later_phases_are_not_remaining() {
        let done = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let mut e = Engagement::new("acme", "Acme", "Acme Ltd", "hypercare");
        let mut record = PhaseRecord::new("support_handover", PhaseStatus::Complete);
        record.completed_at = Some(done);
        e.phases.push(record);
        let p = project(&e, 1.0, now()).unwrap();
        assert_eq!(p.remaining_phases, vec!["hypercare"]);
    }

    #[test]
    fn finished_pipeline_predicts_anchor() {
        let started = Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap();
        let mut e = Engagement::new("acme", "Acme", "Acme Ltd", "support_handover");
        let mut record = PhaseRecord::new("support_handover", PhaseStatus::Complete);
        record.started_at = Some(started);
        record.completed_at = Some(started + Duration::days(4));
        e.phases.push(record);

        let p = project(&e, 1.0, now()).unwrap();
        assert_eq!(p.remaining_planned_days, 0.0);
        assert_eq!(p.predicted_at, started);
    }

    #[test]
    fn non_positive_ratio_falls_back_to_plan() {
        let e = Engagement::new("acme", "Acme", "Acme Ltd", "support_handover");
        let p = project(&e, 0.0, now()).unwrap();
        assert_eq!(p.projected_remaining_days, 5.0);
    }

    #[test]
    fn unknown_current_phase_is_an_error() {
        let e = Engagement::new("acme", "Acme", "Acme Ltd", "retro");
        assert!(matches!(
            project(&e, 1.0, now()),
            Err(GoliveError::UnknownPhase(_))
        ));
    }
}
