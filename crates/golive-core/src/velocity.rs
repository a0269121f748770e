//! Completion pace derived from an engagement's completed phases.

use crate::engagement::{Engagement, PhaseRecord};
use crate::pipeline;
use serde::Serialize;

/// Pace assumed when there is no measurable history.
pub const DEFAULT_VELOCITY: f64 = 1.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Velocity {
    /// Planned days over actual days across measured phases. Always > 0.
    pub ratio: f64,
    pub planned_days: f64,
    pub actual_days: f64,
    /// Completed phases that contributed to the sums.
    pub measured_phases: usize,
}

impl Velocity {
    pub fn on_plan() -> Self {
        Self {
            ratio: DEFAULT_VELOCITY,
            planned_days: 0.0,
            actual_days: 0.0,
            measured_phases: 0,
        }
    }

    pub fn is_default(&self) -> bool {
        self.measured_phases == 0
    }
}

/// Observed duration of a completed record.
///
/// A precomputed `actual_duration_days` is taken as is. A duration derived
/// from timestamps is floored at `min_days`. `None` when the record carries
/// neither.
pub fn observed_days(record: &PhaseRecord, min_days: f64) -> Option<f64> {
    if let Some(days) = record.actual_duration_days {
        return Some(days);
    }
    let (started, completed) = (record.started_at?, record.completed_at?);
    let days = (completed - started).num_seconds() as f64 / SECONDS_PER_DAY;
    Some(days.max(min_days))
}

/// Estimate how fast `engagement` moves relative to plan.
///
/// Each pipeline phase counts once, through its latest record, and only
/// when that record is complete. A ratio above 1 means phases finish
/// faster than planned.
pub fn estimate(engagement: &Engagement, min_days: f64) -> Velocity {
    let mut planned_sum = 0.0;
    let mut actual_sum = 0.0;
    let mut measured = 0;

    for record in engagement
        .phases
        .iter()
        .filter(|r| r.pipeline_phase().is_none())
    {
        tracing::warn!(
            engagement = %engagement.id,
            phase = %record.phase_key,
            "ignoring record for unknown phase"
        );
    }

    let latest_complete = pipeline::phases()
        .iter()
        .filter_map(|p| engagement.record_for(p.key))
        .filter(|r| r.status.is_complete());

    for record in latest_complete {
        let Some(actual) = observed_days(record, min_days) else {
            tracing::debug!(
                engagement = %engagement.id,
                phase = %record.phase_key,
                "completed phase has no measurable duration"
            );
            continue;
        };
        planned_sum += record.planned_days();
        actual_sum += actual;
        measured += 1;
    }

    let ratio = planned_sum / actual_sum;
    if actual_sum <= 0.0 || planned_sum <= 0.0 || !ratio.is_finite() {
        return Velocity::on_plan();
    }

    Velocity {
        ratio,
        planned_days: planned_sum,
        actual_days: actual_sum,
        measured_phases: measured,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
