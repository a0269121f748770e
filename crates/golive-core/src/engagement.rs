use crate::error::{GoliveError, Result};
use crate::pipeline::{self, PipelinePhase};
use crate::types::{PhaseStatus, PrerequisiteStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PhaseRecord
// ---------------------------------------------------------------------------

/// Observed progress of one engagement through one pipeline phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseRecord {
    pub phase_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    pub status: PhaseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Overrides the pipeline default when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_duration_days: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_duration_days: Option<f64>,
}

impl PhaseRecord {
    pub fn new(phase_key: impl Into<String>, status: PhaseStatus) -> Self {
        Self {
            phase_key: phase_key.into(),
            order: None,
            status,
            started_at: None,
            completed_at: None,
            planned_duration_days: None,
            actual_duration_days: None,
        }
    }

    pub fn pipeline_phase(&self) -> Option<&'static PipelinePhase> {
        pipeline::lookup(&self.phase_key)
    }

    /// Planned duration: the record's override, else the pipeline default.
    /// Records for unknown phases contribute nothing.
    pub fn planned_days(&self) -> f64 {
        match (self.planned_duration_days, self.pipeline_phase()) {
            (Some(days), _) => days,
            (None, Some(phase)) => f64::from(phase.default_planned_days),
            (None, None) => 0.0,
        }
    }

    fn check(&self, engagement_id: &str) -> Result<()> {
        let malformed = |reason: String| GoliveError::malformed(engagement_id, reason);

        if let Some(days) = self.planned_duration_days {
            if !days.is_finite() || days < 0.0 {
                return Err(malformed(format!(
                    "phase '{}' has invalid planned duration {days}",
                    self.phase_key
                )));
            }
        }
        if let Some(days) = self.actual_duration_days {
            if !days.is_finite() || days < 0.0 {
                return Err(malformed(format!(
                    "phase '{}' has invalid actual duration {days}",
                    self.phase_key
                )));
            }
        }
        if self.status.is_complete() != self.completed_at.is_some() {
            return Err(malformed(format!(
                "phase '{}' is {} but completed_at is {}",
                self.phase_key,
                self.status,
                if self.completed_at.is_some() { "set" } else { "missing" }
            )));
        }
        if let (Some(started), Some(completed)) = (self.started_at, self.completed_at) {
            if completed < started {
                return Err(malformed(format!(
                    "phase '{}' completed before it started",
                    self.phase_key
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Prerequisite
// ---------------------------------------------------------------------------

/// A gating item attached to the engagement's active phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prerequisite {
    #[serde(default)]
    pub title: String,
    pub status: PrerequisiteStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks_phase: Option<String>,
}

impl Prerequisite {
    pub fn new(title: impl Into<String>, status: PrerequisiteStatus) -> Self {
        Self {
            title: title.into(),
            status,
            blocks_phase: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Engagement
// ---------------------------------------------------------------------------

/// One onboarding engagement, as handed over by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engagement {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(alias = "current_phase_key")]
    pub current_phase: String,
    /// `None` means no committed deadline.
    #[serde(default, alias = "go_live_date")]
    pub target_go_live_date: Option<NaiveDate>,
    #[serde(default, alias = "journey_phases")]
    pub phases: Vec<PhaseRecord>,
    #[serde(default)]
    pub prerequisites: Vec<Prerequisite>,
}

impl Engagement {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        company_name: impl Into<String>,
        current_phase: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            company_name: company_name.into(),
            current_phase: current_phase.into(),
            target_go_live_date: None,
            phases: Vec::new(),
            prerequisites: Vec::new(),
        }
    }

    pub fn current_pipeline_phase(&self) -> Result<&'static PipelinePhase> {
        pipeline::require(&self.current_phase)
    }

    /// The record for `phase_key`. When a phase was recorded more than once
    /// the latest entry wins.
    pub fn record_for(&self, phase_key: &str) -> Option<&PhaseRecord> {
        self.phases.iter().rev().find(|r| r.phase_key == phase_key)
    }

    pub fn active_record(&self) -> Option<&PhaseRecord> {
        self.record_for(&self.current_phase)
    }

    /// Number of distinct canonical phases recorded as complete.
    pub fn completed_phase_count(&self) -> usize {
        pipeline::phases()
            .iter()
            .filter(|p| {
                self.record_for(p.key)
                    .is_some_and(|r| r.status.is_complete())
            })
            .count()
    }

    /// Reject data the forecasting engine cannot trust.
    ///
    /// Records for phases outside the pipeline are not an error here; they
    /// are ignored (with a warning) where durations are summed.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(GoliveError::malformed("<unnamed>", "engagement id is empty"));
        }
        if pipeline::lookup(&self.current_phase).is_none() {
            return Err(GoliveError::malformed(
                &self.id,
                format!("unknown current phase '{}'", self.current_phase),
            ));
        }
        for record in &self.phases {
            record.check(&self.id)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
