//! Portfolio-wide deadline predictions.
//!
//! Each engagement is forecast independently from its own history; the
//! assembler only orders and tallies the results.

use crate::blockers;
use crate::clock::Clock;
use crate::config::ForecastConfig;
use crate::engagement::Engagement;
use crate::error::Result;
use crate::pipeline;
use crate::projection;
use crate::risk;
use crate::store::EngagementSource;
use crate::types::RiskStatus;
use crate::velocity;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PredictionResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub engagement_id: String,
    pub engagement_name: String,
    pub company_name: String,
    pub current_phase: String,
    pub target_go_live: Option<NaiveDate>,
    pub predicted_go_live: NaiveDate,
    pub velocity_ratio: f64,
    pub blocker_count: usize,
    pub risk_status: RiskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_ahead: Option<i64>,
    pub completed_phases: usize,
    pub total_phases: usize,
    pub progress_percent: u32,
}

// ---------------------------------------------------------------------------
// SkippedEngagement
// ---------------------------------------------------------------------------

/// An engagement left out of the portfolio because its data was unusable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedEngagement {
    pub engagement_id: String,
    pub reason: String,
}

// ---------------------------------------------------------------------------
// PortfolioSummary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total: usize,
    pub on_track: usize,
    pub at_risk: usize,
    pub likely_delayed: usize,
    pub no_target: usize,
    pub skipped: usize,
}

impl PortfolioSummary {
    pub fn tally(predictions: &[PredictionResult], skipped: usize) -> Self {
        let count = |status: RiskStatus| {
            predictions
                .iter()
                .filter(|p| p.risk_status == status)
                .count()
        };
        Self {
            total: predictions.len(),
            on_track: count(RiskStatus::OnTrack),
            at_risk: count(RiskStatus::AtRisk),
            likely_delayed: count(RiskStatus::LikelyDelayed),
            no_target: count(RiskStatus::NoTarget),
            skipped,
        }
    }
}

// ---------------------------------------------------------------------------
// PortfolioReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub predictions: Vec<PredictionResult>,
    pub summary: PortfolioSummary,
    #[serde(default)]
    pub skipped: Vec<SkippedEngagement>,
}

impl PortfolioReport {
    fn new(mut predictions: Vec<PredictionResult>, skipped: Vec<SkippedEngagement>) -> Self {
        rank(&mut predictions);
        let summary = PortfolioSummary::tally(&predictions, skipped.len());
        Self {
            predictions,
            summary,
            skipped,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-engagement prediction
// ---------------------------------------------------------------------------

/// Forecast a single engagement at instant `now`.
///
/// Fails only on malformed data; degenerate-but-valid engagements (no
/// history, no target, no prerequisites) get well-defined defaults.
pub fn predict(
    engagement: &Engagement,
    config: &ForecastConfig,
    now: DateTime<Utc>,
) -> Result<PredictionResult> {
    engagement.validate()?;

    let velocity = velocity::estimate(engagement, config.min_phase_days);
    let blocker_count = blockers::count(engagement, config.blockers_current_phase_only);
    let projection = projection::project(engagement, velocity.ratio, now)?;
    let predicted = projection.predicted_date();
    let assessment = risk::classify(
        engagement.target_go_live_date,
        predicted,
        config.at_risk_window_days,
    );

    let completed_phases = engagement.completed_phase_count();
    let total_phases = pipeline::len();
    let progress_percent = ((completed_phases as f64 / total_phases as f64) * 100.0).round() as u32;

    Ok(PredictionResult {
        engagement_id: engagement.id.clone(),
        engagement_name: engagement.name.clone(),
        company_name: engagement.company_name.clone(),
        current_phase: engagement.current_phase.clone(),
        target_go_live: engagement.target_go_live_date,
        predicted_go_live: predicted,
        velocity_ratio: velocity.ratio,
        blocker_count,
        risk_status: assessment.status,
        days_ahead: assessment.days_ahead,
        completed_phases,
        total_phases,
        progress_percent,
    })
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Most urgent first: likely_delayed, at_risk, no_target, on_track; then by
/// predicted date, then id.
pub fn rank(predictions: &mut [PredictionResult]) {
    predictions.sort_by(|a, b| {
        a.risk_status
            .urgency_rank()
            .cmp(&b.risk_status.urgency_rank())
            .then_with(|| a.predicted_go_live.cmp(&b.predicted_go_live))
            .then_with(|| a.engagement_id.cmp(&b.engagement_id))
    });
}

/// Forecast every engagement, reading the clock exactly once.
///
/// A malformed engagement is recorded in `skipped` and does not abort the
/// rest of the portfolio.
pub fn assemble(
    engagements: &[Engagement],
    config: &ForecastConfig,
    clock: &dyn Clock,
) -> PortfolioReport {
    let now = clock.now();
    let mut predictions = Vec::with_capacity(engagements.len());
    let mut skipped = Vec::new();

    for engagement in engagements {
        match predict(engagement, config, now) {
            Ok(p) => predictions.push(p),
            Err(e) => {
                tracing::warn!(engagement = %engagement.id, error = %e, "skipping engagement");
                skipped.push(SkippedEngagement {
                    engagement_id: engagement.id.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    PortfolioReport::new(predictions, skipped)
}

/// Pull a snapshot from `source` and forecast it.
///
/// A failing source is an error: no partial report is produced. Records the
/// source could not decode are reported as skipped alongside engine rejects.
pub fn forecast(
    source: &dyn EngagementSource,
    config: &ForecastConfig,
    clock: &dyn Clock,
) -> Result<PortfolioReport> {
    let snapshot = source.snapshot()?;
    let report = assemble(&snapshot.engagements, config, clock);

    let mut skipped = snapshot.rejected;
    skipped.extend(report.skipped);
    Ok(PortfolioReport::new(report.predictions, skipped))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
