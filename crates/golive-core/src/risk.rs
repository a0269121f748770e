use crate::types::RiskStatus;
use chrono::NaiveDate;
use serde::Serialize;

/// Default slip, in days, still classified as `at_risk`.
pub const AT_RISK_WINDOW_DAYS: i64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub status: RiskStatus,
    /// Positive when the prediction lands before the target. Absent without a target.
    pub days_ahead: Option<i64>,
}

/// Classify schedule risk for one engagement.
///
/// Blocker count is intentionally not an input.
pub fn classify(
    target: Option<NaiveDate>,
    predicted: NaiveDate,
    at_risk_window_days: i64,
) -> RiskAssessment {
    let Some(target) = target else {
        return RiskAssessment {
            status: RiskStatus::NoTarget,
            days_ahead: None,
        };
    };

    let days_ahead = (target - predicted).num_days();
    let status = if days_ahead >= 0 {
        RiskStatus::OnTrack
    } else if days_ahead >= -at_risk_window_days {
        RiskStatus::AtRisk
    } else {
        RiskStatus::LikelyDelayed
    };

    RiskAssessment {
        status,
        days_ahead: Some(days_ahead),
    }
}
