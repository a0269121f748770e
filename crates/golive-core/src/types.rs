use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// PhaseStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    #[serde(alias = "not-started")]
    NotStarted,
    #[serde(alias = "in-progress")]
    InProgress,
    Complete,
}

impl PhaseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PhaseStatus::NotStarted => "not_started",
            PhaseStatus::InProgress => "in_progress",
            PhaseStatus::Complete => "complete",
        }
    }

    pub fn is_complete(self) -> bool {
        matches!(self, PhaseStatus::Complete)
    }
}

impl fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PhaseStatus {
    type Err = crate::error::GoliveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" | "not-started" => Ok(PhaseStatus::NotStarted),
            "in_progress" | "in-progress" => Ok(PhaseStatus::InProgress),
            "complete" => Ok(PhaseStatus::Complete),
            _ => Err(crate::error::GoliveError::InvalidStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// PrerequisiteStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrerequisiteStatus {
    Pending,
    Requested,
    #[serde(alias = "in-progress")]
    InProgress,
    Received,
    Blocked,
    #[serde(alias = "not-needed")]
    NotNeeded,
}

impl PrerequisiteStatus {
    pub fn all() -> &'static [PrerequisiteStatus] {
        &[
            PrerequisiteStatus::Pending,
            PrerequisiteStatus::Requested,
            PrerequisiteStatus::InProgress,
            PrerequisiteStatus::Received,
            PrerequisiteStatus::Blocked,
            PrerequisiteStatus::NotNeeded,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PrerequisiteStatus::Pending => "pending",
            PrerequisiteStatus::Requested => "requested",
            PrerequisiteStatus::InProgress => "in_progress",
            PrerequisiteStatus::Received => "received",
            PrerequisiteStatus::Blocked => "blocked",
            PrerequisiteStatus::NotNeeded => "not_needed",
        }
    }

    /// Only `blocked` gates phase advancement; every other status is informational.
    pub fn is_blocking(self) -> bool {
        matches!(self, PrerequisiteStatus::Blocked)
    }
}

impl fmt::Display for PrerequisiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PrerequisiteStatus {
    type Err = crate::error::GoliveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace('-', "_");
        Self::all()
            .iter()
            .copied()
            .find(|st| st.as_str() == normalized)
            .ok_or_else(|| crate::error::GoliveError::InvalidStatus(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// RiskStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskStatus {
    NoTarget,
    OnTrack,
    AtRisk,
    LikelyDelayed,
}

impl RiskStatus {
    pub fn all() -> &'static [RiskStatus] {
        &[
            RiskStatus::LikelyDelayed,
            RiskStatus::AtRisk,
            RiskStatus::NoTarget,
            RiskStatus::OnTrack,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskStatus::NoTarget => "no_target",
            RiskStatus::OnTrack => "on_track",
            RiskStatus::AtRisk => "at_risk",
            RiskStatus::LikelyDelayed => "likely_delayed",
        }
    }

    /// Portfolio ordering: lower ranks sort first.
    pub fn urgency_rank(self) -> u8 {
        match self {
            RiskStatus::LikelyDelayed => 0,
            RiskStatus::AtRisk => 1,
            RiskStatus::NoTarget => 2,
            RiskStatus::OnTrack => 3,
        }
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RiskStatus {
    type Err = crate::error::GoliveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no_target" => Ok(RiskStatus::NoTarget),
            "on_track" => Ok(RiskStatus::OnTrack),
            "at_risk" => Ok(RiskStatus::AtRisk),
            "likely_delayed" => Ok(RiskStatus::LikelyDelayed),
            _ => Err(crate::error::GoliveError::InvalidStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn only_blocked_prerequisites_block() {
        for status in PrerequisiteStatus::all() {
            assert_eq!(
                status.is_blocking(),
                *status == PrerequisiteStatus::Blocked,
                "{status}"
            );
        }
    }

    #[test]
    fn prerequisite_status_accepts_hyphenated_names() {
        assert_eq!(
            PrerequisiteStatus::from_str("not-needed").unwrap(),
            PrerequisiteStatus::NotNeeded
        );
        assert_eq!(
            PrerequisiteStatus::from_str("in_progress").unwrap(),
            PrerequisiteStatus::InProgress
        );
        assert!(PrerequisiteStatus::from_str("lost").is_err());
    }

    #[test]
    fn phase_status_parses_both_spellings() {
        assert_eq!(
            PhaseStatus::from_str("not-started").unwrap(),
            PhaseStatus::NotStarted
        );
        assert_eq!(
            PhaseStatus::from_str("in_progress").unwrap(),
            PhaseStatus::InProgress
        );
        assert!(PhaseStatus::Complete.is_complete());
        assert!(!PhaseStatus::InProgress.is_complete());
    }

    #[test]
    fn risk_urgency_order() {
        let ranks: Vec<u8> = RiskStatus::all().iter().map(|r| r.urgency_rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
        assert!(RiskStatus::LikelyDelayed.urgency_rank() < RiskStatus::OnTrack.urgency_rank());
        assert!(RiskStatus::NoTarget.urgency_rank() < RiskStatus::OnTrack.urgency_rank());
    }

    #[test]
    fn risk_status_serializes_snake_case() {
        let json = serde_json::to_string(&RiskStatus::LikelyDelayed).unwrap();
        assert_eq!(json, "\"likely_delayed\"");
        for risk in RiskStatus::all() {
            assert_eq!(RiskStatus::from_str(risk.as_str()).unwrap(), *risk);
        }
    }
}
