//! The canonical delivery pipeline.
//!
//! Every engagement moves through the same eight phases in the same order.
//! The table is static reference data: engagements carry sparse records
//! against it, but never change its shape.

use crate::error::{GoliveError, Result};
use serde::Serialize;

// ---------------------------------------------------------------------------
// PipelinePhase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PipelinePhase {
    pub key: &'static str,
    pub title: &'static str,
    /// 1-based position in the pipeline.
    pub order: u32,
    pub default_planned_days: u32,
}

static PHASES: [PipelinePhase; 8] = [
    PipelinePhase {
        key: "handover",
        title: "Sales Handover",
        order: 1,
        default_planned_days: 5,
    },
    PipelinePhase {
        key: "kickoff",
        title: "Kickoff",
        order: 2,
        default_planned_days: 5,
    },
    PipelinePhase {
        key: "design",
        title: "Solution Design",
        order: 3,
        default_planned_days: 10,
    },
    PipelinePhase {
        key: "onboarding",
        title: "Onboarding & Build",
        order: 4,
        default_planned_days: 15,
    },
    PipelinePhase {
        key: "uat",
        title: "Acceptance Testing",
        order: 5,
        default_planned_days: 10,
    },
    PipelinePhase {
        key: "go_live",
        title: "Go-Live",
        order: 6,
        default_planned_days: 3,
    },
    PipelinePhase {
        key: "hypercare",
        title: "Hypercare",
        order: 7,
        default_planned_days: 14,
    },
    PipelinePhase {
        key: "support_handover",
        title: "Support Handover",
        order: 8,
        default_planned_days: 5,
    },
];

/// All phases in pipeline order.
pub fn phases() -> &'static [PipelinePhase] {
    &PHASES
}

/// Number of canonical phases. Used as the completeness denominator.
pub fn len() -> usize {
    PHASES.len()
}

pub fn lookup(key: &str) -> Option<&'static PipelinePhase> {
    PHASES.iter().find(|p| p.key == key)
}

/// Like [`lookup`], but an unknown key is an error.
pub fn require(key: &str) -> Result<&'static PipelinePhase> {
    lookup(key).ok_or_else(|| GoliveError::UnknownPhase(key.to_string()))
}

/// Phases at or after `order`, in pipeline order.
pub fn from_order(order: u32) -> impl Iterator<Item = &'static PipelinePhase> {
    PHASES.iter().filter(move |p| p.order >= order)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_phases_in_order() {
        assert_eq!(len(), 8);
        for (i, phase) in phases().iter().enumerate() {
            assert_eq!(phase.order as usize, i + 1, "{}", phase.key);
            assert!(phase.default_planned_days > 0);
        }
    }

    #[test]
    fn keys_are_unique() {
        let mut keys: Vec<&str> = phases().iter().map(|p| p.key).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), len());
    }

    #[test]
    fn lookup_known_and_unknown() {
        assert_eq!(lookup("design").map(|p| p.order), Some(3));
        assert!(lookup("retrospective").is_none());
        assert!(matches!(
            require("retrospective"),
            Err(GoliveError::UnknownPhase(_))
        ));
    }

    #[test]
    fn from_order_includes_current() {
        let keys: Vec<&str> = from_order(7).map(|p| p.key).collect();
        assert_eq!(keys, vec!["hypercare", "support_handover"]);
        assert_eq!(from_order(1).count(), 8);
        assert_eq!(from_order(9).count(), 0);
    }
}
