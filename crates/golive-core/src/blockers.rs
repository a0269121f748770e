use crate::engagement::{Engagement, Prerequisite};

/// Count prerequisites currently preventing phase advancement.
///
/// With `current_phase_only`, a blocked prerequisite that names a different
/// phase in `blocks_phase` is not counted; unscoped ones still are.
pub fn count(engagement: &Engagement, current_phase_only: bool) -> usize {
    engagement
        .prerequisites
        .iter()
        .filter(|p| p.status.is_blocking())
        .filter(|p| !current_phase_only || gates_phase(p, &engagement.current_phase))
        .count()
}

fn gates_phase(prerequisite: &Prerequisite, phase_key: &str) -> bool {
    prerequisite
        .blocks_phase
        .as_deref()
        .map_or(true, |k| k == phase_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrerequisiteStatus;

    fn engagement(prereqs: Vec<Prerequisite>) -> Engagement {
        let mut e = Engagement::new("acme", "Acme", "Acme Ltd", "onboarding");
        e.prerequisites = prereqs;
        e
    }

    #[test]
    fn counts_only_blocked() {
        let e = engagement(vec![
            Prerequisite::new("VPN access", PrerequisiteStatus::Blocked),
            Prerequisite::new("Org chart", PrerequisiteStatus::Received),
        ]);
        assert_eq!(count(&e, false), 1);
    }

    #[test]
    fn pending_and_other_statuses_never_count() {
        let e = engagement(
            PrerequisiteStatus::all()
                .iter()
                .filter(|s| !s.is_blocking())
                .map(|s| Prerequisite::new(s.as_str(), *s))
                .collect(),
        );
        assert_eq!(count(&e, false), 0);
    }

    #[test]
    fn no_prerequisites_is_zero() {
        assert_eq!(count(&engagement(vec![]), false), 0);
    }

    #[test]
    fn current_phase_filter() {
        let mut scoped_elsewhere = Prerequisite::new("UAT data", PrerequisiteStatus::Blocked);
        scoped_elsewhere.blocks_phase = Some("uat".to_string());
        let mut scoped_here = Prerequisite::new("API keys", PrerequisiteStatus::Blocked);
        scoped_here.blocks_phase = Some("onboarding".to_string());
        let unscoped = Prerequisite::new("Contract", PrerequisiteStatus::Blocked);

        let e = engagement(vec![scoped_elsewhere, scoped_here, unscoped]);
        assert_eq!(count(&e, false), 3);
        assert_eq!(count(&e, true), 2);
    }
}
