use golive_core::clock::{Clock, SystemClock};
use std::path::PathBuf;
use std::sync::Arc;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(root: PathBuf) -> Self {
        Self::with_clock(root, Arc::new(SystemClock))
    }

    pub fn with_clock(root: PathBuf, clock: Arc<dyn Clock>) -> Self {
        Self { root, clock }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use golive_core::clock::FixedClock;

    #[test]
    fn new_state_stores_root() {
        let state = AppState::new(PathBuf::from("/tmp/test"));
        assert_eq!(state.root, PathBuf::from("/tmp/test"));
    }

    #[test]
    fn injected_clock_is_used() {
        let t = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let state = AppState::with_clock(PathBuf::from("/tmp/test"), Arc::new(FixedClock(t)));
        assert_eq!(state.clock.now(), t);
    }
}
