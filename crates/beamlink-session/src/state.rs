use std::time::{Duration, Instant};

use beamlink_frame::Status;

use crate::message::FixReport;

/// A reported beam position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coordinates {
    pub x: u32,
    pub y: u32,
}

/// Last-known link state, mutated only by the owning [`Session`].
///
/// The fix is stale-but-present: a failed or missing exchange never clears
/// it, it just stops refreshing `last_update` so health decays.
///
/// [`Session`]: crate::session::Session
#[derive(Debug)]
pub(crate) struct LinkState {
    pub initialized: bool,
    pub has_fix: bool,
    pub coordinates: Coordinates,
    pub last_status: Option<Status>,
    pub last_update: Option<Instant>,
}

impl LinkState {
    pub fn new() -> Self {
        Self {
            initialized: false,
            has_fix: false,
            coordinates: Coordinates::default(),
            last_status: None,
            last_update: None,
        }
    }

    /// Record a validated fix report.
    pub fn record_fix(&mut self, report: &FixReport, now: Instant) {
        self.has_fix = report.has_fix;
        self.coordinates = Coordinates {
            x: report.x,
            y: report.y,
        };
        self.last_status = Some(report.status);
        self.last_update = Some(now);
    }

    /// Health: initialized, last status success, and a response seen within
    /// the window.
    pub fn is_healthy(&self, now: Instant, window: Duration) -> bool {
        self.initialized
            && matches!(self.last_status, Some(Status::Success))
            && self
                .last_update
                .is_some_and(|at| now.duration_since(at) <= window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(status: Status, has_fix: bool, x: u32, y: u32) -> FixReport {
        FixReport {
            status,
            has_fix,
            x,
            y,
        }
    }

    #[test]
    fn fresh_state_is_unhealthy() {
        let state = LinkState::new();
        assert!(!state.is_healthy(Instant::now(), Duration::from_millis(100)));
    }

    #[test]
    fn record_fix_updates_everything() {
        let mut state = LinkState::new();
        state.initialized = true;
        let now = Instant::now();

        state.record_fix(&report(Status::Success, true, 320, 240), now);

        assert!(state.has_fix);
        assert_eq!(state.coordinates, Coordinates { x: 320, y: 240 });
        assert_eq!(state.last_status, Some(Status::Success));
        assert_eq!(state.last_update, Some(now));
    }

    #[test]
    fn health_window_boundary() {
        let mut state = LinkState::new();
        state.initialized = true;
        let at = Instant::now();
        state.record_fix(&report(Status::Success, true, 1, 2), at);

        let window = Duration::from_millis(100);
        assert!(state.is_healthy(at + Duration::from_millis(99), window));
        assert!(state.is_healthy(at + Duration::from_millis(100), window));
        assert!(!state.is_healthy(at + Duration::from_millis(101), window));
    }

    #[test]
    fn non_success_status_is_unhealthy_but_keeps_fix() {
        let mut state = LinkState::new();
        state.initialized = true;
        let at = Instant::now();
        state.record_fix(&report(Status::Success, true, 7, 9), at);
        state.record_fix(&report(Status::HardwareError, true, 7, 9), at);

        assert!(!state.is_healthy(at, Duration::from_millis(100)));
        assert!(state.has_fix);
        assert_eq!(state.coordinates, Coordinates { x: 7, y: 9 });
    }

    #[test]
    fn uninitialized_state_never_healthy() {
        let mut state = LinkState::new();
        let at = Instant::now();
        state.record_fix(&report(Status::Success, true, 1, 1), at);
        assert!(!state.is_healthy(at, Duration::from_millis(100)));
    }
}
