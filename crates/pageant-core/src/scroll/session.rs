//! State of one running scroll animation

use std::time::{Duration, Instant};

use super::easing::EasingType;
use super::timing::{is_complete, lerp, progress};
use crate::page::NodeId;

/// One triggered scroll: created when a link is intercepted (or a
/// programmatic scroll starts), replaced if a new trigger supersedes it,
/// dropped when the animation completes.
#[derive(Debug, Clone)]
pub struct ScrollSession {
    started: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
    target: NodeId,
}

/// Result of advancing a session by one frame. Every variant carries an
/// absolute position, so frame writes stay idempotent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionStep {
    Running(f64),
    Finished(f64),
}

impl ScrollSession {
    pub fn new(
        started: Instant,
        from: f64,
        to: f64,
        duration: Duration,
        easing: EasingType,
        target: NodeId,
    ) -> Self {
        Self {
            started,
            from,
            to,
            duration,
            easing,
            target,
        }
    }

    /// The element this session scrolls toward.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Final scroll position (before document clamping).
    pub fn end_position(&self) -> f64 {
        self.to
    }

    /// Interpolated position at `now`; `Finished` snaps exactly to the
    /// target position.
    pub fn step(&self, now: Instant) -> SessionStep {
        if is_complete(self.started, self.duration, now) {
            SessionStep::Finished(self.to)
        } else {
            let t = progress(self.started, self.duration, now);
            SessionStep::Running(lerp(self.from, self.to, self.easing.apply(t)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(from: f64, to: f64, ms: u64) -> (ScrollSession, Instant) {
        let start = Instant::now();
        let session = ScrollSession::new(
            start,
            from,
            to,
            Duration::from_millis(ms),
            EasingType::CubicInOut,
            NodeId(0),
        );
        (session, start)
    }

    #[test]
    fn test_step_starts_at_from() {
        let (session, start) = session(10.0, 200.0, 400);
        assert_eq!(session.step(start), SessionStep::Running(10.0));
    }

    #[test]
    fn test_step_finishes_exactly_at_target() {
        let (session, start) = session(10.0, 200.0, 400);
        for extra in [400u64, 401, 4000] {
            let step = session.step(start + Duration::from_millis(extra));
            assert_eq!(step, SessionStep::Finished(200.0), "at +{}ms", extra);
        }
    }

    #[test]
    fn test_step_midpoint() {
        let (session, start) = session(0.0, 100.0, 400);
        // cubic in-out passes through ½ at the halfway mark
        match session.step(start + Duration::from_millis(200)) {
            SessionStep::Running(pos) => assert!((pos - 50.0).abs() < 1e-9),
            other => panic!("unexpected step {:?}", other),
        }
    }

    #[test]
    fn test_upward_scroll() {
        let (session, start) = session(300.0, 40.0, 100);
        match session.step(start + Duration::from_millis(50)) {
            SessionStep::Running(pos) => assert!(pos < 300.0 && pos > 40.0),
            other => panic!("unexpected step {:?}", other),
        }
    }
}
