//! Per-frame simulation tick
//!
//! Driven by the host's animation-frame callback with a wall-clock timestamp.
//! Each tick: frame delta, countdown, spawn, difficulty, physics, end check.

use super::difficulty::speed_multiplier_with;
use super::layout::Layout;
use super::physics::advance;
use super::session::{Session, SessionPhase};
use super::state::GameEvent;

/// Turns frame timestamps into deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    /// Forget the baseline; the next frame contributes a zero delta
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    /// Seconds since the previous frame
    ///
    /// The first frame yields 0. A clock that runs backwards yields 0. With
    /// `max_delta` set, long gaps (suspended tab) are capped so objects can't
    /// jump clean through the tray.
    pub fn delta(&mut self, now_ms: f64, max_delta: Option<f32>) -> f32 {
        let last = self.last_ms.replace(now_ms).unwrap_or(now_ms);
        let dt = (((now_ms - last) / 1000.0) as f32).max(0.0);
        match max_delta {
            Some(max) => dt.min(max),
            None => dt,
        }
    }
}

/// What the host should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// Request another frame
    Running,
    /// Time's up; show the results
    Ended { score: i64 },
    /// Session not started or already over; nothing simulated
    Inactive,
}

/// Advance the session to the frame at `now_ms`
pub fn tick(session: &mut Session, now_ms: f64, layout: &Layout) -> TickStatus {
    if session.phase != SessionPhase::Running {
        return TickStatus::Inactive;
    }

    let dt = session.clock.delta(now_ms, session.tuning.max_frame_delta);
    session.state.time_left = (session.state.time_left - dt).max(0.0);

    if let Some(spawned) = session.spawner.update(
        &mut session.state,
        &mut session.rng,
        &session.tuning,
        dt,
        layout.viewport.width,
        layout.object_size,
    ) {
        session.events.push(GameEvent::Spawned {
            kind: spawned.kind,
        });
    }

    let multiplier = speed_multiplier_with(&session.tuning, session.state.time_left);
    advance(
        &mut session.state,
        dt,
        multiplier,
        layout,
        &mut session.events,
    );

    if session.state.time_left > 0.0 {
        TickStatus::Running
    } else {
        session.end();
        TickStatus::Ended {
            score: session.state.score(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_FRAME_DELTA;
    use crate::sim::state::SessionState;
    use crate::tuning::Tuning;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    #[test]
    fn test_frame_clock() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(5000.0, None), 0.0);
        assert!((clock.delta(5016.0, None) - 0.016).abs() < 1e-6);
        // Backwards clock
        assert_eq!(clock.delta(4000.0, None), 0.0);
        // Suspended tab
        assert_eq!(clock.delta(9000.0, Some(MAX_FRAME_DELTA)), MAX_FRAME_DELTA);
        assert_eq!(clock.delta(19000.0, None), 10.0);
    }

    #[test]
    fn test_first_frame_spawns_without_advancing_time() {
        let mut session = Session::new(SessionState::normal(), 1, Tuning::default());
        let layout = Layout::from_canvas(400.0, 600.0);
        session.start(0.0);

        assert_eq!(tick(&mut session, 1234.0, &layout), TickStatus::Running);
        assert_eq!(session.state.time_left, 60.0);
        assert_eq!(session.state.objects.len(), 1);
    }

    #[test]
    fn test_runs_to_completion() {
        let mut session = Session::new(SessionState::normal(), 7, Tuning::default());
        let layout = Layout::from_canvas(400.0, 600.0);
        session.start(0.0);

        let mut now = 0.0;
        let mut status = TickStatus::Running;
        let mut frames = 0;
        while status == TickStatus::Running {
            status = tick(&mut session, now, &layout);
            now += FRAME_MS;
            frames += 1;
            assert!(frames < 4000, "session never ended");
        }

        assert_eq!(
            status,
            TickStatus::Ended {
                score: session.score()
            }
        );
        assert!(session.is_over());
        assert_eq!(session.state.time_left, 0.0);
        assert_eq!(tick(&mut session, now, &layout), TickStatus::Inactive);
    }

    #[test]
    fn test_tick_before_start_is_inactive() {
        let mut session = Session::new(SessionState::normal(), 1, Tuning::default());
        let layout = Layout::from_canvas(400.0, 600.0);
        assert_eq!(tick(&mut session, 0.0, &layout), TickStatus::Inactive);
        assert!(session.state.objects.is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and frame times end up identical
        let layout = Layout::from_canvas(480.0, 720.0);
        let mut a = Session::new(SessionState::normal(), 99999, Tuning::default());
        let mut b = Session::new(SessionState::normal(), 99999, Tuning::default());
        a.start(0.0);
        b.start(0.0);

        let mut now = 0.0;
        for frame in 0..900 {
            // Uneven frame pacing
            now += if frame % 7 == 0 { 33.0 } else { 16.0 };
            tick(&mut a, now, &layout);
            tick(&mut b, now, &layout);
            a.pump_timers(now);
            b.pump_timers(now);
        }

        assert_eq!(a.score(), b.score());
        assert_eq!(a.state.objects, b.state.objects);
        assert_eq!(a.state.time_left, b.state.time_left);
        assert_eq!(a.drain_events(), b.drain_events());
    }
}
