//! Rafa interrupt events
//!
//! Rafa pops up at random moments and quietly racks up a penalty, one point a
//! second, until the player swats him or the penalty reaches its cap. The
//! accumulated penalty only touches the score when he leaves.
//!
//! ```text
//! Dormant --arm--> Armed --appear timer--> Active --swat / cap--> Dormant
//! ```
//!
//! The controller owns no clock. It schedules its appearance and penalty
//! timers on the session's `TimerQueue` and reacts when the session hands the
//! fired timers back.

use rand::Rng;

use super::timers::{TimerId, TimerKind, TimerQueue};
use crate::tuning::Tuning;

/// Shown after a successful swat
pub const RAFA_PHRASES: [&str; 8] = [
    "¡Bien hecho, joven!",
    "¡Sigue así!",
    "¡Eres un crack!",
    "¡Imparable!",
    "¡Vas a por todas!",
    "¡Qué fiera!",
    "¡Así se hace!",
    "¡Eres una máquina!",
];

/// Pick a congratulatory phrase
pub fn pick_phrase<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    RAFA_PHRASES[rng.random_range(0..RAFA_PHRASES.len())]
}

/// Where the controller is in its appearance cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RafaPhase {
    /// Nothing scheduled
    Dormant,
    /// Appearance timer running
    Armed,
    /// On screen, penalty accruing
    Active,
}

/// Result of one penalty timer firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenaltyTick {
    /// Rafa isn't on screen; nothing happened
    Ignored,
    /// Penalty went up to this value
    Pending(u32),
    /// Penalty already at the cap; Rafa should leave
    CapReached,
}

/// Rafa's state machine
#[derive(Debug, Clone)]
pub struct RafaController {
    phase: RafaPhase,
    penalty_counter: u32,
    appearances: u32,
    appear_timer: Option<TimerId>,
    penalty_timer: Option<TimerId>,
}

impl Default for RafaController {
    fn default() -> Self {
        Self::new()
    }
}

impl RafaController {
    pub fn new() -> Self {
        Self {
            phase: RafaPhase::Dormant,
            penalty_counter: 0,
            appearances: 0,
            appear_timer: None,
            penalty_timer: None,
        }
    }

    pub fn phase(&self) -> RafaPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == RafaPhase::Active
    }

    pub fn penalty_counter(&self) -> u32 {
        self.penalty_counter
    }

    pub fn appearances(&self) -> u32 {
        self.appearances
    }

    /// Cancel anything pending and forget the session's appearances
    pub fn reset(&mut self, timers: &mut TimerQueue) {
        self.shutdown(timers);
        self.penalty_counter = 0;
        self.appearances = 0;
    }

    /// Schedule the next appearance if there's time and appearances left
    ///
    /// The first appearance of a session uses the longer first-delay window.
    /// Returns whether a timer was scheduled.
    pub fn arm<R: Rng + ?Sized>(
        &mut self,
        timers: &mut TimerQueue,
        rng: &mut R,
        tuning: &Tuning,
        now_ms: f64,
        time_left: f32,
    ) -> bool {
        if self.phase != RafaPhase::Dormant
            || time_left <= tuning.rafa_min_time_left
            || self.appearances >= tuning.rafa_max_appearances
        {
            return false;
        }

        let (min, max) = if self.appearances == 0 {
            tuning.rafa_first_delay_ms
        } else {
            tuning.rafa_rearm_delay_ms
        };
        let delay = min + rng.random::<f64>() * (max - min);
        self.appear_timer = Some(timers.schedule_once(now_ms, delay, TimerKind::RafaAppear));
        self.phase = RafaPhase::Armed;
        log::debug!("Rafa armed, appearing in {:.0}ms", delay);
        true
    }

    /// Appearance timer fired: go on screen and start the penalty clock
    ///
    /// Ignores timers that aren't the current appearance timer.
    pub fn appear(
        &mut self,
        timers: &mut TimerQueue,
        tuning: &Tuning,
        now_ms: f64,
        fired: TimerId,
    ) -> bool {
        if self.phase != RafaPhase::Armed || self.appear_timer != Some(fired) {
            return false;
        }

        self.appear_timer = None;
        self.penalty_counter = 0;
        self.appearances += 1;
        self.penalty_timer = Some(timers.schedule_repeating(
            now_ms,
            tuning.rafa_penalty_interval_ms,
            TimerKind::RafaPenalty,
        ));
        self.phase = RafaPhase::Active;
        log::info!("Rafa appeared ({} of {})", self.appearances, tuning.rafa_max_appearances);
        true
    }

    /// Penalty timer fired: count one more point, up to the cap
    pub fn penalty_tick(&mut self, tuning: &Tuning, fired: TimerId) -> PenaltyTick {
        if self.phase != RafaPhase::Active || self.penalty_timer != Some(fired) {
            return PenaltyTick::Ignored;
        }

        if self.penalty_counter < tuning.rafa_max_penalty {
            self.penalty_counter += 1;
            PenaltyTick::Pending(self.penalty_counter)
        } else {
            PenaltyTick::CapReached
        }
    }

    /// Leave the screen, returning the penalty to deduct
    ///
    /// `None` if Rafa wasn't on screen.
    pub fn dismiss(&mut self, timers: &mut TimerQueue) -> Option<u32> {
        if self.phase != RafaPhase::Active {
            return None;
        }

        if let Some(id) = self.penalty_timer.take() {
            timers.cancel(id);
        }
        self.phase = RafaPhase::Dormant;
        let penalty = self.penalty_counter;
        self.penalty_counter = 0;
        Some(penalty)
    }

    /// Cancel every timer this controller owns and go dormant
    pub fn shutdown(&mut self, timers: &mut TimerQueue) {
        for id in [self.appear_timer.take(), self.penalty_timer.take()]
            .into_iter()
            .flatten()
        {
            timers.cancel(id);
        }
        self.phase = RafaPhase::Dormant;
    }
}
