//! One play session
//!
//! The session is the single owner of everything a run touches: score state,
//! spawner, Rafa, the timer queue and the RNG. Frame ticks (`tick`) and timer
//! pumps (`pump_timers`) are separate entry points, called from separate host
//! callbacks, and both go through here. Once the session ends neither can
//! change the score again.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::rafa::{PenaltyTick, RafaController, pick_phrase};
use super::spawner::Spawner;
use super::state::{DismissReason, GameEvent, SessionState};
use super::tick::FrameClock;
use super::timers::{TimerKind, TimerQueue};
use crate::tuning::Tuning;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Created, `start` not called yet
    Ready,
    Running,
    /// Time ran out (or the host tore it down)
    Over,
}

/// A single timed play attempt
#[derive(Debug, Clone)]
pub struct Session {
    pub state: SessionState,
    pub(crate) phase: SessionPhase,
    pub(crate) spawner: Spawner,
    pub(crate) rafa: RafaController,
    pub(crate) timers: TimerQueue,
    pub(crate) clock: FrameClock,
    pub(crate) rng: Pcg32,
    pub(crate) tuning: Tuning,
    pub(crate) events: Vec<GameEvent>,
    seed: u64,
}

impl Session {
    /// Create a session around fresh state; nothing runs until `start`
    pub fn new(state: SessionState, seed: u64, tuning: Tuning) -> Self {
        Self {
            state,
            phase: SessionPhase::Ready,
            spawner: Spawner::new(),
            rafa: RafaController::new(),
            timers: TimerQueue::new(),
            clock: FrameClock::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            events: Vec::new(),
            seed,
        }
    }

    /// Reset everything and begin the countdown
    ///
    /// The first frame tick after this establishes the frame clock baseline.
    pub fn start(&mut self, now_ms: f64) {
        self.rafa.reset(&mut self.timers);
        self.timers.cancel_all();
        self.state.reset(self.tuning.session_duration);
        self.spawner.reset();
        self.clock.reset();
        self.events.clear();
        self.phase = SessionPhase::Running;

        self.rafa.arm(
            &mut self.timers,
            &mut self.rng,
            &self.tuning,
            now_ms,
            self.state.time_left,
        );
        log::info!(
            "Session started ({:?} mode, seed {}, {}s)",
            self.state.mode(),
            self.seed,
            self.tuning.session_duration
        );
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == SessionPhase::Over
    }

    pub fn score(&self) -> i64 {
        self.state.score()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn rafa(&self) -> &RafaController {
        &self.rafa
    }

    /// Timers still queued (Rafa appearance / penalty)
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// When the host should next call `pump_timers`
    pub fn next_timer_due(&self) -> Option<f64> {
        self.timers.next_due()
    }

    /// Hand accumulated events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Player swatted Rafa: deduct what he's racked up so far
    ///
    /// Returns the points deducted, or `None` if he wasn't on screen.
    pub fn swat_rafa(&mut self, now_ms: f64) -> Option<u32> {
        if !self.is_running() {
            return None;
        }
        self.dismiss_rafa(now_ms, DismissReason::Swatted)
    }

    /// Fire every session timer due at `now_ms`, one at a time
    ///
    /// Returns how many fired.
    pub fn pump_timers(&mut self, now_ms: f64) -> usize {
        let mut fired = 0;
        while self.is_running() {
            let Some((id, kind)) = self.timers.pop_due(now_ms) else {
                break;
            };
            fired += 1;

            match kind {
                TimerKind::RafaAppear => {
                    if self.rafa.appear(&mut self.timers, &self.tuning, now_ms, id) {
                        self.events.push(GameEvent::RafaAppeared {
                            appearance: self.rafa.appearances(),
                        });
                    }
                }
                TimerKind::RafaPenalty => match self.rafa.penalty_tick(&self.tuning, id) {
                    PenaltyTick::Pending(points) => {
                        self.events.push(GameEvent::RafaPenaltyPending { points });
                    }
                    PenaltyTick::CapReached => {
                        self.dismiss_rafa(now_ms, DismissReason::Expired);
                    }
                    PenaltyTick::Ignored => {
                        log::warn!("Dropped stale Rafa penalty timer {:?}", id);
                    }
                },
            }
        }
        fired
    }

    fn dismiss_rafa(&mut self, now_ms: f64, reason: DismissReason) -> Option<u32> {
        let penalty = self.rafa.dismiss(&mut self.timers)?;
        self.state.apply_score_delta(-(penalty as i32));

        let phrase = match reason {
            DismissReason::Swatted => Some(pick_phrase(&mut self.rng).to_string()),
            DismissReason::Expired => None,
        };
        self.events.push(GameEvent::RafaDismissed {
            penalty,
            reason,
            phrase,
        });
        log::info!("Rafa dismissed ({:?}), -{} points", reason, penalty);

        self.rafa.arm(
            &mut self.timers,
            &mut self.rng,
            &self.tuning,
            now_ms,
            self.state.time_left,
        );
        Some(penalty)
    }

    /// Stop the session and cancel every outstanding timer
    ///
    /// A penalty Rafa was still accruing is dropped, not deducted. Calling
    /// this more than once is harmless.
    pub fn end(&mut self) {
        if self.phase == SessionPhase::Over {
            return;
        }

        self.rafa.shutdown(&mut self.timers);
        let cancelled = self.timers.cancel_all();
        self.phase = SessionPhase::Over;
        self.events.push(GameEvent::SessionEnded {
            score: self.state.score(),
            mode: self.state.mode(),
        });
        log::info!(
            "Session over: score {} ({} stray timers cancelled)",
            self.state.score(),
            cancelled
        );
    }
}
