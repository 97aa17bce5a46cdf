//! Falling object spawner
//!
//! A countdown, re-drawn after every spawn, decides when the next item drops.
//! The cadence does not depend on difficulty; only fall speed does.

use glam::Vec2;
use rand::Rng;

use super::state::{FallingObject, ObjectKind, SessionState};
use crate::tuning::Tuning;

/// Roll below this is a honey bonus
const HONEY_CHANCE: f32 = 0.05;
/// Roll below this (and above the honey band) is a good ingredient
const GOOD_CUTOFF: f32 = 0.7;

/// Pick an item type: 5% honey, 65% good (split evenly), 30% bad (split evenly)
pub fn choose_kind<R: Rng + ?Sized>(rng: &mut R) -> ObjectKind {
    let roll: f32 = rng.random();
    if roll < HONEY_CHANCE {
        ObjectKind::Honey
    } else if roll < GOOD_CUTOFF {
        ObjectKind::GOOD[rng.random_range(0..ObjectKind::GOOD.len())]
    } else {
        ObjectKind::BAD[rng.random_range(0..ObjectKind::BAD.len())]
    }
}

/// Append a new object just above the viewport and return a copy of it
///
/// A canvas narrower than the object spawns at x = 0.
pub fn spawn<R: Rng + ?Sized>(
    state: &mut SessionState,
    rng: &mut R,
    tuning: &Tuning,
    viewport_width: f32,
    object_size: f32,
) -> FallingObject {
    let kind = choose_kind(rng);
    let span = (viewport_width - object_size).max(0.0);
    let x = rng.random::<f32>() * span;
    let speed = tuning.fall_speed_min
        + rng.random::<f32>() * (tuning.fall_speed_max - tuning.fall_speed_min);
    let rotation_speed = (rng.random::<f32>() - 0.5) * 2.0 * tuning.max_rotation_speed;

    let object = FallingObject {
        id: state.next_object_id(),
        kind,
        pos: Vec2::new(x, -object_size),
        speed,
        rotation: 0.0,
        rotation_speed,
        size: object_size,
    };
    state.objects.push(object.clone());
    object
}

/// Countdown to the next spawn
#[derive(Debug, Clone, Default)]
pub struct Spawner {
    /// Seconds until the next spawn; zero or below means due
    countdown: f32,
}

impl Spawner {
    /// First spawn happens on the first tick
    pub fn new() -> Self {
        Self { countdown: 0.0 }
    }

    pub fn reset(&mut self) {
        self.countdown = 0.0;
    }

    pub fn countdown(&self) -> f32 {
        self.countdown
    }

    /// Run the countdown down by `dt`, spawning once if it expires
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        state: &mut SessionState,
        rng: &mut R,
        tuning: &Tuning,
        dt: f32,
        viewport_width: f32,
        object_size: f32,
    ) -> Option<FallingObject> {
        self.countdown -= dt;
        if self.countdown > 0.0 {
            return None;
        }

        let object = spawn(state, rng, tuning, viewport_width, object_size);
        self.countdown = tuning.spawn_interval_min
            + rng.random::<f32>() * (tuning.spawn_interval_max - tuning.spawn_interval_min);
        log::debug!(
            "Spawned {} at x={:.1}, next in {:.2}s",
            object.kind.as_str(),
            object.pos.x,
            self.countdown
        );
        Some(object)
    }
}
