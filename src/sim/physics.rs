//! Fall, spin and catch
//!
//! One pass over the object list per tick: move, test against the tray, and
//! keep only what is still on screen and uncaught.

use super::collision::hits_tray;
use super::layout::Layout;
use super::state::{Feedback, GameEvent, SessionState};

/// What a single `advance` did to the score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreDelta {
    /// Net points applied
    pub points: i32,
    /// Objects that landed in the tray
    pub caught: u32,
    /// Objects that fell past the bottom edge
    pub dropped: u32,
}

/// Advance every object by `dt` seconds at the given speed multiplier
///
/// Caught objects score and are removed; objects below the viewport are
/// removed silently. Nothing below the viewport survives the call.
pub fn advance(
    state: &mut SessionState,
    dt: f32,
    multiplier: f32,
    layout: &Layout,
    events: &mut Vec<GameEvent>,
) -> ScoreDelta {
    let mut delta = ScoreDelta::default();
    let viewport = layout.viewport;
    let objects = std::mem::take(&mut state.objects);
    let mut survivors = Vec::with_capacity(objects.len());

    for mut obj in objects {
        obj.pos.y += obj.speed * multiplier * dt;
        obj.rotation += obj.rotation_speed * dt;

        if hits_tray(obj.pos, obj.size, &layout.tray, &viewport) {
            let points = obj.kind.points();
            state.apply_score_delta(points);
            delta.points += points;
            delta.caught += 1;
            events.push(GameEvent::Caught {
                kind: obj.kind,
                points,
                feedback: Feedback::for_points(points),
            });
        } else if obj.pos.y < viewport.height {
            survivors.push(obj);
        } else {
            delta.dropped += 1;
        }
    }

    state.objects = survivors;
    delta
}
