//! Two-phase difficulty curve
//!
//! Fall speed is scaled by a multiplier that grows gently for the first half
//! of the session and three times as fast for the second half.

use crate::tuning::Tuning;

/// Speed multiplier for the given time remaining (default tuning)
pub fn speed_multiplier(time_left: f32) -> f32 {
    speed_multiplier_with(&Tuning::default(), time_left)
}

/// Speed multiplier for the given time remaining
///
/// Continuous at the phase boundary: with the default tuning both branches
/// give 1.15 at 30 seconds left.
pub fn speed_multiplier_with(tuning: &Tuning, time_left: f32) -> f32 {
    let threshold = tuning.phase2_threshold;
    if time_left > threshold {
        let elapsed = tuning.session_duration - time_left;
        1.0 + elapsed * tuning.acceleration_phase1
    } else {
        1.0 + (tuning.session_duration - threshold) * tuning.acceleration_phase1
            + (threshold - time_left) * tuning.acceleration_phase2
    }
}
