//! Data-driven game balance
//!
//! Every gameplay number lives here so a session can be replayed or rebalanced
//! from a JSON blob. Missing fields fall back to the compiled-in defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a tuning blob is rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(String),

    #[error("{name} range is inverted ({min} > {max})")]
    InvertedRange {
        name: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
}

/// Gameplay balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub session_duration: f32,
    pub phase2_threshold: f32,
    pub acceleration_phase1: f32,
    pub acceleration_phase2: f32,
    pub fall_speed_min: f32,
    pub fall_speed_max: f32,
    pub max_rotation_speed: f32,
    pub spawn_interval_min: f32,
    pub spawn_interval_max: f32,
    /// `None` feeds raw frame deltas to the simulation, even after a long tab suspend
    pub max_frame_delta: Option<f32>,
    pub rafa_penalty_interval_ms: f64,
    pub rafa_max_penalty: u32,
    pub rafa_max_appearances: u32,
    pub rafa_min_time_left: f32,
    pub rafa_first_delay_ms: (f64, f64),
    pub rafa_rearm_delay_ms: (f64, f64),
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            session_duration: SESSION_DURATION,
            phase2_threshold: PHASE2_TIME_THRESHOLD,
            acceleration_phase1: ACCELERATION_RATE_PHASE1,
            acceleration_phase2: ACCELERATION_RATE_PHASE2,
            fall_speed_min: FALL_SPEED_MIN,
            fall_speed_max: FALL_SPEED_MAX,
            max_rotation_speed: MAX_ROTATION_SPEED,
            spawn_interval_min: SPAWN_INTERVAL_MIN,
            spawn_interval_max: SPAWN_INTERVAL_MAX,
            max_frame_delta: Some(MAX_FRAME_DELTA),
            rafa_penalty_interval_ms: RAFA_PENALTY_INTERVAL_MS,
            rafa_max_penalty: MAX_RAFA_PENALTY,
            rafa_max_appearances: MAX_RAFA_APPEARANCES,
            rafa_min_time_left: RAFA_MIN_TIME_LEFT,
            rafa_first_delay_ms: (RAFA_FIRST_DELAY_MIN_MS, RAFA_FIRST_DELAY_MAX_MS),
            rafa_rearm_delay_ms: (RAFA_REARM_DELAY_MIN_MS, RAFA_REARM_DELAY_MAX_MS),
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning blob
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("session_duration", self.session_duration as f64)?;
        positive("rafa_penalty_interval_ms", self.rafa_penalty_interval_ms)?;
        if let Some(max_dt) = self.max_frame_delta {
            positive("max_frame_delta", max_dt as f64)?;
        }
        ordered(
            "fall_speed",
            self.fall_speed_min as f64,
            self.fall_speed_max as f64,
        )?;
        ordered(
            "spawn_interval",
            self.spawn_interval_min as f64,
            self.spawn_interval_max as f64,
        )?;
        ordered(
            "rafa_first_delay_ms",
            self.rafa_first_delay_ms.0,
            self.rafa_first_delay_ms.1,
        )?;
        ordered(
            "rafa_rearm_delay_ms",
            self.rafa_rearm_delay_ms.0,
            self.rafa_rearm_delay_ms.1,
        )?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), TuningError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NonPositive { name, value })
    }
}

fn ordered(name: &'static str, min: f64, max: f64) -> Result<(), TuningError> {
    if min <= max {
        Ok(())
    } else {
        Err(TuningError::InvertedRange { name, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "session_duration": 30.0 }"#).unwrap();
        assert_eq!(tuning.session_duration, 30.0);
        assert_eq!(tuning.rafa_max_penalty, MAX_RAFA_PENALTY);
        assert_eq!(tuning.max_frame_delta, Some(MAX_FRAME_DELTA));
    }

    #[test]
    fn test_null_frame_delta_disables_clamp() {
        let tuning = Tuning::from_json(r#"{ "max_frame_delta": null }"#).unwrap();
        assert_eq!(tuning.max_frame_delta, None);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = Tuning::from_json(r#"{ "spawn_interval_min": 2.0, "spawn_interval_max": 1.0 }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TuningError::InvertedRange {
                name: "spawn_interval",
                ..
            }
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }
}
