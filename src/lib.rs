//! Honey Smash - catch the falling burger ingredients in a tray
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, difficulty, Rafa events)
//! - `ranking`: Weekly leaderboard and Hall of Fame views
//! - `backend`: Code validation / score submission client
//! - `platform`: Browser/native platform helpers
//! - `tuning`: Data-driven game balance

pub mod backend;
pub mod platform;
pub mod ranking;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use ranking::{HallOfFame, Leaderboard, RankTier};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Length of one play session (seconds)
    pub const SESSION_DURATION: f32 = 60.0;

    /// Time left (seconds) at which the second, steeper acceleration phase begins
    pub const PHASE2_TIME_THRESHOLD: f32 = 30.0;
    /// Speed multiplier gained per elapsed second before the threshold
    pub const ACCELERATION_RATE_PHASE1: f32 = 0.005;
    /// Speed multiplier gained per elapsed second after the threshold
    pub const ACCELERATION_RATE_PHASE2: f32 = 0.015;

    /// Base fall speed range (pixels/s), drawn once per object
    pub const FALL_SPEED_MIN: f32 = 100.0;
    pub const FALL_SPEED_MAX: f32 = 250.0;
    /// Rotation speed magnitude (radians/s)
    pub const MAX_ROTATION_SPEED: f32 = 1.0;

    /// Delay between spawns (seconds)
    pub const SPAWN_INTERVAL_MIN: f32 = 0.5;
    pub const SPAWN_INTERVAL_MAX: f32 = 1.5;

    /// Layout ratios relative to the canvas width
    pub const OBJECT_SIZE_RATIO: f32 = 0.08;
    pub const TRAY_WIDTH_RATIO: f32 = 0.2;
    /// Tray height as a fraction of tray width
    pub const TRAY_ASPECT: f32 = 0.5;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.1;

    /// Rafa: one penalty point per interval (ms)
    pub const RAFA_PENALTY_INTERVAL_MS: f64 = 1000.0;
    /// Rafa: penalty points accrue up to this cap, then he leaves on his own
    pub const MAX_RAFA_PENALTY: u32 = 15;
    /// Rafa: appearances per session
    pub const MAX_RAFA_APPEARANCES: u32 = 5;
    /// Rafa: only arms while more than this many seconds remain
    pub const RAFA_MIN_TIME_LEFT: f32 = 10.0;
    /// Rafa: first appearance delay range (ms)
    pub const RAFA_FIRST_DELAY_MIN_MS: f64 = 5000.0;
    pub const RAFA_FIRST_DELAY_MAX_MS: f64 = 15000.0;
    /// Rafa: re-arm delay range after a dismissal (ms)
    pub const RAFA_REARM_DELAY_MIN_MS: f64 = 5000.0;
    pub const RAFA_REARM_DELAY_MAX_MS: f64 = 10000.0;
    /// How long the congratulatory phrase stays up (ms)
    pub const RAFA_PHRASE_DISPLAY_MS: f64 = 2000.0;

    /// Buttons ignore repeat presses within this window (ms)
    pub const BUTTON_DEBOUNCE_MS: f64 = 300.0;

    /// Leaderboard rows per page
    pub const RANKING_PAGE_SIZE: usize = 10;
}
