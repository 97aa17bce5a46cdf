//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only arrives as timestamps passed in by the host
//! - Seeded RNG only, owned by the session
//! - Timers live in the session's queue, never in the host
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod layout;
pub mod physics;
pub mod rafa;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timers;

pub use collision::{Rect, hits_tray};
pub use difficulty::{speed_multiplier, speed_multiplier_with};
pub use layout::{Layout, Tray, Viewport};
pub use physics::{ScoreDelta, advance};
pub use rafa::{PenaltyTick, RafaController, RafaPhase};
pub use session::{Session, SessionPhase};
pub use spawner::{Spawner, choose_kind, spawn};
pub use state::{
    DismissReason, FallingObject, Feedback, GameEvent, GameMode, ObjectKind, SessionState,
};
pub use tick::{FrameClock, TickStatus, tick};
pub use timers::{TimerId, TimerKind, TimerQueue};
