//! Session state and core simulation types
//!
//! Everything one play session reads and mutates lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::backend::RedemptionCode;
use crate::consts::SESSION_DURATION;

/// Falling item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Bacon,
    Cebolla,
    Lechuga,
    Pan,
    Queso,
    Miel,
    /// Rare bonus item
    Honey,
    Zapato,
    Lejia,
}

impl ObjectKind {
    /// Burger ingredients, drawn uniformly once the roll lands in the good band
    pub const GOOD: [ObjectKind; 6] = [
        ObjectKind::Bacon,
        ObjectKind::Cebolla,
        ObjectKind::Lechuga,
        ObjectKind::Pan,
        ObjectKind::Queso,
        ObjectKind::Miel,
    ];

    /// Things that don't belong on a burger
    pub const BAD: [ObjectKind; 2] = [ObjectKind::Zapato, ObjectKind::Lejia];

    pub const ALL: [ObjectKind; 9] = [
        ObjectKind::Bacon,
        ObjectKind::Cebolla,
        ObjectKind::Lechuga,
        ObjectKind::Pan,
        ObjectKind::Queso,
        ObjectKind::Miel,
        ObjectKind::Honey,
        ObjectKind::Zapato,
        ObjectKind::Lejia,
    ];

    /// Score change when caught in the tray
    pub const fn points(self) -> i32 {
        match self {
            ObjectKind::Honey => 20,
            ObjectKind::Zapato | ObjectKind::Lejia => -5,
            _ => 15,
        }
    }

    /// Sprite / asset key
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Bacon => "bacon",
            ObjectKind::Cebolla => "cebolla",
            ObjectKind::Lechuga => "lechuga",
            ObjectKind::Pan => "pan",
            ObjectKind::Queso => "queso",
            ObjectKind::Miel => "miel",
            ObjectKind::Honey => "honey",
            ObjectKind::Zapato => "zapato",
            ObjectKind::Lejia => "lejia",
        }
    }
}

/// A falling item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: u32,
    pub kind: ObjectKind,
    /// Top-left corner (pixels)
    pub pos: Vec2,
    /// Base fall speed (pixels/s), scaled by the difficulty multiplier each tick
    pub speed: f32,
    /// Radians
    pub rotation: f32,
    /// Radians/s
    pub rotation_speed: f32,
    /// Side length of the square sprite (pixels)
    pub size: f32,
}

/// Positive or negative catch, for audio/UI cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    Positive,
    Negative,
}

impl Feedback {
    pub fn for_points(points: i32) -> Self {
        if points > 0 {
            Feedback::Positive
        } else {
            Feedback::Negative
        }
    }
}

/// Why a Rafa appearance ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DismissReason {
    /// The player swatted him
    Swatted,
    /// Penalty hit the cap and he left on his own
    Expired,
}

/// Whether the run is tied to a redemption code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Normal,
    Code,
}

/// Things the host should react to (sound, overlays, screens)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned {
        kind: ObjectKind,
    },
    Caught {
        kind: ObjectKind,
        points: i32,
        feedback: Feedback,
    },
    RafaAppeared {
        appearance: u32,
    },
    /// Points that will be lost if Rafa isn't dealt with
    RafaPenaltyPending {
        points: u32,
    },
    RafaDismissed {
        penalty: u32,
        reason: DismissReason,
        phrase: Option<String>,
    },
    SessionEnded {
        score: i64,
        mode: GameMode,
    },
}

/// Mutable record of one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// May go negative through Rafa penalties and bad catches
    score: i64,
    /// Seconds remaining
    pub time_left: f32,
    /// Falling items in spawn order
    pub objects: Vec<FallingObject>,
    mode: GameMode,
    validated_code: Option<RedemptionCode>,
    next_id: u32,
}

impl SessionState {
    /// Fresh state for an unranked run
    pub fn normal() -> Self {
        Self::new(GameMode::Normal, None)
    }

    /// Fresh state for a run tied to a server-validated code
    pub fn with_code(code: RedemptionCode) -> Self {
        Self::new(GameMode::Code, Some(code))
    }

    fn new(mode: GameMode, validated_code: Option<RedemptionCode>) -> Self {
        Self {
            score: 0,
            time_left: SESSION_DURATION,
            objects: Vec::new(),
            mode,
            validated_code,
            next_id: 1,
        }
    }

    /// Back to score 0, full clock, empty sky
    pub fn reset(&mut self, duration: f32) {
        self.score = 0;
        self.time_left = duration;
        self.objects.clear();
        self.next_id = 1;
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    /// The one place score changes
    pub fn apply_score_delta(&mut self, delta: i32) {
        self.score += i64::from(delta);
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn validated_code(&self) -> Option<&RedemptionCode> {
        self.validated_code.as_ref()
    }

    /// Allocate a new object ID
    pub fn next_object_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Seconds since the session started
    pub fn elapsed(&self, duration: f32) -> f32 {
        duration - self.time_left
    }
}
