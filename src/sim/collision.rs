//! Tray collision test
//!
//! Axis-aligned rectangle overlap. Sprite rotation is cosmetic and never
//! applied to the hitbox.

use glam::Vec2;

use super::layout::{Tray, Viewport};

/// Axis-aligned rectangle, top-left anchored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn square(min: Vec2, side: f32) -> Self {
        Self {
            min,
            size: Vec2::splat(side),
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap; touching edges don't count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.max().x > other.min.x
            && self.min.x < other.max().x
            && self.max().y > other.min.y
            && self.min.y < other.max().y
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            size: self.size,
        }
    }
}

/// The tray's hitbox: from its top edge down to the bottom of the viewport
pub fn tray_rect(tray: &Tray, viewport: &Viewport) -> Rect {
    Rect::new(
        Vec2::new(tray.x, tray.top(viewport)),
        Vec2::new(tray.width, tray.height),
    )
}

/// Whether a square object at `pos` is in the tray
///
/// True iff `y + size > tray_top`, `y < viewport_height`,
/// `x + size > tray_x` and `x < tray_x + tray_width`.
pub fn hits_tray(pos: Vec2, size: f32, tray: &Tray, viewport: &Viewport) -> bool {
    Rect::square(pos, size).overlaps(&tray_rect(tray, viewport))
}
