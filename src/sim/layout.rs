//! Canvas geometry the simulation reads every tick
//!
//! The page owns the canvas; these are just the numbers derived from it.

use serde::{Deserialize, Serialize};

use crate::consts::{OBJECT_SIZE_RATIO, TRAY_ASPECT, TRAY_WIDTH_RATIO};

/// Drawable area (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// The player's catching rectangle, resting on the bottom edge
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Tray {
    /// Left edge (pixels)
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Tray {
    /// Y of the tray's top edge
    pub fn top(&self, viewport: &Viewport) -> f32 {
        viewport.height - self.height
    }

    /// Centre the tray under the pointer, kept inside the viewport
    pub fn follow_pointer(&mut self, pointer_x: f32, viewport_width: f32) {
        let max_x = (viewport_width - self.width).max(0.0);
        self.x = (pointer_x - self.width / 2.0).clamp(0.0, max_x);
    }
}

/// Everything geometric the spawner and physics need
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    pub viewport: Viewport,
    pub tray: Tray,
    /// Side length given to newly spawned objects
    pub object_size: f32,
}

impl Layout {
    /// Derive sizes from the canvas, tray centred
    pub fn from_canvas(width: f32, height: f32) -> Self {
        let tray_width = width * TRAY_WIDTH_RATIO;
        Self {
            viewport: Viewport { width, height },
            tray: Tray {
                x: (width - tray_width) / 2.0,
                width: tray_width,
                height: tray_width * TRAY_ASPECT,
            },
            object_size: width * OBJECT_SIZE_RATIO,
        }
    }

    /// Recompute sizes after the canvas changed, keeping the tray where it was
    pub fn resize(&mut self, width: f32, height: f32) {
        let tray_x = self.tray.x;
        *self = Self::from_canvas(width, height);
        let tray_width = self.tray.width;
        self.tray.x = tray_x.clamp(0.0, (width - tray_width).max(0.0));
    }
}
