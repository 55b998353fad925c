//! Pixel-space geometry handed over by the page, and the fixed mapping from
//! viewport pixels to the scene's world plane.

use crate::constants::{WORLD_SPAN_X, WORLD_SPAN_Y};
use crate::error::{HaloError, Result};
use glam::Vec2;

/// Viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.area() <= 0.0
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }

    /// Map a viewport pixel to world x/y on the formation plane.
    pub fn pixel_to_world(&self, px: Vec2) -> Result<Vec2> {
        if self.is_empty() {
            return Err(HaloError::EmptyViewport);
        }
        let x = px.x / self.width * WORLD_SPAN_X - WORLD_SPAN_X * 0.5;
        let y = -(px.y / self.height) * WORLD_SPAN_Y + WORLD_SPAN_Y * 0.5;
        Ok(Vec2::new(x, y))
    }
}

/// Bounding client rect of a DOM element, in viewport pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    pub fn intersects(&self, viewport: &Viewport) -> bool {
        self.right() > 0.0
            && self.left < viewport.width
            && self.bottom() > 0.0
            && self.top < viewport.height
    }

    /// Fraction of this rect's area currently inside the viewport, in [0, 1].
    pub fn visible_fraction(&self, viewport: &Viewport) -> f32 {
        let area = self.width * self.height;
        if area <= 0.0 {
            return 0.0;
        }
        let w = (self.right().min(viewport.width) - self.left.max(0.0)).max(0.0);
        let h = (self.bottom().min(viewport.height) - self.top.max(0.0)).max(0.0);
        (w * h / area).clamp(0.0, 1.0)
    }
}
