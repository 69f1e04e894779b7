//! Axis-aligned bounding boxes
//!
//! Screen coordinates: x grows right, y grows down, so `top < bottom`.

use glam::Vec2;

/// Axis-aligned box in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Aabb {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Box from a top-left position and a size
    pub fn from_pos_size(pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            left: pos.x,
            top: pos.y,
            right: pos.x + width,
            bottom: pos.y + height,
        }
    }

    /// Overlap test, non-strict: boxes touching at an edge intersect.
    ///
    /// Zero-size boxes therefore overlap anything they sit on the boundary of.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(self.right < other.left
            || self.left > other.right
            || self.bottom < other.top
            || self.top > other.bottom)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }
}
