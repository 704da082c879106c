// Math utilities and helper functions

use glam::Vec2;

/// Axis-aligned rectangle in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Create a rectangle from its corners
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Center point of the rectangle
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Full size of the rectangle
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}
