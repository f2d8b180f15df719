//! Collision detection for ground-anchored boxes
//!
//! Entities store their bottom edge; boxes are built from it so the
//! overlap test works in plain screen space (y grows downward).

use glam::Vec2;

use super::state::{Obstacle, Runner};

/// Axis-aligned bounding box, `min` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Box for an entity whose `pos` is its bottom-left corner
    pub fn from_bottom_left(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: Vec2::new(pos.x, pos.y - size.y),
            size,
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }
}

/// Strict overlap test. Boxes that only touch along an edge do not collide.
pub fn collide(a: &Aabb, b: &Aabb) -> bool {
    a.min.x < b.min.x + b.size.x
        && a.min.x + a.size.x > b.min.x
        && a.min.y < b.min.y + b.size.y
        && a.min.y + a.size.y > b.min.y
}

/// Index of the first active obstacle (in spawn order) hit by the runner
pub fn first_hit(runner: &Runner, obstacles: &[Obstacle]) -> Option<usize> {
    let runner_box = runner.bbox();
    obstacles
        .iter()
        .position(|o| o.active && collide(&runner_box, &o.bbox()))
}
