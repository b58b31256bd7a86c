use glam::Vec2;
use parry2d::math::{Isometry, Vector};
use parry2d::query;
use parry2d::shape::Cuboid;

/// Axis-aligned rectangle in screen space (+y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    /// Build from a centre point and full width/height
    pub fn from_center_size(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            half_extents: Vec2::new(width * 0.5, height * 0.5),
        }
    }

    /// Build from the top-left corner and full width/height
    pub fn from_top_left(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::from_center_size(
            Vec2::new(left + width * 0.5, top + height * 0.5),
            width,
            height,
        )
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.half_extents.x
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.half_extents.x
    }

    pub fn top(&self) -> f32 {
        self.center.y - self.half_extents.y
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + self.half_extents.y
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Same box shifted by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            center: self.center + offset,
            half_extents: self.half_extents,
        }
    }

    /// Whether the rectangle encloses any area
    pub fn has_area(&self) -> bool {
        self.half_extents.x > 0.0 && self.half_extents.y > 0.0
    }
}

/// Rectangle rotated about its centre, used for hitboxes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedRect {
    pub center: Vec2,
    pub half_extents: Vec2,
    /// Degrees, counter-clockwise as seen on screen
    pub rotation: f32,
}

impl OrientedRect {
    pub fn new(center: Vec2, width: f32, height: f32, rotation: f32) -> Self {
        Self {
            center,
            half_extents: Vec2::new(width * 0.5, height * 0.5),
            rotation,
        }
    }

    /// Exact separating-axis overlap test against an axis-aligned box.
    ///
    /// Degenerate rectangles (zero or negative area) never overlap anything.
    pub fn overlaps(&self, target: &Aabb) -> bool {
        if !(self.half_extents.x > 0.0 && self.half_extents.y > 0.0) || !target.has_area() {
            return false;
        }

        // Screen space has +y down, so a counter-clockwise turn on screen is a
        // negative angle in the solver's frame.
        let own_pose = Isometry::new(
            Vector::new(self.center.x, self.center.y),
            -self.rotation.to_radians(),
        );
        let own_shape = Cuboid::new(Vector::new(self.half_extents.x, self.half_extents.y));

        let target_pose = Isometry::translation(target.center.x, target.center.y);
        let target_shape =
            Cuboid::new(Vector::new(target.half_extents.x, target.half_extents.y));

        // Cuboid pairs are always supported by the solver
        query::intersection_test(&own_pose, &own_shape, &target_pose, &target_shape)
            .unwrap_or(false)
    }
}
