use glam::Vec2;

use super::collision::Aabb;

/// Kinematic state of anything that moves through the stage
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Centre of the body in screen space (+y down)
    pub position: Vec2,
    /// Velocity in units per tick (`x` = u, `y` = v)
    pub velocity: Vec2,
    /// Half of the collision rectangle's width and height
    pub half_extents: Vec2,
    /// Whether the body lacks ground support
    pub airborne: bool,
}

impl Body {
    /// Create a resting airborne body; the stage decides when it lands
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            half_extents: Vec2::new(width * 0.5, height * 0.5),
            airborne: true,
        }
    }

    /// Builder-style initial velocity
    pub fn with_velocity(mut self, u: f32, v: f32) -> Self {
        self.velocity = Vec2::new(u, v);
        self
    }

    /// Collision rectangle, which doubles as the hurtbox
    pub fn rect(&self) -> Aabb {
        Aabb {
            center: self.position,
            half_extents: self.half_extents,
        }
    }

    /// Horizontal velocity
    pub fn u(&self) -> f32 {
        self.velocity.x
    }

    /// Vertical velocity (+ is downward)
    pub fn v(&self) -> f32 {
        self.velocity.y
    }

    /// Advance position by one tick of velocity, ignoring the stage
    pub fn integrate(&mut self) {
        self.position += self.velocity;
    }

    /// Teleport and stop
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
        self.velocity = Vec2::ZERO;
    }
}
