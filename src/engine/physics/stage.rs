use glam::Vec2;

use super::body::Body;
use super::collision::Aabb;

/// Probe distance used for support and wall contact checks
const CONTACT_PROBE: f32 = 1.0;

/// A solid piece of stage geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub rect: Aabb,
}

impl Platform {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Aabb::from_top_left(left, top, width, height),
        }
    }
}

/// Which side of a body touches a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
}

/// What the stage reported after moving a body for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    /// The body went from airborne to supported this tick
    pub landed: bool,
    /// The body lost ground support this tick (walked off a ledge)
    pub left_ground: bool,
    /// Wall touched by an airborne body, if any
    pub wall: Option<WallSide>,
}

/// Stage geometry: solid platforms plus the blast zone
#[derive(Debug, Clone)]
pub struct Stage {
    platforms: Vec<Platform>,
    blast_zone: Aabb,
}

impl Stage {
    /// Create a stage with no platforms
    pub fn new(blast_zone: Aabb) -> Self {
        Self {
            platforms: Vec::new(),
            blast_zone,
        }
    }

    /// Builder-style platform registration
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platforms.push(platform);
        self
    }

    /// A wide main stage flanked by two floating blocks
    pub fn battlefield() -> Self {
        Self::new(Aabb::from_top_left(-400.0, -600.0, 2400.0, 1800.0))
            .with_platform(Platform::new(300.0, 600.0, 1000.0, 200.0))
            .with_platform(Platform::new(420.0, 420.0, 180.0, 30.0))
            .with_platform(Platform::new(1000.0, 420.0, 180.0, 30.0))
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn blast_zone(&self) -> &Aabb {
        &self.blast_zone
    }

    /// Whether a rectangle has left the playable area entirely
    pub fn is_out_of_bounds(&self, rect: &Aabb) -> bool {
        !self.blast_zone.overlaps(rect)
    }

    /// Move a body by its velocity, resolving platform penetration one axis at
    /// a time (x, then y), and update its `airborne` flag.
    pub fn move_body(&self, body: &mut Body) -> Contacts {
        let mut contacts = Contacts::default();
        let was_airborne = body.airborne;

        // Horizontal pass
        body.position.x += body.velocity.x;
        for platform in &self.platforms {
            let rect = body.rect();
            if !rect.overlaps(&platform.rect) {
                continue;
            }
            if body.velocity.x > 0.0 {
                body.position.x = platform.rect.left() - body.half_extents.x;
            } else if body.velocity.x < 0.0 {
                body.position.x = platform.rect.right() + body.half_extents.x;
            }
            body.velocity.x = 0.0;
        }

        // Vertical pass
        body.position.y += body.velocity.y;
        let mut supported = false;
        for platform in &self.platforms {
            let rect = body.rect();
            if !rect.overlaps(&platform.rect) {
                continue;
            }
            if body.velocity.y > 0.0 {
                body.position.y = platform.rect.top() - body.half_extents.y;
                supported = true;
            } else if body.velocity.y < 0.0 {
                body.position.y = platform.rect.bottom() + body.half_extents.y;
            }
            body.velocity.y = 0.0;
        }

        if !supported && body.velocity.y >= 0.0 {
            supported = self.has_support(body);
        }

        if supported {
            body.airborne = false;
            contacts.landed = was_airborne;
        } else if body.velocity.y < 0.0 {
            body.airborne = true;
        } else {
            body.airborne = true;
            contacts.left_ground = !was_airborne;
        }

        if body.airborne {
            contacts.wall = self.wall_contact(body);
        }

        contacts
    }

    /// Whether a platform sits directly beneath the body's feet
    pub fn has_support(&self, body: &Body) -> bool {
        let feet = Aabb {
            center: Vec2::new(body.position.x, body.rect().bottom() + CONTACT_PROBE * 0.5),
            half_extents: Vec2::new(body.half_extents.x, CONTACT_PROBE * 0.5),
        };
        self.platforms
            .iter()
            .any(|platform| feet.overlaps(&platform.rect))
    }

    /// Which side of the body is pressed against a platform, if any
    pub fn wall_contact(&self, body: &Body) -> Option<WallSide> {
        let rect = body.rect();
        let left_probe = rect.translated(Vec2::new(-CONTACT_PROBE, 0.0));
        let right_probe = rect.translated(Vec2::new(CONTACT_PROBE, 0.0));
        for platform in &self.platforms {
            if left_probe.overlaps(&platform.rect) {
                return Some(WallSide::Left);
            }
            if right_probe.overlaps(&platform.rect) {
                return Some(WallSide::Right);
            }
        }
        None
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::battlefield()
    }
}
