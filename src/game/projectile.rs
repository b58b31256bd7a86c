// Projectiles: free-flying hitbox carriers fired by moves

use std::sync::Arc;

use glam::Vec2;

use crate::engine::physics::{Aabb, Body};
use crate::error::ConfigError;
use crate::game::characters::{DrawRequest, EntityId, Facing, ImageKey};
use crate::game::combat::hitbox::validate_chains;
use crate::game::combat::resolver::Attack;
use crate::game::combat::{HitRegistry, Hitbox, HitboxId, PendingHit};
use crate::game::events::SoundCue;

/// Authoring data for a projectile type
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileDef {
    /// Also the sprite strip it is drawn with
    pub name: &'static str,
    pub width: f32,
    pub height: f32,
    /// Horizontal speed per tick in the facing direction
    pub speed: f32,
    /// Ticks before it expires on its own; `None` flies until it leaves the
    /// blast zone or hits something
    pub lifetime: Option<u32>,
    /// Authored facing right; mirrored at spawn for left-facing owners
    pub hitboxes: Vec<Hitbox>,
    /// Incoming hits are ignored entirely
    pub immune_to_hits: bool,
    /// Removed as soon as one of its hitboxes lands
    pub dies_on_hit: bool,
    /// Cue fired when it is spawned
    pub sound: Option<SoundCue>,
}

impl ProjectileDef {
    pub fn new(name: &'static str, width: f32, height: f32, speed: f32) -> Self {
        Self {
            name,
            width,
            height,
            speed,
            lifetime: None,
            hitboxes: Vec::new(),
            immune_to_hits: false,
            dies_on_hit: false,
            sound: None,
        }
    }

    pub fn with_hitbox(mut self, hitbox: Hitbox) -> Self {
        self.hitboxes.push(hitbox);
        self
    }

    pub fn with_lifetime(mut self, ticks: u32) -> Self {
        self.lifetime = Some(ticks);
        self
    }

    pub fn immune_to_hits(mut self) -> Self {
        self.immune_to_hits = true;
        self
    }

    pub fn dies_on_hit(mut self) -> Self {
        self.dies_on_hit = true;
        self
    }

    pub fn with_sound(mut self, cue: SoundCue) -> Self {
        self.sound = Some(cue);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason| ConfigError::InvalidProjectile {
            projectile: self.name,
            reason,
        };
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(invalid("size must be positive"));
        }
        if !self.speed.is_finite() {
            return Err(invalid("speed must be finite"));
        }
        validate_chains(&self.hitboxes).map_err(|_| invalid("malformed priority chain"))
    }
}

/// A live projectile in the level
#[derive(Debug, Clone)]
pub struct Projectile {
    id: EntityId,
    /// Character that fired it; never struck by it
    owner: EntityId,
    def: Arc<ProjectileDef>,
    body: Body,
    facing: Facing,
    hitboxes: Vec<Hitbox>,
    active: Vec<HitboxId>,
    hits: HitRegistry,
    age: u32,
    hitpause: u32,
    /// Spent this tick in hitpause
    frozen: bool,
    alive: bool,
}

impl Projectile {
    pub fn new(
        id: EntityId,
        owner: EntityId,
        def: Arc<ProjectileDef>,
        position: Vec2,
        facing: Facing,
    ) -> Self {
        let hitboxes: Vec<Hitbox> = match facing {
            Facing::Right => def.hitboxes.clone(),
            Facing::Left => def.hitboxes.iter().map(Hitbox::flip_x).collect(),
        };
        let body = Body::new(position.x, position.y, def.width, def.height)
            .with_velocity(def.speed * facing.sign(), 0.0);
        Self {
            id,
            owner,
            active: (0..hitboxes.len()).collect(),
            hitboxes,
            def,
            body,
            facing,
            hits: HitRegistry::default(),
            age: 0,
            hitpause: 0,
            frozen: false,
            alive: true,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn owner(&self) -> EntityId {
        self.owner
    }

    pub fn def(&self) -> &ProjectileDef {
        &self.def
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn hurtbox(&self) -> Aabb {
        self.body.rect()
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn hitpause(&self) -> u32 {
        self.hitpause
    }

    pub fn set_hitpause(&mut self, ticks: u32) {
        self.hitpause = self.hitpause.max(ticks);
    }

    /// Fly one tick, unless frozen by hitpause. Platforms do not stop it.
    pub fn advance(&mut self) {
        self.frozen = self.hitpause > 0;
        if self.frozen {
            self.hitpause -= 1;
            return;
        }
        self.body.integrate();
        self.age += 1;
        if self.def.lifetime.is_some_and(|lifetime| self.age >= lifetime) {
            self.alive = false;
        }
    }

    /// This tick's offence, or `None` while frozen or dead
    pub fn attack(&self) -> Option<Attack<'_>> {
        if !self.alive || self.frozen || self.hitpause > 0 {
            return None;
        }
        Some(Attack {
            attacker: self.id,
            lineage: Some(self.owner),
            origin: self.body.position,
            table: &self.hitboxes,
            active: &self.active,
            hits: &self.hits,
        })
    }

    /// Reaction to being struck
    pub fn handle_get_hit(&mut self, _hit: &PendingHit) {
        if !self.def.immune_to_hits {
            self.alive = false;
        }
    }

    /// Reaction to one of its own hitboxes landing
    pub fn handle_land_hit(&mut self, hit: &PendingHit) {
        self.hits.record(&hit.family, hit.victim);
        if self.def.dies_on_hit {
            self.alive = false;
        }
    }

    pub fn draw_request(&self) -> DrawRequest {
        DrawRequest {
            entity: self.id,
            position: self.body.position,
            size: self.body.half_extents * 2.0,
            facing: self.facing,
            image: ImageKey::new(self.def.name, 0),
            debug: None,
        }
    }
}
