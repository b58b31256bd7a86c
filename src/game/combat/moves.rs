// Moves: frame-indexed hitbox schedules that act as a character state
//
// A `MoveDef` is authoring data, validated once and shared through an `Arc`.
// A `MoveInstance` is one activation of it: fresh hitboxes (mirrored for
// left-facing owners), a tick counter and the one-hit-per-swing registry.

use std::sync::Arc;

use glam::Vec2;

use super::hitbox::{validate_chains, ChainFault, Hitbox, HitboxId};
use super::resolver::HitRegistry;
use crate::error::ConfigError;
use crate::game::characters::{EntityId, Facing, ImageKey, SpriteTable};
use crate::game::events::SoundCue;
use crate::game::projectile::ProjectileDef;

/// Grounded attacks run to completion; aerials are cut short by landing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Ground,
    Aerial { landing_lag: u32 },
}

/// State a move hands over to when its last frame has played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NextState {
    /// Stand if grounded, fall if airborne
    #[default]
    Default,
    Crouch,
    /// Helpless fall until landing
    SpecialFall,
}

/// Replacement for ambient physics on specific frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhysicsOverride {
    /// No integration at all; position and velocity are held
    Freeze,
    /// Add a facing-relative horizontal boost, set vertical speed, and mark
    /// the owner airborne. No integration on that tick.
    Launch { u_boost: f32, v: f32 },
}

/// A physics override active for frames `start..end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsWindow {
    pub start: u32,
    pub end: u32,
    pub effect: PhysicsOverride,
}

/// Velocity imposed when the move starts (`u` is facing-relative)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StartVelocity {
    pub u: Option<f32>,
    pub v: Option<f32>,
}

/// Projectile fired once per activation when the move reaches `tick`
#[derive(Debug, Clone)]
pub struct ProjectileSpawn {
    pub tick: u32,
    /// Spawn point relative to the owner's centre, authored facing right
    pub offset: Vec2,
    pub projectile: Arc<ProjectileDef>,
}

/// One frame of a move
#[derive(Debug, Clone, PartialEq)]
pub struct FrameData {
    pub image: ImageKey,
    pub hitboxes: Vec<HitboxId>,
}

/// Validated move authoring data
#[derive(Debug, Clone)]
pub struct MoveDef {
    name: &'static str,
    kind: MoveKind,
    hitboxes: Vec<Hitbox>,
    frames: Vec<FrameData>,
    sound: Option<SoundCue>,
    start_velocity: Option<StartVelocity>,
    physics: Vec<PhysicsWindow>,
    spawn: Option<ProjectileSpawn>,
    next_state: NextState,
}

impl MoveDef {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    pub fn hitboxes(&self) -> &[Hitbox] {
        &self.hitboxes
    }

    pub fn frames(&self) -> &[FrameData] {
        &self.frames
    }

    pub fn sound(&self) -> Option<SoundCue> {
        self.sound
    }

    pub fn start_velocity(&self) -> Option<StartVelocity> {
        self.start_velocity
    }

    pub fn next_state(&self) -> NextState {
        self.next_state
    }

    pub fn spawn(&self) -> Option<&ProjectileSpawn> {
        self.spawn.as_ref()
    }

    /// Number of frames, which is also the tick the move ends on
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Landing lag if this is an aerial
    pub fn landing_lag(&self) -> Option<u32> {
        match self.kind {
            MoveKind::Aerial { landing_lag } => Some(landing_lag),
            MoveKind::Ground => None,
        }
    }

    /// Check every frame image against the owner's sprite strips
    pub fn validate_images(&self, sprites: &SpriteTable) -> Result<(), ConfigError> {
        for (frame, data) in self.frames.iter().enumerate() {
            let Some(available) = sprites.frame_count(data.image.sprite) else {
                return Err(ConfigError::UnknownSprite {
                    move_name: self.name.to_string(),
                    sprite: data.image.sprite.to_string(),
                });
            };
            if data.image.index >= available {
                return Err(ConfigError::MissingAnimationFrame {
                    move_name: self.name.to_string(),
                    frame,
                    sprite: data.image.sprite.to_string(),
                    index: data.image.index,
                    available,
                });
            }
        }
        Ok(())
    }
}

/// Authoring helper for [`MoveDef`]
///
/// ```rust
/// use rusted_punch::game::combat::{Hitbox, MoveBuilder};
///
/// let mut jab = MoveBuilder::ground("jab");
/// jab.sprite("jab");
/// let fist = jab.hitbox(Hitbox::new(40.0, 30.0).offset(30.0, 0.0).damage(4.0));
/// jab.frame(0, &[fist]).frames(2, 0, &[]);
/// let jab = jab.build().unwrap();
/// assert_eq!(jab.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MoveBuilder {
    name: &'static str,
    kind: MoveKind,
    sprite: &'static str,
    hitboxes: Vec<Hitbox>,
    frames: Vec<FrameData>,
    sound: Option<SoundCue>,
    start_velocity: Option<StartVelocity>,
    physics: Vec<PhysicsWindow>,
    spawn: Option<ProjectileSpawn>,
    next_state: NextState,
}

impl MoveBuilder {
    fn new(name: &'static str, kind: MoveKind) -> Self {
        Self {
            name,
            kind,
            sprite: name,
            hitboxes: Vec::new(),
            frames: Vec::new(),
            sound: None,
            start_velocity: None,
            physics: Vec::new(),
            spawn: None,
            next_state: NextState::Default,
        }
    }

    /// A grounded move
    pub fn ground(name: &'static str) -> Self {
        Self::new(name, MoveKind::Ground)
    }

    /// An aerial, truncated into `landing_lag` ticks of lag on landing
    pub fn aerial(name: &'static str, landing_lag: u32) -> Self {
        Self::new(name, MoveKind::Aerial { landing_lag })
    }

    /// Sprite strip used by frames added after this call
    pub fn sprite(&mut self, sprite: &'static str) -> &mut Self {
        self.sprite = sprite;
        self
    }

    /// Add a hitbox to the move's table and return its id
    pub fn hitbox(&mut self, hitbox: Hitbox) -> HitboxId {
        self.hitboxes.push(hitbox);
        self.hitboxes.len() - 1
    }

    /// Append one frame showing `image` with the given hitboxes active
    pub fn frame(&mut self, image: usize, hitboxes: &[HitboxId]) -> &mut Self {
        self.frames.push(FrameData {
            image: ImageKey::new(self.sprite, image),
            hitboxes: hitboxes.to_vec(),
        });
        self
    }

    /// Append `count` identical frames
    pub fn frames(&mut self, count: usize, image: usize, hitboxes: &[HitboxId]) -> &mut Self {
        for _ in 0..count {
            self.frame(image, hitboxes);
        }
        self
    }

    /// Cue fired when the move starts
    pub fn sound(&mut self, cue: SoundCue) -> &mut Self {
        self.sound = Some(cue);
        self
    }

    pub fn start_velocity(&mut self, u: Option<f32>, v: Option<f32>) -> &mut Self {
        self.start_velocity = Some(StartVelocity { u, v });
        self
    }

    /// Override physics on frames `start..end`
    pub fn physics(&mut self, start: u32, end: u32, effect: PhysicsOverride) -> &mut Self {
        self.physics.push(PhysicsWindow { start, end, effect });
        self
    }

    /// Fire `projectile` when the move reaches `tick`
    pub fn spawn(
        &mut self,
        tick: u32,
        offset: Vec2,
        projectile: Arc<ProjectileDef>,
    ) -> &mut Self {
        self.spawn = Some(ProjectileSpawn {
            tick,
            offset,
            projectile,
        });
        self
    }

    pub fn next_state(&mut self, next: NextState) -> &mut Self {
        self.next_state = next;
        self
    }

    /// Validate and freeze the move
    pub fn build(self) -> Result<MoveDef, ConfigError> {
        let move_name = || self.name.to_string();

        for (frame, data) in self.frames.iter().enumerate() {
            if let Some(&hitbox) = data.hitboxes.iter().find(|&&id| id >= self.hitboxes.len()) {
                return Err(ConfigError::UnknownHitbox {
                    move_name: move_name(),
                    frame,
                    hitbox,
                });
            }
        }

        validate_chains(&self.hitboxes).map_err(|fault| match fault {
            ChainFault::UnknownSibling { hitbox, sibling } => ConfigError::UnknownSibling {
                move_name: move_name(),
                hitbox,
                sibling,
            },
            ChainFault::Cycle { hitbox } => ConfigError::PriorityCycle {
                move_name: move_name(),
                hitbox,
            },
        })?;

        if let Some(spawn) = &self.spawn {
            if spawn.tick as usize >= self.frames.len() {
                return Err(ConfigError::SpawnOutOfRange {
                    move_name: move_name(),
                    tick: spawn.tick,
                    frames: self.frames.len(),
                });
            }
        }

        for window in &self.physics {
            if window.start >= window.end || window.end as usize > self.frames.len() {
                return Err(ConfigError::PhysicsWindowOutOfRange {
                    move_name: move_name(),
                    start: window.start,
                    end: window.end,
                    frames: self.frames.len(),
                });
            }
        }

        Ok(MoveDef {
            name: self.name,
            kind: self.kind,
            hitboxes: self.hitboxes,
            frames: self.frames,
            sound: self.sound,
            start_velocity: self.start_velocity,
            physics: self.physics,
            spawn: self.spawn,
            next_state: self.next_state,
        })
    }
}

/// One activation of a move by one owner
#[derive(Debug, Clone)]
pub struct MoveInstance {
    def: Arc<MoveDef>,
    /// Non-owning back-reference to the character running the move
    owner: EntityId,
    facing: Facing,
    /// Fresh copies for this activation, mirrored for left facing
    hitboxes: Vec<Hitbox>,
    /// Index of the frame being shown; advances by one per (unfrozen) tick
    tick: u32,
    hits: HitRegistry,
    spawned: bool,
}

impl MoveInstance {
    pub fn new(def: Arc<MoveDef>, owner: EntityId, facing: Facing) -> Self {
        let hitboxes = match facing {
            Facing::Right => def.hitboxes.clone(),
            Facing::Left => def.hitboxes.iter().map(Hitbox::flip_x).collect(),
        };
        Self {
            def,
            owner,
            facing,
            hitboxes,
            tick: 0,
            hits: HitRegistry::default(),
            spawned: false,
        }
    }

    pub fn def(&self) -> &MoveDef {
        &self.def
    }

    pub fn name(&self) -> &'static str {
        self.def.name
    }

    pub fn owner(&self) -> EntityId {
        self.owner
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// Advance to the next frame
    pub fn step(&mut self) {
        self.tick = self.tick.saturating_add(1);
    }

    /// Whether every frame has played; no wraparound
    pub fn is_complete(&self) -> bool {
        self.tick as usize >= self.def.frames.len()
    }

    pub fn current_frame(&self) -> Option<&FrameData> {
        self.def.frames.get(self.tick as usize)
    }

    pub fn image(&self) -> Option<ImageKey> {
        self.current_frame().map(|frame| frame.image)
    }

    /// This activation's hitbox table (facing already applied)
    pub fn hitboxes(&self) -> &[Hitbox] {
        &self.hitboxes
    }

    /// Ids of the hitboxes live on the current frame; often empty
    pub fn active_hitbox_ids(&self) -> &[HitboxId] {
        self.current_frame()
            .map(|frame| frame.hitboxes.as_slice())
            .unwrap_or(&[])
    }

    /// Physics override for the current frame, if one is authored
    pub fn physics_override(&self) -> Option<PhysicsOverride> {
        self.def
            .physics
            .iter()
            .find(|window| window.start <= self.tick && self.tick < window.end)
            .map(|window| window.effect)
    }

    /// The projectile due on this tick. Returns it at most once per
    /// activation, so hitpause replays of the same tick do not respawn it.
    pub fn take_spawn(&mut self) -> Option<ProjectileSpawn> {
        if self.spawned {
            return None;
        }
        let spawn = self.def.spawn.as_ref().filter(|spawn| spawn.tick == self.tick)?;
        self.spawned = true;
        Some(spawn.clone())
    }

    pub fn landing_lag(&self) -> Option<u32> {
        self.def.landing_lag()
    }

    pub fn next_state(&self) -> NextState {
        self.def.next_state
    }

    pub fn hits(&self) -> &HitRegistry {
        &self.hits
    }

    pub fn hits_mut(&mut self) -> &mut HitRegistry {
        &mut self.hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::roster::projectiles::laser;

    fn fair() -> MoveDef {
        let mut fair = MoveBuilder::aerial("forward_air", 11);
        fair.sprite("fair");
        let sweet = fair.hitbox(
            Hitbox::new(80.0, 40.0)
                .offset(20.0, 0.0)
                .rotation(30.0)
                .knockback(10.0, 30.0, 10.0)
                .damage(9.0),
        );
        let sour = fair.hitbox(
            Hitbox::new(80.0, 40.0)
                .offset(20.0, 0.0)
                .knockback(5.0, 45.0, 5.0)
                .damage(3.0),
        );
        fair.frames(2, 0, &[sour])
            .frames(2, 1, &[])
            .frames(2, 0, &[sweet])
            .frames(2, 1, &[]);
        fair.build().unwrap()
    }

    #[test]
    fn test_build_records_frames_and_lag() {
        let fair = fair();
        assert_eq!(fair.len(), 8);
        assert_eq!(fair.landing_lag(), Some(11));
        assert_eq!(fair.frames()[2].image, ImageKey::new("fair", 1));
    }

    #[test]
    fn test_build_rejects_unknown_hitbox() {
        let mut bad = MoveBuilder::ground("jab");
        bad.frame(0, &[3]);
        assert_eq!(
            bad.build().unwrap_err(),
            ConfigError::UnknownHitbox {
                move_name: "jab".to_string(),
                frame: 0,
                hitbox: 3
            }
        );
    }

    #[test]
    fn test_build_rejects_priority_cycle() {
        let mut bad = MoveBuilder::ground("utilt");
        let low = bad.hitbox(Hitbox::new(10.0, 10.0).sibling(1));
        let high = bad.hitbox(Hitbox::new(10.0, 10.0).sibling(low));
        bad.frame(0, &[low, high]);
        assert!(matches!(
            bad.build(),
            Err(ConfigError::PriorityCycle { .. })
        ));
    }

    #[test]
    fn test_build_rejects_late_spawn() {
        let mut bad = MoveBuilder::aerial("laser", 0);
        bad.frames(3, 0, &[])
            .spawn(5, Vec2::ZERO, Arc::new(laser()));
        assert!(matches!(
            bad.build(),
            Err(ConfigError::SpawnOutOfRange { tick: 5, .. })
        ));
    }

    #[test]
    fn test_build_rejects_physics_window_past_end() {
        let mut bad = MoveBuilder::aerial("up_special", 0);
        bad.frames(2, 0, &[]).physics(0, 4, PhysicsOverride::Freeze);
        assert!(matches!(
            bad.build(),
            Err(ConfigError::PhysicsWindowOutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_images() {
        let fair = fair();
        let sprites = SpriteTable::new().with_animation("fair", 2);
        assert_eq!(fair.validate_images(&sprites), Ok(()));

        let short = SpriteTable::new().with_animation("fair", 1);
        assert!(matches!(
            fair.validate_images(&short),
            Err(ConfigError::MissingAnimationFrame { index: 1, .. })
        ));

        assert!(matches!(
            fair.validate_images(&SpriteTable::new()),
            Err(ConfigError::UnknownSprite { .. })
        ));
    }

    #[test]
    fn test_instance_runs_without_wraparound() {
        let mut instance = MoveInstance::new(Arc::new(fair()), 0, Facing::Right);
        let mut ticks = 0;
        while !instance.is_complete() {
            assert!(instance.current_frame().is_some());
            instance.step();
            ticks += 1;
        }
        assert_eq!(ticks, 8);
        assert!(instance.current_frame().is_none());
        assert!(instance.active_hitbox_ids().is_empty());
    }

    #[test]
    fn test_active_hitboxes_follow_frames() {
        let mut instance = MoveInstance::new(Arc::new(fair()), 0, Facing::Right);
        assert_eq!(instance.active_hitbox_ids(), &[1]);
        instance.step();
        instance.step();
        assert!(instance.active_hitbox_ids().is_empty());
        instance.step();
        instance.step();
        assert_eq!(instance.active_hitbox_ids(), &[0]);
    }

    #[test]
    fn test_left_facing_instance_gets_mirrored_hitboxes() {
        let def = Arc::new(fair());
        let instance = MoveInstance::new(def.clone(), 0, Facing::Left);
        assert_eq!(instance.hitboxes()[0].x_offset, -20.0);
        assert_eq!(instance.hitboxes()[0].knockback_angle, 150.0);
        // Authoring data untouched
        assert_eq!(def.hitboxes()[0].x_offset, 20.0);
    }

    #[test]
    fn test_physics_override_window() {
        let mut up_b = MoveBuilder::aerial("up_special", 0);
        up_b.frames(6, 0, &[])
            .physics(0, 2, PhysicsOverride::Freeze)
            .physics(2, 3, PhysicsOverride::Launch { u_boost: 2.0, v: -13.0 });
        let mut instance = MoveInstance::new(Arc::new(up_b.build().unwrap()), 0, Facing::Right);

        assert_eq!(instance.physics_override(), Some(PhysicsOverride::Freeze));
        instance.step();
        assert_eq!(instance.physics_override(), Some(PhysicsOverride::Freeze));
        instance.step();
        assert!(matches!(
            instance.physics_override(),
            Some(PhysicsOverride::Launch { .. })
        ));
        instance.step();
        assert_eq!(instance.physics_override(), None);
    }

    #[test]
    fn test_spawn_fires_once_per_activation() {
        let mut shot = MoveBuilder::aerial("aerial_neutral_special", 0);
        shot.frames(9, 0, &[])
            .spawn(5, Vec2::new(0.0, 10.0), Arc::new(laser()));
        let mut instance = MoveInstance::new(Arc::new(shot.build().unwrap()), 0, Facing::Right);

        for _ in 0..5 {
            assert!(instance.take_spawn().is_none());
            instance.step();
        }
        assert!(instance.take_spawn().is_some());
        // Replaying the same tick (hitpause) does not fire again
        assert!(instance.take_spawn().is_none());
    }
}
