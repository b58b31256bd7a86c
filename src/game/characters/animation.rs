// Visual references handed to the renderer

use std::collections::HashMap;

use glam::Vec2;

use super::character::EntityId;
use super::state::Facing;

/// One image of a sprite strip, e.g. `("fair", 3)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageKey {
    pub sprite: &'static str,
    pub index: usize,
}

impl ImageKey {
    pub const fn new(sprite: &'static str, index: usize) -> Self {
        Self { sprite, index }
    }
}

/// How many images each of a character's sprite strips holds.
///
/// Used to reject move data that points at images that do not exist.
#[derive(Debug, Clone, Default)]
pub struct SpriteTable {
    frame_counts: HashMap<&'static str, usize>,
}

impl SpriteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sprite strip with the given number of images
    pub fn with_animation(mut self, name: &'static str, frame_count: usize) -> Self {
        self.frame_counts.insert(name, frame_count);
        self
    }

    /// Number of images in a strip, if registered
    pub fn frame_count(&self, name: &str) -> Option<usize> {
        self.frame_counts.get(name).copied()
    }

    /// Whether `key` names an existing image
    pub fn contains(&self, key: &ImageKey) -> bool {
        self.frame_count(key.sprite)
            .map_or(false, |count| key.index < count)
    }
}

/// Debug overlay values for one entity
#[derive(Debug, Clone, PartialEq)]
pub struct DebugInfo {
    pub velocity: Vec2,
    pub airborne: bool,
    pub state: &'static str,
    pub damage: f32,
    pub fast_fall: bool,
    pub aerial_jumps: u8,
    pub wall_jumps: u8,
    pub air_dodges: u8,
    pub hitpause: u32,
}

/// Everything the renderer needs to draw one entity for one tick
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRequest {
    pub entity: EntityId,
    pub position: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    pub image: ImageKey,
    pub debug: Option<DebugInfo>,
}
