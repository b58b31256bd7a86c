// Fighter types: stats, sprites and moveset bundled and validated together

use std::collections::BTreeMap;
use std::sync::Arc;

use super::animation::SpriteTable;
use super::stats::CharacterStats;
use crate::error::ConfigError;
use crate::game::combat::MoveDef;

/// Sprite strips every fighter needs for its movement states
pub const STATE_SPRITES: [&str; 8] = [
    "stand",
    "walk",
    "run",
    "crouch",
    "fall",
    "special_fall",
    "air_dodge",
    "shield",
];

/// Input slots a move can be bound to. Declaration order is the order a
/// moveset is walked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MoveSlot {
    Jab,
    ForwardTilt,
    UpTilt,
    DownTilt,
    DashAttack,
    NeutralAir,
    ForwardAir,
    BackAir,
    UpAir,
    DownAir,
    NeutralSpecial,
    UpSpecial,
}

/// Moves bound to slots. Unbound slots simply do nothing when pressed.
#[derive(Debug, Clone, Default)]
pub struct Moveset {
    moves: BTreeMap<MoveSlot, Arc<MoveDef>>,
}

impl Moveset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, slot: MoveSlot, def: MoveDef) -> Self {
        self.moves.insert(slot, Arc::new(def));
        self
    }

    pub fn get(&self, slot: MoveSlot) -> Option<&Arc<MoveDef>> {
        self.moves.get(&slot)
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Bound moves in slot order
    pub fn iter(&self) -> impl Iterator<Item = (&MoveSlot, &Arc<MoveDef>)> {
        self.moves.iter()
    }
}

/// Immutable description of one fighter type, shared by every instance of
/// it through an `Arc`
#[derive(Debug, Clone)]
pub struct CharacterProfile {
    name: &'static str,
    stats: CharacterStats,
    sprites: SpriteTable,
    moveset: Moveset,
}

impl CharacterProfile {
    /// Bundle and validate a fighter type. Any authoring fault is reported
    /// here rather than during a match.
    pub fn new(
        name: &'static str,
        stats: CharacterStats,
        sprites: SpriteTable,
        moveset: Moveset,
    ) -> Result<Self, ConfigError> {
        stats.validate(name)?;

        for sprite in STATE_SPRITES {
            if sprites.frame_count(sprite).unwrap_or(0) == 0 {
                return Err(ConfigError::MissingStateSprite {
                    character: name.to_string(),
                    sprite,
                });
            }
        }

        for (_, def) in moveset.iter() {
            def.validate_images(&sprites)?;
            if let Some(spawn) = def.spawn() {
                spawn.projectile.validate()?;
            }
        }

        log::debug!("registered {name} with {} moves", moveset.len());

        Ok(Self {
            name,
            stats,
            sprites,
            moveset,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn stats(&self) -> &CharacterStats {
        &self.stats
    }

    pub fn sprites(&self) -> &SpriteTable {
        &self.sprites
    }

    pub fn moveset(&self) -> &Moveset {
        &self.moveset
    }

    pub fn get_move(&self, slot: MoveSlot) -> Option<&Arc<MoveDef>> {
        self.moveset.get(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::stats::BASE_STATS;
    use crate::game::combat::{Hitbox, MoveBuilder};

    fn sprites() -> SpriteTable {
        STATE_SPRITES
            .iter()
            .fold(SpriteTable::new(), |table, &name| table.with_animation(name, 1))
            .with_animation("jab", 2)
    }

    fn jab(image: usize) -> MoveDef {
        let mut jab = MoveBuilder::ground("jab");
        let fist = jab.hitbox(Hitbox::new(40.0, 30.0).offset(30.0, 0.0).damage(4.0));
        jab.frame(0, &[fist]).frame(image, &[]);
        jab.build().unwrap()
    }

    #[test]
    fn test_valid_profile() {
        let moveset = Moveset::new().with(MoveSlot::Jab, jab(1));
        let profile = CharacterProfile::new("test", BASE_STATS, sprites(), moveset).unwrap();
        assert_eq!(profile.name(), "test");
        assert!(profile.get_move(MoveSlot::Jab).is_some());
        assert!(profile.get_move(MoveSlot::UpAir).is_none());
    }

    #[test]
    fn test_rejects_missing_animation_frame() {
        let moveset = Moveset::new().with(MoveSlot::Jab, jab(4));
        let err = CharacterProfile::new("test", BASE_STATS, sprites(), moveset).unwrap_err();
        assert!(matches!(err, ConfigError::MissingAnimationFrame { index: 4, .. }));
    }

    #[test]
    fn test_first_fault_follows_slot_order() {
        let mut ghost = MoveBuilder::aerial("ghost", 0);
        ghost.frames(2, 0, &[]);
        // Inserted before the jab, but walked after it
        let moveset = Moveset::new()
            .with(MoveSlot::UpSpecial, ghost.build().unwrap())
            .with(MoveSlot::Jab, jab(4));
        let err = CharacterProfile::new("test", BASE_STATS, sprites(), moveset).unwrap_err();
        assert!(matches!(err, ConfigError::MissingAnimationFrame { index: 4, .. }));
    }

    #[test]
    fn test_rejects_missing_state_sprite() {
        let sprites = SpriteTable::new().with_animation("jab", 2);
        let err = CharacterProfile::new("test", BASE_STATS, sprites, Moveset::new()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingStateSprite { .. }));
    }

    #[test]
    fn test_rejects_invalid_stats() {
        let stats = CharacterStats {
            mass: -1.0,
            ..BASE_STATS
        };
        let err = CharacterProfile::new("test", stats, sprites(), Moveset::new()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidStat { stat: "mass", .. }));
    }
}
