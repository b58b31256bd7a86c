// Built-in fighters
//
// Move tables are compiled-in data. Every constructor validates its profile,
// so a typo in a table fails at startup rather than mid-match.

pub mod hawko;
pub mod monkey_king;
pub mod projectiles;

use std::sync::Arc;

use glam::Vec2;

use crate::error::{ConfigError, MatchError};
use crate::game::characters::{CharacterProfile, SpriteTable, STATE_SPRITES};
use crate::game::combat::{MoveBuilder, MoveDef, NextState, PhysicsOverride};
use crate::game::events::SoundCue;

pub use hawko::hawko;
pub use monkey_king::monkey_king;
pub use projectiles::laser;

/// Names accepted by [`by_name`]
pub const ROSTER: [&str; 2] = ["hawko", "monkey_king"];

/// Build a built-in fighter by name, e.g. from a character select
pub fn by_name(name: &str) -> Result<CharacterProfile, MatchError> {
    let profile = match name {
        "hawko" => hawko()?,
        "monkey_king" => monkey_king()?,
        _ => return Err(MatchError::UnknownCharacter(name.to_string())),
    };
    Ok(profile)
}

/// Movement-state strips (one image each) plus the given move strips
fn sprite_table(moves: &[(&'static str, usize)]) -> SpriteTable {
    let table = STATE_SPRITES
        .iter()
        .fold(SpriteTable::new(), |table, &name| table.with_animation(name, 1));
    moves
        .iter()
        .fold(table, |table, &(name, count)| table.with_animation(name, count))
}

/// Airborne blaster: fires a laser on its sixth frame
fn aerial_laser() -> Result<MoveDef, ConfigError> {
    let mut shot = MoveBuilder::aerial("aerial_neutral_special", 0);
    shot.sprite("aerial_laser")
        .sound(SoundCue("gun"))
        .frames(9, 0, &[])
        .spawn(5, Vec2::new(0.0, 10.0), Arc::new(laser()));
    shot.build()
}

/// Recovery: hang for two frames, then launch upward into special fall
fn up_special() -> Result<MoveDef, ConfigError> {
    let mut recovery = MoveBuilder::aerial("up_special", 0);
    recovery
        .sprite("special_fall")
        .frames(10, 0, &[])
        .physics(0, 2, PhysicsOverride::Freeze)
        .physics(2, 3, PhysicsOverride::Launch { u_boost: 2.0, v: -13.0 })
        .next_state(NextState::SpecialFall);
    recovery.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_roster_name_builds() {
        for name in ROSTER {
            let profile = by_name(name).unwrap();
            assert_eq!(profile.name(), name);
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = by_name("falcon").unwrap_err();
        assert!(matches!(err, MatchError::UnknownCharacter(ref name) if name == "falcon"));
    }
}
