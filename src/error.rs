// Error types for authoring data and match management

use crate::game::characters::EntityId;

/// Authoring faults in move, sprite or stat data.
///
/// These are rejected when a move or profile is built, never mid-match.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("move `{move_name}` frame {frame} references unknown hitbox {hitbox}")]
    UnknownHitbox {
        move_name: String,
        frame: usize,
        hitbox: usize,
    },

    #[error("move `{move_name}` hitbox {hitbox} names unknown higher-priority sibling {sibling}")]
    UnknownSibling {
        move_name: String,
        hitbox: usize,
        sibling: usize,
    },

    #[error("move `{move_name}` has a priority cycle through hitbox {hitbox}")]
    PriorityCycle { move_name: String, hitbox: usize },

    #[error("move `{move_name}` spawns a projectile at tick {tick} but has only {frames} frames")]
    SpawnOutOfRange {
        move_name: String,
        tick: u32,
        frames: usize,
    },

    #[error("move `{move_name}` overrides physics for frames {start}..{end} but has only {frames} frames")]
    PhysicsWindowOutOfRange {
        move_name: String,
        start: u32,
        end: u32,
        frames: usize,
    },

    #[error("move `{move_name}` references unknown sprite `{sprite}`")]
    UnknownSprite { move_name: String, sprite: String },

    #[error("move `{move_name}` frame {frame} shows image {index} of sprite `{sprite}`, which has {available} images")]
    MissingAnimationFrame {
        move_name: String,
        frame: usize,
        sprite: String,
        index: usize,
        available: usize,
    },

    #[error("`{character}` has no `{sprite}` sprite for its movement states")]
    MissingStateSprite {
        character: String,
        sprite: &'static str,
    },

    #[error("projectile `{projectile}`: {reason}")]
    InvalidProjectile {
        projectile: &'static str,
        reason: &'static str,
    },

    #[error("invalid stat `{stat}` for `{character}`: {reason}")]
    InvalidStat {
        character: String,
        stat: &'static str,
        reason: &'static str,
    },
}

/// Faults raised by the level registry and round lifecycle
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    #[error("cannot swap a character profile while a round is in progress")]
    RoundInProgress,

    #[error("no fighter named `{0}` in the roster")]
    UnknownCharacter(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::PriorityCycle {
            move_name: "back_air".to_string(),
            hitbox: 2,
        };
        assert_eq!(
            err.to_string(),
            "move `back_air` has a priority cycle through hitbox 2"
        );
    }

    #[test]
    fn test_match_error_wraps_config_error() {
        let err: MatchError = ConfigError::UnknownSprite {
            move_name: "jab".to_string(),
            sprite: "jab".to_string(),
        }
        .into();
        assert!(matches!(err, MatchError::Config(_)));
        assert_eq!(err.to_string(), "move `jab` references unknown sprite `jab`");
    }
}
