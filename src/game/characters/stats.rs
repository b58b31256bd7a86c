// Per-character tunables
//
// Every fighter type owns one immutable `CharacterStats`, built once when the
// type is registered and shared by reference. All speeds and accelerations
// are per tick.

use crate::error::ConfigError;

/// Physical constants of one fighter type
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterStats {
    // Body
    pub mass: f32,
    pub width: f32,
    pub height: f32,

    // Ground movement
    pub ground_acceleration: f32,
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Ticks a dash lasts before it becomes a run
    pub initial_dash_duration: u32,
    /// Ticks spent turning around out of a run
    pub run_turnaround_duration: u32,
    /// Ground deceleration per tick
    pub friction: f32,

    // Air movement
    pub air_acceleration: f32,
    pub air_speed: f32,
    /// Air deceleration per tick when not drifting
    pub air_resistance: f32,
    pub gravity: f32,
    pub fall_speed: f32,
    pub fast_fall_speed: f32,

    // Jumping
    pub jump_speed: f32,
    pub aerial_jump_speed: f32,
    pub shorthop_speed: f32,
    pub jumpsquat_frames: u32,
    pub max_aerial_jumps: u8,
    pub max_wall_jumps: u8,

    // Air dodge
    pub max_air_dodges: u8,
    pub air_dodge_speed: f32,
    pub air_dodge_duration: u32,
}

/// Baseline fighter; roster entries start from this and override fields
pub const BASE_STATS: CharacterStats = CharacterStats {
    mass: 10.0,
    width: 50.0,
    height: 100.0,

    ground_acceleration: 5.0,
    walk_speed: 5.0,
    run_speed: 7.8,
    initial_dash_duration: 16,
    run_turnaround_duration: 10,
    friction: 0.7,

    air_acceleration: 0.75,
    air_speed: 5.0,
    air_resistance: 0.01,
    gravity: 0.7,
    fall_speed: 10.0,
    fast_fall_speed: 18.0,

    jump_speed: 17.0,
    aerial_jump_speed: 13.0,
    shorthop_speed: 7.5,
    jumpsquat_frames: 5,
    max_aerial_jumps: 1,
    max_wall_jumps: 1,

    max_air_dodges: 1,
    air_dodge_speed: 10.0,
    air_dodge_duration: 15,
};

impl Default for CharacterStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl CharacterStats {
    /// Reject stats that would break the simulation
    pub fn validate(&self, character: &str) -> Result<(), ConfigError> {
        let invalid = |stat: &'static str, reason: &'static str| ConfigError::InvalidStat {
            character: character.to_string(),
            stat,
            reason,
        };

        let positive = [
            ("mass", self.mass),
            ("width", self.width),
            ("height", self.height),
            ("walk_speed", self.walk_speed),
            ("run_speed", self.run_speed),
            ("air_speed", self.air_speed),
            ("fall_speed", self.fall_speed),
            ("fast_fall_speed", self.fast_fall_speed),
        ];
        for (stat, value) in positive {
            if !(value > 0.0) {
                return Err(invalid(stat, "must be positive"));
            }
        }

        let non_negative = [
            ("ground_acceleration", self.ground_acceleration),
            ("friction", self.friction),
            ("air_acceleration", self.air_acceleration),
            ("air_resistance", self.air_resistance),
            ("gravity", self.gravity),
            ("jump_speed", self.jump_speed),
            ("aerial_jump_speed", self.aerial_jump_speed),
            ("shorthop_speed", self.shorthop_speed),
            ("air_dodge_speed", self.air_dodge_speed),
        ];
        for (stat, value) in non_negative {
            if !(value >= 0.0) {
                return Err(invalid(stat, "must not be negative"));
            }
        }

        if self.fast_fall_speed < self.fall_speed {
            return Err(invalid("fast_fall_speed", "must be at least fall_speed"));
        }
        if self.jumpsquat_frames == 0 {
            return Err(invalid("jumpsquat_frames", "must be at least one tick"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let stats = CharacterStats::default();
        assert_eq!(stats.run_speed, 7.8);
        assert_eq!(stats.max_aerial_jumps, 1);
        assert_eq!(stats.jumpsquat_frames, 5);
    }

    #[test]
    fn test_base_stats_are_valid() {
        assert_eq!(BASE_STATS.validate("base"), Ok(()));
    }

    #[test]
    fn test_rejects_non_positive_size() {
        let stats = CharacterStats {
            width: 0.0,
            ..BASE_STATS
        };
        assert!(matches!(
            stats.validate("flat"),
            Err(ConfigError::InvalidStat { stat: "width", .. })
        ));
    }

    #[test]
    fn test_rejects_nan() {
        let stats = CharacterStats {
            gravity: f32::NAN,
            ..BASE_STATS
        };
        assert!(stats.validate("nan").is_err());
    }

    #[test]
    fn test_rejects_slow_fast_fall() {
        let stats = CharacterStats {
            fast_fall_speed: 5.0,
            ..BASE_STATS
        };
        assert!(matches!(
            stats.validate("floaty"),
            Err(ConfigError::InvalidStat {
                stat: "fast_fall_speed",
                ..
            })
        ));
    }
}
