// Knockback, hitstun and hitpause formulas

use glam::Vec2;

use super::hitbox::Hitbox;
use crate::core::math::screen_direction;

/// Tunable combat conventions shared by every fighter
#[derive(Debug, Clone, PartialEq)]
pub struct CombatConfig {
    /// Damage percent that multiplies `knockback_growth` once (100 means
    /// growth is "per 100%")
    pub percent_scale: f32,
    /// Hitstun ticks per unit of knockback magnitude
    pub hitstun_per_knockback: f32,
    /// Hitpause ticks every hit gets
    pub hitpause_base: f32,
    /// Extra hitpause ticks per point of damage dealt
    pub hitpause_per_damage: f32,
    /// Hard cap on hitpause
    pub max_hitpause: u32,
}

/// The one set of combat conventions the roster is balanced around
pub const DEFAULT_COMBAT: CombatConfig = CombatConfig {
    percent_scale: 100.0,
    hitstun_per_knockback: 0.8,
    hitpause_base: 3.0,
    hitpause_per_damage: 1.0 / 3.0,
    max_hitpause: 20,
};

impl Default for CombatConfig {
    fn default() -> Self {
        DEFAULT_COMBAT
    }
}

/// Launch speed: `base + growth * damage_before / percent_scale`
pub fn knockback_magnitude(hitbox: &Hitbox, damage_before: f32, config: &CombatConfig) -> f32 {
    let growth = hitbox.knockback_growth * damage_before.max(0.0) / config.percent_scale;
    (hitbox.base_knockback + growth).max(0.0)
}

/// Launch velocity along the hitbox's (already facing-adjusted) angle
pub fn knockback_velocity(hitbox: &Hitbox, damage_before: f32, config: &CombatConfig) -> Vec2 {
    screen_direction(hitbox.knockback_angle) * knockback_magnitude(hitbox, damage_before, config)
}

/// Forced hitstun for a launch of the given magnitude
pub fn hitstun_ticks(magnitude: f32, config: &CombatConfig) -> u32 {
    (magnitude.max(0.0) * config.hitstun_per_knockback).floor() as u32
}

/// Freeze applied to both attacker and victim when a hit lands
pub fn hitpause_ticks(damage: f32, config: &CombatConfig) -> u32 {
    let ticks = (damage.max(0.0) * config.hitpause_per_damage + config.hitpause_base).floor();
    (ticks as u32).min(config.max_hitpause)
}
