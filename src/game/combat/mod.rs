// Combat system
//
// - Hitboxes and priority chains
// - Knockback, hitstun and hitpause formulas
// - Moves: frame schedules of hitboxes
// - Hit detection across all attackers and targets

pub mod hitbox;
pub mod knockback;
pub mod moves;
pub mod resolver;

pub use hitbox::{Hitbox, HitboxId};
pub use knockback::{CombatConfig, DEFAULT_COMBAT};
pub use moves::{
    FrameData, MoveBuilder, MoveDef, MoveInstance, MoveKind, NextState, PhysicsOverride,
    ProjectileSpawn,
};
pub use resolver::{Attack, HitRegistry, PendingHit, Target};
