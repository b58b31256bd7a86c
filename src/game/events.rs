// Fire-and-forget notifications for presentation collaborators (audio, effects)

use glam::Vec2;

use super::characters::EntityId;

/// Opaque audio cue. The combat core only ever triggers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundCue(pub &'static str);

/// Something observable that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum MatchEvent {
    /// A fighter began a move
    MoveStarted {
        entity: EntityId,
        name: &'static str,
        sound: Option<SoundCue>,
    },

    /// A hitbox connected
    HitLanded {
        attacker: EntityId,
        victim: EntityId,
        damage: f32,
        knockback: Vec2,
        hitstun: u32,
        sound: Option<SoundCue>,
    },

    /// A hitbox connected with a projectile
    ProjectileStruck {
        attacker: EntityId,
        projectile: EntityId,
        sound: Option<SoundCue>,
    },

    /// A move spawned a projectile
    ProjectileSpawned {
        owner: EntityId,
        projectile: EntityId,
        sound: Option<SoundCue>,
    },

    /// A projectile left the level
    ProjectileDestroyed { projectile: EntityId },

    /// A fighter left the blast zone and was removed
    KnockedOut { entity: EntityId },
}

impl MatchEvent {
    /// The audio cue this event carries, if any
    pub fn sound(&self) -> Option<SoundCue> {
        match self {
            MatchEvent::MoveStarted { sound, .. }
            | MatchEvent::HitLanded { sound, .. }
            | MatchEvent::ProjectileStruck { sound, .. }
            | MatchEvent::ProjectileSpawned { sound, .. } => *sound,
            _ => None,
        }
    }
}
