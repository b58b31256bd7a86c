// Hit detection
//
// Resolution is split in two. `collect_hits` only reads: it walks attackers
// in a stable order and reports which hitbox lands on which target. The level
// then applies the pending hits, skipping any whose attacker or victim died
// earlier in the same pass.

use std::collections::HashSet;

use crate::engine::physics::Aabb;
use crate::game::characters::EntityId;
use glam::Vec2;

use super::hitbox::{family, resolve_priority, Hitbox, HitboxId};

/// (hitbox, victim) pairs that already connected during one activation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitRegistry {
    landed: HashSet<(HitboxId, EntityId)>,
}

impl HitRegistry {
    pub fn contains(&self, hitbox: HitboxId, victim: EntityId) -> bool {
        self.landed.contains(&(hitbox, victim))
    }

    /// Record a hit for every hitbox in `family`
    pub fn record(&mut self, family: &[HitboxId], victim: EntityId) {
        for &hitbox in family {
            self.landed.insert((hitbox, victim));
        }
    }

    pub fn len(&self) -> usize {
        self.landed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landed.is_empty()
    }
}

/// Read-only view of one entity's offence for this tick
#[derive(Debug, Clone, Copy)]
pub struct Attack<'a> {
    pub attacker: EntityId,
    /// The character that fired this attacker, for projectiles
    pub lineage: Option<EntityId>,
    pub origin: Vec2,
    pub table: &'a [Hitbox],
    pub active: &'a [HitboxId],
    pub hits: &'a HitRegistry,
}

/// Something that can be struck
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub id: EntityId,
    pub hurtbox: Aabb,
    /// The character that fired this target, for projectiles
    pub lineage: Option<EntityId>,
}

impl Target {
    pub fn new(id: EntityId, hurtbox: Aabb) -> Self {
        Self {
            id,
            hurtbox,
            lineage: None,
        }
    }

    /// A projectile fired by `owner`
    pub fn fired_by(id: EntityId, hurtbox: Aabb, owner: EntityId) -> Self {
        Self {
            id,
            hurtbox,
            lineage: Some(owner),
        }
    }

    /// Whether `attack` may never strike this target: itself, its shooter or
    /// its own shot
    fn is_kin(&self, attack: &Attack<'_>) -> bool {
        self.id == attack.attacker
            || Some(self.id) == attack.lineage
            || self.lineage == Some(attack.attacker)
    }
}

/// A hit found by [`collect_hits`], not yet applied
#[derive(Debug, Clone, PartialEq)]
pub struct PendingHit {
    pub attacker: EntityId,
    pub victim: EntityId,
    pub hitbox_id: HitboxId,
    pub hitbox: Hitbox,
    /// Hitboxes to mark as spent against this victim once applied
    pub family: Vec<HitboxId>,
}

/// Test every attack against every target it may strike.
///
/// Per (attacker, target): overlapping active hitboxes go through priority
/// resolution first, then winners already registered against the target are
/// dropped. At most one hitbox per priority family lands.
pub fn collect_hits(attacks: &[Attack<'_>], targets: &[Target]) -> Vec<PendingHit> {
    let mut pending = Vec::new();

    for attack in attacks {
        if attack.active.is_empty() {
            continue;
        }

        for target in targets {
            if target.is_kin(attack) {
                continue;
            }

            let overlapping: Vec<HitboxId> = attack
                .active
                .iter()
                .copied()
                .filter(|&id| match attack.table.get(id) {
                    Some(hitbox) => hitbox.overlaps(attack.origin, &target.hurtbox),
                    None => {
                        log::warn!("entity {} has no hitbox {id}; skipping", attack.attacker);
                        false
                    }
                })
                .collect();
            if overlapping.is_empty() {
                continue;
            }

            let mut spent: Vec<HitboxId> = Vec::new();
            for winner in resolve_priority(attack.table, &overlapping) {
                if attack.hits.contains(winner, target.id) || spent.contains(&winner) {
                    continue;
                }
                let family = family(attack.table, winner);
                spent.extend_from_slice(&family);
                pending.push(PendingHit {
                    attacker: attack.attacker,
                    victim: target.id,
                    hitbox_id: winner,
                    hitbox: attack.table[winner].clone(),
                    family,
                });
            }
        }
    }

    pending
}
