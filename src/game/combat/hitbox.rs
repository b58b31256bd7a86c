// Hitboxes and the priority chains that link sweetspots to sourspots

use glam::Vec2;

use crate::core::math::mirror_angle;
use crate::engine::physics::{Aabb, OrientedRect};
use crate::game::events::SoundCue;

/// Index of a hitbox within its move's (or projectile's) hitbox table
pub type HitboxId = usize;

/// An offensive region attached to an owner, with the combat parameters it
/// applies on contact.
///
/// Offsets are relative to the owner's centre, in screen space (+y down).
/// Angles are degrees counter-clockwise as seen on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Hitbox {
    pub x_offset: f32,
    pub y_offset: f32,
    pub width: f32,
    pub height: f32,
    /// Degrees, counter-clockwise on screen
    pub rotation: f32,
    pub base_knockback: f32,
    /// Launch direction in degrees; 90 is straight up
    pub knockback_angle: f32,
    /// Extra knockback per 100% of victim damage
    pub knockback_growth: f32,
    /// Percent dealt on hit
    pub damage: f32,
    pub sound: Option<SoundCue>,
    /// Hitbox in the same table that wins if both connect on the same tick
    pub higher_priority_sibling: Option<HitboxId>,
}

impl Hitbox {
    /// A centred, unrotated hitbox with no combat parameters yet
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            x_offset: 0.0,
            y_offset: 0.0,
            width,
            height,
            rotation: 0.0,
            base_knockback: 0.0,
            knockback_angle: 0.0,
            knockback_growth: 0.0,
            damage: 0.0,
            sound: None,
            higher_priority_sibling: None,
        }
    }

    pub fn offset(mut self, x_offset: f32, y_offset: f32) -> Self {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
        self
    }

    pub fn rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    /// Set base knockback, launch angle and growth together
    pub fn knockback(mut self, base: f32, angle: f32, growth: f32) -> Self {
        self.base_knockback = base;
        self.knockback_angle = angle;
        self.knockback_growth = growth;
        self
    }

    pub fn damage(mut self, damage: f32) -> Self {
        self.damage = damage;
        self
    }

    pub fn sound(mut self, cue: SoundCue) -> Self {
        self.sound = Some(cue);
        self
    }

    /// Link to the hitbox that takes precedence over this one
    pub fn sibling(mut self, higher_priority: HitboxId) -> Self {
        self.higher_priority_sibling = Some(higher_priority);
        self
    }

    /// World-space region for an owner centred at `origin`
    pub fn region(&self, origin: Vec2) -> OrientedRect {
        OrientedRect::new(
            origin + Vec2::new(self.x_offset, self.y_offset),
            self.width,
            self.height,
            self.rotation,
        )
    }

    /// Whether this hitbox, carried by an owner at `origin`, touches `hurtbox`
    pub fn overlaps(&self, origin: Vec2, hurtbox: &Aabb) -> bool {
        self.region(origin).overlaps(hurtbox)
    }

    /// Horizontally mirrored copy for the opposite facing.
    ///
    /// Applying it twice gives back the original offset, rotation and angle.
    pub fn flip_x(&self) -> Hitbox {
        Hitbox {
            x_offset: -self.x_offset,
            rotation: -self.rotation,
            knockback_angle: mirror_angle(self.knockback_angle),
            ..self.clone()
        }
    }
}

/// Ways a priority chain can be malformed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainFault {
    /// A link points outside the table
    UnknownSibling { hitbox: HitboxId, sibling: HitboxId },
    /// Following links from `hitbox` comes back around
    Cycle { hitbox: HitboxId },
}

/// Walk from `start` up its chain of higher-priority siblings (excluding
/// `start` itself). The walk is bounded by the table size, so a malformed
/// table cannot loop forever.
pub fn ancestors(table: &[Hitbox], start: HitboxId) -> Vec<HitboxId> {
    let mut chain = Vec::new();
    let mut current = table.get(start).and_then(|h| h.higher_priority_sibling);
    while let Some(id) = current {
        if id >= table.len() || chain.len() >= table.len() {
            log::warn!("priority chain from hitbox {start} is malformed; truncating");
            debug_assert!(false, "malformed priority chain from hitbox {start}");
            break;
        }
        chain.push(id);
        current = table[id].higher_priority_sibling;
    }
    chain
}

/// Check every chain in the table: links in range and no cycles
pub fn validate_chains(table: &[Hitbox]) -> Result<(), ChainFault> {
    for (hitbox, entry) in table.iter().enumerate() {
        if let Some(sibling) = entry.higher_priority_sibling {
            if sibling >= table.len() {
                return Err(ChainFault::UnknownSibling { hitbox, sibling });
            }
        }
    }

    for start in 0..table.len() {
        let mut current = table[start].higher_priority_sibling;
        let mut steps = 0;
        while let Some(id) = current {
            if id == start || steps > table.len() {
                return Err(ChainFault::Cycle { hitbox: start });
            }
            steps += 1;
            current = table[id].higher_priority_sibling;
        }
    }

    Ok(())
}

/// Among hitboxes that all overlap the same victim on the same tick, keep the
/// ones with no higher-priority sibling (direct or transitive) in the set.
/// Input order is preserved.
pub fn resolve_priority(table: &[Hitbox], overlapping: &[HitboxId]) -> Vec<HitboxId> {
    overlapping
        .iter()
        .copied()
        .filter(|&id| {
            !ancestors(table, id)
                .iter()
                .any(|ancestor| overlapping.contains(ancestor))
        })
        .collect()
}

/// Every hitbox connected to `id` through priority links in either direction.
/// These are alternative versions of one hit and share one-hit-per-swing
/// bookkeeping.
pub fn family(table: &[Hitbox], id: HitboxId) -> Vec<HitboxId> {
    let root_of = |start: HitboxId| ancestors(table, start).last().copied().unwrap_or(start);
    let root = root_of(id);
    (0..table.len()).filter(|&other| root_of(other) == root).collect()
}
