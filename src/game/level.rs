// Level: the fixed-tick driver that owns every entity in a match
//
// One `tick()` runs the phases in a fixed order over all entities:
// input -> state advance (+ projectile spawns) -> projectile flight ->
// hit resolution -> physics (+ landing) -> cleanup.
// Characters are visited in insertion order, then projectiles in spawn order,
// so simultaneous hits resolve the same way every run.

use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec2;

use crate::engine::input::Command;
use crate::engine::physics::Stage;
use crate::error::MatchError;
use crate::game::characters::{
    Character, CharacterManager, CharacterProfile, DrawRequest, EntityId, Facing,
};
use crate::game::combat::knockback::hitpause_ticks;
use crate::game::combat::resolver::{collect_hits, Target};
use crate::game::combat::{Attack, CombatConfig, PendingHit, ProjectileSpawn};
use crate::game::events::MatchEvent;
use crate::game::projectile::Projectile;

/// A match arena: stage, fighters, projectiles and the tick counter
#[derive(Debug)]
pub struct Level {
    stage: Stage,
    characters: CharacterManager,
    projectiles: Vec<Projectile>,
    /// Latest command per character; kept until replaced
    commands: HashMap<EntityId, Command>,
    events: Vec<MatchEvent>,
    combat: CombatConfig,
    next_id: EntityId,
    frame: u64,
    round_active: bool,
    debug_draw: bool,
}

impl Level {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            characters: CharacterManager::new(),
            projectiles: Vec::new(),
            commands: HashMap::new(),
            events: Vec::new(),
            combat: CombatConfig::default(),
            next_id: 0,
            frame: 0,
            round_active: false,
            debug_draw: false,
        }
    }

    /// Builder-style override of the combat conventions
    pub fn with_combat(mut self, combat: CombatConfig) -> Self {
        self.combat = combat;
        self
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a fighter centred at `(x, y)`. It falls until the stage supports it.
    pub fn spawn_character(
        &mut self,
        profile: Arc<CharacterProfile>,
        x: f32,
        y: f32,
        facing: Facing,
    ) -> EntityId {
        let id = self.allocate_id();
        log::info!("{} joins as entity {id}", profile.name());
        self.characters.add(Character::new(id, profile, x, y, facing));
        id
    }

    /// Set the command a character reads on every tick until replaced
    pub fn feed(&mut self, id: EntityId, command: Command) -> Result<(), MatchError> {
        if self.characters.get(id).is_none() {
            return Err(MatchError::EntityNotFound(id));
        }
        self.commands.insert(id, command);
        Ok(())
    }

    pub fn start_round(&mut self) {
        if self.round_active {
            log::warn!("round already in progress");
            return;
        }
        log::info!(
            "round starts at frame {} with {} fighters",
            self.frame,
            self.characters.count()
        );
        self.round_active = true;
    }

    /// Stop advancing. Projectiles are cleared; fighters stay for the next round.
    pub fn end_round(&mut self) {
        if !self.round_active {
            return;
        }
        for projectile in self.projectiles.drain(..) {
            self.events.push(MatchEvent::ProjectileDestroyed {
                projectile: projectile.id(),
            });
        }
        self.round_active = false;
        log::info!("round ends at frame {}", self.frame);
    }

    pub fn is_round_active(&self) -> bool {
        self.round_active
    }

    /// Replace a fighter's type. Only allowed between rounds.
    pub fn swap_profile(
        &mut self,
        id: EntityId,
        profile: Arc<CharacterProfile>,
    ) -> Result<(), MatchError> {
        if self.round_active {
            return Err(MatchError::RoundInProgress);
        }
        let character = self
            .characters
            .get_mut(id)
            .ok_or(MatchError::EntityNotFound(id))?;
        log::info!("entity {id}: {} -> {}", character.name(), profile.name());
        character.set_profile(profile);
        Ok(())
    }

    /// Advance the whole level by one tick. Does nothing outside a round.
    pub fn tick(&mut self) {
        if !self.round_active {
            return;
        }
        self.frame += 1;

        // Input
        let idle = Command::default();
        for character in self.characters.all_mut() {
            let command = self.commands.get(&character.id()).unwrap_or(&idle);
            character.begin_tick(command);
        }

        // State advance
        let mut spawns = Vec::new();
        for character in self.characters.all_mut() {
            if let Some(spawn) = character.advance(&mut self.events) {
                spawns.push((character.id(), character.position(), character.facing(), spawn));
            }
        }
        for (owner, position, facing, spawn) in spawns {
            self.spawn_projectile(owner, position, facing, spawn);
        }

        for projectile in &mut self.projectiles {
            projectile.advance();
        }

        // Hit resolution
        let hits = {
            let attacks: Vec<Attack<'_>> = self
                .characters
                .all()
                .iter()
                .filter_map(Character::attack)
                .chain(self.projectiles.iter().filter_map(Projectile::attack))
                .collect();
            let targets: Vec<Target> = self
                .characters
                .all()
                .iter()
                .map(|character| Target::new(character.id(), character.hurtbox()))
                .chain(
                    self.projectiles
                        .iter()
                        .filter(|projectile| projectile.is_alive() && !projectile.def().immune_to_hits)
                        .map(|projectile| {
                            Target::fired_by(
                                projectile.id(),
                                projectile.hurtbox(),
                                projectile.owner(),
                            )
                        }),
                )
                .collect();
            collect_hits(&attacks, &targets)
        };
        for hit in hits {
            self.apply_hit(&hit);
        }

        // Physics
        for character in self.characters.all_mut() {
            character.handle_physics(&self.stage);
        }

        self.cleanup();
    }

    fn spawn_projectile(
        &mut self,
        owner: EntityId,
        position: Vec2,
        facing: Facing,
        spawn: ProjectileSpawn,
    ) {
        let id = self.allocate_id();
        let at = position + Vec2::new(spawn.offset.x * facing.sign(), spawn.offset.y);
        log::debug!("entity {owner} fires {} ({id})", spawn.projectile.name);
        self.events.push(MatchEvent::ProjectileSpawned {
            owner,
            projectile: id,
            sound: spawn.projectile.sound,
        });
        self.projectiles
            .push(Projectile::new(id, owner, spawn.projectile, at, facing));
    }

    fn projectile_mut(&mut self, id: EntityId) -> Option<&mut Projectile> {
        self.projectiles
            .iter_mut()
            .find(|projectile| projectile.id() == id && projectile.is_alive())
    }

    /// Apply one pending hit. Hits whose attacker or victim is gone (or a
    /// projectile that died earlier this tick) are skipped.
    fn apply_hit(&mut self, hit: &PendingHit) {
        let attacker_present = self.characters.get(hit.attacker).is_some()
            || self
                .projectiles
                .iter()
                .any(|projectile| projectile.id() == hit.attacker && projectile.is_alive());
        if !attacker_present {
            log::debug!("attacker {} is gone; dropping hit on {}", hit.attacker, hit.victim);
            return;
        }

        let hitpause = hitpause_ticks(hit.hitbox.damage, &self.combat);

        if let Some(victim) = self.characters.get_mut(hit.victim) {
            let outcome = victim.apply_hit(hit, &self.combat);
            victim.set_hitpause(hitpause);
            log::debug!(
                "{} hits {} with hitbox {} for {}% (now {}%), knockback {:?}, hitstun {}",
                hit.attacker,
                hit.victim,
                hit.hitbox_id,
                hit.hitbox.damage,
                victim.damage(),
                outcome.knockback,
                outcome.hitstun
            );
            self.events.push(MatchEvent::HitLanded {
                attacker: hit.attacker,
                victim: hit.victim,
                damage: hit.hitbox.damage,
                knockback: outcome.knockback,
                hitstun: outcome.hitstun,
                sound: hit.hitbox.sound,
            });
        } else if let Some(victim) = self.projectile_mut(hit.victim) {
            victim.handle_get_hit(hit);
            log::debug!("{} strikes projectile {}", hit.attacker, hit.victim);
            self.events.push(MatchEvent::ProjectileStruck {
                attacker: hit.attacker,
                projectile: hit.victim,
                sound: hit.hitbox.sound,
            });
        } else {
            log::debug!("victim {} is gone; dropping hit", hit.victim);
            return;
        }

        if let Some(attacker) = self.characters.get_mut(hit.attacker) {
            attacker.handle_land_hit(hit);
            attacker.set_hitpause(hitpause);
        } else if let Some(attacker) = self.projectile_mut(hit.attacker) {
            attacker.handle_land_hit(hit);
            if attacker.is_alive() {
                attacker.set_hitpause(hitpause);
            }
        }
    }

    /// Remove fighters past the blast zone and dead or escaped projectiles
    fn cleanup(&mut self) {
        let knocked_out: Vec<EntityId> = self
            .characters
            .all()
            .iter()
            .filter(|character| self.stage.is_out_of_bounds(&character.hurtbox()))
            .map(Character::id)
            .collect();
        for id in knocked_out {
            if let Some(character) = self.characters.remove(id) {
                log::info!(
                    "{} ({id}) knocked out at {}%",
                    character.name(),
                    character.damage()
                );
            }
            self.commands.remove(&id);
            self.events.push(MatchEvent::KnockedOut { entity: id });
        }

        let stage = &self.stage;
        let events = &mut self.events;
        self.projectiles.retain(|projectile| {
            let keep = projectile.is_alive() && !stage.is_out_of_bounds(&projectile.hurtbox());
            if !keep {
                events.push(MatchEvent::ProjectileDestroyed {
                    projectile: projectile.id(),
                });
            }
            keep
        });
    }

    /// Hand over everything that happened since the last call
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    /// One draw request per entity: fighters first, then projectiles
    pub fn draw_requests(&self) -> Vec<DrawRequest> {
        self.characters
            .all()
            .iter()
            .map(|character| character.draw_request(self.debug_draw))
            .chain(self.projectiles.iter().map(Projectile::draw_request))
            .collect()
    }

    /// Attach the debug bundle to fighter draw requests
    pub fn set_debug_draw(&mut self, enabled: bool) {
        self.debug_draw = enabled;
    }

    pub fn character(&self, id: EntityId) -> Option<&Character> {
        self.characters.get(id)
    }

    pub fn characters(&self) -> &[Character] {
        self.characters.all()
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn combat(&self) -> &CombatConfig {
        &self.combat
    }

    /// Ticks simulated so far
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
