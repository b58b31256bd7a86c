// Character entity and management

use std::mem::discriminant;
use std::sync::Arc;

use glam::Vec2;

use crate::engine::input::{Action, AttackDirection, Command, CommandState};
use crate::engine::physics::integrator::{apply_gravity, decelerate, drift, drive};
use crate::engine::physics::{Aabb, Body, Stage, WallSide};
use crate::game::combat::knockback::{hitstun_ticks, knockback_magnitude, knockback_velocity};
use crate::game::combat::resolver::Attack;
use crate::game::combat::{
    CombatConfig, MoveInstance, NextState, PendingHit, PhysicsOverride, ProjectileSpawn,
};
use crate::game::events::MatchEvent;

use super::animation::{DebugInfo, DrawRequest, ImageKey};
use super::profile::{CharacterProfile, MoveSlot};
use super::state::{CharacterState, CharacterStateMachine, Facing, Timer, WALL_JUMP_DURATION};

/// Unique identifier for anything in a level (characters and projectiles)
pub type EntityId = u32;

/// What a hit did to its victim
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitOutcome {
    pub knockback: Vec2,
    pub hitstun: u32,
}

/// A fighter in a level
#[derive(Debug)]
pub struct Character {
    id: EntityId,
    profile: Arc<CharacterProfile>,
    body: Body,
    machine: CharacterStateMachine,
    facing: Facing,

    // Combat state
    /// Percent; only ever grows during a round
    damage: f32,
    hitpause: u32,
    /// Hitpause ran out at the start of this tick; still frozen for it
    frozen: bool,

    // Air resources, reset on landing
    aerial_jumps_used: u8,
    wall_jumps_used: u8,
    air_dodges_used: u8,
    fast_fall: bool,
    wall: Option<WallSide>,

    input: CommandState,
}

impl Character {
    /// Create a character centred at `(x, y)`, falling until the stage
    /// reports support
    pub fn new(id: EntityId, profile: Arc<CharacterProfile>, x: f32, y: f32, facing: Facing) -> Self {
        let stats = profile.stats();
        let body = Body::new(x, y, stats.width, stats.height);
        Self {
            id,
            body,
            profile,
            machine: CharacterStateMachine::new(CharacterState::Fall),
            facing,
            damage: 0.0,
            hitpause: 0,
            frozen: false,
            aerial_jumps_used: 0,
            wall_jumps_used: 0,
            air_dodges_used: 0,
            fast_fall: false,
            wall: None,
            input: CommandState::new(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.profile.name()
    }

    pub fn profile(&self) -> &Arc<CharacterProfile> {
        &self.profile
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn is_airborne(&self) -> bool {
        self.body.airborne
    }

    pub fn hurtbox(&self) -> Aabb {
        self.body.rect()
    }

    pub fn state(&self) -> &CharacterState {
        self.machine.state()
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }

    pub fn hitpause(&self) -> u32 {
        self.hitpause
    }

    pub fn aerial_jumps_used(&self) -> u8 {
        self.aerial_jumps_used
    }

    pub fn wall_jumps_used(&self) -> u8 {
        self.wall_jumps_used
    }

    pub fn air_dodges_used(&self) -> u8 {
        self.air_dodges_used
    }

    pub fn is_fast_falling(&self) -> bool {
        self.fast_fall
    }

    /// Frozen by hitpause this tick: no state advance, no physics, no
    /// hitboxes
    pub fn is_frozen(&self) -> bool {
        self.frozen || self.hitpause > 0
    }

    pub fn set_hitpause(&mut self, ticks: u32) {
        self.hitpause = self.hitpause.max(ticks);
    }

    /// Teleport, e.g. to a spawn point
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.body.set_position(x, y);
    }

    /// Replace the fighter type. Only called between rounds.
    pub fn set_profile(&mut self, profile: Arc<CharacterProfile>) {
        let stats = profile.stats();
        self.body.half_extents = Vec2::new(stats.width * 0.5, stats.height * 0.5);
        self.profile = profile;
        self.reset_air_resources();
        self.machine.transition(if self.body.airborne {
            CharacterState::Fall
        } else {
            CharacterState::Stand
        });
    }

    /// Input phase: read this tick's command and count down hitpause
    pub fn begin_tick(&mut self, command: &Command) {
        self.input.apply(command);
        self.frozen = false;
        if self.hitpause > 0 {
            self.hitpause -= 1;
            self.frozen = true;
        }
    }

    /// State-advance phase. Steps the current state, hands over finished
    /// states, lets input pick an action if the state allows it, and
    /// returns a projectile if the current move fires one this tick.
    pub fn advance(&mut self, events: &mut Vec<MatchEvent>) -> Option<ProjectileSpawn> {
        if self.is_frozen() {
            return None;
        }

        self.machine.step();
        if self.machine.state().is_finished() {
            self.finish_state();
        }
        if self.machine.state().is_actionable() {
            self.act(events);
        }
        self.check_invariants();

        self.machine.state_mut().as_move_mut().and_then(MoveInstance::take_spawn)
    }

    /// Hand a finished timed state or move over to its successor
    fn finish_state(&mut self) {
        let airborne = self.body.airborne;
        let grounded_or = |state: CharacterState| {
            if airborne {
                CharacterState::Fall
            } else {
                state
            }
        };

        let next = match self.machine.state() {
            CharacterState::RunTurnaround(_) | CharacterState::Dash(_) => CharacterState::Run,
            CharacterState::Jumpsquat(_) => {
                let stats = self.profile.stats();
                let speed = if self.input.is_held(Action::Jump) {
                    stats.jump_speed
                } else {
                    stats.shorthop_speed
                };
                self.body.velocity.y = -speed;
                self.body.airborne = true;
                self.fast_fall = false;
                CharacterState::Fall
            }
            CharacterState::LandingLag(_) => grounded_or(CharacterState::Stand),
            CharacterState::AirDodge(_) | CharacterState::WallJump(_) | CharacterState::Hitstun(_) => {
                grounded_or(CharacterState::Stand)
            }
            CharacterState::Attack(instance) => match instance.next_state() {
                NextState::Default => grounded_or(CharacterState::Stand),
                NextState::Crouch => grounded_or(CharacterState::Crouch),
                NextState::SpecialFall if airborne => CharacterState::SpecialFall,
                NextState::SpecialFall => CharacterState::Stand,
            },
            other => other.clone(),
        };
        self.enter(next);
    }

    /// Switch state during the advance phase
    fn enter(&mut self, state: CharacterState) {
        log::trace!("{} {}: {} -> {}", self.name(), self.id, self.machine.state().name(), state.name());
        self.machine.transition(state);
    }

    /// Enter a stateless variant unless already in it
    fn settle(&mut self, state: CharacterState) {
        if discriminant(self.machine.state()) != discriminant(&state) {
            self.enter(state);
        }
    }

    /// Impose a state from physics or hit resolution
    fn interrupt(&mut self, state: CharacterState) {
        log::trace!(
            "{} {}: {} interrupted by {}",
            self.name(),
            self.id,
            self.machine.state().name(),
            state.name()
        );
        self.machine.interrupt(state);
    }

    fn act(&mut self, events: &mut Vec<MatchEvent>) {
        if self.body.airborne {
            self.act_airborne(events);
        } else {
            self.act_grounded(events);
        }
    }

    fn act_grounded(&mut self, events: &mut Vec<MatchEvent>) {
        let profile = Arc::clone(&self.profile);
        let stats = profile.stats();

        if self.input.consume(Action::Jump) {
            self.enter(CharacterState::Jumpsquat(Timer::new(stats.jumpsquat_frames)));
            return;
        }

        if self.input.consume(Action::Attack) {
            let slot = match self.machine.state() {
                CharacterState::Run | CharacterState::Dash(_) => MoveSlot::DashAttack,
                _ => match self.input.attack_direction(self.facing.sign()) {
                    AttackDirection::Up => MoveSlot::UpTilt,
                    AttackDirection::Down => MoveSlot::DownTilt,
                    AttackDirection::Forward => MoveSlot::ForwardTilt,
                    AttackDirection::Back => {
                        self.facing = self.facing.flipped();
                        MoveSlot::ForwardTilt
                    }
                    AttackDirection::Neutral => MoveSlot::Jab,
                },
            };
            if self.start_move(slot, events) {
                return;
            }
        }

        if self.input.consume(Action::Special) && self.start_special(events) {
            return;
        }

        if self.input.is_held(Action::Shield) {
            self.settle(CharacterState::Shield);
            return;
        }

        if self.input.vertical() > 0.0 {
            self.settle(CharacterState::Crouch);
            return;
        }

        let direction = Facing::from_axis(self.input.horizontal());
        match (self.machine.state(), direction) {
            (CharacterState::Run, None) => self.enter(CharacterState::Stand),
            (CharacterState::Run, Some(direction)) if direction != self.facing => {
                self.facing = direction;
                self.enter(CharacterState::RunTurnaround(Timer::new(
                    stats.run_turnaround_duration,
                )));
            }
            (CharacterState::Run, Some(_)) => {}
            // Dash dance
            (CharacterState::Dash(_), Some(direction)) if direction != self.facing => {
                self.facing = direction;
                self.enter(CharacterState::Dash(Timer::new(stats.initial_dash_duration)));
            }
            (CharacterState::Dash(_), _) => {}
            (_, None) => self.settle(CharacterState::Stand),
            (_, Some(direction)) => {
                self.facing = direction;
                if self.input.horizontal_tap() != 0.0 {
                    self.enter(CharacterState::Dash(Timer::new(stats.initial_dash_duration)));
                } else {
                    self.settle(CharacterState::Walk);
                }
            }
        }
    }

    fn act_airborne(&mut self, events: &mut Vec<MatchEvent>) {
        if matches!(self.machine.state(), CharacterState::SpecialFall) {
            self.check_fast_fall();
            return;
        }

        let profile = Arc::clone(&self.profile);
        let stats = profile.stats();

        if self.input.consume(Action::Jump) {
            let wall = self.wall.filter(|_| self.wall_jumps_used < stats.max_wall_jumps);
            if let Some(wall) = wall {
                let away = match wall {
                    WallSide::Left => Facing::Right,
                    WallSide::Right => Facing::Left,
                };
                self.facing = away;
                self.body.velocity = Vec2::new(stats.air_speed * away.sign(), -stats.aerial_jump_speed);
                self.wall_jumps_used += 1;
                self.fast_fall = false;
                self.enter(CharacterState::WallJump(Timer::new(WALL_JUMP_DURATION)));
                return;
            }
            if self.aerial_jumps_used < stats.max_aerial_jumps {
                self.body.velocity.y = -stats.aerial_jump_speed;
                self.aerial_jumps_used += 1;
                self.fast_fall = false;
                log::trace!("{} {} aerial jump {}", self.name(), self.id, self.aerial_jumps_used);
                return;
            }
        }

        if self.input.consume(Action::Shield) && self.air_dodges_used < stats.max_air_dodges {
            let direction = Vec2::new(self.input.horizontal(), self.input.vertical()).normalize_or_zero();
            self.body.velocity = direction * stats.air_dodge_speed;
            self.air_dodges_used += 1;
            self.fast_fall = false;
            self.enter(CharacterState::AirDodge(Timer::new(stats.air_dodge_duration)));
            return;
        }

        if self.input.consume(Action::Attack) {
            let slot = match self.input.attack_direction(self.facing.sign()) {
                AttackDirection::Neutral => MoveSlot::NeutralAir,
                AttackDirection::Forward => MoveSlot::ForwardAir,
                AttackDirection::Back => MoveSlot::BackAir,
                AttackDirection::Up => MoveSlot::UpAir,
                AttackDirection::Down => MoveSlot::DownAir,
            };
            if self.start_move(slot, events) {
                return;
            }
        }

        if self.input.consume(Action::Special) && self.start_special(events) {
            return;
        }

        self.check_fast_fall();
    }

    fn start_special(&mut self, events: &mut Vec<MatchEvent>) -> bool {
        let slot = if self.input.vertical() < 0.0 {
            MoveSlot::UpSpecial
        } else {
            MoveSlot::NeutralSpecial
        };
        self.start_move(slot, events)
    }

    fn check_fast_fall(&mut self) {
        if !self.fast_fall && self.body.velocity.y > 0.0 && self.input.is_held(Action::Down) {
            self.fast_fall = true;
        }
    }

    /// Begin the move bound to `slot`. Returns false if nothing is bound.
    fn start_move(&mut self, slot: MoveSlot, events: &mut Vec<MatchEvent>) -> bool {
        let Some(def) = self.profile.get_move(slot).cloned() else {
            log::trace!("{} has nothing bound to {slot:?}", self.name());
            return false;
        };

        if let Some(start) = def.start_velocity() {
            if let Some(u) = start.u {
                self.body.velocity.x = u * self.facing.sign();
            }
            if let Some(v) = start.v {
                self.body.velocity.y = v;
            }
        }

        log::debug!("{} {} starts {}", self.name(), self.id, def.name());
        events.push(MatchEvent::MoveStarted {
            entity: self.id,
            name: def.name(),
            sound: def.sound(),
        });
        self.enter(CharacterState::Attack(MoveInstance::new(def, self.id, self.facing)));
        true
    }

    /// Counters never exceed the profile's maxima
    fn check_invariants(&mut self) {
        let profile = Arc::clone(&self.profile);
        let stats = profile.stats();
        let counters = [
            ("aerial_jumps_used", &mut self.aerial_jumps_used, stats.max_aerial_jumps),
            ("wall_jumps_used", &mut self.wall_jumps_used, stats.max_wall_jumps),
            ("air_dodges_used", &mut self.air_dodges_used, stats.max_air_dodges),
        ];
        for (counter, value, max) in counters {
            if *value > max {
                debug_assert!(false, "{counter} = {value} exceeds {max}");
                log::warn!("{} {}: {counter} = {value} exceeds {max}; clamping", self.profile.name(), self.id);
                *value = max;
            }
        }
    }

    /// This tick's offence, if the current move has a live frame
    pub fn attack(&self) -> Option<Attack<'_>> {
        if self.is_frozen() {
            return None;
        }
        let instance = self.machine.state().as_move()?;
        Some(Attack {
            attacker: self.id,
            lineage: None,
            origin: self.body.position,
            table: instance.hitboxes(),
            active: instance.active_hitbox_ids(),
            hits: instance.hits(),
        })
    }

    /// Physics phase: ambient motion unless the current move overrides it,
    /// then stage contact
    pub fn handle_physics(&mut self, stage: &Stage) {
        if self.is_frozen() {
            return;
        }

        let physics_override = self
            .machine
            .state()
            .as_move()
            .and_then(MoveInstance::physics_override);
        match physics_override {
            Some(PhysicsOverride::Freeze) => return,
            Some(PhysicsOverride::Launch { u_boost, v }) => {
                self.body.velocity.x += u_boost * self.facing.sign();
                self.body.velocity.y = v;
                self.body.airborne = true;
                self.fast_fall = false;
                return;
            }
            None => {}
        }

        let profile = Arc::clone(&self.profile);
        let stats = profile.stats();
        let horizontal = self.input.horizontal();
        let state = self.machine.state();

        if self.body.airborne {
            // An air dodge holds its own velocity
            if !matches!(state, CharacterState::AirDodge(_)) {
                if self.fast_fall {
                    self.body.velocity.y = self.body.velocity.y.max(stats.fast_fall_speed);
                } else {
                    apply_gravity(&mut self.body, stats.gravity, stats.fall_speed);
                }

                let drifting = horizontal != 0.0
                    && matches!(
                        state,
                        CharacterState::Fall | CharacterState::SpecialFall | CharacterState::Attack(_)
                    );
                if drifting {
                    drift(&mut self.body, horizontal, stats.air_acceleration, stats.air_speed);
                } else {
                    decelerate(&mut self.body, stats.air_resistance);
                }
            }
        } else if state.drives_ground_speed() {
            let speed = match state {
                CharacterState::Walk => stats.walk_speed,
                _ => stats.run_speed,
            };
            drive(&mut self.body, speed * self.facing.sign(), stats.ground_acceleration);
        } else {
            decelerate(&mut self.body, stats.friction);
        }

        let contacts = stage.move_body(&mut self.body);
        self.wall = contacts.wall;
        if contacts.landed {
            self.on_land();
        } else if contacts.left_ground {
            self.on_leave_ground();
        }
    }

    fn reset_air_resources(&mut self) {
        self.aerial_jumps_used = 0;
        self.wall_jumps_used = 0;
        self.air_dodges_used = 0;
        self.fast_fall = false;
    }

    /// Called when the stage reports an airborne -> grounded transition
    pub fn on_land(&mut self) {
        self.reset_air_resources();

        let next = match self.machine.state() {
            CharacterState::Attack(instance) => match instance.landing_lag() {
                Some(0) => Some(CharacterState::Stand),
                Some(lag) => Some(CharacterState::LandingLag(Timer::new(lag))),
                None => None,
            },
            CharacterState::Fall
            | CharacterState::SpecialFall
            | CharacterState::AirDodge(_)
            | CharacterState::WallJump(_) => Some(CharacterState::Stand),
            // Hitstun carries on along the ground
            _ => None,
        };
        if let Some(next) = next {
            self.interrupt(next);
        }
    }

    /// Called when the character walks off a ledge
    pub fn on_leave_ground(&mut self) {
        let falls = matches!(
            self.machine.state(),
            CharacterState::Stand
                | CharacterState::Walk
                | CharacterState::Run
                | CharacterState::RunTurnaround(_)
                | CharacterState::Dash(_)
                | CharacterState::Crouch
                | CharacterState::Jumpsquat(_)
                | CharacterState::Shield
                | CharacterState::LandingLag(_)
        );
        if falls {
            self.interrupt(CharacterState::Fall);
        }
    }

    /// Victim side of a hit: damage, launch and hitstun
    pub fn apply_hit(&mut self, hit: &PendingHit, config: &CombatConfig) -> HitOutcome {
        let damage_before = self.damage;
        let knockback = knockback_velocity(&hit.hitbox, damage_before, config);
        let hitstun = hitstun_ticks(knockback_magnitude(&hit.hitbox, damage_before, config), config);

        self.damage += hit.hitbox.damage.max(0.0);
        self.body.velocity = knockback;
        if knockback.y < 0.0 {
            self.body.airborne = true;
        }
        self.fast_fall = false;
        self.interrupt(CharacterState::Hitstun(Timer::new(hitstun)));

        HitOutcome { knockback, hitstun }
    }

    /// Attacker side of a hit: spend the hitbox family against this victim
    pub fn handle_land_hit(&mut self, hit: &PendingHit) {
        if let Some(instance) = self.machine.state_mut().as_move_mut() {
            instance.hits_mut().record(&hit.family, hit.victim);
        }
    }

    /// Visual reference for this tick, plus the debug bundle if asked for
    pub fn draw_request(&self, debug: bool) -> DrawRequest {
        let state = self.machine.state();
        let image = match state {
            CharacterState::Attack(instance) => instance.image(),
            other => other.animation_name().map(|sprite| ImageKey::new(sprite, 0)),
        }
        .unwrap_or_else(|| ImageKey::new(if self.body.airborne { "fall" } else { "stand" }, 0));

        let debug = debug.then(|| DebugInfo {
            velocity: self.body.velocity,
            airborne: self.body.airborne,
            state: state.name(),
            damage: self.damage,
            fast_fall: self.fast_fall,
            aerial_jumps: self.aerial_jumps_used,
            wall_jumps: self.wall_jumps_used,
            air_dodges: self.air_dodges_used,
            hitpause: self.hitpause,
        });

        DrawRequest {
            entity: self.id,
            position: self.body.position,
            size: self.body.half_extents * 2.0,
            facing: self.facing,
            image,
            debug,
        }
    }
}

/// Manages all characters in a level, in insertion order
#[derive(Debug, Default)]
pub struct CharacterManager {
    characters: Vec<Character>,
}

impl CharacterManager {
    pub fn new() -> Self {
        Self {
            characters: Vec::new(),
        }
    }

    /// Add a character; iteration order is insertion order
    pub fn add(&mut self, character: Character) {
        self.characters.push(character);
    }

    /// Get a character by ID
    pub fn get(&self, id: EntityId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Get a mutable character by ID
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.id == id)
    }

    /// Get all characters
    pub fn all(&self) -> &[Character] {
        &self.characters
    }

    /// Get all characters mutably
    pub fn all_mut(&mut self) -> &mut [Character] {
        &mut self.characters
    }

    /// Remove a character by ID
    pub fn remove(&mut self, id: EntityId) -> Option<Character> {
        let pos = self.characters.iter().position(|c| c.id == id)?;
        Some(self.characters.remove(pos))
    }

    /// Get the number of characters
    pub fn count(&self) -> usize {
        self.characters.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::animation::SpriteTable;
    use crate::game::characters::profile::{Moveset, STATE_SPRITES};
    use crate::game::characters::stats::BASE_STATS;
    use crate::game::combat::{Hitbox, MoveBuilder};
    use crate::game::roster::hawko;
    use approx::assert_abs_diff_eq;

    fn profile() -> Arc<CharacterProfile> {
        let sprites = STATE_SPRITES
            .iter()
            .fold(SpriteTable::new(), |table, &name| table.with_animation(name, 1))
            .with_animation("jab", 1)
            .with_animation("nair", 1);

        let mut jab = MoveBuilder::ground("jab");
        let fist = jab.hitbox(Hitbox::new(40.0, 30.0).offset(30.0, 0.0).damage(4.0));
        jab.frame(0, &[fist]).frames(2, 0, &[]);

        let mut nair = MoveBuilder::aerial("nair", 7);
        nair.frames(12, 0, &[]);

        let moveset = Moveset::new()
            .with(MoveSlot::Jab, jab.build().unwrap())
            .with(MoveSlot::NeutralAir, nair.build().unwrap());
        Arc::new(CharacterProfile::new("tester", BASE_STATS, sprites, moveset).unwrap())
    }

    /// A character standing on the battlefield's main platform
    fn grounded() -> (Character, Stage) {
        let stage = Stage::battlefield();
        let mut character = Character::new(0, profile(), 800.0, 550.0, Facing::Right);
        let mut events = Vec::new();
        character.begin_tick(&Command::new());
        character.advance(&mut events);
        character.handle_physics(&stage);
        assert!(!character.is_airborne());
        (character, stage)
    }

    fn step(character: &mut Character, stage: &Stage, command: Command) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        character.begin_tick(&command);
        character.advance(&mut events);
        character.handle_physics(stage);
        events
    }

    #[test]
    fn test_character_manager() {
        let mut manager = CharacterManager::new();
        assert_eq!(manager.count(), 0);
        manager.add(Character::new(3, profile(), 0.0, 0.0, Facing::Right));
        manager.add(Character::new(5, profile(), 0.0, 0.0, Facing::Left));
        assert!(manager.get(5).is_some());
        assert_eq!(manager.all()[0].id(), 3);
        assert!(manager.remove(3).is_some());
        assert!(manager.get(3).is_none());
        assert_eq!(manager.count(), 1);
    }

    #[test]
    fn test_lands_into_stand() {
        let (character, _) = grounded();
        assert!(matches!(character.state(), CharacterState::Stand));
    }

    #[test]
    fn test_jab_plays_for_its_frame_count() {
        let (mut character, stage) = grounded();
        let events = step(&mut character, &stage, Command::new().with(Action::Attack));
        assert!(matches!(events[0], MatchEvent::MoveStarted { name: "jab", .. }));

        // Three frames: the starting tick plus two more
        assert_eq!(character.state().name(), "jab");
        step(&mut character, &stage, Command::new());
        step(&mut character, &stage, Command::new());
        assert_eq!(character.state().name(), "jab");
        step(&mut character, &stage, Command::new());
        assert!(matches!(character.state(), CharacterState::Stand));
    }

    #[test]
    fn test_jumpsquat_then_airborne() {
        let (mut character, stage) = grounded();
        let jump = Command::new().with(Action::Jump);
        step(&mut character, &stage, jump.clone());
        assert!(matches!(character.state(), CharacterState::Jumpsquat(_)));
        for _ in 0..BASE_STATS.jumpsquat_frames {
            step(&mut character, &stage, jump.clone());
        }
        assert!(character.is_airborne());
        assert!(matches!(character.state(), CharacterState::Fall));
        // Full hop speed minus one tick of gravity
        assert!(character.velocity().y < -BASE_STATS.shorthop_speed);
    }

    #[test]
    fn test_aerial_jump_is_limited() {
        let stage = Stage::battlefield();
        let mut character = Character::new(0, profile(), 800.0, 200.0, Facing::Right);
        let jump = Command::new().with(Action::Jump);

        step(&mut character, &stage, jump);
        assert_eq!(character.aerial_jumps_used(), 1);
        step(&mut character, &stage, Command::new());
        step(&mut character, &stage, Command::new().with(Action::Jump));
        assert_eq!(character.aerial_jumps_used(), 1);
    }

    #[test]
    fn test_counters_reset_on_landing() {
        let stage = Stage::battlefield();
        let mut character = Character::new(0, profile(), 800.0, 300.0, Facing::Right);
        step(&mut character, &stage, Command::new().with(Action::Jump));
        step(&mut character, &stage, Command::new());
        step(&mut character, &stage, Command::new().with(Action::Shield));
        assert_eq!(character.aerial_jumps_used(), 1);
        assert_eq!(character.air_dodges_used(), 1);

        let mut ticks = 0;
        while character.is_airborne() {
            step(&mut character, &stage, Command::new());
            ticks += 1;
            assert!(ticks < 200, "never landed");
        }
        assert_eq!(character.aerial_jumps_used(), 0);
        assert_eq!(character.air_dodges_used(), 0);
        assert_eq!(character.wall_jumps_used(), 0);
    }

    #[test]
    fn test_walk_then_dash() {
        let (mut character, stage) = grounded();
        step(&mut character, &stage, Command::new().with(Action::Left));
        // A fresh press is a tap
        assert!(matches!(character.state(), CharacterState::Dash(_)));
        assert_eq!(character.facing(), Facing::Left);

        let (mut walker, stage) = grounded();
        walker.input.apply(&Command::new().with(Action::Right));
        step(&mut walker, &stage, Command::new().with(Action::Right));
        assert!(matches!(walker.state(), CharacterState::Walk));
        assert!(walker.velocity().x > 0.0);
    }

    #[test]
    fn test_hit_launches_and_stuns() {
        let (mut character, _) = grounded();
        let hit = PendingHit {
            attacker: 9,
            victim: 0,
            hitbox_id: 0,
            hitbox: Hitbox::new(10.0, 10.0).knockback(10.0, 45.0, 10.0).damage(9.0),
            family: vec![0],
        };
        let outcome = character.apply_hit(&hit, &CombatConfig::default());
        assert_eq!(character.damage(), 9.0);
        assert_eq!(outcome.hitstun, 8);
        assert!(character.is_airborne());
        assert!(matches!(character.state(), CharacterState::Hitstun(_)));
        assert!(!character.state().is_actionable());
    }

    #[test]
    fn test_hitpause_freezes_everything() {
        let (mut character, stage) = grounded();
        character.set_hitpause(2);
        let before = character.position();
        step(&mut character, &stage, Command::new().with(Action::Attack));
        step(&mut character, &stage, Command::new());
        assert!(matches!(character.state(), CharacterState::Stand));
        assert_eq!(character.position(), before);
        assert!(character.attack().is_none());
    }

    #[test]
    fn test_up_special_hangs_then_launches_into_special_fall() {
        let stage = Stage::battlefield();
        let mut character = Character::new(0, Arc::new(hawko().unwrap()), 800.0, 200.0, Facing::Right);
        let start = character.position();

        step(&mut character, &stage, Command::new().with(Action::Up).with(Action::Special));
        assert_eq!(character.state().name(), "up_special");
        assert_eq!(character.position(), start);
        step(&mut character, &stage, Command::new());
        assert_eq!(character.position(), start);

        step(&mut character, &stage, Command::new());
        assert_abs_diff_eq!(character.velocity().x, 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(character.velocity().y, -13.0, epsilon = 1e-6);

        // Ten frames in all: the starting tick plus nine more
        for _ in 0..7 {
            step(&mut character, &stage, Command::new());
        }
        assert_eq!(character.state().name(), "up_special");
        step(&mut character, &stage, Command::new());
        assert!(matches!(character.state(), CharacterState::SpecialFall));

        step(&mut character, &stage, Command::new().with(Action::Jump));
        assert!(matches!(character.state(), CharacterState::SpecialFall));
        assert_eq!(character.aerial_jumps_used(), 0);
        assert!(character.velocity().y > -13.0);
    }

    #[test]
    fn test_wall_jump_is_limited_and_resets_on_landing() {
        let stage = Stage::battlefield();
        // Beside the right face of the main platform
        let mut character = Character::new(0, profile(), 1325.0, 700.0, Facing::Left);
        step(&mut character, &stage, Command::new());

        step(&mut character, &stage, Command::new().with(Action::Jump));
        assert!(matches!(character.state(), CharacterState::WallJump(_)));
        assert_eq!(character.wall_jumps_used(), 1);
        assert_eq!(character.facing(), Facing::Right);

        let mut ticks = 0;
        while !matches!(character.state(), CharacterState::Fall) {
            step(&mut character, &stage, Command::new());
            ticks += 1;
            assert!(ticks <= WALL_JUMP_DURATION + 1, "wall jump never ended");
        }

        // Back against the wall, out of wall jumps: the press is an aerial jump
        character.set_position(1325.0, 700.0);
        step(&mut character, &stage, Command::new());
        step(&mut character, &stage, Command::new().with(Action::Jump));
        assert_eq!(character.wall_jumps_used(), BASE_STATS.max_wall_jumps);
        assert_eq!(character.aerial_jumps_used(), 1);
        assert!(matches!(character.state(), CharacterState::Fall));

        character.set_position(800.0, 540.0);
        let mut ticks = 0;
        while character.is_airborne() {
            step(&mut character, &stage, Command::new());
            ticks += 1;
            assert!(ticks < 50, "never landed");
        }
        assert_eq!(character.wall_jumps_used(), 0);
    }

    #[test]
    fn test_fast_fall_snaps_and_is_cleared() {
        let stage = Stage::battlefield();
        let mut character = Character::new(0, profile(), 800.0, 100.0, Facing::Right);
        step(&mut character, &stage, Command::new());
        assert!(character.velocity().y > 0.0);

        step(&mut character, &stage, Command::new().with(Action::Down));
        assert!(character.is_fast_falling());
        assert_eq!(character.velocity().y, BASE_STATS.fast_fall_speed);

        // A jump cancels it
        step(&mut character, &stage, Command::new().with(Action::Jump));
        assert!(!character.is_fast_falling());
        assert!(character.velocity().y < 0.0);

        // So does a hit
        while character.velocity().y <= 0.0 {
            step(&mut character, &stage, Command::new());
        }
        step(&mut character, &stage, Command::new().with(Action::Down));
        assert!(character.is_fast_falling());
        let hit = PendingHit {
            attacker: 9,
            victim: 0,
            hitbox_id: 0,
            hitbox: Hitbox::new(10.0, 10.0).knockback(2.0, 0.0, 0.0).damage(1.0),
            family: vec![0],
        };
        character.apply_hit(&hit, &CombatConfig::default());
        assert!(!character.is_fast_falling());

        // And so does landing
        let mut fresh = Character::new(1, profile(), 800.0, 400.0, Facing::Right);
        step(&mut fresh, &stage, Command::new());
        step(&mut fresh, &stage, Command::new().with(Action::Down));
        assert!(fresh.is_fast_falling());
        let mut ticks = 0;
        while fresh.is_airborne() {
            step(&mut fresh, &stage, Command::new().with(Action::Down));
            ticks += 1;
            assert!(ticks < 20, "never landed");
        }
        assert!(!fresh.is_fast_falling());
    }

    #[test]
    fn test_draw_request() {
        let (character, _) = grounded();
        let request = character.draw_request(true);
        assert_eq!(request.image, ImageKey::new("stand", 0));
        assert_eq!(request.size, Vec2::new(50.0, 100.0));
        let debug = request.debug.unwrap();
        assert_eq!(debug.state, "stand");
        assert!(!debug.airborne);
        assert!(character.draw_request(false).debug.is_none());
    }
}
