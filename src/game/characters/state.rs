// Character state machine
//
// Exactly one `CharacterState` is current per character. Movement states are
// plain variants; an attack is the `Attack` variant carrying its move
// instance, so a move is a state like any other.

use crate::game::combat::MoveInstance;

/// Ticks a wall jump runs without player control
pub const WALL_JUMP_DURATION: u32 = 10;

/// Which way a character (or projectile) points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// `1.0` facing right, `-1.0` facing left
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Facing for a horizontal axis value; `None` when neutral
    pub fn from_axis(axis: f32) -> Option<Self> {
        if axis < 0.0 {
            Some(Self::Left)
        } else if axis > 0.0 {
            Some(Self::Right)
        } else {
            None
        }
    }
}

/// Tick counter for fixed-duration states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub elapsed: u32,
    pub duration: u32,
}

impl Timer {
    pub fn new(duration: u32) -> Self {
        Self {
            elapsed: 0,
            duration,
        }
    }

    pub fn step(&mut self) {
        self.elapsed = self.elapsed.saturating_add(1);
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn remaining(&self) -> u32 {
        self.duration.saturating_sub(self.elapsed)
    }
}

/// Represents the current state of a character
#[derive(Debug, Clone, Default)]
pub enum CharacterState {
    /// Grounded, idle
    Stand,
    Walk,
    Run,
    /// Skidding to face the other way out of a run
    RunTurnaround(Timer),
    /// Initial burst of a run
    Dash(Timer),
    Crouch,
    /// Grounded delay before a jump leaves the ground
    Jumpsquat(Timer),
    /// Airborne and free to act
    #[default]
    Fall,
    /// Airborne and helpless until landing
    SpecialFall,
    AirDodge(Timer),
    WallJump(Timer),
    /// Forced, uninterruptible recovery from a hit
    Hitstun(Timer),
    Shield,
    /// Forced recovery after an aerial was cut short by landing
    LandingLag(Timer),
    Attack(MoveInstance),
}

impl CharacterState {
    /// Name used in debug output and logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stand => "stand",
            Self::Walk => "walk",
            Self::Run => "run",
            Self::RunTurnaround(_) => "run_turnaround",
            Self::Dash(_) => "dash",
            Self::Crouch => "crouch",
            Self::Jumpsquat(_) => "jumpsquat",
            Self::Fall => "fall",
            Self::SpecialFall => "special_fall",
            Self::AirDodge(_) => "air_dodge",
            Self::WallJump(_) => "wall_jump",
            Self::Hitstun(_) => "hitstun",
            Self::Shield => "shield",
            Self::LandingLag(_) => "landing_lag",
            Self::Attack(instance) => instance.name(),
        }
    }

    /// Sprite strip shown in this state. Attacks draw from their own frames.
    pub fn animation_name(&self) -> Option<&'static str> {
        match self {
            Self::Attack(_) => None,
            Self::RunTurnaround(_) | Self::Dash(_) => Some("run"),
            Self::Jumpsquat(_) | Self::LandingLag(_) => Some("crouch"),
            Self::WallJump(_) | Self::Hitstun(_) => Some("fall"),
            other => Some(other.name()),
        }
    }

    /// Whether the player's input picks the next action this tick
    pub fn is_actionable(&self) -> bool {
        matches!(
            self,
            Self::Stand
                | Self::Walk
                | Self::Run
                | Self::Dash(_)
                | Self::Crouch
                | Self::Fall
                | Self::SpecialFall
                | Self::Shield
        )
    }

    /// Whether the horizontal input drives the ground speed in this state
    pub fn drives_ground_speed(&self) -> bool {
        matches!(self, Self::Walk | Self::Run | Self::Dash(_))
    }

    pub fn as_move(&self) -> Option<&MoveInstance> {
        match self {
            Self::Attack(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn as_move_mut(&mut self) -> Option<&mut MoveInstance> {
        match self {
            Self::Attack(instance) => Some(instance),
            _ => None,
        }
    }

    /// Advance the state's own clock by one tick
    pub fn step(&mut self) {
        match self {
            Self::RunTurnaround(timer)
            | Self::Dash(timer)
            | Self::Jumpsquat(timer)
            | Self::AirDodge(timer)
            | Self::WallJump(timer)
            | Self::Hitstun(timer)
            | Self::LandingLag(timer) => timer.step(),
            Self::Attack(instance) => instance.step(),
            _ => {}
        }
    }

    /// Whether a timed state or move has run its course
    pub fn is_finished(&self) -> bool {
        match self {
            Self::RunTurnaround(timer)
            | Self::Dash(timer)
            | Self::Jumpsquat(timer)
            | Self::AirDodge(timer)
            | Self::WallJump(timer)
            | Self::Hitstun(timer)
            | Self::LandingLag(timer) => timer.is_done(),
            Self::Attack(instance) => instance.is_complete(),
            _ => false,
        }
    }
}

/// Holds the current state and knows whether it was entered this tick from
/// outside the state-advance phase.
///
/// States entered while advancing count the current tick as their first.
/// States imposed from outside (landing lag, hitstun) are marked fresh and
/// skip their first step, so they start counting on the following tick.
#[derive(Debug, Clone, Default)]
pub struct CharacterStateMachine {
    current: CharacterState,
    previous: &'static str,
    fresh: bool,
}

impl CharacterStateMachine {
    pub fn new(initial: CharacterState) -> Self {
        Self {
            previous: initial.name(),
            current: initial,
            fresh: false,
        }
    }

    pub fn state(&self) -> &CharacterState {
        &self.current
    }

    pub fn state_mut(&mut self) -> &mut CharacterState {
        &mut self.current
    }

    /// Name of the state before the last transition
    pub fn previous_name(&self) -> &'static str {
        self.previous
    }

    /// Whether the current state was imposed and has not been stepped yet
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    /// Switch state during the advance phase
    pub fn transition(&mut self, new_state: CharacterState) {
        self.previous = self.current.name();
        self.current = new_state;
        self.fresh = false;
    }

    /// Impose a state from outside the advance phase (physics, hits)
    pub fn interrupt(&mut self, new_state: CharacterState) {
        self.previous = self.current.name();
        self.current = new_state;
        self.fresh = true;
    }

    /// Start-of-advance clock step; a fresh state only loses its flag
    pub fn step(&mut self) {
        if self.fresh {
            self.fresh = false;
        } else {
            self.current.step();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let sm = CharacterStateMachine::default();
        assert!(matches!(sm.state(), CharacterState::Fall));
        assert!(!sm.is_fresh());
    }

    #[test]
    fn test_facing() {
        assert_eq!(Facing::Left.sign(), -1.0);
        assert_eq!(Facing::Right.flipped(), Facing::Left);
        assert_eq!(Facing::from_axis(-1.0), Some(Facing::Left));
        assert_eq!(Facing::from_axis(0.0), None);
    }

    #[test]
    fn test_timer() {
        let mut timer = Timer::new(2);
        assert!(!timer.is_done());
        timer.step();
        assert_eq!(timer.remaining(), 1);
        timer.step();
        assert!(timer.is_done());

        assert!(Timer::new(0).is_done());
    }

    #[test]
    fn test_transition_records_previous() {
        let mut sm = CharacterStateMachine::new(CharacterState::Stand);
        sm.transition(CharacterState::Walk);
        assert_eq!(sm.state().name(), "walk");
        assert_eq!(sm.previous_name(), "stand");
    }

    #[test]
    fn test_interrupted_state_skips_first_step() {
        let mut sm = CharacterStateMachine::new(CharacterState::Fall);
        sm.interrupt(CharacterState::LandingLag(Timer::new(2)));
        assert!(sm.is_fresh());

        // The tick it was imposed on does not count
        sm.step();
        assert!(!sm.state().is_finished());
        sm.step();
        sm.step();
        assert!(sm.state().is_finished());
    }

    #[test]
    fn test_transitioned_state_steps_immediately() {
        let mut sm = CharacterStateMachine::new(CharacterState::Stand);
        sm.transition(CharacterState::Dash(Timer::new(1)));
        sm.step();
        assert!(sm.state().is_finished());
    }

    #[test]
    fn test_actionable_states() {
        assert!(CharacterState::Stand.is_actionable());
        assert!(CharacterState::SpecialFall.is_actionable());
        assert!(!CharacterState::Hitstun(Timer::new(5)).is_actionable());
        assert!(!CharacterState::LandingLag(Timer::new(5)).is_actionable());
        assert!(!CharacterState::Jumpsquat(Timer::new(5)).is_actionable());
    }

    #[test]
    fn test_animation_names() {
        assert_eq!(CharacterState::Stand.animation_name(), Some("stand"));
        assert_eq!(CharacterState::Dash(Timer::new(1)).animation_name(), Some("run"));
        assert_eq!(
            CharacterState::LandingLag(Timer::new(1)).animation_name(),
            Some("crouch")
        );
    }
}
