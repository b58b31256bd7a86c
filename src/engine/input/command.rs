// Per-fighter command snapshots and the pressed/held/released view over them

use super::action::{Action, AttackDirection};
use super::buffer::InputBuffer;
use std::collections::HashSet;

/// One tick's worth of held actions, as produced by the device layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    held: HashSet<Action>,
}

impl Command {
    /// An empty snapshot (nothing held)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper that marks an action as held
    pub fn with(mut self, action: Action) -> Self {
        self.held.insert(action);
        self
    }

    /// Build a snapshot from a list of held actions
    pub fn from_actions(actions: &[Action]) -> Self {
        Self {
            held: actions.iter().copied().collect(),
        }
    }

    /// Check if an action is held in this snapshot
    pub fn holds(&self, action: Action) -> bool {
        self.held.contains(&action)
    }
}

/// Input state for a single fighter, derived from consecutive [`Command`]s
#[derive(Debug, Clone, Default)]
pub struct CommandState {
    /// Actions held in the latest snapshot
    held: HashSet<Action>,

    /// Actions that went down with the latest snapshot
    just_pressed: HashSet<Action>,

    /// Actions that went up with the latest snapshot
    just_released: HashSet<Action>,

    /// Presses waiting for an actionable state
    buffer: InputBuffer,
}

impl CommandState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the snapshot for this tick. Call exactly once per tick.
    pub fn apply(&mut self, command: &Command) {
        self.buffer.update();

        self.just_pressed = command.held.difference(&self.held).copied().collect();
        self.just_released = self.held.difference(&command.held).copied().collect();
        self.held = command.held.clone();

        // Stable order keeps buffering deterministic
        for action in Action::ALL {
            if action.is_bufferable() && self.just_pressed.contains(&action) {
                self.buffer.push(action);
            }
        }
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    /// Check if an action went down this tick
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action went up this tick
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Check if a press is waiting in the buffer
    pub fn is_buffered(&self, action: Action) -> bool {
        self.buffer.has(action)
    }

    /// Consume a buffered press
    /// Returns true if the press was buffered and consumed
    pub fn consume(&mut self, action: Action) -> bool {
        self.buffer.consume(action)
    }

    /// Horizontal axis: -1 left, 1 right, 0 neutral or both
    pub fn horizontal(&self) -> f32 {
        let mut horizontal = 0.0;
        if self.is_held(Action::Left) {
            horizontal -= 1.0;
        }
        if self.is_held(Action::Right) {
            horizontal += 1.0;
        }
        horizontal
    }

    /// Vertical axis in screen space: -1 up, 1 down
    pub fn vertical(&self) -> f32 {
        let mut vertical = 0.0;
        if self.is_held(Action::Up) {
            vertical -= 1.0;
        }
        if self.is_held(Action::Down) {
            vertical += 1.0;
        }
        vertical
    }

    /// Horizontal direction that went down this tick, if any
    pub fn horizontal_tap(&self) -> f32 {
        match (
            self.just_pressed(Action::Left),
            self.just_pressed(Action::Right),
        ) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// Stick direction relative to a facing sign (1 right, -1 left).
    /// Vertical wins over horizontal.
    pub fn attack_direction(&self, facing_sign: f32) -> AttackDirection {
        let vertical = self.vertical();
        let horizontal = self.horizontal();
        if vertical < 0.0 {
            AttackDirection::Up
        } else if vertical > 0.0 {
            AttackDirection::Down
        } else if horizontal == 0.0 {
            AttackDirection::Neutral
        } else if horizontal == facing_sign {
            AttackDirection::Forward
        } else {
            AttackDirection::Back
        }
    }

    /// Drop everything, including buffered presses
    pub fn reset(&mut self) {
        self.held.clear();
        self.just_pressed.clear();
        self.just_released.clear();
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_then_hold_then_release() {
        let mut input = CommandState::new();

        input.apply(&Command::new().with(Action::Jump));
        assert!(input.is_held(Action::Jump));
        assert!(input.just_pressed(Action::Jump));

        input.apply(&Command::new().with(Action::Jump));
        assert!(input.is_held(Action::Jump));
        assert!(!input.just_pressed(Action::Jump));

        input.apply(&Command::new());
        assert!(!input.is_held(Action::Jump));
        assert!(input.just_released(Action::Jump));
    }

    #[test]
    fn test_presses_are_buffered() {
        let mut input = CommandState::new();
        input.apply(&Command::new().with(Action::Attack));
        input.apply(&Command::new());

        assert!(input.is_buffered(Action::Attack));
        assert!(input.consume(Action::Attack));
        assert!(!input.is_buffered(Action::Attack));
    }

    #[test]
    fn test_movement_is_not_buffered() {
        let mut input = CommandState::new();
        input.apply(&Command::new().with(Action::Left));
        assert!(!input.is_buffered(Action::Left));
    }

    #[test]
    fn test_axes() {
        let mut input = CommandState::new();
        input.apply(&Command::from_actions(&[Action::Right, Action::Up]));
        assert_eq!(input.horizontal(), 1.0);
        assert_eq!(input.vertical(), -1.0);

        input.apply(&Command::from_actions(&[Action::Left, Action::Right]));
        assert_eq!(input.horizontal(), 0.0);
        assert_eq!(input.vertical(), 0.0);
    }

    #[test]
    fn test_horizontal_tap_only_on_press() {
        let mut input = CommandState::new();
        input.apply(&Command::new().with(Action::Left));
        assert_eq!(input.horizontal_tap(), -1.0);

        input.apply(&Command::new().with(Action::Left));
        assert_eq!(input.horizontal_tap(), 0.0);
    }

    #[test]
    fn test_attack_direction_relative_to_facing() {
        let mut input = CommandState::new();
        input.apply(&Command::new().with(Action::Left));
        assert_eq!(input.attack_direction(1.0), AttackDirection::Back);
        assert_eq!(input.attack_direction(-1.0), AttackDirection::Forward);

        input.apply(&Command::from_actions(&[Action::Left, Action::Down]));
        assert_eq!(input.attack_direction(1.0), AttackDirection::Down);

        input.apply(&Command::new());
        assert_eq!(input.attack_direction(1.0), AttackDirection::Neutral);
    }

    #[test]
    fn test_reset() {
        let mut input = CommandState::new();
        input.apply(&Command::from_actions(&[Action::Jump, Action::Right]));
        input.reset();

        assert!(!input.is_held(Action::Jump));
        assert!(!input.is_buffered(Action::Jump));
        assert_eq!(input.horizontal(), 0.0);
    }
}
