// Fighting-game action definitions

/// Represents every discrete control a fighter reads from its command stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement axis
    Left,
    Right,
    Up,
    Down,

    // Buttons
    Jump,
    Attack,
    Special,
    Shield,
}

impl Action {
    /// Every action, in a stable order
    pub const ALL: [Action; 8] = [
        Action::Left,
        Action::Right,
        Action::Up,
        Action::Down,
        Action::Jump,
        Action::Attack,
        Action::Special,
        Action::Shield,
    ];

    /// Whether this action is a button whose presses get buffered
    pub fn is_bufferable(self) -> bool {
        matches!(
            self,
            Action::Jump | Action::Attack | Action::Special | Action::Shield
        )
    }
}

/// Stick direction relative to the fighter, used to pick attacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackDirection {
    Neutral,
    Up,
    Down,
    Forward,
    Back,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_equality() {
        assert_eq!(Action::Jump, Action::Jump);
        assert_ne!(Action::Jump, Action::Down);
    }

    #[test]
    fn test_only_buttons_are_bufferable() {
        assert!(Action::Jump.is_bufferable());
        assert!(Action::Attack.is_bufferable());
        assert!(Action::Special.is_bufferable());
        assert!(Action::Shield.is_bufferable());
        assert!(!Action::Left.is_bufferable());
        assert!(!Action::Down.is_bufferable());
    }

    #[test]
    fn test_all_actions_unique() {
        let mut seen = std::collections::HashSet::new();
        for action in Action::ALL {
            assert!(seen.insert(action), "Duplicate action in Action::ALL");
        }
    }
}
