// Press buffering
//
// A button pressed while the fighter is locked (lag, hitstun, hitpause)
// still fires on the first actionable tick, provided that tick falls within
// the window. Only bufferable buttons are ever pushed here.

use super::action::Action;

/// Ticks a press stays usable, counting the tick it was made on
pub const BUFFER_WINDOW: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Press {
    action: Action,
    ticks_left: u32,
}

/// Pending presses for one fighter, oldest first
#[derive(Debug, Clone)]
pub struct InputBuffer {
    presses: Vec<Press>,
    window: u32,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::with_window(BUFFER_WINDOW)
    }

    /// A buffer whose presses live for `window` ticks
    pub fn with_window(window: u32) -> Self {
        Self {
            presses: Vec::with_capacity(Action::ALL.len()),
            window,
        }
    }

    /// Record a press. Pressing again restarts its window.
    pub fn push(&mut self, action: Action) {
        match self.presses.iter_mut().find(|press| press.action == action) {
            Some(press) => press.ticks_left = self.window,
            None => self.presses.push(Press {
                action,
                ticks_left: self.window,
            }),
        }
    }

    pub fn has(&self, action: Action) -> bool {
        self.presses.iter().any(|press| press.action == action)
    }

    /// Take a pending press. Returns false if there was none.
    pub fn consume(&mut self, action: Action) -> bool {
        let before = self.presses.len();
        self.presses.retain(|press| press.action != action);
        self.presses.len() != before
    }

    /// Age every press by one tick and drop the expired ones
    pub fn update(&mut self) {
        self.presses.retain_mut(|press| {
            press.ticks_left = press.ticks_left.saturating_sub(1);
            press.ticks_left > 0
        });
    }

    pub fn clear(&mut self) {
        self.presses.clear();
    }

    pub fn len(&self) -> usize {
        self.presses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presses.is_empty()
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_expires_after_window() {
        let mut buffer = InputBuffer::new();
        buffer.push(Action::Jump);
        for _ in 0..BUFFER_WINDOW - 1 {
            buffer.update();
            assert!(buffer.has(Action::Jump));
        }
        buffer.update();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_repress_restarts_window() {
        let mut buffer = InputBuffer::with_window(3);
        buffer.push(Action::Attack);
        buffer.update();
        buffer.update();
        buffer.push(Action::Attack);
        assert_eq!(buffer.len(), 1);

        buffer.update();
        buffer.update();
        assert!(buffer.has(Action::Attack));
    }

    #[test]
    fn test_consume_takes_only_that_action() {
        let mut buffer = InputBuffer::new();
        buffer.push(Action::Attack);
        buffer.push(Action::Shield);
        assert!(buffer.consume(Action::Attack));
        assert!(!buffer.consume(Action::Attack));
        assert!(buffer.has(Action::Shield));

        buffer.clear();
        assert!(buffer.is_empty());
    }
}
