#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Input system that turns directional key presses into steering commands.
//!
//! The world applies steering unconditionally, so this system owns the rule
//! that the snake may never reverse onto itself. Presses are compared with
//! the direction applied on the last tick rather than the most recent
//! request, which keeps two quick presses inside a single tick from folding
//! the snake back on its neck.

use retro_snake_core::{Command, Direction};

/// Pure system that filters key presses into [`Command::Steer`] requests.
#[derive(Debug, Default)]
pub struct Steering;

impl Steering {
    /// Creates a new steering system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Reports whether the snake may turn toward `requested`.
    #[must_use]
    pub fn accepts(&self, requested: Direction, heading: Direction) -> bool {
        !requested.is_reverse_of(heading)
    }

    /// Emits a steer command for every accepted press, in press order.
    ///
    /// `heading` is the direction the world applied on its last tick.
    pub fn handle(&self, pressed: &[Direction], heading: Direction, out: &mut Vec<Command>) {
        for direction in pressed.iter().copied() {
            if self.accepts(direction, heading) {
                out.push(Command::Steer { direction });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_reversal_only() {
        let steering = Steering::new();

        assert!(!steering.accepts(Direction::Left, Direction::Right));
        assert!(steering.accepts(Direction::Right, Direction::Right));
        assert!(steering.accepts(Direction::Up, Direction::Right));
        assert!(steering.accepts(Direction::Down, Direction::Right));
    }
}
