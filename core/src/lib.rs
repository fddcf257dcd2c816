#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Retro Snake game.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then reports [`Event`] values
//! describing what happened during the tick. Rendering reads immutable world
//! queries and never mutates state.

use serde::{Deserialize, Serialize};

/// Title shown on the window and above the board.
pub const GAME_TITLE: &str = "Retro Snake";

/// Describes whether the snake is currently moving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayState {
    /// Ticks advance the snake and run collision checks.
    Running,
    /// A collision reset the game; ticks are ignored until the player steers.
    Stopped,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Runs one fixed-interval game update.
    Tick,
    /// Points the snake in a new direction and resumes play if it was stopped.
    ///
    /// Callers are responsible for rejecting reversals before submitting.
    Steer {
        /// Direction the snake should travel from the next tick on.
        direction: Direction,
    },
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The snake moved one cell during a tick.
    SnakeAdvanced {
        /// Cell occupied by the head after the move.
        head: Cell,
        /// Whether the body grew by one cell instead of translating.
        grew: bool,
    },
    /// The head reached the food cell.
    FoodEaten {
        /// Cell the food occupied when it was eaten.
        cell: Cell,
        /// Score after the food was counted.
        score: u32,
    },
    /// The food moved to a new free cell.
    FoodRelocated {
        /// Newly assigned food cell.
        cell: Cell,
    },
    /// The snake collided and the game was reset.
    GameOver {
        /// What the head ran into.
        collision: Collision,
        /// Score held immediately before the reset.
        final_score: u32,
    },
    /// The travel direction changed.
    DirectionChanged {
        /// Direction the snake now travels in.
        direction: Direction,
    },
    /// Play resumed after a game over.
    PlayResumed,
}

/// Obstacles that end a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collision {
    /// The head left the board.
    Edge,
    /// The head ran into the rest of the body.
    Tail,
}

/// Sound cues the presentation layer knows how to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Played when food is eaten.
    Eat,
    /// Played when the snake collides and the game resets.
    Wall,
}

impl SoundEffect {
    /// Maps a world event onto the sound it should trigger, if any.
    #[must_use]
    pub const fn for_event(event: &Event) -> Option<Self> {
        match event {
            Event::FoodEaten { .. } => Some(Self::Eat),
            Event::GameOver { .. } => Some(Self::Wall),
            _ => None,
        }
    }
}

/// Cardinal travel directions available to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// All directions in the order the input layer polls them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit offset `(dx, dy)` applied to a cell when moving in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Direction pointing the exact opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns `true` when turning from `self` to `other` would be a 180° turn.
    #[must_use]
    pub fn is_reverse_of(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Location of a single board cell.
///
/// Coordinates are signed so a head that has just left the board can still
/// be represented and detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    x: i32,
    y: i32,
}

impl Cell {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Neighbouring cell one step away in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Reports whether the two cells share an edge.
    #[must_use]
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }
}

/// Square board measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    cell_count: u32,
}

impl Grid {
    /// Board side used by the classic game.
    pub const DEFAULT_CELL_COUNT: u32 = 25;

    /// Creates a board with `cell_count` cells along each axis.
    #[must_use]
    pub const fn new(cell_count: u32) -> Self {
        Self { cell_count }
    }

    /// Number of cells along each axis.
    #[must_use]
    pub const fn cell_count(&self) -> u32 {
        self.cell_count
    }

    /// Total number of cells on the board.
    #[must_use]
    pub const fn area(&self) -> u64 {
        self.cell_count as u64 * self.cell_count as u64
    }

    /// Reports whether the cell lies on the board.
    #[must_use]
    pub fn is_within(&self, cell: Cell) -> bool {
        let bound = i64::from(self.cell_count);
        (0..bound).contains(&i64::from(cell.x())) && (0..bound).contains(&i64::from(cell.y()))
    }

    /// Reports whether the cell sits on the first row or column outside the board.
    ///
    /// Only `-1` and `cell_count` count as past the edge. The snake moves one
    /// cell per tick, so a head can never skip over those values.
    #[must_use]
    pub fn is_past_edge(&self, cell: Cell) -> bool {
        let edge = i64::from(self.cell_count);
        let x = i64::from(cell.x());
        let y = i64::from(cell.y());
        x == -1 || x == edge || y == -1 || y == edge
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CELL_COUNT)
    }
}

/// Reports whether `pos` equals any of `cells`.
///
/// Linear scan; no ordering is assumed.
#[must_use]
pub fn contains<'a, I>(pos: Cell, cells: I) -> bool
where
    I: IntoIterator<Item = &'a Cell>,
{
    cells.into_iter().any(|cell| *cell == pos)
}

#[cfg(test)]
mod tests {
    use super::{contains, Cell, Direction, Event, Grid, SoundEffect};
    use serde::Deserialize;

    #[test]
    fn step_applies_unit_offsets() {
        let origin = Cell::new(5, 5);
        assert_eq!(origin.step(Direction::Up), Cell::new(5, 4));
        assert_eq!(origin.step(Direction::Down), Cell::new(5, 6));
        assert_eq!(origin.step(Direction::Left), Cell::new(4, 5));
        assert_eq!(origin.step(Direction::Right), Cell::new(6, 5));
    }

    #[test]
    fn opposite_directions_are_reverses() {
        for direction in Direction::ALL {
            assert!(direction.is_reverse_of(direction.opposite()));
            assert!(!direction.is_reverse_of(direction));
        }
        assert!(!Direction::Up.is_reverse_of(Direction::Left));
    }

    #[test]
    fn adjacency_requires_single_axis_unit_step() {
        let cell = Cell::new(3, 3);
        assert!(cell.is_adjacent(Cell::new(4, 3)));
        assert!(cell.is_adjacent(Cell::new(3, 2)));
        assert!(!cell.is_adjacent(Cell::new(4, 4)));
        assert!(!cell.is_adjacent(cell));
    }

    #[test]
    fn contains_scans_every_cell() {
        let cells = [Cell::new(6, 9), Cell::new(5, 9), Cell::new(4, 9)];
        assert!(contains(Cell::new(4, 9), &cells));
        assert!(!contains(Cell::new(7, 9), &cells));
        assert!(!contains(Cell::new(0, 0), &[]));
    }

    #[test]
    fn edge_detection_matches_first_cell_outside_board() {
        let grid = Grid::default();
        assert!(grid.is_past_edge(Cell::new(25, 10)));
        assert!(grid.is_past_edge(Cell::new(-1, 10)));
        assert!(grid.is_past_edge(Cell::new(10, 25)));
        assert!(grid.is_past_edge(Cell::new(10, -1)));
        assert!(!grid.is_past_edge(Cell::new(24, 0)));
        assert!(!grid.is_past_edge(Cell::new(0, 24)));
    }

    #[test]
    fn within_covers_board_only() {
        let grid = Grid::new(3);
        assert!(grid.is_within(Cell::new(0, 0)));
        assert!(grid.is_within(Cell::new(2, 2)));
        assert!(!grid.is_within(Cell::new(3, 0)));
        assert!(!grid.is_within(Cell::new(0, -1)));
        assert_eq!(grid.area(), 9);
    }

    #[test]
    fn sound_cues_follow_eat_and_game_over() {
        let eaten = Event::FoodEaten {
            cell: Cell::new(1, 1),
            score: 1,
        };
        assert_eq!(SoundEffect::for_event(&eaten), Some(SoundEffect::Eat));
        assert_eq!(SoundEffect::for_event(&Event::PlayResumed), None);
    }

    #[derive(Deserialize)]
    struct Layout {
        direction: Direction,
        body: Vec<Cell>,
    }

    #[test]
    fn layout_deserializes_from_toml() {
        let layout: Layout = toml::from_str(
            "direction = \"left\"\nbody = [{ x = 6, y = 9 }, { x = 7, y = 9 }]\n",
        )
        .expect("valid layout");

        assert_eq!(layout.direction, Direction::Left);
        assert_eq!(layout.body, vec![Cell::new(6, 9), Cell::new(7, 9)]);
    }
}
