#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Retro Snake.

mod food;
mod snake;

use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use retro_snake_core::{contains, Cell, Collision, Command, Direction, Event, Grid, PlayState};
use thiserror::Error;

use self::{food::Food, snake::Snake};

/// Seed used when no explicit seed is configured.
pub const DEFAULT_RNG_SEED: u64 = 0x42f0_e1eb_d4a5_3c21;

/// Starting body of the classic game, head first.
pub const CLASSIC_BODY: [Cell; 3] = [Cell::new(6, 9), Cell::new(5, 9), Cell::new(4, 9)];

/// Starting direction of the classic game.
pub const CLASSIC_DIRECTION: Direction = Direction::Right;

/// Parameters that define a fresh game and what a reset returns to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    grid: Grid,
    initial_body: Vec<Cell>,
    initial_direction: Direction,
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration from explicit parts.
    #[must_use]
    pub fn new(
        grid: Grid,
        initial_body: Vec<Cell>,
        initial_direction: Direction,
        rng_seed: u64,
    ) -> Self {
        Self {
            grid,
            initial_body,
            initial_direction,
            rng_seed,
        }
    }

    /// Replaces the seed driving food placement.
    #[must_use]
    pub fn with_rng_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = rng_seed;
        self
    }

    /// Board the game is played on.
    #[must_use]
    pub const fn grid(&self) -> Grid {
        self.grid
    }

    /// Body the snake starts with and returns to after a collision.
    #[must_use]
    pub fn initial_body(&self) -> &[Cell] {
        &self.initial_body
    }

    /// Direction the snake starts with and returns to after a collision.
    #[must_use]
    pub const fn initial_direction(&self) -> Direction {
        self.initial_direction
    }

    /// Seed driving food placement.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            Grid::default(),
            CLASSIC_BODY.to_vec(),
            CLASSIC_DIRECTION,
            DEFAULT_RNG_SEED,
        )
    }
}

/// Snake and food placement that overrides the configured starting position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Body cells, head first.
    pub body: Vec<Cell>,
    /// Direction of travel.
    pub direction: Direction,
    /// Food cell; a random free cell is chosen when absent.
    pub food: Option<Cell>,
}

/// Reasons a configuration or layout is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The board has no cells.
    #[error("board must contain at least one cell per axis")]
    EmptyGrid,
    /// The snake has no cells.
    #[error("snake body must contain at least one cell")]
    EmptyBody,
    /// A body cell lies off the board.
    #[error("snake cell {cell:?} lies outside the {cell_count}x{cell_count} board")]
    OutsideGrid {
        /// Offending cell.
        cell: Cell,
        /// Board side length.
        cell_count: u32,
    },
    /// Two consecutive body cells do not share an edge.
    #[error("snake cell {index} is not adjacent to the cell after it")]
    Disjoint {
        /// Index of the first cell of the broken pair.
        index: usize,
    },
    /// The body visits the same cell twice.
    #[error("snake body visits {cell:?} more than once")]
    Overlap {
        /// Repeated cell.
        cell: Cell,
    },
    /// The body leaves no free cell for food.
    #[error("snake body covers the whole board")]
    NoFreeCell,
    /// The requested food cell is unusable.
    #[error("food cell {cell:?} must lie on the board and off the snake")]
    InvalidFood {
        /// Requested food cell.
        cell: Cell,
    },
}

/// Represents the authoritative Retro Snake game state.
#[derive(Debug)]
pub struct World {
    grid: Grid,
    snake: Snake,
    food: Food,
    play_state: PlayState,
    score: u32,
    rng: ChaCha8Rng,
    tick_index: u64,
}

impl World {
    /// Creates a running game at the configured starting position.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let grid = config.grid();
        validate_body(grid, config.initial_body())?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.rng_seed());
        let snake = Snake::new(config.initial_body, config.initial_direction);
        let food = Food::spawn(grid, snake.body(), &mut rng);

        Ok(Self {
            grid,
            snake,
            food,
            play_state: PlayState::Running,
            score: 0,
            rng,
            tick_index: 0,
        })
    }

    /// Creates a running game with the snake and food placed by `layout`.
    ///
    /// Collisions still reset to the configured starting position.
    pub fn with_layout(config: Config, layout: Layout) -> Result<Self, ConfigError> {
        let mut world = Self::new(config)?;
        validate_body(world.grid, &layout.body)?;
        world.snake.place(&layout.body, layout.direction);

        world.food = match layout.food {
            Some(cell) => {
                if !world.grid.is_within(cell) || contains(cell, &layout.body) {
                    return Err(ConfigError::InvalidFood { cell });
                }
                Food::at(cell)
            }
            None => Food::spawn(world.grid, world.snake.body(), &mut world.rng),
        };

        Ok(world)
    }

    fn update(&mut self, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);

        let grew = self.snake.advance();
        let head = self.snake.head();
        out_events.push(Event::SnakeAdvanced { head, grew });

        if head == self.food.position() {
            let cell = self.food.relocate(self.grid, self.snake.body(), &mut self.rng);
            self.snake.grow();
            self.score = self.score.saturating_add(1);
            debug!("food eaten at {head:?}, score {}", self.score);
            out_events.push(Event::FoodEaten {
                cell: head,
                score: self.score,
            });
            out_events.push(Event::FoodRelocated { cell });
        }

        if self.grid.is_past_edge(head) {
            self.game_over(Collision::Edge, out_events);
            return;
        }

        if contains(head, self.snake.tail()) {
            self.game_over(Collision::Tail, out_events);
        }
    }

    fn game_over(&mut self, collision: Collision, out_events: &mut Vec<Event>) {
        let final_score = self.score;
        self.snake.reset();
        let cell = self.food.relocate(self.grid, self.snake.body(), &mut self.rng);
        self.play_state = PlayState::Stopped;
        self.score = 0;

        debug!("game over ({collision:?}) with score {final_score}");
        out_events.push(Event::GameOver {
            collision,
            final_score,
        });
        out_events.push(Event::FoodRelocated { cell });
    }

    fn steer(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if self.snake.direction() != direction {
            self.snake.set_direction(direction);
            out_events.push(Event::DirectionChanged { direction });
        }

        if self.play_state == PlayState::Stopped {
            self.play_state = PlayState::Running;
            debug!("play resumed heading {direction:?}");
            out_events.push(Event::PlayResumed);
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => {
            if world.play_state == PlayState::Running {
                world.update(out_events);
            }
        }
        Command::Steer { direction } => world.steer(direction, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use retro_snake_core::{Cell, Direction, Grid, PlayState};

    /// Board the game is played on.
    #[must_use]
    pub fn grid(world: &World) -> Grid {
        world.grid
    }

    /// Snake cells in order, head first.
    pub fn snake_cells(world: &World) -> impl ExactSizeIterator<Item = Cell> + '_ {
        world.snake.body().iter().copied()
    }

    /// Cell occupied by the snake's head.
    #[must_use]
    pub fn snake_head(world: &World) -> Cell {
        world.snake.head()
    }

    /// Number of cells in the snake's body.
    #[must_use]
    pub fn snake_len(world: &World) -> usize {
        world.snake.len()
    }

    /// Direction the snake will travel on the next tick.
    #[must_use]
    pub fn direction(world: &World) -> Direction {
        world.snake.direction()
    }

    /// Direction the snake travelled on the last tick.
    ///
    /// Input handlers compare against this to reject 180° turns.
    #[must_use]
    pub fn heading(world: &World) -> Direction {
        world.snake.heading()
    }

    /// Cell currently holding the food.
    #[must_use]
    pub fn food(world: &World) -> Cell {
        world.food.position()
    }

    /// Current score.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Whether ticks currently advance the snake.
    #[must_use]
    pub fn play_state(world: &World) -> PlayState {
        world.play_state
    }

    /// Number of updates executed while running.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}

fn validate_body(grid: Grid, body: &[Cell]) -> Result<(), ConfigError> {
    if grid.cell_count() == 0 {
        return Err(ConfigError::EmptyGrid);
    }

    if body.is_empty() {
        return Err(ConfigError::EmptyBody);
    }

    if let Some(cell) = body.iter().copied().find(|cell| !grid.is_within(*cell)) {
        return Err(ConfigError::OutsideGrid {
            cell,
            cell_count: grid.cell_count(),
        });
    }

    if let Some(index) = body
        .windows(2)
        .position(|pair| !pair[0].is_adjacent(pair[1]))
    {
        return Err(ConfigError::Disjoint { index });
    }

    for (index, cell) in body.iter().enumerate() {
        if contains(*cell, &body[..index]) {
            return Err(ConfigError::Overlap { cell: *cell });
        }
    }

    if body.len() as u64 >= grid.area() {
        return Err(ConfigError::NoFreeCell);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_world_starts_running_with_classic_snake() {
        let world = World::new(Config::default()).expect("default config is valid");

        assert_eq!(query::play_state(&world), PlayState::Running);
        assert_eq!(query::score(&world), 0);
        assert_eq!(
            query::snake_cells(&world).collect::<Vec<_>>(),
            CLASSIC_BODY.to_vec()
        );
        assert_eq!(query::direction(&world), Direction::Right);
        assert!(!contains(query::food(&world), &CLASSIC_BODY));
    }

    #[test]
    fn rejects_body_outside_grid() {
        let config = Config::new(
            Grid::new(5),
            vec![Cell::new(5, 0), Cell::new(4, 0)],
            Direction::Right,
            1,
        );

        assert_eq!(
            World::new(config).expect_err("cell (5, 0) is off a 5x5 board"),
            ConfigError::OutsideGrid {
                cell: Cell::new(5, 0),
                cell_count: 5
            }
        );
    }

    #[test]
    fn rejects_disjoint_and_overlapping_bodies() {
        let disjoint = Config::new(
            Grid::default(),
            vec![Cell::new(6, 9), Cell::new(4, 9)],
            Direction::Right,
            1,
        );
        assert_eq!(
            World::new(disjoint).expect_err("gap in body"),
            ConfigError::Disjoint { index: 0 }
        );

        let overlapping = Config::new(
            Grid::default(),
            vec![Cell::new(6, 9), Cell::new(5, 9), Cell::new(6, 9)],
            Direction::Right,
            1,
        );
        assert_eq!(
            World::new(overlapping).expect_err("repeated cell"),
            ConfigError::Overlap {
                cell: Cell::new(6, 9)
            }
        );
    }

    #[test]
    fn rejects_body_filling_the_board() {
        let config = Config::new(
            Grid::new(1),
            vec![Cell::new(0, 0)],
            Direction::Right,
            1,
        );

        assert_eq!(
            World::new(config).expect_err("no room for food"),
            ConfigError::NoFreeCell
        );
        assert_eq!(
            World::new(Config::new(Grid::new(0), vec![], Direction::Up, 1))
                .expect_err("empty board"),
            ConfigError::EmptyGrid
        );
    }

    #[test]
    fn rejects_food_on_snake() {
        let layout = Layout {
            body: CLASSIC_BODY.to_vec(),
            direction: Direction::Right,
            food: Some(Cell::new(5, 9)),
        };

        assert_eq!(
            World::with_layout(Config::default(), layout).expect_err("food on body"),
            ConfigError::InvalidFood {
                cell: Cell::new(5, 9)
            }
        );
    }

    #[test]
    fn tick_is_ignored_while_stopped() {
        let mut world = World::new(Config::default()).expect("valid config");
        world.play_state = PlayState::Stopped;
        let mut events = Vec::new();

        apply(&mut world, Command::Tick, &mut events);

        assert!(events.is_empty());
        assert_eq!(query::tick_index(&world), 0);
        assert_eq!(query::snake_head(&world), Cell::new(6, 9));
    }

    #[test]
    fn steering_same_direction_only_resumes() {
        let mut world = World::new(Config::default()).expect("valid config");
        world.play_state = PlayState::Stopped;
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::Steer {
                direction: Direction::Right,
            },
            &mut events,
        );

        assert_eq!(events, vec![Event::PlayResumed]);
        assert_eq!(query::play_state(&world), PlayState::Running);
    }
}
