use log::info;
use retro_snake_core::{Command, Event, SoundEffect, GAME_TITLE};
use retro_snake_rendering::{
    BoardPresentation, Color, FoodPresentation, FrameInput, HudPresentation, Scene,
    SnakePresentation,
};
use retro_snake_system_steering::Steering;
use retro_snake_system_ticker::Ticker;
use retro_snake_world::{self as world, query, World};

/// Light green used to clear each frame.
pub(crate) const BACKGROUND: Color = Color::from_rgb_u8(173, 204, 96);
/// Dark green used for the snake, food, outline and text.
pub(crate) const INK: Color = Color::from_rgb_u8(43, 51, 24);

const SNAKE_ROUNDNESS: f32 = 0.5;
const FONT_SIZE: f32 = 40.0;

/// Owns the world and the systems that drive it from frame input.
#[derive(Debug)]
pub(crate) struct Simulation {
    world: World,
    ticker: Ticker,
    steering: Steering,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Simulation {
    pub(crate) fn new(world: World, ticker: Ticker) -> Self {
        Self {
            world,
            ticker,
            steering: Steering::new(),
            commands: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Builds the first scene shown before any frame has run.
    pub(crate) fn initial_scene(&self, board: BoardPresentation) -> Scene {
        let mut scene = Scene::new(
            board,
            SnakePresentation::new(Vec::new(), INK, SNAKE_ROUNDNESS),
            FoodPresentation {
                cell: query::food(&self.world),
                color: INK,
            },
            HudPresentation {
                title: GAME_TITLE.to_owned(),
                score: 0,
                font_size: FONT_SIZE,
            },
            query::play_state(&self.world),
        );
        self.populate_scene(&mut scene);
        scene
    }

    /// Advances the game by one rendered frame and refreshes `scene`.
    ///
    /// Key presses are applied before the tick so a turn pressed in the same
    /// frame as an update takes effect immediately.
    pub(crate) fn step(&mut self, input: FrameInput, scene: &mut Scene) {
        self.steering.handle(
            &input.pressed,
            query::heading(&self.world),
            &mut self.commands,
        );
        self.ticker.handle(input.elapsed, &mut self.commands);

        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }

        for event in self.events.drain(..) {
            if let Event::GameOver {
                collision,
                final_score,
            } = event
            {
                info!("game over ({collision:?}) with score {final_score}");
            }
            if let Some(sound) = SoundEffect::for_event(&event) {
                scene.queue_sound(sound);
            }
        }

        self.populate_scene(scene);
    }

    fn populate_scene(&self, scene: &mut Scene) {
        scene.snake.segments.clear();
        scene.snake.segments.extend(query::snake_cells(&self.world));
        scene.food.cell = query::food(&self.world);
        scene.hud.score = query::score(&self.world);
        scene.play_state = query::play_state(&self.world);
    }
}
