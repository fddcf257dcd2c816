#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Retro Snake.
//!
//! Sound playback is opt-in. Without this crate's `audio` feature macroquad
//! is built with no sound backend, so eat and wall cues queued on the scene
//! are written to the `log` facade at debug level instead of being played.
//! With the feature on, the clips named by the asset manifest are loaded at
//! startup and each queued cue plays once after the frame is drawn.

mod assets;

use self::assets::GameAssets;
use anyhow::Result;
use glam::Vec2;
use log::info;
use macroquad::input::{is_key_pressed, KeyCode};
use retro_snake_core::Direction;
use retro_snake_rendering::{
    BoardPresentation, Color, FoodPresentation, FrameInput, HudPresentation, Presentation,
    RenderingBackend, Scene, SnakePresentation,
};
use std::{path::PathBuf, sync::mpsc, time::Duration};

const DIRECTION_KEYS: [(KeyCode, Direction); 4] = [
    (KeyCode::Up, Direction::Up),
    (KeyCode::Down, Direction::Down),
    (KeyCode::Left, Direction::Left),
    (KeyCode::Right, Direction::Right),
];

struct KeyboardShortcuts {
    /// `Escape` closes the window.
    quit_requested: bool,
    /// Arrow key states, in polling order.
    directions: [(Direction, bool); 4],
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape);
        let directions = DIRECTION_KEYS.map(|(key, direction)| (direction, is_key_pressed(key)));

        Self {
            quit_requested,
            directions,
        }
    }
}

fn pressed_directions(observations: &[(Direction, bool)]) -> Vec<Direction> {
    observations
        .iter()
        .filter(|(_, pressed)| *pressed)
        .map(|(direction, _)| *direction)
        .collect()
}

fn frame_input_from_observations(
    elapsed_seconds: f64,
    observations: &[(Direction, bool)],
) -> FrameInput {
    let elapsed = if elapsed_seconds.is_finite() && elapsed_seconds > 0.0 {
        Duration::from_secs_f64(elapsed_seconds)
    } else {
        Duration::ZERO
    };

    FrameInput {
        elapsed,
        pressed: pressed_directions(observations),
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    asset_manifest: Option<PathBuf>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs the frame rate once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Loads the food sprite and sounds from the manifest at `path`.
    ///
    /// Without a manifest the food is drawn as a plain square and sound
    /// effects are only logged.
    #[must_use]
    pub fn with_asset_manifest(mut self, path: Option<PathBuf>) -> Self {
        self.asset_manifest = path;
        self
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the average rate once one second
    /// has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            asset_manifest,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let window_length = scene.board.window_length().round() as i32;
        let mut config = macroquad::window::Conf {
            window_title,
            window_width: window_length,
            window_height: window_length,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (init_sender, init_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let assets = match &asset_manifest {
                Some(path) => match GameAssets::load(path).await {
                    Ok(assets) => assets,
                    Err(error) => {
                        let _ = init_sender.send(Err(error));
                        return;
                    }
                },
                None => GameAssets::default(),
            };
            let _ = init_sender.send(Ok(()));

            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                let input = frame_input_from_observations(
                    macroquad::time::get_time(),
                    &keyboard.directions,
                );
                update_scene(input, &mut scene);

                macroquad::window::clear_background(background);
                draw_frame(&scene.board);
                draw_hud(&scene.board, &scene.hud);
                draw_food(&scene.board, &scene.food, &assets);
                draw_snake(&scene.board, &scene.snake);

                for sound in scene.take_sounds() {
                    assets.play(sound);
                }

                let frame = Duration::from_secs_f32(macroquad::time::get_frame_time().max(0.0));
                if let Some(per_second) = fps_counter.record_frame(frame) {
                    if show_fps {
                        info!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        init_receiver.recv().unwrap_or_else(|_| Ok(()))?;

        Ok(())
    }
}

fn draw_frame(board: &BoardPresentation) {
    let (origin, side) = board.frame();
    macroquad::shapes::draw_rectangle_lines(
        origin.x,
        origin.y,
        side,
        side,
        BoardPresentation::FRAME_THICKNESS,
        to_macroquad_color(board.ink),
    );
}

fn draw_hud(board: &BoardPresentation, hud: &HudPresentation) {
    let ink = to_macroquad_color(board.ink);
    let title = board.title_anchor();
    let score = board.score_anchor();
    // macroquad anchors text at the baseline; shift down so anchors mark the top edge.
    let _ = macroquad::text::draw_text(
        &hud.title,
        title.x,
        title.y + hud.font_size,
        hud.font_size,
        ink,
    );
    let _ = macroquad::text::draw_text(
        &hud.score.to_string(),
        score.x,
        score.y + hud.font_size,
        hud.font_size,
        ink,
    );
}

fn draw_food(board: &BoardPresentation, food: &FoodPresentation, assets: &GameAssets) {
    let origin = board.cell_origin(food.cell);
    match assets.food() {
        Some(sprite) => sprite.draw(origin),
        None => macroquad::shapes::draw_rectangle(
            origin.x,
            origin.y,
            board.cell_size,
            board.cell_size,
            to_macroquad_color(food.color),
        ),
    }
}

fn draw_snake(board: &BoardPresentation, snake: &SnakePresentation) {
    let color = to_macroquad_color(snake.color);
    for segment in &snake.segments {
        let shape = RoundedSquare::new(board.cell_origin(*segment), board.cell_size, snake.roundness);
        for (origin, size) in shape.rectangles() {
            macroquad::shapes::draw_rectangle(origin.x, origin.y, size.x, size.y, color);
        }
        if shape.radius > 0.0 {
            for center in shape.corner_centers() {
                macroquad::shapes::draw_circle(center.x, center.y, shape.radius, color);
            }
        }
    }
}

/// Square with circular corners, decomposed into primitives macroquad can draw.
#[derive(Clone, Copy, Debug, PartialEq)]
struct RoundedSquare {
    origin: Vec2,
    size: f32,
    radius: f32,
}

impl RoundedSquare {
    fn new(origin: Vec2, size: f32, roundness: f32) -> Self {
        let size = size.max(0.0);
        Self {
            origin,
            size,
            radius: roundness.clamp(0.0, 1.0) * size / 2.0,
        }
    }

    /// Cross-shaped pair of rectangles covering everything but the corners.
    fn rectangles(&self) -> [(Vec2, Vec2); 2] {
        let inset = self.size - 2.0 * self.radius;
        [
            (
                self.origin + Vec2::new(self.radius, 0.0),
                Vec2::new(inset, self.size),
            ),
            (
                self.origin + Vec2::new(0.0, self.radius),
                Vec2::new(self.size, inset),
            ),
        ]
    }

    fn corner_centers(&self) -> [Vec2; 4] {
        let near = self.radius;
        let far = self.size - self.radius;
        [
            self.origin + Vec2::new(near, near),
            self.origin + Vec2::new(far, near),
            self.origin + Vec2::new(near, far),
            self.origin + Vec2::new(far, far),
        ]
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
