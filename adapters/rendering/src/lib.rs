#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Retro Snake adapters.
//!
//! The simulation describes each frame declaratively through a [`Scene`];
//! backends translate scenes into draw calls and sound playback, and report
//! the clock and key presses back through [`FrameInput`].

use anyhow::Result as AnyResult;
use glam::Vec2;
use retro_snake_core::{Cell, Direction, PlayState, SoundEffect};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Time elapsed since the backend started presenting frames.
    pub elapsed: Duration,
    /// Directional keys pressed since the previous frame, in polling order.
    pub pressed: Vec<Direction>,
}

/// Square board layout in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardPresentation {
    /// Number of cells along each axis.
    pub cell_count: u32,
    /// Side length of a cell in pixels.
    pub cell_size: f32,
    /// Margin between the window edge and the board in pixels.
    pub offset: f32,
    /// Color of the board outline and text.
    pub ink: Color,
}

impl BoardPresentation {
    /// Gap between the board and its outline in pixels.
    pub const FRAME_GAP: f32 = 5.0;

    /// Thickness of the board outline in pixels.
    pub const FRAME_THICKNESS: f32 = 5.0;

    /// Creates a new board descriptor.
    ///
    /// Returns an error when the board would have no visible cells.
    pub fn new(
        cell_count: u32,
        cell_size: f32,
        offset: f32,
        ink: Color,
    ) -> std::result::Result<Self, RenderingError> {
        if cell_count == 0 {
            return Err(RenderingError::EmptyBoard);
        }

        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(RenderingError::InvalidCellSize { cell_size });
        }

        Ok(Self {
            cell_count,
            cell_size,
            offset: offset.max(0.0),
            ink,
        })
    }

    /// Side length of the playable area in pixels.
    #[must_use]
    pub fn board_length(&self) -> f32 {
        self.cell_size * self.cell_count as f32
    }

    /// Side length of a window that fits the board and both margins.
    #[must_use]
    pub fn window_length(&self) -> f32 {
        2.0 * self.offset + self.board_length()
    }

    /// Top-left pixel of the provided cell.
    #[must_use]
    pub fn cell_origin(&self, cell: Cell) -> Vec2 {
        Vec2::new(
            self.offset + cell.x() as f32 * self.cell_size,
            self.offset + cell.y() as f32 * self.cell_size,
        )
    }

    /// Top-left pixel and side length of the outline drawn around the board.
    #[must_use]
    pub fn frame(&self) -> (Vec2, f32) {
        let origin = Vec2::splat(self.offset - Self::FRAME_GAP);
        (origin, self.board_length() + 2.0 * Self::FRAME_GAP)
    }

    /// Anchor of the title text above the board.
    #[must_use]
    pub fn title_anchor(&self) -> Vec2 {
        Vec2::new(self.offset - Self::FRAME_GAP, 20.0)
    }

    /// Anchor of the score text below the board.
    #[must_use]
    pub fn score_anchor(&self) -> Vec2 {
        Vec2::new(
            self.offset - Self::FRAME_GAP,
            self.offset + self.board_length() + 10.0,
        )
    }
}

/// Snake segments to draw, head first.
#[derive(Clone, Debug, PartialEq)]
pub struct SnakePresentation {
    /// Cells covered by the snake.
    pub segments: Vec<Cell>,
    /// Fill color of each segment.
    pub color: Color,
    /// Corner rounding in the range 0.0..=1.0 relative to half a cell.
    pub roundness: f32,
}

impl SnakePresentation {
    /// Creates a new snake descriptor.
    #[must_use]
    pub fn new(segments: Vec<Cell>, color: Color, roundness: f32) -> Self {
        Self {
            segments,
            color,
            roundness: roundness.clamp(0.0, 1.0),
        }
    }
}

/// Food location and its fallback look when no sprite is loaded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoodPresentation {
    /// Cell holding the food.
    pub cell: Cell,
    /// Color used when the backend draws the food as a primitive.
    pub color: Color,
}

/// Title and score text.
#[derive(Clone, Debug, PartialEq)]
pub struct HudPresentation {
    /// Title drawn above the board.
    pub title: String,
    /// Score drawn below the board.
    pub score: u32,
    /// Font size in pixels.
    pub font_size: f32,
}

/// Declarative description of a single frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Board layout and outline.
    pub board: BoardPresentation,
    /// Snake to draw.
    pub snake: SnakePresentation,
    /// Food to draw.
    pub food: FoodPresentation,
    /// Title and score text.
    pub hud: HudPresentation,
    /// Whether the game is currently advancing.
    pub play_state: PlayState,
    sounds: Vec<SoundEffect>,
}

impl Scene {
    /// Creates a new scene descriptor with no queued sounds.
    #[must_use]
    pub fn new(
        board: BoardPresentation,
        snake: SnakePresentation,
        food: FoodPresentation,
        hud: HudPresentation,
        play_state: PlayState,
    ) -> Self {
        Self {
            board,
            snake,
            food,
            hud,
            play_state,
            sounds: Vec::new(),
        }
    }

    /// Queues a sound to be played once when the frame is presented.
    pub fn queue_sound(&mut self, sound: SoundEffect) {
        self.sounds.push(sound);
    }

    /// Removes and returns every queued sound in queue order.
    pub fn take_sounds(&mut self) -> Vec<SoundEffect> {
        std::mem::take(&mut self.sounds)
    }
}

/// Aggregated data required to present a scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Retro Snake scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure is invoked once per frame with the
    /// backend clock and the keys pressed since the previous frame, and may
    /// mutate the scene before it is drawn. Sounds queued on the scene are
    /// played after drawing.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The board must contain at least one cell.
    EmptyBoard,
    /// Cell size must be a positive finite number of pixels.
    InvalidCellSize {
        /// Provided cell size that failed validation.
        cell_size: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBoard => write!(f, "board must contain at least one cell"),
            Self::InvalidCellSize { cell_size } => {
                write!(f, "cell_size must be positive (received {cell_size})")
            }
        }
    }
}

impl Error for RenderingError {}
