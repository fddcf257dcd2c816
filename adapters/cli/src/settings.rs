use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use retro_snake_core::{Cell, Direction, Grid};
use retro_snake_system_ticker::Config as TickerConfig;
use retro_snake_world::{Config as WorldConfig, CLASSIC_BODY, CLASSIC_DIRECTION};
use serde::Deserialize;
use thiserror::Error;

/// Side length of a board cell in pixels.
pub(crate) const DEFAULT_CELL_SIZE: f32 = 30.0;
/// Margin between the window edge and the board in pixels.
pub(crate) const DEFAULT_OFFSET: f32 = 75.0;

/// Reasons a settings file cannot be used.
#[derive(Debug, Error)]
pub(crate) enum SettingsError {
    /// The file could not be read.
    #[error("failed to read settings file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file is not valid settings TOML.
    #[error("failed to parse settings file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// Updates would fire on every frame.
    #[error("tick interval must be at least one millisecond")]
    ZeroTickInterval,
}

/// Optional overrides for every tunable of the game.
///
/// Absent values fall back to the classic game.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Settings {
    #[serde(default)]
    pub(crate) board: BoardSettings,
    #[serde(default)]
    pub(crate) timing: TimingSettings,
    #[serde(default)]
    pub(crate) snake: SnakeSettings,
    pub(crate) seed: Option<u64>,
    pub(crate) assets: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct BoardSettings {
    pub(crate) cell_count: Option<u32>,
    pub(crate) cell_size: Option<f32>,
    pub(crate) offset: Option<f32>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TimingSettings {
    pub(crate) tick_interval_ms: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SnakeSettings {
    pub(crate) body: Option<Vec<Cell>>,
    pub(crate) direction: Option<Direction>,
}

impl Settings {
    /// Reads settings from the TOML file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Field-wise merge where values present in `overrides` win.
    #[must_use]
    pub(crate) fn overridden_by(self, overrides: Settings) -> Settings {
        Settings {
            board: BoardSettings {
                cell_count: overrides.board.cell_count.or(self.board.cell_count),
                cell_size: overrides.board.cell_size.or(self.board.cell_size),
                offset: overrides.board.offset.or(self.board.offset),
            },
            timing: TimingSettings {
                tick_interval_ms: overrides
                    .timing
                    .tick_interval_ms
                    .or(self.timing.tick_interval_ms),
            },
            snake: SnakeSettings {
                body: overrides.snake.body.or(self.snake.body),
                direction: overrides.snake.direction.or(self.snake.direction),
            },
            seed: overrides.seed.or(self.seed),
            assets: overrides.assets.or(self.assets),
        }
    }

    /// Cells along each board axis.
    #[must_use]
    pub(crate) fn cell_count(&self) -> u32 {
        self.board
            .cell_count
            .unwrap_or(Grid::DEFAULT_CELL_COUNT)
    }

    /// Side length of a cell in pixels.
    #[must_use]
    pub(crate) fn cell_size(&self) -> f32 {
        self.board.cell_size.unwrap_or(DEFAULT_CELL_SIZE)
    }

    /// Margin around the board in pixels.
    #[must_use]
    pub(crate) fn offset(&self) -> f32 {
        self.board.offset.unwrap_or(DEFAULT_OFFSET)
    }

    /// World configuration seeded with `seed`.
    #[must_use]
    pub(crate) fn world_config(&self, seed: u64) -> WorldConfig {
        WorldConfig::new(
            Grid::new(self.cell_count()),
            self.snake
                .body
                .clone()
                .unwrap_or_else(|| CLASSIC_BODY.to_vec()),
            self.snake.direction.unwrap_or(CLASSIC_DIRECTION),
            seed,
        )
    }

    /// Ticker configuration, rejecting a zero interval.
    pub(crate) fn ticker_config(&self) -> Result<TickerConfig, SettingsError> {
        match self.timing.tick_interval_ms {
            None => Ok(TickerConfig::default()),
            Some(0) => Err(SettingsError::ZeroTickInterval),
            Some(millis) => Ok(TickerConfig::new(Duration::from_millis(millis))),
        }
    }
}
