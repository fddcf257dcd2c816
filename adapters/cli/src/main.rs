#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Retro Snake experience.

mod settings;
mod simulation;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use retro_snake_core::GAME_TITLE;
use retro_snake_rendering::{BoardPresentation, Presentation, RenderingBackend};
use retro_snake_rendering_macroquad::MacroquadBackend;
use retro_snake_system_ticker::Ticker;
use retro_snake_world::World;
use simplelog::{ColorChoice, TermLogger, TerminalMode};

use self::{
    settings::{BoardSettings, Settings, TimingSettings},
    simulation::{Simulation, BACKGROUND, INK},
};

/// Classic grid snake: eat food, grow, avoid the walls and your own tail.
#[derive(Debug, Parser)]
#[command(name = "retro-snake", version)]
struct Cli {
    /// TOML settings file; flags below take precedence over it.
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Cells along each side of the board.
    #[arg(long, value_name = "COUNT")]
    cells: Option<u32>,

    /// Milliseconds between snake moves.
    #[arg(long, value_name = "MILLIS")]
    tick_ms: Option<u64>,

    /// Seed for food placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Asset manifest naming the food image and sounds.
    #[arg(long, value_name = "PATH")]
    assets: Option<PathBuf>,

    /// Render as fast as possible instead of waiting for the display.
    #[arg(long)]
    no_vsync: bool,

    /// Log the frame rate once per second.
    #[arg(long)]
    show_fps: bool,

    /// Most verbose log level written to stderr.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

impl Cli {
    fn overrides(&self) -> Settings {
        Settings {
            board: BoardSettings {
                cell_count: self.cells,
                ..BoardSettings::default()
            },
            timing: TimingSettings {
                tick_interval_ms: self.tick_ms,
            },
            seed: self.seed,
            assets: self.assets.clone(),
            ..Settings::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Entry point for the Retro Snake command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();

    TermLogger::init(
        cli.log_level.into(),
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("failed to initialise logging")?;

    let file_settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let settings = file_settings.overridden_by(cli.overrides());

    let seed = settings.seed.unwrap_or_else(rand::random);
    info!("food placement seed {seed}");

    let world = World::new(settings.world_config(seed)).context("invalid starting layout")?;
    let ticker = Ticker::new(settings.ticker_config()?);
    let board = BoardPresentation::new(
        settings.cell_count(),
        settings.cell_size(),
        settings.offset(),
        INK,
    )
    .context("invalid board dimensions")?;

    let mut simulation = Simulation::new(world, ticker);
    let scene = simulation.initial_scene(board);
    let presentation = Presentation::new(GAME_TITLE, BACKGROUND, scene);

    MacroquadBackend::new()
        .with_vsync(!cli.no_vsync)
        .with_show_fps(cli.show_fps)
        .with_asset_manifest(settings.assets)
        .run(presentation, move |input, scene| simulation.step(input, scene))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "retro-snake",
            "--cells",
            "12",
            "--tick-ms",
            "150",
            "--seed",
            "4",
            "--log-level",
            "debug",
        ])
        .expect("valid flags");

        let overrides = cli.overrides();
        assert_eq!(overrides.board.cell_count, Some(12));
        assert_eq!(overrides.timing.tick_interval_ms, Some(150));
        assert_eq!(overrides.seed, Some(4));
        assert_eq!(LevelFilter::from(cli.log_level), LevelFilter::Debug);
        assert!(!cli.no_vsync);
    }
}
