use std::time::Duration;

use retro_snake_core::Command;
use retro_snake_system_ticker::{Config, Ticker};
use retro_snake_world::{self as world, query, Config as WorldConfig, World};

#[test]
fn sixty_hertz_frames_yield_five_ticks_per_second() {
    let mut ticker = Ticker::new(Config::default());
    let mut commands = Vec::new();

    for frame in 1..=60u64 {
        let now = Duration::from_micros(frame * 16_667);
        ticker.handle(now, &mut commands);
    }

    assert_eq!(commands.len(), 5, "one tick every twelfth frame");
    assert!(commands.iter().all(|command| *command == Command::Tick));

    ticker.handle(Duration::from_millis(1_100), &mut commands);
    assert_eq!(commands.len(), 5, "interval restarts from the last firing");
}

#[test]
fn ticks_drive_world_updates() {
    let mut world = World::new(WorldConfig::default()).expect("valid config");
    let mut ticker = Ticker::new(Config::new(Duration::from_millis(250)));
    let mut commands = Vec::new();
    let mut events = Vec::new();

    for frame in 0..=30u64 {
        ticker.handle(Duration::from_millis(frame * 50), &mut commands);
        for command in commands.drain(..) {
            world::apply(&mut world, command, &mut events);
        }
    }

    assert_eq!(query::tick_index(&world), 6);
}
