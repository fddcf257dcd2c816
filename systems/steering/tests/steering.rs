use retro_snake_core::{Command, Direction, Event, PlayState};
use retro_snake_system_steering::Steering;
use retro_snake_world::{self as world, query, Config, World};

fn pump(world: &mut World, steering: &Steering, pressed: &[Direction]) -> Vec<Event> {
    let mut commands = Vec::new();
    steering.handle(pressed, query::heading(world), &mut commands);

    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn tick(world: &mut World) {
    let mut events = Vec::new();
    world::apply(world, Command::Tick, &mut events);
}

#[test]
fn emits_commands_in_press_order() {
    let steering = Steering::new();
    let mut commands = Vec::new();

    steering.handle(
        &[Direction::Up, Direction::Left, Direction::Down],
        Direction::Right,
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![
            Command::Steer {
                direction: Direction::Up
            },
            Command::Steer {
                direction: Direction::Down
            },
        ]
    );
}

#[test]
fn two_presses_within_one_tick_cannot_reverse_the_snake() {
    let mut world = World::new(Config::default()).expect("valid config");
    let steering = Steering::new();

    let _ = pump(&mut world, &steering, &[Direction::Up]);
    let _ = pump(&mut world, &steering, &[Direction::Left]);

    assert_eq!(query::direction(&world), Direction::Up);

    tick(&mut world);
    let head = query::snake_head(&world);
    let neck = query::snake_cells(&world).nth(1).expect("snake has a neck");
    assert_ne!(head, neck);
    assert_eq!(query::play_state(&world), PlayState::Running);
}

#[test]
fn reversal_press_does_not_resume_after_game_over() {
    let mut world = World::new(Config::default()).expect("valid config");
    let steering = Steering::new();

    while query::play_state(&world) == PlayState::Running {
        tick(&mut world);
    }

    let events = pump(&mut world, &steering, &[Direction::Left]);
    assert!(events.is_empty());
    assert_eq!(query::play_state(&world), PlayState::Stopped);

    let events = pump(&mut world, &steering, &[Direction::Down]);
    assert!(events.contains(&Event::PlayResumed));
    assert_eq!(query::direction(&world), Direction::Down);
}
