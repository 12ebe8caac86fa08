use std::{sync::Arc, time::Duration};

use waypoint_defence_core::{Command, Event, GameStatus};
use waypoint_defence_system_tick_driver::{Config, TickDriver};
use waypoint_defence_world::{self as world, query, GameState, Snapshot};

fn run(state: &Snapshot, driver: &mut TickDriver, elapsed: Duration) -> (Snapshot, Vec<Event>) {
    let mut commands = Vec::new();
    driver.handle(query::status(state), elapsed, &mut commands);

    let mut events = Vec::new();
    let mut current = Arc::clone(state);
    for command in commands {
        current = world::apply(&current, command, &mut events);
    }
    (current, events)
}

#[test]
fn one_second_of_wall_time_advances_twenty_ticks() {
    let mut driver = TickDriver::new(Config::default());
    let state = Arc::new(GameState::new());

    let (state, events) = run(&state, &mut driver, Duration::from_secs(1));

    assert_eq!(query::tick_index(&state), 20);
    assert_eq!(query::clock(&state), Duration::from_secs(1));
    let ticks = events
        .iter()
        .filter(|event| matches!(event, Event::TimeAdvanced { .. }))
        .count();
    assert_eq!(ticks, 20);
}

#[test]
fn paused_game_does_not_tick_and_resume_restarts_the_timer() {
    let mut driver = TickDriver::new(Config::default());
    let mut events = Vec::new();
    let state = Arc::new(GameState::new());

    let (state, _) = run(&state, &mut driver, Duration::from_millis(30));
    let state = world::apply(&state, Command::Pause, &mut events);
    let (paused, produced) = run(&state, &mut driver, Duration::from_secs(3));
    assert!(produced.is_empty());
    assert!(Arc::ptr_eq(&paused, &state));

    let resumed = world::apply(&paused, Command::Resume, &mut events);
    assert_eq!(query::status(&resumed), GameStatus::Playing);
    let (after, _) = run(&resumed, &mut driver, Duration::from_millis(30));
    assert_eq!(query::tick_index(&after), 0, "leftover time was discarded");
}

#[test]
fn custom_rate_changes_tick_length() {
    let mut driver = TickDriver::new(Config::from_rate(10));
    let state = Arc::new(GameState::new());

    let (state, _) = run(&state, &mut driver, Duration::from_millis(350));

    assert_eq!(query::tick_index(&state), 3);
    assert_eq!(query::clock(&state), Duration::from_millis(300));
}
