use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    sync::Arc,
};

use glam::Vec2;
use waypoint_defence_core::{
    CellCoord, Command, EnemyId, EnemyKind, Event, TowerId, TowerKind, TowerTarget,
};
use waypoint_defence_system_tower_targeting::TowerTargeting;
use waypoint_defence_world::{self as world, query, GameState};

const ADVANCES: usize = 150;

#[test]
fn deterministic_replay_targets_earliest_of_stacked_enemies() {
    let script = scripted_commands();
    let script_len = script.len();
    let first = replay(script.clone());
    let second = replay(script);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert_eq!(first.assignments.len(), script_len);

    let spawned: Vec<EnemyId> = first
        .events
        .iter()
        .filter_map(|event| match event {
            EventRecord::EnemySpawned { enemy } => Some(*enemy),
            _ => None,
        })
        .collect();
    assert_eq!(spawned, vec![EnemyId::new(0), EnemyId::new(1)]);

    let first_engagement = first
        .assignments
        .iter()
        .position(|snapshot| !snapshot.targets.is_empty())
        .expect("enemies walk into range");
    assert!(
        first_engagement > 3,
        "enemies spawn out of range of the tower"
    );

    for snapshot in &first.assignments[first_engagement..] {
        assert_eq!(snapshot.targets.len(), 1);
        assert_eq!(snapshot.targets[0].tower, TowerId::new(0));
        assert_eq!(
            snapshot.targets[0].enemy,
            EnemyId::new(0),
            "equidistant enemies resolve to the earliest spawn"
        );
    }
}

#[test]
fn paused_world_keeps_targets_stable() {
    let mut events = Vec::new();
    let mut state = Arc::new(GameState::new());
    for command in scripted_commands() {
        state = world::apply(&state, command, &mut events);
    }
    let paused = world::apply(&state, Command::Pause, &mut events);
    let still_paused = world::apply(&paused, Command::AdvanceEnemies, &mut events);

    let mut targeting = TowerTargeting::new();
    let mut before = Vec::new();
    let mut after = Vec::new();
    targeting.handle(
        query::clock(&paused),
        query::towers(&paused),
        query::enemies(&paused),
        &mut before,
    );
    targeting.handle(
        query::clock(&still_paused),
        query::towers(&still_paused),
        query::enemies(&still_paused),
        &mut after,
    );

    assert_eq!(before, after);
}

fn replay(commands: Vec<Command>) -> ReplayOutcome {
    let mut state = Arc::new(GameState::new());
    let mut targeting = TowerTargeting::new();
    let mut current_targets = Vec::new();
    let mut assignments = Vec::new();
    let mut events = Vec::new();

    for command in commands {
        let mut generated = Vec::new();
        state = world::apply(&state, command, &mut generated);
        events.extend(generated.into_iter().map(EventRecord::from));

        targeting.handle(
            query::clock(&state),
            query::towers(&state),
            query::enemies(&state),
            &mut current_targets,
        );

        assignments.push(TargetSnapshot::from(&current_targets));
    }

    ReplayOutcome {
        events,
        assignments,
    }
}

fn scripted_commands() -> Vec<Command> {
    let mut commands = vec![
        Command::PlaceTower {
            kind: TowerKind::Gatling,
            cell: CellCoord::new(4, 3),
        },
        Command::SpawnEnemy {
            kind: EnemyKind::Grunt,
        },
        Command::SpawnEnemy {
            kind: EnemyKind::Grunt,
        },
    ];
    commands.extend(std::iter::repeat(Command::AdvanceEnemies).take(ADVANCES));
    commands
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    events: Vec<EventRecord>,
    assignments: Vec<TargetSnapshot>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct TargetSnapshot {
    targets: Vec<TargetRecord>,
}

impl TargetSnapshot {
    fn from(targets: &[TowerTarget]) -> Self {
        Self {
            targets: targets.iter().map(TargetRecord::from).collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct TargetRecord {
    tower: TowerId,
    enemy: EnemyId,
    aim: HalfPixel,
}

impl From<&TowerTarget> for TargetRecord {
    fn from(target: &TowerTarget) -> Self {
        Self {
            tower: target.tower,
            enemy: target.enemy,
            aim: HalfPixel::from(target.aim),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct HalfPixel {
    x_twice: i32,
    y_twice: i32,
}

impl From<Vec2> for HalfPixel {
    fn from(point: Vec2) -> Self {
        Self {
            x_twice: (point.x * 2.0).round() as i32,
            y_twice: (point.y * 2.0).round() as i32,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum EventRecord {
    TowerPlaced { tower: TowerId, cell: CellCoord },
    EnemySpawned { enemy: EnemyId },
}

impl From<Event> for EventRecord {
    fn from(event: Event) -> Self {
        match event {
            Event::TowerPlaced { tower, cell, .. } => Self::TowerPlaced { tower, cell },
            Event::EnemySpawned { enemy, .. } => Self::EnemySpawned { enemy },
            other => panic!("unexpected event during targeting replay: {other:?}"),
        }
    }
}
