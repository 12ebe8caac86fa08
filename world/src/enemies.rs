//! Enemy lifecycle: spawning, walking the path, escaping and dying.

use tracing::info;
use waypoint_defence_core::{
    Enemy, EnemyId, EnemyKind, Event, GameStatus, WavePhase, SCORE_PER_BOUNTY, SPAWN_INTERVAL,
};

use crate::{GameState, Outcome};

/// Appends an enemy of the provided kind at the path entry.
pub(crate) fn spawn(
    state: &mut GameState,
    kind: EnemyKind,
    out_events: &mut Vec<Event>,
) -> Outcome {
    let Some(start) = state.path.start() else {
        return Outcome::Unchanged;
    };

    let stats = kind.stats();
    let health = kind.health_at_wave(state.wave.number);
    let id = state.next_enemy_id;
    state.next_enemy_id = id.successor();
    state.enemies.push(Enemy {
        id,
        kind,
        position: start,
        health,
        max_health: health,
        speed: state.geometry.cells_to_pixels(stats.speed_in_cells),
        bounty: stats.bounty,
        path_index: 0,
    });

    state.wave.spawned = state.wave.spawned.saturating_add(1);
    if let WavePhase::Spawning { .. } = state.wave.phase {
        state.wave.phase = if state.wave.spawned >= state.wave.expected {
            WavePhase::WaitingForClear
        } else {
            WavePhase::Spawning {
                next_spawn_at: state.clock.saturating_add(SPAWN_INTERVAL),
            }
        };
    }

    out_events.push(Event::EnemySpawned {
        enemy: id,
        kind,
        health,
    });
    Outcome::Changed
}

/// Moves every enemy one step toward its next waypoint and settles escapes.
pub(crate) fn advance(state: &mut GameState, out_events: &mut Vec<Event>) -> Outcome {
    if state.enemies.is_empty() {
        return Outcome::Unchanged;
    }

    let last_index = state.path.last_index();
    let mut escaped: Vec<EnemyId> = Vec::new();

    for enemy in &mut state.enemies {
        if let Some(waypoint) = state.path.waypoint(enemy.path_index + 1) {
            let offset = waypoint - enemy.position;
            let distance = offset.length();
            if distance <= enemy.speed {
                enemy.position = waypoint;
                enemy.path_index += 1;
            } else {
                enemy.position += offset / distance * enemy.speed;
            }
        }

        if enemy.path_index >= last_index {
            escaped.push(enemy.id);
        }
    }

    if escaped.is_empty() {
        return Outcome::Changed;
    }

    state.enemies.retain(|enemy| !escaped.contains(&enemy.id));
    for enemy in &escaped {
        out_events.push(Event::EnemyEscaped { enemy: *enemy });
    }

    let count = u32::try_from(escaped.len()).unwrap_or(u32::MAX);
    state.lives = state.lives.saturating_sub(count);
    out_events.push(Event::LivesLost {
        count,
        remaining: state.lives,
    });

    if state.lives == 0 {
        info!(wave = state.wave.number, "out of lives");
        state.wave.phase = WavePhase::Complete;
        state.set_status(GameStatus::Defeat, out_events);
    }

    Outcome::Changed
}

/// Removes enemies without health and pays out their bounty.
pub(crate) fn reap(state: &mut GameState, out_events: &mut Vec<Event>) -> Outcome {
    if !state.enemies.iter().any(|enemy| enemy.health.is_depleted()) {
        return Outcome::Unchanged;
    }

    for enemy in state.enemies.iter().filter(|enemy| enemy.health.is_depleted()) {
        state.money = state.money.saturating_add(enemy.bounty);
        state.score = state
            .score
            .saturating_add(u64::from(enemy.bounty) * SCORE_PER_BOUNTY);
        out_events.push(Event::EnemyDefeated {
            enemy: enemy.id,
            bounty: enemy.bounty,
        });
    }

    state.enemies.retain(|enemy| !enemy.health.is_depleted());
    Outcome::Changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use waypoint_defence_core::{Command, Health, STARTING_LIVES};

    use crate::{apply, query};

    #[test]
    fn spawned_enemy_starts_at_path_entry() {
        let mut events = Vec::new();
        let state = Arc::new(GameState::new());
        let next = apply(
            &state,
            Command::SpawnEnemy {
                kind: EnemyKind::Scout,
            },
            &mut events,
        );

        let enemy = &query::enemies(&next)[0];
        assert_eq!(Some(enemy.position), query::path(&next).start());
        assert_eq!(enemy.path_index, 0);
        assert_eq!(enemy.health, Health::new(60));
        assert_eq!(query::wave_progress(&next).spawned, 1);
    }

    #[test]
    fn enemy_snaps_onto_waypoint_within_one_step() {
        let mut state = GameState::new();
        let mut events = Vec::new();
        let _ = spawn(&mut state, EnemyKind::Grunt, &mut events);
        let waypoint = state.path.waypoint(1).expect("second waypoint");
        state.enemies[0].position = waypoint - glam::Vec2::new(1.0, 0.0);

        let _ = advance(&mut state, &mut events);

        assert_eq!(state.enemies[0].position, waypoint);
        assert_eq!(state.enemies[0].path_index, 1);
    }

    #[test]
    fn escapes_cost_one_life_each() {
        let mut state = GameState::new();
        let mut events = Vec::new();
        for _ in 0..3 {
            let _ = spawn(&mut state, EnemyKind::Runner, &mut events);
        }
        let last = state.path.last_index();
        for enemy in state.enemies.iter_mut().take(2) {
            enemy.path_index = last - 1;
            enemy.position = state.path.waypoint(last).expect("final waypoint");
        }
        events.clear();

        let _ = advance(&mut state, &mut events);

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.lives, STARTING_LIVES - 2);
        assert!(events.contains(&Event::LivesLost {
            count: 2,
            remaining: STARTING_LIVES - 2,
        }));
    }

    #[test]
    fn reaping_pays_bounty_and_score() {
        let mut state = GameState::new();
        let mut events = Vec::new();
        let _ = spawn(&mut state, EnemyKind::Grunt, &mut events);
        state.enemies[0].health = Health::new(0);

        let _ = reap(&mut state, &mut events);

        assert!(state.enemies.is_empty());
        assert_eq!(state.money, 550);
        assert_eq!(state.score, 500);
    }
}
