//! Wave bookkeeping: starting waves and settling cleared ones.

use tracing::info;
use waypoint_defence_core::{
    enemies_in_wave, wave_completion_bonus, Event, GameStatus, WavePhase, FINAL_WAVE, WAVE_DELAY,
};

use crate::{GameState, Outcome};

/// Begins the next wave if the director is idle and waves remain.
pub(crate) fn start(state: &mut GameState, out_events: &mut Vec<Event>) -> Outcome {
    let idle = matches!(state.wave.phase, WavePhase::Idle { .. });
    if !idle || state.wave.in_progress || state.wave.number >= FINAL_WAVE {
        return Outcome::Unchanged;
    }

    let number = state.wave.number + 1;
    let expected = enemies_in_wave(number);
    state.wave.number = number;
    state.wave.in_progress = true;
    state.wave.expected = expected;
    state.wave.spawned = 0;
    state.wave.phase = WavePhase::Spawning {
        next_spawn_at: state.clock,
    };

    info!(wave = number, enemies = expected, "wave started");
    out_events.push(Event::WaveStarted {
        wave: number,
        enemies: expected,
    });
    Outcome::Changed
}

/// Ends the active wave once every enemy spawned and the field is clear.
pub(crate) fn check_completion(state: &mut GameState, out_events: &mut Vec<Event>) -> Outcome {
    let wave = state.wave;
    if !wave.in_progress || wave.spawned < wave.expected || !state.enemies.is_empty() {
        return Outcome::Unchanged;
    }

    let bonus = wave_completion_bonus(wave.number);
    state.money = state.money.saturating_add(bonus);
    state.wave.in_progress = false;

    info!(wave = wave.number, bonus, "wave completed");
    out_events.push(Event::WaveCompleted {
        wave: wave.number,
        bonus,
    });

    if wave.number >= FINAL_WAVE {
        state.wave.phase = WavePhase::Complete;
        state.set_status(GameStatus::Victory, out_events);
    } else {
        state.wave.phase = WavePhase::Idle {
            next_wave_at: state.clock.saturating_add(WAVE_DELAY),
        };
    }

    Outcome::Changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use waypoint_defence_core::{EnemyKind, STARTING_MONEY};

    use crate::enemies;

    #[test]
    fn start_schedules_first_spawn_immediately() {
        let mut state = GameState::new();
        state.clock = Duration::from_millis(1_250);
        let mut events = Vec::new();

        assert_eq!(start(&mut state, &mut events), Outcome::Changed);
        assert_eq!(state.wave.number, 1);
        assert_eq!(state.wave.expected, 5);
        assert_eq!(
            state.wave.phase,
            WavePhase::Spawning {
                next_spawn_at: Duration::from_millis(1_250)
            }
        );
    }

    #[test]
    fn start_is_ignored_while_a_wave_runs() {
        let mut state = GameState::new();
        let mut events = Vec::new();
        let _ = start(&mut state, &mut events);

        assert_eq!(start(&mut state, &mut events), Outcome::Unchanged);
        assert_eq!(state.wave.number, 1);
    }

    #[test]
    fn unfinished_spawning_blocks_completion() {
        let mut state = GameState::new();
        let mut events = Vec::new();
        let _ = start(&mut state, &mut events);
        let _ = enemies::spawn(&mut state, EnemyKind::Grunt, &mut events);
        state.enemies.clear();

        assert_eq!(check_completion(&mut state, &mut events), Outcome::Unchanged);
    }

    #[test]
    fn cleared_wave_pays_bonus_and_schedules_next() {
        let mut state = GameState::new();
        let mut events = Vec::new();
        let _ = start(&mut state, &mut events);
        for _ in 0..5 {
            let _ = enemies::spawn(&mut state, EnemyKind::Scout, &mut events);
        }
        assert_eq!(state.wave.phase, WavePhase::WaitingForClear);
        state.enemies.clear();
        state.clock = Duration::from_secs(20);

        assert_eq!(check_completion(&mut state, &mut events), Outcome::Changed);
        assert_eq!(state.money, STARTING_MONEY + 50);
        assert_eq!(
            state.wave.phase,
            WavePhase::Idle {
                next_wave_at: Duration::from_secs(23)
            }
        );
        assert_eq!(state.status, GameStatus::Playing);
    }

    #[test]
    fn clearing_final_wave_wins() {
        let mut state = GameState::new();
        let mut events = Vec::new();
        state.wave.number = FINAL_WAVE - 1;
        let _ = start(&mut state, &mut events);
        state.wave.spawned = state.wave.expected;
        state.wave.phase = WavePhase::WaitingForClear;

        let _ = check_completion(&mut state, &mut events);

        assert_eq!(state.status, GameStatus::Victory);
        assert_eq!(state.wave.phase, WavePhase::Complete);
        assert_eq!(state.money, STARTING_MONEY + 500);
        assert_eq!(start(&mut state, &mut events), Outcome::Unchanged);
    }
}
