#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that schedules waves and enemy spawns.
//!
//! The director owns no phase of its own. It reads the [`WaveProgress`]
//! stored in the game state after every tick and answers with `StartWave`
//! once the idle phase elapsed, or with `SpawnEnemy` once the next spawn of
//! the active wave is due. The world advances the phase when it applies those
//! commands, so a reset restores the director together with everything else.

use std::time::Duration;

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use waypoint_defence_core::{Command, EnemyKind, GameStatus, WavePhase, WaveProgress, FINAL_WAVE};

const SEED_MIX: u64 = 0x9e37_79b9_7f4a_7c15;

/// Configuration parameters required to construct the wave director.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    seed: u64,
}

impl Config {
    /// Creates a new configuration that composes waves from the provided seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed used to derive enemy kinds.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

/// Wave director that emits wave and spawn commands when they fall due.
#[derive(Debug)]
pub struct WaveDirector {
    seed: u64,
    unlocked: Vec<EnemyKind>,
}

impl WaveDirector {
    /// Creates a new director using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            seed: config.seed,
            unlocked: Vec::with_capacity(EnemyKind::ALL.len()),
        }
    }

    /// Emits the command the current wave phase calls for, if any is due.
    pub fn handle(
        &mut self,
        status: GameStatus,
        now: Duration,
        wave: &WaveProgress,
        out: &mut Vec<Command>,
    ) {
        if !status.is_playing() {
            return;
        }

        match wave.phase {
            WavePhase::Idle { next_wave_at } => {
                if now >= next_wave_at && !wave.in_progress && wave.number < FINAL_WAVE {
                    debug!(wave = wave.number + 1, ?now, "wave due");
                    out.push(Command::StartWave);
                }
            }
            WavePhase::Spawning { next_spawn_at } => {
                if now >= next_spawn_at && wave.spawned < wave.expected {
                    let kind = self.enemy_kind(wave.number, wave.spawned);
                    debug!(wave = wave.number, index = wave.spawned, %kind, "spawn due");
                    out.push(Command::SpawnEnemy { kind });
                }
            }
            WavePhase::WaitingForClear | WavePhase::Complete => {}
        }
    }

    /// Enemy kind of the spawn with the provided index within a wave.
    ///
    /// The choice depends only on the seed, the wave number and the index,
    /// so replaying a game with the same seed yields the same composition.
    #[must_use]
    pub fn enemy_kind(&mut self, wave: u32, index: u32) -> EnemyKind {
        self.unlocked.clear();
        self.unlocked.extend(EnemyKind::unlocked_at(wave));

        let mut rng = ChaCha8Rng::seed_from_u64(spawn_seed(self.seed, wave, index));
        self.unlocked
            .choose(&mut rng)
            .copied()
            .unwrap_or(EnemyKind::Grunt)
    }
}

fn spawn_seed(seed: u64, wave: u32, index: u32) -> u64 {
    seed.wrapping_mul(SEED_MIX) ^ (u64::from(wave) << 32) ^ u64::from(index)
}
