#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-step tick driver that turns elapsed wall time into tick command batches.

use std::time::Duration;

use waypoint_defence_core::{Command, GameStatus, TICKS_PER_SECOND};

/// Configuration parameters required to construct the tick driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    tick_interval: Duration,
}

impl Config {
    /// Creates a new configuration with the provided fixed step.
    #[must_use]
    pub const fn new(tick_interval: Duration) -> Self {
        Self { tick_interval }
    }

    /// Creates a configuration that runs the provided number of ticks per second.
    ///
    /// A rate of zero yields a driver that never ticks.
    #[must_use]
    pub fn from_rate(ticks_per_second: u32) -> Self {
        let tick_interval = if ticks_per_second == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(1) / ticks_per_second
        };
        Self::new(tick_interval)
    }

    /// Fixed simulated duration of a single tick.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_rate(TICKS_PER_SECOND)
    }
}

/// Fixed-step accumulator producing ticks while the game is playing.
#[derive(Debug)]
pub struct TickDriver {
    tick_interval: Duration,
    accumulator: Duration,
}

impl TickDriver {
    /// Creates a new tick driver using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            tick_interval: config.tick_interval,
            accumulator: Duration::ZERO,
        }
    }

    /// Fixed simulated duration of a single tick.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Accumulates elapsed wall time and reports how many ticks fell due.
    ///
    /// Leftover time carries over to the next call. Outside of
    /// [`GameStatus::Playing`] the accumulator is cleared instead, so resuming
    /// restarts the timer from zero.
    pub fn due_ticks(&mut self, status: GameStatus, elapsed: Duration) -> u32 {
        if !status.is_playing() {
            self.accumulator = Duration::ZERO;
            return 0;
        }

        if self.tick_interval.is_zero() {
            return 0;
        }

        self.accumulator = self.accumulator.saturating_add(elapsed);
        let interval = self.tick_interval.as_nanos();
        let accumulated = self.accumulator.as_nanos();
        let due = u32::try_from(accumulated / interval).unwrap_or(u32::MAX);
        self.accumulator = self.accumulator.saturating_sub(self.tick_interval * due);
        due
    }

    /// Appends the ordered command sequence of a single tick.
    pub fn emit_tick(&self, out: &mut Vec<Command>) {
        out.reserve(7);
        out.push(Command::Tick {
            dt: self.tick_interval,
        });
        out.push(Command::AdvanceEnemies);
        out.push(Command::AdvanceProjectiles);
        out.push(Command::FireEligibleTowers);
        out.push(Command::ResolveCollisions);
        out.push(Command::ReapDefeatedEnemies);
        out.push(Command::CheckWaveCompletion);
    }

    /// Converts elapsed wall time into the commands of every tick that fell due.
    pub fn handle(&mut self, status: GameStatus, elapsed: Duration, out: &mut Vec<Command>) {
        for _ in 0..self.due_ticks(status, elapsed) {
            self.emit_tick(out);
        }
    }
}
