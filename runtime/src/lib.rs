#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Simulation runtime that wires the world, the tick driver and the wave director.
//!
//! The runtime owns the current [`Snapshot`] and a FIFO queue of player
//! intents. Ticks always run to completion before queued intents are applied,
//! so an intent never interleaves with the command sequence of a tick.

mod config;

pub use config::{ConfigError, EngineConfig, DEFAULT_WAVE_SEED, MAX_TICK_RATE_HZ};

use std::{collections::VecDeque, mem, sync::Arc, time::Duration};

use tracing::{debug, trace};
use waypoint_defence_core::{Command, Event};
use waypoint_defence_system_tick_driver::{Config as TickConfig, TickDriver};
use waypoint_defence_system_wave_director::{Config as DirectorConfig, WaveDirector};
use waypoint_defence_world::{self as world, query, GameState, Snapshot};

/// Single-threaded simulation loop around the authoritative game state.
#[derive(Debug)]
pub struct Simulation {
    state: Snapshot,
    tick_driver: TickDriver,
    wave_director: WaveDirector,
    intents: VecDeque<Command>,
    scratch: Vec<Command>,
    events: Vec<Event>,
}

impl Simulation {
    /// Creates a simulation from a validated configuration.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        let geometry = config.geometry()?;
        let tick_interval = config.tick_interval()?;
        Ok(Self::from_parts(
            GameState::with_geometry(geometry),
            TickConfig::new(tick_interval),
            DirectorConfig::new(config.wave_seed),
        ))
    }

    /// Creates a simulation that continues from the provided state.
    #[must_use]
    pub fn from_parts(state: GameState, tick: TickConfig, director: DirectorConfig) -> Self {
        Self {
            state: Arc::new(state),
            tick_driver: TickDriver::new(tick),
            wave_director: WaveDirector::new(director),
            intents: VecDeque::new(),
            scratch: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Current game state; cloning the handle is cheap.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.state)
    }

    /// Fixed simulated duration of a single tick.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_driver.tick_interval()
    }

    /// Number of intents waiting for the next flush.
    #[must_use]
    pub fn pending_intents(&self) -> usize {
        self.intents.len()
    }

    /// Queues a player intent for the next flush.
    ///
    /// A reset discards every intent queued ahead of it.
    pub fn submit(&mut self, command: Command) {
        if matches!(command, Command::Reset) {
            let dropped = self.intents.len();
            self.intents.clear();
            if dropped > 0 {
                debug!(dropped, "reset discarded queued intents");
            }
        }
        self.intents.push_back(command);
    }

    /// Applies every queued intent in submission order.
    pub fn flush(&mut self) {
        if self.intents.is_empty() {
            return;
        }

        debug!(intents = self.intents.len(), "flushing intents");
        while let Some(command) = self.intents.pop_front() {
            self.state = world::apply(&self.state, command, &mut self.events);
        }
    }

    /// Runs every tick that fell due within `elapsed`, then flushes intents.
    ///
    /// Returns the number of ticks that ran.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let due = self
            .tick_driver
            .due_ticks(query::status(&self.state), elapsed);
        let mut ran = 0;
        for _ in 0..due {
            if !self.run_tick() {
                break;
            }
            ran += 1;
        }
        if ran > 0 {
            trace!(ticks = ran, now = ?query::clock(&self.state), "advanced simulation");
        }
        self.flush();
        ran
    }

    /// Runs exactly one tick if the game is playing, then flushes intents.
    pub fn step(&mut self) -> bool {
        let ran = self.run_tick();
        self.flush();
        ran
    }

    /// Events produced since the previous drain, in order.
    pub fn drain_events(&mut self) -> Vec<Event> {
        mem::take(&mut self.events)
    }

    fn run_tick(&mut self) -> bool {
        if !query::status(&self.state).is_playing() {
            return false;
        }

        self.scratch.clear();
        self.tick_driver.emit_tick(&mut self.scratch);
        self.apply_scratch();

        let wave = query::wave_progress(&self.state);
        self.wave_director.handle(
            query::status(&self.state),
            query::clock(&self.state),
            &wave,
            &mut self.scratch,
        );
        self.apply_scratch();
        true
    }

    fn apply_scratch(&mut self) {
        for command in self.scratch.drain(..) {
            self.state = world::apply(&self.state, command, &mut self.events);
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::from_parts(
            GameState::new(),
            TickConfig::default(),
            DirectorConfig::new(DEFAULT_WAVE_SEED),
        )
    }
}
