#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state management for Waypoint Defence.
//!
//! [`apply`] is the only place where game state changes. It never mutates the
//! snapshot it receives: a command that changes something produces a fresh
//! [`GameState`] behind a new [`Snapshot`], while a command that is invalid
//! for the current state hands back the very same `Arc`. Presentation layers
//! can therefore detect "nothing happened" with [`Arc::ptr_eq`].

mod enemies;
mod projectiles;
mod towers;
mod waves;

use std::{sync::Arc, time::Duration};

use tracing::info;
use waypoint_defence_core::{
    Command, Enemy, EnemyId, Event, GameStatus, GridGeometry, Projectile, ProjectileId,
    TowerKind, WaveProgress, WaypointPath, STARTING_LIVES, STARTING_MONEY,
};

use towers::TowerRegistry;

/// Shared, immutable handle to a game state value.
pub type Snapshot = Arc<GameState>;

/// Represents the authoritative Waypoint Defence game state.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    geometry: GridGeometry,
    path: WaypointPath,
    clock: Duration,
    tick_index: u64,
    money: u32,
    lives: u32,
    score: u64,
    wave: WaveProgress,
    selection: Option<TowerKind>,
    status: GameStatus,
    towers: TowerRegistry,
    enemies: Vec<Enemy>,
    next_enemy_id: EnemyId,
    projectiles: Vec<Projectile>,
    next_projectile_id: ProjectileId,
}

impl GameState {
    /// Creates the initial game state on the default grid.
    #[must_use]
    pub fn new() -> Self {
        Self::with_geometry(GridGeometry::default())
    }

    /// Creates the initial game state on the provided grid.
    #[must_use]
    pub fn with_geometry(geometry: GridGeometry) -> Self {
        let path = WaypointPath::for_geometry(&geometry);
        let towers = TowerRegistry::new(&geometry, &path);
        Self {
            geometry,
            path,
            clock: Duration::ZERO,
            tick_index: 0,
            money: STARTING_MONEY,
            lives: STARTING_LIVES,
            score: 0,
            wave: WaveProgress::initial(),
            selection: None,
            status: GameStatus::Playing,
            towers,
            enemies: Vec::new(),
            next_enemy_id: EnemyId::new(0),
            projectiles: Vec::new(),
            next_projectile_id: ProjectileId::new(0),
        }
    }

    fn execute(&mut self, command: Command, out_events: &mut Vec<Event>) -> Outcome {
        if requires_playing(&command) && !self.status.is_playing() {
            return Outcome::Unchanged;
        }

        match command {
            Command::PlaceTower { kind, cell } => towers::place(self, kind, cell, out_events),
            Command::SelectTowerKind { kind } => self.select(kind, out_events),
            Command::SpawnEnemy { kind } => enemies::spawn(self, kind, out_events),
            Command::StartWave => waves::start(self, out_events),
            Command::Tick { dt } => self.advance_clock(dt, out_events),
            Command::AdvanceEnemies => enemies::advance(self, out_events),
            Command::AdvanceProjectiles => projectiles::advance(self, out_events),
            Command::FireEligibleTowers => towers::fire(self, out_events),
            Command::ResolveCollisions => projectiles::resolve_collisions(self, out_events),
            Command::ReapDefeatedEnemies => enemies::reap(self, out_events),
            Command::CheckWaveCompletion => waves::check_completion(self, out_events),
            Command::Pause => {
                self.transition_status(GameStatus::Playing, GameStatus::Paused, out_events)
            }
            Command::Resume => {
                self.transition_status(GameStatus::Paused, GameStatus::Playing, out_events)
            }
            Command::Reset => self.reset(out_events),
        }
    }

    fn select(&mut self, kind: Option<TowerKind>, out_events: &mut Vec<Event>) -> Outcome {
        if self.selection == kind {
            return Outcome::Unchanged;
        }

        self.selection = kind;
        out_events.push(Event::SelectionChanged { kind });
        Outcome::Changed
    }

    fn advance_clock(&mut self, dt: Duration, out_events: &mut Vec<Event>) -> Outcome {
        self.clock = self.clock.saturating_add(dt);
        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced {
            dt,
            now: self.clock,
        });
        Outcome::Changed
    }

    fn transition_status(
        &mut self,
        from: GameStatus,
        to: GameStatus,
        out_events: &mut Vec<Event>,
    ) -> Outcome {
        if self.status != from {
            return Outcome::Unchanged;
        }

        self.set_status(to, out_events);
        Outcome::Changed
    }

    fn reset(&mut self, out_events: &mut Vec<Event>) -> Outcome {
        *self = Self::with_geometry(self.geometry);
        info!("game reset");
        out_events.push(Event::GameReset);
        Outcome::Changed
    }

    pub(crate) fn set_status(&mut self, status: GameStatus, out_events: &mut Vec<Event>) {
        info!(from = ?self.status, to = ?status, "status changed");
        self.status = status;
        out_events.push(Event::StatusChanged { status });
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a command was able to change the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    Changed,
    Unchanged,
}

/// Applies the provided command, producing the next snapshot.
///
/// Commands that are invalid for the current state (an occupied cell, an
/// unaffordable tower, any gameplay command while paused or after the game
/// ended) return `state` itself. Otherwise a new snapshot is returned and the
/// input stays untouched.
#[must_use]
pub fn apply(state: &Snapshot, command: Command, out_events: &mut Vec<Event>) -> Snapshot {
    let mut next = GameState::clone(state);
    match next.execute(command, out_events) {
        Outcome::Changed => Arc::new(next),
        Outcome::Unchanged => Arc::clone(state),
    }
}

fn requires_playing(command: &Command) -> bool {
    matches!(
        command,
        Command::SpawnEnemy { .. }
            | Command::StartWave
            | Command::Tick { .. }
            | Command::AdvanceEnemies
            | Command::AdvanceProjectiles
            | Command::FireEligibleTowers
            | Command::ResolveCollisions
            | Command::ReapDefeatedEnemies
            | Command::CheckWaveCompletion
    )
}

/// Query functions that provide read-only access to the game state.
pub mod query {
    use std::time::Duration;

    use super::GameState;
    use waypoint_defence_core::{
        CellCoord, Enemy, GameStatus, GridGeometry, Projectile, Tower, TowerKind, WaveProgress,
        WaypointPath,
    };

    /// Grid dimensions and cell size used by the game.
    #[must_use]
    pub fn geometry(state: &GameState) -> GridGeometry {
        state.geometry
    }

    /// Waypoint path enemies follow, resolved against the game's grid.
    #[must_use]
    pub fn path(state: &GameState) -> &WaypointPath {
        &state.path
    }

    /// Simulated time elapsed since the game started.
    #[must_use]
    pub fn clock(state: &GameState) -> Duration {
        state.clock
    }

    /// Number of ticks processed since the game started.
    #[must_use]
    pub fn tick_index(state: &GameState) -> u64 {
        state.tick_index
    }

    /// Money available for purchases.
    #[must_use]
    pub fn money(state: &GameState) -> u32 {
        state.money
    }

    /// Lives left before defeat.
    #[must_use]
    pub fn lives(state: &GameState) -> u32 {
        state.lives
    }

    /// Score accumulated so far.
    #[must_use]
    pub fn score(state: &GameState) -> u64 {
        state.score
    }

    /// Overall status of the game.
    #[must_use]
    pub fn status(state: &GameState) -> GameStatus {
        state.status
    }

    /// Bookkeeping of the current wave.
    #[must_use]
    pub fn wave_progress(state: &GameState) -> WaveProgress {
        state.wave
    }

    /// Tower kind currently selected in the user interface.
    #[must_use]
    pub fn selected_tower_kind(state: &GameState) -> Option<TowerKind> {
        state.selection
    }

    /// Towers on the grid, ordered by identifier.
    #[must_use]
    pub fn towers(state: &GameState) -> &[Tower] {
        state.towers.as_slice()
    }

    /// Tower occupying the provided cell, if any.
    #[must_use]
    pub fn tower_at(state: &GameState, cell: CellCoord) -> Option<&Tower> {
        state.towers.at(cell)
    }

    /// Reports whether a tower could be placed on the cell, ignoring money.
    #[must_use]
    pub fn is_buildable(state: &GameState, cell: CellCoord) -> bool {
        state.towers.is_open(cell)
    }

    /// Enemies alive on the path, ordered by identifier.
    #[must_use]
    pub fn enemies(state: &GameState) -> &[Enemy] {
        &state.enemies
    }

    /// Projectiles in flight, ordered by identifier.
    #[must_use]
    pub fn projectiles(state: &GameState) -> &[Projectile] {
        &state.projectiles
    }
}

/// State scaffolding used by integration tests to reach specific situations.
#[cfg(any(test, feature = "test_scaffolding"))]
pub mod scaffolding {
    use super::GameState;

    /// Overrides the money available to the player.
    pub fn set_money(state: &mut GameState, money: u32) {
        state.money = money;
    }

    /// Overrides the lives left to the player.
    pub fn set_lives(state: &mut GameState, lives: u32) {
        state.lives = lives;
    }

    /// Pretends that the provided number of waves already started.
    pub fn set_wave_number(state: &mut GameState, wave: u32) {
        state.wave.number = wave;
    }
}
