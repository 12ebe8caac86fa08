#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Waypoint Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative game state, and pure systems. Adapters submit [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values describing
//! what changed. Systems read immutable snapshots and respond exclusively with
//! new command batches.
//!
//! Everything in here is plain data: entity records, the fixed per-kind stat
//! tables, the grid geometry and the single waypoint path definition shared by
//! simulation and presentation.

mod geometry;

pub use geometry::{
    GeometryError, GridGeometry, WaypointPath, DEFAULT_CELL_SIZE, DEFAULT_COLUMNS, DEFAULT_ROWS,
    PATH_WAYPOINTS,
};

use std::{fmt, time::Duration};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Money available to the player when a game starts.
pub const STARTING_MONEY: u32 = 500;

/// Lives available to the player when a game starts.
pub const STARTING_LIVES: u32 = 20;

/// Last configured wave; clearing it wins the game.
pub const FINAL_WAVE: u32 = 10;

/// Upper bound on the number of enemies scheduled for a single wave.
pub const MAX_ENEMIES_PER_WAVE: u32 = 15;

/// Score awarded per point of bounty when an enemy is destroyed.
pub const SCORE_PER_BOUNTY: u64 = 10;

/// Money awarded per wave number when a wave is cleared.
pub const WAVE_BONUS_PER_WAVE: u32 = 50;

/// Simulated time between two spawns of the same wave.
pub const SPAWN_INTERVAL: Duration = Duration::from_secs(2);

/// Simulated time between clearing a wave and starting the next one.
pub const WAVE_DELAY: Duration = Duration::from_secs(3);

/// Simulated time between game start and the first wave.
pub const FIRST_WAVE_DELAY: Duration = Duration::from_secs(1);

/// Reference tick rate of the simulation.
pub const TICKS_PER_SECOND: u32 = 20;

/// Distance a projectile travels per tick, measured in cells.
pub const PROJECTILE_SPEED_IN_CELLS: f32 = 0.4;

/// Distance below which a projectile and an enemy collide, measured in cells.
pub const CONTACT_RADIUS_IN_CELLS: f32 = 0.4;

/// Distance in pixels at which a projectile counts as landed on its target point.
pub const LANDING_EPSILON: f32 = 0.5;

/// Number of enemies scheduled for the provided wave.
///
/// Grows by one every second wave starting from five and never exceeds
/// [`MAX_ENEMIES_PER_WAVE`].
#[must_use]
pub const fn enemies_in_wave(wave: u32) -> u32 {
    let count = 5 + wave / 2;
    if count > MAX_ENEMIES_PER_WAVE {
        MAX_ENEMIES_PER_WAVE
    } else {
        count
    }
}

/// Money awarded for clearing the provided wave.
#[must_use]
pub const fn wave_completion_bonus(wave: u32) -> u32 {
    WAVE_BONUS_PER_WAVE.saturating_mul(wave)
}

/// Overall status of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// The simulation advances on every tick.
    Playing,
    /// The simulation is frozen until resumed.
    Paused,
    /// Every wave was cleared.
    Victory,
    /// The player ran out of lives.
    Defeat,
}

impl GameStatus {
    /// Reports whether the game ended and only a reset has effect.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }

    /// Reports whether tick-driven commands are currently accepted.
    #[must_use]
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// Commands that express all permissible game state mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Requests placement of a tower at the provided grid cell.
    PlaceTower {
        /// Type of tower to construct.
        kind: TowerKind,
        /// Cell that will hold the tower.
        cell: CellCoord,
    },
    /// Replaces the tower kind currently selected in the user interface.
    SelectTowerKind {
        /// Newly selected kind, or `None` to clear the selection.
        kind: Option<TowerKind>,
    },
    /// Requests that a new enemy enter the path at its first waypoint.
    SpawnEnemy {
        /// Type of enemy to spawn.
        kind: EnemyKind,
    },
    /// Requests that the next wave begin.
    StartWave,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Moves every enemy one step along the waypoint path.
    AdvanceEnemies,
    /// Moves every projectile one step toward its target point.
    AdvanceProjectiles,
    /// Lets every tower whose cooldown elapsed fire at the closest enemy in range.
    FireEligibleTowers,
    /// Applies projectile damage to enemies within the contact radius.
    ResolveCollisions,
    /// Removes enemies without health and pays out their bounty.
    ReapDefeatedEnemies,
    /// Ends the active wave once it was fully spawned and cleared.
    CheckWaveCompletion,
    /// Freezes the simulation.
    Pause,
    /// Unfreezes a paused simulation.
    Resume,
    /// Restores the initial game state.
    Reset,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
        /// Simulation clock after the tick.
        now: Duration,
    },
    /// Confirms that a tower was placed into the world.
    TowerPlaced {
        /// Identifier assigned to the tower.
        tower: TowerId,
        /// Type of tower that was placed.
        kind: TowerKind,
        /// Cell occupied by the tower.
        cell: CellCoord,
        /// Money deducted for the purchase.
        cost: u32,
    },
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Type of tower requested for placement.
        kind: TowerKind,
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Announces that the tower selection changed.
    SelectionChanged {
        /// Selection after processing the command.
        kind: Option<TowerKind>,
    },
    /// Confirms that an enemy entered the path.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Type of the spawned enemy.
        kind: EnemyKind,
        /// Health the enemy spawned with.
        health: Health,
    },
    /// Reports that an enemy reached the final waypoint.
    EnemyEscaped {
        /// Identifier of the escaped enemy.
        enemy: EnemyId,
    },
    /// Reports lives lost to escaped enemies within a single advance.
    LivesLost {
        /// Number of lives lost.
        count: u32,
        /// Lives left afterwards.
        remaining: u32,
    },
    /// Confirms that a tower launched a projectile.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Tower that fired.
        tower: TowerId,
        /// Enemy the tower aimed at.
        enemy: EnemyId,
        /// Fixed point the projectile travels toward.
        target: Vec2,
    },
    /// Reports that a projectile landed on its target point without hitting anything.
    ProjectileExpired {
        /// Identifier of the removed projectile.
        projectile: ProjectileId,
    },
    /// Reports that a projectile struck an enemy.
    EnemyHit {
        /// Projectile consumed by the hit.
        projectile: ProjectileId,
        /// Enemy that took damage.
        enemy: EnemyId,
        /// Damage dealt.
        damage: u32,
        /// Health left after the hit.
        remaining: Health,
    },
    /// Reports that an enemy was destroyed.
    EnemyDefeated {
        /// Identifier of the destroyed enemy.
        enemy: EnemyId,
        /// Money awarded for the kill.
        bounty: u32,
    },
    /// Announces the start of a wave.
    WaveStarted {
        /// Number of the wave that started.
        wave: u32,
        /// Number of enemies scheduled for the wave.
        enemies: u32,
    },
    /// Announces that a wave was cleared.
    WaveCompleted {
        /// Number of the cleared wave.
        wave: u32,
        /// Money awarded for clearing it.
        bonus: u32,
    },
    /// Announces a change of the overall game status.
    StatusChanged {
        /// Status after processing the command.
        status: GameStatus,
    },
    /// Confirms that the game state returned to its initial value.
    GameReset,
}

/// Reasons a tower placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The game is paused or over.
    NotPlaying,
    /// The requested cell lies outside the grid.
    OutOfBounds,
    /// The requested cell is part of the enemy path.
    OnPath,
    /// The requested cell already holds a tower.
    CellOccupied,
    /// The player cannot afford the tower.
    InsufficientFunds,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NotPlaying => "the game is not running",
            Self::OutOfBounds => "the cell lies outside the grid",
            Self::OnPath => "the cell is part of the enemy path",
            Self::CellOccupied => "the cell already holds a tower",
            Self::InsufficientFunds => "not enough money",
        };
        f.write_str(text)
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Identifier allocated after this one.
    #[must_use]
    pub const fn successor(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Unique identifier assigned to an enemy.
///
/// Identifiers grow with creation order, so a smaller identifier always
/// denotes an earlier spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Identifier allocated after this one.
    #[must_use]
    pub const fn successor(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Identifier allocated after this one.
    #[must_use]
    pub const fn successor(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Remaining hit points of an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Health(u32);

impl Health {
    /// Creates a new health value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the health value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether no hit points remain.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.0 == 0
    }

    /// Health left after absorbing the provided damage, saturating at zero.
    #[must_use]
    pub const fn after_damage(self, damage: u32) -> Self {
        Self(self.0.saturating_sub(damage))
    }
}

/// Types of towers that can be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerKind {
    /// Cheap tower with medium range and a fast fire rate.
    Gatling,
    /// Expensive long range tower with heavy, slow shots.
    Sniper,
    /// Short range tower with medium damage and fire rate.
    Cannon,
}

impl TowerKind {
    /// Every tower kind in declaration order.
    pub const ALL: [Self; 3] = [Self::Gatling, Self::Sniper, Self::Cannon];

    /// Fixed stat table entry for the tower kind.
    #[must_use]
    pub const fn stats(self) -> TowerStats {
        match self {
            Self::Gatling => TowerStats {
                cost: 100,
                damage: 15,
                range_in_cells: 2.5,
                fire_interval: Duration::from_millis(500),
            },
            Self::Sniper => TowerStats {
                cost: 200,
                damage: 50,
                range_in_cells: 4.0,
                fire_interval: Duration::from_millis(1_500),
            },
            Self::Cannon => TowerStats {
                cost: 150,
                damage: 25,
                range_in_cells: 1.75,
                fire_interval: Duration::from_millis(1_000),
            },
        }
    }

    /// Lower-case name used by adapters.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gatling => "gatling",
            Self::Sniper => "sniper",
            Self::Cannon => "cannon",
        }
    }
}

impl fmt::Display for TowerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed attack parameters of a tower kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerStats {
    /// Money required to place the tower.
    pub cost: u32,
    /// Damage dealt by every projectile.
    pub damage: u32,
    /// Targeting radius measured in cells.
    pub range_in_cells: f32,
    /// Minimum simulated time between two shots.
    pub fire_interval: Duration,
}

impl TowerStats {
    /// Targeting radius in pixels for the provided cell size.
    #[must_use]
    pub fn range(&self, cell_size: f32) -> f32 {
        self.range_in_cells * cell_size
    }
}

/// Types of enemies that walk the path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Sturdy, slow foot soldier.
    Grunt,
    /// Lightly armoured enemy with medium speed.
    Scout,
    /// Fragile but fast enemy.
    Runner,
    /// Heavily armoured enemy with slow-medium speed.
    Tank,
}

impl EnemyKind {
    /// Every enemy kind in declaration order.
    pub const ALL: [Self; 4] = [Self::Grunt, Self::Scout, Self::Runner, Self::Tank];

    /// Fixed stat table entry for the enemy kind.
    #[must_use]
    pub const fn stats(self) -> EnemyStats {
        match self {
            Self::Grunt => EnemyStats {
                base_health: 100,
                speed_in_cells: 0.025,
                bounty: 50,
                first_wave: 1,
            },
            Self::Scout => EnemyStats {
                base_health: 60,
                speed_in_cells: 0.04,
                bounty: 30,
                first_wave: 1,
            },
            Self::Runner => EnemyStats {
                base_health: 40,
                speed_in_cells: 0.06,
                bounty: 20,
                first_wave: 3,
            },
            Self::Tank => EnemyStats {
                base_health: 120,
                speed_in_cells: 0.03,
                bounty: 60,
                first_wave: 5,
            },
        }
    }

    /// Health of an enemy spawned during the provided wave.
    ///
    /// Scales the base health by `1 + 0.2 × wave`, computed exactly in
    /// integers as `base × (5 + wave) / 5`.
    #[must_use]
    pub const fn health_at_wave(self, wave: u32) -> Health {
        let base = self.stats().base_health as u64;
        let scaled = base * (5 + wave as u64) / 5;
        if scaled > u32::MAX as u64 {
            Health::new(u32::MAX)
        } else {
            Health::new(scaled as u32)
        }
    }

    /// Enemy kinds that may appear during the provided wave.
    pub fn unlocked_at(wave: u32) -> impl Iterator<Item = Self> {
        Self::ALL
            .into_iter()
            .filter(move |kind| kind.stats().first_wave <= wave.max(1))
    }

    /// Lower-case name used by adapters.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Grunt => "grunt",
            Self::Scout => "scout",
            Self::Runner => "runner",
            Self::Tank => "tank",
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed parameters of an enemy kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    /// Health before wave scaling.
    pub base_health: u32,
    /// Distance travelled per tick measured in cells.
    pub speed_in_cells: f32,
    /// Money awarded when the enemy is destroyed.
    pub bounty: u32,
    /// First wave during which the director spawns this kind.
    pub first_wave: u32,
}

/// Tower placed on the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Tower {
    /// Identifier allocated to the tower.
    pub id: TowerId,
    /// Kind of tower that was constructed.
    pub kind: TowerKind,
    /// Cell occupied by the tower.
    pub cell: CellCoord,
    /// Pixel-space center of the cell, used for range checks and firing.
    pub position: Vec2,
    /// Damage dealt by every projectile.
    pub damage: u32,
    /// Targeting radius in pixels.
    pub range: f32,
    /// Minimum simulated time between two shots.
    pub fire_interval: Duration,
    /// Money paid for the tower.
    pub cost: u32,
    /// Upgrade level; always one.
    pub level: u32,
    /// Simulation time of the last shot, if the tower fired before.
    pub last_fired: Option<Duration>,
}

impl Tower {
    /// Reports whether the cooldown elapsed at the provided simulation time.
    #[must_use]
    pub fn is_ready(&self, now: Duration) -> bool {
        self.last_fired
            .map_or(true, |fired| now.saturating_sub(fired) >= self.fire_interval)
    }
}

/// Enemy walking the waypoint path.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    /// Identifier allocated to the enemy.
    pub id: EnemyId,
    /// Kind of enemy.
    pub kind: EnemyKind,
    /// Current pixel-space position.
    pub position: Vec2,
    /// Hit points left.
    pub health: Health,
    /// Hit points at spawn time.
    pub max_health: Health,
    /// Distance travelled per tick in pixels.
    pub speed: f32,
    /// Money awarded when the enemy is destroyed.
    pub bounty: u32,
    /// Index of the waypoint the enemy most recently reached.
    pub path_index: usize,
}

/// Projectile flying toward a fixed point.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    /// Identifier allocated to the projectile.
    pub id: ProjectileId,
    /// Tower that fired the projectile.
    pub tower: TowerId,
    /// Current pixel-space position.
    pub position: Vec2,
    /// Point captured at launch; never changes.
    pub target: Vec2,
    /// Damage dealt on contact.
    pub damage: u32,
    /// Distance travelled per tick in pixels.
    pub speed: f32,
}

/// Target assignment produced for a tower that is ready to fire.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerTarget {
    /// Tower that will fire.
    pub tower: TowerId,
    /// Enemy selected as the target.
    pub enemy: EnemyId,
    /// Position of the enemy when it was selected.
    pub aim: Vec2,
}

/// Contact between a projectile and an enemy detected within a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectileContact {
    /// Projectile consumed by the contact.
    pub projectile: ProjectileId,
    /// Enemy struck by the projectile.
    pub enemy: EnemyId,
    /// Damage carried by the projectile.
    pub damage: u32,
}

/// Phase of the wave director state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WavePhase {
    /// Waiting for the next wave to begin.
    Idle {
        /// Simulation time at which the next wave is due.
        next_wave_at: Duration,
    },
    /// Spawning the enemies of the active wave.
    Spawning {
        /// Simulation time at which the next enemy is due.
        next_spawn_at: Duration,
    },
    /// Every enemy of the active wave spawned; waiting for the field to clear.
    WaitingForClear,
    /// No further waves will start.
    Complete,
}

/// Bookkeeping for the wave currently being played.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveProgress {
    /// Number of the most recently started wave; zero before the first wave.
    pub number: u32,
    /// Whether a wave is currently active.
    pub in_progress: bool,
    /// Enemies scheduled for the active wave.
    pub expected: u32,
    /// Enemies spawned so far during the active wave.
    pub spawned: u32,
    /// Current phase of the director state machine.
    pub phase: WavePhase,
}

impl WaveProgress {
    /// Progress at game start: no wave played, the first one due shortly.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            number: 0,
            in_progress: false,
            expected: 0,
            spawned: 0,
            phase: WavePhase::Idle {
                next_wave_at: FIRST_WAVE_DELAY,
            },
        }
    }

    /// Enemies of the active wave that have not spawned yet.
    #[must_use]
    pub const fn remaining_spawns(&self) -> u32 {
        self.expected.saturating_sub(self.spawned)
    }
}

impl Default for WaveProgress {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn enemy_count_grows_every_second_wave() {
        let counts: Vec<u32> = (1..=FINAL_WAVE).map(enemies_in_wave).collect();
        assert_eq!(counts, vec![5, 6, 6, 7, 7, 8, 8, 9, 9, 10]);
    }

    #[test]
    fn enemy_count_is_capped() {
        assert_eq!(enemies_in_wave(20), 15);
        assert_eq!(enemies_in_wave(200), MAX_ENEMIES_PER_WAVE);
    }

    #[test]
    fn grunt_health_scales_with_wave() {
        assert_eq!(EnemyKind::Grunt.health_at_wave(0), Health::new(100));
        assert_eq!(EnemyKind::Grunt.health_at_wave(1), Health::new(120));
        assert_eq!(EnemyKind::Grunt.health_at_wave(5), Health::new(200));
    }

    #[test]
    fn wave_scaling_stays_integral_for_every_kind() {
        assert_eq!(EnemyKind::Scout.health_at_wave(1), Health::new(72));
        assert_eq!(EnemyKind::Runner.health_at_wave(3), Health::new(64));
        assert_eq!(EnemyKind::Tank.health_at_wave(10), Health::new(360));
    }

    #[test]
    fn tower_table_matches_published_costs() {
        assert_eq!(TowerKind::Gatling.stats().cost, 100);
        assert_eq!(TowerKind::Sniper.stats().cost, 200);
        assert_eq!(TowerKind::Cannon.stats().cost, 150);
        assert!(TowerKind::Sniper.stats().range_in_cells > TowerKind::Gatling.stats().range_in_cells);
        assert!(TowerKind::Gatling.stats().range_in_cells > TowerKind::Cannon.stats().range_in_cells);
    }

    #[test]
    fn tower_range_scales_with_cell_size() {
        let stats = TowerKind::Sniper.stats();
        assert!((stats.range(50.0) - 200.0).abs() < f32::EPSILON);
    }

    #[test]
    fn unlocked_kinds_follow_first_wave() {
        let early: Vec<EnemyKind> = EnemyKind::unlocked_at(1).collect();
        assert_eq!(early, vec![EnemyKind::Grunt, EnemyKind::Scout]);

        let late: Vec<EnemyKind> = EnemyKind::unlocked_at(FINAL_WAVE).collect();
        assert_eq!(late, EnemyKind::ALL.to_vec());
    }

    #[test]
    fn health_saturates_at_zero() {
        let health = Health::new(10).after_damage(25);
        assert!(health.is_depleted());
    }

    #[test]
    fn fresh_tower_is_ready_and_respects_interval_after_firing() {
        let mut tower = Tower {
            id: TowerId::new(0),
            kind: TowerKind::Gatling,
            cell: CellCoord::new(0, 0),
            position: Vec2::ZERO,
            damage: 15,
            range: 150.0,
            fire_interval: Duration::from_millis(500),
            cost: 100,
            level: 1,
            last_fired: None,
        };
        assert!(tower.is_ready(Duration::ZERO));

        tower.last_fired = Some(Duration::from_millis(1_000));
        assert!(!tower.is_ready(Duration::from_millis(1_499)));
        assert!(tower.is_ready(Duration::from_millis(1_500)));
    }

    #[test]
    fn terminal_statuses() {
        assert!(GameStatus::Victory.is_terminal());
        assert!(GameStatus::Defeat.is_terminal());
        assert!(!GameStatus::Paused.is_terminal());
        assert!(GameStatus::Playing.is_playing());
    }

    #[test]
    fn placement_error_round_trips_through_bincode() {
        assert_round_trip(&PlacementError::InsufficientFunds);
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        assert_round_trip(&CellCoord::new(5, 7));
    }
}
