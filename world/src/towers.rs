//! Authoritative tower state management utilities.

use tracing::debug;
use waypoint_defence_core::{
    CellCoord, Event, GridGeometry, PlacementError, Projectile, Tower, TowerId, TowerKind,
    WaypointPath, PROJECTILE_SPEED_IN_CELLS,
};
use waypoint_defence_system_tower_targeting::TowerTargeting;

use crate::{GameState, Outcome};

/// Registry that stores towers, their cell occupancy and identifier allocation.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TowerRegistry {
    entries: Vec<Tower>,
    occupancy: OccupancyGrid,
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates an empty registry whose grid marks the path cells as unbuildable.
    pub(crate) fn new(geometry: &GridGeometry, path: &WaypointPath) -> Self {
        let mut occupancy = OccupancyGrid::new(geometry.columns(), geometry.rows());
        for cell in path.covered_cells() {
            occupancy.set(cell, CellState::Path);
        }

        Self {
            entries: Vec::new(),
            occupancy,
            next_tower_id: TowerId::new(0),
        }
    }

    pub(crate) fn as_slice(&self) -> &[Tower] {
        &self.entries
    }

    pub(crate) fn at(&self, cell: CellCoord) -> Option<&Tower> {
        match self.occupancy.get(cell)? {
            CellState::Tower(id) => self.entries.iter().find(|tower| tower.id == id),
            CellState::Open | CellState::Path => None,
        }
    }

    pub(crate) fn is_open(&self, cell: CellCoord) -> bool {
        self.occupancy.get(cell) == Some(CellState::Open)
    }

    fn get_mut(&mut self, id: TowerId) -> Option<&mut Tower> {
        self.entries.iter_mut().find(|tower| tower.id == id)
    }

    fn allocate_id(&mut self) -> TowerId {
        let id = self.next_tower_id;
        self.next_tower_id = id.successor();
        id
    }

    fn insert(&mut self, tower: Tower) {
        self.occupancy.set(tower.cell, CellState::Tower(tower.id));
        self.entries.push(tower);
    }
}

/// Places a tower if the cell is free and the player can afford it.
pub(crate) fn place(
    state: &mut GameState,
    kind: TowerKind,
    cell: CellCoord,
    out_events: &mut Vec<Event>,
) -> Outcome {
    if let Err(reason) = validate_placement(state, kind, cell) {
        debug!(%kind, column = cell.column(), row = cell.row(), %reason, "tower placement rejected");
        out_events.push(Event::TowerPlacementRejected { kind, cell, reason });
        return Outcome::Unchanged;
    }

    let stats = kind.stats();
    let id = state.towers.allocate_id();
    state.towers.insert(Tower {
        id,
        kind,
        cell,
        position: state.geometry.cell_center(cell),
        damage: stats.damage,
        range: stats.range(state.geometry.cell_size()),
        fire_interval: stats.fire_interval,
        cost: stats.cost,
        level: 1,
        last_fired: None,
    });
    state.money -= stats.cost;

    out_events.push(Event::TowerPlaced {
        tower: id,
        kind,
        cell,
        cost: stats.cost,
    });

    if state.selection.is_some() {
        state.selection = None;
        out_events.push(Event::SelectionChanged { kind: None });
    }

    Outcome::Changed
}

fn validate_placement(
    state: &GameState,
    kind: TowerKind,
    cell: CellCoord,
) -> Result<(), PlacementError> {
    if !state.status.is_playing() {
        return Err(PlacementError::NotPlaying);
    }

    match state.towers.occupancy.get(cell) {
        None => return Err(PlacementError::OutOfBounds),
        Some(CellState::Path) => return Err(PlacementError::OnPath),
        Some(CellState::Tower(_)) => return Err(PlacementError::CellOccupied),
        Some(CellState::Open) => {}
    }

    if state.money < kind.stats().cost {
        return Err(PlacementError::InsufficientFunds);
    }

    Ok(())
}

/// Lets every ready tower shoot at the closest enemy within its range.
pub(crate) fn fire(state: &mut GameState, out_events: &mut Vec<Event>) -> Outcome {
    let mut targets = Vec::new();
    TowerTargeting::new().handle(
        state.clock,
        state.towers.as_slice(),
        &state.enemies,
        &mut targets,
    );

    if targets.is_empty() {
        return Outcome::Unchanged;
    }

    let now = state.clock;
    let speed = state.geometry.cells_to_pixels(PROJECTILE_SPEED_IN_CELLS);

    for target in targets {
        let Some(tower) = state.towers.get_mut(target.tower) else {
            continue;
        };
        tower.last_fired = Some(now);

        let projectile = state.next_projectile_id;
        state.next_projectile_id = projectile.successor();
        state.projectiles.push(Projectile {
            id: projectile,
            tower: tower.id,
            position: tower.position,
            target: target.aim,
            damage: tower.damage,
            speed,
        });

        out_events.push(Event::ProjectileFired {
            projectile,
            tower: target.tower,
            enemy: target.enemy,
            target: target.aim,
        });
    }

    Outcome::Changed
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CellState {
    Open,
    Path,
    Tower(TowerId),
}

#[derive(Clone, Debug, PartialEq)]
struct OccupancyGrid {
    columns: u32,
    rows: u32,
    cells: Vec<CellState>,
}

impl OccupancyGrid {
    fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![CellState::Open; capacity],
        }
    }

    fn get(&self, cell: CellCoord) -> Option<CellState> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    fn set(&mut self, cell: CellCoord, state: CellState) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = state;
            }
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
