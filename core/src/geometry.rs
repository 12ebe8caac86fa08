//! Grid geometry and the single waypoint path definition.
//!
//! Towers live on integer grid cells while enemies and projectiles move in a
//! continuous pixel plane. [`GridGeometry::cell_center`] is the only place
//! where the two spaces meet, and [`PATH_WAYPOINTS`] is the only definition of
//! the route enemies follow. Rendering and simulation both derive their
//! coordinates from these two items.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::CellCoord;

/// Number of columns in the default grid.
pub const DEFAULT_COLUMNS: u32 = 10;

/// Number of rows in the default grid.
pub const DEFAULT_ROWS: u32 = 8;

/// Default side length of a cell in pixels.
pub const DEFAULT_CELL_SIZE: f32 = 60.0;

/// Ordered waypoints of the enemy path, expressed in grid cells.
pub const PATH_WAYPOINTS: [CellCoord; 6] = [
    CellCoord::new(0, 1),
    CellCoord::new(3, 1),
    CellCoord::new(3, 6),
    CellCoord::new(6, 6),
    CellCoord::new(6, 2),
    CellCoord::new(9, 2),
];

/// Reasons a grid geometry cannot be constructed.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeometryError {
    /// The grid has no cells.
    #[error("grid must have at least one column and one row, got {columns}x{rows}")]
    EmptyGrid {
        /// Requested column count.
        columns: u32,
        /// Requested row count.
        rows: u32,
    },
    /// The cell size is zero, negative or not finite.
    #[error("cell size must be a positive finite number, got {0}")]
    InvalidCellSize(f32),
}

/// Dimensions of the placement grid and the size of its cells.
///
/// Deserialization goes through [`GridGeometry::new`], so a decoded geometry
/// is always valid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedGeometry")]
pub struct GridGeometry {
    columns: u32,
    rows: u32,
    cell_size: f32,
}

#[derive(Deserialize)]
struct UncheckedGeometry {
    columns: u32,
    rows: u32,
    cell_size: f32,
}

impl TryFrom<UncheckedGeometry> for GridGeometry {
    type Error = GeometryError;

    fn try_from(raw: UncheckedGeometry) -> Result<Self, Self::Error> {
        Self::new(raw.columns, raw.rows, raw.cell_size)
    }
}

impl GridGeometry {
    /// Creates a validated grid geometry.
    pub fn new(columns: u32, rows: u32, cell_size: f32) -> Result<Self, GeometryError> {
        if columns == 0 || rows == 0 {
            return Err(GeometryError::EmptyGrid { columns, rows });
        }

        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(GeometryError::InvalidCellSize(cell_size));
        }

        Ok(Self {
            columns,
            rows,
            cell_size,
        })
    }

    /// Creates the default 10 × 8 grid with a custom cell size.
    pub fn with_cell_size(cell_size: f32) -> Result<Self, GeometryError> {
        Self::new(DEFAULT_COLUMNS, DEFAULT_ROWS, cell_size)
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square cell in pixels.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Total width of the grid in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_size
    }

    /// Total height of the grid in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_size
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Pixel-space center of the provided cell.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        let half = self.cell_size / 2.0;
        Vec2::new(
            cell.column() as f32 * self.cell_size + half,
            cell.row() as f32 * self.cell_size + half,
        )
    }

    /// Cell containing the provided pixel-space point, if it lies on the grid.
    #[must_use]
    pub fn cell_at(&self, point: Vec2) -> Option<CellCoord> {
        if !point.is_finite() || point.x < 0.0 || point.y < 0.0 {
            return None;
        }

        let column = (point.x / self.cell_size).floor() as u32;
        let row = (point.y / self.cell_size).floor() as u32;
        let cell = CellCoord::new(column, row);
        self.contains(cell).then_some(cell)
    }

    /// Converts a distance measured in cells into pixels.
    #[must_use]
    pub fn cells_to_pixels(&self, cells: f32) -> f32 {
        cells * self.cell_size
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

/// Waypoint path resolved against a grid geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct WaypointPath {
    cells: Vec<CellCoord>,
    points: Vec<Vec2>,
}

impl WaypointPath {
    /// Resolves [`PATH_WAYPOINTS`] into pixel coordinates.
    #[must_use]
    pub fn for_geometry(geometry: &GridGeometry) -> Self {
        Self::from_cells(&PATH_WAYPOINTS, geometry)
    }

    /// Resolves an arbitrary list of waypoint cells into pixel coordinates.
    #[must_use]
    pub fn from_cells(cells: &[CellCoord], geometry: &GridGeometry) -> Self {
        Self {
            cells: cells.to_vec(),
            points: cells
                .iter()
                .map(|cell| geometry.cell_center(*cell))
                .collect(),
        }
    }

    /// Waypoints in pixel space, in travel order.
    #[must_use]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Waypoints in grid space, in travel order.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Pixel position where enemies enter the path.
    #[must_use]
    pub fn start(&self) -> Option<Vec2> {
        self.points.first().copied()
    }

    /// Pixel position of the waypoint at the provided index.
    #[must_use]
    pub fn waypoint(&self, index: usize) -> Option<Vec2> {
        self.points.get(index).copied()
    }

    /// Index of the final waypoint; reaching it means escaping.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Every cell the path runs through, waypoints included.
    ///
    /// Consecutive waypoints are joined column-first, which is exact for the
    /// axis-aligned segments of [`PATH_WAYPOINTS`].
    #[must_use]
    pub fn covered_cells(&self) -> Vec<CellCoord> {
        let mut covered: Vec<CellCoord> = Vec::new();
        let Some(first) = self.cells.first().copied() else {
            return covered;
        };
        covered.push(first);

        let mut current = first;
        for waypoint in self.cells.iter().skip(1).copied() {
            while current != waypoint {
                current = step_toward(current, waypoint);
                if !covered.contains(&current) {
                    covered.push(current);
                }
            }
        }

        covered
    }
}

fn step_toward(from: CellCoord, to: CellCoord) -> CellCoord {
    if from.column() != to.column() {
        let column = if to.column() > from.column() {
            from.column() + 1
        } else {
            from.column() - 1
        };
        CellCoord::new(column, from.row())
    } else if to.row() > from.row() {
        CellCoord::new(from.column(), from.row() + 1)
    } else {
        CellCoord::new(from.column(), from.row() - 1)
    }
}
