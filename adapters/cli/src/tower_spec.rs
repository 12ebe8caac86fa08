//! Parsing of `KIND@COLUMN,ROW` tower placement arguments.

use std::{error::Error, fmt, num::ParseIntError, str::FromStr};

use waypoint_defence_core::{CellCoord, Command, TowerKind};

/// Delimiter between the tower kind and its cell.
const KIND_DELIMITER: char = '@';
/// Delimiter between the column and the row of the cell.
const CELL_DELIMITER: char = ',';

/// Tower placement requested on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TowerSpec {
    /// Type of tower to place.
    pub(crate) kind: TowerKind,
    /// Cell that should hold the tower.
    pub(crate) cell: CellCoord,
}

impl TowerSpec {
    /// Placement command submitted to the simulation.
    #[must_use]
    pub(crate) fn command(&self) -> Command {
        Command::PlaceTower {
            kind: self.kind,
            cell: self.cell,
        }
    }
}

impl FromStr for TowerSpec {
    type Err = TowerSpecError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TowerSpecError::Empty);
        }

        let (kind, cell) = trimmed
            .split_once(KIND_DELIMITER)
            .ok_or(TowerSpecError::MissingCell)?;
        let kind = parse_kind(kind)?;
        let cell = parse_cell(cell)?;
        Ok(Self { kind, cell })
    }
}

fn parse_kind(value: &str) -> Result<TowerKind, TowerSpecError> {
    let wanted = value.trim().to_ascii_lowercase();
    TowerKind::ALL
        .into_iter()
        .find(|kind| kind.name() == wanted)
        .ok_or_else(|| TowerSpecError::UnknownKind(value.trim().to_owned()))
}

fn parse_cell(value: &str) -> Result<CellCoord, TowerSpecError> {
    let (column, row) = value
        .split_once(CELL_DELIMITER)
        .ok_or_else(|| TowerSpecError::InvalidCell(value.to_owned()))?;
    let column = column
        .trim()
        .parse::<u32>()
        .map_err(TowerSpecError::InvalidCoordinate)?;
    let row = row
        .trim()
        .parse::<u32>()
        .map_err(TowerSpecError::InvalidCoordinate)?;
    Ok(CellCoord::new(column, row))
}

/// Errors that can occur while parsing a tower placement argument.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum TowerSpecError {
    /// The argument was empty or contained only whitespace.
    Empty,
    /// The argument did not contain the `@` separating kind and cell.
    MissingCell,
    /// The kind did not name a known tower.
    UnknownKind(String),
    /// The cell was not written as `COLUMN,ROW`.
    InvalidCell(String),
    /// A coordinate was not a non-negative integer.
    InvalidCoordinate(ParseIntError),
}

impl fmt::Display for TowerSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("tower argument is empty"),
            Self::MissingCell => f.write_str("expected KIND@COLUMN,ROW"),
            Self::UnknownKind(kind) => write!(
                f,
                "unknown tower kind '{kind}', expected one of gatling, sniper, cannon"
            ),
            Self::InvalidCell(cell) => write!(f, "cell '{cell}' is not COLUMN,ROW"),
            Self::InvalidCoordinate(error) => write!(f, "invalid cell coordinate: {error}"),
        }
    }
}

impl Error for TowerSpecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidCoordinate(error) => Some(error),
            Self::Empty | Self::MissingCell | Self::UnknownKind(_) | Self::InvalidCell(_) => None,
        }
    }
}
