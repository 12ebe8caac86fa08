//! Plain-text rendering of a game snapshot.

use std::fmt::Write as _;

use waypoint_defence_core::{CellCoord, TowerKind};
use waypoint_defence_world::{query, GameState};

const OPEN: char = '.';
const PATH: char = '#';
const ENEMY: char = 'e';

/// Renders the board as one line per grid row.
///
/// Towers print as the initial of their kind, cells holding at least one
/// enemy as `e`, path cells as `#` and free cells as `.`.
#[must_use]
pub(crate) fn render_board(state: &GameState) -> String {
    let geometry = query::geometry(state);
    let path = query::path(state);
    let columns = geometry.columns() as usize;
    let rows = geometry.rows() as usize;
    let mut glyphs = vec![OPEN; columns * rows];

    let mut mark = |cell: CellCoord, glyph: char| {
        if geometry.contains(cell) {
            glyphs[cell.row() as usize * columns + cell.column() as usize] = glyph;
        }
    };

    for cell in path.covered_cells() {
        mark(cell, PATH);
    }
    for enemy in query::enemies(state) {
        if let Some(cell) = geometry.cell_at(enemy.position) {
            mark(cell, ENEMY);
        }
    }
    for tower in query::towers(state) {
        mark(tower.cell, tower_glyph(tower.kind));
    }

    let mut board = String::with_capacity((columns + 1) * rows);
    for row in glyphs.chunks(columns.max(1)) {
        board.extend(row.iter());
        board.push('\n');
    }
    board
}

/// Renders a short textual summary of the game.
#[must_use]
pub(crate) fn render_summary(state: &GameState) -> String {
    let wave = query::wave_progress(state);
    let mut summary = String::new();
    let _ = writeln!(summary, "status: {:?}", query::status(state));
    let _ = writeln!(
        summary,
        "wave:   {} ({}/{} spawned)",
        wave.number, wave.spawned, wave.expected
    );
    let _ = writeln!(summary, "money:  {}", query::money(state));
    let _ = writeln!(summary, "lives:  {}", query::lives(state));
    let _ = writeln!(summary, "score:  {}", query::score(state));
    let _ = writeln!(
        summary,
        "time:   {:.2}s over {} ticks",
        query::clock(state).as_secs_f32(),
        query::tick_index(state)
    );
    let _ = write!(
        summary,
        "field:  {} towers, {} enemies, {} projectiles",
        query::towers(state).len(),
        query::enemies(state).len(),
        query::projectiles(state).len()
    );
    summary
}

fn tower_glyph(kind: TowerKind) -> char {
    match kind {
        TowerKind::Gatling => 'G',
        TowerKind::Sniper => 'S',
        TowerKind::Cannon => 'C',
    }
}
