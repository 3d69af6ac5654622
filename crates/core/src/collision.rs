//! Collision, merge and ghost projection
//!
//! A shape's local cell `(ly, lz, lx)` placed at anchor `pos` lands on
//! `(pos.x + lx, pos.y - ly, pos.z + lz)`. Space above the ceiling
//! (`y >= height`) is open: pieces may poke out of the top when they spawn,
//! and those cells are dropped on merge.

use crate::grid::Grid;
use crate::pieces::{LocalCell, Shape};
use crate::types::Position;

#[inline(always)]
fn absolute(pos: Position, (ly, lz, lx): LocalCell) -> (i32, i32, i32) {
    (pos.x + lx as i32, pos.y - ly as i32, pos.z + lz as i32)
}

/// Check whether a shape placed at `pos` hits a wall, the floor or a locked
/// cell.
///
/// A missing or degenerate shape always collides.
pub fn collide(grid: &Grid, shape: Option<&Shape>, pos: Position) -> bool {
    let Some(shape) = shape else {
        return true;
    };
    if shape.is_degenerate() {
        return true;
    }

    let width = grid.width() as i32;
    let height = grid.height() as i32;
    let depth = grid.depth() as i32;

    shape.cells().any(|cell| {
        let (x, y, z) = absolute(pos, cell);
        if x < 0 || x >= width || z < 0 || z >= depth || y < 0 {
            return true;
        }
        y < height && grid.is_occupied(x, y, z)
    })
}

/// Write a shape's cells into the grid and return how many were written.
///
/// Cells above the ceiling are skipped without error.
pub fn merge(grid: &mut Grid, shape: &Shape, pos: Position) -> u32 {
    let mut written = 0;
    for cell in shape.cells() {
        let (x, y, z) = absolute(pos, cell);
        if grid.set(x, y, z, true) {
            written += 1;
        }
    }
    written
}

/// Lowest anchor the shape can fall to from `pos` without colliding.
///
/// Returns `pos` unchanged when the piece already rests on something.
pub fn ghost_position(grid: &Grid, shape: &Shape, pos: Position) -> Position {
    let mut ghost = pos;
    while !collide(grid, Some(shape), ghost.below()) {
        ghost = ghost.below();
    }
    ghost
}
