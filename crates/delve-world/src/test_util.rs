//! Shared grid builders for unit tests.

use delve_core::constants::{TILE_SIZE, VIEWPORT_SIZE};
use delve_core::enums::TileKind;
use delve_core::types::TileCoord;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::grid::TileGrid;

/// Build a grid from rows of `#` (wall) and anything else (floor).
pub fn grid_from_rows(rows: &[&str]) -> TileGrid {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.len()) as u32;
    TileGrid::from_fn(width, height, TILE_SIZE, VIEWPORT_SIZE, |c| {
        if rows[c.y as usize].as_bytes()[c.x as usize] == b'#' {
            TileKind::Wall
        } else {
            TileKind::Floor
        }
    })
}

/// All-floor grid.
pub fn open_grid(width: u32, height: u32) -> TileGrid {
    TileGrid::from_fn(width, height, TILE_SIZE, VIEWPORT_SIZE, |_| TileKind::Floor)
}

/// Grid with each tile a wall with probability `wall_chance`.
pub fn random_grid(rng: &mut ChaCha8Rng, width: u32, height: u32, wall_chance: f64) -> TileGrid {
    TileGrid::from_fn(width, height, TILE_SIZE, VIEWPORT_SIZE, |_| {
        if rng.gen_bool(wall_chance) {
            TileKind::Wall
        } else {
            TileKind::Floor
        }
    })
}

/// Uniformly random in-bounds tile.
pub fn random_tile(rng: &mut ChaCha8Rng, grid: &TileGrid) -> TileCoord {
    TileCoord::new(
        rng.gen_range(0..grid.width() as i32),
        rng.gen_range(0..grid.height() as i32),
    )
}
