//! Axis-separated movement resolution against wall tiles.
//!
//! Each axis of the desired delta is tested on its own, starting from the
//! entity's current position. A blocked axis is zeroed, the other is kept,
//! which lets movers slide along walls. Only the 3×3 tile window around the
//! mover's starting cell is scanned, so a single step must stay under one
//! tile for the result to be exact.

use delve_core::components::Hitbox;
use delve_core::types::{Aabb, Position, TileCoord};

use crate::grid::TileGrid;

/// Return the part of `(dx, dy)` an entity at `position` may actually move.
///
/// Pure: neither the entity nor the grid is modified.
pub fn resolve_movement(
    grid: &TileGrid,
    position: Position,
    hitbox: &Hitbox,
    dx: f64,
    dy: f64,
) -> (f64, f64) {
    let start_cell = position.to_tile(grid.tile_size());

    let moved_x = position.moved_by(dx, 0.0).centered_box(hitbox.width, hitbox.height);
    let rx = if overlaps_wall(grid, start_cell, &moved_x) {
        0.0
    } else {
        dx
    };

    let moved_y = position.moved_by(0.0, dy).centered_box(hitbox.width, hitbox.height);
    let ry = if overlaps_wall(grid, start_cell, &moved_y) {
        0.0
    } else {
        dy
    };

    (rx, ry)
}

/// Whether any non-walkable tile in the 3×3 window around `center` overlaps
/// `bounds`. Out-of-range cells count as walls.
fn overlaps_wall(grid: &TileGrid, center: TileCoord, bounds: &Aabb) -> bool {
    let tile_size = grid.tile_size();
    for y in center.y - 1..=center.y + 1 {
        for x in center.x - 1..=center.x + 1 {
            let cell = TileCoord::new(x, y);
            if !grid.is_walkable(cell) && cell.bounds(tile_size).overlaps(bounds) {
                return true;
            }
        }
    }
    false
}
