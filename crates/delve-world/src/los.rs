//! Tile line-of-sight.
//!
//! A ray from one tile to another is sampled at `L = max(|dx|, |dy|)`
//! evenly spaced points; each sample is rounded to the nearest tile.
//! Only intermediate samples are tested, so the endpoints themselves
//! never block (a lit wall face is visible, a wall behind it is not).

use delve_core::types::TileCoord;

use crate::grid::TileGrid;

/// Tiles strictly between `from` and `to` along the sampled ray.
pub fn ray_tiles(from: TileCoord, to: TileCoord) -> impl Iterator<Item = TileCoord> {
    let dx = (to.x - from.x) as f64;
    let dy = (to.y - from.y) as f64;
    let steps = (to.x - from.x).abs().max((to.y - from.y).abs());
    (1..steps).map(move |i| {
        let t = i as f64 / steps as f64;
        TileCoord::new(
            from.x + (dx * t).round() as i32,
            from.y + (dy * t).round() as i32,
        )
    })
}

/// True if no intermediate tile on the ray is a wall (or outside the grid).
pub fn has_line_of_sight(grid: &TileGrid, from: TileCoord, to: TileCoord) -> bool {
    ray_tiles(from, to).all(|t| grid.is_walkable(t))
}
