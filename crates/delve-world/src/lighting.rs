//! Dynamic per-tile lighting with wall occlusion.
//!
//! Every tick, each light source first erases its previous square footprint
//! (darkness back to 1.0), then paints its new one. A tile inside the new
//! footprint is lit only if the ray from the light reaches it without
//! crossing a wall. Overlapping lights combine by taking the lowest darkness.
//!
//! Cost is O(sources × R²) tile visits, each with an O(R) ray walk.

use delve_core::components::LightSource;
use delve_core::constants::LIGHT_FALLOFF_EPSILON;
use delve_core::types::TileCoord;

use crate::grid::TileGrid;
use crate::los::has_line_of_sight;

/// Inverse falloff: saturates near the light and reaches zero at `radius`.
pub fn lightness(distance: f64, radius: i32) -> f64 {
    let radius = radius as f64;
    (2.0 / (distance + LIGHT_FALLOFF_EPSILON) - 2.0 / radius).clamp(0.0, 1.0)
}

/// In-bounds tiles within the square (Chebyshev) radius around `center`.
fn footprint(grid: &TileGrid, center: TileCoord, radius: i32) -> impl Iterator<Item = TileCoord> + '_ {
    (center.y - radius..=center.y + radius)
        .flat_map(move |y| (center.x - radius..=center.x + radius).map(move |x| TileCoord::new(x, y)))
        .filter(|c| grid.in_bounds(*c))
}

/// Reset the square footprint around `center` to fully dark.
pub fn clear_footprint(grid: &mut TileGrid, center: TileCoord, radius: i32) {
    let tiles: Vec<TileCoord> = footprint(grid, center, radius).collect();
    for tile in tiles {
        grid.set_darkness(tile, 1.0);
    }
}

/// Light the square footprint around `center`, keeping any darker-than-new
/// value only where another light already lit the tile more.
pub fn illuminate(grid: &mut TileGrid, center: TileCoord, radius: i32) {
    let updates: Vec<(TileCoord, f32)> = footprint(grid, center, radius)
        .filter(|tile| has_line_of_sight(grid, center, *tile))
        .map(|tile| {
            let darkness = 1.0 - lightness(center.distance_to(&tile), radius);
            (tile, darkness as f32)
        })
        .collect();

    for (tile, darkness) in updates {
        let current = grid.darkness(tile).unwrap_or(1.0);
        grid.set_darkness(tile, current.min(darkness));
    }
}

/// Recompute lighting for all sources and commit their positions.
///
/// All old footprints are cleared before any new one is painted, so two
/// lights never erase each other.
pub fn recompute<'a>(
    grid: &mut TileGrid,
    sources: impl IntoIterator<Item = &'a mut LightSource>,
    radius: i32,
) {
    let tile_size = grid.tile_size();
    let mut sources: Vec<&'a mut LightSource> = sources.into_iter().collect();

    for source in &sources {
        clear_footprint(grid, source.old_position.to_tile(tile_size), radius);
    }
    for source in &sources {
        illuminate(grid, source.new_position.to_tile(tile_size), radius);
    }
    for source in &mut sources {
        source.commit();
    }
}
