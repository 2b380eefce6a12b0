//! Cleanup system: removes bullets that have left the grid.

use hecs::{Entity, World};

use delve_core::components::Bullet;
use delve_core::types::Position;
use delve_world::TileGrid;

/// Despawn bullets whose centre lies outside the grid.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, grid: &TileGrid, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (pos, _bullet)) in world.query_mut::<(&Position, &Bullet)>() {
        if !grid.in_bounds(pos.to_tile(grid.tile_size())) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        log::trace!("Removing stray bullet {:?}", entity);
        let _ = world.despawn(entity);
    }
}
