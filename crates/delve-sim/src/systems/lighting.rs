//! Lighting system: repaint the grid around every moving light.

use hecs::World;

use delve_core::components::LightSource;
use delve_world::lighting::recompute;
use delve_world::TileGrid;

pub fn run(world: &mut World, grid: &mut TileGrid, radius: i32) {
    let sources = world
        .query_mut::<&mut LightSource>()
        .into_iter()
        .map(|(_, light)| light);
    recompute(grid, sources, radius);
}
