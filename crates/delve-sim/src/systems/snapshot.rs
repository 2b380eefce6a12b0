//! Snapshot system: queries the ECS world and builds a complete WorldSnapshot.
//!
//! This system is read-only. It never modifies the world or the grid.

use hecs::{Entity, World};

use delve_core::components::*;
use delve_core::enums::{MobKind, Outcome};
use delve_core::events::SimEvent;
use delve_core::state::*;
use delve_core::types::{Position, SimTime, Velocity};
use delve_world::{Camera, TileGrid};

/// Everything the snapshot needs besides the world and grid.
pub struct SnapshotInputs<'a> {
    pub time: &'a SimTime,
    pub outcome: Outcome,
    pub player: Entity,
    pub keys_remaining: u32,
    pub camera: &'a Camera,
    pub viewport_size: (u32, u32),
    pub events: Vec<SimEvent>,
}

/// Build a complete WorldSnapshot from the current world state.
pub fn build_snapshot(world: &World, grid: &TileGrid, inputs: SnapshotInputs<'_>) -> WorldSnapshot {
    WorldSnapshot {
        time: *inputs.time,
        outcome: inputs.outcome,
        player: build_player(world, inputs.player),
        enemies: build_enemies(world),
        bullets: build_bullets(world),
        keys: build_keys(world),
        keys_remaining: inputs.keys_remaining,
        camera_offset: inputs.camera.origin(),
        tiles: build_tiles(grid, inputs.camera, inputs.viewport_size),
        events: inputs.events,
    }
}

fn build_player(world: &World, player: Entity) -> PlayerView {
    let Ok(mut query) = world.query_one::<(&Position, &Mob)>(player) else {
        return PlayerView::default();
    };
    query
        .get()
        .map(|(pos, mob)| PlayerView {
            position: *pos,
            health: mob.health,
        })
        .unwrap_or_default()
}

/// Living enemies in spawn order.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Position, &Mob, &SpawnOrder)>()
        .iter()
        .filter(|(_, (_, mob, _))| mob.kind == MobKind::Enemy && !mob.is_dead())
        .map(|(_, (pos, mob, order))| EnemyView {
            serial: order.0,
            position: *pos,
            health: mob.health,
        })
        .collect();
    enemies.sort_by_key(|e| e.serial);
    enemies
}

fn build_bullets(world: &World) -> Vec<BulletView> {
    let mut bullets: Vec<(SpawnOrder, BulletView)> = world
        .query::<(&Bullet, &Position, &Velocity, &SpawnOrder)>()
        .iter()
        .map(|(_, (_, pos, vel, order))| {
            (
                *order,
                BulletView {
                    position: *pos,
                    velocity: *vel,
                },
            )
        })
        .collect();
    bullets.sort_by_key(|(order, _)| *order);
    bullets.into_iter().map(|(_, view)| view).collect()
}

fn build_keys(world: &World) -> Vec<KeyView> {
    let mut keys: Vec<(SpawnOrder, KeyView)> = world
        .query::<(&Key, &Position, &SpawnOrder)>()
        .iter()
        .map(|(_, (_, pos, order))| (*order, KeyView { position: *pos }))
        .collect();
    keys.sort_by_key(|(order, _)| *order);
    keys.into_iter().map(|(_, view)| view).collect()
}

/// Tiles of the chunk neighbourhood around the viewport centre.
fn build_tiles(grid: &TileGrid, camera: &Camera, viewport_size: (u32, u32)) -> Vec<TileView> {
    let origin = camera.origin();
    let center = Position::new(
        origin.x + viewport_size.0 as f64 / 2.0,
        origin.y + viewport_size.1 as f64 / 2.0,
    );
    let mut center_tile = center.to_tile(grid.tile_size());
    // A canvas smaller than the viewport puts the centre past the grid edge.
    center_tile.x = center_tile.x.clamp(0, grid.width() as i32 - 1);
    center_tile.y = center_tile.y.clamp(0, grid.height() as i32 - 1);

    grid.chunks_near(center_tile)
        .into_iter()
        .flat_map(|chunk| chunk.tile_indices().iter())
        .filter_map(|&index| grid.tile_at_index(index))
        .map(|tile| TileView {
            coord: tile.coord,
            kind: tile.kind,
            darkness: tile.darkness(),
            overlay_alpha: (tile.darkness() * 255.0).round() as u8,
        })
        .collect()
}
