//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player, enemies, keys and bullets with their component
//! bundles. Every spawn takes the next serial so storage order is stable.

use hecs::{Entity, World};

use delve_core::components::*;
use delve_core::config::DelveConfig;
use delve_core::enums::MobKind;
use delve_core::types::{Position, Velocity};
use delve_world::LoadedMap;

fn next(serial: &mut u64) -> SpawnOrder {
    let order = SpawnOrder(*serial);
    *serial += 1;
    order
}

/// Spawn everything a map describes. Returns the player entity.
///
/// Entities appear at the centre of their marker tile. Enemies and keys are
/// spawned in row-major map order.
pub fn populate(world: &mut World, map: &LoadedMap, config: &DelveConfig, serial: &mut u64) -> Entity {
    let tile_size = map.grid.tile_size();
    let player = spawn_player(world, config, map.player_start.center(tile_size), serial);
    for tile in &map.enemy_spawns {
        spawn_enemy(world, config, tile.center(tile_size), serial);
    }
    for tile in &map.key_spawns {
        spawn_key(world, config, tile.center(tile_size), serial);
    }
    log::info!(
        "Spawned player at {:?}, {} enemies, {} keys",
        map.player_start,
        map.enemy_spawns.len(),
        map.key_spawns.len()
    );
    player
}

/// The player carries the only light in the world.
pub fn spawn_player(world: &mut World, config: &DelveConfig, position: Position, serial: &mut u64) -> Entity {
    world.spawn((
        Mob::new(MobKind::Player, config.player_health),
        position,
        Hitbox::square(config.player_hitbox),
        LightSource::at(position),
        next(serial),
    ))
}

pub fn spawn_enemy(world: &mut World, config: &DelveConfig, position: Position, serial: &mut u64) -> Entity {
    world.spawn((
        Mob::new(MobKind::Enemy, config.enemy_health),
        position,
        Hitbox::square(config.enemy_hitbox),
        next(serial),
    ))
}

pub fn spawn_key(world: &mut World, config: &DelveConfig, position: Position, serial: &mut u64) -> Entity {
    world.spawn((Key, position, Hitbox::square(config.key_hitbox), next(serial)))
}

pub fn spawn_bullet(
    world: &mut World,
    config: &DelveConfig,
    position: Position,
    velocity: Velocity,
    serial: &mut u64,
) -> Entity {
    world.spawn((
        Bullet,
        position,
        velocity,
        Hitbox::square(config.bullet_hitbox),
        next(serial),
    ))
}
