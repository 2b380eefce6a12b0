//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only)
//! plus the grid. They do not own state; all state lives in components.

pub mod bullets;
pub mod cleanup;
pub mod enemy_ai;
pub mod lighting;
pub mod outcome;
pub mod pickups;
pub mod player;
pub mod snapshot;

use hecs::{Entity, World};

use delve_core::components::{Hitbox, SpawnOrder};
use delve_core::types::{Aabb, Position};

/// World-space box of an entity, if it has a position and hitbox.
pub(crate) fn bounds_of(world: &World, entity: Entity) -> Option<Aabb> {
    let mut query = world.query_one::<(&Position, &Hitbox)>(entity).ok()?;
    query.get().map(|(pos, hitbox)| pos.centered_box(hitbox.width, hitbox.height))
}

/// Entities carrying component `T`, in spawn order.
pub(crate) fn in_spawn_order<T: hecs::Component>(world: &World) -> Vec<Entity> {
    let mut entities: Vec<(SpawnOrder, Entity)> = world
        .query::<(&T, &SpawnOrder)>()
        .iter()
        .map(|(entity, (_, order))| (*order, entity))
        .collect();
    entities.sort_unstable_by_key(|(order, _)| *order);
    entities.into_iter().map(|(_, entity)| entity).collect()
}
