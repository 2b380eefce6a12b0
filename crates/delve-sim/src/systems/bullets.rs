//! Bullet system: flight, wall stops and enemy hits.

use hecs::{Entity, World};

use delve_core::components::{Bullet, Hitbox, Mob, SpawnOrder};
use delve_core::events::SimEvent;
use delve_core::types::{Position, Velocity};
use delve_world::{resolve_movement, TileGrid};

use super::enemy_ai::enemies;
use super::{bounds_of, in_spawn_order};

/// Advance every bullet once, in spawn order.
///
/// A bullet that meets a wall on either axis is removed without moving.
/// Otherwise it damages at most the first living enemy it overlaps (by
/// spawn order) and is removed with it.
pub fn run(
    world: &mut World,
    grid: &TileGrid,
    elapsed_secs: f64,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<SimEvent>,
) {
    despawn_buffer.clear();
    let targets = enemies(world);

    for bullet in in_spawn_order::<Bullet>(world) {
        let Ok((pos, vel, hitbox)) =
            world.query_one_mut::<(&mut Position, &Velocity, &Hitbox)>(bullet)
        else {
            continue;
        };

        let dx = vel.x * elapsed_secs;
        let dy = vel.y * elapsed_secs;
        let resolved = resolve_movement(grid, *pos, hitbox, dx, dy);
        if resolved != (dx, dy) {
            events.push(SimEvent::BulletBlocked { position: *pos });
            despawn_buffer.push(bullet);
            continue;
        }
        *pos = pos.moved_by(dx, dy);

        let Some(bullet_box) = bounds_of(world, bullet) else {
            continue;
        };
        for &enemy in &targets {
            let overlapping = bounds_of(world, enemy).is_some_and(|b| b.overlaps(&bullet_box));
            if !overlapping {
                continue;
            }
            let Ok((mob, order)) = world.query_one_mut::<(&mut Mob, &SpawnOrder)>(enemy) else {
                continue;
            };
            if mob.is_dead() {
                continue;
            }
            mob.take_damage(1);
            log::debug!("Enemy {} hit, health {}", order.0, mob.health);
            events.push(SimEvent::EnemyHit {
                serial: order.0,
                health: mob.health,
            });
            despawn_buffer.push(bullet);
            break;
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
