//! Enemy system: corpse removal, melee attacks and pursuit movement.

use hecs::{Entity, World};

use delve_ai::pursuit::{self, PursuitContext};
use delve_core::components::{Hitbox, Mob, SpawnOrder};
use delve_core::config::DelveConfig;
use delve_core::enums::MobKind;
use delve_core::events::SimEvent;
use delve_core::types::{Position, SimTime};
use delve_world::{resolve_movement, TileGrid};

use super::bounds_of;

/// Enemies in spawn order.
pub(crate) fn enemies(world: &World) -> Vec<Entity> {
    let mut enemies: Vec<(SpawnOrder, Entity)> = world
        .query::<(&Mob, &SpawnOrder)>()
        .iter()
        .filter(|(_, (mob, _))| mob.kind == MobKind::Enemy)
        .map(|(entity, (_, order))| (*order, entity))
        .collect();
    enemies.sort_unstable_by_key(|(order, _)| *order);
    enemies.into_iter().map(|(_, entity)| entity).collect()
}

/// Run every enemy once, in spawn order.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    grid: &TileGrid,
    config: &DelveConfig,
    player: Entity,
    time: &SimTime,
    elapsed_secs: f64,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<SimEvent>,
) {
    despawn_buffer.clear();

    let Ok(player_pos) = world.get::<&Position>(player).map(|p| *p) else {
        return;
    };
    let Some(player_box) = bounds_of(world, player) else {
        return;
    };
    let step = config.enemy_speed() * elapsed_secs;

    for enemy in enemies(world) {
        let Ok((mob, pos, hitbox, order)) =
            world.query_one_mut::<(&mut Mob, &mut Position, &Hitbox, &SpawnOrder)>(enemy)
        else {
            continue;
        };

        if mob.is_dead() {
            log::debug!("Enemy {} removed", order.0);
            despawn_buffer.push(enemy);
            events.push(SimEvent::EnemyKilled { serial: order.0 });
            continue;
        }

        let enemy_box = pos.centered_box(hitbox.width, hitbox.height);
        let strikes = enemy_box.overlaps(&player_box)
            && mob.attack_ready(time.now_ms, config.enemy_attack_period_ms);
        if strikes {
            mob.last_attack_ms = Some(time.now_ms);
        }

        let ctx = PursuitContext {
            position: *pos,
            target: player_pos,
            observation_radius: config.enemy_observation_radius,
            min_engage_distance: config.enemy_min_engage_distance,
        };
        if let Some(waypoint) = pursuit::evaluate(&ctx, grid).waypoint() {
            let desired = pursuit::step_toward(*pos, waypoint, step);
            let (dx, dy) = resolve_movement(grid, *pos, hitbox, desired.x, desired.y);
            *pos = pos.moved_by(dx, dy);
        }

        if strikes {
            strike_player(world, player, events);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// One point of melee damage to the player.
fn strike_player(world: &mut World, player: Entity, events: &mut Vec<SimEvent>) {
    if let Ok(mut mob) = world.get::<&mut Mob>(player) {
        mob.take_damage(1);
        log::debug!("Player hit, health {}", mob.health);
        events.push(SimEvent::PlayerHit { health: mob.health });
    }
}
