//! Player system: held-key movement and rate-limited shooting.

use hecs::{Entity, World};

use delve_core::commands::MoveIntent;
use delve_core::components::{Hitbox, LightSource, Mob};
use delve_core::config::DelveConfig;
use delve_core::events::SimEvent;
use delve_core::types::{Position, Velocity};
use delve_world::{resolve_movement, TileGrid};

use crate::world_setup::spawn_bullet;

/// Move the player by the held keys and drag its light along.
///
/// Axes are not normalised: a diagonal moves at full speed on both axes.
pub fn run(
    world: &mut World,
    grid: &TileGrid,
    config: &DelveConfig,
    player: Entity,
    intent: MoveIntent,
    elapsed_secs: f64,
) {
    let Ok((pos, hitbox, light)) =
        world.query_one_mut::<(&mut Position, &Hitbox, &mut LightSource)>(player)
    else {
        return;
    };

    let (ax, ay) = intent.axes();
    let step = config.player_speed * elapsed_secs;
    if ax != 0.0 || ay != 0.0 {
        let (dx, dy) = resolve_movement(grid, *pos, hitbox, ax * step, ay * step);
        *pos = pos.moved_by(dx, dy);
    }
    light.new_position = *pos;
}

/// Fire a bullet from the player toward `target`.
///
/// Returns `None` while the attack is on cooldown, or when `target` is the
/// player's own position (no direction to fire in).
pub fn fire(
    world: &mut World,
    config: &DelveConfig,
    player: Entity,
    target: Position,
    now_ms: u64,
    serial: &mut u64,
    events: &mut Vec<SimEvent>,
) -> Option<Entity> {
    let (mob, pos) = world.query_one_mut::<(&mut Mob, &Position)>(player).ok()?;
    if !mob.attack_ready(now_ms, config.player_attack_period_ms) {
        return None;
    }

    let direction = (target.as_dvec2() - pos.as_dvec2()).normalize_or_zero();
    if direction == glam::DVec2::ZERO {
        return None;
    }
    mob.last_attack_ms = Some(now_ms);
    let origin = *pos;

    let velocity = Velocity::from_dvec2(direction * config.bullet_speed);
    events.push(SimEvent::BulletFired { origin });
    Some(spawn_bullet(world, config, origin, velocity, serial))
}
