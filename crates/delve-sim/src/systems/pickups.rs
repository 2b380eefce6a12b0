//! Pickup system: keys touched by the player are collected.

use hecs::{Entity, World};

use delve_core::components::Key;
use delve_core::events::SimEvent;

use super::{bounds_of, in_spawn_order};

/// Collect every key overlapping the player.
pub fn run(
    world: &mut World,
    player: Entity,
    keys_remaining: &mut u32,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<SimEvent>,
) {
    despawn_buffer.clear();
    let Some(player_box) = bounds_of(world, player) else {
        return;
    };

    for key in in_spawn_order::<Key>(world) {
        if bounds_of(world, key).is_some_and(|b| b.overlaps(&player_box)) {
            despawn_buffer.push(key);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
        *keys_remaining = keys_remaining.saturating_sub(1);
        log::debug!("Key collected, {} remaining", keys_remaining);
        events.push(SimEvent::KeyCollected {
            keys_remaining: *keys_remaining,
        });
    }
}
