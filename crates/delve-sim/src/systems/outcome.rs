//! Win/lose evaluation.

use hecs::{Entity, World};

use delve_core::components::Mob;
use delve_core::enums::Outcome;

/// Outcome after this tick's updates. A dead player loses even if the last
/// key was picked up in the same tick.
pub fn evaluate(world: &World, player: Entity, keys_remaining: u32) -> Outcome {
    let player_dead = world.get::<&Mob>(player).map_or(true, |mob| mob.is_dead());
    if player_dead {
        Outcome::Lost
    } else if keys_remaining == 0 {
        Outcome::Won
    } else {
        Outcome::Playing
    }
}
