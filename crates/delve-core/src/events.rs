//! Events emitted by the simulation for audio and HUD feedback.

use serde::{Deserialize, Serialize};

use crate::types::Position;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// Player spawned a bullet.
    BulletFired { origin: Position },
    /// Bullet stopped against a wall.
    BulletBlocked { position: Position },
    /// Bullet damaged an enemy.
    EnemyHit { serial: u64, health: u32 },
    /// Enemy removed after reaching zero health.
    EnemyKilled { serial: u64 },
    /// Enemy melee hit on the player.
    PlayerHit { health: u32 },
    /// Key picked up.
    KeyCollected { keys_remaining: u32 },
    /// All keys collected.
    Won,
    /// Player health reached zero.
    Lost,
}
