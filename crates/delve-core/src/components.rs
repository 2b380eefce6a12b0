//! ECS components for hecs entities.
//!
//! Components are plain data structs.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::MobKind;
use crate::types::Position;

/// Shared record for the player and enemies, dispatched on `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mob {
    pub kind: MobKind,
    /// Remaining health. Only ever decreases (saturating at zero).
    pub health: u32,
    /// Simulation time of the last attack, `None` if never attacked.
    pub last_attack_ms: Option<u64>,
}

impl Mob {
    pub fn new(kind: MobKind, health: u32) -> Self {
        Self {
            kind,
            health,
            last_attack_ms: None,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Whether at least `period_ms` has passed since the last attack.
    pub fn attack_ready(&self, now_ms: u64, period_ms: u64) -> bool {
        self.last_attack_ms
            .map_or(true, |last| now_ms.saturating_sub(last) >= period_ms)
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }
}

/// Fixed-size bounding box, centred on the entity's `Position`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hitbox {
    pub width: f64,
    pub height: f64,
}

impl Hitbox {
    pub fn square(size: f64) -> Self {
        Self {
            width: size,
            height: size,
        }
    }
}

/// Point light carried by an entity.
///
/// `new_position` follows the owner every tick; `old_position` is the
/// footprint still painted on the grid until the next recompute.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LightSource {
    pub old_position: Position,
    pub new_position: Position,
}

impl LightSource {
    pub fn at(position: Position) -> Self {
        Self {
            old_position: position,
            new_position: position,
        }
    }

    pub fn commit(&mut self) {
        self.old_position = self.new_position;
    }
}

/// Marks a projectile fired by the player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bullet;

/// Marks a key pickup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Key;

/// Monotonic spawn serial. Defines storage order independently of
/// archetype layout, which hecs reorders on despawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpawnOrder(pub u64);
