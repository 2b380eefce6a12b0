//! World snapshot: the read-only view handed to the render/HUD collaborator
//! after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{Outcome, TileKind};
use crate::events::SimEvent;
use crate::types::{Position, SimTime, TileCoord, Velocity};

/// Complete visible state after one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub outcome: Outcome,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    pub keys: Vec<KeyView>,
    pub keys_remaining: u32,
    /// Top-left corner of the viewport in world space.
    pub camera_offset: Position,
    /// Tiles from the chunk neighbourhood around the camera.
    pub tiles: Vec<TileView>,
    pub events: Vec<SimEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub health: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub serial: u64,
    pub position: Position,
    pub health: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub position: Position,
    pub velocity: Velocity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyView {
    pub position: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileView {
    pub coord: TileCoord,
    pub kind: TileKind,
    pub darkness: f32,
    /// Alpha of the black overlay drawn over the tile (0 = clear, 255 = opaque).
    pub overlay_alpha: u8,
}
