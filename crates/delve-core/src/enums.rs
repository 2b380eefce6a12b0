//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Static tile type, fixed at map load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Floor,
    Wall,
}

impl TileKind {
    pub fn is_walkable(self) -> bool {
        self == TileKind::Floor
    }
}

/// Spawn marker decoded from the map alongside the tile type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnMarker {
    PlayerStart,
    Enemy,
    Key,
}

/// Tag distinguishing the two kinds of mob sharing the `Mob` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MobKind {
    Player,
    Enemy,
}

/// Top-level game outcome. `Won` and `Lost` are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Playing,
    Won,
    Lost,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Playing)
    }
}
