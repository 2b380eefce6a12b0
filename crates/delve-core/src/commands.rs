//! Player commands sent from the input collaborator to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// Currently held movement keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    /// Per-axis direction in {-1, 0, 1}. Up wins over down and right wins
    /// over left when both keys of an axis are held.
    pub fn axes(&self) -> (f64, f64) {
        let x = if self.right {
            1.0
        } else if self.left {
            -1.0
        } else {
            0.0
        };
        let y = if self.up {
            -1.0
        } else if self.down {
            1.0
        } else {
            0.0
        };
        (x, y)
    }
}

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Replace the held movement keys. Persists until the next `SetMovement`.
    SetMovement { intent: MoveIntent },
    /// Fire toward a world-space point (pointer position plus camera offset).
    Attack { target: Position },
}
