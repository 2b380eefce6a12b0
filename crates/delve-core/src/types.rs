//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in world space (pixels, continuous).
/// x grows to the right, y grows downward, matching raster map rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in world space (pixels per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Integer grid coordinates of a tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

/// Axis-aligned box in world space. `min` is inclusive, `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec2,
    pub max: DVec2,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Accumulated simulation time in milliseconds.
    pub now_ms: u64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn from_dvec2(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }

    /// Offset by a movement delta.
    pub fn moved_by(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The tile containing this position.
    pub fn to_tile(&self, tile_size: f64) -> TileCoord {
        TileCoord {
            x: (self.x / tile_size).floor() as i32,
            y: (self.y / tile_size).floor() as i32,
        }
    }

    /// Euclidean distance to another position, measured in tiles.
    pub fn tile_distance_to(&self, other: &Position, tile_size: f64) -> f64 {
        self.as_dvec2().distance(other.as_dvec2()) / tile_size
    }

    /// Box of the given size centred on this position.
    pub fn centered_box(&self, width: f64, height: f64) -> Aabb {
        let half = DVec2::new(width / 2.0, height / 2.0);
        Aabb {
            min: self.as_dvec2() - half,
            max: self.as_dvec2() + half,
        }
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_dvec2(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl TileCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Centre of the tile in world space.
    pub fn center(&self, tile_size: f64) -> Position {
        Position {
            x: (self.x as f64 + 0.5) * tile_size,
            y: (self.y as f64 + 0.5) * tile_size,
        }
    }

    /// World-space box covered by the tile.
    pub fn bounds(&self, tile_size: f64) -> Aabb {
        let min = DVec2::new(self.x as f64 * tile_size, self.y as f64 * tile_size);
        Aabb {
            min,
            max: min + DVec2::splat(tile_size),
        }
    }

    /// Euclidean distance to another tile, in tiles.
    pub fn distance_to(&self, other: &TileCoord) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Chebyshev distance (max of axis distances).
    pub fn chebyshev_to(&self, other: &TileCoord) -> i32 {
        (other.x - self.x).abs().max((other.y - self.y).abs())
    }

    /// The four edge-adjacent neighbours, in a fixed order: up, right, down, left.
    pub fn neighbors4(&self) -> [TileCoord; 4] {
        [
            TileCoord::new(self.x, self.y - 1),
            TileCoord::new(self.x + 1, self.y),
            TileCoord::new(self.x, self.y + 1),
            TileCoord::new(self.x - 1, self.y),
        ]
    }
}

impl Aabb {
    /// Strict overlap: boxes that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

impl SimTime {
    /// Advance by one tick covering `elapsed_ms` of simulated time.
    pub fn advance(&mut self, elapsed_ms: u64) {
        self.tick += 1;
        self.now_ms += elapsed_ms;
    }
}
