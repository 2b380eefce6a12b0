//! Tile world for Delve.
//!
//! Map loading, the tile grid and its chunk partition, collision
//! resolution, line-of-sight, dynamic lighting and grid pathfinding.

pub use delve_core as core;

pub mod camera;
pub mod collision;
pub mod grid;
pub mod lighting;
pub mod los;
pub mod map;
pub mod pathfind;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export key types for convenience.
pub use camera::Camera;
pub use collision::resolve_movement;
pub use grid::{Chunk, Tile, TileGrid};
pub use los::has_line_of_sight;
pub use map::{load_map, parse_map, LoadedMap, MapLoadError, PixelSource, TextMap};
pub use pathfind::{find_path, PathError};
