//! Enemy AI for Delve.
//!
//! Decides where an enemy heads each tick: straight at the player when it
//! can see them, along a BFS path when walls are in the way, or nowhere when
//! the player is out of range.

pub mod pursuit;

pub use delve_core as core;
