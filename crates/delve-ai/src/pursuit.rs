//! Enemy pursuit decision.
//!
//! Pure functions over plain data and a read-only grid. No ECS dependency.

use glam::DVec2;

use delve_core::types::Position;
use delve_world::los::has_line_of_sight;
use delve_world::pathfind::find_path;
use delve_world::TileGrid;

/// Input to the pursuit decision for a single enemy.
#[derive(Debug, Clone, Copy)]
pub struct PursuitContext {
    pub position: Position,
    pub target: Position,
    /// Ignore the target beyond this distance (tiles).
    pub observation_radius: f64,
    /// Stop closing in below this distance (tiles).
    pub min_engage_distance: f64,
}

/// Where the enemy should head this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PursuitDecision {
    /// Stay put: target too far or already close enough.
    Hold,
    /// Clear line of sight (or no path): head straight for the target.
    Direct(Position),
    /// Walls in the way: head for the centre of the next tile on the path.
    FollowPath(Position),
}

impl PursuitDecision {
    /// The point to move toward, if any.
    pub fn waypoint(&self) -> Option<Position> {
        match self {
            PursuitDecision::Hold => None,
            PursuitDecision::Direct(p) | PursuitDecision::FollowPath(p) => Some(*p),
        }
    }
}

/// Decide the pursuit for one enemy.
pub fn evaluate(ctx: &PursuitContext, grid: &TileGrid) -> PursuitDecision {
    let tile_size = grid.tile_size();
    let distance = ctx.position.tile_distance_to(&ctx.target, tile_size);
    if distance > ctx.observation_radius || distance < ctx.min_engage_distance {
        return PursuitDecision::Hold;
    }

    let from = ctx.position.to_tile(tile_size);
    let to = ctx.target.to_tile(tile_size);
    if has_line_of_sight(grid, from, to) {
        return PursuitDecision::Direct(ctx.target);
    }

    match find_path(grid, from, to) {
        Ok(path) => match path.get(1) {
            Some(next) => PursuitDecision::FollowPath(next.center(tile_size)),
            None => PursuitDecision::Direct(ctx.target),
        },
        Err(e) => {
            log::trace!("Pursuit falling back to direct movement: {}", e);
            PursuitDecision::Direct(ctx.target)
        }
    }
}

/// Movement delta of length `distance` from `from` toward `toward`.
/// Zero when the two points coincide.
pub fn step_toward(from: Position, toward: Position, distance: f64) -> DVec2 {
    (toward.as_dvec2() - from.as_dvec2()).normalize_or_zero() * distance
}
