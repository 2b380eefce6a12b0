//! Breadth-first shortest paths over 4-connected walkable tiles.

use std::collections::VecDeque;

use delve_core::types::TileCoord;

use crate::grid::TileGrid;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("No walkable path from {from:?} to {to:?}")]
    Unreachable { from: TileCoord, to: TileCoord },

    #[error("Path endpoint {0:?} is a wall or outside the grid")]
    BlockedEndpoint(TileCoord),
}

/// Per-tile step distances from one source, produced by a BFS sweep.
#[derive(Debug, Clone)]
pub struct DistanceField {
    width: u32,
    dist: Vec<Option<u32>>,
}

impl DistanceField {
    /// Steps from the source, or `None` if not reached.
    pub fn get(&self, grid: &TileGrid, coord: TileCoord) -> Option<u32> {
        if !grid.in_bounds(coord) {
            return None;
        }
        self.dist[coord.y as usize * self.width as usize + coord.x as usize]
    }
}

/// BFS from `from`, stopping early once `stop_at` is settled.
fn sweep(grid: &TileGrid, from: TileCoord, stop_at: Option<TileCoord>) -> DistanceField {
    let width = grid.width();
    let index = |c: TileCoord| c.y as usize * width as usize + c.x as usize;
    let mut dist = vec![None; (grid.width() * grid.height()) as usize];
    let mut frontier = VecDeque::new();

    dist[index(from)] = Some(0);
    frontier.push_back(from);

    while let Some(current) = frontier.pop_front() {
        if Some(current) == stop_at {
            break;
        }
        let next = dist[index(current)].map_or(0, |d| d + 1);
        for neighbor in current.neighbors4() {
            if grid.is_walkable(neighbor) && dist[index(neighbor)].is_none() {
                dist[index(neighbor)] = Some(next);
                frontier.push_back(neighbor);
            }
        }
    }

    DistanceField { width, dist }
}

/// Step distances from `from` to every reachable tile.
pub fn distance_field(grid: &TileGrid, from: TileCoord) -> Result<DistanceField, PathError> {
    if !grid.is_walkable(from) {
        return Err(PathError::BlockedEndpoint(from));
    }
    Ok(sweep(grid, from, None))
}

/// Shortest path from `from` to `to`, both ends inclusive.
///
/// Walls and out-of-range endpoints are rejected up front, and an
/// unreachable target is reported instead of reconstructed.
pub fn find_path(grid: &TileGrid, from: TileCoord, to: TileCoord) -> Result<Vec<TileCoord>, PathError> {
    for endpoint in [from, to] {
        if !grid.is_walkable(endpoint) {
            return Err(PathError::BlockedEndpoint(endpoint));
        }
    }

    let field = sweep(grid, from, Some(to));
    let Some(length) = field.get(grid, to) else {
        log::trace!("No path from {:?} to {:?}", from, to);
        return Err(PathError::Unreachable { from, to });
    };

    // Walk back from the target, always to a neighbour one step closer.
    let mut path = Vec::with_capacity(length as usize + 1);
    let mut current = to;
    path.push(current);
    for step in (0..length).rev() {
        let previous = current
            .neighbors4()
            .into_iter()
            .find(|n| field.get(grid, *n) == Some(step))
            .ok_or(PathError::Unreachable { from, to })?;
        path.push(previous);
        current = previous;
    }
    path.reverse();

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{grid_from_rows, random_grid, random_tile};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn assert_valid_path(grid: &TileGrid, path: &[TileCoord], from: TileCoord, to: TileCoord) {
        assert_eq!(path.first(), Some(&from), "Path starts at the source");
        assert_eq!(path.last(), Some(&to), "Path ends at the target");
        for pair in path.windows(2) {
            let (dx, dy) = ((pair[1].x - pair[0].x).abs(), (pair[1].y - pair[0].y).abs());
            assert_eq!(dx + dy, 1, "Steps are 4-adjacent: {:?} -> {:?}", pair[0], pair[1]);
        }
        assert!(path.iter().all(|t| grid.is_walkable(*t)), "Every waypoint is floor");
    }

    #[test]
    fn test_straight_corridor() {
        let grid = grid_from_rows(&["......"]);
        let path = find_path(&grid, TileCoord::new(0, 0), TileCoord::new(5, 0)).unwrap();
        assert_eq!(path.len(), 6);
        assert_valid_path(&grid, &path, TileCoord::new(0, 0), TileCoord::new(5, 0));
    }

    #[test]
    fn test_detour_around_wall() {
        let grid = grid_from_rows(&[
            ".....",
            ".###.",
            ".#...",
            ".#.#.",
            "...#.",
        ]);
        let from = TileCoord::new(2, 2);
        let to = TileCoord::new(0, 0);
        let path = find_path(&grid, from, to).unwrap();
        assert_valid_path(&grid, &path, from, to);
        // Around the bottom or the right side, both 8 steps
        assert_eq!(path.len(), 9);
    }

    #[test]
    fn test_same_tile_is_single_waypoint() {
        let grid = grid_from_rows(&["..", ".."]);
        let path = find_path(&grid, TileCoord::new(1, 1), TileCoord::new(1, 1)).unwrap();
        assert_eq!(path, vec![TileCoord::new(1, 1)]);
    }

    #[test]
    fn test_unreachable_target_is_an_error() {
        let grid = grid_from_rows(&["..#..", "..#..", "..#.."]);
        let err = find_path(&grid, TileCoord::new(0, 0), TileCoord::new(4, 2)).unwrap_err();
        assert_eq!(
            err,
            PathError::Unreachable {
                from: TileCoord::new(0, 0),
                to: TileCoord::new(4, 2)
            }
        );
    }

    #[test]
    fn test_blocked_endpoints_rejected() {
        let grid = grid_from_rows(&[".#."]);
        assert_eq!(
            find_path(&grid, TileCoord::new(0, 0), TileCoord::new(1, 0)),
            Err(PathError::BlockedEndpoint(TileCoord::new(1, 0)))
        );
        assert_eq!(
            find_path(&grid, TileCoord::new(-1, 0), TileCoord::new(0, 0)),
            Err(PathError::BlockedEndpoint(TileCoord::new(-1, 0)))
        );
    }

    /// Plain BFS distance without early exit, used as the reference.
    fn reference_distance(grid: &TileGrid, from: TileCoord, to: TileCoord) -> Option<u32> {
        let mut seen = std::collections::HashMap::new();
        let mut queue = VecDeque::from([(from, 0u32)]);
        seen.insert(from, 0u32);
        while let Some((c, d)) = queue.pop_front() {
            for n in c.neighbors4() {
                if grid.is_walkable(n) && !seen.contains_key(&n) {
                    seen.insert(n, d + 1);
                    queue.push_back((n, d + 1));
                }
            }
        }
        seen.get(&to).copied()
    }

    #[test]
    fn test_paths_are_optimal_on_random_grids() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let mut found = 0;
        for _ in 0..300 {
            let grid = random_grid(&mut rng, 14, 10, 0.3);
            let from = random_tile(&mut rng, &grid);
            let to = random_tile(&mut rng, &grid);
            if !grid.is_walkable(from) || !grid.is_walkable(to) {
                continue;
            }
            match (find_path(&grid, from, to), reference_distance(&grid, from, to)) {
                (Ok(path), Some(d)) => {
                    found += 1;
                    assert_eq!(path.len() as u32 - 1, d, "Path length matches BFS distance");
                    assert_valid_path(&grid, &path, from, to);
                }
                (Err(PathError::Unreachable { .. }), None) => {}
                (got, want) => panic!("Mismatch {from:?}->{to:?}: {got:?} vs {want:?}"),
            }
        }
        assert!(found > 50, "Sampled enough reachable pairs ({found})");
    }

    #[test]
    fn test_distance_field_matches_reference() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let grid = random_grid(&mut rng, 12, 12, 0.25);
        let Some(source) = grid.tiles().find(|t| t.kind.is_walkable()).map(|t| t.coord) else {
            return;
        };
        let field = distance_field(&grid, source).unwrap();
        for tile in grid.tiles() {
            assert_eq!(
                field.get(&grid, tile.coord),
                reference_distance(&grid, source, tile.coord),
                "Distance to {:?}",
                tile.coord
            );
        }
    }
}
