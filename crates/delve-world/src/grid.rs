//! TileGrid: static tile layout with per-tile darkness and a fixed chunk partition.

use delve_core::enums::TileKind;
use delve_core::types::TileCoord;

/// One grid cell.
#[derive(Debug, Clone)]
pub struct Tile {
    pub coord: TileCoord,
    pub kind: TileKind,
    /// 0.0 = fully lit, 1.0 = unlit. Always within [0, 1].
    darkness: f32,
}

impl Tile {
    pub fn darkness(&self) -> f32 {
        self.darkness
    }
}

/// Fixed bucket of tiles used for "near the camera" enumeration.
/// Membership is decided at construction and never changes.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Chunk coordinates (in chunks, not tiles).
    pub coord: TileCoord,
    /// Indices into the grid's tile storage.
    tile_indices: Vec<usize>,
}

impl Chunk {
    pub fn tile_indices(&self) -> &[usize] {
        &self.tile_indices
    }

    pub fn len(&self) -> usize {
        self.tile_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tile_indices.is_empty()
    }
}

/// Loaded tile grid.
#[derive(Debug, Clone)]
pub struct TileGrid {
    width: u32,
    height: u32,
    /// Edge length of one tile in pixels.
    tile_size: f64,
    /// Row-major tiles (top to bottom, left to right).
    tiles: Vec<Tile>,
    /// Chunk edge in tiles (x, y).
    chunk_size: (u32, u32),
    /// Number of chunks along each axis.
    chunk_counts: (u32, u32),
    /// Row-major chunks.
    chunks: Vec<Chunk>,
}

impl TileGrid {
    /// Build a grid by asking `kind_at` for every cell. Chunks are sized so
    /// that one chunk spans at least a full viewport along each axis.
    pub fn from_fn(
        width: u32,
        height: u32,
        tile_size: f64,
        viewport_px: (u32, u32),
        mut kind_at: impl FnMut(TileCoord) -> TileKind,
    ) -> Self {
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let coord = TileCoord::new(x, y);
                tiles.push(Tile {
                    coord,
                    kind: kind_at(coord),
                    darkness: 1.0,
                });
            }
        }

        let chunk_size = (
            ((viewport_px.0 as f64 / tile_size).ceil() as u32).max(1),
            ((viewport_px.1 as f64 / tile_size).ceil() as u32).max(1),
        );
        let chunk_counts = (width.div_ceil(chunk_size.0), height.div_ceil(chunk_size.1));

        let mut chunks = Vec::with_capacity((chunk_counts.0 * chunk_counts.1) as usize);
        for cy in 0..chunk_counts.1 {
            for cx in 0..chunk_counts.0 {
                let x0 = cx * chunk_size.0;
                let y0 = cy * chunk_size.1;
                let x1 = (x0 + chunk_size.0).min(width);
                let y1 = (y0 + chunk_size.1).min(height);
                let mut tile_indices = Vec::with_capacity(((x1 - x0) * (y1 - y0)) as usize);
                for y in y0..y1 {
                    for x in x0..x1 {
                        tile_indices.push((y * width + x) as usize);
                    }
                }
                chunks.push(Chunk {
                    coord: TileCoord::new(cx as i32, cy as i32),
                    tile_indices,
                });
            }
        }

        Self {
            width,
            height,
            tile_size,
            tiles,
            chunk_size,
            chunk_counts,
            chunks,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    pub fn chunk_size(&self) -> (u32, u32) {
        self.chunk_size
    }

    /// Grid extent in pixels.
    pub fn pixel_size(&self) -> (f64, f64) {
        (
            self.width as f64 * self.tile_size,
            self.height as f64 * self.tile_size,
        )
    }

    pub fn in_bounds(&self, coord: TileCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as u32) < self.width
            && (coord.y as u32) < self.height
    }

    fn index(&self, coord: TileCoord) -> Option<usize> {
        if !self.in_bounds(coord) {
            return None;
        }
        Some(coord.y as usize * self.width as usize + coord.x as usize)
    }

    pub fn tile(&self, coord: TileCoord) -> Option<&Tile> {
        self.index(coord).map(|i| &self.tiles[i])
    }

    pub fn tile_at_index(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn kind(&self, coord: TileCoord) -> Option<TileKind> {
        self.tile(coord).map(|t| t.kind)
    }

    /// Fails closed: out-of-range coordinates are never walkable.
    pub fn is_walkable(&self, coord: TileCoord) -> bool {
        self.kind(coord).is_some_and(TileKind::is_walkable)
    }

    /// Darkness of a tile, or `None` outside the grid.
    pub fn darkness(&self, coord: TileCoord) -> Option<f32> {
        self.tile(coord).map(Tile::darkness)
    }

    /// Set darkness, clamped to [0, 1]. Out-of-range writes are ignored.
    pub(crate) fn set_darkness(&mut self, coord: TileCoord, darkness: f32) {
        if let Some(i) = self.index(coord) {
            self.tiles[i].darkness = darkness.clamp(0.0, 1.0);
        }
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Chunk coordinates containing a tile, or `None` outside the grid.
    pub fn chunk_of(&self, coord: TileCoord) -> Option<TileCoord> {
        if !self.in_bounds(coord) {
            return None;
        }
        Some(TileCoord::new(
            coord.x / self.chunk_size.0 as i32,
            coord.y / self.chunk_size.1 as i32,
        ))
    }

    /// The 3×3 chunk neighbourhood around the chunk containing `coord`,
    /// clipped to the grid. Empty for out-of-range coordinates.
    pub fn chunks_near(&self, coord: TileCoord) -> Vec<&Chunk> {
        let Some(center) = self.chunk_of(coord) else {
            return Vec::new();
        };
        let mut near = Vec::with_capacity(9);
        for cy in center.y - 1..=center.y + 1 {
            for cx in center.x - 1..=center.x + 1 {
                if cx < 0
                    || cy < 0
                    || cx as u32 >= self.chunk_counts.0
                    || cy as u32 >= self.chunk_counts.1
                {
                    continue;
                }
                near.push(&self.chunks[cy as usize * self.chunk_counts.0 as usize + cx as usize]);
            }
        }
        near
    }

    /// Count of tiles of a given kind.
    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|t| t.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::grid_from_rows;

    #[test]
    fn test_out_of_range_not_walkable() {
        let grid = grid_from_rows(&["...", ".#.", "..."]);
        assert!(grid.is_walkable(TileCoord::new(0, 0)));
        assert!(!grid.is_walkable(TileCoord::new(1, 1)), "Wall");
        assert!(!grid.is_walkable(TileCoord::new(-1, 0)));
        assert!(!grid.is_walkable(TileCoord::new(3, 0)));
        assert!(!grid.is_walkable(TileCoord::new(0, 3)));
        assert!(grid.tile(TileCoord::new(5, 5)).is_none());
    }

    #[test]
    fn test_tiles_start_dark() {
        let grid = grid_from_rows(&["..", ".."]);
        assert!(grid.tiles().all(|t| (t.darkness() - 1.0).abs() < f32::EPSILON));
    }

    #[test]
    fn test_set_darkness_clamps() {
        let mut grid = grid_from_rows(&["..", ".."]);
        grid.set_darkness(TileCoord::new(0, 0), -0.5);
        grid.set_darkness(TileCoord::new(1, 0), 3.0);
        grid.set_darkness(TileCoord::new(9, 9), 0.0);
        assert_eq!(grid.darkness(TileCoord::new(0, 0)), Some(0.0));
        assert_eq!(grid.darkness(TileCoord::new(1, 0)), Some(1.0));
        assert_eq!(grid.darkness(TileCoord::new(9, 9)), None);
    }

    #[test]
    fn test_chunk_size_from_viewport() {
        // 640×480 viewport at 32 px → 20×15 tiles per chunk
        let grid = TileGrid::from_fn(50, 40, 32.0, (640, 480), |_| TileKind::Floor);
        assert_eq!(grid.chunk_size(), (20, 15));
        // 50/20 → 3 columns, 40/15 → 3 rows
        assert_eq!(grid.chunks().len(), 9);

        // Non-integer ratio rounds up: 100 / 32 = 3.125 → 4
        let grid = TileGrid::from_fn(10, 10, 32.0, (100, 100), |_| TileKind::Floor);
        assert_eq!(grid.chunk_size(), (4, 4));
    }

    #[test]
    fn test_chunks_partition_every_tile_once() {
        let grid = TileGrid::from_fn(23, 17, 32.0, (160, 128), |_| TileKind::Floor);
        let mut seen = vec![0u32; 23 * 17];
        for chunk in grid.chunks() {
            for &i in chunk.tile_indices() {
                seen[i] += 1;
            }
        }
        assert!(seen.iter().all(|&n| n == 1), "Every tile in exactly one chunk");
    }

    #[test]
    fn test_chunks_near_interior_and_corner() {
        // 4×4-tile chunks over a 16×16 grid → 4×4 chunks
        let grid = TileGrid::from_fn(16, 16, 32.0, (128, 128), |_| TileKind::Floor);
        assert_eq!(grid.chunk_size(), (4, 4));

        let interior = grid.chunks_near(TileCoord::new(6, 6));
        assert_eq!(interior.len(), 9);

        let corner = grid.chunks_near(TileCoord::new(0, 0));
        assert_eq!(corner.len(), 4, "Clipped to grid extent");
        let coords: Vec<TileCoord> = corner.iter().map(|c| c.coord).collect();
        assert!(coords.contains(&TileCoord::new(0, 0)));
        assert!(coords.contains(&TileCoord::new(1, 1)));

        let edge = grid.chunks_near(TileCoord::new(15, 8));
        assert_eq!(edge.len(), 6);

        assert!(grid.chunks_near(TileCoord::new(-1, 3)).is_empty());
        assert!(grid.chunks_near(TileCoord::new(16, 3)).is_empty());
    }

    #[test]
    fn test_count_kinds() {
        let grid = grid_from_rows(&["#.#", "...", "###"]);
        assert_eq!(grid.count(TileKind::Wall), 5);
        assert_eq!(grid.count(TileKind::Floor), 4);
    }
}
