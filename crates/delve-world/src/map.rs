//! Raster map loader.
//!
//! Each pixel becomes one tile. Colours map to tile types and spawn markers:
//!
//! | RGB            | meaning              |
//! |----------------|----------------------|
//! | 255, 255, 255  | wall                 |
//! | 0, 0, 0        | floor                |
//! | 0, 255, 0      | floor + player start |
//! | 0, 0, 255      | floor + key spawn    |
//! | 255, 0, 0      | floor + enemy spawn  |

use std::path::Path;

use delve_core::config::DelveConfig;
use delve_core::enums::{SpawnMarker, TileKind};
use delve_core::types::TileCoord;

use crate::grid::TileGrid;

const WALL: [u8; 3] = [255, 255, 255];
const FLOOR: [u8; 3] = [0, 0, 0];
const PLAYER_START: [u8; 3] = [0, 255, 0];
const KEY_SPAWN: [u8; 3] = [0, 0, 255];
const ENEMY_SPAWN: [u8; 3] = [255, 0, 0];

/// Colour used for characters a text map does not recognise.
const UNKNOWN: [u8; 3] = [128, 128, 128];

/// Map loading failures. All of them abort startup.
#[derive(thiserror::Error, Debug)]
pub enum MapLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Map has no pixels")]
    Empty,

    #[error("Unknown map colour {rgb:?} at ({x}, {y})")]
    UnknownColor { x: u32, y: u32, rgb: [u8; 3] },

    #[error("Map has no player start")]
    MissingPlayerStart,

    #[error("Map has two player starts: {first:?} and {second:?}")]
    DuplicatePlayerStart { first: TileCoord, second: TileCoord },
}

/// Per-pixel colour lookup provided by an image decoder.
pub trait PixelSource {
    /// (width, height) in pixels.
    fn dimensions(&self) -> (u32, u32);
    /// RGB colour of a pixel. Only called with in-range coordinates.
    fn rgb(&self, x: u32, y: u32) -> [u8; 3];
}

impl PixelSource for image::RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        image::RgbImage::dimensions(self)
    }

    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        self.get_pixel(x, y).0
    }
}

/// Hand-written map, one string per row.
///
/// `#` wall, `.` floor, `P` player start, `E` enemy, `K` key.
/// Short rows are padded with an unknown colour, so ragged input is rejected.
#[derive(Debug, Clone)]
pub struct TextMap {
    rows: Vec<Vec<u8>>,
    width: u32,
}

impl TextMap {
    pub fn new<S: AsRef<str>>(rows: &[S]) -> Self {
        let rows: Vec<Vec<u8>> = rows.iter().map(|r| r.as_ref().bytes().collect()).collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
        Self { rows, width }
    }

    pub fn parse(text: &str) -> Self {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .collect();
        Self::new(&rows)
    }
}

impl PixelSource for TextMap {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.rows.len() as u32)
    }

    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        match self.rows[y as usize].get(x as usize) {
            Some(b'#') => WALL,
            Some(b'.') => FLOOR,
            Some(b'P') => PLAYER_START,
            Some(b'K') => KEY_SPAWN,
            Some(b'E') => ENEMY_SPAWN,
            _ => UNKNOWN,
        }
    }
}

/// A parsed map: the grid plus spawn locations in reading order.
#[derive(Debug, Clone)]
pub struct LoadedMap {
    pub grid: TileGrid,
    pub player_start: TileCoord,
    pub enemy_spawns: Vec<TileCoord>,
    pub key_spawns: Vec<TileCoord>,
}

/// Decode one pixel colour.
fn decode(rgb: [u8; 3]) -> Option<(TileKind, Option<SpawnMarker>)> {
    match rgb {
        WALL => Some((TileKind::Wall, None)),
        FLOOR => Some((TileKind::Floor, None)),
        PLAYER_START => Some((TileKind::Floor, Some(SpawnMarker::PlayerStart))),
        KEY_SPAWN => Some((TileKind::Floor, Some(SpawnMarker::Key))),
        ENEMY_SPAWN => Some((TileKind::Floor, Some(SpawnMarker::Enemy))),
        _ => None,
    }
}

/// Build a map from any pixel source.
pub fn parse_map(source: &impl PixelSource, config: &DelveConfig) -> Result<LoadedMap, MapLoadError> {
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Err(MapLoadError::Empty);
    }

    let mut kinds = Vec::with_capacity((width * height) as usize);
    let mut player_start: Option<TileCoord> = None;
    let mut enemy_spawns = Vec::new();
    let mut key_spawns = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let rgb = source.rgb(x, y);
            let (kind, marker) = decode(rgb).ok_or(MapLoadError::UnknownColor { x, y, rgb })?;
            let coord = TileCoord::new(x as i32, y as i32);
            match marker {
                Some(SpawnMarker::PlayerStart) => {
                    if let Some(first) = player_start {
                        return Err(MapLoadError::DuplicatePlayerStart {
                            first,
                            second: coord,
                        });
                    }
                    player_start = Some(coord);
                }
                Some(SpawnMarker::Enemy) => enemy_spawns.push(coord),
                Some(SpawnMarker::Key) => key_spawns.push(coord),
                None => {}
            }
            kinds.push(kind);
        }
    }

    let player_start = player_start.ok_or(MapLoadError::MissingPlayerStart)?;

    let grid = TileGrid::from_fn(width, height, config.tile_size, config.viewport_size, |c| {
        kinds[c.y as usize * width as usize + c.x as usize]
    });

    log::info!(
        "Loaded {}x{} map: {} walls, {} enemies, {} keys",
        width,
        height,
        grid.count(TileKind::Wall),
        enemy_spawns.len(),
        key_spawns.len()
    );

    Ok(LoadedMap {
        grid,
        player_start,
        enemy_spawns,
        key_spawns,
    })
}

/// Load a map file. `.txt` files are read as `TextMap`; anything else is
/// decoded as an image.
pub fn load_map(path: &Path, config: &DelveConfig) -> Result<LoadedMap, MapLoadError> {
    log::debug!("Loading map from {:?}", path);
    let is_text = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
    if is_text {
        let text = std::fs::read_to_string(path)?;
        parse_map(&TextMap::parse(&text), config)
    } else {
        let image = image::open(path)?.to_rgb8();
        parse_map(&image, config)
    }
}
