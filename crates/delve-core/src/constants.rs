//! Simulation constants and tuning parameters.
//!
//! These are the defaults behind `DelveConfig`; a config file may override them.

// --- World layout ---

/// Edge length of one tile in pixels.
pub const TILE_SIZE: f64 = 32.0;

/// Viewport size in pixels (width, height).
pub const VIEWPORT_SIZE: (u32, u32) = (640, 480);

// --- Timing ---

/// Upper bound on the elapsed time fed into a single tick (milliseconds).
/// Frame spikes beyond this are truncated so movement cannot skip walls.
pub const MAX_FRAME_MS: u64 = 100;

// --- Player ---

/// Player movement speed (pixels per second): 3 tiles per second.
pub const PLAYER_SPEED: f64 = 3.0 * TILE_SIZE;

/// Starting player health.
pub const PLAYER_HEALTH: u32 = 5;

/// Minimum time between two player attacks (milliseconds).
pub const PLAYER_ATTACK_PERIOD_MS: u64 = 333;

/// Player hitbox edge (pixels).
pub const PLAYER_HITBOX: f64 = 24.0;

// --- Enemies ---

/// Enemies move at this fraction of the player's base speed.
pub const ENEMY_SPEED_FACTOR: f64 = 0.5;

/// Starting enemy health.
pub const ENEMY_HEALTH: u32 = 3;

/// Minimum time between two melee hits from the same enemy (milliseconds).
pub const ENEMY_ATTACK_PERIOD_MS: u64 = 1000;

/// Enemies ignore the player beyond this distance (tiles).
pub const ENEMY_OBSERVATION_RADIUS: f64 = 8.0;

/// Enemies stop closing in below this distance (tiles).
pub const ENEMY_MIN_ENGAGE_DISTANCE: f64 = 0.5;

/// Enemy hitbox edge (pixels).
pub const ENEMY_HITBOX: f64 = 24.0;

// --- Projectiles ---

/// Bullet speed (pixels per second): 8 tiles per second.
pub const BULLET_SPEED: f64 = 8.0 * TILE_SIZE;

/// Bullet hitbox edge (pixels).
pub const BULLET_HITBOX: f64 = 8.0;

// --- Pickups ---

/// Key hitbox edge (pixels).
pub const KEY_HITBOX: f64 = 16.0;

// --- Lighting ---

/// Square light radius in tiles.
pub const LIGHT_RADIUS: i32 = 7;

/// Keeps the falloff finite at distance zero.
pub const LIGHT_FALLOFF_EPSILON: f64 = 1e-3;
