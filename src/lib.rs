//! Flappy Sim - simulation core for a side-scrolling gap-flying arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `settings`: Tuning values and variant presets
//! - `error`: Configuration errors
//!
//! Rendering, asset decoding and input polling belong to the host. The core
//! takes shapes (rectangles plus optional occupancy masks) in and hands
//! read-only snapshots out.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use settings::{Settings, Variant};

/// Reference tuning values (288x512 play area at 60 ticks/s)
pub mod consts {
    /// Play area dimensions
    pub const PLAY_WIDTH: i32 = 288;
    pub const PLAY_HEIGHT: i32 = 512;

    /// Horizontal centre of the bird
    pub const BIRD_X: i32 = 50;
    pub const BIRD_WIDTH: i32 = 34;
    pub const BIRD_HEIGHT: i32 = 24;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: i32 = 52;
    pub const GAP_SIZE: i32 = 100;
    /// Closest the gap may come to the top or bottom edge
    pub const MIN_GAP_MARGIN: i32 = 50;

    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.25;
    /// Jump impulses used by the two game variants (pixels/tick)
    pub const JUMP_STRENGTH_CLASSIC: f32 = -4.5;
    pub const JUMP_STRENGTH_SCENERY: f32 = -4.8;

    /// Horizontal scroll (pixels/tick)
    pub const SCROLL_SPEED: f32 = 2.0;

    /// Obstacle spawn interval
    pub const SPAWN_INTERVAL_MS: u32 = 1500;
    /// Fixed simulation rate
    pub const TICK_RATE: u32 = 60;

    /// Raw ticks per displayed score point
    pub const SCORE_DIVISOR: u64 = 30;
}
