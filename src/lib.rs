//! Burger Arena - a burger-versus-teddy-bears arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `settings`: Runner and audio preferences
//! - `audio`: Cue playback boundary
//! - `renderer`: Draw list and HUD boundary

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz)
    pub const SIM_DT_MS: f32 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Teddy bear population and motion (speeds in units/ms)
    pub const MAX_BEARS: usize = 5;
    pub const MIN_BEAR_SPEED: f32 = 0.1;
    pub const BEAR_SPEED_RANGE: f32 = 0.3;
    pub const BEAR_WIDTH: f32 = 48.0;
    pub const BEAR_HEIGHT: f32 = 48.0;
    /// Bear firing delay range (ms)
    pub const BEAR_MIN_FIRE_DELAY_MS: f32 = 1000.0;
    pub const BEAR_FIRE_DELAY_RANGE_MS: f32 = 2000.0;
    pub const BEAR_POINTS: u32 = 10;
    /// Keep spawns this far from the arena edges
    pub const SPAWN_BORDER: f32 = 100.0;
    pub const MAX_SPAWN_ATTEMPTS: u32 = 100;

    /// Burger defaults
    pub const BURGER_INITIAL_HEALTH: i32 = 100;
    pub const BURGER_STEP: f32 = 10.0;
    pub const BURGER_WIDTH: f32 = 64.0;
    pub const BURGER_HEIGHT: f32 = 64.0;
    pub const BURGER_COOLDOWN_MS: f32 = 500.0;
    pub const BEAR_DAMAGE: i32 = 10;

    /// Projectiles
    pub const FRIES_SPEED: f32 = 0.4;
    pub const FRIES_OFFSET: f32 = 20.0;
    pub const FRIES_WIDTH: f32 = 8.0;
    pub const FRIES_HEIGHT: f32 = 24.0;
    pub const BEAR_PROJECTILE_SPEED: f32 = 0.3;
    pub const BEAR_PROJECTILE_OFFSET: f32 = 20.0;
    pub const BEAR_PROJECTILE_WIDTH: f32 = 12.0;
    pub const BEAR_PROJECTILE_HEIGHT: f32 = 12.0;
    pub const BEAR_PROJECTILE_DAMAGE: i32 = 5;

    /// Explosion sprite strip (3x3 frames)
    pub const EXPLOSION_FRAMES: u32 = 9;
    pub const EXPLOSION_FRAMES_PER_ROW: u32 = 3;
    pub const EXPLOSION_FRAME_MS: f32 = 10.0;
    pub const EXPLOSION_WIDTH: f32 = 64.0;
    pub const EXPLOSION_HEIGHT: f32 = 64.0;
}
