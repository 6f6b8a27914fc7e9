//! Data-driven game balance
//!
//! Every gameplay constant the simulation consumes lives in [`Tuning`]. Values
//! default to [`crate::consts`] and can be overridden from a JSON file; any
//! field left out of the file keeps its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Teddy bears ===
    /// Number of active bears kept in the arena at the end of every frame
    pub max_bears: usize,
    /// Slowest bear speed (units/ms)
    pub min_bear_speed: f32,
    /// Random extra speed added on top of `min_bear_speed`
    pub bear_speed_range: f32,
    pub bear_size: Vec2,
    /// Whether bears fire projectiles on their own timers
    pub bears_fire: bool,
    pub bear_min_fire_delay_ms: f32,
    pub bear_fire_delay_range_ms: f32,
    /// Score awarded per bear shot down
    pub bear_points: u32,
    /// Margin kept between spawn points and the arena edges
    pub spawn_border: f32,
    /// Placement retries before a spawn accepts an overlapping position
    pub max_spawn_attempts: u32,

    // === Burger ===
    pub burger_initial_health: i32,
    /// Displacement per held direction per frame
    pub burger_step: f32,
    pub burger_size: Vec2,
    pub burger_cooldown_ms: f32,
    /// Health lost when a bear touches the burger
    pub bear_damage: i32,

    // === Projectiles ===
    pub fries_speed: f32,
    pub fries_offset: f32,
    pub fries_size: Vec2,
    pub bear_projectile_speed: f32,
    pub bear_projectile_offset: f32,
    pub bear_projectile_size: Vec2,
    pub bear_projectile_damage: i32,

    // === Explosions ===
    pub explosion_frames: u32,
    pub explosion_frames_per_row: u32,
    pub explosion_frame_ms: f32,
    pub explosion_size: Vec2,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            max_bears: MAX_BEARS,
            min_bear_speed: MIN_BEAR_SPEED,
            bear_speed_range: BEAR_SPEED_RANGE,
            bear_size: Vec2::new(BEAR_WIDTH, BEAR_HEIGHT),
            bears_fire: true,
            bear_min_fire_delay_ms: BEAR_MIN_FIRE_DELAY_MS,
            bear_fire_delay_range_ms: BEAR_FIRE_DELAY_RANGE_MS,
            bear_points: BEAR_POINTS,
            spawn_border: SPAWN_BORDER,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,

            burger_initial_health: BURGER_INITIAL_HEALTH,
            burger_step: BURGER_STEP,
            burger_size: Vec2::new(BURGER_WIDTH, BURGER_HEIGHT),
            burger_cooldown_ms: BURGER_COOLDOWN_MS,
            bear_damage: BEAR_DAMAGE,

            fries_speed: FRIES_SPEED,
            fries_offset: FRIES_OFFSET,
            fries_size: Vec2::new(FRIES_WIDTH, FRIES_HEIGHT),
            bear_projectile_speed: BEAR_PROJECTILE_SPEED,
            bear_projectile_offset: BEAR_PROJECTILE_OFFSET,
            bear_projectile_size: Vec2::new(BEAR_PROJECTILE_WIDTH, BEAR_PROJECTILE_HEIGHT),
            bear_projectile_damage: BEAR_PROJECTILE_DAMAGE,

            explosion_frames: EXPLOSION_FRAMES,
            explosion_frames_per_row: EXPLOSION_FRAMES_PER_ROW,
            explosion_frame_ms: EXPLOSION_FRAME_MS,
            explosion_size: Vec2::new(EXPLOSION_WIDTH, EXPLOSION_HEIGHT),
        }
    }
}

impl Tuning {
    /// Parse tuning from a JSON string and validate it
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive_size(name: &str, size: Vec2) -> Result<(), TuningError> {
            if size.x > 0.0 && size.y > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid(format!("{name} must be positive, got {size}")))
            }
        }

        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            return Err(TuningError::Invalid(format!(
                "arena must be positive, got {}x{}",
                self.arena_width, self.arena_height
            )));
        }
        positive_size("bear_size", self.bear_size)?;
        positive_size("burger_size", self.burger_size)?;
        positive_size("fries_size", self.fries_size)?;
        positive_size("bear_projectile_size", self.bear_projectile_size)?;
        positive_size("explosion_size", self.explosion_size)?;

        if self.min_bear_speed < 0.0 || self.bear_speed_range < 0.0 {
            return Err(TuningError::Invalid("bear speeds must be non-negative".into()));
        }
        if self.spawn_border < 0.0
            || self.spawn_border * 2.0 >= self.arena_width
            || self.spawn_border * 2.0 >= self.arena_height
        {
            return Err(TuningError::Invalid(format!(
                "spawn_border {} leaves no room to spawn",
                self.spawn_border
            )));
        }
        if self.max_spawn_attempts == 0 {
            return Err(TuningError::Invalid("max_spawn_attempts must be at least 1".into()));
        }
        if self.bears_fire && self.bear_min_fire_delay_ms <= 0.0 {
            return Err(TuningError::Invalid("bear_min_fire_delay_ms must be positive".into()));
        }
        if self.bear_fire_delay_range_ms < 0.0 || self.burger_cooldown_ms < 0.0 {
            return Err(TuningError::Invalid("delays must be non-negative".into()));
        }
        if self.explosion_frames == 0 || self.explosion_frames_per_row == 0 {
            return Err(TuningError::Invalid("explosion needs at least one frame".into()));
        }
        if self.explosion_frame_ms <= 0.0 {
            return Err(TuningError::Invalid("explosion_frame_ms must be positive".into()));
        }
        Ok(())
    }

    /// Rows in the explosion sprite strip
    pub fn explosion_rows(&self) -> u32 {
        self.explosion_frames.div_ceil(self.explosion_frames_per_row)
    }
}
