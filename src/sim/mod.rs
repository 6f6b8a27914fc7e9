//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time comes in as an argument
//! - Seeded RNG only
//! - Stable iteration order (collection order, pairs visited as i < j)
//! - No rendering, audio or platform dependencies

pub mod body;
pub mod collision;
pub mod state;
pub mod tick;

pub use body::{Body, Rect};
pub use collision::{
    Axis, BodyOutcome, CollisionOutcome, clamp_to_arena, detect_and_resolve, intersects,
    is_collision_free, reflect_off_walls,
};
pub use state::{
    Burger, Cooldown, Explosion, ExplosionState, GameState, Projectile, ProjectileKind, Snapshot,
    TeddyBear,
};
pub use tick::{TickInput, tick};
