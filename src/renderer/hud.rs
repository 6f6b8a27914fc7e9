//! HUD text

use glam::Vec2;

use crate::sim::GameState;

/// Strings shown over the arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    pub health: String,
    pub score: String,
}

impl HudText {
    pub const HEALTH_PREFIX: &'static str = "Health: ";
    pub const SCORE_PREFIX: &'static str = "Score: ";
    pub const HEALTH_POSITION: Vec2 = Vec2::new(20.0, 20.0);
    pub const SCORE_POSITION: Vec2 = Vec2::new(20.0, 50.0);

    pub fn new(health: i32, score: u32) -> Self {
        Self {
            health: format!("{}{}", Self::HEALTH_PREFIX, health),
            score: format!("{}{}", Self::SCORE_PREFIX, score),
        }
    }

    pub fn from_state(state: &GameState) -> Self {
        Self::new(state.burger.health, state.score)
    }
}
