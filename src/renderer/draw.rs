//! Draw list generation
//!
//! Sprites are opaque handles; the renderer owns the textures. Projectile
//! sprites are picked from the projectile kind here instead of being looked up
//! through shared texture state.

use crate::Tuning;
use crate::sim::{GameState, ProjectileKind, Rect};

/// Sprite handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Burger,
    TeddyBear,
    FrenchFries,
    TeddyBearProjectile,
    /// Explosion strip; `frame` selects the cell
    Explosion { frame: u32 },
}

impl Sprite {
    pub fn for_projectile(kind: ProjectileKind) -> Self {
        match kind {
            ProjectileKind::FrenchFries => Sprite::FrenchFries,
            ProjectileKind::TeddyBear => Sprite::TeddyBearProjectile,
        }
    }
}

/// One sprite blit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// Destination in arena coordinates
    pub rect: Rect,
    pub sprite: Sprite,
    /// Region of the sprite texture (None = whole texture)
    pub source: Option<Rect>,
}

/// Source cell of `frame` in the explosion strip
///
/// Frames past the end of the strip map to its last row.
pub fn explosion_source_rect(frame: u32, tuning: &Tuning) -> Rect {
    let per_row = tuning.explosion_frames_per_row.max(1);
    let last_row = tuning.explosion_rows().saturating_sub(1);
    let size = tuning.explosion_size;
    Rect::new(
        (frame % per_row) as f32 * size.x,
        (frame / per_row).min(last_row) as f32 * size.y,
        size.x,
        size.y,
    )
}

/// Everything visible this frame, back to front
pub fn draw_list(state: &GameState) -> Vec<DrawCommand> {
    let mut commands =
        Vec::with_capacity(1 + state.bears.len() + state.projectiles.len() + state.explosions.len());

    commands.push(DrawCommand {
        rect: state.burger.rect,
        sprite: Sprite::Burger,
        source: None,
    });

    commands.extend(state.bears.iter().filter(|b| b.active).map(|bear| DrawCommand {
        rect: bear.rect(),
        sprite: Sprite::TeddyBear,
        source: None,
    }));

    commands.extend(state.projectiles.iter().filter(|p| p.active).map(|projectile| DrawCommand {
        rect: projectile.rect(),
        sprite: Sprite::for_projectile(projectile.kind),
        source: None,
    }));

    // Finished explosions draw nothing
    commands.extend(state.explosions.iter().filter_map(|explosion| {
        explosion.current_frame().map(|frame| DrawCommand {
            rect: explosion.rect,
            sprite: Sprite::Explosion { frame },
            source: Some(explosion_source_rect(frame, &state.tuning)),
        })
    }));

    commands
}
