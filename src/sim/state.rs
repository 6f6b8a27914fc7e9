//! Game state and entity models
//!
//! The four entity kinds are independent types with their own update rules.
//! None of them holds a reference to another; cross-entity effects are applied
//! by [`super::tick`] from plain rectangles and velocities.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Body, Rect};
use super::collision::{clamp_to_arena, is_collision_free};
use super::tick::TickInput;
use crate::Tuning;
use crate::audio::Cue;

/// Burger shooting state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Cooldown {
    /// Next fire input shoots
    Ready,
    /// Recently fired; waits for the cooldown or a released trigger
    Cooling { elapsed_ms: f32 },
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Burger {
    pub rect: Rect,
    /// Damage is applied by the orchestrator, which keeps this at or above 0
    pub health: i32,
    pub cooldown: Cooldown,
}

impl Burger {
    pub fn new(center: Vec2, tuning: &Tuning) -> Self {
        Self {
            rect: Rect::from_center(center, tuning.burger_size),
            health: tuning.burger_initial_health,
            cooldown: Cooldown::Ready,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Move by input, run the cooldown and maybe fire
    ///
    /// Returns the french fries projectile when a shot is fired.
    pub fn update(&mut self, dt_ms: f32, input: &TickInput, tuning: &Tuning) -> Option<Projectile> {
        if self.is_alive() {
            let step = tuning.burger_step;
            if input.up {
                self.rect.pos.y -= step;
            }
            if input.down {
                self.rect.pos.y += step;
            }
            if input.right {
                self.rect.pos.x += step;
            }
            if input.left {
                self.rect.pos.x -= step;
            }
            self.rect = clamp_to_arena(self.rect, tuning.arena_width, tuning.arena_height);
        }

        if let Cooldown::Cooling { elapsed_ms } = self.cooldown {
            let elapsed_ms = elapsed_ms + dt_ms;
            self.cooldown = if elapsed_ms >= tuning.burger_cooldown_ms || !input.fire {
                Cooldown::Ready
            } else {
                Cooldown::Cooling { elapsed_ms }
            };
        }

        if self.is_alive() && input.fire && self.cooldown == Cooldown::Ready {
            self.cooldown = Cooldown::Cooling { elapsed_ms: 0.0 };
            let muzzle = self.rect.center() - Vec2::new(0.0, tuning.fries_offset);
            return Some(Projectile::fired(ProjectileKind::FrenchFries, muzzle, tuning));
        }
        None
    }
}

/// An autonomously wandering obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeddyBear {
    pub body: Body,
    pub active: bool,
    /// Time between shots (None = never fires)
    pub fire_delay_ms: Option<f32>,
    pub elapsed_fire_ms: f32,
}

impl TeddyBear {
    pub fn new(body: Body, fire_delay_ms: Option<f32>) -> Self {
        Self {
            body,
            active: true,
            fire_delay_ms,
            elapsed_fire_ms: 0.0,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect
    }

    /// Straight-line motion; bounces are applied from outside
    pub fn update(&mut self, dt_ms: f32) {
        self.body.advance(dt_ms);
    }

    /// Run the fire timer; true when a shot is due
    ///
    /// The caller re-arms the timer with [`TeddyBear::rearm`].
    pub fn fire_timer_elapsed(&mut self, dt_ms: f32) -> bool {
        let Some(delay) = self.fire_delay_ms else {
            return false;
        };
        self.elapsed_fire_ms += dt_ms;
        self.elapsed_fire_ms >= delay
    }

    pub fn rearm(&mut self, delay_ms: f32) {
        self.fire_delay_ms = Some(delay_ms);
        self.elapsed_fire_ms = 0.0;
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Fired upward by the burger; kills bears
    FrenchFries,
    /// Fired downward by bears; hurts the burger
    TeddyBear,
}

impl ProjectileKind {
    /// Signed vertical speed (negative = up)
    pub fn velocity(self, tuning: &Tuning) -> f32 {
        match self {
            ProjectileKind::FrenchFries => -tuning.fries_speed,
            ProjectileKind::TeddyBear => tuning.bear_projectile_speed,
        }
    }

    pub fn size(self, tuning: &Tuning) -> Vec2 {
        match self {
            ProjectileKind::FrenchFries => tuning.fries_size,
            ProjectileKind::TeddyBear => tuning.bear_projectile_size,
        }
    }

    /// Health the burger loses when hit
    pub fn burger_damage(self, tuning: &Tuning) -> i32 {
        match self {
            ProjectileKind::FrenchFries => 0,
            ProjectileKind::TeddyBear => tuning.bear_projectile_damage,
        }
    }
}

/// A projectile moving along the y axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub body: Body,
    pub active: bool,
}

impl Projectile {
    pub fn new(kind: ProjectileKind, center: Vec2, size: Vec2, y_speed: f32) -> Self {
        Self {
            kind,
            body: Body::new(Rect::from_center(center, size), Vec2::new(0.0, y_speed)),
            active: true,
        }
    }

    /// Projectile of `kind` centered on `center` with tuned size and speed
    pub fn fired(kind: ProjectileKind, center: Vec2, tuning: &Tuning) -> Self {
        Self::new(kind, center, kind.size(tuning), kind.velocity(tuning))
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect
    }

    /// Move and deactivate once fully above or below the arena
    pub fn update(&mut self, dt_ms: f32, arena_height: f32) {
        self.body.advance(dt_ms);
        let rect = self.body.rect;
        if rect.bottom() < 0.0 || rect.top() > arena_height {
            self.active = false;
        }
    }
}

/// Explosion animation state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ExplosionState {
    Playing { frame: u32, elapsed_ms: f32 },
    Finished,
}

/// A one-shot explosion animation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub rect: Rect,
    pub state: ExplosionState,
    frame_count: u32,
    frame_ms: f32,
}

impl Explosion {
    pub fn new(center: Vec2, size: Vec2, frame_count: u32, frame_ms: f32) -> Self {
        Self {
            rect: Rect::from_center(center, size),
            state: ExplosionState::Playing {
                frame: 0,
                elapsed_ms: 0.0,
            },
            frame_count: frame_count.max(1),
            frame_ms,
        }
    }

    /// Explosion sized and timed from tuning
    pub fn from_tuning(center: Vec2, tuning: &Tuning) -> Self {
        Self::new(
            center,
            tuning.explosion_size,
            tuning.explosion_frames,
            tuning.explosion_frame_ms,
        )
    }

    /// Advance the animation; returns the number of frames advanced
    ///
    /// Every full `frame_ms` of accumulated time moves one frame forward. Once
    /// the last frame has been reached, any further time finishes the
    /// animation.
    pub fn update(&mut self, dt_ms: f32) -> u32 {
        let ExplosionState::Playing { mut frame, elapsed_ms } = self.state else {
            return 0;
        };
        if !(dt_ms > 0.0) {
            return 0;
        }

        let last = self.frame_count - 1;
        let mut elapsed = elapsed_ms + dt_ms;
        let mut advanced = 0;
        while frame < last && elapsed >= self.frame_ms {
            elapsed -= self.frame_ms;
            frame += 1;
            advanced += 1;
        }

        self.state = if frame == last && elapsed > 0.0 {
            ExplosionState::Finished
        } else {
            ExplosionState::Playing {
                frame,
                elapsed_ms: elapsed,
            }
        };
        advanced
    }

    /// Frame to draw, if still playing
    pub fn current_frame(&self) -> Option<u32> {
        match self.state {
            ExplosionState::Playing { frame, .. } => Some(frame),
            ExplosionState::Finished => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state == ExplosionState::Finished
    }
}

/// Serializable view of the whole arena
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub time_ticks: u64,
    pub score: u32,
    pub burger: &'a Burger,
    pub bears: &'a [TeddyBear],
    pub projectiles: &'a [Projectile],
    pub explosions: &'a [Explosion],
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub burger: Burger,
    /// Bears (inactive ones linger until the end-of-frame prune)
    pub bears: Vec<TeddyBear>,
    pub projectiles: Vec<Projectile>,
    pub explosions: Vec<Explosion>,
    pub score: u32,
    /// Latched once the death cue has been raised
    pub burger_dead: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Cues raised by the most recent tick
    pub events: Vec<Cue>,
}

impl GameState {
    /// Create a new game with the given seed and a full bear population
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let burger_center = Vec2::new(
            tuning.arena_width / 2.0,
            tuning.arena_height - tuning.arena_height / 8.0,
        );
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            burger: Burger::new(burger_center, &tuning),
            tuning,
            bears: Vec::new(),
            projectiles: Vec::new(),
            explosions: Vec::new(),
            score: 0,
            burger_dead: false,
            time_ticks: 0,
            events: Vec::new(),
        };
        state.replenish_bears();
        log::info!(
            "New game (seed {}): {} bears in a {}x{} arena",
            seed,
            state.bears.len(),
            state.tuning.arena_width,
            state.tuning.arena_height
        );
        state
    }

    pub fn active_bear_count(&self) -> usize {
        self.bears.iter().filter(|b| b.active).count()
    }

    /// Every rectangle a new spawn must avoid
    pub fn collision_rects(&self) -> Vec<Rect> {
        std::iter::once(self.burger.rect)
            .chain(self.bears.iter().map(TeddyBear::rect))
            .chain(self.projectiles.iter().map(Projectile::rect))
            .chain(self.explosions.iter().map(|e| e.rect))
            .collect()
    }

    /// Drop dead bears, spent projectiles and finished explosions
    pub fn prune(&mut self) {
        self.bears.retain(|b| b.active);
        self.projectiles.retain(|p| p.active);
        self.explosions.retain(|e| !e.is_finished());
    }

    /// Spawn bears until the active population is back to `max_bears`
    pub fn replenish_bears(&mut self) {
        while self.active_bear_count() < self.tuning.max_bears {
            self.spawn_bear();
        }
    }

    /// Spawn one bear at a random spot that overlaps nothing live
    ///
    /// Gives up after `max_spawn_attempts` and keeps the last candidate so a
    /// crowded arena can never stall a frame.
    pub fn spawn_bear(&mut self) {
        let existing = self.collision_rects();
        let mut rect = self.random_spawn_rect();
        let mut attempts = 1;
        while !is_collision_free(&rect, &existing) {
            if attempts >= self.tuning.max_spawn_attempts {
                log::warn!(
                    "No free spot for a bear after {} attempts; spawning overlapped at {}",
                    attempts,
                    rect.pos
                );
                break;
            }
            rect = self.random_spawn_rect();
            attempts += 1;
        }

        let speed = self.tuning.min_bear_speed + self.rng.random::<f32>() * self.tuning.bear_speed_range;
        let angle = self.rng.random::<f32>() * TAU;
        let vel = Vec2::new(speed * angle.cos(), speed * angle.sin());
        let fire_delay = self
            .tuning
            .bears_fire
            .then(|| next_fire_delay(&mut self.rng, &self.tuning));

        log::debug!("Spawned bear at {} moving {}", rect.pos, vel);
        self.bears.push(TeddyBear::new(Body::new(rect, vel), fire_delay));
    }

    fn random_spawn_rect(&mut self) -> Rect {
        let border = self.tuning.spawn_border;
        let x = border + self.rng.random::<f32>() * (self.tuning.arena_width - 2.0 * border);
        let y = border + self.rng.random::<f32>() * (self.tuning.arena_height - 2.0 * border);
        Rect::from_center(Vec2::new(x, y), self.tuning.bear_size)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            time_ticks: self.time_ticks,
            score: self.score,
            burger: &self.burger,
            bears: &self.bears,
            projectiles: &self.projectiles,
            explosions: &self.explosions,
        }
    }
}

/// Random delay before a bear's next shot
pub(crate) fn next_fire_delay(rng: &mut Pcg32, tuning: &Tuning) -> f32 {
    tuning.bear_min_fire_delay_ms + rng.random::<f32>() * tuning.bear_fire_delay_range_ms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_burger_moves_and_clamps() {
        let tuning = Tuning::default();
        let mut burger = Burger::new(Vec2::new(400.0, 300.0), &tuning);
        let start = burger.rect.pos;

        let diagonal = TickInput {
            up: true,
            left: true,
            ..Default::default()
        };
        burger.update(16.0, &diagonal, &tuning);
        assert_eq!(burger.rect.pos, start + Vec2::new(-10.0, -10.0));

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..100 {
            burger.update(16.0, &right, &tuning);
        }
        assert_eq!(burger.rect.right(), tuning.arena_width);
    }

    #[test]
    fn test_burger_cooldown() {
        let tuning = Tuning::default();
        let mut burger = Burger::new(Vec2::new(400.0, 300.0), &tuning);

        let shot = burger.update(16.0, &fire(), &tuning).expect("first shot fires");
        assert_eq!(shot.kind, ProjectileKind::FrenchFries);
        assert!(shot.body.vel.y < 0.0);

        // Still held, 499 ms after the shot
        assert!(burger.update(499.0, &fire(), &tuning).is_none());
        // 500 ms after the shot
        assert!(burger.update(1.0, &fire(), &tuning).is_some());
    }

    #[test]
    fn test_burger_release_resets_cooldown() {
        let tuning = Tuning::default();
        let mut burger = Burger::new(Vec2::new(400.0, 300.0), &tuning);

        assert!(burger.update(16.0, &fire(), &tuning).is_some());
        assert!(burger.update(16.0, &TickInput::default(), &tuning).is_none());
        assert_eq!(burger.cooldown, Cooldown::Ready);
        assert!(burger.update(16.0, &fire(), &tuning).is_some());
    }

    #[test]
    fn test_dead_burger_is_frozen() {
        let tuning = Tuning::default();
        let mut burger = Burger::new(Vec2::new(400.0, 300.0), &tuning);
        burger.health = 0;
        let start = burger.rect;

        let input = TickInput {
            down: true,
            fire: true,
            ..Default::default()
        };
        assert!(burger.update(16.0, &input, &tuning).is_none());
        assert_eq!(burger.rect, start);
    }

    #[test]
    fn test_projectile_leaves_arena() {
        let tuning = Tuning::default();
        let mut fries = Projectile::fired(ProjectileKind::FrenchFries, Vec2::new(100.0, 20.0), &tuning);
        fries.update(16.0, tuning.arena_height);
        assert!(fries.active);

        // 0.4 units/ms upward: fully above the top after well under 100 ms
        fries.update(100.0, tuning.arena_height);
        assert!(!fries.active);
    }

    #[test]
    fn test_bear_fire_timer() {
        let rect = Rect::new(100.0, 100.0, 48.0, 48.0);
        let mut bear = TeddyBear::new(Body::new(rect, Vec2::ZERO), Some(1000.0));
        assert!(!bear.fire_timer_elapsed(999.0));
        assert!(bear.fire_timer_elapsed(1.0));
        bear.rearm(500.0);
        assert!(!bear.fire_timer_elapsed(100.0));

        let mut quiet = TeddyBear::new(Body::new(rect, Vec2::ZERO), None);
        assert!(!quiet.fire_timer_elapsed(1.0e6));
    }

    #[test]
    fn test_explosion_finishes_after_last_frame() {
        let frames = 9;
        let frame_ms = 10.0;
        let mut explosion = Explosion::new(Vec2::ZERO, Vec2::splat(64.0), frames, frame_ms);

        let advanced = explosion.update((frames - 1) as f32 * frame_ms + 1.0);
        assert_eq!(advanced, frames - 1);
        assert!(explosion.is_finished());
        assert_eq!(explosion.current_frame(), None);

        // Finished never restarts
        assert_eq!(explosion.update(1000.0), 0);
        assert!(explosion.is_finished());
    }

    #[test]
    fn test_explosion_steps_one_ms_at_a_time() {
        let mut explosion = Explosion::new(Vec2::ZERO, Vec2::splat(64.0), 3, 10.0);
        let mut advanced = 0;
        for _ in 0..20 {
            advanced += explosion.update(1.0);
        }
        assert_eq!(advanced, 2);
        assert_eq!(explosion.current_frame(), Some(2));

        explosion.update(1.0);
        assert!(explosion.is_finished());
    }

    #[test]
    fn test_explosion_ignores_zero_dt() {
        let mut explosion = Explosion::new(Vec2::ZERO, Vec2::splat(64.0), 1, 10.0);
        assert_eq!(explosion.update(0.0), 0);
        assert_eq!(explosion.current_frame(), Some(0));
        explosion.update(0.5);
        assert!(explosion.is_finished());
    }

    #[test]
    fn test_new_game_population() {
        let state = GameState::new(7, Tuning::default());
        assert_eq!(state.bears.len(), state.tuning.max_bears);
        let rects = state.collision_rects();
        for (i, bear) in state.bears.iter().enumerate() {
            let others: Vec<Rect> = rects
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i + 1)
                .map(|(_, r)| *r)
                .collect();
            assert!(is_collision_free(&bear.rect(), &others));
        }
    }

    #[test]
    fn test_crowded_arena_still_spawns() {
        let tuning = Tuning {
            arena_width: 220.0,
            arena_height: 220.0,
            max_bears: 40,
            max_spawn_attempts: 5,
            ..Default::default()
        };
        let state = GameState::new(3, tuning);
        assert_eq!(state.bears.len(), 40);
    }
}
