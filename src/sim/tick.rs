//! Per-frame simulation step
//!
//! Core game loop that advances the arena by one frame. Passes run in a fixed
//! order and only ever clear `active` flags; removal waits for the prune at the
//! end of the frame so no collection is modified while it is being walked.

use glam::Vec2;

use super::collision::{BodyOutcome, detect_and_resolve, intersects, reflect_off_walls};
use super::state::{Burger, Explosion, GameState, Projectile, ProjectileKind, TeddyBear, next_fire_delay};
use crate::audio::Cue;

/// Input intent for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire held
    pub fire: bool,
    /// Quit request (handled by the host, ignored by the simulation)
    pub exit: bool,
}

/// Advance the game state by `dt_ms` milliseconds
///
/// Cues raised during the frame are left in `state.events`. A zero, negative
/// or non-finite `dt_ms` leaves the state untouched.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    state.events.clear();
    if !(dt_ms > 0.0 && dt_ms.is_finite()) {
        return;
    }
    state.time_ticks += 1;

    // 1. Burger movement and shooting
    if let Some(projectile) = state.burger.update(dt_ms, input, &state.tuning) {
        log::debug!("Burger fired from {}", projectile.rect().center());
        state.projectiles.push(projectile);
        state.events.push(Cue::BurgerShot);
    }

    // 2. Everything else moves on its own
    update_entities(state, dt_ms);

    // 3. Bears bounce off each other
    resolve_bear_collisions(state, dt_ms);

    // 4-6. Damage and kills
    resolve_burger_bear_contacts(state);
    resolve_burger_projectile_hits(state);
    resolve_bear_projectile_hits(state);

    // 7-8. Bookkeeping
    state.prune();
    state.replenish_bears();

    // 9. Defeat is announced once
    if state.burger.health <= 0 && !state.burger_dead {
        state.burger_dead = true;
        state.events.push(Cue::BurgerDeath);
        log::info!("Burger defeated at tick {} with score {}", state.time_ticks, state.score);
    }
}

fn update_entities(state: &mut GameState, dt_ms: f32) {
    let width = state.tuning.arena_width;
    let height = state.tuning.arena_height;

    for bear in &mut state.bears {
        bear.update(dt_ms);
        if let Some((rect, vel)) = reflect_off_walls(bear.body.rect, bear.body.vel, width, height) {
            bear.body.rect = rect;
            bear.body.vel = vel;
        }

        if bear.fire_timer_elapsed(dt_ms) {
            bear.rearm(next_fire_delay(&mut state.rng, &state.tuning));
            let muzzle = bear.rect().center() + Vec2::new(0.0, state.tuning.bear_projectile_offset);
            state
                .projectiles
                .push(Projectile::fired(ProjectileKind::TeddyBear, muzzle, &state.tuning));
            state.events.push(Cue::TeddyShot);
        }
    }

    for projectile in &mut state.projectiles {
        projectile.update(dt_ms, height);
    }

    for explosion in &mut state.explosions {
        explosion.update(dt_ms);
    }
}

/// Commit one side of a bear-bear collision; true if the bear bounced
fn apply_outcome(bear: &mut TeddyBear, outcome: BodyOutcome) -> bool {
    match outcome {
        BodyOutcome::Resolved { rect, vel } => {
            bear.body.rect = rect;
            bear.body.vel = vel;
            true
        }
        BodyOutcome::OutOfBounds => {
            log::debug!("Bear pushed out of the arena at {}", bear.rect().pos);
            bear.active = false;
            false
        }
    }
}

fn resolve_bear_collisions(state: &mut GameState, dt_ms: f32) {
    let width = state.tuning.arena_width;
    let height = state.tuning.arena_height;

    for i in 0..state.bears.len() {
        for j in (i + 1)..state.bears.len() {
            let (a, b) = (&state.bears[i], &state.bears[j]);
            if !a.active || !b.active {
                continue;
            }
            let Some(outcome) =
                detect_and_resolve(dt_ms, width, height, a.body.vel, a.rect(), b.body.vel, b.rect())
            else {
                continue;
            };

            let first_bounced = apply_outcome(&mut state.bears[i], outcome.first);
            let second_bounced = apply_outcome(&mut state.bears[j], outcome.second);
            // No bounce when either bear was pushed out of the arena
            if first_bounced && second_bounced {
                state.events.push(Cue::TeddyBounce);
            }
        }
    }
}

/// Subtract health, never going below zero
fn damage_burger(burger: &mut Burger, amount: i32) {
    burger.health = (burger.health - amount).max(0);
}

fn resolve_burger_bear_contacts(state: &mut GameState) {
    let burger_rect = state.burger.rect;
    for bear in state.bears.iter_mut().filter(|b| b.active) {
        if intersects(&bear.rect(), &burger_rect) {
            bear.active = false;
            state
                .explosions
                .push(Explosion::from_tuning(bear.rect().center(), &state.tuning));
            state.events.push(Cue::Explosion);

            damage_burger(&mut state.burger, state.tuning.bear_damage);
            state.events.push(Cue::BurgerDamage);
            log::debug!("Bear hit the burger, health now {}", state.burger.health);
        }
    }
}

fn resolve_burger_projectile_hits(state: &mut GameState) {
    let burger_rect = state.burger.rect;
    for projectile in &mut state.projectiles {
        if projectile.kind == ProjectileKind::TeddyBear
            && projectile.active
            && intersects(&projectile.rect(), &burger_rect)
        {
            projectile.active = false;
            damage_burger(&mut state.burger, projectile.kind.burger_damage(&state.tuning));
            state.events.push(Cue::BurgerDamage);
            log::debug!("Burger shot, health now {}", state.burger.health);
        }
    }
}

fn resolve_bear_projectile_hits(state: &mut GameState) {
    for bear in &mut state.bears {
        for projectile in &mut state.projectiles {
            if projectile.kind == ProjectileKind::FrenchFries
                && bear.active
                && projectile.active
                && intersects(&bear.rect(), &projectile.rect())
            {
                bear.active = false;
                projectile.active = false;
                state
                    .explosions
                    .push(Explosion::from_tuning(bear.rect().center(), &state.tuning));
                state.events.push(Cue::Explosion);
                state.score = state.score.saturating_add(state.tuning.bear_points);
            }
        }
    }
}
