//! Collision detection and response for moving rectangles
//!
//! The tricky part of the arena: two teddy bears moving at arbitrary speeds end
//! a frame overlapping, and we need to separate them and swap their momentum
//! without ever pushing one through an arena wall.
//!
//! Detection is discrete: rectangles are tested after this frame's motion has
//! already been applied. Resolution picks the axis needing the smaller
//! separation (x on an exact tie), backs both bodies up along their own
//! velocities by the estimated time since first contact on that axis, and
//! exchanges their velocity components on that axis.

use glam::Vec2;

use super::body::Rect;

/// Extra gap left between resolved bodies so they end strictly apart
pub const CONTACT_SLOP: f32 = 0.01;

/// Relative speeds below this are treated as not approaching
const MIN_CLOSING_SPEED: f32 = 1e-6;

/// Axis along which a collision was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    #[inline]
    fn with(self, mut v: Vec2, value: f32) -> Vec2 {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
        }
        v
    }

    #[inline]
    fn unit(self) -> Vec2 {
        match self {
            Axis::X => Vec2::X,
            Axis::Y => Vec2::Y,
        }
    }
}

/// What happened to one body in a resolved collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyOutcome {
    /// New rectangle and velocity to commit
    Resolved { rect: Rect, vel: Vec2 },
    /// Separation would push the body out of the arena; deactivate it instead
    OutOfBounds,
}

impl BodyOutcome {
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, BodyOutcome::OutOfBounds)
    }
}

/// Result of a pairwise collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionOutcome {
    pub axis: Axis,
    pub first: BodyOutcome,
    pub second: BodyOutcome,
}

/// Strict overlap test (touching edges do not intersect)
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    let depth = a.penetration(b);
    depth.x > 0.0 && depth.y > 0.0
}

/// True if `candidate` overlaps none of `existing`
pub fn is_collision_free(candidate: &Rect, existing: &[Rect]) -> bool {
    existing.iter().all(|r| !intersects(candidate, r))
}

/// Distance `a` must move (away from `b`) to stop overlapping along `axis`
///
/// `a` moves toward the negative side when its center is not past `b`'s.
fn separation(a: &Rect, b: &Rect, axis: Axis) -> (f32, f32) {
    let (a_min, a_max, b_min, b_max) = match axis {
        Axis::X => (a.left(), a.right(), b.left(), b.right()),
        Axis::Y => (a.top(), a.bottom(), b.top(), b.bottom()),
    };
    if axis.of(a.center()) <= axis.of(b.center()) {
        (a_max - b_min, -1.0)
    } else {
        (b_max - a_min, 1.0)
    }
}

/// Detect and resolve a collision between two moving rectangles
///
/// Returns `None` when the rectangles do not overlap. Otherwise each body is
/// either given a separated rectangle plus exchanged velocity, or flagged out
/// of bounds if that rectangle would leave `[0, arena_width] x [0, arena_height]`.
pub fn detect_and_resolve(
    dt_ms: f32,
    arena_width: f32,
    arena_height: f32,
    vel_a: Vec2,
    rect_a: Rect,
    vel_b: Vec2,
    rect_b: Rect,
) -> Option<CollisionOutcome> {
    if !intersects(&rect_a, &rect_b) {
        return None;
    }

    let (sep_x, dir_x) = separation(&rect_a, &rect_b, Axis::X);
    let (sep_y, dir_y) = separation(&rect_a, &rect_b, Axis::Y);
    let (axis, depth, dir_a) = if sep_x <= sep_y {
        (Axis::X, sep_x, dir_x)
    } else {
        (Axis::Y, sep_y, dir_y)
    };
    let depth = depth + CONTACT_SLOP;

    // Positive when the bodies are moving into each other along the axis
    let va = axis.of(vel_a);
    let vb = axis.of(vel_b);
    let closing = (vb - va) * dir_a;

    // Back up to the estimated moment of contact within this frame, then split
    // whatever overlap is left evenly
    let toi = if closing > MIN_CLOSING_SPEED {
        (depth / closing).min(dt_ms.max(0.0))
    } else {
        0.0
    };
    let remaining = (depth - closing.max(0.0) * toi).max(0.0);

    let offset_a = -va * toi + dir_a * remaining / 2.0;
    let offset_b = -vb * toi - dir_a * remaining / 2.0;

    let resolve = |rect: Rect, vel: Vec2, offset: f32, new_speed: f32| {
        let rect = rect.translated(axis.unit() * offset);
        if rect.is_inside(arena_width, arena_height) {
            BodyOutcome::Resolved {
                rect,
                vel: axis.with(vel, new_speed),
            }
        } else {
            BodyOutcome::OutOfBounds
        }
    };

    Some(CollisionOutcome {
        axis,
        first: resolve(rect_a, vel_a, offset_a, vb),
        second: resolve(rect_b, vel_b, offset_b, va),
    })
}

/// Push a rectangle back inside the arena, reflecting velocity off each wall hit
///
/// Returns `None` if the rectangle is already inside.
pub fn reflect_off_walls(rect: Rect, vel: Vec2, arena_width: f32, arena_height: f32) -> Option<(Rect, Vec2)> {
    let mut rect = rect;
    let mut vel = vel;
    let mut hit = false;

    if rect.left() < 0.0 {
        rect.pos.x = 0.0;
        vel.x = vel.x.abs();
        hit = true;
    } else if rect.right() > arena_width {
        rect.pos.x = arena_width - rect.size.x;
        vel.x = -vel.x.abs();
        hit = true;
    }

    if rect.top() < 0.0 {
        rect.pos.y = 0.0;
        vel.y = vel.y.abs();
        hit = true;
    } else if rect.bottom() > arena_height {
        rect.pos.y = arena_height - rect.size.y;
        vel.y = -vel.y.abs();
        hit = true;
    }

    hit.then_some((rect, vel))
}

/// Clamp a rectangle fully inside the arena (no velocity involved)
pub fn clamp_to_arena(rect: Rect, arena_width: f32, arena_height: f32) -> Rect {
    let mut rect = rect;
    rect.pos.x = rect.pos.x.max(0.0).min(arena_width - rect.size.x);
    rect.pos.y = rect.pos.y.max(0.0).min(arena_height - rect.size.y);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const W: f32 = 800.0;
    const H: f32 = 600.0;
    const DT: f32 = 16.0;

    fn resolved(outcome: BodyOutcome) -> (Rect, Vec2) {
        match outcome {
            BodyOutcome::Resolved { rect, vel } => (rect, vel),
            BodyOutcome::OutOfBounds => panic!("expected a resolved body"),
        }
    }

    #[test]
    fn test_head_on_collision_x() {
        let a = Rect::new(100.0, 100.0, 40.0, 40.0);
        let b = Rect::new(136.0, 100.0, 40.0, 40.0);
        let va = Vec2::new(0.2, 0.0);
        let vb = Vec2::new(-0.2, 0.0);

        let outcome = detect_and_resolve(DT, W, H, va, a, vb, b).expect("should collide");
        assert_eq!(outcome.axis, Axis::X);

        let (ra, new_va) = resolved(outcome.first);
        let (rb, new_vb) = resolved(outcome.second);
        assert_eq!(new_va, Vec2::new(-0.2, 0.0));
        assert_eq!(new_vb, Vec2::new(0.2, 0.0));
        assert!(ra.pos.x < a.pos.x);
        assert!(rb.pos.x > b.pos.x);
        assert_eq!(ra.pos.y, a.pos.y);
        assert!(!intersects(&ra, &rb));
    }

    #[test]
    fn test_vertical_collision_keeps_x_velocity() {
        let a = Rect::new(200.0, 200.0, 40.0, 40.0);
        let b = Rect::new(210.0, 235.0, 40.0, 40.0);
        let va = Vec2::new(0.1, 0.3);
        let vb = Vec2::new(-0.05, -0.1);

        let outcome = detect_and_resolve(DT, W, H, va, a, vb, b).expect("should collide");
        assert_eq!(outcome.axis, Axis::Y);

        let (_, new_va) = resolved(outcome.first);
        let (_, new_vb) = resolved(outcome.second);
        assert_eq!(new_va, Vec2::new(0.1, -0.1));
        assert_eq!(new_vb, Vec2::new(-0.05, 0.3));
    }

    #[test]
    fn test_equal_depth_resolves_on_x() {
        let a = Rect::new(100.0, 100.0, 40.0, 40.0);
        let b = Rect::new(130.0, 130.0, 40.0, 40.0);
        let outcome = detect_and_resolve(DT, W, H, Vec2::ZERO, a, Vec2::ZERO, b).unwrap();
        assert_eq!(outcome.axis, Axis::X);
    }

    #[test]
    fn test_stationary_overlap_is_split() {
        let a = Rect::new(100.0, 100.0, 40.0, 40.0);
        let b = Rect::new(130.0, 100.0, 40.0, 40.0);
        let outcome = detect_and_resolve(DT, W, H, Vec2::ZERO, a, Vec2::ZERO, b).unwrap();

        let (ra, va) = resolved(outcome.first);
        let (rb, vb) = resolved(outcome.second);
        assert_eq!(va, Vec2::ZERO);
        assert_eq!(vb, Vec2::ZERO);
        assert!((a.pos.x - ra.pos.x - (rb.pos.x - b.pos.x)).abs() < 1e-4);
        assert!(!intersects(&ra, &rb));
    }

    #[test]
    fn test_push_into_wall_is_out_of_bounds() {
        // A hugs the left wall and gets shoved further left
        let a = Rect::new(0.0, 300.0, 40.0, 40.0);
        let b = Rect::new(30.0, 300.0, 40.0, 40.0);
        let va = Vec2::new(0.05, 0.0);
        let vb = Vec2::new(-0.3, 0.0);

        let outcome = detect_and_resolve(DT, W, H, va, a, vb, b).unwrap();
        assert!(outcome.first.is_out_of_bounds());
        assert!(!outcome.second.is_out_of_bounds());
    }

    #[test]
    fn test_collision_free() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(is_collision_free(&r, &[]));
        assert!(!is_collision_free(&r, &[r]));
        assert!(is_collision_free(&r, &[Rect::new(30.0, 10.0, 20.0, 20.0)]));
    }

    #[test]
    fn test_reflect_off_walls() {
        let rect = Rect::new(-5.0, 590.0, 20.0, 20.0);
        let (r, v) = reflect_off_walls(rect, Vec2::new(-0.2, 0.1), W, H).expect("hits walls");
        assert_eq!(r.pos, Vec2::new(0.0, 580.0));
        assert_eq!(v, Vec2::new(0.2, -0.1));

        assert!(reflect_off_walls(Rect::new(10.0, 10.0, 20.0, 20.0), Vec2::ONE, W, H).is_none());
    }

    #[test]
    fn test_clamp_to_arena() {
        let r = clamp_to_arena(Rect::new(790.0, -4.0, 20.0, 20.0), W, H);
        assert_eq!(r.pos, Vec2::new(780.0, 0.0));
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (0.0f32..700.0, 0.0f32..500.0, 1.0f32..100.0, 1.0f32..100.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    fn arb_vel() -> impl Strategy<Value = Vec2> {
        (-0.5f32..0.5, -0.5f32..0.5).prop_map(|(x, y)| Vec2::new(x, y))
    }

    proptest! {
        #[test]
        fn prop_separated_pairs_never_collide(a in arb_rect(), b in arb_rect(), v in arb_vel()) {
            prop_assume!(!intersects(&a, &b));
            prop_assert!(detect_and_resolve(DT, W, H, v, a, v, b).is_none());
        }

        #[test]
        fn prop_velocity_sum_conserved(a in arb_rect(), b in arb_rect(), va in arb_vel(), vb in arb_vel()) {
            if let Some(outcome) = detect_and_resolve(DT, W, H, va, a, vb, b) {
                if let (BodyOutcome::Resolved { vel: na, .. }, BodyOutcome::Resolved { vel: nb, .. }) =
                    (outcome.first, outcome.second)
                {
                    prop_assert!(((na + nb) - (va + vb)).length() < 1e-5);
                }
            }
        }

        #[test]
        fn prop_resolved_bodies_stay_in_arena(a in arb_rect(), b in arb_rect(), va in arb_vel(), vb in arb_vel()) {
            if let Some(outcome) = detect_and_resolve(DT, W, H, va, a, vb, b) {
                for body in [outcome.first, outcome.second] {
                    if let BodyOutcome::Resolved { rect, .. } = body {
                        prop_assert!(rect.is_inside(W, H));
                    }
                }
                if let (BodyOutcome::Resolved { rect: ra, .. }, BodyOutcome::Resolved { rect: rb, .. }) =
                    (outcome.first, outcome.second)
                {
                    prop_assert!(!intersects(&ra, &rb));
                }
            }
        }

        #[test]
        fn prop_collision_free_against_self(r in arb_rect()) {
            prop_assert!(is_collision_free(&r, &[]));
            prop_assert!(!is_collision_free(&r, &[r]));
        }
    }
}
