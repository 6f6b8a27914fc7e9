//! Axis-aligned rectangles and kinematic bodies
//!
//! Everything that moves or collides in the arena is a [`Rect`]. Positions are
//! the top-left corner in arena units, y grows downward. Velocities are in
//! units per millisecond.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height (always positive)
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Rectangle of the given size centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Copy moved by `offset`
    #[inline]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            pos: self.pos + offset,
            size: self.size,
        }
    }

    /// Per-axis penetration depth with `other` (positive on both axes = overlap)
    pub fn penetration(&self, other: &Rect) -> Vec2 {
        Vec2::new(
            self.right().min(other.right()) - self.left().max(other.left()),
            self.bottom().min(other.bottom()) - self.top().max(other.top()),
        )
    }

    /// Whether the rectangle lies fully inside `[0, width] x [0, height]`
    pub fn is_inside(&self, width: f32, height: f32) -> bool {
        self.left() >= 0.0 && self.top() >= 0.0 && self.right() <= width && self.bottom() <= height
    }
}

/// A rectangle moving with constant velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub rect: Rect,
    /// Units per millisecond
    pub vel: Vec2,
}

impl Body {
    pub fn new(rect: Rect, vel: Vec2) -> Self {
        Self { rect, vel }
    }

    /// Straight-line motion: position += velocity * dt
    #[inline]
    pub fn advance(&mut self, dt_ms: f32) {
        self.rect.pos += self.vel * dt_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges_and_center() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
        assert_eq!(Rect::from_center(r.center(), r.size), r);
    }

    #[test]
    fn test_penetration() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(8.0, 5.0, 10.0, 10.0);
        assert_eq!(a.penetration(&b), Vec2::new(2.0, 5.0));

        let far = Rect::new(50.0, 0.0, 10.0, 10.0);
        assert!(a.penetration(&far).x < 0.0);
    }

    #[test]
    fn test_is_inside() {
        assert!(Rect::new(0.0, 0.0, 800.0, 600.0).is_inside(800.0, 600.0));
        assert!(!Rect::new(-1.0, 0.0, 10.0, 10.0).is_inside(800.0, 600.0));
        assert!(!Rect::new(795.0, 0.0, 10.0, 10.0).is_inside(800.0, 600.0));
    }

    #[test]
    fn test_advance() {
        let mut body = Body::new(Rect::new(0.0, 0.0, 10.0, 10.0), Vec2::new(0.5, -0.25));
        body.advance(16.0);
        assert_eq!(body.rect.pos, Vec2::new(8.0, -4.0));

        body.advance(0.0);
        assert_eq!(body.rect.pos, Vec2::new(8.0, -4.0));
    }
}
