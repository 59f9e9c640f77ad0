//! 2D affine transforms
//!
//! Column-vector convention: a point `(x, y)` maps to
//! `(a*x + c*y + e, b*x + d*y + f)`, matching the memory layout GPU
//! renderers expect for a 3x2 matrix.

use crate::primitives::{Quad, Rect, Vec2};

/// 2D affine transform
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2D {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    /// Determinants smaller than this are treated as degenerate
    const DET_EPSILON: f32 = 1e-12;

    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    pub const fn translation(x: f32, y: f32) -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: x,
            f: y,
        }
    }

    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self {
            a: sx,
            b: 0.0,
            c: 0.0,
            d: sy,
            e: 0.0,
            f: 0.0,
        }
    }

    pub const fn scale_uniform(s: f32) -> Self {
        Self::scale(s, s)
    }

    pub fn rotation(radians: f32) -> Self {
        let cos = radians.cos();
        let sin = radians.sin();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Compose transforms: `self` is applied first, then `other`
    pub fn then(&self, other: &Transform2D) -> Transform2D {
        Transform2D {
            a: other.a * self.a + other.c * self.b,
            b: other.b * self.a + other.d * self.b,
            c: other.a * self.c + other.c * self.d,
            d: other.b * self.c + other.d * self.d,
            e: other.a * self.e + other.c * self.f + other.e,
            f: other.b * self.e + other.d * self.f + other.f,
        }
    }

    pub fn apply(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            self.a * point.x + self.c * point.y + self.e,
            self.b * point.x + self.d * point.y + self.f,
        )
    }

    /// Carry a local-space rectangle into screen space
    pub fn apply_rect(&self, rect: &Rect) -> Quad {
        let local = Quad::from_rect(rect);
        Quad {
            top_left: self.apply(local.top_left),
            top_right: self.apply(local.top_right),
            bottom_left: self.apply(local.bottom_left),
            bottom_right: self.apply(local.bottom_right),
        }
    }

    pub fn determinant(&self) -> f32 {
        self.a * self.d - self.b * self.c
    }

    /// Inverse transform, or `None` when the linear part is degenerate
    pub fn inverse(&self) -> Option<Transform2D> {
        let det = self.determinant();
        if det.abs() < Self::DET_EPSILON {
            return None;
        }
        Some(Transform2D {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }

    /// Per-axis scale factors embedded in the linear part (column norms)
    pub fn extract_scale(&self) -> Vec2 {
        Vec2::new(self.a.hypot(self.b), self.c.hypot(self.d))
    }

    /// True when the linear part mixes axes (rotation or skew)
    pub fn has_rotation(&self, epsilon: f32) -> bool {
        self.b.abs() > epsilon || self.c.abs() > epsilon
    }
}
