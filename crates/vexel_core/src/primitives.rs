//! Geometric primitives

use std::ops::{Add, Mul, Neg, Sub};

/// A 2D vector
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    /// Component-wise product
    pub fn mul_components(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x * other.x, self.y * other.y)
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    /// Round both components to the nearest integer
    pub fn round(self) -> Vec2 {
        Vec2::new(self.x.round(), self.y.round())
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// An axis-aligned rectangle in local space
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(size: Vec2) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.x,
            height: size.y,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Flip negative extents so that width and height are non-negative
    pub fn normalize(&self) -> Rect {
        let (x, width) = if self.width < 0.0 {
            (self.x + self.width, -self.width)
        } else {
            (self.x, self.width)
        };
        let (y, height) = if self.height < 0.0 {
            (self.y + self.height, -self.height)
        } else {
            (self.y, self.height)
        };
        Rect::new(x, y, width, height)
    }

    /// Grow the rectangle by `amount` on every side, keeping the center fixed
    pub fn inflate(&self, amount: Vec2) -> Rect {
        Rect::new(
            self.x - amount.x,
            self.y - amount.y,
            self.width + 2.0 * amount.x,
            self.height + 2.0 * amount.y,
        )
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Four corners in screen space, not necessarily axis-aligned
///
/// Produced by pushing a local-space [`Rect`] through a [`Transform2D`];
/// rotation and skew in the transform chain survive in the corner layout.
///
/// [`Transform2D`]: crate::Transform2D
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Quad {
    pub top_left: Vec2,
    pub top_right: Vec2,
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
}

impl Quad {
    pub fn from_rect(rect: &Rect) -> Self {
        Self {
            top_left: Vec2::new(rect.x, rect.y),
            top_right: Vec2::new(rect.x + rect.width, rect.y),
            bottom_left: Vec2::new(rect.x, rect.y + rect.height),
            bottom_right: Vec2::new(rect.x + rect.width, rect.y + rect.height),
        }
    }

    /// Length of the top edge
    pub fn width(&self) -> f32 {
        self.top_left.distance(self.top_right)
    }

    /// Length of the left edge
    pub fn height(&self) -> f32 {
        self.top_left.distance(self.bottom_left)
    }

    /// Axis-aligned bounding box of the four corners
    pub fn aabb(&self) -> Rect {
        let min_x = self
            .top_left
            .x
            .min(self.top_right.x)
            .min(self.bottom_left.x)
            .min(self.bottom_right.x);
        let min_y = self
            .top_left
            .y
            .min(self.top_right.y)
            .min(self.bottom_left.y)
            .min(self.bottom_right.y);
        let max_x = self
            .top_left
            .x
            .max(self.top_right.x)
            .max(self.bottom_left.x)
            .max(self.bottom_right.x);
        let max_y = self
            .top_left
            .y
            .max(self.top_right.y)
            .max(self.bottom_left.y)
            .max(self.bottom_right.y);
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Whether the edges still run parallel to the axes
    ///
    /// Rotation or skew picked up from the transform chain tilts the
    /// edges; pure scale and translation keep them axis-parallel.
    pub fn is_axis_aligned(&self, epsilon: f32) -> bool {
        (self.top_left.y - self.top_right.y).abs() <= epsilon
            && (self.bottom_left.y - self.bottom_right.y).abs() <= epsilon
            && (self.top_left.x - self.bottom_left.x).abs() <= epsilon
            && (self.top_right.x - self.bottom_right.x).abs() <= epsilon
    }

    /// Round every corner coordinate to the nearest integer pixel
    pub fn snap_to_pixels(&self) -> Quad {
        Quad {
            top_left: self.top_left.round(),
            top_right: self.top_right.round(),
            bottom_left: self.bottom_left.round(),
            bottom_right: self.bottom_right.round(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_flips_negative_extents() {
        let r = Rect::new(10.0, 10.0, -4.0, -6.0).normalize();
        assert_eq!(r, Rect::new(6.0, 4.0, 4.0, 6.0));
    }

    #[test]
    fn normalize_keeps_positive_extents() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(r.normalize(), r);
    }

    #[test]
    fn inflate_keeps_center() {
        let r = Rect::new(0.0, 0.0, 10.0, 20.0);
        let inflated = r.inflate(Vec2::new(2.0, 3.0));
        assert_eq!(inflated, Rect::new(-2.0, -3.0, 14.0, 26.0));
        assert_eq!(inflated.center(), r.center());
    }

    #[test]
    fn quad_edge_lengths_match_rect() {
        let q = Quad::from_rect(&Rect::new(5.0, 5.0, 30.0, 40.0));
        assert_eq!(q.width(), 30.0);
        assert_eq!(q.height(), 40.0);
    }

    #[test]
    fn aabb_covers_all_corners() {
        let q = Quad {
            top_left: Vec2::new(0.0, 10.0),
            top_right: Vec2::new(10.0, 0.0),
            bottom_left: Vec2::new(10.0, 20.0),
            bottom_right: Vec2::new(20.0, 10.0),
        };
        assert_eq!(q.aabb(), Rect::new(0.0, 0.0, 20.0, 20.0));
    }

    #[test]
    fn rect_quads_are_axis_aligned() {
        let q = Quad::from_rect(&Rect::new(2.0, 3.0, 10.0, 5.0));
        assert!(q.is_axis_aligned(1e-6));
    }

    #[test]
    fn tilted_quads_are_not_axis_aligned() {
        let q = Quad {
            top_left: Vec2::new(0.0, 0.0),
            top_right: Vec2::new(9.0, 1.0),
            bottom_left: Vec2::new(-1.0, 5.0),
            bottom_right: Vec2::new(8.0, 6.0),
        };
        assert!(!q.is_axis_aligned(1e-6));
    }

    #[test]
    fn snap_rounds_each_corner() {
        let q = Quad::from_rect(&Rect::new(0.4, 0.6, 10.0, 10.0));
        let snapped = q.snap_to_pixels();
        assert_eq!(snapped.top_left, Vec2::new(0.0, 1.0));
        assert_eq!(snapped.bottom_right, Vec2::new(10.0, 11.0));
    }
}
