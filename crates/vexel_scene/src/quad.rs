//! Screen-space draw-quad computation
//!
//! Turns a drawable's local rectangle plus its cumulative local-to-screen
//! transform into the quad the renderer consumes. Edge smoothing inflates
//! the rectangle in local space *before* transforming, so the smoothing
//! border rotates and scales with the content; the inflation amount itself
//! is derived from the inverse transform so the renderer can subtract it
//! back out in its antialiasing math.

use vexel_core::{Quad, Rect, Transform2D, Vec2};

use crate::error::{Result, SceneError};

/// Maximum edge smoothing per axis, in local units
///
/// Smoothing wider than this samples neighboring textures when the texture
/// lives in a shared atlas.
pub const MAX_EDGE_SMOOTHNESS: f32 = 2.0;

/// How many local units of the sprite's border are smoothed, per axis
///
/// Bounded to `[0, MAX_EDGE_SMOOTHNESS]` by construction: [`new`] rejects
/// out-of-range values, [`clamped`] pulls them into range with a warning.
///
/// [`new`]: EdgeSmoothness::new
/// [`clamped`]: EdgeSmoothness::clamped
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeSmoothness {
    x: f32,
    y: f32,
}

impl EdgeSmoothness {
    /// No smoothing
    pub const NONE: EdgeSmoothness = EdgeSmoothness { x: 0.0, y: 0.0 };

    /// Strict constructor: out-of-range smoothing is an error
    pub fn new(x: f32, y: f32) -> Result<Self> {
        if !(0.0..=MAX_EDGE_SMOOTHNESS).contains(&x) || !(0.0..=MAX_EDGE_SMOOTHNESS).contains(&y) {
            return Err(SceneError::EdgeSmoothnessOutOfRange {
                x,
                y,
                max: MAX_EDGE_SMOOTHNESS,
            });
        }
        Ok(Self { x, y })
    }

    /// Lenient constructor: clamps into the atlas-safe range
    pub fn clamped(x: f32, y: f32) -> Self {
        let cx = x.clamp(0.0, MAX_EDGE_SMOOTHNESS);
        let cy = y.clamp(0.0, MAX_EDGE_SMOOTHNESS);
        if cx != x || cy != y {
            tracing::warn!(
                x,
                y,
                max = MAX_EDGE_SMOOTHNESS,
                "edge smoothness clamped to atlas-safe range"
            );
        }
        Self { x: cx, y: cy }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn is_none(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Compute the final screen-space quad plus the smoothing inflation amount
///
/// With no smoothing the transform is applied directly and the inflation is
/// zero. Otherwise the local rectangle grows by the inflation on every side
/// (recentered) before transforming; the inflation is the smoothing scaled
/// by the inverse transform's per-axis scale factors.
pub fn compute_screen_space_quad(
    local_rect: &Rect,
    to_screen: &Transform2D,
    smoothness: EdgeSmoothness,
) -> (Quad, Vec2) {
    if smoothness.is_none() {
        return (to_screen.apply_rect(local_rect), Vec2::ZERO);
    }

    // A degenerate transform collapses the quad anyway; fall back to an
    // unscaled inflation rather than dropping the smoothing entirely.
    let inverse_scale = match to_screen.inverse() {
        Some(inv) => inv.extract_scale(),
        None => Vec2::ONE,
    };
    let inflation = Vec2::new(
        inverse_scale.x * smoothness.x(),
        inverse_scale.y * smoothness.y(),
    );
    (
        to_screen.apply_rect(&local_rect.inflate(inflation)),
        inflation,
    )
}

/// Whether screen-space coordinates should be forced to integer pixels
///
/// True only for unrotated content whose quad is within 0.1 units of an
/// integer size on both axes. Snapping rotated or fractionally-sized
/// content would visibly distort it; near-integer axis-aligned content
/// gets crisp edges instead of sub-pixel blur.
pub fn should_force_pixel_snap(quad: &Quad, rotation: f32) -> bool {
    const TOLERANCE: f32 = 0.1;
    rotation == 0.0
        && (quad.width() - quad.width().round()).abs() < TOLERANCE
        && (quad.height() - quad.height().round()).abs() < TOLERANCE
}
