//! Fill-mode scaling
//!
//! How a sprite scales its content relative to the parent's available
//! draw size (CSS object-fit's older cousin).

use vexel_core::Vec2;

/// How content scales to the parent's available size
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FillMode {
    /// No automatic scaling
    #[default]
    None,
    /// Cover the parent completely, may overflow one axis (uniform)
    Fill,
    /// Fit entirely within the parent, may leave empty space (uniform)
    Fit,
    /// Match the parent independently per axis (non-uniform)
    Stretch,
}

/// Scale modifier for `mode`, given the content's natural size and the
/// parent's available size
///
/// Non-positive content dimensions default to 1 so the division can never
/// blow up; absent textures report their size that way.
pub fn fill_scale_modifier(mode: FillMode, content: Vec2, parent: Vec2) -> Vec2 {
    let cw = if content.x > 0.0 { content.x } else { 1.0 };
    let ch = if content.y > 0.0 { content.y } else { 1.0 };
    match mode {
        FillMode::None => Vec2::ONE,
        FillMode::Fill => Vec2::splat((parent.x / cw).max(parent.y / ch)),
        FillMode::Fit => Vec2::splat((parent.x / cw).min(parent.y / ch)),
        FillMode::Stretch => Vec2::new(parent.x / cw, parent.y / ch),
    }
}
