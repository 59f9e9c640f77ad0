//! Texture references
//!
//! The GPU texture object itself lives outside this crate; drawables hold
//! it through the [`Texture`] trait. Display dimensions are what layout
//! sees (DPI-scaled), native dimensions are the pixel size fill-mode
//! scaling divides by.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A GPU texture as seen by the scene graph
pub trait Texture: Send + Sync {
    /// Width as used for layout
    fn display_width(&self) -> f32;

    /// Height as used for layout
    fn display_height(&self) -> f32;

    /// Native pixel width
    fn width(&self) -> u32;

    /// Native pixel height
    fn height(&self) -> u32;

    /// Asset identifier, for diagnostics
    fn asset_name(&self) -> &str;

    /// Release the GPU resource
    ///
    /// Must be idempotent: disposing an already-disposed texture is a
    /// no-op, never an error.
    fn dispose(&self);
}

/// Shared texture reference
///
/// Several drawables may hold the same texture; dispose authority belongs
/// to at most one of them (the `can_dispose` holder).
pub type TextureRef = Arc<dyn Texture>;

/// Texture backed by a region of a shared atlas
///
/// The in-tree [`Texture`] implementation. The disposed latch makes
/// `dispose` idempotent, so a second call (clone teardown, host bug)
/// cannot double-free the underlying GPU resource.
pub struct AtlasTexture {
    asset_name: String,
    width: u32,
    height: u32,
    display_width: f32,
    display_height: f32,
    disposed: AtomicBool,
}

impl AtlasTexture {
    /// Create a texture whose display size equals its native size
    pub fn new(asset_name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            asset_name: asset_name.into(),
            width,
            height,
            display_width: width as f32,
            display_height: height as f32,
            disposed: AtomicBool::new(false),
        }
    }

    /// Override the display size (DPI scaling)
    pub fn with_display_size(mut self, display_width: f32, display_height: f32) -> Self {
        self.display_width = display_width;
        self.display_height = display_height;
        self
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

impl Texture for AtlasTexture {
    fn display_width(&self) -> f32 {
        self.display_width
    }

    fn display_height(&self) -> f32 {
        self.display_height
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn asset_name(&self) -> &str {
        &self.asset_name
    }

    fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            tracing::trace!(asset = %self.asset_name, "dispose on already-disposed texture ignored");
        } else {
            tracing::debug!(asset = %self.asset_name, "texture disposed");
        }
    }
}
