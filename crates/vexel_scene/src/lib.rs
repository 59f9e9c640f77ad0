//! Vexel Scene Drawables
//!
//! The drawable-to-GPU translation layer of the Vexel scene graph. A
//! [`Sprite`] computes its final on-screen geometry on the logic thread
//! and produces immutable [`DrawNode`] snapshots that a rendering backend
//! consumes on the render thread, one frame out of phase, without locks.
//!
//! - **Geometry**: [`quad`] turns local rectangles into screen-space
//!   quads, with edge-smoothing inflation and pixel snapping
//! - **Scaling**: [`fill`] maps a declared [`FillMode`] to an effective
//!   scale against the parent's available size
//! - **Snapshots**: [`draw_node`] holds the double-buffered snapshot
//!   protocol that keeps the two threads from tearing each other
//! - **Orchestration**: [`sprite`] wires texture lifecycle, invalidation,
//!   layout, and snapshot population together
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use vexel_core::{Transform2D, Vec2};
//! use vexel_scene::{AtlasTexture, Sprite, TextureRef};
//!
//! let texture: TextureRef = Arc::new(AtlasTexture::new("hero.png", 64, 32));
//!
//! let mut sprite = Sprite::new();
//! sprite.set_texture(Some(texture), true);
//! assert_eq!(sprite.size(), Vec2::new(64.0, 32.0));
//!
//! sprite.update_geometry(Vec2::new(800.0, 600.0), &Transform2D::identity());
//! let snapshot = sprite.populate_draw_node();
//! // `snapshot` is safe to hand to a render thread.
//! assert_eq!(snapshot.screen_space_quad.width(), 64.0);
//! ```

pub mod draw_node;
pub mod drawable;
pub mod error;
pub mod fill;
pub mod quad;
pub mod shader;
pub mod sprite;
pub mod texture;

pub use draw_node::{DrawNode, DrawNodeBuffer};
pub use drawable::{DrawNodeSource, Drawable};
pub use error::{Result, SceneError};
pub use fill::{fill_scale_modifier, FillMode};
pub use quad::{
    compute_screen_space_quad, should_force_pixel_snap, EdgeSmoothness, MAX_EDGE_SMOOTHNESS,
};
pub use shader::{FragmentKind, ShaderHandle, ShaderProvider, VertexKind};
pub use sprite::{Invalidation, Sprite};
pub use texture::{AtlasTexture, Texture, TextureRef};
