//! Vexel Core Geometry
//!
//! Foundational value types for the Vexel scene graph:
//!
//! - **Primitives**: `Vec2`, `Rect`, and `Quad` - plain `#[repr(C)]` data
//!   shared between the layout pass and the GPU renderer
//! - **Transforms**: `Transform2D` - 2D affine transforms with inverse and
//!   scale extraction, used to carry drawables into screen space
//!
//! # Example
//!
//! ```rust
//! use vexel_core::{Rect, Transform2D};
//!
//! let local = Rect::new(0.0, 0.0, 64.0, 32.0);
//! let to_screen = Transform2D::scale(2.0, 2.0).then(&Transform2D::translation(10.0, 10.0));
//! let quad = to_screen.apply_rect(&local);
//! assert_eq!(quad.top_left.x, 10.0);
//! assert_eq!(quad.bottom_right.y, 74.0);
//! ```

pub mod primitives;
pub mod transform;

pub use primitives::{Quad, Rect, Vec2};
pub use transform::Transform2D;
