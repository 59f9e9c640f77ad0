//! Drawable kinds
//!
//! The set of drawable kinds is closed: each kind is a variant of
//! [`Drawable`], selected at construction time, and every kind implements
//! the [`DrawNodeSource`] capability the frame-snapshot pass runs against.
//! New kinds extend the enum rather than opening up runtime polymorphism.

use std::fmt;
use std::sync::Arc;

use vexel_core::{Transform2D, Vec2};

use crate::draw_node::DrawNode;
use crate::sprite::Sprite;

/// Capability to produce per-frame draw-node snapshots
pub trait DrawNodeSource {
    /// Produce this frame's snapshot handle
    fn populate_draw_node(&mut self) -> Arc<DrawNode>;

    /// Human-readable description of the node, for diagnostics
    fn describe(&self) -> String;
}

impl DrawNodeSource for Sprite {
    fn populate_draw_node(&mut self) -> Arc<DrawNode> {
        Sprite::populate_draw_node(self)
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

/// A node in the scene graph, tagged by kind
pub enum Drawable {
    Sprite(Sprite),
}

impl Drawable {
    /// Recompute screen-space geometry if it is stale
    pub fn update_geometry(&mut self, parent_size: Vec2, parent_transform: &Transform2D) {
        match self {
            Drawable::Sprite(sprite) => sprite.update_geometry(parent_size, parent_transform),
        }
    }
}

impl DrawNodeSource for Drawable {
    fn populate_draw_node(&mut self) -> Arc<DrawNode> {
        match self {
            Drawable::Sprite(sprite) => sprite.populate_draw_node(),
        }
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl From<Sprite> for Drawable {
    fn from(sprite: Sprite) -> Self {
        Drawable::Sprite(sprite)
    }
}

impl fmt::Display for Drawable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Drawable::Sprite(sprite) => fmt::Display::fmt(sprite, f),
        }
    }
}
