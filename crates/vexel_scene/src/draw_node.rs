//! Draw-node snapshots
//!
//! A [`DrawNode`] is the immutable per-frame record the render context
//! consumes: everything needed to emit one drawable's GPU primitives,
//! copied out of the logic-side state once per frame.
//!
//! The logic context and the render context may run on different threads,
//! one frame out of phase. [`DrawNodeBuffer`] keeps that safe without
//! locks: snapshots live in a small ring of `Arc` slots, a slot is only
//! rewritten in place when the render context has dropped its handle to
//! it, and a still-held slot gets a fresh allocation instead. The render
//! context therefore never observes a snapshot change under it.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;
use vexel_core::{Quad, Rect, Vec2};

use crate::shader::ShaderHandle;
use crate::texture::TextureRef;

/// Immutable per-frame render state for one drawable
///
/// A `None` texture or shader means "draw nothing"; the render sink skips
/// the node without treating it as an error.
#[derive(Clone, Default)]
pub struct DrawNode {
    /// Final on-screen corners, pixel-snapped when the policy applied
    pub screen_space_quad: Quad,
    /// The drawable's rectangle in local space
    pub draw_rectangle: Rect,
    /// Texture to sample, shared with the logic side
    pub texture: Option<TextureRef>,
    /// Repeat the texture instead of clamping at the edges
    pub wrap_texture: bool,
    /// Plain textured-quad program
    pub texture_shader: Option<ShaderHandle>,
    /// Rounded-corner variant of the textured-quad program
    pub rounded_texture_shader: Option<ShaderHandle>,
    /// Edge-smoothing inflation baked into the quad, for the renderer to
    /// subtract back out
    pub inflation_amount: Vec2,
}

impl fmt::Debug for DrawNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawNode")
            .field("screen_space_quad", &self.screen_space_quad)
            .field("draw_rectangle", &self.draw_rectangle)
            .field("texture", &self.texture.as_ref().map(|t| t.asset_name().to_owned()))
            .field("wrap_texture", &self.wrap_texture)
            .field("texture_shader", &self.texture_shader)
            .field("rounded_texture_shader", &self.rounded_texture_shader)
            .field("inflation_amount", &self.inflation_amount)
            .finish()
    }
}

impl PartialEq for DrawNode {
    fn eq(&self, other: &Self) -> bool {
        let same_texture = match (&self.texture, &other.texture) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_texture
            && self.screen_space_quad == other.screen_space_quad
            && self.draw_rectangle == other.draw_rectangle
            && self.wrap_texture == other.wrap_texture
            && self.texture_shader == other.texture_shader
            && self.rounded_texture_shader == other.rounded_texture_shader
            && self.inflation_amount == other.inflation_amount
    }
}

/// Ring of snapshot slots alternating between logic and render contexts
///
/// At least two slots, so the logic context can populate "next" while the
/// render context reads "current". Slots are allocated lazily as frames
/// are produced.
pub struct DrawNodeBuffer {
    slots: SmallVec<[Arc<DrawNode>; 2]>,
    capacity: usize,
    next: usize,
    last: Option<usize>,
}

impl Default for DrawNodeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawNodeBuffer {
    /// Default number of slots: one being read, one being written
    pub const DEFAULT_SLOTS: usize = 2;

    pub fn new() -> Self {
        Self::with_slots(Self::DEFAULT_SLOTS)
    }

    /// A buffer with `capacity` slots
    ///
    /// # Panics
    ///
    /// Panics if `capacity < 2`; a single slot cannot separate the reader
    /// from the writer.
    pub fn with_slots(capacity: usize) -> Self {
        assert!(capacity >= 2, "draw node buffer needs at least two slots");
        Self {
            slots: SmallVec::new(),
            capacity,
            next: 0,
            last: None,
        }
    }

    /// Write the next snapshot and hand out its read-only handle
    ///
    /// The target slot is rewritten in place when the render context has
    /// released it; otherwise the write goes into a fresh allocation and
    /// the held snapshot stays untouched.
    pub fn populate(&mut self, fill: impl FnOnce(&mut DrawNode)) -> Arc<DrawNode> {
        let index = self.next;
        if self.slots.len() <= index {
            self.slots.push(Arc::new(DrawNode::default()));
        }
        let slot = &mut self.slots[index];
        match Arc::get_mut(slot) {
            Some(node) => fill(node),
            None => {
                tracing::trace!(slot = index, "snapshot slot still held; allocating fresh");
                let mut node = DrawNode::default();
                fill(&mut node);
                *slot = Arc::new(node);
            }
        }
        self.last = Some(index);
        self.next = (index + 1) % self.capacity;
        Arc::clone(&self.slots[index])
    }

    /// Handle to the most recently populated snapshot, if any
    pub fn current(&self) -> Option<Arc<DrawNode>> {
        self.last.map(|i| Arc::clone(&self.slots[i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::AtlasTexture;

    fn texture(name: &str) -> TextureRef {
        Arc::new(AtlasTexture::new(name, 16, 16))
    }

    #[test]
    fn populate_hands_out_written_snapshot() {
        let mut buffer = DrawNodeBuffer::new();
        let tex = texture("a.png");
        let node = buffer.populate(|n| {
            n.texture = Some(Arc::clone(&tex));
            n.wrap_texture = true;
        });
        assert!(node.wrap_texture);
        assert!(Arc::ptr_eq(node.texture.as_ref().unwrap(), &tex));
        assert_eq!(buffer.current().unwrap(), node);
    }

    #[test]
    fn repeated_population_with_same_state_is_idempotent() {
        let mut buffer = DrawNodeBuffer::new();
        let tex = texture("a.png");
        let fill = |tex: TextureRef| {
            move |n: &mut DrawNode| {
                n.texture = Some(tex);
                n.inflation_amount = Vec2::new(0.5, 0.5);
                n.texture_shader = Some(ShaderHandle(7));
            }
        };
        let first = buffer.populate(fill(Arc::clone(&tex)));
        let second = buffer.populate(fill(Arc::clone(&tex)));
        assert_eq!(*first, *second);
    }

    #[test]
    fn held_snapshot_is_never_rewritten() {
        let mut buffer = DrawNodeBuffer::new();
        let held = buffer.populate(|n| n.wrap_texture = true);

        // Two more frames wrap the ring back onto the held slot.
        buffer.populate(|n| n.wrap_texture = false);
        let third = buffer.populate(|n| n.wrap_texture = false);

        assert!(held.wrap_texture);
        assert!(!third.wrap_texture);
        assert!(!Arc::ptr_eq(&held, &third));
    }

    #[test]
    fn released_slot_is_reused_in_place() {
        let mut buffer = DrawNodeBuffer::new();
        drop(buffer.populate(|n| n.wrap_texture = true));
        drop(buffer.populate(|_| {}));
        // Slot 0 is free again; this population may rewrite it in place.
        let node = buffer.populate(|n| n.wrap_texture = false);
        assert!(!node.wrap_texture);
    }

    #[test]
    #[should_panic(expected = "at least two slots")]
    fn single_slot_buffer_is_rejected() {
        let _ = DrawNodeBuffer::with_slots(1);
    }
}
