//! The sprite drawable
//!
//! A textured rectangle in the scene graph. The logic context mutates its
//! properties through explicit methods that record what got invalidated;
//! the layout pass recomputes screen-space geometry when it is dirty, and
//! the frame-snapshot pass copies the result into a [`DrawNode`] handed to
//! the render context.

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;
use vexel_core::{Quad, Rect, Transform2D, Vec2};

use crate::draw_node::{DrawNode, DrawNodeBuffer};
use crate::fill::{fill_scale_modifier, FillMode};
use crate::quad::{compute_screen_space_quad, should_force_pixel_snap, EdgeSmoothness};
use crate::shader::{FragmentKind, ShaderHandle, ShaderProvider, VertexKind};
use crate::texture::TextureRef;

bitflags! {
    /// Which derived state is stale
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Invalidation: u8 {
        /// Screen-space quad and inflation need recomputing
        const GEOMETRY = 1 << 0;
        /// The next frame snapshot must be repopulated
        const DRAW_NODE = 1 << 1;
    }
}

/// A textured rectangle drawable
pub struct Sprite {
    position: Vec2,
    size: Vec2,
    scale: Vec2,
    rotation: f32,
    fill_mode: FillMode,
    edge_smoothness: EdgeSmoothness,
    wrap_texture: bool,

    texture: Option<TextureRef>,
    can_dispose_texture: bool,

    texture_shader: Option<ShaderHandle>,
    rounded_texture_shader: Option<ShaderHandle>,

    invalidation: Invalidation,
    screen_space_quad: Quad,
    inflation_amount: Vec2,
    draw_node_buffer: Option<DrawNodeBuffer>,
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new()
    }
}

impl Sprite {
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            size: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
            fill_mode: FillMode::None,
            edge_smoothness: EdgeSmoothness::NONE,
            wrap_texture: false,
            texture: None,
            can_dispose_texture: false,
            texture_shader: None,
            rounded_texture_shader: None,
            invalidation: Invalidation::all(),
            screen_space_quad: Quad::default(),
            inflation_amount: Vec2::ZERO,
            draw_node_buffer: None,
        }
    }

    /// Explicit init step: fetch the shader programs this sprite draws with
    ///
    /// An unavailable program stays `None` and the sprite simply produces
    /// snapshots the render sink skips.
    pub fn load_shaders(&mut self, provider: &dyn ShaderProvider) {
        self.texture_shader = provider.load(VertexKind::Texture2D, FragmentKind::Texture);
        self.rounded_texture_shader =
            provider.load(VertexKind::Texture2D, FragmentKind::TextureRounded);
        if self.texture_shader.is_none() || self.rounded_texture_shader.is_none() {
            tracing::warn!("texture shaders unavailable; sprite will not draw");
        }
        self.invalidate(Invalidation::DRAW_NODE);
    }

    // =========================================================================
    // Texture lifecycle
    // =========================================================================

    pub fn texture(&self) -> Option<&TextureRef> {
        self.texture.as_ref()
    }

    pub fn can_dispose_texture(&self) -> bool {
        self.can_dispose_texture
    }

    /// Assign or clear the texture
    ///
    /// Reference-identical assignment is a no-op. A previously owned
    /// texture is disposed before being replaced. A sprite whose size is
    /// still zero adopts the new texture's display size; a sprite that was
    /// ever sized keeps its size.
    ///
    /// `can_dispose` grants this sprite dispose authority over the new
    /// texture. Never grant it to two holders of the same texture.
    pub fn set_texture(&mut self, texture: Option<TextureRef>, can_dispose: bool) {
        match (&texture, &self.texture) {
            (Some(new), Some(current)) if Arc::ptr_eq(new, current) => return,
            (None, None) => return,
            _ => {}
        }

        if self.can_dispose_texture {
            if let Some(old) = self.texture.take() {
                old.dispose();
            }
        }

        self.texture = texture;
        self.can_dispose_texture = can_dispose && self.texture.is_some();

        if let Some(tex) = &self.texture {
            tracing::debug!(asset = tex.asset_name(), "sprite texture set");
            if self.size == Vec2::ZERO {
                self.size = Vec2::new(tex.display_width(), tex.display_height());
            }
        }

        self.invalidate(Invalidation::GEOMETRY | Invalidation::DRAW_NODE);
    }

    // =========================================================================
    // Property mutation
    // =========================================================================

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        if self.position != position {
            self.position = position;
            self.invalidate(Invalidation::GEOMETRY | Invalidation::DRAW_NODE);
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_size(&mut self, size: Vec2) {
        if self.size != size {
            self.size = size;
            self.invalidate(Invalidation::GEOMETRY | Invalidation::DRAW_NODE);
        }
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        if self.scale != scale {
            self.scale = scale;
            self.invalidate(Invalidation::GEOMETRY | Invalidation::DRAW_NODE);
        }
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, radians: f32) {
        if self.rotation != radians {
            self.rotation = radians;
            self.invalidate(Invalidation::GEOMETRY | Invalidation::DRAW_NODE);
        }
    }

    pub fn fill_mode(&self) -> FillMode {
        self.fill_mode
    }

    pub fn set_fill_mode(&mut self, mode: FillMode) {
        if self.fill_mode != mode {
            self.fill_mode = mode;
            self.invalidate(Invalidation::GEOMETRY | Invalidation::DRAW_NODE);
        }
    }

    pub fn edge_smoothness(&self) -> EdgeSmoothness {
        self.edge_smoothness
    }

    pub fn set_edge_smoothness(&mut self, smoothness: EdgeSmoothness) {
        if self.edge_smoothness != smoothness {
            self.edge_smoothness = smoothness;
            self.invalidate(Invalidation::GEOMETRY | Invalidation::DRAW_NODE);
        }
    }

    pub fn wrap_texture(&self) -> bool {
        self.wrap_texture
    }

    pub fn set_wrap_texture(&mut self, wrap: bool) {
        if self.wrap_texture != wrap {
            self.wrap_texture = wrap;
            self.invalidate(Invalidation::DRAW_NODE);
        }
    }

    pub fn invalidation(&self) -> Invalidation {
        self.invalidation
    }

    fn invalidate(&mut self, what: Invalidation) {
        self.invalidation.insert(what);
    }

    // =========================================================================
    // Layout pass
    // =========================================================================

    /// The sprite's rectangle in its own local space
    pub fn draw_rectangle(&self) -> Rect {
        Rect::from_size(self.size)
    }

    /// Effective scale under the current fill mode
    ///
    /// For non-`None` fill modes the modifier computed against the
    /// texture's natural size and the parent's available size replaces the
    /// sprite's own scale before being returned; `None` passes the base
    /// scale through untouched.
    pub fn draw_scale(&mut self, parent_size: Vec2) -> Vec2 {
        if self.fill_mode == FillMode::None {
            return self.scale;
        }
        let content = match &self.texture {
            Some(tex) => Vec2::new(tex.width() as f32, tex.height() as f32),
            None => Vec2::ONE,
        };
        let modifier = fill_scale_modifier(self.fill_mode, content, parent_size);
        self.set_scale(modifier);
        self.scale
    }

    /// Recompute screen-space geometry if it is stale
    ///
    /// `parent_transform` is the accumulated ancestor chain;
    /// `parent_size` is the parent's available draw size, consumed by the
    /// fill-mode scaler.
    pub fn update_geometry(&mut self, parent_size: Vec2, parent_transform: &Transform2D) {
        if !self.invalidation.contains(Invalidation::GEOMETRY) {
            return;
        }

        let scale = self.draw_scale(parent_size);
        let to_screen = Transform2D::scale(scale.x, scale.y)
            .then(&Transform2D::rotation(self.rotation))
            .then(&Transform2D::translation(self.position.x, self.position.y))
            .then(parent_transform);

        let (mut quad, inflation) =
            compute_screen_space_quad(&self.draw_rectangle(), &to_screen, self.edge_smoothness);
        if should_force_pixel_snap(&quad, self.rotation) {
            quad = quad.snap_to_pixels();
        }

        self.screen_space_quad = quad;
        self.inflation_amount = inflation;
        self.invalidation.remove(Invalidation::GEOMETRY);
        self.invalidation.insert(Invalidation::DRAW_NODE);
    }

    /// Screen-space quad from the last layout pass
    pub fn screen_space_quad(&self) -> Quad {
        self.screen_space_quad
    }

    /// Smoothing inflation from the last layout pass
    pub fn inflation_amount(&self) -> Vec2 {
        self.inflation_amount
    }

    // =========================================================================
    // Frame snapshot pass
    // =========================================================================

    /// Produce this frame's snapshot handle
    ///
    /// Population is skipped when nothing relevant changed since the last
    /// snapshot; the previous handle is returned unchanged.
    pub fn populate_draw_node(&mut self) -> Arc<DrawNode> {
        if !self.invalidation.contains(Invalidation::DRAW_NODE) {
            if let Some(current) = self.draw_node_buffer.as_ref().and_then(DrawNodeBuffer::current)
            {
                return current;
            }
        }

        let screen_space_quad = self.screen_space_quad;
        let draw_rectangle = self.draw_rectangle();
        let texture = self.texture.clone();
        let wrap_texture = self.wrap_texture;
        let texture_shader = self.texture_shader;
        let rounded_texture_shader = self.rounded_texture_shader;
        let inflation_amount = self.inflation_amount;

        let buffer = self.draw_node_buffer.get_or_insert_with(DrawNodeBuffer::new);
        let node = buffer.populate(move |n| {
            n.screen_space_quad = screen_space_quad;
            n.draw_rectangle = draw_rectangle;
            n.texture = texture;
            n.wrap_texture = wrap_texture;
            n.texture_shader = texture_shader;
            n.rounded_texture_shader = rounded_texture_shader;
            n.inflation_amount = inflation_amount;
        });
        self.invalidation.remove(Invalidation::DRAW_NODE);
        node
    }

    // =========================================================================
    // Cloning
    // =========================================================================

    /// Duplicate this sprite, sharing the texture reference
    ///
    /// The clone never inherits dispose authority: two sprites may point
    /// at one texture, but only the original can release it.
    pub fn clone_node(&self) -> Sprite {
        Sprite {
            position: self.position,
            size: self.size,
            scale: self.scale,
            rotation: self.rotation,
            fill_mode: self.fill_mode,
            edge_smoothness: self.edge_smoothness,
            wrap_texture: self.wrap_texture,
            texture: self.texture.clone(),
            can_dispose_texture: false,
            texture_shader: self.texture_shader,
            rounded_texture_shader: self.rounded_texture_shader,
            invalidation: Invalidation::all(),
            screen_space_quad: Quad::default(),
            inflation_amount: Vec2::ZERO,
            draw_node_buffer: None,
        }
    }
}

impl fmt::Display for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.texture {
            Some(tex) => write!(f, "Sprite (tex: {})", tex.asset_name()),
            None => write!(f, "Sprite (no texture)"),
        }
    }
}

impl Drop for Sprite {
    fn drop(&mut self) {
        if self.can_dispose_texture {
            if let Some(tex) = self.texture.take() {
                tex.dispose();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::Texture;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Texture that counts dispose calls
    struct CountingTexture {
        name: String,
        width: u32,
        height: u32,
        disposals: AtomicUsize,
    }

    impl CountingTexture {
        fn new(name: &str, width: u32, height: u32) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_owned(),
                width,
                height,
                disposals: AtomicUsize::new(0),
            })
        }

        fn disposals(&self) -> usize {
            self.disposals.load(Ordering::SeqCst)
        }
    }

    impl Texture for CountingTexture {
        fn display_width(&self) -> f32 {
            self.width as f32
        }

        fn display_height(&self) -> f32 {
            self.height as f32
        }

        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        fn asset_name(&self) -> &str {
            &self.name
        }

        fn dispose(&self) {
            self.disposals.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct FixedShaders;

    impl ShaderProvider for FixedShaders {
        fn load(&self, _vertex: VertexKind, fragment: FragmentKind) -> Option<ShaderHandle> {
            match fragment {
                FragmentKind::Texture => Some(ShaderHandle(1)),
                FragmentKind::TextureRounded => Some(ShaderHandle(2)),
            }
        }
    }

    struct NoShaders;

    impl ShaderProvider for NoShaders {
        fn load(&self, _vertex: VertexKind, _fragment: FragmentKind) -> Option<ShaderHandle> {
            None
        }
    }

    fn laid_out(sprite: &mut Sprite) {
        sprite.update_geometry(Vec2::new(100.0, 100.0), &Transform2D::identity());
    }

    #[test]
    fn unsized_sprite_adopts_texture_display_size_once() {
        let mut sprite = Sprite::new();
        sprite.set_texture(Some(CountingTexture::new("a.png", 64, 32)), false);
        assert_eq!(sprite.size(), Vec2::new(64.0, 32.0));

        sprite.set_texture(Some(CountingTexture::new("b.png", 128, 128)), false);
        assert_eq!(sprite.size(), Vec2::new(64.0, 32.0));
    }

    #[test]
    fn replacing_owned_texture_disposes_it_exactly_once() {
        let first = CountingTexture::new("first.png", 16, 16);
        let second = CountingTexture::new("second.png", 16, 16);

        let mut sprite = Sprite::new();
        sprite.set_texture(Some(first.clone()), true);
        sprite.set_texture(Some(second.clone()), true);

        assert_eq!(first.disposals(), 1);
        assert_eq!(second.disposals(), 0);
    }

    #[test]
    fn reference_identical_assignment_is_a_no_op() {
        let tex = CountingTexture::new("a.png", 16, 16);
        let mut sprite = Sprite::new();
        sprite.set_texture(Some(tex.clone()), true);
        laid_out(&mut sprite);
        let before = sprite.invalidation();

        sprite.set_texture(Some(tex.clone()), true);
        assert_eq!(tex.disposals(), 0);
        assert_eq!(sprite.invalidation(), before);
    }

    #[test]
    fn drop_disposes_owned_texture() {
        let tex = CountingTexture::new("a.png", 16, 16);
        {
            let mut sprite = Sprite::new();
            sprite.set_texture(Some(tex.clone()), true);
        }
        assert_eq!(tex.disposals(), 1);
    }

    #[test]
    fn drop_leaves_shared_texture_alone() {
        let tex = CountingTexture::new("a.png", 16, 16);
        {
            let mut sprite = Sprite::new();
            sprite.set_texture(Some(tex.clone()), false);
        }
        assert_eq!(tex.disposals(), 0);
    }

    #[test]
    fn clone_shares_texture_without_dispose_authority() {
        let tex = CountingTexture::new("a.png", 16, 16);
        let mut sprite = Sprite::new();
        sprite.set_texture(Some(tex.clone()), true);

        {
            let clone = sprite.clone_node();
            assert!(Arc::ptr_eq(
                clone.texture().unwrap(),
                sprite.texture().unwrap()
            ));
            assert!(!clone.can_dispose_texture());
        }
        // Clone teardown must not have released the shared texture.
        assert_eq!(tex.disposals(), 0);

        drop(sprite);
        assert_eq!(tex.disposals(), 1);
    }

    #[test]
    fn fill_mode_fit_writes_modifier_back_into_scale() {
        let mut sprite = Sprite::new();
        sprite.set_texture(Some(CountingTexture::new("a.png", 200, 100)), false);
        sprite.set_fill_mode(FillMode::Fit);

        let scale = sprite.draw_scale(Vec2::new(100.0, 100.0));
        assert_eq!(scale, Vec2::splat(0.5));
        assert_eq!(sprite.scale(), Vec2::splat(0.5));
    }

    #[test]
    fn fill_mode_none_passes_base_scale_through() {
        let mut sprite = Sprite::new();
        sprite.set_scale(Vec2::new(3.0, 4.0));
        assert_eq!(sprite.draw_scale(Vec2::new(100.0, 100.0)), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn geometry_pass_applies_pixel_snapping() {
        let mut sprite = Sprite::new();
        sprite.set_size(Vec2::new(10.0, 5.0));
        sprite.set_position(Vec2::new(3.3, 7.7));
        laid_out(&mut sprite);

        let quad = sprite.screen_space_quad();
        assert_eq!(quad.top_left, Vec2::new(3.0, 8.0));
        assert_eq!(quad.width(), 10.0);
    }

    #[test]
    fn rotated_sprite_is_not_snapped() {
        let mut sprite = Sprite::new();
        sprite.set_size(Vec2::new(10.0, 5.0));
        sprite.set_position(Vec2::new(3.3, 7.7));
        sprite.set_rotation(std::f32::consts::FRAC_PI_4);
        laid_out(&mut sprite);

        let quad = sprite.screen_space_quad();
        assert!((quad.top_left.x - 3.3).abs() < 1e-5);
    }

    #[test]
    fn smoothed_sprite_reports_inflation() {
        let mut sprite = Sprite::new();
        sprite.set_size(Vec2::new(10.0, 10.0));
        sprite.set_edge_smoothness(EdgeSmoothness::new(1.0, 1.0).unwrap());
        laid_out(&mut sprite);

        // Identity transform: inverse scale is one, inflation equals the
        // smoothing itself.
        assert_eq!(sprite.inflation_amount(), Vec2::ONE);
        assert_eq!(sprite.screen_space_quad().width(), 12.0);
    }

    #[test]
    fn snapshot_carries_current_state() {
        let tex: TextureRef = CountingTexture::new("a.png", 64, 32);
        let mut sprite = Sprite::new();
        sprite.load_shaders(&FixedShaders);
        sprite.set_texture(Some(tex.clone()), false);
        sprite.set_wrap_texture(true);
        laid_out(&mut sprite);

        let node = sprite.populate_draw_node();
        assert!(Arc::ptr_eq(node.texture.as_ref().unwrap(), &tex));
        assert!(node.wrap_texture);
        assert_eq!(node.texture_shader, Some(ShaderHandle(1)));
        assert_eq!(node.rounded_texture_shader, Some(ShaderHandle(2)));
        assert_eq!(node.draw_rectangle, Rect::new(0.0, 0.0, 64.0, 32.0));
        assert_eq!(node.screen_space_quad, sprite.screen_space_quad());
    }

    #[test]
    fn clean_sprite_returns_existing_snapshot() {
        let mut sprite = Sprite::new();
        sprite.load_shaders(&FixedShaders);
        sprite.set_texture(Some(CountingTexture::new("a.png", 8, 8)), false);
        laid_out(&mut sprite);

        let first = sprite.populate_draw_node();
        let second = sprite.populate_draw_node();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn repopulation_after_unrelated_frames_is_idempotent() {
        let mut sprite = Sprite::new();
        sprite.load_shaders(&FixedShaders);
        sprite.set_texture(Some(CountingTexture::new("a.png", 8, 8)), false);
        laid_out(&mut sprite);

        let first = sprite.populate_draw_node();
        // Touch and revert a property so the snapshot goes stale without a
        // real state change.
        sprite.set_wrap_texture(true);
        sprite.set_wrap_texture(false);
        let second = sprite.populate_draw_node();
        assert_eq!(*first, *second);
    }

    #[test]
    fn missing_shaders_produce_an_undrawable_snapshot() {
        let mut sprite = Sprite::new();
        sprite.load_shaders(&NoShaders);
        laid_out(&mut sprite);

        let node = sprite.populate_draw_node();
        assert!(node.texture.is_none());
        assert!(node.texture_shader.is_none());
    }

    #[test]
    fn display_names_the_asset() {
        let mut sprite = Sprite::new();
        assert_eq!(sprite.to_string(), "Sprite (no texture)");
        sprite.set_texture(Some(CountingTexture::new("hero.png", 8, 8)), false);
        assert_eq!(sprite.to_string(), "Sprite (tex: hero.png)");
    }

    #[test]
    fn clean_geometry_is_not_recomputed() {
        let mut sprite = Sprite::new();
        sprite.set_size(Vec2::new(10.0, 10.0));
        laid_out(&mut sprite);
        let quad = sprite.screen_space_quad();

        // A second pass with a different parent transform is skipped while
        // geometry is clean.
        sprite.update_geometry(Vec2::new(100.0, 100.0), &Transform2D::translation(50.0, 0.0));
        assert_eq!(sprite.screen_space_quad(), quad);
    }
}
