//! Shader handles and the provider seam
//!
//! Shader compilation lives outside this crate. Drawables ask a
//! [`ShaderProvider`] for compiled program handles during their explicit
//! init step; an unavailable program is `None`, which downstream consumers
//! treat as "skip drawing", never as an error.

/// Opaque handle to a compiled shader program
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Vertex program kinds used by drawables
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VertexKind {
    Texture2D,
}

/// Fragment program kinds used by drawables
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    Texture,
    TextureRounded,
}

/// Source of compiled shader programs
pub trait ShaderProvider {
    /// Load a compiled program, or `None` when unavailable
    fn load(&self, vertex: VertexKind, fragment: FragmentKind) -> Option<ShaderHandle>;
}
