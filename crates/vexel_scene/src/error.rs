//! Scene error types

use thiserror::Error;

/// Scene-layer errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Edge smoothness outside the atlas-safe range
    #[error("edge smoothness ({x}, {y}) outside [0, {max}]; smoothing this wide samples neighboring atlas textures")]
    EdgeSmoothnessOutOfRange { x: f32, y: f32, max: f32 },
}

/// Result type for scene operations
pub type Result<T> = std::result::Result<T, SceneError>;
