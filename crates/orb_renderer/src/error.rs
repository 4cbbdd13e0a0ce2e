//! Error types for the renderer.

use std::path::PathBuf;

use orb_math::Vec3;
use thiserror::Error;

/// Errors that can occur while setting up or writing a render.
///
/// Missing an object, running out of bounces and absorption are normal
/// outcomes of tracing and never show up here.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Degenerate ray direction: {direction}")]
    DegenerateRay { direction: Vec3 },

    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Invalid viewport width: {0}")]
    InvalidViewport(f32),

    #[error("Camera used before initialize()")]
    CameraNotInitialized,

    #[error("Camera resolution {camera_width}x{camera_height} does not match config {width}x{height}")]
    CameraMismatch {
        camera_width: u32,
        camera_height: u32,
        width: u32,
        height: u32,
    },

    #[error("Invalid render config: {0}")]
    InvalidConfig(String),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse config {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type RenderResult<T> = Result<T, RenderError>;
