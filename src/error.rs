use std::path::PathBuf;

use crate::math::Size;

#[derive(Debug, thiserror::Error)]
pub enum ViewportError {
    #[error("failed to allocate {size} offscreen target: {reason}")]
    Allocation { size: Size, reason: String },
    #[error("failed to acquire surface texture: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable graphics adapter: {0}")]
    Adapter(String),
    #[error("failed to create graphics device: {0}")]
    Device(String),
    #[error("draw called outside of a frame")]
    NoActiveFrame,
    #[error("settings file {path}: {source}")]
    SettingsIo {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("settings are not valid JSON: {0}")]
    SettingsParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ViewportError>;
