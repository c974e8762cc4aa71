use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CameraError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid camera group: {0}")]
    InvalidGroup(String),

    #[error("Invalid camera group template: {0}")]
    InvalidTemplate(String),

    #[error("Camera manager is disposed: {0}")]
    Disposed(String),
}

pub type Result<T> = std::result::Result<T, CameraError>;
