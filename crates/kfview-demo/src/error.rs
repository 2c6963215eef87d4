#![forbid(unsafe_code)]

use std::path::PathBuf;

use kfview_core::event::ParseKeyError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bad key script: {0}")]
    KeyScript(#[from] ParseKeyError),

    #[error("invalid scene file {path}: {message}")]
    SceneFile { path: PathBuf, message: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("cannot install log subscriber: {message}")]
    Logging { message: String },
}

impl DemoError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::KeyScript(_) | Self::InvalidArgument { .. } => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn scene_file(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SceneFile {
            path: path.into(),
            message: message.into(),
        }
    }
}
