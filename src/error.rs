use thiserror::Error;

/// Everything that can go wrong while generating, measuring or drawing a walk.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("walk has no points")]
    EmptyWalk,
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl WalkError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        WalkError::InvalidConfiguration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, WalkError>;
