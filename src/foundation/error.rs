/// Result alias used throughout the crate.
pub type FramemarkResult<T> = Result<T, FramemarkError>;

/// Errors surfaced by the annotation engine.
#[derive(thiserror::Error, Debug)]
pub enum FramemarkError {
    /// Input rejected before any state changed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Rasterization or compositing failed.
    #[error("render error: {0}")]
    Render(String),

    /// The annotation store rejected or failed an operation.
    #[error("store error: {0}")]
    Store(String),

    /// A document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other failure, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramemarkError {
    /// Build a [`FramemarkError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FramemarkError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FramemarkError::Store`].
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Build a [`FramemarkError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for FramemarkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
