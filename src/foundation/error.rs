/// Convenience result type used across the compositor.
pub type BillboardResult<T> = Result<T, BillboardError>;

/// Top-level error taxonomy used by compositing APIs.
#[derive(thiserror::Error, Debug)]
pub enum BillboardError {
    /// Frame corners are not exactly four finite, non-degenerate points.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Image buffers are empty or disagree in size.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// An option value could not be interpreted.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BillboardError {
    /// Build a [`BillboardError::InvalidGeometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    /// Build a [`BillboardError::DimensionMismatch`] value.
    pub fn dimensions(msg: impl Into<String>) -> Self {
        Self::DimensionMismatch(msg.into())
    }

    /// Build a [`BillboardError::InvalidConfiguration`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
