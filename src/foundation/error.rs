use crate::foundation::core::{FixtureId, PatchId};

/// Convenience result type used across pixelmap.
pub type PixelMapResult<T> = Result<T, PixelMapError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Out-of-range numeric input is clamped at assignment and never surfaces here.
#[derive(thiserror::Error, Debug)]
pub enum PixelMapError {
    /// Invalid engine configuration or malformed host-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A fixture handle that no longer (or never) resolved to a live fixture.
    #[error("unknown fixture: {0}")]
    UnknownFixture(FixtureId),

    /// A patch handle that no longer (or never) resolved to a live patch.
    #[error("unknown patch: {0}")]
    UnknownPatch(PatchId),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PixelMapError {
    /// Build a [`PixelMapError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
