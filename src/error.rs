//! Error types for validation, rendering and saving.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A configuration option was not one of its accepted spellings.
///
/// Raised only while building a [`DocumentConfig`](crate::config::DocumentConfig);
/// construction never falls back to a default.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid value `{0}` for orientation")]
    InvalidOrientation(String),

    #[error("invalid value `{0}` for unit")]
    InvalidUnit(String),

    #[error("invalid value `{0}` for page format")]
    InvalidFormat(String),

    #[error("invalid value `{0}` for encoding")]
    InvalidEncoding(String),

    #[error("invalid value `{0}` for conformance mode")]
    InvalidConformance(String),
}

/// The rendering engine could not produce a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The page content handed to the engine is unusable.
    #[error("invalid content: {0}")]
    InvalidContent(String),

    #[error("rendering failed: {0}")]
    Failed(String),
}

/// Failure while saving a rendered document to disk.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Writing or flushing the temporary file failed. Nothing is visible at `path`.
    #[error("failed to write '{}': {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Moving the temporary file into place failed. Nothing new is visible at `path`.
    #[error("failed to move document into place at '{}': {source}", path.display())]
    RenameFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document was written, but its permissions could not be adjusted.
    #[error("document saved at '{}' but permissions could not be adjusted: {source}", path.display())]
    PermissionFixupFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SaveError {
    /// Whether the save actually failed. A permission fix-up failure leaves a
    /// complete file at the target path.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, SaveError::PermissionFixupFailed { .. })
    }
}
