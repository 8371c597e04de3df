use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single artwork source
///
/// These never reach the caller of a lookup: the resolver logs them and
/// moves on to the next source, or reports no artwork.
#[derive(Debug, Error)]
pub enum ArtworkError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Container could not be opened or its tags could not be read
    #[error("metadata error: {0}")]
    Lofty(#[from] lofty::error::LoftyError),

    /// Image bytes could not be decoded
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),

    /// Content is not a container configured for embedded artwork
    #[error("not applicable: {0}")]
    NotApplicable(String),

    /// Container holds no attached picture
    #[error("no attached picture in {}", .0.display())]
    NoAttachedPicture(PathBuf),
}

/// Result type for artwork source operations
pub type Result<T> = std::result::Result<T, ArtworkError>;
