//! Error types for icon generation

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for icon generation
pub type Result<T> = std::result::Result<T, IconError>;

/// Errors that can occur while generating an icon
#[derive(Error, Debug)]
pub enum IconError {
    /// The requested size is too small for the badge geometry
    #[error("Invalid icon size {0}: must be at least {min} pixels", min = crate::icon_gen::MIN_SIZE)]
    InvalidSize(u32),

    /// A badge color is not valid CSS color syntax
    #[error("Invalid color {0:?}")]
    InvalidColor(String),

    /// The destination could not be created or written
    #[error("Failed to write {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The canvas could not be encoded as PNG
    #[error("Failed to encode PNG for {}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
