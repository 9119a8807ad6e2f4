//! Error types for the watermark-manager crate.

use std::path::PathBuf;

/// Errors that can occur while preparing, watermarking or saving an image.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input image or the watermark asset could not be opened or decoded.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying decoder or I/O error.
        source: image::ImageError,
    },

    /// The watermarked image could not be encoded or written.
    #[error("failed to save {}: {source}", path.display())]
    Save {
        /// Destination path.
        path: PathBuf,
        /// Underlying encoder or I/O error.
        source: image::ImageError,
    },

    /// The image format is not supported for output.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The embedded watermark font could not be parsed.
    #[error("failed to load font: {0}")]
    Font(String),

    /// The interactive prompt failed (interrupted, or no terminal attached).
    #[error("prompt failed: {0}")]
    Prompt(String),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
