//! retouch-io: Filesystem image decoding and encoding.
//!
//! Reads an image file into a [`SourceImage`](retouch_pipeline::SourceImage)
//! and writes a rendered image into a chosen directory as
//! `modified_<original file name>`. Format support is whatever the `image`
//! crate was built with (PNG, JPEG, BMP, WebP).

pub mod load;
pub mod save;

use std::path::PathBuf;

pub use load::{decode, load};
pub use save::{MODIFIED_PREFIX, modified_path, save};

/// Errors that can occur while reading or writing image files.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The image file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// The bytes are not an image in a supported format.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The rendered image could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Encode {
        /// Destination that was being written.
        path: PathBuf,
        /// Underlying encoder or I/O error.
        source: image::ImageError,
    },

    /// The source path has no file name to derive an output name from.
    #[error("cannot derive an output file name from {}", .0.display())]
    NoFileName(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_input_display() {
        assert_eq!(CodecError::EmptyInput.to_string(), "input image data is empty");
    }

    #[test]
    fn error_no_file_name_display() {
        let err = CodecError::NoFileName(PathBuf::from("/"));
        assert_eq!(err.to_string(), "cannot derive an output file name from /");
    }

    #[test]
    fn error_read_display_names_path() {
        let err = CodecError::Read {
            path: PathBuf::from("missing.png"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "failed to read missing.png: not found");
    }
}
