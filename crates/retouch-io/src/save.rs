//! Writing rendered images to disk.
//!
//! The output name is derived from the source: `photo.jpg` becomes
//! `modified_photo.jpg` in the target directory, encoded in the format
//! its extension names. An existing file is overwritten.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use retouch_pipeline::RenderedImage;

use crate::CodecError;

/// Prefix prepended to the source file name.
pub const MODIFIED_PREFIX: &str = "modified_";

/// Output path for a render of `source_path`, inside `dir`.
///
/// # Errors
///
/// Returns [`CodecError::NoFileName`] if `source_path` ends in `..` or is
/// a filesystem root.
pub fn modified_path(dir: &Path, source_path: &Path) -> Result<PathBuf, CodecError> {
    let name = source_path
        .file_name()
        .ok_or_else(|| CodecError::NoFileName(source_path.to_path_buf()))?;

    let mut file_name = OsString::from(MODIFIED_PREFIX);
    file_name.push(name);
    Ok(dir.join(file_name))
}

/// Encode `image` to [`modified_path`]`(dir, source_path)`.
///
/// Returns the path that was written.
///
/// # Errors
///
/// Returns [`CodecError::NoFileName`] if no output name can be derived
/// and [`CodecError::Encode`] if the extension names no supported format
/// or the file cannot be written.
pub fn save(image: &RenderedImage, dir: &Path, source_path: &Path) -> Result<PathBuf, CodecError> {
    let path = modified_path(dir, source_path)?;
    if path.exists() {
        log::debug!("overwriting {}", path.display());
    }

    image.save(&path).map_err(|source| CodecError::Encode {
        path: path.clone(),
        source,
    })?;

    log::info!(
        "wrote {}x{} image to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(path)
}
