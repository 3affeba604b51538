//! Image decoding into a [`SourceImage`].
//!
//! The pipeline accepts only 8-bit gray or 8-bit RGB sources. Decoded
//! images in any other layout are converted on the way in:
//!
//! - gray with alpha, or 16-bit / float gray, becomes 8-bit gray
//! - everything else (RGBA, 16-bit, float) becomes 8-bit RGB
//!
//! Alpha is dropped in both cases.

use std::path::Path;

use image::DynamicImage;
use retouch_pipeline::SourceImage;

use crate::CodecError;

/// Read and decode an image file.
///
/// The format is detected from the file contents, not the extension.
///
/// # Errors
///
/// Returns [`CodecError::Read`] if the file cannot be read,
/// [`CodecError::EmptyInput`] if it is empty and
/// [`CodecError::Decode`] if it is not a supported image.
pub fn load(path: &Path) -> Result<SourceImage, CodecError> {
    let bytes = std::fs::read(path).map_err(|source| CodecError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("read {} bytes from {}", bytes.len(), path.display());
    decode(&bytes)
}

/// Decode raw image bytes (PNG, JPEG, BMP, WebP).
///
/// # Errors
///
/// Returns [`CodecError::EmptyInput`] if `bytes` is empty.
/// Returns [`CodecError::Decode`] if the image format is unrecognized or
/// the data is corrupt.
pub fn decode(bytes: &[u8]) -> Result<SourceImage, CodecError> {
    if bytes.is_empty() {
        return Err(CodecError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(into_source(img))
}

/// Narrow a decoded image to one of the two source layouts.
#[must_use]
pub fn into_source(image: DynamicImage) -> SourceImage {
    match image {
        DynamicImage::ImageLuma8(img) => SourceImage::Gray(img),
        DynamicImage::ImageRgb8(img) => SourceImage::Rgb(img),
        other if other.color().has_color() => {
            log::debug!("converting {:?} source to 8-bit RGB", other.color());
            SourceImage::Rgb(other.to_rgb8())
        }
        other => {
            log::debug!("converting {:?} source to 8-bit gray", other.color());
            SourceImage::Gray(other.to_luma8())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::{ImageEncoder, Luma, LumaA, Rgb, Rgba};

    use super::*;

    fn encode_png(raw: &[u8], width: u32, height: u32, color: image::ExtendedColorType) -> Vec<u8> {
        let mut buf = Vec::new();
        image::codecs::png::PngEncoder::new(&mut buf)
            .write_image(raw, width, height, color)
            .unwrap();
        buf
    }

    #[test]
    fn empty_input_returns_error() {
        assert!(matches!(decode(&[]), Err(CodecError::EmptyInput)));
    }

    #[test]
    fn corrupt_bytes_returns_decode_error() {
        let result = decode(&[0xFF, 0xFE, 0x00, 0x01]);
        assert!(matches!(result, Err(CodecError::Decode(_))));
    }

    #[test]
    fn gray_png_stays_gray() {
        let img = image::GrayImage::from_fn(3, 2, |x, _| Luma([u8::try_from(x * 100).unwrap()]));
        let png = encode_png(img.as_raw(), 3, 2, image::ExtendedColorType::L8);
        let src = decode(&png).unwrap();
        assert_eq!(src, SourceImage::Gray(img));
    }

    #[test]
    fn rgb_png_stays_rgb() {
        let img = image::RgbImage::from_pixel(2, 2, Rgb([10, 20, 30]));
        let png = encode_png(img.as_raw(), 2, 2, image::ExtendedColorType::Rgb8);
        let src = decode(&png).unwrap();
        assert_eq!(src, SourceImage::Rgb(img));
    }

    #[test]
    fn rgba_drops_alpha() {
        let img = image::RgbaImage::from_pixel(2, 3, Rgba([200, 100, 50, 7]));
        let png = encode_png(img.as_raw(), 2, 3, image::ExtendedColorType::Rgba8);
        let src = decode(&png).unwrap();
        assert_eq!(src.channel_count(), 3);
        assert_eq!(src.as_raw(), &[200_u8, 100, 50].repeat(6)[..]);
    }

    #[test]
    fn gray_alpha_becomes_gray() {
        let img = image::GrayAlphaImage::from_pixel(4, 1, LumaA([77, 0]));
        let src = into_source(DynamicImage::ImageLumaA8(img));
        assert_eq!(src, SourceImage::Gray(image::GrayImage::from_pixel(4, 1, Luma([77]))));
    }

    #[test]
    fn sixteen_bit_gray_becomes_eight_bit_gray() {
        let img = image::ImageBuffer::<Luma<u16>, Vec<u16>>::from_pixel(2, 2, Luma([u16::MAX]));
        let src = into_source(DynamicImage::ImageLuma16(img));
        assert_eq!(src.channel_count(), 1);
        assert!(src.as_raw().iter().all(|&v| v == 255));
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = load(Path::new("does/not/exist.png")).unwrap_err();
        assert!(matches!(err, CodecError::Read { ref path, .. } if path.ends_with("exist.png")));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.png");
        image::RgbImage::from_pixel(5, 4, Rgb([1, 2, 3]))
            .save(&path)
            .unwrap();
        let src = load(&path).unwrap();
        assert_eq!(src.width(), 5);
        assert_eq!(src.height(), 4);
        assert_eq!(src.channel_count(), 3);
    }
}
