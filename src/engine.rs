//! Loading, saving and naming image files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat, RgbaImage};

use crate::error::{Error, Result};

/// Suffix inserted before the extension of the output file.
pub const OUTPUT_SUFFIX: &str = "-with-watermark";

/// JPEG quality used when writing output (maximum).
const JPEG_QUALITY: u8 = 100;

/// Decode the image at `path` into an RGBA buffer.
///
/// # Errors
///
/// Returns [`Error::Open`] if the file is missing or cannot be decoded.
pub fn open_image(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "Opened {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(img.to_rgba8())
}

/// Check if a file has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(
            ext.to_lowercase().as_str(),
            "jpg" | "jpeg" | "png" | "webp" | "bmp"
        ),
        None => false,
    }
}

/// Make sure an image can be written to `path`, based on its extension.
///
/// # Errors
///
/// Returns [`Error::UnsupportedFormat`] naming the path otherwise.
pub fn ensure_writable_format(path: &Path) -> Result<()> {
    if is_supported_image(path) {
        Ok(())
    } else {
        Err(Error::UnsupportedFormat(format!(
            "cannot write {} (expected jpg, jpeg, png, webp or bmp)",
            path.display()
        )))
    }
}

/// Save an RGBA image at maximum quality for its format.
///
/// JPEG has no alpha channel, so JPEG output is flattened to RGB and written
/// at quality 100. The other supported formats are lossless.
///
/// The buffered writer is flushed explicitly, so a write that only fails
/// once the data reaches the disk is still reported.
///
/// # Errors
///
/// Returns [`Error::UnsupportedFormat`] for formats without an encoder, or
/// [`Error::Save`] naming the path if creating, encoding or flushing fails.
pub fn save_image(img: &RgbaImage, path: &Path) -> Result<()> {
    let format =
        ImageFormat::from_path(path).map_err(|e| Error::UnsupportedFormat(e.to_string()))?;
    if !matches!(
        format,
        ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP | ImageFormat::Bmp
    ) {
        return Err(Error::UnsupportedFormat(format!("{format:?}")));
    }

    let save_err = |source| Error::Save {
        path: path.to_path_buf(),
        source,
    };
    let io_err = |e| save_err(image::ImageError::IoError(e));

    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);

    if format == ImageFormat::Jpeg {
        let rgb = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
        JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY)
            .write_image(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(save_err)?;
    } else {
        img.write_to(&mut writer, format).map_err(save_err)?;
    }

    writer.flush().map_err(io_err)?;

    log::info!("Saved {}", path.display());
    Ok(())
}

/// Derive the output path by inserting [`OUTPUT_SUFFIX`] before the extension.
///
/// Example: `"img/photo.jpg"` becomes `"img/photo-with-watermark.jpg"`.
/// The directory is kept; a name without an extension just gets the suffix.
#[must_use]
pub fn output_filename(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let name = match input.extension() {
        Some(ext) => format!("{stem}{OUTPUT_SUFFIX}.{}", ext.to_string_lossy()),
        None => format!("{stem}{OUTPUT_SUFFIX}"),
    };
    input.with_file_name(name)
}
