use std::io::{Cursor, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage};

use crate::error::{Result, StarTrailError};
use crate::frame::{Dimensions, Frame};

/// Decode an image file as 8-bit RGB.
///
/// Grayscale and RGBA inputs are converted; 16-bit inputs are scaled down.
pub fn load_rgb8(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|source| StarTrailError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgb8())
}

/// Decode an image file into a Frame with channel values in [0, 255].
pub fn load_frame(path: &Path) -> Result<Frame> {
    let rgb = load_rgb8(path)?;
    Ok(Frame::from_rgb8(&rgb).with_source(path))
}

/// Read the pixel dimensions from the file header without decoding pixel data.
pub fn probe_dimensions(path: &Path) -> Result<Dimensions> {
    let (w, h) = image::image_dimensions(path).map_err(|source| StarTrailError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Dimensions::new(w, h))
}

/// Encode as baseline JPEG into memory.
pub fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
        encoder.encode_image(img)?;
    }
    Ok(buf)
}

/// Encode as 8-bit RGB PNG into memory.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, ImageFormat::Png)?;
    Ok(cursor.into_inner())
}

/// Save an RGB image, choosing format from file extension.
///
/// The image is encoded in memory, written to a temporary file next to
/// `path` and renamed into place, so `path` is either the complete new
/// image or untouched.
pub fn save_rgb_image(img: &RgbImage, path: &Path, jpeg_quality: u8) -> Result<()> {
    let bytes = match path.extension().and_then(|e| e.to_str()) {
        Some("png" | "PNG") => encode_png(img)?,
        _ => encode_jpeg(img, jpeg_quality)?,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
