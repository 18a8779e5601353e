use crate::Result;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// Decodes any supported upload and re-encodes it as an 8-bit RGB PNG.
pub fn normalize_image(bytes: &[u8]) -> Result<Vec<u8>> {
    let rgb = image::load_from_memory(bytes)?.to_rgb8();

    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(rgb).write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}
