use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbImage};

use crate::error::Result;
use crate::frame::RgbFrame;

/// Decode an image file into a normalized RGB frame.
pub fn load_rgb_frame(path: &Path) -> Result<RgbFrame> {
    let img = image::open(path)?.to_rgb8();
    let (w, h) = img.dimensions();
    RgbFrame::from_raw_rgb(img.as_raw(), w as usize, h as usize)
}

/// Encode a preview strip as PNG bytes for the UI collaborator.
pub fn encode_preview_png(preview: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    preview.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Write a preview strip to disk as PNG.
pub fn save_preview_png(preview: &RgbImage, path: &Path) -> Result<()> {
    preview.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
