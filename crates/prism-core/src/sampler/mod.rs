pub mod reduce;
pub mod rotate;

use image::RgbImage;
use ndarray::{s, Array3, ArrayView3};

use crate::consts::{CORNER_FLAG_OFFSET, CORNER_FLAG_THRESHOLD, CROP_PADDING_PX};
use crate::error::{PrismError, Result};
use crate::frame::{IntensityLine, RgbFrame};
use crate::geometry::ReaderBox;
use crate::pipeline::arena::ArenaScope;

pub use reduce::ReducePolicy;

use reduce::reduce_strip;
use rotate::rotate_about_center;

/// Output of one frame's sampling pass.
#[derive(Clone, Debug)]
pub struct SampledStrip {
    /// One brightness value (0-100) per column of the reader box.
    pub line: IntensityLine,
    /// Tight-cropped reader-box content, 8-bit RGB, for on-screen feedback.
    pub preview: RgbImage,
}

/// Extract the reader box's intensity line from a decoded frame.
///
/// The box is cropped out of the frame, rotated so its sampling line runs
/// horizontal, tight-cropped back to its own corners, converted to
/// brightness, and collapsed to one value per column. Scratch buffers come
/// from the per-tick arena `scope`.
///
/// Corners falling outside the frame abort with [`PrismError::CornerOutOfBounds`];
/// the caller skips the frame and prior state stays unchanged.
pub fn sample_reader_box(
    frame: &RgbFrame,
    reader_box: &ReaderBox,
    policy: ReducePolicy,
    scope: &mut ArenaScope<'_>,
) -> Result<SampledStrip> {
    let (h, w) = (frame.height(), frame.width());
    if h == 0 || w == 0 {
        return Err(PrismError::InvalidDimensions {
            width: w,
            height: h,
        });
    }

    // Nearest-integer pixel index of each corner.
    let mut corner_px = [(0usize, 0usize); 4];
    for (i, corner) in reader_box.corners().iter().enumerate() {
        let row = (corner.y * (h - 1) as f32).round() as i64;
        let col = (corner.x * (w - 1) as f32).round() as i64;
        if row < 0 || col < 0 || row >= h as i64 || col >= w as i64 {
            return Err(PrismError::CornerOutOfBounds {
                row,
                col,
                height: h,
                width: w,
            });
        }
        corner_px[i] = (row as usize, col as usize);
    }

    // Crude axis-aligned crop: the corner bounding box plus fixed padding.
    let min_row = corner_px.iter().map(|c| c.0).min().unwrap_or(0);
    let max_row = corner_px.iter().map(|c| c.0).max().unwrap_or(0);
    let min_col = corner_px.iter().map(|c| c.1).min().unwrap_or(0);
    let max_col = corner_px.iter().map(|c| c.1).max().unwrap_or(0);
    let row0 = min_row.saturating_sub(CROP_PADDING_PX);
    let row1 = (max_row + CROP_PADDING_PX).min(h - 1);
    let col0 = min_col.saturating_sub(CROP_PADDING_PX);
    let col1 = (max_col + CROP_PADDING_PX).min(w - 1);
    let crop_h = row1 - row0 + 1;
    let crop_w = col1 - col0 + 1;

    // Symmetric zero padding so the rotation cannot clip the box content:
    // half the difference between the long and short side, plus the fixed
    // padding again.
    let long = crop_h.max(crop_w);
    let short = crop_h.min(crop_w);
    let margin = (long - short) / 2 + CROP_PADDING_PX;
    let (ph, pw) = (crop_h + 2 * margin, crop_w + 2 * margin);

    let padded_buf = scope.take(ph * pw * 3);
    let mut padded =
        Array3::from_shape_vec((ph, pw, 3), padded_buf).expect("buffer size matches dimensions");
    padded
        .slice_mut(s![margin..margin + crop_h, margin..margin + crop_w, ..])
        .assign(&frame.data.slice(s![row0..=row1, col0..=col1, ..]));

    // Flag the corner pixels with an out-of-range negative offset so they
    // can be located again after rotation. Coincident corners (a very thin
    // box) are flagged once.
    for &(pr, pc) in &corner_px {
        let idx = [margin + (pr - row0), margin + (pc - col0), 0];
        if padded[idx] > CORNER_FLAG_THRESHOLD {
            padded[idx] -= CORNER_FLAG_OFFSET;
        }
    }

    // Rotate by -angle so the sampling line becomes horizontal.
    let rotate_buf = scope.take(ph * pw * 3);
    let rotated = rotate_about_center(padded.view(), -reader_box.angle_degrees(), rotate_buf);
    scope.recycle(padded.into_raw_vec_and_offset().0);

    // Relocate the flags and crop exactly to their bounding box; this drops
    // the rotation padding and isolates the true reader box content.
    let bounds = locate_flags(rotated.view());
    let Some((fr0, fr1, fc0, fc1)) = bounds else {
        scope.recycle(rotated.into_raw_vec_and_offset().0);
        return Err(PrismError::EmptyStrip);
    };
    let mut strip = rotated.slice(s![fr0..=fr1, fc0..=fc1, ..]).to_owned();
    scope.recycle(rotated.into_raw_vec_and_offset().0);

    // Restore the flagged pixels' original values.
    strip.mapv_inplace(|v| {
        if v < CORNER_FLAG_THRESHOLD {
            v + CORNER_FLAG_OFFSET
        } else {
            v
        }
    });

    let line = reduce_strip(strip.view(), policy);
    let preview = preview_image(strip.view());
    Ok(SampledStrip { line, preview })
}

/// Bounding box (min_row, max_row, min_col, max_col) of the flagged pixels,
/// or None when rotation lost all of them.
fn locate_flags(image: ArrayView3<'_, f32>) -> Option<(usize, usize, usize, usize)> {
    let (h, w, _) = image.dim();
    let mut bounds: Option<(usize, usize, usize, usize)> = None;
    for row in 0..h {
        for col in 0..w {
            if image[[row, col, 0]] < CORNER_FLAG_THRESHOLD {
                bounds = Some(match bounds {
                    None => (row, row, col, col),
                    Some((r0, r1, c0, c1)) => {
                        (r0.min(row), r1.max(row), c0.min(col), c1.max(col))
                    }
                });
            }
        }
    }
    bounds
}

/// 8-bit RGB rendering of the strip for the UI collaborator.
fn preview_image(strip: ArrayView3<'_, f32>) -> RgbImage {
    let (h, w, _) = strip.dim();
    let mut img = RgbImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let px = image::Rgb([
                (strip[[row, col, 0]].clamp(0.0, 1.0) * 255.0) as u8,
                (strip[[row, col, 1]].clamp(0.0, 1.0) * 255.0) as u8,
                (strip[[row, col, 2]].clamp(0.0, 1.0) * 255.0) as u8,
            ]);
            img.put_pixel(col as u32, row as u32, px);
        }
    }
    img
}
