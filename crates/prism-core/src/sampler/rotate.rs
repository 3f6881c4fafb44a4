use ndarray::{Array3, ArrayView3};
use rayon::prelude::*;

use crate::consts::{PARALLEL_PIXEL_THRESHOLD, RGB_CHANNEL_COUNT};

/// Rotate an RGB image about its center by `angle_degrees`, writing into
/// `out_buf` (resized to fit) and returning the rotated array.
///
/// Nearest-neighbor resampling: each destination pixel maps through the
/// inverse rotation and copies its nearest source pixel, so flagged corner
/// markers pass through unblended. Samples falling outside the source fill
/// with zero. Output dimensions equal input dimensions, preserving the
/// padded image's offset.
pub fn rotate_about_center(
    src: ArrayView3<'_, f32>,
    angle_degrees: f32,
    mut out_buf: Vec<f32>,
) -> Array3<f32> {
    let (h, w, _) = src.dim();
    let stride = w * RGB_CHANNEL_COUNT;
    out_buf.clear();
    out_buf.resize(h * stride, 0.0);

    let theta = angle_degrees.to_radians();
    let (sin, cos) = theta.sin_cos();
    let cy = (h as f32 - 1.0) / 2.0;
    let cx = (w as f32 - 1.0) / 2.0;

    let fill_row = |row: usize, out_row: &mut [f32]| {
        let dy = row as f32 - cy;
        for col in 0..w {
            let dx = col as f32 - cx;
            // Inverse map: rotate the destination offset back into source space.
            let src_x = cos * dx + sin * dy + cx;
            let src_y = -sin * dx + cos * dy + cy;
            let sc = src_x.round();
            let sr = src_y.round();
            if sr < 0.0 || sc < 0.0 || sr >= h as f32 || sc >= w as f32 {
                continue;
            }
            let (sr, sc) = (sr as usize, sc as usize);
            let dst = col * RGB_CHANNEL_COUNT;
            for ch in 0..RGB_CHANNEL_COUNT {
                out_row[dst + ch] = src[[sr, sc, ch]];
            }
        }
    };

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        out_buf
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(row, out_row)| fill_row(row, out_row));
    } else {
        out_buf
            .chunks_mut(stride)
            .enumerate()
            .for_each(|(row, out_row)| fill_row(row, out_row));
    }

    Array3::from_shape_vec((h, w, RGB_CHANNEL_COUNT), out_buf)
        .expect("buffer size matches dimensions")
}
