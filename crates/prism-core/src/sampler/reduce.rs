use ndarray::ArrayView3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::VALUE_SCALE;
use crate::frame::IntensityLine;

/// How the 2-D reader-box strip collapses to one intensity per column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReducePolicy {
    /// Sample the geometric middle row of the strip.
    #[default]
    MiddleRow,
    /// Sample the row with the highest total color saturation. Picks the
    /// most chromatic cross-section, at the cost of edge stability.
    MaxSaturation,
}

/// HSV-style value (brightness) of one pixel, scaled to 0-100.
fn value_of(r: f32, g: f32, b: f32) -> f32 {
    r.max(g).max(b).clamp(0.0, 1.0) * VALUE_SCALE
}

/// HSV-style saturation of one pixel, in [0, 1]. Zero for black.
fn saturation_of(r: f32, g: f32, b: f32) -> f32 {
    let max = r.max(g).max(b);
    if max <= 0.0 {
        return 0.0;
    }
    let min = r.min(g).min(b);
    (max - min) / max
}

/// Pick the cross-section row for the given policy.
fn select_row(strip: ArrayView3<'_, f32>, policy: ReducePolicy) -> usize {
    let (h, w, _) = strip.dim();
    match policy {
        ReducePolicy::MiddleRow => h / 2,
        ReducePolicy::MaxSaturation => {
            let mut best_row = 0;
            let mut best_total = f32::MIN;
            for row in 0..h {
                let mut total = 0.0;
                for col in 0..w {
                    total += saturation_of(
                        strip[[row, col, 0]],
                        strip[[row, col, 1]],
                        strip[[row, col, 2]],
                    );
                }
                if total > best_total {
                    best_total = total;
                    best_row = row;
                }
            }
            best_row
        }
    }
}

/// Reduce the rotated, tight-cropped strip to one intensity per column.
///
/// A fully saturated scan line is reported as-is (all values at the top of
/// the scale) rather than rejected; the condition is only logged.
pub fn reduce_strip(strip: ArrayView3<'_, f32>, policy: ReducePolicy) -> IntensityLine {
    let (_, w, _) = strip.dim();
    let row = select_row(strip, policy);

    let values: Vec<f32> = (0..w)
        .map(|col| {
            value_of(
                strip[[row, col, 0]],
                strip[[row, col, 1]],
                strip[[row, col, 2]],
            )
        })
        .collect();

    if !values.is_empty() && values.iter().all(|&v| v >= VALUE_SCALE) {
        debug!(row, columns = w, "scan line fully saturated");
    }

    IntensityLine::new(values)
}
