use crate::calibration::WavelengthMap;
use crate::consts::ABSORBANCE_CEILING;
use crate::smoother::SmoothedLine;
use crate::spectrum::ChartPoint;

/// Calibrate an averaged intensity line into a wavelength/intensity chart.
/// Element `i` of an n-point line sits at normalized position `i / (n - 1)`.
pub fn intensity_chart(line: &SmoothedLine, map: &WavelengthMap) -> Vec<ChartPoint> {
    let n = line.values.len();
    let denom = n.saturating_sub(1).max(1) as f64;
    line.values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let position = i as f64 / denom;
            ChartPoint {
                position,
                wavelength: map.wavelength(position),
                y: v as f64,
            }
        })
        .collect()
}

/// Ratio of test intensity to the reference intensity at the nearest
/// wavelength. A reference intensity of zero yields a transmittance of
/// zero, never NaN or infinity.
pub fn transmittance_chart(test: &[ChartPoint], reference: &[ChartPoint]) -> Vec<ChartPoint> {
    test.iter()
        .map(|t| {
            let r = nearest_by_wavelength(reference, t.wavelength)
                .map(|p| p.y)
                .unwrap_or(0.0);
            let y = if r == 0.0 { 0.0 } else { t.y / r };
            ChartPoint {
                position: t.position,
                wavelength: t.wavelength,
                y,
            }
        })
        .collect()
}

/// `-log10` of each transmittance point, clamped to [`ABSORBANCE_CEILING`].
///
/// A transmittance of zero has no finite absorbance; the ceiling stands in
/// for it, keeping charts dense and finite.
pub fn absorbance_chart(transmittance: &[ChartPoint]) -> Vec<ChartPoint> {
    transmittance
        .iter()
        .map(|t| {
            let y = if t.y <= 0.0 {
                ABSORBANCE_CEILING
            } else {
                (-t.y.log10()).min(ABSORBANCE_CEILING)
            };
            ChartPoint {
                position: t.position,
                wavelength: t.wavelength,
                y,
            }
        })
        .collect()
}

/// First point with the smallest absolute wavelength difference. Ties keep
/// the first-found point, which makes the lookup deterministic.
fn nearest_by_wavelength(points: &[ChartPoint], wavelength: f64) -> Option<&ChartPoint> {
    let mut best: Option<(&ChartPoint, f64)> = None;
    for point in points {
        let diff = (point.wavelength - wavelength).abs();
        match best {
            Some((_, best_diff)) if diff >= best_diff => {}
            _ => best = Some((point, diff)),
        }
    }
    best.map(|(point, _)| point)
}
