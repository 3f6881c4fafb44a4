use serde::{Deserialize, Serialize};

use super::CalibrationPoint;

/// Span of the line over which preset positions are spread as a starting
/// layout. The user drags each tick onto its emission peak afterwards.
const PRESET_POSITION_LOW: f64 = 0.25;
const PRESET_POSITION_HIGH: f64 = 0.75;

/// Factory wavelengths for common calibration light sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalibrationPreset {
    /// Compact fluorescent lamp: mercury 435.8/546.1 nm plus europium
    /// 611.6 nm.
    Fluorescent,
    /// Mercury pair only, for a two-point linear calibration.
    MercuryPair,
}

impl CalibrationPreset {
    /// Emission-line wavelengths of the source, ascending, in nanometers.
    pub fn wavelengths(&self) -> &'static [f64] {
        match self {
            Self::Fluorescent => &[435.8, 546.1, 611.6],
            Self::MercuryPair => &[435.8, 546.1],
        }
    }

    /// Preset points with wavelengths fixed and positions spread evenly
    /// across the middle of the line.
    pub fn points(&self) -> Vec<CalibrationPoint> {
        let wavelengths = self.wavelengths();
        let n = wavelengths.len();
        let step = (PRESET_POSITION_HIGH - PRESET_POSITION_LOW) / (n - 1) as f64;
        wavelengths
            .iter()
            .enumerate()
            .map(|(i, &nm)| CalibrationPoint::new(PRESET_POSITION_LOW + step * i as f64, nm))
            .collect()
    }
}
