pub mod presets;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MAX_CALIBRATION_POINTS, MIN_CALIBRATION_POINTS, SLOPE_EPSILON};

pub use presets::CalibrationPreset;

/// A user-placed anchor tying a normalized line position to a wavelength.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationPoint {
    /// Normalized position along the intensity line, in [0, 1].
    pub position: f64,
    /// Wavelength in nanometers.
    pub wavelength: f64,
}

impl CalibrationPoint {
    pub fn new(position: f64, wavelength: f64) -> Self {
        Self {
            position,
            wavelength,
        }
    }
}

/// Why a calibration cannot produce a wavelength function.
///
/// These are validity results for the UI collaborator, not fatal errors:
/// the pipeline simply skips chart computation until the calibration heals.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    #[error("calibration needs at least 2 points, got {0}")]
    TooFewPoints(usize),

    #[error("calibration supports at most 5 points, got {0}")]
    TooManyPoints(usize),

    #[error(
        "calibration points are out of order: the point at {wavelength} nm \
         sits at position {position}, left of a shorter wavelength"
    )]
    NonMonotonic { position: f64, wavelength: f64 },

    #[error("calibration point index {0} does not exist")]
    NoSuchPoint(usize),
}

/// Ordered list of 2-5 calibration points, edited by the UI collaborator.
///
/// Edits mutate the owned list through explicit methods; the wavelength
/// function is built separately by [`Calibration::solve`], which validates
/// first and never returns a partial result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    points: Vec<CalibrationPoint>,
}

impl Calibration {
    pub fn new(points: Vec<CalibrationPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[CalibrationPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn add_point(&mut self, point: CalibrationPoint) -> Result<(), CalibrationError> {
        if self.points.len() >= MAX_CALIBRATION_POINTS {
            return Err(CalibrationError::TooManyPoints(self.points.len() + 1));
        }
        self.points.push(point);
        Ok(())
    }

    pub fn remove_point(&mut self, index: usize) -> Result<CalibrationPoint, CalibrationError> {
        if index >= self.points.len() {
            return Err(CalibrationError::NoSuchPoint(index));
        }
        Ok(self.points.remove(index))
    }

    /// Move a tick along the line. The position is clamped to [0, 1].
    pub fn set_position(&mut self, index: usize, position: f64) -> Result<(), CalibrationError> {
        let point = self
            .points
            .get_mut(index)
            .ok_or(CalibrationError::NoSuchPoint(index))?;
        point.position = position.clamp(0.0, 1.0);
        Ok(())
    }

    pub fn set_wavelength(&mut self, index: usize, wavelength: f64) -> Result<(), CalibrationError> {
        let point = self
            .points
            .get_mut(index)
            .ok_or(CalibrationError::NoSuchPoint(index))?;
        point.wavelength = wavelength;
        Ok(())
    }

    /// Replace the whole point list from a preset.
    pub fn load_preset(&mut self, preset: CalibrationPreset) {
        self.points = preset.points();
    }

    /// Check point count and monotonicity: sorted by wavelength, positions
    /// must be non-decreasing. Reports the first offending point.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        if self.points.len() < MIN_CALIBRATION_POINTS {
            return Err(CalibrationError::TooFewPoints(self.points.len()));
        }
        if self.points.len() > MAX_CALIBRATION_POINTS {
            return Err(CalibrationError::TooManyPoints(self.points.len()));
        }

        let mut sorted = self.points.clone();
        sorted.sort_by(|a, b| a.wavelength.total_cmp(&b.wavelength));
        for pair in sorted.windows(2) {
            if pair[1].position < pair[0].position {
                return Err(CalibrationError::NonMonotonic {
                    position: pair[1].position,
                    wavelength: pair[1].wavelength,
                });
            }
        }
        Ok(())
    }

    /// Validate and build the position-to-wavelength function.
    pub fn solve(&self) -> Result<WavelengthMap, CalibrationError> {
        self.validate()?;
        let mut sorted = self.points.clone();
        sorted.sort_by(|a, b| a.position.total_cmp(&b.position));
        Ok(WavelengthMap { points: sorted })
    }
}

/// Position-to-wavelength mapping built from a validated calibration.
///
/// Interior positions interpolate along the bracketing segment once three or
/// more points exist; positions outside the calibrated range always fall
/// back to the line through the first and last point, keeping extrapolation
/// bounded instead of extending the last local segment's slope.
#[derive(Clone, Debug)]
pub struct WavelengthMap {
    /// Calibration points sorted by position.
    points: Vec<CalibrationPoint>,
}

impl WavelengthMap {
    pub fn points(&self) -> &[CalibrationPoint] {
        &self.points
    }

    /// Point-slope line through the first and last calibration point.
    pub fn endpoint_line(&self, x: f64) -> f64 {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        let dx = last.position - first.position;
        if dx.abs() < SLOPE_EPSILON {
            return first.wavelength;
        }
        let slope = (last.wavelength - first.wavelength) / dx;
        slope * (x - first.position) + first.wavelength
    }

    /// Piecewise-linear interpolation over the bracketing segment.
    /// None when `x` lies outside every segment.
    pub fn spline_line(&self, x: f64) -> Option<f64> {
        for pair in self.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.position <= x && x <= b.position {
                let dx = b.position - a.position;
                if dx.abs() < SLOPE_EPSILON {
                    return Some(a.wavelength);
                }
                let slope = (b.wavelength - a.wavelength) / dx;
                return Some(slope * (x - a.position) + a.wavelength);
            }
        }
        None
    }

    /// Estimated wavelength at normalized position `x`.
    ///
    /// Fewer than 3 points: always the endpoint line. Otherwise the
    /// bracketing segment strictly inside the calibrated range, the endpoint
    /// line beyond it.
    pub fn wavelength(&self, x: f64) -> f64 {
        if self.points.len() < 3 {
            return self.endpoint_line(x);
        }
        let first = self.points[0].position;
        let last = self.points[self.points.len() - 1].position;
        if first < x && x < last {
            self.spline_line(x).unwrap_or_else(|| self.endpoint_line(x))
        } else {
            self.endpoint_line(x)
        }
    }
}
