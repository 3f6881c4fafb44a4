use ndarray::Array3;

use crate::consts::RGB_CHANNEL_COUNT;
use crate::error::{PrismError, Result};

/// A single decoded RGB camera frame.
/// Channel values are f32 in [0.0, 1.0], shape = (height, width, 3).
#[derive(Clone, Debug)]
pub struct RgbFrame {
    /// Pixel data, row-major, shape = (height, width, channel)
    pub data: Array3<f32>,
}

impl RgbFrame {
    pub fn new(data: Array3<f32>) -> Self {
        Self { data }
    }

    /// Build a frame from an interleaved 8-bit RGB buffer (row-major,
    /// values 0-255), normalizing every channel to [0, 1].
    pub fn from_raw_rgb(raw: &[u8], width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PrismError::InvalidDimensions { width, height });
        }
        let expected = width * height * RGB_CHANNEL_COUNT;
        if raw.len() != expected {
            return Err(PrismError::BufferSizeMismatch {
                expected,
                actual: raw.len(),
            });
        }

        let normalized: Vec<f32> = raw.iter().map(|&b| b as f32 / 255.0).collect();
        let data = Array3::from_shape_vec((height, width, RGB_CHANNEL_COUNT), normalized)
            .expect("buffer size matches dimensions");
        Ok(Self { data })
    }

    pub fn width(&self) -> usize {
        self.data.shape()[1]
    }

    pub fn height(&self) -> usize {
        self.data.shape()[0]
    }
}

/// One scalar brightness value (0-100) per sampled column of the reader box.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IntensityLine {
    pub values: Vec<f32>,
}

impl IntensityLine {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
