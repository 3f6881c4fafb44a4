use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use prism_core::calibration::{Calibration, CalibrationPoint, CalibrationPreset};
use prism_core::geometry::{NormPoint, ReaderBox};
use prism_core::pipeline::SessionConfig;

/// On-disk session: where to sample, how to calibrate, how to process.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionFile {
    pub reader_box: ReaderBox,
    pub calibration: Vec<CalibrationPoint>,
    #[serde(default)]
    pub pipeline: SessionConfig,
}

impl SessionFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse session file {}", path.display()))
    }

    pub fn calibration(&self) -> Calibration {
        Calibration::new(self.calibration.clone())
    }

    /// A plausible starting session: a horizontal box across the middle of
    /// the frame and the fluorescent-lamp preset.
    pub fn example() -> Self {
        Self {
            reader_box: ReaderBox::new(
                NormPoint::new(0.2, 0.5),
                NormPoint::new(0.8, 0.5),
                0.05,
            ),
            calibration: CalibrationPreset::Fluorescent.points(),
            pipeline: SessionConfig::default(),
        }
    }
}
