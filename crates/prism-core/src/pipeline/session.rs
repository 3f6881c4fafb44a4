use tracing::{debug, info, warn};

use crate::calibration::{Calibration, CalibrationError};
use crate::error::{PrismError, Result};
use crate::frame::RgbFrame;
use crate::geometry::ReaderBox;
use crate::io::frames::encode_preview_png;
use crate::sampler::{sample_reader_box, SampledStrip};
use crate::smoother::IntensityHistory;
use crate::spectrum::{ChartPoint, SpectrumStore};
use crate::transform::{absorbance_chart, intensity_chart, transmittance_chart};

use super::arena::FrameArena;
use super::config::SessionConfig;

/// Everything one processed tick hands to the rendering/export collaborators.
#[derive(Clone, Debug, Default)]
pub struct TickOutput {
    /// PNG-encoded preview of the sampled strip, when enabled.
    pub preview_png: Option<Vec<u8>>,
    /// The averaged line contained clipped values; a warning, not an error.
    pub oversaturated: bool,
    /// Calibrated intensity chart; None until the calibration is valid.
    pub intensity: Option<Vec<ChartPoint>>,
    /// Present only when a reference spectrum is set.
    pub transmittance: Option<Vec<ChartPoint>>,
    pub absorbance: Option<Vec<ChartPoint>>,
}

/// Charts for viewing a recorded spectrum.
#[derive(Clone, Debug)]
pub struct SpectrumCharts {
    pub intensity: Vec<ChartPoint>,
    /// Present only when a *different* recorded spectrum is the reference.
    pub transmittance: Option<Vec<ChartPoint>>,
    pub absorbance: Option<Vec<ChartPoint>>,
}

/// Owns the pipeline's only mutable state and drives one frame per tick.
///
/// Processing is single-threaded per frame: each tick runs Geometry →
/// Sampler → Smoother → Calibration → Transform synchronously. The history
/// and calibration are mutated only from this tick or from explicit
/// user-edit methods, never from background work.
#[derive(Debug, Default)]
pub struct Session {
    config: SessionConfig,
    history: IntensityHistory,
    calibration: Calibration,
    store: SpectrumStore,
    arena: FrameArena,
    placement_active: bool,
    /// Last calibrated chart, the candidate for [`Session::capture`].
    last_chart: Option<Vec<ChartPoint>>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The UI collaborator started dragging a calibration tick; frame
    /// consumption is suppressed until [`Session::end_placement`] so samples
    /// never race calibration edits.
    pub fn begin_placement(&mut self) {
        self.placement_active = true;
    }

    pub fn end_placement(&mut self) {
        self.placement_active = false;
    }

    pub fn placement_active(&self) -> bool {
        self.placement_active
    }

    /// The active calibration, for user edits (add/remove/drag/preset).
    pub fn calibration_mut(&mut self) -> &mut Calibration {
        &mut self.calibration
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Structured validity result for the UI to gate placement controls.
    pub fn calibration_status(&self) -> std::result::Result<(), CalibrationError> {
        self.calibration.validate()
    }

    pub fn store(&self) -> &SpectrumStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SpectrumStore {
        &mut self.store
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Process the next decoded frame against the current reader box.
    ///
    /// Returns `Ok(None)` for suppressed or skipped ticks: active tick
    /// placement, an invalid reader box, or a sampler abort (corners outside
    /// the frame, collapsed strip). Skips leave the history untouched.
    pub fn process_frame(
        &mut self,
        frame: &RgbFrame,
        reader_box: &ReaderBox,
    ) -> Result<Option<TickOutput>> {
        if self.placement_active {
            debug!("calibration placement active, frame not consumed");
            return Ok(None);
        }
        if !reader_box.is_valid() {
            debug!("reader box invalid, frame skipped");
            return Ok(None);
        }

        let mut scope = self.arena.scope();
        let sampled = match sample_reader_box(frame, reader_box, self.config.reduce, &mut scope) {
            Ok(sampled) => sampled,
            Err(e @ (PrismError::CornerOutOfBounds { .. } | PrismError::EmptyStrip)) => {
                warn!(error = %e, "frame sampling aborted");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        drop(scope);
        let SampledStrip { line, preview } = sampled;

        self.history.push(line);
        let smoothed = self
            .history
            .averaged()
            .expect("history non-empty after push");
        if smoothed.oversaturated {
            debug!("averaged line oversaturated");
        }

        let preview_png = if self.config.emit_preview {
            Some(encode_preview_png(&preview)?)
        } else {
            None
        };

        let (intensity, transmittance, absorbance) = match self.calibration.solve() {
            Ok(map) => {
                let chart = intensity_chart(&smoothed, &map);
                let (t, a) = match self.store.reference() {
                    Some(reference) => {
                        let t = transmittance_chart(&chart, &reference.intensity_chart);
                        let a = absorbance_chart(&t);
                        (Some(t), Some(a))
                    }
                    None => (None, None),
                };
                self.last_chart = Some(chart.clone());
                (Some(chart), t, a)
            }
            Err(reason) => {
                debug!(%reason, "calibration not ready, charts skipped");
                self.last_chart = None;
                (None, None, None)
            }
        };

        Ok(Some(TickOutput {
            preview_png,
            oversaturated: smoothed.oversaturated,
            intensity,
            transmittance,
            absorbance,
        }))
    }

    /// Record the current averaged, calibrated chart as a named spectrum.
    /// None when no calibrated chart has been produced yet.
    pub fn capture(&mut self, name: &str) -> Option<u32> {
        let chart = self.last_chart.clone()?;
        let key = self.store.record(name, chart);
        info!(key, name, "spectrum captured");
        Some(key)
    }

    /// Charts for a recorded spectrum. Transmittance and absorbance are only
    /// offered when a different recorded spectrum is the reference; viewing
    /// a spectrum against itself is blocked here, at the caller level.
    pub fn charts_for(&self, key: u32) -> Option<SpectrumCharts> {
        let spectrum = self.store.get(key)?;
        let (transmittance, absorbance) = match self.store.reference_for(key) {
            Some(reference) => {
                let t = transmittance_chart(&spectrum.intensity_chart, &reference.intensity_chart);
                let a = absorbance_chart(&t);
                (Some(t), Some(a))
            }
            None => (None, None),
        };
        Some(SpectrumCharts {
            intensity: spectrum.intensity_chart.clone(),
            transmittance,
            absorbance,
        })
    }
}
