use serde::{Deserialize, Serialize};
use tracing::info;

/// One sample of a rendered chart.
///
/// `y` is intensity (0-100), transmittance (unitless ratio), or absorbance,
/// depending on the chart the point belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Normalized position along the intensity line, in [0, 1].
    pub position: f64,
    /// Calibrated wavelength in nanometers.
    pub wavelength: f64,
    pub y: f64,
}

/// A captured spectrum. Immutable after capture except for rename.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    pub key: u32,
    pub name: String,
    pub intensity_chart: Vec<ChartPoint>,
}

/// Owns every captured spectrum and the single optional reference
/// designation. Mutated only from explicit user actions.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SpectrumStore {
    spectra: Vec<Spectrum>,
    next_key: u32,
    reference: Option<u32>,
}

impl SpectrumStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.spectra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spectra.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spectrum> {
        self.spectra.iter()
    }

    pub fn get(&self, key: u32) -> Option<&Spectrum> {
        self.spectra.iter().find(|s| s.key == key)
    }

    /// Record a spectrum under a fresh key.
    pub fn record(&mut self, name: impl Into<String>, intensity_chart: Vec<ChartPoint>) -> u32 {
        let key = self.next_key;
        self.next_key += 1;
        let name = name.into();
        info!(key, name = %name, points = intensity_chart.len(), "spectrum recorded");
        self.spectra.push(Spectrum {
            key,
            name,
            intensity_chart,
        });
        key
    }

    /// Rename a spectrum. Returns false for an unknown key.
    pub fn rename(&mut self, key: u32, name: impl Into<String>) -> bool {
        match self.spectra.iter_mut().find(|s| s.key == key) {
            Some(spectrum) => {
                spectrum.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Delete a spectrum. The reference designation is cleared when it
    /// pointed at the deleted spectrum. Returns false for an unknown key.
    pub fn delete(&mut self, key: u32) -> bool {
        let before = self.spectra.len();
        self.spectra.retain(|s| s.key != key);
        if self.spectra.len() == before {
            return false;
        }
        if self.reference == Some(key) {
            self.reference = None;
        }
        true
    }

    /// Designate a spectrum as the reference. Returns false for an unknown
    /// key; at most one reference exists at a time.
    pub fn set_reference(&mut self, key: u32) -> bool {
        if self.get(key).is_none() {
            return false;
        }
        self.reference = Some(key);
        true
    }

    pub fn clear_reference(&mut self) {
        self.reference = None;
    }

    pub fn reference_key(&self) -> Option<u32> {
        self.reference
    }

    pub fn reference(&self) -> Option<&Spectrum> {
        self.reference.and_then(|key| self.get(key))
    }

    /// The reference chart usable against the spectrum `key`: None when no
    /// reference is set, or when `key` is itself the reference. A spectrum
    /// never ratios against itself.
    pub fn reference_for(&self, key: u32) -> Option<&Spectrum> {
        match self.reference() {
            Some(reference) if reference.key != key => Some(reference),
            _ => None,
        }
    }
}
