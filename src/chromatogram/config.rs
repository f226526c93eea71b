use serde::{Deserialize, Serialize};

use crate::error::ProcessingError;
use crate::tolerance::ToleranceSpec;

/// Configuration for chromatogram building and peak cropping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromatogramConfig {
    /// MS level of the scans to trace
    pub ms_level: u8,

    /// m/z window around a chromatogram's mean m/z that extends it
    pub mz_tolerance: ToleranceSpec,

    /// Points below this intensity are ignored
    pub min_intensity: f32,

    /// Longest stretch (minutes) without a matching point before a
    /// chromatogram is closed
    pub max_gap: f64,

    /// Shortest accepted chromatogram duration (minutes)
    pub min_time_span: f64,

    /// Lowest accepted chromatogram height
    pub min_height: f32,

    /// Fewest accepted points per chromatogram
    pub min_data_points: usize,

    /// Relative rise tolerated while walking outward from the apex when cropping
    pub intensity_tolerance: f64,

    /// Apexes must exceed this intensity when cropping
    pub noise_level: f32,
}

impl Default for ChromatogramConfig {
    fn default() -> Self {
        Self {
            ms_level: 1,
            mz_tolerance: ToleranceSpec::MaximumOf(vec![
                ToleranceSpec::ConstantDa { delta: 0.002 },
                ToleranceSpec::ConstantPpm { ppm: 10.0 },
            ]),
            min_intensity: 0.0,
            max_gap: 0.1,
            min_time_span: 0.05,
            min_height: 1000.0,
            min_data_points: 3,
            intensity_tolerance: 0.2,
            noise_level: 0.0,
        }
    }
}

impl ChromatogramConfig {
    /// Reject negative or non-finite limits
    pub fn validate(&self) -> Result<(), ProcessingError> {
        self.mz_tolerance.validate()?;
        let checks: [(&str, f64); 6] = [
            ("min_intensity", self.min_intensity as f64),
            ("max_gap", self.max_gap),
            ("min_time_span", self.min_time_span),
            ("min_height", self.min_height as f64),
            ("intensity_tolerance", self.intensity_tolerance),
            ("noise_level", self.noise_level as f64),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ProcessingError::InvalidConfiguration(format!(
                    "{name} must be >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}
