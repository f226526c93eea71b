use serde::{Deserialize, Serialize};

use crate::error::ProcessingError;

/// Parameters of the wavelet centroider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveletConfig {
    /// Wavelet scale in index space; roughly the half-width (in points) of
    /// the profile peaks to be located
    pub scale_level: usize,

    /// Window applied to the wavelet argument; values below 1.0 narrow the
    /// positive lobe
    pub wavelet_window: f64,

    /// Apexes whose original intensity does not exceed this level are dropped
    pub noise_level: f32,
}

impl Default for WaveletConfig {
    fn default() -> Self {
        Self {
            scale_level: 5,
            wavelet_window: 1.0,
            noise_level: 0.0,
        }
    }
}

impl WaveletConfig {
    /// Settings for high-resolution profile data with narrow peaks
    pub fn narrow_peaks() -> Self {
        Self {
            scale_level: 2,
            ..Self::default()
        }
    }

    /// Reject settings the transform cannot run with
    pub fn validate(&self) -> Result<(), ProcessingError> {
        if self.scale_level == 0 {
            return Err(ProcessingError::InvalidConfiguration(
                "wavelet scale_level must be at least 1".to_string(),
            ));
        }
        if !(self.wavelet_window.is_finite() && self.wavelet_window > 0.0) {
            return Err(ProcessingError::InvalidConfiguration(format!(
                "wavelet_window must be a positive number, got {}",
                self.wavelet_window
            )));
        }
        if !(self.noise_level.is_finite() && self.noise_level >= 0.0) {
            return Err(ProcessingError::InvalidConfiguration(format!(
                "noise_level must be >= 0, got {}",
                self.noise_level
            )));
        }
        Ok(())
    }
}
