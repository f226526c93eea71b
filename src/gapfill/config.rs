use serde::{Deserialize, Serialize};

use crate::error::ProcessingError;
use crate::tolerance::ToleranceSpec;

/// Configuration for filling empty cells of a feature table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapFillConfig {
    /// m/z window around the row m/z
    pub mz_tolerance: ToleranceSpec,

    /// Retention-time window around the row rt
    pub rt_tolerance: ToleranceSpec,

    /// Relative rise tolerated when cropping the extracted peak
    pub intensity_tolerance: f64,

    /// Apex must exceed this intensity
    pub noise_level: f32,

    /// Search the m/z span observed across the row's features, widened by
    /// the m/z tolerance, instead of the window around the row m/z
    pub use_row_mz: bool,

    /// Search the rt span observed across the row's features, widened by
    /// the rt tolerance, instead of the window around the row rt
    pub use_row_rt: bool,

    /// Store a zero-height feature when scans were searched but no peak
    /// found; set to `false` to leave such cells empty
    pub keep_zero_height: bool,

    /// MS level of the scans to search
    pub ms_level: u8,
}

impl Default for GapFillConfig {
    fn default() -> Self {
        Self {
            mz_tolerance: ToleranceSpec::MaximumOf(vec![
                ToleranceSpec::ConstantDa { delta: 0.002 },
                ToleranceSpec::ConstantPpm { ppm: 10.0 },
            ]),
            rt_tolerance: ToleranceSpec::Rt {
                delta: 0.1,
                is_percentage: false,
            },
            intensity_tolerance: 0.2,
            noise_level: 0.0,
            use_row_mz: false,
            use_row_rt: false,
            keep_zero_height: true,
            ms_level: 1,
        }
    }
}

impl GapFillConfig {
    /// Reject invalid tolerances and limits
    pub fn validate(&self) -> Result<(), ProcessingError> {
        self.mz_tolerance.validate()?;
        self.rt_tolerance.validate()?;
        if !(self.intensity_tolerance.is_finite() && self.intensity_tolerance >= 0.0) {
            return Err(ProcessingError::InvalidConfiguration(format!(
                "intensity_tolerance must be >= 0, got {}",
                self.intensity_tolerance
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
