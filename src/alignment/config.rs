use serde::{Deserialize, Serialize};

use crate::error::ProcessingError;
use crate::tolerance::ToleranceSpec;

/// Configuration for joining per-sample feature tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    /// m/z window around a row's m/z in which candidates are searched
    pub mz_tolerance: ToleranceSpec,

    /// Weight of the m/z term of the score
    pub mz_weight: f64,

    /// Retention-time window around a row's rt
    pub rt_tolerance: ToleranceSpec,

    /// Weight of the rt term of the score
    pub rt_weight: f64,

    /// Never join rows whose preferred annotations are both known and differ
    pub require_same_annotation: bool,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            mz_tolerance: ToleranceSpec::MaximumOf(vec![
                ToleranceSpec::ConstantDa { delta: 0.003 },
                ToleranceSpec::ConstantPpm { ppm: 5.0 },
            ]),
            mz_weight: 3.0,
            rt_tolerance: ToleranceSpec::Rt {
                delta: 0.1,
                is_percentage: false,
            },
            rt_weight: 1.0,
            require_same_annotation: false,
        }
    }
}

impl AlignmentConfig {
    /// Reject invalid tolerances and negative weights
    pub fn validate(&self) -> Result<(), ProcessingError> {
        self.mz_tolerance.validate()?;
        self.rt_tolerance.validate()?;
        for (name, weight) in [("mz_weight", self.mz_weight), ("rt_weight", self.rt_weight)] {
            if !(weight.is_finite() && weight >= 0.0) {
                return Err(ProcessingError::InvalidConfiguration(format!(
                    "{name} must be >= 0, got {weight}"
                )));
            }
        }
        Ok(())
    }
}
