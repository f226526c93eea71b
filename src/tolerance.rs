//! # Tolerance Model
//!
//! Tolerances map a center value (an m/z or a retention time) onto the closed
//! range of values accepted as "the same". They are plain values: building a
//! range never fails, all validation happens when the tolerance is created or
//! deserialized.
//!
//! | Variant | Range at center `c` |
//! |---------|---------------------|
//! | `ConstantDa { delta }` | `[c - delta, c + delta]` |
//! | `ConstantPpm { ppm }` | `[c - c*ppm/1e6, c + c*ppm/1e6]` |
//! | `MaximumOf(specs)` | hull of every member's range |
//! | `Rt { delta, is_percentage: false }` | `[c - delta, c + delta]` |
//! | `Rt { delta, is_percentage: true }` | `[c - c*delta/100, c + c*delta/100]` |
//!
//! ```rust
//! use mzfeature::tolerance::ToleranceSpec;
//!
//! let mz_tol = ToleranceSpec::mz_da_or_ppm(0.003, 5.0)?;
//! let range = mz_tol.range(1000.0);
//! assert!(range.contains(1000.004));
//! # Ok::<(), mzfeature::error::ProcessingError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ProcessingError;

/// A closed, inclusive interval `[lower, upper]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosedRange {
    /// Lower bound (inclusive)
    pub lower: f64,
    /// Upper bound (inclusive)
    pub upper: f64,
}

impl ClosedRange {
    /// Create a range from two bounds given in any order
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            lower: a.min(b),
            upper: a.max(b),
        }
    }

    /// Degenerate range holding a single value
    pub fn singleton(value: f64) -> Self {
        Self {
            lower: value,
            upper: value,
        }
    }

    /// Returns true if `value` lies inside the range, bounds included
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Returns true if `other` lies completely inside this range
    pub fn encloses(&self, other: &ClosedRange) -> bool {
        other.lower >= self.lower && other.upper <= self.upper
    }

    /// Distance between the bounds
    #[inline]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Half the distance between the bounds
    #[inline]
    pub fn half_width(&self) -> f64 {
        self.width() / 2.0
    }

    /// Midpoint of the range
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Smallest range enclosing both `self` and `other`
    pub fn span_with(&self, other: &ClosedRange) -> Self {
        Self {
            lower: self.lower.min(other.lower),
            upper: self.upper.max(other.upper),
        }
    }

    /// Extend both bounds outward by `by`
    pub fn widen(&self, by: f64) -> Self {
        Self {
            lower: self.lower - by,
            upper: self.upper + by,
        }
    }
}

/// Tolerance model for m/z and retention-time matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToleranceSpec {
    /// Fixed absolute window in Dalton (m/z units)
    ConstantDa {
        /// Half-width of the window
        delta: f64,
    },
    /// Window proportional to the center, in parts per million
    ConstantPpm {
        /// Half-width in ppm of the center
        ppm: f64,
    },
    /// Accepts a value if any member tolerance accepts it
    MaximumOf(Vec<ToleranceSpec>),
    /// Retention-time window, either absolute (minutes) or relative
    Rt {
        /// Half-width, in minutes or in percent of the center
        delta: f64,
        /// Interpret `delta` as a percentage of the center
        is_percentage: bool,
    },
}

impl ToleranceSpec {
    /// Absolute m/z tolerance
    pub fn constant_da(delta: f64) -> Result<Self, ProcessingError> {
        let spec = Self::ConstantDa { delta };
        spec.validate()?;
        Ok(spec)
    }

    /// Relative m/z tolerance in ppm
    pub fn constant_ppm(ppm: f64) -> Result<Self, ProcessingError> {
        let spec = Self::ConstantPpm { ppm };
        spec.validate()?;
        Ok(spec)
    }

    /// Union of several tolerances
    pub fn maximum_of(specs: Vec<ToleranceSpec>) -> Result<Self, ProcessingError> {
        let spec = Self::MaximumOf(specs);
        spec.validate()?;
        Ok(spec)
    }

    /// The usual m/z tolerance: whichever of `da` and `ppm` is wider at the center
    pub fn mz_da_or_ppm(da: f64, ppm: f64) -> Result<Self, ProcessingError> {
        Self::maximum_of(vec![Self::constant_da(da)?, Self::constant_ppm(ppm)?])
    }

    /// Absolute retention-time tolerance in minutes
    pub fn rt_absolute(minutes: f64) -> Result<Self, ProcessingError> {
        let spec = Self::Rt {
            delta: minutes,
            is_percentage: false,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Retention-time tolerance as a percentage of the center
    pub fn rt_percentage(percent: f64) -> Result<Self, ProcessingError> {
        let spec = Self::Rt {
            delta: percent,
            is_percentage: true,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Check that every width is finite and non-negative.
    ///
    /// Deserialized tolerances bypass the constructors, so configuration
    /// loading calls this explicitly.
    pub fn validate(&self) -> Result<(), ProcessingError> {
        match self {
            Self::ConstantDa { delta } => check_width("delta (Da)", *delta),
            Self::ConstantPpm { ppm } => check_width("ppm", *ppm),
            Self::Rt { delta, .. } => check_width("retention time delta", *delta),
            Self::MaximumOf(specs) => {
                if specs.is_empty() {
                    return Err(ProcessingError::InvalidConfiguration(
                        "maximum_of tolerance needs at least one member".to_string(),
                    ));
                }
                specs.iter().try_for_each(|s| s.validate())
            }
        }
    }

    /// Accepted closed range around `center`
    pub fn range(&self, center: f64) -> ClosedRange {
        match self {
            Self::ConstantDa { delta } => ClosedRange::new(center - delta, center + delta),
            Self::ConstantPpm { ppm } => {
                let delta = (center * ppm / 1e6).abs();
                ClosedRange::new(center - delta, center + delta)
            }
            Self::Rt {
                delta,
                is_percentage,
            } => {
                let delta = if *is_percentage {
                    (center * delta / 100.0).abs()
                } else {
                    *delta
                };
                ClosedRange::new(center - delta, center + delta)
            }
            Self::MaximumOf(specs) => specs
                .iter()
                .map(|s| s.range(center))
                .reduce(|acc, r| acc.span_with(&r))
                .unwrap_or_else(|| ClosedRange::singleton(center)),
        }
    }

    /// Returns true if `candidate` is accepted around `center`
    pub fn matches(&self, center: f64, candidate: f64) -> bool {
        self.range(center).contains(candidate)
    }
}

fn check_width(what: &'static str, value: f64) -> Result<(), ProcessingError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ProcessingError::NegativeTolerance { what, value })
    }
}
