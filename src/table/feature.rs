use serde::{Deserialize, Serialize};

use crate::chromatogram::{Chromatogram, PeakStatistics};

/// How a feature cell was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureStatus {
    /// Found by untargeted chromatogram building
    Detected,
    /// Recovered by gap filling
    Estimated,
}

impl FeatureStatus {
    /// Column text for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureStatus::Detected => "DETECTED",
            FeatureStatus::Estimated => "ESTIMATED",
        }
    }
}

/// Putative ion identity attached to a row; compared by value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IonAnnotation {
    /// Compound name
    pub name: String,
    /// Adduct, e.g. `[M+H]+`
    pub adduct: Option<String>,
    /// Molecular formula
    pub formula: Option<String>,
}

impl IonAnnotation {
    /// Annotation carrying only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            adduct: None,
            formula: None,
        }
    }

    /// Set the adduct
    pub fn with_adduct(mut self, adduct: impl Into<String>) -> Self {
        self.adduct = Some(adduct.into());
        self
    }
}

/// One sample's measurement of a row's ion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    /// Sample the feature was measured in
    pub sample: String,
    /// How the feature was obtained
    pub status: FeatureStatus,
    /// m/z at the apex
    pub mz: f64,
    /// Retention time at the apex (minutes)
    pub rt: f32,
    /// Peak-shape statistics
    pub statistics: PeakStatistics,
    /// Cropped chromatogram; absent for zero-height placeholders
    pub chromatogram: Option<Chromatogram>,
}

impl Feature {
    /// Build a feature from a cropped chromatogram; `None` if it was never cropped
    pub fn from_chromatogram(
        sample: impl Into<String>,
        status: FeatureStatus,
        chromatogram: Chromatogram,
    ) -> Option<Self> {
        let statistics = chromatogram.statistics()?.clone();
        let apex = statistics.apex_index;
        Some(Self {
            sample: sample.into(),
            status,
            mz: chromatogram.mz()[apex],
            rt: chromatogram.rt()[apex],
            statistics,
            chromatogram: Some(chromatogram),
        })
    }

    /// Single-point feature at a known apex
    pub fn from_apex(sample: impl Into<String>, mz: f64, rt: f32, height: f32) -> Self {
        let mut chromatogram = Chromatogram::with_capacity(1);
        chromatogram.push(rt, mz, height);
        let chromatogram = chromatogram.finalize();
        let statistics = chromatogram
            .statistics()
            .cloned()
            .unwrap_or_else(PeakStatistics::zero);
        Self {
            sample: sample.into(),
            status: FeatureStatus::Detected,
            mz,
            rt,
            statistics,
            chromatogram: Some(chromatogram),
        }
    }

    /// Placeholder for a gap that was searched but held no signal
    pub fn zero_height(sample: impl Into<String>, mz: f64, rt: f32) -> Self {
        Self {
            sample: sample.into(),
            status: FeatureStatus::Estimated,
            mz,
            rt,
            statistics: PeakStatistics::zero(),
            chromatogram: None,
        }
    }

    /// Maximum intensity
    pub fn height(&self) -> f32 {
        self.statistics.height
    }

    /// Integrated area
    pub fn area(&self) -> f64 {
        self.statistics.area
    }
}
