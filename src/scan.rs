//! Scan data model and the raw-data source contract.
//!
//! Scans arrive from format decoders outside this crate. They are validated
//! once on construction (parallel arrays, ascending m/z) and are immutable
//! afterwards; every algorithm here relies on the ascending-m/z invariant for
//! binary searches.

use serde::Serialize;

use crate::error::ProcessingError;
use crate::tolerance::ClosedRange;

/// Scan polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Polarity {
    /// Positive ion mode
    Positive,
    /// Negative ion mode
    Negative,
    /// Polarity not reported
    #[default]
    Unknown,
}

/// A single mass spectrum with parallel m/z and intensity arrays
#[derive(Debug, Clone, PartialEq)]
pub struct Scan {
    /// Native scan number
    pub scan_number: i64,
    /// Retention time in minutes, if the decoder reported one
    pub retention_time: Option<f32>,
    /// MS level (1 for MS1, 2 for MS/MS, ...)
    pub ms_level: u8,
    /// Ion polarity
    pub polarity: Polarity,
    mz: Vec<f64>,
    intensity: Vec<f32>,
}

impl Scan {
    /// Create a scan, validating the point arrays
    pub fn new(
        scan_number: i64,
        retention_time: Option<f32>,
        ms_level: u8,
        polarity: Polarity,
        mz: Vec<f64>,
        intensity: Vec<f32>,
    ) -> Result<Self, ProcessingError> {
        check_point_arrays(&mz, &intensity)?;
        if let Some(index) = mz.windows(2).position(|w| w[1] < w[0]) {
            return Err(ProcessingError::UnsortedMz {
                scan_number,
                index: index + 1,
            });
        }
        Ok(Self {
            scan_number,
            retention_time,
            ms_level,
            polarity,
            mz,
            intensity,
        })
    }

    /// Copy of this scan's metadata with new point arrays
    pub(crate) fn with_points(&self, mz: Vec<f64>, intensity: Vec<f32>) -> Self {
        Self {
            scan_number: self.scan_number,
            retention_time: self.retention_time,
            ms_level: self.ms_level,
            polarity: self.polarity,
            mz,
            intensity,
        }
    }

    /// m/z values, ascending
    pub fn mz(&self) -> &[f64] {
        &self.mz
    }

    /// Intensities, parallel to [`mz`](Self::mz)
    pub fn intensity(&self) -> &[f32] {
        &self.intensity
    }

    /// Number of data points
    pub fn len(&self) -> usize {
        self.mz.len()
    }

    /// Returns true if the scan holds no points
    pub fn is_empty(&self) -> bool {
        self.mz.is_empty()
    }

    /// Iterate `(mz, intensity)` pairs in m/z order
    pub fn points(&self) -> impl Iterator<Item = (f64, f32)> + '_ {
        self.mz.iter().copied().zip(self.intensity.iter().copied())
    }

    /// Index range of points whose m/z lies inside `range`
    pub fn index_range(&self, range: &ClosedRange) -> std::ops::Range<usize> {
        let start = self.mz.partition_point(|&mz| mz < range.lower);
        let end = self.mz.partition_point(|&mz| mz <= range.upper);
        start..end.max(start)
    }

    /// Most intense point inside `range` (first one on ties)
    pub fn most_intense_in(&self, range: &ClosedRange) -> Option<(f64, f32)> {
        let mut best: Option<(f64, f32)> = None;
        for i in self.index_range(range) {
            let intensity = self.intensity[i];
            if best.map_or(true, |(_, b)| intensity > b) {
                best = Some((self.mz[i], intensity));
            }
        }
        best
    }

    /// Total ion current
    pub fn total_ion_current(&self) -> f64 {
        self.intensity.iter().map(|&i| i as f64).sum()
    }

    /// Base peak `(mz, intensity)`, if the scan is not empty
    pub fn base_peak(&self) -> Option<(f64, f32)> {
        self.points()
            .reduce(|best, p| if p.1 > best.1 { p } else { best })
    }
}

pub(crate) fn check_point_arrays(mz: &[f64], intensity: &[f32]) -> Result<(), ProcessingError> {
    if mz.len() != intensity.len() {
        return Err(ProcessingError::ArrayLengthMismatch {
            mz_len: mz.len(),
            intensity_len: intensity.len(),
        });
    }
    Ok(())
}

/// Builder for scans assembled point by point
pub struct ScanBuilder {
    scan_number: i64,
    retention_time: Option<f32>,
    ms_level: u8,
    polarity: Polarity,
    points: Vec<(f64, f32)>,
}

impl ScanBuilder {
    /// Start an MS1 scan with the given scan number
    pub fn new(scan_number: i64) -> Self {
        Self {
            scan_number,
            retention_time: None,
            ms_level: 1,
            polarity: Polarity::Unknown,
            points: Vec::new(),
        }
    }

    /// Set the MS level
    pub fn ms_level(mut self, level: u8) -> Self {
        self.ms_level = level;
        self
    }

    /// Set the retention time in minutes
    pub fn retention_time(mut self, rt: f32) -> Self {
        self.retention_time = Some(rt);
        self
    }

    /// Set the polarity
    pub fn polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Add a single point
    pub fn add_point(mut self, mz: f64, intensity: f32) -> Self {
        self.points.push((mz, intensity));
        self
    }

    /// Add several points at once
    pub fn add_points(mut self, points: impl IntoIterator<Item = (f64, f32)>) -> Self {
        self.points.extend(points);
        self
    }

    /// Build the scan; points are sorted by m/z
    pub fn build(mut self) -> Scan {
        self.points.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (mz, intensity) = self.points.into_iter().unzip();
        Scan {
            scan_number: self.scan_number,
            retention_time: self.retention_time,
            ms_level: self.ms_level,
            polarity: self.polarity,
            mz,
            intensity,
        }
    }
}

/// Ordered scans of one sample, provided by an external decoder
pub trait RawScanSource {
    /// Sample name; also the sample key in feature tables
    fn name(&self) -> &str;

    /// All scans in acquisition order
    fn scans(&self) -> &[Scan];

    /// Scans of `ms_level` whose retention time lies in `range`, in acquisition order
    fn scans_in_rt_range(&self, range: &ClosedRange, ms_level: u8) -> Vec<&Scan> {
        self.scans()
            .iter()
            .filter(|s| s.ms_level == ms_level)
            .filter(|s| s.retention_time.map_or(false, |rt| range.contains(rt as f64)))
            .collect()
    }
}

/// In-memory raw data file
#[derive(Debug, Clone)]
pub struct RawDataFile {
    name: String,
    scans: Vec<Scan>,
}

impl RawDataFile {
    /// Wrap decoded scans under a sample name
    pub fn new(name: impl Into<String>, scans: Vec<Scan>) -> Self {
        Self {
            name: name.into(),
            scans,
        }
    }

    /// Number of scans
    pub fn scan_count(&self) -> usize {
        self.scans.len()
    }
}

impl RawScanSource for RawDataFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn scans(&self) -> &[Scan] {
        &self.scans
    }
}
