use serde::Serialize;

use crate::error::ProcessingError;
use crate::scan::check_point_arrays;
use crate::tolerance::ClosedRange;

use super::PeakStatistics;

/// Extracted ion chromatogram stored as parallel arrays.
///
/// Points are appended while a chromatogram is being built; [`crop`](Self::crop)
/// cuts it down to a single peak and attaches its [`PeakStatistics`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Chromatogram {
    rt: Vec<f32>,
    mz: Vec<f64>,
    intensity: Vec<f32>,
    statistics: Option<PeakStatistics>,
}

impl Chromatogram {
    /// Create an empty chromatogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty chromatogram with room for `capacity` points
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rt: Vec::with_capacity(capacity),
            mz: Vec::with_capacity(capacity),
            intensity: Vec::with_capacity(capacity),
            statistics: None,
        }
    }

    /// Create a chromatogram from existing arrays
    pub fn from_arrays(
        rt: Vec<f32>,
        mz: Vec<f64>,
        intensity: Vec<f32>,
    ) -> Result<Self, ProcessingError> {
        check_point_arrays(&mz, &intensity)?;
        if rt.len() != intensity.len() {
            return Err(ProcessingError::RtLengthMismatch {
                rt_len: rt.len(),
                intensity_len: intensity.len(),
            });
        }
        Ok(Self {
            rt,
            mz,
            intensity,
            statistics: None,
        })
    }

    /// Append one point
    #[inline]
    pub fn push(&mut self, rt: f32, mz: f64, intensity: f32) {
        self.rt.push(rt);
        self.mz.push(mz);
        self.intensity.push(intensity);
    }

    /// Retention times in minutes
    pub fn rt(&self) -> &[f32] {
        &self.rt
    }

    /// m/z of each point
    pub fn mz(&self) -> &[f64] {
        &self.mz
    }

    /// Intensity of each point
    pub fn intensity(&self) -> &[f32] {
        &self.intensity
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.rt.len()
    }

    /// Returns true if there are no points
    pub fn is_empty(&self) -> bool {
        self.rt.is_empty()
    }

    /// Peak statistics, available once the chromatogram has been cropped
    pub fn statistics(&self) -> Option<&PeakStatistics> {
        self.statistics.as_ref()
    }

    /// Largest intensity, zero when empty
    pub fn height(&self) -> f32 {
        self.intensity.iter().copied().fold(0.0, f32::max)
    }

    /// Mean m/z of all points
    pub fn mean_mz(&self) -> Option<f64> {
        if self.mz.is_empty() {
            return None;
        }
        Some(self.mz.iter().sum::<f64>() / self.mz.len() as f64)
    }

    /// Retention time of the last point
    pub fn last_rt(&self) -> Option<f32> {
        self.rt.last().copied()
    }

    /// Retention-time extent of the points
    pub fn rt_range(&self) -> Option<ClosedRange> {
        let first = *self.rt.first()?;
        let last = *self.rt.last()?;
        Some(ClosedRange::new(first as f64, last as f64))
    }

    /// Time between the first and the last point
    pub fn time_span(&self) -> f64 {
        self.rt_range().map_or(0.0, |r| r.width())
    }

    /// Index of the most intense point with rt in `rt_range` and intensity
    /// above `noise_level` (first one on ties)
    pub fn apex_index(&self, rt_range: &ClosedRange, noise_level: f32) -> Option<usize> {
        let mut apex: Option<usize> = None;
        for (i, (&rt, &intensity)) in self.rt.iter().zip(self.intensity.iter()).enumerate() {
            if !rt_range.contains(rt as f64) || intensity <= noise_level {
                continue;
            }
            if apex.map_or(true, |a| intensity > self.intensity[a]) {
                apex = Some(i);
            }
        }
        apex
    }

    /// Crop to the single peak around the apex inside `rt_range`.
    ///
    /// From the apex the boundaries move outward while each next point is at
    /// most `(1 + tolerance)` times the point before it, that point is not
    /// zero and the next point does not exceed the apex; equal intensities
    /// keep the walk going. The apex of the cropped trace is the one found
    /// inside `rt_range`. Returns `None` if no point in `rt_range` exceeds
    /// `noise_level`.
    pub fn crop(self, rt_range: &ClosedRange, tolerance: f64, noise_level: f32) -> Option<Self> {
        let apex = self.apex_index(rt_range, noise_level)?;
        let (start, end) = self.peak_bounds(apex, tolerance);

        let rt = self.rt[start..=end].to_vec();
        let mz = self.mz[start..=end].to_vec();
        let intensity = self.intensity[start..=end].to_vec();
        let statistics = PeakStatistics::compute_at(&rt, &intensity, apex - start);
        Some(Self {
            rt,
            mz,
            intensity,
            statistics,
        })
    }

    /// Compute statistics over all points without cropping
    pub fn finalize(mut self) -> Self {
        self.statistics = PeakStatistics::compute(&self.rt, &self.intensity);
        self
    }

    /// Inclusive `(start, end)` bounds of the peak containing `apex`
    fn peak_bounds(&self, apex: usize, tolerance: f64) -> (usize, usize) {
        let factor = 1.0 + tolerance;
        let height = self.intensity[apex];
        let keeps_falling = |next: f32, prev: f32| {
            prev != 0.0 && next <= height && next as f64 <= prev as f64 * factor
        };

        let mut start = apex;
        while start > 0 && keeps_falling(self.intensity[start - 1], self.intensity[start]) {
            start -= 1;
        }
        let mut end = apex;
        while end + 1 < self.len() && keeps_falling(self.intensity[end + 1], self.intensity[end]) {
            end += 1;
        }
        (start, end)
    }
}
