use log::{debug, info};

use crate::error::ProcessingError;
use crate::scan::{RawScanSource, Scan};
use crate::table::{Feature, FeatureStatus, FeatureTable, FeatureTableRow};
use crate::task::{TaskOutcome, TaskProgress};

use super::{Chromatogram, ChromatogramConfig};

/// Chromatogram under construction together with its running m/z sum
struct OpenTrace {
    chromatogram: Chromatogram,
    mz_sum: f64,
}

impl OpenTrace {
    fn start(rt: f32, mz: f64, intensity: f32) -> Self {
        let mut chromatogram = Chromatogram::new();
        chromatogram.push(rt, mz, intensity);
        Self {
            chromatogram,
            mz_sum: mz,
        }
    }

    fn push(&mut self, rt: f32, mz: f64, intensity: f32) {
        self.chromatogram.push(rt, mz, intensity);
        self.mz_sum += mz;
    }

    fn mean_mz(&self) -> f64 {
        self.mz_sum / self.chromatogram.len() as f64
    }
}

/// Builds extracted ion chromatograms by following ions from scan to scan
#[derive(Debug, Clone)]
pub struct ChromatogramBuilder {
    config: ChromatogramConfig,
}

impl ChromatogramBuilder {
    /// Create a builder, rejecting invalid configuration
    pub fn new(config: ChromatogramConfig) -> Result<Self, ProcessingError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Builder configuration
    pub fn config(&self) -> &ChromatogramConfig {
        &self.config
    }

    /// Trace every ion of `source` through its scans.
    ///
    /// Scans of the configured MS level are visited in retention-time order.
    /// Within a scan, points are offered most intense first; each extends the
    /// nearest open chromatogram whose m/z window contains it and that has not
    /// been extended by this scan yet, or starts a new chromatogram. A
    /// chromatogram without a match for longer than `max_gap` is closed.
    /// Chromatograms that are too short, too low or too sparse are dropped.
    /// The result is sorted by mean m/z.
    pub fn build<S: RawScanSource + ?Sized>(
        &self,
        source: &S,
        progress: &TaskProgress,
    ) -> TaskOutcome<Vec<Chromatogram>> {
        let mut scans: Vec<(f32, &Scan)> = source
            .scans()
            .iter()
            .filter(|s| s.ms_level == self.config.ms_level)
            .filter_map(|s| s.retention_time.map(|rt| (rt, s)))
            .collect();
        scans.sort_by(|a, b| a.0.total_cmp(&b.0));
        progress.start(scans.len());

        let mut open: Vec<OpenTrace> = Vec::new();
        let mut closed: Vec<Chromatogram> = Vec::new();

        for (rt, scan) in scans {
            if progress.is_canceled() {
                return TaskOutcome::Canceled;
            }

            let max_gap = self.config.max_gap;
            let (stale, active): (Vec<OpenTrace>, Vec<OpenTrace>) = open
                .into_iter()
                .partition(|t| t.chromatogram.last_rt().map_or(false, |last| (rt - last) as f64 > max_gap));
            closed.extend(stale.into_iter().map(|t| t.chromatogram));
            open = active;

            self.extend_traces(&mut open, rt, scan);
            progress.advance(1);
        }
        closed.extend(open.into_iter().map(|t| t.chromatogram));

        let traced = closed.len();
        let mut kept: Vec<(f64, Chromatogram)> = closed
            .into_iter()
            .filter(|c| {
                c.len() >= self.config.min_data_points
                    && c.time_span() >= self.config.min_time_span
                    && c.height() >= self.config.min_height
            })
            .filter_map(|c| c.mean_mz().map(|mz| (mz, c)))
            .collect();
        kept.sort_by(|a, b| a.0.total_cmp(&b.0));

        debug!(
            "{}: traced {} ions, kept {} chromatograms",
            source.name(),
            traced,
            kept.len()
        );
        TaskOutcome::Finished(kept.into_iter().map(|(_, c)| c).collect())
    }

    /// Offer the points of one scan to the open traces
    fn extend_traces(&self, open: &mut Vec<OpenTrace>, rt: f32, scan: &Scan) {
        let tolerance = &self.config.mz_tolerance;

        // (mean m/z, trace index), fixed for the duration of this scan
        let mut index: Vec<(f64, usize)> = open
            .iter()
            .enumerate()
            .map(|(i, t)| (t.mean_mz(), i))
            .collect();
        index.sort_by(|a, b| a.0.total_cmp(&b.0));
        let mut extended = vec![false; open.len()];

        let mut points: Vec<(f64, f32)> = scan
            .points()
            .filter(|&(_, intensity)| intensity >= self.config.min_intensity)
            .collect();
        points.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut started = Vec::new();
        for (mz, intensity) in points {
            let band = tolerance.range(mz);
            let band = band.widen(band.half_width());
            let first = index.partition_point(|&(mean, _)| mean < band.lower);

            let mut best: Option<(f64, usize)> = None;
            for &(mean, trace) in index[first..].iter().take_while(|(mean, _)| *mean <= band.upper) {
                if extended[trace] || !tolerance.range(mean).contains(mz) {
                    continue;
                }
                let distance = (mz - mean).abs();
                if best.map_or(true, |(d, _)| distance < d) {
                    best = Some((distance, trace));
                }
            }

            match best {
                Some((_, trace)) => {
                    extended[trace] = true;
                    open[trace].push(rt, mz, intensity);
                }
                None => started.push(OpenTrace::start(rt, mz, intensity)),
            }
        }
        open.extend(started);
    }

    /// Build the chromatograms of one sample and turn them into a
    /// single-sample feature table.
    ///
    /// Each chromatogram is cropped to the peak around its apex; every
    /// surviving peak becomes one row with a detected feature.
    pub fn build_feature_table<S: RawScanSource + ?Sized>(
        &self,
        source: &S,
        progress: &TaskProgress,
    ) -> Result<TaskOutcome<FeatureTable>, ProcessingError> {
        let sample = source.name().to_string();
        let mut table = FeatureTable::new(sample.clone(), vec![sample.clone()])?;

        let chromatograms = match self.build(source, progress) {
            TaskOutcome::Finished(chromatograms) => chromatograms,
            TaskOutcome::Canceled => return Ok(TaskOutcome::Canceled),
        };

        progress.start(chromatograms.len());
        let mut next_id = 1;
        for chromatogram in chromatograms {
            if progress.is_canceled() {
                return Ok(TaskOutcome::Canceled);
            }
            progress.advance(1);

            let Some(rt_range) = chromatogram.rt_range() else {
                continue;
            };
            let cropped = chromatogram.crop(
                &rt_range,
                self.config.intensity_tolerance,
                self.config.noise_level,
            );
            let Some(feature) = cropped
                .and_then(|c| Feature::from_chromatogram(sample.as_str(), FeatureStatus::Detected, c))
            else {
                continue;
            };
            table.push_row_unchecked(FeatureTableRow::with_feature(next_id, feature));
            next_id += 1;
        }

        table.history_mut().record("chromatogram builder", &self.config);
        info!("{}: built {} features", sample, table.len());
        Ok(TaskOutcome::Finished(table))
    }
}
