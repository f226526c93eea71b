use log::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::chromatogram::{extract_targeted, TargetedRequest};
use crate::error::ProcessingError;
use crate::scan::RawScanSource;
use crate::table::{Feature, FeatureStatus, FeatureTable, FeatureTableRow};
use crate::task::{ItemFailure, TaskOutcome, TaskProgress};
use crate::tolerance::ClosedRange;

use super::GapFillConfig;

/// Output of one gap-filling run
#[derive(Debug, Clone, Default)]
pub struct GapFillResult {
    /// Number of cells that received a feature
    pub filled: usize,
    /// Cells that could not be searched, and why
    pub failures: Vec<ItemFailure>,
}

/// Outcome for one empty cell: a feature, nothing found, or a failure reason
type CellOutcome = Result<Option<Feature>, String>;

/// Searches the raw data for features missing from a feature table
#[derive(Debug, Clone)]
pub struct GapFiller {
    config: GapFillConfig,
}

impl GapFiller {
    /// Create a gap filler, rejecting invalid configuration
    pub fn new(config: GapFillConfig) -> Result<Self, ProcessingError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Gap-filling configuration
    pub fn config(&self) -> &GapFillConfig {
        &self.config
    }

    /// Fill the empty (row, sample) cells of `table` from `sources`.
    ///
    /// Each sample is searched only in the source of the same name. A cell
    /// that cannot be searched is reported and stays empty. Cells are
    /// computed first (in parallel with the `parallel` feature) and then
    /// written in row and sample order; on cancellation the table is left
    /// untouched.
    pub fn fill<S: RawScanSource + Sync>(
        &self,
        table: &mut FeatureTable,
        sources: &[S],
        progress: &TaskProgress,
    ) -> TaskOutcome<GapFillResult> {
        let samples: Vec<(&str, Option<&S>)> = table
            .samples()
            .iter()
            .map(|sample| {
                let source = sources.iter().find(|s| s.name() == sample.as_str());
                (sample.as_str(), source)
            })
            .collect();

        let cells: Vec<(usize, usize)> = table
            .rows()
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                samples
                    .iter()
                    .enumerate()
                    .filter(move |(_, (sample, _))| !row.has_feature(sample))
                    .map(move |(s, _)| (r, s))
            })
            .collect();
        progress.start(cells.len());

        let rows = table.rows();
        let search = |&(r, s): &(usize, usize)| -> Option<CellOutcome> {
            if progress.is_canceled() {
                return None;
            }
            let (sample, source) = samples[s];
            let outcome = match source {
                Some(source) => self.fill_cell(&rows[r], sample, source),
                None => Err(format!("no raw data for sample '{sample}'")),
            };
            progress.advance(1);
            Some(outcome)
        };

        #[cfg(feature = "parallel")]
        let outcomes: Vec<Option<CellOutcome>> = cells.par_iter().map(search).collect();

        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<Option<CellOutcome>> = cells.iter().map(search).collect();

        if progress.is_canceled() || outcomes.iter().any(Option::is_none) {
            return TaskOutcome::Canceled;
        }

        let searched = cells.len();
        let table_name = table.name().to_string();
        let samples: Vec<String> = table.samples().to_vec();
        let mut result = GapFillResult::default();
        for ((r, s), outcome) in cells.into_iter().zip(outcomes.into_iter().flatten()) {
            let row = &mut table.rows_mut()[r];
            match outcome {
                Ok(Some(feature)) => {
                    if row.insert_feature(feature) {
                        result.filled += 1;
                    }
                }
                Ok(None) => {}
                Err(reason) => {
                    debug!("{}: row {} sample {}: {}", table_name, row.id(), samples[s], reason);
                    result.failures.push(ItemFailure {
                        table: table_name.clone(),
                        row_id: Some(row.id()),
                        sample: Some(samples[s].clone()),
                        reason,
                    });
                }
            }
        }

        if result.filled > 0 {
            table.recompute_aggregates();
            table.history_mut().record("gap filler", &self.config);
        }
        info!(
            "{}: filled {} of {} empty cells, {} failures",
            table_name,
            result.filled,
            searched,
            result.failures.len()
        );
        TaskOutcome::Finished(result)
    }

    /// Search one sample's scans for the ion of `row`
    fn fill_cell<S: RawScanSource + ?Sized>(
        &self,
        row: &FeatureTableRow,
        sample: &str,
        source: &S,
    ) -> CellOutcome {
        let (Some(mz), Some(rt)) = (row.mz(), row.rt()) else {
            return Err("row has no m/z or retention time".to_string());
        };
        let rt = rt as f64;

        let mz_range = search_range(
            self.config.mz_tolerance.range(mz),
            self.config.use_row_mz.then(|| row.observed_mz_range()).flatten(),
        );
        let rt_range = search_range(
            self.config.rt_tolerance.range(rt),
            self.config.use_row_rt.then(|| row.observed_rt_range()).flatten(),
        );

        let request = TargetedRequest {
            mz_range,
            rt_range,
            expected_mz: mz,
            ms_level: self.config.ms_level,
            noise_level: self.config.noise_level,
        };
        let chromatogram = extract_targeted(source, &request);
        if chromatogram.is_empty() {
            return Ok(None);
        }

        let cropped = chromatogram.crop(
            &rt_range,
            self.config.intensity_tolerance,
            self.config.noise_level,
        );
        match cropped.and_then(|c| Feature::from_chromatogram(sample, FeatureStatus::Estimated, c)) {
            Some(feature) => Ok(Some(feature)),
            None if self.config.keep_zero_height => Ok(Some(Feature::zero_height(sample, mz, rt as f32))),
            None => Ok(None),
        }
    }
}

/// Tolerance window at the row aggregate, or the observed span widened by
/// that window's half-width
fn search_range(window: ClosedRange, observed: Option<ClosedRange>) -> ClosedRange {
    match observed {
        Some(observed) => observed.widen(window.half_width()),
        None => window,
    }
}
