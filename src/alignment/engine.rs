use std::collections::HashSet;

use log::{debug, info, warn};

use crate::error::ProcessingError;
use crate::table::{FeatureTable, FeatureTableRow};
use crate::task::{ItemFailure, TaskOutcome, TaskProgress};
use crate::tolerance::ClosedRange;

use super::score::{is_compatible, score};
use super::AlignmentConfig;

/// Output of one alignment run
#[derive(Debug, Clone)]
pub struct AlignmentResult {
    /// The aligned table
    pub table: FeatureTable,
    /// Source tables that were skipped, and why
    pub failures: Vec<ItemFailure>,
}

/// Aligned rows sorted by m/z; rows without m/z are kept apart and always
/// returned as candidates
struct CandidateIndex {
    by_mz: Vec<(f64, usize)>,
    without_mz: Vec<usize>,
    len: usize,
}

impl CandidateIndex {
    fn new(rows: &[FeatureTableRow]) -> Self {
        let mut by_mz = Vec::with_capacity(rows.len());
        let mut without_mz = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            match row.mz() {
                Some(mz) => by_mz.push((mz, i)),
                None => without_mz.push(i),
            }
        }
        by_mz.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        Self {
            by_mz,
            without_mz,
            len: rows.len(),
        }
    }

    /// Row indices in ascending order
    fn candidates(&self, mz_range: Option<&ClosedRange>) -> Vec<usize> {
        let Some(range) = mz_range else {
            return (0..self.len).collect();
        };
        let start = self.by_mz.partition_point(|&(mz, _)| mz < range.lower);
        let mut hits: Vec<usize> = self.by_mz[start..]
            .iter()
            .take_while(|&&(mz, _)| mz <= range.upper)
            .map(|&(_, i)| i)
            .chain(self.without_mz.iter().copied())
            .collect();
        hits.sort_unstable();
        hits
    }
}

/// Joins per-sample feature tables into one aligned table.
///
/// Tables are processed in input order. Each row of a table is scored
/// against the aligned rows inside its m/z and rt windows; the best pairs are
/// accepted greedily so that each source row and each aligned row is used at
/// most once per table. Unmatched rows become new aligned rows.
#[derive(Debug, Clone)]
pub struct AlignmentEngine {
    config: AlignmentConfig,
}

impl AlignmentEngine {
    /// Create an engine, rejecting invalid configuration
    pub fn new(config: AlignmentConfig) -> Result<Self, ProcessingError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Engine configuration
    pub fn config(&self) -> &AlignmentConfig {
        &self.config
    }

    /// Align `tables` into a new table called `name`.
    ///
    /// Tables that fail validation or repeat a sample of an earlier table are
    /// skipped and reported in [`AlignmentResult::failures`]. Fails if no
    /// table is left to align.
    pub fn align(
        &self,
        name: &str,
        tables: &[FeatureTable],
        progress: &TaskProgress,
    ) -> Result<TaskOutcome<AlignmentResult>, ProcessingError> {
        let mut failures = Vec::new();
        let mut accepted: Vec<&FeatureTable> = Vec::with_capacity(tables.len());
        let mut samples: Vec<String> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for table in tables {
            let rejection = table.validate().err().or_else(|| {
                table
                    .samples()
                    .iter()
                    .find(|s| seen.contains(s.as_str()))
                    .map(|s| ProcessingError::DuplicateSample(s.clone()))
            });
            if let Some(err) = rejection {
                warn!("Skipping table '{}': {}", table.name(), err);
                let row_id = match &err {
                    ProcessingError::UnknownSample { row_id, .. } => Some(*row_id),
                    _ => None,
                };
                let sample = match &err {
                    ProcessingError::UnknownSample { sample, .. } => Some(sample.clone()),
                    ProcessingError::DuplicateSample(sample) => Some(sample.clone()),
                    _ => None,
                };
                failures.push(ItemFailure {
                    table: table.name().to_string(),
                    row_id,
                    sample,
                    reason: err.to_string(),
                });
                continue;
            }
            seen.extend(table.samples().iter().map(String::as_str));
            samples.extend(table.samples().iter().cloned());
            accepted.push(table);
        }

        let mut result = FeatureTable::new(name, samples)?;
        if let Some(first) = accepted.first() {
            result.history_mut().extend_from(first.history());
        }

        progress.start(accepted.iter().map(|t| t.len()).sum());
        let mut next_id: u32 = 1;

        for table in accepted {
            let Some(assignment) = self.assign(table, &result, progress) else {
                return Ok(TaskOutcome::Canceled);
            };

            let mut merged = 0;
            for (row, target) in table.rows().iter().zip(assignment) {
                match target {
                    Some(index) => {
                        let aligned = &mut result.rows_mut()[index];
                        for feature in row.features().values() {
                            aligned.insert_feature(feature.clone());
                        }
                        for annotation in row.annotations() {
                            aligned.add_annotation(annotation.clone());
                        }
                        if aligned.charge.is_none() {
                            aligned.charge = row.charge;
                        }
                        merged += 1;
                    }
                    None => {
                        let mut aligned = row.copy_identity(next_id);
                        next_id += 1;
                        for feature in row.features().values() {
                            aligned.insert_feature(feature.clone());
                        }
                        result.push_row_unchecked(aligned);
                    }
                }
            }
            debug!(
                "{}: {} rows joined existing rows, {} new rows",
                table.name(),
                merged,
                table.len() - merged
            );
        }

        result.recompute_aggregates();
        result.history_mut().record("join aligner", &self.config);
        info!(
            "Aligned {} tables into '{}': {} rows, {} tables skipped",
            tables.len() - failures.len(),
            name,
            result.len(),
            failures.len()
        );
        Ok(TaskOutcome::Finished(AlignmentResult {
            table: result,
            failures,
        }))
    }

    /// Greedy best-score assignment of `table`'s rows to aligned rows.
    ///
    /// Returns, per source row, the index of the aligned row it joins, or
    /// `None` on cancellation.
    fn assign(
        &self,
        table: &FeatureTable,
        aligned: &FeatureTable,
        progress: &TaskProgress,
    ) -> Option<Vec<Option<usize>>> {
        let index = CandidateIndex::new(aligned.rows());
        let mut scores: Vec<(f64, usize, usize)> = Vec::new();

        for (source, row) in table.rows().iter().enumerate() {
            if progress.is_canceled() {
                return None;
            }
            let mz_range = row.mz().map(|mz| self.config.mz_tolerance.range(mz));
            let rt_range = row.rt().map(|rt| self.config.rt_tolerance.range(rt as f64));

            for target in index.candidates(mz_range.as_ref()) {
                let candidate = &aligned.rows()[target];
                if let (Some(range), Some(rt)) = (&rt_range, candidate.rt()) {
                    if !range.contains(rt as f64) {
                        continue;
                    }
                }
                if !is_compatible(row, candidate, &self.config) {
                    continue;
                }
                scores.push((score(row, candidate, &self.config), source, target));
            }
            progress.advance(1);
        }

        // stable: equal scores keep generation order
        scores.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut source_taken = vec![false; table.len()];
        let mut target_taken = vec![false; aligned.len()];
        let mut assignment = vec![None; table.len()];
        for (_, source, target) in scores {
            if source_taken[source] || target_taken[target] {
                continue;
            }
            source_taken[source] = true;
            target_taken[target] = true;
            assignment[source] = Some(target);
        }
        Some(assignment)
    }
}
