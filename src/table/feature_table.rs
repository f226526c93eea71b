use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::error::ProcessingError;
use crate::tolerance::ClosedRange;

use super::columns::{Column, SampleColumn};
use super::{FeatureTableRow, ProcessingHistory};

/// Ordered rows of features over an ordered list of samples
#[derive(Debug, Clone, Serialize)]
pub struct FeatureTable {
    name: String,
    samples: Vec<String>,
    rows: Vec<FeatureTableRow>,
    history: ProcessingHistory,
}

impl FeatureTable {
    /// Create an empty table.
    ///
    /// Fails if `samples` is empty or names a sample twice.
    pub fn new(name: impl Into<String>, samples: Vec<String>) -> Result<Self, ProcessingError> {
        let name = name.into();
        if samples.is_empty() {
            return Err(ProcessingError::EmptySampleList(name));
        }
        let mut seen = HashSet::with_capacity(samples.len());
        for sample in &samples {
            if !seen.insert(sample.as_str()) {
                return Err(ProcessingError::DuplicateSample(sample.clone()));
            }
        }
        Ok(Self {
            name,
            samples,
            rows: Vec::new(),
            history: ProcessingHistory::new(),
        })
    }

    /// Table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sample names in column order
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// Returns true if `sample` is one of this table's samples
    pub fn has_sample(&self, sample: &str) -> bool {
        self.samples.iter().any(|s| s == sample)
    }

    /// Rows in table order
    pub fn rows(&self) -> &[FeatureTableRow] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [FeatureTableRow] {
        &mut self.rows
    }

    /// Row with the given id
    pub fn row(&self, id: u32) -> Option<&FeatureTableRow> {
        self.rows.iter().find(|r| r.id() == id)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row after checking that it only references known samples
    pub fn push_row(&mut self, row: FeatureTableRow) -> Result<(), ProcessingError> {
        self.check_row(&row)?;
        self.rows.push(row);
        Ok(())
    }

    pub(crate) fn push_row_unchecked(&mut self, row: FeatureTableRow) {
        self.rows.push(row);
    }

    /// Check that every row references only samples of this table
    pub fn validate(&self) -> Result<(), ProcessingError> {
        self.rows.iter().try_for_each(|row| self.check_row(row))
    }

    fn check_row(&self, row: &FeatureTableRow) -> Result<(), ProcessingError> {
        match row.features().keys().find(|s| !self.has_sample(s)) {
            Some(sample) => Err(ProcessingError::UnknownSample {
                table: self.name.clone(),
                row_id: row.id(),
                sample: sample.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Column descriptors: row columns, then per-sample columns in sample order
    pub fn columns(&self) -> Vec<Column> {
        let mut columns = vec![
            Column::Id,
            Column::Mz,
            Column::Rt,
            Column::Charge,
            Column::IonAnnotations,
        ];
        for sample in &self.samples {
            for kind in SampleColumn::ALL {
                columns.push(Column::Sample {
                    sample: sample.clone(),
                    kind,
                });
            }
        }
        columns
    }

    /// Number of (row, sample) cells without a feature
    pub fn empty_cell_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| {
                self.samples
                    .iter()
                    .filter(|s| !row.has_feature(s))
                    .count()
            })
            .sum()
    }

    /// Rows whose aggregate m/z and rt fall inside the given ranges
    pub fn rows_in_range(&self, mz_range: &ClosedRange, rt_range: &ClosedRange) -> Vec<&FeatureTableRow> {
        self.rows
            .iter()
            .filter(|row| match (row.mz(), row.rt()) {
                (Some(mz), Some(rt)) => mz_range.contains(mz) && rt_range.contains(rt as f64),
                _ => false,
            })
            .collect()
    }

    /// Recompute every row's aggregate m/z and rt
    pub fn recompute_aggregates(&mut self) {
        for row in &mut self.rows {
            row.recompute_aggregates();
        }
    }

    /// Processing steps applied to this table
    pub fn history(&self) -> &ProcessingHistory {
        &self.history
    }

    /// Mutable processing history
    pub fn history_mut(&mut self) -> &mut ProcessingHistory {
        &mut self.history
    }
}

impl fmt::Display for FeatureTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Feature table '{}':", self.name)?;
        writeln!(f, "  Samples: {}", self.samples.len())?;
        writeln!(f, "  Rows: {}", self.rows.len())?;
        writeln!(f, "  Empty cells: {}", self.empty_cell_count())?;
        write!(f, "  Processing steps: {}", self.history.len())
    }
}
