//! Feature tables: rows of chemical features measured across samples.
//!
//! A [`FeatureTable`] owns an ordered sample list and ordered rows. Each
//! [`FeatureTableRow`] holds at most one [`Feature`] per sample, and only for
//! samples of its table. Per-sample features own their cropped chromatogram.

pub mod columns;
mod feature;
mod feature_table;
mod history;
mod row;

#[cfg(test)]
mod tests;

pub use columns::{CellValue, Column, SampleColumn};
pub use feature::{Feature, FeatureStatus, IonAnnotation};
pub use feature_table::FeatureTable;
pub use history::{ProcessingHistory, ProcessingStep};
pub use row::FeatureTableRow;
