//! Extracted ion chromatograms.
//!
//! [`ChromatogramBuilder`] follows ions through a run of centroided scans.
//! [`extract_targeted`] pulls the chromatogram of one known ion out of a
//! retention-time window. Either kind is cut to a single peak with
//! [`Chromatogram::crop`], which also derives its [`PeakStatistics`].

mod builder;
mod config;
mod statistics;
mod targeted;
mod trace;

#[cfg(test)]
mod tests;

pub use builder::ChromatogramBuilder;
pub use config::ChromatogramConfig;
pub use statistics::PeakStatistics;
pub use targeted::{extract_targeted, TargetedRequest};
pub use trace::Chromatogram;
