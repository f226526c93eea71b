//! # mzfeature - LC-MS Feature Detection and Alignment
//!
//! `mzfeature` turns raw liquid-chromatography mass-spectrometry scans into
//! feature tables and aligns those tables across samples.
//!
//! ## Pipeline
//!
//! 1. **Centroiding** ([`centroid`]): a Mexican-hat continuous wavelet
//!    transform locates the apexes of profile peaks.
//! 2. **Chromatogram building** ([`chromatogram`]): ions are followed from
//!    scan to scan, each trace is cropped to a single peak and its shape
//!    statistics (area, height, FWHM, tailing and asymmetry factors) derived.
//! 3. **Alignment** ([`alignment`]): per-sample feature tables are joined by
//!    greedy best-score matching inside m/z and retention-time windows.
//! 4. **Gap filling** ([`gapfill`]): cells left empty by alignment are
//!    searched for again in the raw data of their sample.
//!
//! Raw-file decoding and result export are left to other crates: scans come
//! in through [`scan::RawScanSource`], results go out as
//! [`table::FeatureTable`].
//!
//! ## Quick Start
//!
//! ```rust
//! use mzfeature::prelude::*;
//!
//! let scans: Vec<Scan> = (0..20)
//!     .map(|i| {
//!         ScanBuilder::new(i)
//!             .retention_time(10.0 + 0.01 * i as f32)
//!             .add_point(445.12, 5_000.0 + 100.0 * i as f32)
//!             .build()
//!     })
//!     .collect();
//! let raw = RawDataFile::new("sample_1", scans);
//!
//! let progress = TaskProgress::new();
//! let builder = ChromatogramBuilder::new(ChromatogramConfig::default())?;
//! let table = builder
//!     .build_feature_table(&raw, &progress)?
//!     .finished()
//!     .expect("not canceled");
//!
//! let engine = AlignmentEngine::new(AlignmentConfig::default())?;
//! let aligned = engine
//!     .align("aligned", &[table], &progress)?
//!     .finished()
//!     .expect("not canceled");
//! assert_eq!(aligned.table.len(), 1);
//! # Ok::<(), mzfeature::error::ProcessingError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`tolerance`]: m/z and retention-time tolerance windows
//! - [`scan`]: scan model and the raw-data source contract
//! - [`point_store`]: handle-based storage contract for point arrays
//! - [`centroid`]: wavelet centroiding
//! - [`chromatogram`]: chromatogram building, targeted extraction, cropping
//! - [`table`]: feature tables, rows, columns and processing history
//! - [`alignment`]: cross-sample alignment
//! - [`gapfill`]: gap filling
//! - [`task`]: cancellation and progress
//! - [`config`]: TOML configuration
//!
//! Retention times are in minutes throughout.

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![allow(clippy::too_many_arguments)]

pub mod alignment;
pub mod centroid;
pub mod chromatogram;
pub mod config;
pub mod error;
pub mod gapfill;
pub mod point_store;
pub mod scan;
pub mod table;
pub mod task;
pub mod tolerance;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::alignment::{AlignmentConfig, AlignmentEngine, AlignmentResult};
    pub use crate::centroid::{WaveletCentroider, WaveletConfig};
    pub use crate::chromatogram::{
        extract_targeted, Chromatogram, ChromatogramBuilder, ChromatogramConfig, PeakStatistics,
        TargetedRequest,
    };
    pub use crate::config::{ConfigError, PipelineConfig};
    pub use crate::error::ProcessingError;
    pub use crate::gapfill::{GapFillConfig, GapFillResult, GapFiller};
    pub use crate::point_store::{MemoryPointStore, PointStore, StoreHandle};
    pub use crate::scan::{Polarity, RawDataFile, RawScanSource, Scan, ScanBuilder};
    pub use crate::table::{
        CellValue, Column, Feature, FeatureStatus, FeatureTable, FeatureTableRow, IonAnnotation,
        SampleColumn,
    };
    pub use crate::task::{ItemFailure, TaskOutcome, TaskProgress};
    pub use crate::tolerance::{ClosedRange, ToleranceSpec};
}
