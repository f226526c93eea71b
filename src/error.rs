//! Error types shared by the processing components.
//!
//! Configuration problems are rejected when parameters are constructed or
//! validated. Data inconsistencies abort only the offending scan or table.
//! Finding nothing during extraction is not an error, and neither is
//! cancellation (see [`crate::task::TaskOutcome`]).

/// Errors raised by the feature-detection components
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProcessingError {
    /// A parameter is out of its accepted domain
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A tolerance was given a negative or non-finite width
    #[error("Invalid tolerance: {what} must be a finite value >= 0, got {value}")]
    NegativeTolerance {
        /// Which tolerance parameter was rejected
        what: &'static str,
        /// The rejected value
        value: f64,
    },

    /// A feature table was created without samples
    #[error("Feature table '{0}' has no samples")]
    EmptySampleList(String),

    /// A row holds a feature for a sample its table does not list
    #[error("Row {row_id} references sample '{sample}' which is not part of table '{table}'")]
    UnknownSample {
        /// Table name
        table: String,
        /// Offending row id
        row_id: u32,
        /// Sample name
        sample: String,
    },

    /// The same sample appears more than once
    #[error("Sample '{0}' appears more than once")]
    DuplicateSample(String),

    /// Parallel point arrays differ in length
    #[error("Array length mismatch: m/z array has {mz_len} elements, intensity array has {intensity_len} elements")]
    ArrayLengthMismatch {
        /// Length of the m/z array
        mz_len: usize,
        /// Length of the intensity array
        intensity_len: usize,
    },

    /// A chromatogram's retention-time array differs in length from its intensities
    #[error("Array length mismatch: retention time array has {rt_len} elements, intensity array has {intensity_len} elements")]
    RtLengthMismatch {
        /// Length of the retention-time array
        rt_len: usize,
        /// Length of the intensity array
        intensity_len: usize,
    },

    /// Scan points are not ascending by m/z
    #[error("Scan {scan_number}: m/z values are not in ascending order at index {index}")]
    UnsortedMz {
        /// Scan number of the offending scan
        scan_number: i64,
        /// First index that breaks the ordering
        index: usize,
    },

    /// A point-store handle was read after it was freed, or never issued
    #[error("Unknown point store handle {0}")]
    UnknownHandle(u64),
}
