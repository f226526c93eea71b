//! Column names and cell values of a feature table.
//!
//! Row-level columns come first, followed by one group of
//! [`SampleColumn`]s per sample.

use serde::Serialize;

/// Row identifier
pub const ID: &str = "id";
/// Aggregate m/z of the row
pub const MZ: &str = "mz";
/// Aggregate retention time of the row (minutes)
pub const RT: &str = "rt";
/// Charge state
pub const CHARGE: &str = "charge";
/// Semicolon-separated ion annotation names
pub const ION_ANNOTATIONS: &str = "ion_annotations";

/// Integrated peak area
pub const AREA: &str = "area";
/// Peak height
pub const HEIGHT: &str = "height";
/// Peak duration (minutes)
pub const DURATION: &str = "duration";
/// Full width at half maximum (minutes)
pub const FWHM: &str = "fwhm";
/// USP tailing factor
pub const TAILING_FACTOR: &str = "tailing_factor";
/// Asymmetry factor
pub const ASYMMETRY_FACTOR: &str = "asymmetry_factor";
/// Number of chromatogram points
pub const DATA_POINTS: &str = "data_points";
/// Feature status
pub const STATUS: &str = "status";

/// Per-sample feature columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SampleColumn {
    /// Integrated peak area
    Area,
    /// Peak height
    Height,
    /// Peak duration
    Duration,
    /// Full width at half maximum
    Fwhm,
    /// USP tailing factor
    TailingFactor,
    /// Asymmetry factor
    AsymmetryFactor,
    /// Number of data points
    DataPoints,
    /// Detected or estimated
    Status,
}

impl SampleColumn {
    /// All per-sample columns in export order
    pub const ALL: [SampleColumn; 8] = [
        SampleColumn::Area,
        SampleColumn::Height,
        SampleColumn::Duration,
        SampleColumn::Fwhm,
        SampleColumn::TailingFactor,
        SampleColumn::AsymmetryFactor,
        SampleColumn::DataPoints,
        SampleColumn::Status,
    ];

    /// Column name suffix
    pub fn name(&self) -> &'static str {
        match self {
            SampleColumn::Area => AREA,
            SampleColumn::Height => HEIGHT,
            SampleColumn::Duration => DURATION,
            SampleColumn::Fwhm => FWHM,
            SampleColumn::TailingFactor => TAILING_FACTOR,
            SampleColumn::AsymmetryFactor => ASYMMETRY_FACTOR,
            SampleColumn::DataPoints => DATA_POINTS,
            SampleColumn::Status => STATUS,
        }
    }
}

/// A named column of a feature table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Column {
    /// Row identifier
    Id,
    /// Aggregate m/z
    Mz,
    /// Aggregate retention time
    Rt,
    /// Charge state
    Charge,
    /// Ion annotations
    IonAnnotations,
    /// A feature statistic of one sample
    Sample {
        /// Sample name
        sample: String,
        /// Which statistic
        kind: SampleColumn,
    },
}

impl Column {
    /// Column header, `<sample>:<statistic>` for per-sample columns
    pub fn name(&self) -> String {
        match self {
            Column::Id => ID.to_string(),
            Column::Mz => MZ.to_string(),
            Column::Rt => RT.to_string(),
            Column::Charge => CHARGE.to_string(),
            Column::IonAnnotations => ION_ANNOTATIONS.to_string(),
            Column::Sample { sample, kind } => format!("{}:{}", sample, kind.name()),
        }
    }
}

/// Value of one table cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Integer value
    Integer(i64),
    /// Floating-point value
    Float(f64),
    /// Text value
    Text(String),
}
