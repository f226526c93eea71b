//! TOML configuration for the feature-detection pipeline.
//!
//! Every section is optional and falls back to its defaults:
//!
//! ```toml
//! # mzfeature.toml
//! [centroiding]
//! scale_level = 3
//!
//! [chromatogram]
//! min_height = 5000.0
//! max_gap = 0.2
//!
//! [alignment]
//! rt_weight = 2.0
//! rt_tolerance = { rt = { delta = 0.2, is_percentage = false } }
//!
//! [alignment.mz_tolerance]
//! maximum_of = [{ constant_da = { delta = 0.003 } }, { constant_ppm = { ppm = 5.0 } }]
//!
//! [gap_filling]
//! use_row_rt = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::alignment::AlignmentConfig;
use crate::centroid::WaveletConfig;
use crate::chromatogram::ChromatogramConfig;
use crate::error::ProcessingError;
use crate::gapfill::GapFillConfig;

/// Errors raised while loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the schema
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is outside its accepted domain
    #[error(transparent)]
    Invalid(#[from] ProcessingError),
}

/// Root configuration structure for mzfeature.toml files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Wavelet centroiding
    #[serde(default)]
    pub centroiding: WaveletConfig,

    /// Chromatogram building and cropping
    #[serde(default)]
    pub chromatogram: ChromatogramConfig,

    /// Cross-sample alignment
    #[serde(default)]
    pub alignment: AlignmentConfig,

    /// Gap filling
    #[serde(default)]
    pub gap_filling: GapFillConfig,
}

impl PipelineConfig {
    /// Load and validate configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_str(&content)
    }

    /// Parse and validate configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ProcessingError> {
        self.centroiding.validate()?;
        self.chromatogram.validate()?;
        self.alignment.validate()?;
        self.gap_filling.validate()
    }
}
