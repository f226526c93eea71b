//! Cross-sample alignment of feature tables.
//!
//! [`AlignmentEngine`] merges per-sample tables into one table whose rows
//! join the features of the same ion across samples.

mod config;
mod engine;
pub mod score;


pub use config::AlignmentConfig;
pub use engine::{AlignmentEngine, AlignmentResult};
pub use score::MISSING_DISTANCE;
