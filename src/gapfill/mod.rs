//! Gap filling.
//!
//! After alignment many rows lack a feature in some samples. [`GapFiller`]
//! goes back to those samples' scans and runs a targeted extraction around
//! the row's m/z and retention time.

mod config;
mod filler;


pub use config::GapFillConfig;
pub use filler::{GapFillResult, GapFiller};
