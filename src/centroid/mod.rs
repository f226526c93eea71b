//! # Wavelet Centroiding
//!
//! Reduces profile spectra to centroided peak lists. A Mexican-Hat continuous
//! wavelet transform is evaluated at every point; each maximal run of
//! positive coefficients marks one peak, and the original point at the run's
//! largest coefficient is reported.
//!
//! ## Algorithm
//!
//! 1. Tabulate `psi(x) = c (1 - x^2) exp(-x^2 / 2)` over `[-5, 5]` once.
//! 2. For each index `dx`, sum `intensity[t] * psi((t - dx) / S)` over
//!    `t in [dx - 5S, dx + 5S]`, divide by `sqrt(S)`, clamp at zero.
//! 3. Report the apex of every positive run with its original m/z and
//!    intensity.
//!
//! Cost is `O(n * S)` per scan and the output stays ascending by m/z.
//!
//! ```rust
//! use mzfeature::centroid::{WaveletCentroider, WaveletConfig};
//!
//! let centroider = WaveletCentroider::new(WaveletConfig::narrow_peaks())?;
//! let (mz, intensity) = centroider.centroid(&[], &[])?;
//! assert!(mz.is_empty() && intensity.is_empty());
//! # Ok::<(), mzfeature::error::ProcessingError>(())
//! ```

mod config;
mod wavelet;


pub use config::WaveletConfig;
pub use wavelet::WaveletCentroider;
