use log::trace;

use crate::error::ProcessingError;
use crate::point_store::{PointStore, StoreHandle};
use crate::scan::{check_point_arrays, Scan};

use super::WaveletConfig;

/// Effective support of the Mexican-Hat wavelet, left end
const WAVELET_ESL: i64 = -5;
/// Effective support of the Mexican-Hat wavelet, right end
const WAVELET_ESR: i64 = 5;
/// Number of samples in the precomputed kernel table
const NPOINTS: i64 = 60_000;
/// 2 / (sqrt(3) * pi^(1/4))
const MEXICAN_HAT_NORM: f64 = 0.867_325_070_584_077_6;

/// Mexican-Hat wavelet evaluated at `x / window`
fn mexican_hat(x: f64, window: f64) -> f64 {
    let x = x / window;
    let x2 = x * x;
    MEXICAN_HAT_NORM * (1.0 - x2) * (-x2 / 2.0).exp()
}

/// Centroider locating profile peak apexes with a continuous wavelet transform.
///
/// The kernel table is computed once per instance, so one centroider should be
/// reused for every scan of a run.
#[derive(Debug, Clone)]
pub struct WaveletCentroider {
    config: WaveletConfig,
    kernel: Vec<f64>,
}

impl WaveletCentroider {
    /// Create a centroider, precomputing the wavelet kernel
    pub fn new(config: WaveletConfig) -> Result<Self, ProcessingError> {
        config.validate()?;
        let step = (WAVELET_ESR - WAVELET_ESL) as f64 / NPOINTS as f64;
        let kernel = (0..NPOINTS)
            .map(|j| mexican_hat(WAVELET_ESL as f64 + j as f64 * step, config.wavelet_window))
            .collect();
        Ok(Self { config, kernel })
    }

    /// Active configuration
    pub fn config(&self) -> &WaveletConfig {
        &self.config
    }

    /// Wavelet coefficients of `intensity`, one per input point.
    ///
    /// Negative coefficients are clamped to zero so only the positive lobe of
    /// the wavelet contributes to peak location.
    pub fn transform(&self, intensity: &[f32]) -> Vec<f64> {
        let n = intensity.len() as i64;
        let scale = self.config.scale_level as i64;
        let spacing = NPOINTS / (WAVELET_ESR - WAVELET_ESL);
        let center = NPOINTS / 2;
        let norm = (scale as f64).sqrt();

        let mut coefficients = Vec::with_capacity(intensity.len());
        for dx in 0..n {
            let t1 = (scale * WAVELET_ESL + dx).max(0);
            let t2 = (scale * WAVELET_ESR + dx).min(n - 1);
            let mut acc = 0.0;
            for t in t1..=t2 {
                let index = (center + spacing * (t - dx) / scale).clamp(0, NPOINTS - 1);
                acc += intensity[t as usize] as f64 * self.kernel[index as usize];
            }
            coefficients.push((acc / norm).max(0.0));
        }
        coefficients
    }

    /// Centroid parallel profile arrays.
    ///
    /// Every reported point is an original input point; the transform only
    /// decides which indices are apexes.
    pub fn centroid(
        &self,
        mz: &[f64],
        intensity: &[f32],
    ) -> Result<(Vec<f64>, Vec<f32>), ProcessingError> {
        check_point_arrays(mz, intensity)?;
        if mz.is_empty() {
            return Ok((Vec::new(), Vec::new()));
        }

        let coefficients = self.transform(intensity);
        let (out_mz, out_intensity) = apex_indices(&coefficients)
            .into_iter()
            .filter(|&i| intensity[i] > self.config.noise_level)
            .map(|i| (mz[i], intensity[i]))
            .unzip();
        Ok((out_mz, out_intensity))
    }

    /// Centroid a profile scan, keeping its metadata
    pub fn centroid_scan(&self, scan: &Scan) -> Scan {
        // A scan's arrays always have equal lengths, so centroiding cannot fail
        let (mz, intensity) = self
            .centroid(scan.mz(), scan.intensity())
            .unwrap_or_default();
        trace!(
            "Scan {}: {} profile points -> {} centroids",
            scan.scan_number,
            scan.len(),
            mz.len()
        );
        scan.with_points(mz, intensity)
    }

    /// Centroid a profile scan and park the result in a point store
    pub fn centroid_into_store<S: PointStore + ?Sized>(
        &self,
        scan: &Scan,
        store: &mut S,
    ) -> Result<StoreHandle, ProcessingError> {
        let (mz, intensity) = self.centroid(scan.mz(), scan.intensity())?;
        store.store(&mz, &intensity)
    }
}

/// Index of the largest coefficient in every maximal run of positive coefficients
fn apex_indices(coefficients: &[f64]) -> Vec<usize> {
    let mut apexes = Vec::new();
    let mut run_max: Option<usize> = None;
    for (i, &c) in coefficients.iter().enumerate() {
        if c > 0.0 {
            match run_max {
                Some(m) if coefficients[m] >= c => {}
                _ => run_max = Some(i),
            }
        } else if let Some(m) = run_max.take() {
            apexes.push(m);
        }
    }
    if let Some(m) = run_max {
        apexes.push(m);
    }
    apexes
}
