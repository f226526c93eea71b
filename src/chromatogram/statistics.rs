use serde::Serialize;

/// Peak-shape statistics of a cropped chromatogram.
///
/// Retention times are in minutes, so `area` is intensity x minutes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakStatistics {
    /// Index of the apex; the most intense point (first one on ties) unless
    /// given explicitly
    pub apex_index: usize,
    /// Maximum intensity
    pub height: f32,
    /// Trapezoidal integral of intensity over retention time
    pub area: f64,
    /// Retention time of the last point minus that of the first
    pub duration: f64,
    /// Full width at half maximum above the baseline
    pub fwhm: Option<f64>,
    /// USP tailing factor at 5 % height
    pub tailing_factor: Option<f64>,
    /// Asymmetry factor at 10 % height
    pub asymmetry_factor: Option<f64>,
    /// Number of data points
    pub data_points: usize,
}

impl PeakStatistics {
    /// Statistics of a feature that was searched for but not found
    pub fn zero() -> Self {
        Self {
            apex_index: 0,
            height: 0.0,
            area: 0.0,
            duration: 0.0,
            fwhm: None,
            tailing_factor: None,
            asymmetry_factor: None,
            data_points: 0,
        }
    }

    /// Compute statistics over parallel rt/intensity arrays; `None` if empty
    pub fn compute(rt: &[f32], intensity: &[f32]) -> Option<Self> {
        let mut apex = 0;
        for (i, &value) in intensity.iter().enumerate() {
            if value > intensity[apex] {
                apex = i;
            }
        }
        Self::compute_at(rt, intensity, apex)
    }

    /// Compute statistics around a known apex index; `None` if the arrays
    /// are empty, differ in length or `apex` is out of bounds
    pub fn compute_at(rt: &[f32], intensity: &[f32], apex: usize) -> Option<Self> {
        if rt.is_empty() || rt.len() != intensity.len() || apex >= rt.len() {
            return None;
        }
        let rt: Vec<f64> = rt.iter().map(|&v| v as f64).collect();
        let intensity: Vec<f64> = intensity.iter().map(|&v| v as f64).collect();

        let height = intensity[apex];
        let baseline = intensity.iter().copied().fold(f64::INFINITY, f64::min);

        let area = rt
            .windows(2)
            .zip(intensity.windows(2))
            .fold(0.0, |acc, (t, y)| acc + (t[1] - t[0]) * (y[0] + y[1]) / 2.0);

        let (fwhm, tailing_factor, asymmetry_factor) = if height > baseline {
            let amplitude = height - baseline;
            let width_at = |fraction: f64| {
                let level = baseline + amplitude * fraction;
                let left = left_crossing(&rt, &intensity, apex, level)?;
                let right = right_crossing(&rt, &intensity, apex, level)?;
                Some((rt[apex] - left, right - rt[apex]))
            };

            let fwhm = width_at(0.5).map(|(a, b)| a + b);
            let tailing = width_at(0.05)
                .filter(|&(a, _)| a > 0.0)
                .map(|(a, b)| (a + b) / (2.0 * a));
            let asymmetry = width_at(0.10)
                .filter(|&(a, _)| a > 0.0)
                .map(|(a, b)| b / a);
            (fwhm, tailing, asymmetry)
        } else {
            (None, None, None)
        };

        Some(Self {
            apex_index: apex,
            height: height as f32,
            area,
            duration: rt[rt.len() - 1] - rt[0],
            fwhm,
            tailing_factor,
            asymmetry_factor,
            data_points: rt.len(),
        })
    }
}

/// Interpolated rt where the signal left of `apex` rises through `level`
fn left_crossing(rt: &[f64], intensity: &[f64], apex: usize, level: f64) -> Option<f64> {
    let i = (0..apex).rev().find(|&i| intensity[i] <= level)?;
    Some(interpolate(rt[i], intensity[i], rt[i + 1], intensity[i + 1], level))
}

/// Interpolated rt where the signal right of `apex` falls through `level`
fn right_crossing(rt: &[f64], intensity: &[f64], apex: usize, level: f64) -> Option<f64> {
    let j = (apex + 1..rt.len()).find(|&j| intensity[j] <= level)?;
    Some(interpolate(rt[j - 1], intensity[j - 1], rt[j], intensity[j], level))
}

fn interpolate(x0: f64, y0: f64, x1: f64, y1: f64, level: f64) -> f64 {
    if y1 == y0 {
        return x0;
    }
    x0 + (level - y0) * (x1 - x0) / (y1 - y0)
}
