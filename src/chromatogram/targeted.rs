use crate::scan::RawScanSource;
use crate::tolerance::ClosedRange;

use super::Chromatogram;

/// Where to look for an ion whose position is already known
#[derive(Debug, Clone, PartialEq)]
pub struct TargetedRequest {
    /// Accepted m/z values
    pub mz_range: ClosedRange,
    /// Accepted retention times (minutes)
    pub rt_range: ClosedRange,
    /// m/z recorded for scans without a matching point
    pub expected_mz: f64,
    /// MS level of the scans to search
    pub ms_level: u8,
    /// Points at or below this intensity count as missing
    pub noise_level: f32,
}

/// Extract the chromatogram of one ion over a retention-time window.
///
/// Every scan in the window contributes exactly one point: its most intense
/// point inside the m/z range if that point is above the noise level, or a
/// zero-intensity placeholder at the expected m/z. The result is not cropped.
pub fn extract_targeted<S: RawScanSource + ?Sized>(
    source: &S,
    request: &TargetedRequest,
) -> Chromatogram {
    let mut scans = source.scans_in_rt_range(&request.rt_range, request.ms_level);
    scans.sort_by(|a, b| {
        let a = a.retention_time.unwrap_or_default();
        let b = b.retention_time.unwrap_or_default();
        a.total_cmp(&b)
    });

    let mut chromatogram = Chromatogram::with_capacity(scans.len());
    for scan in scans {
        let rt = scan.retention_time.unwrap_or_default();
        match scan.most_intense_in(&request.mz_range) {
            Some((mz, intensity)) if intensity > request.noise_level => {
                chromatogram.push(rt, mz, intensity)
            }
            _ => chromatogram.push(rt, request.expected_mz, 0.0),
        }
    }
    chromatogram
}
