//! Pairing scores between a source row and an aligned row.

use crate::table::FeatureTableRow;
use crate::tolerance::ToleranceSpec;

use super::AlignmentConfig;

/// Distance used for a dimension in which either row has no value
pub const MISSING_DISTANCE: f64 = 999.0;

/// Weighted closeness of `value` to `reference` inside the tolerance window
/// of `reference`.
///
/// The term is `weight` at zero distance and falls linearly to zero at the
/// window boundary. A missing value on either side scores as if it were
/// [`MISSING_DISTANCE`] away, which can make the term negative.
pub fn dimension_score(
    reference: Option<f64>,
    value: Option<f64>,
    tolerance: &ToleranceSpec,
    weight: f64,
) -> f64 {
    let half_width = match (reference, value) {
        (Some(center), _) | (None, Some(center)) => tolerance.range(center).half_width(),
        (None, None) => 0.0,
    };
    let distance = match (reference, value) {
        (Some(a), Some(b)) => (a - b).abs(),
        _ => MISSING_DISTANCE,
    };

    if half_width > 0.0 {
        (1.0 - distance / half_width) * weight
    } else if distance == 0.0 {
        weight
    } else {
        0.0
    }
}

/// Score of joining `row` into the aligned row `candidate`
pub fn score(row: &FeatureTableRow, candidate: &FeatureTableRow, config: &AlignmentConfig) -> f64 {
    let mz = dimension_score(row.mz(), candidate.mz(), &config.mz_tolerance, config.mz_weight);
    let rt = dimension_score(
        row.rt().map(f64::from),
        candidate.rt().map(f64::from),
        &config.rt_tolerance,
        config.rt_weight,
    );
    mz + rt
}

/// Whether the charge and annotation rules allow joining the two rows.
///
/// Rows whose charges are both known and differ are never joined.
pub fn is_compatible(row: &FeatureTableRow, candidate: &FeatureTableRow, config: &AlignmentConfig) -> bool {
    if let (Some(a), Some(b)) = (row.charge, candidate.charge) {
        if a != b {
            return false;
        }
    }
    if config.require_same_annotation {
        if let (Some(a), Some(b)) = (row.preferred_annotation(), candidate.preferred_annotation()) {
            if a.name != b.name {
                return false;
            }
        }
    }
    true
}
