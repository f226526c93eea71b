use super::*;
use crate::error::ProcessingError;
use crate::scan::{RawDataFile, Scan, ScanBuilder};
use crate::table::{Feature, FeatureStatus};
use crate::task::TaskProgress;
use crate::tolerance::ClosedRange;

fn trace(intensity: &[f32]) -> Chromatogram {
    let rt = (0..intensity.len()).map(|i| i as f32 * 0.1).collect();
    let mz = vec![250.0; intensity.len()];
    Chromatogram::from_arrays(rt, mz, intensity.to_vec()).unwrap()
}

fn everything() -> ClosedRange {
    ClosedRange::new(f64::MIN, f64::MAX)
}

fn gaussian(height: f64, center: f64, sigma: f64, x: f64) -> f32 {
    let z = (x - center) / sigma;
    (height * (-z * z / 2.0).exp()) as f32
}

#[test]
fn test_from_arrays_rejects_mismatched_lengths() {
    let err = Chromatogram::from_arrays(vec![1.0], vec![100.0, 101.0], vec![1.0, 2.0]).unwrap_err();
    assert!(matches!(err, ProcessingError::RtLengthMismatch { rt_len: 1, .. }));
    let err = Chromatogram::from_arrays(vec![1.0], vec![100.0], vec![1.0, 2.0]).unwrap_err();
    assert!(matches!(err, ProcessingError::ArrayLengthMismatch { .. }));
}

#[test]
fn test_crop_plateau_continues_on_equal_neighbors() {
    let cropped = trace(&[10.0, 5.0, 5.0, 20.0, 5.0, 8.0, 0.0])
        .crop(&everything(), 0.0, 0.0)
        .unwrap();
    assert_eq!(cropped.intensity(), &[5.0, 5.0, 20.0, 5.0]);
    let stats = cropped.statistics().unwrap();
    assert_eq!(stats.apex_index, 2);
    assert_eq!(stats.data_points, 4);
}

#[test]
fn test_crop_tolerates_small_rises() {
    let intensity = [0.0, 11.5, 10.0, 20.0, 10.0, 11.0, 0.0];
    let strict = trace(&intensity).crop(&everything(), 0.0, 0.0).unwrap();
    assert_eq!(strict.intensity(), &[10.0, 20.0, 10.0]);

    let relaxed = trace(&intensity).crop(&everything(), 0.2, 0.0).unwrap();
    assert_eq!(relaxed.len(), intensity.len());
    let stats = relaxed.statistics().unwrap();
    assert_eq!(relaxed.intensity()[stats.apex_index], 20.0);
}

#[test]
fn test_crop_stops_after_zero() {
    let cropped = trace(&[7.0, 0.0, 4.0, 9.0, 3.0])
        .crop(&everything(), 10.0, 0.0)
        .unwrap();
    assert_eq!(cropped.intensity(), &[0.0, 4.0, 9.0, 3.0]);
}

#[test]
fn test_crop_uses_apex_inside_rt_range() {
    let chrom = trace(&[0.0, 50.0, 100.0, 50.0, 0.0, 10.0, 30.0, 10.0, 0.0]);
    // rt 0.5..0.8 covers only the second, smaller peak
    let cropped = chrom.crop(&ClosedRange::new(0.45, 0.85), 0.0, 0.0).unwrap();
    assert_eq!(cropped.intensity(), &[0.0, 10.0, 30.0, 10.0, 0.0]);
    assert_eq!(cropped.statistics().unwrap().height, 30.0);
}

#[test]
fn test_crop_does_not_climb_past_apex_outside_rt_range() {
    let chrom = Chromatogram::from_arrays(
        vec![1.0, 1.1, 1.2, 1.3, 1.4],
        vec![250.0; 5],
        vec![100.0, 110.0, 120.0, 130.0, 0.0],
    )
    .unwrap();
    let window = ClosedRange::new(0.95, 1.05);
    let cropped = chrom.crop(&window, 0.2, 0.0).unwrap();
    assert_eq!(cropped.intensity(), &[100.0]);

    let feature = Feature::from_chromatogram("s", FeatureStatus::Estimated, cropped).unwrap();
    assert!(window.contains(feature.rt as f64));
    assert_eq!(feature.height(), 100.0);
}

#[test]
fn test_crop_keeps_window_apex_on_equal_height_outside() {
    // the walk may pass an equally high point outside the window
    let chrom = trace(&[0.0, 50.0, 50.0, 40.0, 50.0, 0.0]);
    let cropped = chrom.crop(&ClosedRange::new(0.35, 0.45), 0.3, 0.0).unwrap();
    assert_eq!(cropped.intensity(), &[0.0, 50.0, 50.0, 40.0, 50.0, 0.0]);
    let stats = cropped.statistics().unwrap();
    assert_eq!(stats.apex_index, 4);
    assert!((cropped.rt()[stats.apex_index] - 0.4).abs() < 1e-6);
}

#[test]
fn test_crop_discards_when_nothing_above_noise() {
    let chrom = trace(&[1.0, 3.0, 2.0]);
    assert!(chrom.clone().crop(&everything(), 0.0, 3.0).is_none());
    assert!(chrom.crop(&ClosedRange::new(5.0, 6.0), 0.0, 0.0).is_none());
}

#[test]
fn test_symmetric_gaussian_shape_factors() {
    let intensity: Vec<f32> = (0..=100)
        .map(|i| gaussian(10_000.0, 50.0, 8.0, i as f64))
        .collect();
    let cropped = trace(&intensity).crop(&everything(), 0.0, 0.0).unwrap();
    let stats = cropped.statistics().unwrap();

    assert_eq!(stats.apex_index, 50);
    assert!((stats.tailing_factor.unwrap() - 1.0).abs() < 1e-3);
    assert!((stats.asymmetry_factor.unwrap() - 1.0).abs() < 1e-3);
    // 2.3548 sigma, sigma = 0.8 minutes
    assert!((stats.fwhm.unwrap() - 2.3548 * 0.8).abs() < 0.02);
}

fn ion_trace_source() -> RawDataFile {
    let scans: Vec<Scan> = (0..30)
        .map(|i| {
            let rt = 1.0 + 0.01 * i as f32;
            let jitter = if i % 2 == 0 { 0.0005 } else { -0.0005 };
            let mut builder = ScanBuilder::new(i as i64 + 1)
                .retention_time(rt)
                .add_point(300.0 + jitter, gaussian(10_000.0, 15.0, 4.0, i as f64))
                .add_point(300.5 - jitter, gaussian(4_000.0, 12.0, 3.0, i as f64))
                .add_point(500.0, 100.0);
            if !(10..20).contains(&i) {
                builder = builder.add_point(400.0, 5_000.0);
            }
            builder.build()
        })
        .chain(std::iter::once(
            // MS2 scans are ignored
            ScanBuilder::new(100)
                .retention_time(1.05)
                .ms_level(2)
                .add_point(300.0, 1e6)
                .build(),
        ))
        .collect();
    RawDataFile::new("sample_a", scans)
}

#[test]
fn test_build_traces_ions_and_splits_on_gaps() {
    let builder = ChromatogramBuilder::new(ChromatogramConfig::default()).unwrap();
    let progress = TaskProgress::new();
    let chromatograms = builder
        .build(&ion_trace_source(), &progress)
        .finished()
        .unwrap();

    // 300.0, 300.5 and two halves of 400.0; 500.0 is too low
    assert_eq!(chromatograms.len(), 4);
    let means: Vec<f64> = chromatograms.iter().map(|c| c.mean_mz().unwrap()).collect();
    assert!((means[0] - 300.0).abs() < 1e-3);
    assert!((means[1] - 300.5).abs() < 1e-3);
    assert!((means[2] - 400.0).abs() < 1e-9);
    assert!((means[3] - 400.0).abs() < 1e-9);
    assert_eq!(chromatograms[0].len(), 30);
    assert_eq!(chromatograms[0].height(), 10_000.0);
    assert_eq!(chromatograms[2].len() + chromatograms[3].len(), 20);
    assert_eq!(progress.fraction(), Some(1.0));
}

#[test]
fn test_build_rejects_invalid_config() {
    let config = ChromatogramConfig {
        max_gap: -1.0,
        ..Default::default()
    };
    assert!(ChromatogramBuilder::new(config).is_err());
}

#[test]
fn test_build_observes_cancellation() {
    let builder = ChromatogramBuilder::new(ChromatogramConfig::default()).unwrap();
    let progress = TaskProgress::new();
    progress.cancel();
    assert!(builder.build(&ion_trace_source(), &progress).is_canceled());
    let outcome = builder
        .build_feature_table(&ion_trace_source(), &progress)
        .unwrap();
    assert!(outcome.is_canceled());
}

#[test]
fn test_build_feature_table() {
    let builder = ChromatogramBuilder::new(ChromatogramConfig::default()).unwrap();
    let table = builder
        .build_feature_table(&ion_trace_source(), &TaskProgress::new())
        .unwrap()
        .finished()
        .unwrap();

    assert_eq!(table.name(), "sample_a");
    assert_eq!(table.samples(), &["sample_a".to_string()]);
    assert_eq!(table.len(), 4);
    assert_eq!(table.empty_cell_count(), 0);
    assert_eq!(table.history().len(), 1);
    assert!(table.validate().is_ok());

    let first = &table.rows()[0];
    assert_eq!(first.id(), 1);
    let feature = first.feature("sample_a").unwrap();
    assert_eq!(feature.status, crate::table::FeatureStatus::Detected);
    assert_eq!(feature.height(), 10_000.0);
    assert!((feature.rt - 1.15).abs() < 1e-4);
    assert_eq!(first.mz(), Some(feature.mz));
}

#[test]
fn test_targeted_extraction_fills_missing_scans_with_zeros() {
    let scans = vec![
        ScanBuilder::new(1).retention_time(0.9).add_point(300.0, 50.0).build(),
        ScanBuilder::new(2).retention_time(1.0).add_point(300.001, 80.0).build(),
        ScanBuilder::new(3).retention_time(1.1).add_point(310.0, 90.0).build(),
        ScanBuilder::new(4).retention_time(1.2).add_point(299.999, 5.0).build(),
        ScanBuilder::new(5).retention_time(1.3).add_point(300.0, 40.0).build(),
    ];
    let raw = RawDataFile::new("s", scans);
    let request = TargetedRequest {
        mz_range: ClosedRange::new(299.99, 300.01),
        rt_range: ClosedRange::new(0.95, 1.25),
        expected_mz: 300.0,
        ms_level: 1,
        noise_level: 10.0,
    };

    let chrom = extract_targeted(&raw, &request);
    assert_eq!(chrom.rt(), &[1.0, 1.1, 1.2]);
    assert_eq!(chrom.mz(), &[300.001, 300.0, 300.0]);
    assert_eq!(chrom.intensity(), &[80.0, 0.0, 0.0]);
    assert!(chrom.statistics().is_none());
}

#[test]
fn test_targeted_outcome_for_empty_window() {
    let raw = RawDataFile::new("s", Vec::new());
    let request = TargetedRequest {
        mz_range: ClosedRange::new(1.0, 2.0),
        rt_range: ClosedRange::new(1.0, 2.0),
        expected_mz: 1.5,
        ms_level: 1,
        noise_level: 0.0,
    };
    let chrom = extract_targeted(&raw, &request);
    assert!(chrom.is_empty());
    assert!(chrom.crop(&request.rt_range, 0.2, 0.0).is_none());
}
