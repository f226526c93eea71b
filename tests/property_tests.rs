//! Property-based tests for tolerances, peak cropping and alignment

use mzfeature::prelude::*;
use proptest::prelude::*;

fn table_from_points(index: usize, points: &[(f64, f32, f32)]) -> FeatureTable {
    let sample = format!("sample_{index}");
    let mut table = FeatureTable::new(format!("table_{index}"), vec![sample.clone()]).unwrap();
    for (i, &(mz, rt, height)) in points.iter().enumerate() {
        let feature = Feature::from_apex(sample.as_str(), mz, rt, height);
        table
            .push_row(FeatureTableRow::with_feature(i as u32 + 1, feature))
            .unwrap();
    }
    table
}

fn align(tables: &[FeatureTable]) -> FeatureTable {
    AlignmentEngine::new(AlignmentConfig::default())
        .unwrap()
        .align("aligned", tables, &TaskProgress::new())
        .unwrap()
        .finished()
        .unwrap()
        .table
}

proptest! {
    #[test]
    fn prop_tolerance_range_contains_center(
        center in 50.0f64..2000.0,
        da in 0.0f64..0.1,
        ppm in 0.0f64..50.0,
    ) {
        let spec = ToleranceSpec::mz_da_or_ppm(da, ppm).unwrap();
        let range = spec.range(center);
        prop_assert!(range.lower <= range.upper);
        prop_assert!(spec.matches(center, center));
        prop_assert!((range.center() - center).abs() < 1e-9);
    }

    #[test]
    fn prop_maximum_of_encloses_members(
        center in 50.0f64..2000.0,
        da in 0.0f64..0.1,
        ppm in 0.0f64..50.0,
    ) {
        let da_spec = ToleranceSpec::constant_da(da).unwrap();
        let ppm_spec = ToleranceSpec::constant_ppm(ppm).unwrap();
        let combined = ToleranceSpec::maximum_of(vec![da_spec.clone(), ppm_spec.clone()]).unwrap();
        let range = combined.range(center);
        prop_assert!(range.encloses(&da_spec.range(center)));
        prop_assert!(range.encloses(&ppm_spec.range(center)));
    }

    #[test]
    fn prop_ppm_width_scales_with_center(center in 50.0f64..2000.0, ppm in 0.1f64..50.0) {
        let spec = ToleranceSpec::constant_ppm(ppm).unwrap();
        let width = spec.range(center).width();
        let doubled = spec.range(center * 2.0).width();
        prop_assert!((doubled - 2.0 * width).abs() < 1e-9);
    }

    #[test]
    fn prop_crop_keeps_apex(
        intensity in prop::collection::vec(0.0f32..1e5, 1..60),
        tolerance in 0.0f64..1.0,
    ) {
        let n = intensity.len();
        let rt: Vec<f32> = (0..n).map(|i| i as f32 * 0.01).collect();
        let mz = vec![400.0; n];
        let max = intensity.iter().copied().fold(0.0f32, f32::max);
        let trace = Chromatogram::from_arrays(rt, mz, intensity).unwrap();

        let everything = ClosedRange::new(-1.0, 1.0);
        match trace.crop(&everything, tolerance, 0.0) {
            None => prop_assert_eq!(max, 0.0),
            Some(cropped) => {
                prop_assert!(!cropped.is_empty());
                prop_assert!(cropped.len() <= n);
                let stats = cropped.statistics().unwrap();
                prop_assert!(stats.apex_index < cropped.len());
                prop_assert_eq!(stats.height, max);
                prop_assert_eq!(cropped.intensity()[stats.apex_index], max);
            }
        }
    }

    #[test]
    fn prop_crop_apex_stays_in_window(
        intensity in prop::collection::vec(0.0f32..1e5, 2..60),
        tolerance in 0.0f64..1.0,
        window_start in 0usize..60,
        window_len in 0usize..10,
    ) {
        let n = intensity.len();
        let rt: Vec<f32> = (0..n).map(|i| i as f32).collect();
        let trace = Chromatogram::from_arrays(rt, vec![400.0; n], intensity).unwrap();

        let window = ClosedRange::new(window_start as f64 - 0.5, (window_start + window_len) as f64 + 0.5);
        if let Some(cropped) = trace.crop(&window, tolerance, 0.0) {
            let stats = cropped.statistics().unwrap();
            let max = cropped.intensity().iter().copied().fold(0.0f32, f32::max);
            prop_assert!(window.contains(cropped.rt()[stats.apex_index] as f64));
            prop_assert_eq!(cropped.intensity()[stats.apex_index], max);
            prop_assert_eq!(stats.height, max);
        }
    }

    #[test]
    fn prop_alignment_row_count_bounds(
        tables in prop::collection::vec(
            prop::collection::vec((100.0f64..101.0, 1.0f32..2.0, 1.0f32..1e5), 0..12),
            1..4,
        ),
    ) {
        let tables: Vec<FeatureTable> = tables
            .iter()
            .enumerate()
            .map(|(i, points)| table_from_points(i, points))
            .collect();
        let aligned = align(&tables);

        let largest = tables.iter().map(FeatureTable::len).max().unwrap_or(0);
        let total: usize = tables.iter().map(FeatureTable::len).sum();
        prop_assert!(aligned.len() >= largest);
        prop_assert!(aligned.len() <= total);

        // every input feature lands in exactly one row
        let placed: usize = aligned.rows().iter().map(|r| r.features().len()).sum();
        prop_assert_eq!(placed, total);
        prop_assert_eq!(aligned.samples().len(), tables.len());
    }

    #[test]
    fn prop_alignment_is_deterministic(
        tables in prop::collection::vec(
            prop::collection::vec((100.0f64..100.05, 1.0f32..1.2, 1.0f32..1e5), 0..10),
            1..4,
        ),
    ) {
        let tables: Vec<FeatureTable> = tables
            .iter()
            .enumerate()
            .map(|(i, points)| table_from_points(i, points))
            .collect();
        let first = serde_json::to_string(&align(&tables)).unwrap();
        let second = serde_json::to_string(&align(&tables)).unwrap();
        prop_assert_eq!(first, second);
    }
}
