use super::*;
use crate::error::ProcessingError;
use crate::tolerance::ClosedRange;

fn samples(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_new_table_rejects_empty_and_duplicate_samples() {
    assert!(matches!(
        FeatureTable::new("t", Vec::new()),
        Err(ProcessingError::EmptySampleList(_))
    ));
    assert!(matches!(
        FeatureTable::new("t", samples(&["a", "b", "a"])),
        Err(ProcessingError::DuplicateSample(s)) if s == "a"
    ));
}

#[test]
fn test_push_row_rejects_unknown_sample() {
    let mut table = FeatureTable::new("t", samples(&["a"])).unwrap();
    let row = FeatureTableRow::with_feature(1, Feature::from_apex("b", 100.0, 1.0, 10.0));
    let err = table.push_row(row).unwrap_err();
    assert!(matches!(err, ProcessingError::UnknownSample { row_id: 1, .. }));
    assert!(table.is_empty());

    let row = FeatureTableRow::with_feature(1, Feature::from_apex("a", 100.0, 1.0, 10.0));
    table.push_row(row).unwrap();
    assert_eq!(table.len(), 1);
    assert!(table.validate().is_ok());
}

#[test]
fn test_insert_feature_never_overwrites() {
    let mut row = FeatureTableRow::new(1);
    assert!(row.insert_feature(Feature::from_apex("a", 100.0, 1.0, 10.0)));
    assert!(!row.insert_feature(Feature::from_apex("a", 200.0, 2.0, 20.0)));
    assert_eq!(row.feature("a").unwrap().mz, 100.0);
}

#[test]
fn test_aggregates_are_means_over_present_features() {
    let mut row = FeatureTableRow::new(1);
    assert_eq!(row.mz(), None);
    row.insert_feature(Feature::from_apex("a", 100.0, 1.0, 10.0));
    row.insert_feature(Feature::from_apex("b", 100.2, 3.0, 30.0));
    row.recompute_aggregates();
    assert!((row.mz().unwrap() - 100.1).abs() < 1e-9);
    assert!((row.rt().unwrap() - 2.0).abs() < 1e-6);
    assert_eq!(row.average_height(), Some(20.0));

    let mz_range = row.observed_mz_range().unwrap();
    assert_eq!(mz_range.lower, 100.0);
    assert_eq!(mz_range.upper, 100.2);
}

#[test]
fn test_annotations_are_unioned_by_value() {
    let mut row = FeatureTableRow::new(1);
    row.add_annotation(IonAnnotation::named("caffeine").with_adduct("[M+H]+"));
    row.add_annotation(IonAnnotation::named("caffeine").with_adduct("[M+H]+"));
    row.add_annotation(IonAnnotation::named("caffeine").with_adduct("[M+Na]+"));
    assert_eq!(row.annotations().len(), 2);
    assert_eq!(row.preferred_annotation().unwrap().adduct.as_deref(), Some("[M+H]+"));
}

#[test]
fn test_columns_and_values() {
    let mut table = FeatureTable::new("t", samples(&["a", "b"])).unwrap();
    let mut row = FeatureTableRow::with_feature(7, Feature::from_apex("a", 150.0, 2.5, 40.0));
    row.charge = Some(1);
    table.push_row(row).unwrap();

    let columns = table.columns();
    assert_eq!(columns.len(), 5 + 2 * SampleColumn::ALL.len());
    assert_eq!(columns[0].name(), columns::ID);
    assert_eq!(columns[5].name(), "a:area");

    let row = &table.rows()[0];
    assert_eq!(row.value(&Column::Id), Some(CellValue::Integer(7)));
    assert_eq!(row.value(&Column::Charge), Some(CellValue::Integer(1)));
    assert_eq!(row.value(&Column::IonAnnotations), None);
    let height = Column::Sample {
        sample: "a".to_string(),
        kind: SampleColumn::Height,
    };
    assert_eq!(row.value(&height), Some(CellValue::Float(40.0)));
    let status = Column::Sample {
        sample: "a".to_string(),
        kind: SampleColumn::Status,
    };
    assert_eq!(row.value(&status), Some(CellValue::Text("DETECTED".to_string())));
    let missing = Column::Sample {
        sample: "b".to_string(),
        kind: SampleColumn::Area,
    };
    assert_eq!(row.value(&missing), None);
    assert_eq!(table.empty_cell_count(), 1);
}

#[test]
fn test_rows_in_range() {
    let mut table = FeatureTable::new("t", samples(&["a"])).unwrap();
    table
        .push_row(FeatureTableRow::with_feature(1, Feature::from_apex("a", 100.0, 1.0, 1.0)))
        .unwrap();
    table
        .push_row(FeatureTableRow::with_feature(2, Feature::from_apex("a", 200.0, 1.0, 1.0)))
        .unwrap();
    table.push_row(FeatureTableRow::new(3)).unwrap();

    let hits = table.rows_in_range(&ClosedRange::new(150.0, 250.0), &ClosedRange::new(0.0, 2.0));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id(), 2);
}

#[test]
fn test_history_records_parameters() {
    let mut history = ProcessingHistory::new();
    history.record("join aligner", &serde_json::json!({"mz_weight": 3.0}));
    let mut other = ProcessingHistory::new();
    other.add_step("chromatogram builder", serde_json::Value::Null);
    history.extend_from(&other);

    assert_eq!(history.len(), 2);
    assert_eq!(history.steps[0].parameters["mz_weight"], 3.0);
    assert_eq!(history.steps[1].order, 2);
    assert!(chrono::DateTime::parse_from_rfc3339(&history.steps[1].timestamp).is_ok());

    let json = serde_json::to_value(&history).unwrap();
    assert!(json["steps"][0].get("timestamp").is_none());
    assert_eq!(json["steps"][0]["method"], "join aligner");
}

#[test]
fn test_display_summary() {
    let table = FeatureTable::new("aligned", samples(&["a", "b"])).unwrap();
    let text = table.to_string();
    assert!(text.contains("aligned"));
    assert!(text.contains("Samples: 2"));
}
