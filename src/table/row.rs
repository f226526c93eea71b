use std::collections::BTreeMap;

use serde::Serialize;

use crate::tolerance::ClosedRange;

use super::columns::{CellValue, Column, SampleColumn};
use super::{Feature, IonAnnotation};

/// One chemical feature across all samples of a table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureTableRow {
    id: u32,
    mz: Option<f64>,
    rt: Option<f32>,
    /// Charge state, if known
    pub charge: Option<u8>,
    /// Free-text comment
    pub comment: Option<String>,
    annotations: Vec<IonAnnotation>,
    features: BTreeMap<String, Feature>,
}

impl FeatureTableRow {
    /// Create an empty row
    pub fn new(id: u32) -> Self {
        Self {
            id,
            mz: None,
            rt: None,
            charge: None,
            comment: None,
            annotations: Vec::new(),
            features: BTreeMap::new(),
        }
    }

    /// Create a row holding a single feature; aggregates taken from it
    pub fn with_feature(id: u32, feature: Feature) -> Self {
        let mut row = Self::new(id);
        row.insert_feature(feature);
        row.recompute_aggregates();
        row
    }

    /// New row with this row's identity fields (charge, comment,
    /// annotations, aggregates) but no features
    pub fn copy_identity(&self, id: u32) -> Self {
        Self {
            id,
            mz: self.mz,
            rt: self.rt,
            charge: self.charge,
            comment: self.comment.clone(),
            annotations: self.annotations.clone(),
            features: BTreeMap::new(),
        }
    }

    /// Row identifier, unique within its table
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Aggregate m/z (mean over features)
    pub fn mz(&self) -> Option<f64> {
        self.mz
    }

    /// Aggregate retention time in minutes (mean over features)
    pub fn rt(&self) -> Option<f32> {
        self.rt
    }

    /// Features keyed by sample name
    pub fn features(&self) -> &BTreeMap<String, Feature> {
        &self.features
    }

    /// Feature of `sample`, if present
    pub fn feature(&self, sample: &str) -> Option<&Feature> {
        self.features.get(sample)
    }

    /// Returns true if `sample` has a feature in this row
    pub fn has_feature(&self, sample: &str) -> bool {
        self.features.contains_key(sample)
    }

    /// Insert a feature unless its sample is already present.
    ///
    /// Returns false, leaving the row untouched, if the sample already has
    /// a feature. Aggregates are not updated.
    pub fn insert_feature(&mut self, feature: Feature) -> bool {
        if self.features.contains_key(&feature.sample) {
            return false;
        }
        self.features.insert(feature.sample.clone(), feature);
        true
    }

    /// Ion annotations, preferred one first
    pub fn annotations(&self) -> &[IonAnnotation] {
        &self.annotations
    }

    /// The first annotation
    pub fn preferred_annotation(&self) -> Option<&IonAnnotation> {
        self.annotations.first()
    }

    /// Add an annotation unless an equal one is present
    pub fn add_annotation(&mut self, annotation: IonAnnotation) {
        if !self.annotations.contains(&annotation) {
            self.annotations.push(annotation);
        }
    }

    /// Set the aggregates to the mean m/z and rt of the present features.
    ///
    /// Rows without features keep no aggregate.
    pub fn recompute_aggregates(&mut self) {
        let n = self.features.len();
        if n == 0 {
            self.mz = None;
            self.rt = None;
            return;
        }
        let mz_sum: f64 = self.features.values().map(|f| f.mz).sum();
        let rt_sum: f64 = self.features.values().map(|f| f.rt as f64).sum();
        self.mz = Some(mz_sum / n as f64);
        self.rt = Some((rt_sum / n as f64) as f32);
    }

    /// Span of the features' m/z values
    pub fn observed_mz_range(&self) -> Option<ClosedRange> {
        self.features
            .values()
            .map(|f| ClosedRange::singleton(f.mz))
            .reduce(|a, b| a.span_with(&b))
    }

    /// Span of the features' retention times
    pub fn observed_rt_range(&self) -> Option<ClosedRange> {
        self.features
            .values()
            .map(|f| ClosedRange::singleton(f.rt as f64))
            .reduce(|a, b| a.span_with(&b))
    }

    /// Mean height over present features
    pub fn average_height(&self) -> Option<f64> {
        if self.features.is_empty() {
            return None;
        }
        let sum: f64 = self.features.values().map(|f| f.height() as f64).sum();
        Some(sum / self.features.len() as f64)
    }

    /// Value of `column` in this row
    pub fn value(&self, column: &Column) -> Option<CellValue> {
        match column {
            Column::Id => Some(CellValue::Integer(self.id as i64)),
            Column::Mz => self.mz.map(CellValue::Float),
            Column::Rt => self.rt.map(|rt| CellValue::Float(rt as f64)),
            Column::Charge => self.charge.map(|z| CellValue::Integer(z as i64)),
            Column::IonAnnotations => {
                if self.annotations.is_empty() {
                    return None;
                }
                let names: Vec<&str> = self.annotations.iter().map(|a| a.name.as_str()).collect();
                Some(CellValue::Text(names.join(";")))
            }
            Column::Sample { sample, kind } => {
                let feature = self.features.get(sample)?;
                let stats = &feature.statistics;
                match kind {
                    SampleColumn::Area => Some(CellValue::Float(stats.area)),
                    SampleColumn::Height => Some(CellValue::Float(stats.height as f64)),
                    SampleColumn::Duration => Some(CellValue::Float(stats.duration)),
                    SampleColumn::Fwhm => stats.fwhm.map(CellValue::Float),
                    SampleColumn::TailingFactor => stats.tailing_factor.map(CellValue::Float),
                    SampleColumn::AsymmetryFactor => stats.asymmetry_factor.map(CellValue::Float),
                    SampleColumn::DataPoints => Some(CellValue::Integer(stats.data_points as i64)),
                    SampleColumn::Status => Some(CellValue::Text(feature.status.as_str().to_string())),
                }
            }
        }
    }
}
