// ============================================================
// Layer 3 — Record Domain Type
// ============================================================
// One observation from the weather CSV, already split into
// its feature entries and its label value.
//
// Feature entries keep the column order of the CSV header,
// so the first record can be used to derive a stable
// FeatureSchema. Columns whose cell was empty in the source
// row are simply absent from that record.
//
// A Record is immutable once the loader has built it.

use serde::{Deserialize, Serialize};

/// A single loaded observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// (column name, value) pairs in header order
    features: Vec<(String, f32)>,

    /// Value of the label column for this row
    label: f32,
}

impl Record {
    /// Build a record from ordered feature entries and a label.
    ///
    /// Example:
    ///   let r = Record::new(vec![("Temperature".into(), 9.4)], 7.3);
    pub fn new(features: Vec<(String, f32)>, label: f32) -> Self {
        Self { features, label }
    }

    /// Look up a feature value by column name.
    pub fn feature(&self, name: &str) -> Option<f32> {
        self.features
            .iter()
            .find(|(col, _)| col == name)
            .map(|(_, value)| *value)
    }

    /// Feature column names, in header order.
    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|(col, _)| col.as_str())
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    pub fn label(&self) -> f32 {
        self.label
    }
}
