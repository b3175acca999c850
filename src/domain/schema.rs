// ============================================================
// Layer 3 — FeatureSchema Domain Type
// ============================================================
// The ordered list of feature column names a model is trained
// on. Position i in every feature vector holds the value of
// column i of the schema.
//
// Invariants enforced by FeatureSchema::new:
//   - at least one column
//   - no duplicate names
//   - the label column is never part of the schema
//
// ColumnPolicy decides the order of the columns. It is plain
// configuration so that the ordering can be chosen and tested
// explicitly instead of being implied by the CSV header.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::error::SchemaError;

/// How feature columns are ordered when the schema is derived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnPolicy {
    /// Every non-label column, in header order
    #[default]
    ExcludeLabel,

    /// Every non-label column in header order, except `column`
    /// which is moved to the last position
    MoveToEnd { column: String },
}

/// Ordered, validated feature column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    /// Validate and wrap an ordered column list.
    pub fn new(columns: Vec<String>, label: &str) -> Result<Self, SchemaError> {
        if columns.is_empty() {
            return Err(SchemaError::NoFeatures(label.to_string()));
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for col in &columns {
            if col == label {
                return Err(SchemaError::LabelInSchema(col.clone()));
            }
            if !seen.insert(col.as_str()) {
                return Err(SchemaError::DuplicateColumn(col.clone()));
            }
        }

        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of features, i.e. the model input width
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column inside the feature vector
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_valid_schema() {
        let s = FeatureSchema::new(cols(&["Temperature", "Humidity"]), "Apparent_Temperature")
            .unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.position("Humidity"), Some(1));
    }

    #[test]
    fn test_rejects_duplicates_and_label() {
        let dup = FeatureSchema::new(cols(&["Humidity", "Humidity"]), "Apparent_Temperature");
        assert_eq!(dup, Err(SchemaError::DuplicateColumn("Humidity".into())));

        let lbl = FeatureSchema::new(cols(&["Apparent_Temperature"]), "Apparent_Temperature");
        assert_eq!(lbl, Err(SchemaError::LabelInSchema("Apparent_Temperature".into())));
    }

    #[test]
    fn test_rejects_empty() {
        let empty = FeatureSchema::new(Vec::new(), "Apparent_Temperature");
        assert_eq!(empty, Err(SchemaError::NoFeatures("Apparent_Temperature".into())));
    }

    #[test]
    fn test_policy_json_shape() {
        let p: ColumnPolicy =
            serde_json::from_str(r#"{"kind":"move_to_end","column":"Temperature"}"#).unwrap();
        assert_eq!(p, ColumnPolicy::MoveToEnd { column: "Temperature".into() });
    }
}
