// ============================================================
// Layer 4 — Feature Selector
// ============================================================
// Derives the FeatureSchema from the first loaded record.
//
//   ColumnPolicy::ExcludeLabel
//     keys of record 0 in header order, label removed
//
//   ColumnPolicy::MoveToEnd { column }
//     same, but `column` is taken out and re-appended last
//
// Only the first record is inspected. If later records are
// sparser, the vectorizer fails on them with MissingFeature.

use crate::domain::error::SchemaError;
use crate::domain::record::Record;
use crate::domain::schema::{ColumnPolicy, FeatureSchema};

/// Build the schema for a run.
///
/// Fails with `SchemaError::EmptyDataset` when no records were loaded.
pub fn select_features(
    records: &[Record],
    label:   &str,
    policy:  &ColumnPolicy,
) -> Result<FeatureSchema, SchemaError> {
    let first = records.first().ok_or(SchemaError::EmptyDataset)?;

    // Dedup while keeping first-seen order
    let mut columns: Vec<String> = Vec::with_capacity(first.feature_count());
    for name in first.feature_names() {
        if name != label && !columns.iter().any(|c| c == name) {
            columns.push(name.to_string());
        }
    }

    if let ColumnPolicy::MoveToEnd { column } = policy {
        let pos = columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| SchemaError::MissingFeature { row: 0, column: column.clone() })?;
        let moved = columns.remove(pos);
        columns.push(moved);
    }

    let schema = FeatureSchema::new(columns, label)?;
    tracing::info!("Feature columns: {:?}", schema.columns());
    Ok(schema)
}
