// ============================================================
// Layer 4 — Vectorizer
// ============================================================
// Turns each Record into a Sample:
//
//   schema  = [Temperature, Humidity]
//   record  = {Humidity: 0.89, Temperature: 9.47} label 7.38
//   sample  = features [9.47, 0.89], label 7.38
//
// Every schema lookup must succeed. A missing column is a
// SchemaError naming the row and column; nothing is ever
// zero-filled.

use crate::data::dataset::Sample;
use crate::domain::error::SchemaError;
use crate::domain::record::Record;
use crate::domain::schema::FeatureSchema;

/// Vectorize one record. `row` is only used for error messages.
pub fn vectorize(record: &Record, schema: &FeatureSchema, row: usize) -> Result<Sample, SchemaError> {
    let features = schema
        .columns()
        .iter()
        .map(|col| {
            record.feature(col).ok_or_else(|| SchemaError::MissingFeature {
                row,
                column: col.clone(),
            })
        })
        .collect::<Result<Vec<f32>, _>>()?;

    Ok(Sample::new(features, record.label()))
}

/// Vectorize every record, stopping at the first missing feature.
pub fn vectorize_all(records: &[Record], schema: &FeatureSchema) -> Result<Vec<Sample>, SchemaError> {
    let samples = records
        .iter()
        .enumerate()
        .map(|(row, r)| vectorize(r, schema, row))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("Vectorized {} records to width {}", samples.len(), schema.len());
    Ok(samples)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    const LABEL: &str = "Apparent_Temperature";

    fn schema() -> FeatureSchema {
        FeatureSchema::new(vec!["Temperature".into(), "Humidity".into()], LABEL).unwrap()
    }

    #[test]
    fn test_vector_follows_schema_order() {
        // Record stores Humidity first; the vector must still be [T, H]
        let r = Record::new(
            vec![("Humidity".into(), 0.89), ("Temperature".into(), 9.47)],
            7.38,
        );
        let s = vectorize(&r, &schema(), 0).unwrap();
        assert_eq!(s.features, vec![9.47, 0.89]);
        assert_eq!(s.label, 7.38);
    }

    #[test]
    fn test_every_position_matches_the_record() {
        let schema  = schema();
        let records: Vec<Record> = (0..20)
            .map(|i| {
                let i = i as f32;
                Record::new(
                    vec![("Temperature".into(), i), ("Humidity".into(), i / 100.0)],
                    i * 0.9,
                )
            })
            .collect();

        let samples = vectorize_all(&records, &schema).unwrap();
        for (r, s) in records.iter().zip(&samples) {
            assert_eq!(s.width(), schema.len());
            for (i, col) in schema.columns().iter().enumerate() {
                assert_eq!(Some(s.features[i]), r.feature(col));
            }
        }
    }

    #[test]
    fn test_missing_feature_is_an_error() {
        let records = vec![
            Record::new(vec![("Temperature".into(), 1.0), ("Humidity".into(), 0.5)], 1.0),
            Record::new(vec![("Temperature".into(), 2.0)], 2.0),
        ];
        let err = vectorize_all(&records, &schema()).unwrap_err();
        assert_eq!(err, SchemaError::MissingFeature { row: 1, column: "Humidity".into() });
    }

    #[test]
    fn test_extra_record_columns_are_ignored() {
        let r = Record::new(
            vec![
                ("Temperature".into(), 1.0),
                ("Wind_Speed".into(),  14.1),
                ("Humidity".into(),    0.5),
            ],
            1.0,
        );
        assert_eq!(vectorize(&r, &schema(), 0).unwrap().features, vec![1.0, 0.5]);
    }
}
