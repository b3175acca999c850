// ============================================================
// Layer 3 — Pipeline Errors
// ============================================================
// Four error families, one per failure class of a run:
//
//   LoadError     — fetching or parsing the CSV failed
//   SchemaError   — no records, or a record lacks a schema column
//   ShapeError    — a feature vector does not match the model width
//   TrainingError — the engine could not fit (no data, divergence)
//
// None of them is recovered inside the pipeline. The
// application layer wraps them with anyhow context and the
// CLI decides what to print.

use thiserror::Error;

/// Failure while reading records from their source.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("HTTP request to '{url}' failed: {message}")]
    Http { url: String, message: String },

    #[error("Cannot read '{path}': {source}")]
    Io {
        path:   String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Column '{0}' not found in CSV header")]
    MissingColumn(String),

    #[error("Row {row}: label column '{label}' is empty")]
    MissingLabel { row: usize, label: String },

    #[error("Row {row}: column '{column}' has non-numeric value '{value}'")]
    NonNumeric {
        row:    usize,
        column: String,
        value:  String,
    },
}

/// Failure while deriving or applying the feature schema.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("No records were loaded, cannot derive a feature schema")]
    EmptyDataset,

    #[error("No feature columns remain after excluding label '{0}'")]
    NoFeatures(String),

    #[error("Feature column '{0}' appears more than once")]
    DuplicateColumn(String),

    #[error("Label column '{0}' cannot be used as a feature")]
    LabelInSchema(String),

    #[error("Row {row}: missing feature '{column}'")]
    MissingFeature { row: usize, column: String },
}

/// A feature vector width does not agree with the declared input width.
#[derive(Debug, Error, PartialEq)]
#[error("Row {row}: feature vector has width {actual}, expected {expected}")]
pub struct ShapeError {
    pub row:      usize,
    pub expected: usize,
    pub actual:   usize,
}

/// The ML engine could not complete a fit.
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("Training subset is empty, nothing to fit")]
    NoTrainingData,

    #[error("Loss diverged at epoch {epoch} (loss = {loss})")]
    Diverged { epoch: usize, loss: f64 },

    #[error("Visualization sink rejected epoch {epoch}: {message}")]
    Sink { epoch: usize, message: String },
}

/// Any error a pipeline stage can raise.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Training(#[from] TrainingError),
}

/// Result type for pipeline stages
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SchemaError::MissingFeature { row: 4, column: "Humidity".into() };
        assert_eq!(err.to_string(), "Row 4: missing feature 'Humidity'");

        let err = ShapeError { row: 0, expected: 2, actual: 3 };
        assert!(err.to_string().contains("width 3, expected 2"));

        let err = TrainingError::Diverged { epoch: 7, loss: f64::NAN };
        assert!(err.to_string().contains("epoch 7"));
    }

    #[test]
    fn test_pipeline_error_is_transparent() {
        let err: PipelineError = SchemaError::EmptyDataset.into();
        assert!(matches!(err, PipelineError::Schema(SchemaError::EmptyDataset)));
        assert!(err.to_string().starts_with("No records were loaded"));
    }
}
