// ============================================================
// Layer 5 — Predictor
// ============================================================
use anyhow::Result;
use burn::prelude::*;

use crate::data::vectorizer::vectorize;
use crate::domain::record::Record;
use crate::domain::schema::FeatureSchema;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{LinearRegression, LinearRegressionConfig};
use crate::ml::trainer::InferBackend;

pub struct Predictor {
    model:  LinearRegression<InferBackend>,
    schema: FeatureSchema,
    device: burn::backend::ndarray::NdArrayDevice,
}

impl Predictor {
    pub fn from_checkpoint(ckpt_manager: &CheckpointManager) -> Result<Self> {
        let device = burn::backend::ndarray::NdArrayDevice::default();
        let schema = ckpt_manager.load_schema()?;
        let model: LinearRegression<InferBackend> =
            LinearRegressionConfig::new(schema.len()).init(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        tracing::info!("Model loaded from checkpoint ({} features)", schema.len());
        Ok(Self::new(model, schema, device))
    }

    pub fn new(
        model:  LinearRegression<InferBackend>,
        schema: FeatureSchema,
        device: burn::backend::ndarray::NdArrayDevice,
    ) -> Self {
        Self { model, schema, device }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Predict the label for one set of named feature values.
    /// Every schema column must be present; extra names are ignored.
    pub fn predict(&self, values: &[(String, f32)]) -> Result<f32> {
        // Label is unknown at prediction time
        let record = Record::new(values.to_vec(), f32::NAN);
        let sample = vectorize(&record, &self.schema, 0)?;

        let width  = sample.width();
        let input  = Tensor::<InferBackend, 2>::from_data(
            TensorData::new(sample.features, [1, width]),
            &self.device,
        );

        let output: Vec<f32> = self
            .model
            .forward(input)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("Cannot read prediction: {e:?}"))?;

        let value = output
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Model produced no output"))?;

        tracing::debug!("Prediction for {:?} = {}", values, value);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::SchemaError;

    fn predictor() -> Predictor {
        let device = Default::default();
        let schema = FeatureSchema::new(
            vec!["Temperature".into(), "Humidity".into()],
            "Apparent_Temperature",
        )
        .unwrap();
        let model = LinearRegressionConfig::new(2).init(&device);
        Predictor::new(model, schema, device)
    }

    #[test]
    fn test_prediction_is_finite() {
        let p = predictor();
        let y = p
            .predict(&[("Humidity".into(), 0.4), ("Temperature".into(), 21.5)])
            .unwrap();
        assert!(y.is_finite());
    }

    #[test]
    fn test_missing_feature_is_reported() {
        let p   = predictor();
        let err = p.predict(&[("Temperature".into(), 21.5)]).unwrap_err();
        let err = err.downcast::<SchemaError>().unwrap();
        assert_eq!(err, SchemaError::MissingFeature { row: 0, column: "Humidity".into() });
    }
}
