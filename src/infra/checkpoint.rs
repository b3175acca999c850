// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores a trained model using Burn's CompactRecorder.
//
// What gets saved after a successful run:
//   1. Model weights (model.mpk.gz) — dense weights and bias
//   2. schema.json                  — ordered feature columns
//   3. train_config.json            — the config the run used
//
// The schema is needed to rebuild the model (its length is the
// input width) and to put prediction inputs in the right order.
//
// File layout:
//   checkpoints/
//     model.mpk.gz
//     schema.json
//     train_config.json
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};

use crate::application::train_use_case::TrainConfig;
use crate::domain::schema::FeatureSchema;
use crate::ml::model::LinearRegression;

const MODEL_FILE:  &str = "model";
const SCHEMA_FILE: &str = "schema.json";
const CONFIG_FILE: &str = "train_config.json";

/// Manages saving and loading of the trained model and its metadata.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new CheckpointManager. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))
    }

    /// Save model weights (recorder adds the .mpk.gz extension).
    pub fn save_model<B: Backend>(&self, model: &LinearRegression<B>) -> Result<()> {
        self.ensure_dir()?;
        let path = self.dir.join(MODEL_FILE);

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| {
                format!("Failed to save checkpoint to '{}'", path.display())
            })?;

        tracing::debug!("Saved model weights to '{}'", path.display());
        Ok(())
    }

    /// Load weights into a model of the same architecture.
    pub fn load_model<B: Backend>(
        &self,
        model:  LinearRegression<B>,
        device: &B::Device,
    ) -> Result<LinearRegression<B>> {
        let path = self.dir.join(MODEL_FILE);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!("Cannot load checkpoint '{}'. Have you trained the model first?",
                    path.display())
            })?;

        Ok(model.load_record(record))
    }

    pub fn save_schema(&self, schema: &FeatureSchema) -> Result<()> {
        self.write_json(SCHEMA_FILE, schema)
    }

    pub fn load_schema(&self) -> Result<FeatureSchema> {
        self.read_json(SCHEMA_FILE)
    }

    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        self.write_json(CONFIG_FILE, cfg)
    }

    pub fn load_config(&self) -> Result<TrainConfig> {
        self.read_json(CONFIG_FILE)
    }

    fn write_json<T: serde::Serialize>(&self, name: &str, value: &T) -> Result<()> {
        self.ensure_dir()?;
        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;
        tracing::debug!("Saved '{}'", path.display());
        Ok(())
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.dir.join(name);
        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read '{}'. Make sure you have run 'train' before 'predict'.",
                    path.display()
                )
            })?;
        serde_json::from_str(&json)
            .with_context(|| format!("Malformed JSON in '{}'", path.display()))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::model::LinearRegressionConfig;

    type TestBackend = burn::backend::NdArray;

    #[test]
    fn test_schema_and_config_round_trip() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path());

        let schema = FeatureSchema::new(
            vec!["Temperature".into(), "Humidity".into()],
            "Apparent_Temperature",
        )
        .unwrap();
        ckpt.save_schema(&schema).unwrap();
        assert_eq!(ckpt.load_schema().unwrap(), schema);

        let cfg = TrainConfig { epochs: 7, ..TrainConfig::default() };
        ckpt.save_config(&cfg).unwrap();
        assert_eq!(ckpt.load_config().unwrap().epochs, 7);
    }

    #[test]
    fn test_model_weights_survive_save_and_load() {
        let dir    = tempfile::tempdir().unwrap();
        let ckpt   = CheckpointManager::new(dir.path().join("nested"));
        let device = Default::default();

        let model: LinearRegression<TestBackend> = LinearRegressionConfig::new(2).init(&device);
        ckpt.save_model(&model).unwrap();

        let fresh: LinearRegression<TestBackend> = LinearRegressionConfig::new(2).init(&device);
        let loaded = ckpt.load_model(fresh, &device).unwrap();

        let before: Vec<f32> = model.dense.weight.val().into_data().to_vec().unwrap();
        let after:  Vec<f32> = loaded.dense.weight.val().into_data().to_vec().unwrap();
        for (a, b) in before.iter().zip(&after) {
            // CompactRecorder stores half precision
            assert!((a - b).abs() < 1e-2);
        }
    }

    #[test]
    fn test_missing_checkpoint_is_an_error() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path());
        let err  = ckpt.load_schema().unwrap_err();
        assert!(err.to_string().contains("schema.json"));
    }
}
