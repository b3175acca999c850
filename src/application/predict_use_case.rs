// ============================================================
// Layer 2 — PredictUseCase
// ============================================================
// Loads the trained model and feature schema from the
// checkpoint directory and predicts the apparent temperature
// for a set of `name=value` feature assignments. The label name
// comes from the config saved with the checkpoint.

use anyhow::{bail, Context, Result};

use crate::infra::checkpoint::CheckpointManager;
use crate::ml::predictor::Predictor;

pub struct PredictUseCase {
    predictor: Predictor,
    /// Label column the checkpoint was trained on
    label:     String,
}

impl PredictUseCase {
    pub fn new(checkpoint_dir: &str) -> Result<Self> {
        let ckpt      = CheckpointManager::new(checkpoint_dir);
        let predictor = Predictor::from_checkpoint(&ckpt)?;
        let label     = ckpt.load_config()?.label;
        Ok(Self { predictor, label })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Schema columns the model expects, in vector order
    pub fn features(&self) -> &[String] {
        self.predictor.schema().columns()
    }

    /// `assignments` are raw `Name=value` strings from the command line.
    pub fn predict(&self, assignments: &[String]) -> Result<f32> {
        let values = parse_assignments(assignments)?;
        self.predictor
            .predict(&values)
            .with_context(|| format!("Expected features: {}", self.features().join(", ")))
    }
}

/// "Temperature=21.5" → ("Temperature", 21.5)
pub fn parse_assignments(assignments: &[String]) -> Result<Vec<(String, f32)>> {
    let mut values = Vec::with_capacity(assignments.len());
    for a in assignments {
        let Some((name, value)) = a.split_once('=') else {
            bail!("Expected NAME=VALUE, got '{a}'");
        };
        let value: f32 = value
            .trim()
            .parse()
            .with_context(|| format!("'{}' is not a number", value.trim()))?;
        values.push((name.trim().to_string(), value));
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignments() {
        let v = parse_assignments(&["Temperature=21.5".into(), " Humidity = 0.4 ".into()]).unwrap();
        assert_eq!(v, vec![("Temperature".to_string(), 21.5), ("Humidity".to_string(), 0.4)]);
    }

    #[test]
    fn test_rejects_bad_assignments() {
        assert!(parse_assignments(&["Temperature".into()]).is_err());
        assert!(parse_assignments(&["Temperature=warm".into()]).is_err());
    }

    #[test]
    fn test_missing_checkpoint() {
        let dir = tempfile::tempdir().unwrap();
        assert!(PredictUseCase::new(dir.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_predicts_from_a_trained_checkpoint() {
        use crate::application::pipeline::LoadedRun;
        use crate::application::train_use_case::{TrainConfig, TrainUseCase};
        use crate::data::loader::DEFAULT_LABEL;
        use crate::domain::record::Record;
        use crate::domain::run_state::{RunState, RunTracker};
        use crate::infra::charts::ChartWriter;

        let dir = tempfile::tempdir().unwrap();
        let cfg = TrainConfig {
            epochs:         2,
            seed:           Some(5),
            checkpoint_dir: dir.path().join("ckpt").display().to_string(),
            chart_dir:      dir.path().join("charts").display().to_string(),
            ..TrainConfig::default()
        };
        let records = (0..30)
            .map(|i| {
                let t = i as f32;
                Record::new(vec![("Temperature".into(), t), ("Humidity".into(), 0.5)], t - 2.0)
            })
            .collect();

        let mut tracker = RunTracker::new();
        tracker.advance(RunState::Loaded).unwrap();
        TrainUseCase::new(cfg.clone())
            .train_loaded(
                &LoadedRun::from_records(records, DEFAULT_LABEL),
                &mut tracker,
                &ChartWriter::new(&cfg.chart_dir),
            )
            .unwrap();

        let use_case = PredictUseCase::new(&cfg.checkpoint_dir).unwrap();
        assert_eq!(use_case.label(), DEFAULT_LABEL);
        assert_eq!(use_case.features(), &["Temperature", "Humidity"]);
        assert!(use_case.predict(&["Temperature=20".into(), "Humidity=0.5".into()]).unwrap().is_finite());
        assert!(use_case.predict(&["Temperature=20".into()]).is_err());
    }
}
