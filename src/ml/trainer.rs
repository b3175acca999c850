// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Fits a fresh LinearRegression with Adam + MSE and evaluates
// it on the validation set after every epoch.
//
// Before the engine runs:
//   - every sample must be exactly `schema.len()` wide
//     (ShapeError otherwise, naming the offending row)
//   - the training set must not be empty
//
// While it runs:
//   - a non-finite batch loss aborts with TrainingError::Diverged
//   - each epoch's metrics go to the VisualizationSink and to stdout
//
// Backend notes:
//   - Training uses TrainBackend (Autodiff<NdArray>) for gradients
//   - model.valid() returns the model on the inner backend,
//     so the validation batcher uses B::InnerBackend
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{
    batcher::RegressionBatcher,
    dataset::{Sample, WeatherDataset},
};
use crate::domain::chart::{ChartTarget, EpochMetrics};
use crate::domain::error::{PipelineResult, ShapeError, TrainingError};
use crate::domain::schema::FeatureSchema;
use crate::domain::traits::VisualizationSink;
use crate::ml::model::{LinearRegression, LinearRegressionConfig};

pub type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;
pub type InferBackend = burn::backend::NdArray;

/// Default shuffle seed for the training data loader
const LOADER_SEED: u64 = 42;

/// Summary of a completed fit
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub epochs_run:    usize,
    pub final_metrics: EpochMetrics,
    /// (epoch, val_loss) of the best validation epoch, if any
    pub best_val:      Option<(usize, f64)>,
}

/// Where per-epoch metrics are rendered
pub fn training_chart() -> ChartTarget {
    ChartTarget::new("Training Performance", "Training")
}

pub fn run_training(
    cfg:    &TrainConfig,
    schema: &FeatureSchema,
    train:  Vec<Sample>,
    valid:  Vec<Sample>,
    sink:   &dyn VisualizationSink,
) -> PipelineResult<(LinearRegression<InferBackend>, TrainingReport)> {
    let device = burn::backend::ndarray::NdArrayDevice::default();
    tracing::info!("Using NdArray device: {:?}", device);
    fit::<TrainBackend>(cfg, schema, train, valid, sink, device)
}

/// Every sample must have the declared width. Rows are numbered
/// across training first, then validation.
pub fn check_shapes(
    train:    &[Sample],
    valid:    &[Sample],
    expected: usize,
) -> Result<(), ShapeError> {
    match train
        .iter()
        .chain(valid)
        .enumerate()
        .find(|(_, s)| s.width() != expected)
    {
        Some((row, s)) => Err(ShapeError { row, expected, actual: s.width() }),
        None => Ok(()),
    }
}

pub fn fit<B: AutodiffBackend>(
    cfg:    &TrainConfig,
    schema: &FeatureSchema,
    train:  Vec<Sample>,
    valid:  Vec<Sample>,
    sink:   &dyn VisualizationSink,
    device: B::Device,
) -> PipelineResult<(LinearRegression<B::InnerBackend>, TrainingReport)> {

    // ── Contract checks ───────────────────────────────────────────────────────
    if train.is_empty() {
        return Err(TrainingError::NoTrainingData.into());
    }

    // ── Build model (never reused across runs) ────────────────────────────────
    let mut model: LinearRegression<B> = LinearRegressionConfig::new(schema.len()).init(&device);
    check_shapes(&train, &valid, model.input_width())?;
    tracing::info!(
        "Model ready: dense {} → 1, {} train / {} validation samples",
        model.input_width(),
        train.len(),
        valid.len(),
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    let mut optim = AdamConfig::new().init();

    // ── Data loaders ──────────────────────────────────────────────────────────
    // Batches land on the backend's default device (NdArray: Cpu)
    let train_loader = DataLoaderBuilder::new(RegressionBatcher::<B>::new())
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed.unwrap_or(LOADER_SEED))
        .build(WeatherDataset::new(train));

    let val_loader = if valid.is_empty() {
        None
    } else {
        Some(
            DataLoaderBuilder::new(RegressionBatcher::<B::InnerBackend>::new())
                .batch_size(cfg.batch_size)
                .build(WeatherDataset::new(valid)),
        )
    };

    let target   = training_chart();
    let mut best: Option<(usize, f64)> = None;
    let mut last: Option<EpochMetrics> = None;

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut loss_sum  = 0.0f64;
        let mut batches   = 0usize;
        let mut sq_err    = 0.0f64;
        let mut seen      = 0usize;

        for batch in train_loader.iter() {
            let rows      = batch.inputs.dims()[0];
            let (loss, _) = model.forward_loss(batch.inputs, batch.targets);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            if !loss_val.is_finite() {
                tracing::warn!("Non-finite loss at epoch {}", epoch);
                return Err(TrainingError::Diverged { epoch, loss: loss_val }.into());
            }
            loss_sum += loss_val;
            batches  += 1;
            sq_err   += loss_val * rows as f64;
            seen     += rows;

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let loss = loss_sum / batches.max(1) as f64;
        let mse  = sq_err / seen.max(1) as f64;

        // ── Validation phase ──────────────────────────────────────────────────
        let (val_loss, val_mse) = match &val_loader {
            Some(loader) => {
                let model_valid = model.valid();
                let mut loss_sum = 0.0f64;
                let mut batches  = 0usize;
                let mut sq_err   = 0.0f64;
                let mut seen     = 0usize;

                for batch in loader.iter() {
                    let rows      = batch.inputs.dims()[0];
                    let (loss, _) = model_valid.forward_loss(batch.inputs, batch.targets);
                    let loss_val: f64 = loss.into_scalar().elem::<f64>();
                    loss_sum += loss_val;
                    batches  += 1;
                    sq_err   += loss_val * rows as f64;
                    seen     += rows;
                }

                (
                    Some(loss_sum / batches.max(1) as f64),
                    Some(sq_err / seen.max(1) as f64),
                )
            }
            None => (None, None),
        };

        let metrics = EpochMetrics::new(epoch, loss, mse, val_loss, val_mse);

        println!(
            "Epoch {:>3}/{} | loss={:.4} | mse={:.4} | val_loss={} | val_mse={}",
            epoch,
            cfg.epochs,
            metrics.loss,
            metrics.mse,
            fmt_opt(metrics.val_loss),
            fmt_opt(metrics.val_mse),
        );

        if let Some(v) = metrics.val_loss {
            if metrics.is_improvement(best.map_or(f64::INFINITY, |(_, b)| b)) {
                best = Some((epoch, v));
            }
        }

        sink.on_epoch_end(&target, &metrics).map_err(|e| TrainingError::Sink {
            epoch,
            message: e.to_string(),
        })?;

        last = Some(metrics);
    }

    // cfg.epochs >= 1 is enforced by TrainConfig::validate
    let final_metrics = last.unwrap_or_else(|| EpochMetrics::new(0, f64::NAN, f64::NAN, None, None));

    tracing::info!("Training complete!");
    let report = TrainingReport { epochs_run: final_metrics.epoch, final_metrics, best_val: best };
    Ok((model.valid(), report))
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |v| format!("{v:.4}"))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::domain::chart::{AxisLabels, Point};

    /// Collects every epoch it is given
    #[derive(Default)]
    struct RecordingSink {
        epochs: RefCell<Vec<EpochMetrics>>,
    }

    impl VisualizationSink for RecordingSink {
        fn render_scatter(&self, _: &ChartTarget, _: &[Point], _: &AxisLabels) -> anyhow::Result<()> {
            Ok(())
        }

        fn on_epoch_end(&self, _: &ChartTarget, metrics: &EpochMetrics) -> anyhow::Result<()> {
            self.epochs.borrow_mut().push(metrics.clone());
            Ok(())
        }
    }

    /// Rejects every epoch
    struct FailingSink;

    impl VisualizationSink for FailingSink {
        fn render_scatter(&self, _: &ChartTarget, _: &[Point], _: &AxisLabels) -> anyhow::Result<()> {
            Ok(())
        }

        fn on_epoch_end(&self, _: &ChartTarget, _: &EpochMetrics) -> anyhow::Result<()> {
            anyhow::bail!("chart directory is read-only")
        }
    }

    fn schema(width: usize) -> FeatureSchema {
        let cols = (0..width).map(|i| format!("f{i}")).collect();
        FeatureSchema::new(cols, "Apparent_Temperature").unwrap()
    }

    /// y = 2·x0 − x1 + 1 on a small grid
    fn linear_samples(n: usize) -> Vec<Sample> {
        (0..n)
            .map(|i| {
                let x0 = (i % 10) as f32 / 10.0;
                let x1 = (i / 10) as f32 / 10.0;
                Sample::new(vec![x0, x1], 2.0 * x0 - x1 + 1.0)
            })
            .collect()
    }

    fn config(epochs: usize) -> TrainConfig {
        TrainConfig { epochs, batch_size: 16, lr: 0.05, seed: Some(1), ..TrainConfig::default() }
    }

    #[test]
    fn test_fit_reduces_loss_and_reports_every_epoch() {
        let samples      = linear_samples(100);
        let (train, val) = crate::data::splitter::split_train_val(samples, 0.8);
        let sink         = RecordingSink::default();

        let (model, report) = run_training(&config(60), &schema(2), train, val, &sink).unwrap();

        let epochs = sink.epochs.borrow();
        assert_eq!(epochs.len(), 60);
        assert_eq!(report.epochs_run, 60);
        assert!(epochs[59].loss < epochs[0].loss);
        assert!(report.final_metrics.val_loss.is_some());
        assert!(report.best_val.is_some());
        assert_eq!(model.input_width(), 2);
    }

    #[test]
    fn test_empty_validation_set_is_allowed() {
        let sink = RecordingSink::default();
        let (_, report) =
            run_training(&config(2), &schema(2), linear_samples(20), Vec::new(), &sink).unwrap();
        assert_eq!(report.final_metrics.val_loss, None);
        assert_eq!(report.best_val, None);
    }

    #[test]
    fn test_empty_training_set_is_rejected() {
        let sink = RecordingSink::default();
        let err  = run_training(&config(2), &schema(2), Vec::new(), linear_samples(5), &sink)
            .unwrap_err();
        assert!(matches!(
            err,
            crate::domain::error::PipelineError::Training(TrainingError::NoTrainingData)
        ));
    }

    #[test]
    fn test_width_mismatch_fails_before_fitting() {
        let sink  = RecordingSink::default();
        let mut v = linear_samples(10);
        v.push(Sample::new(vec![1.0, 2.0, 3.0], 0.0));

        let err = run_training(&config(2), &schema(2), linear_samples(10), v, &sink).unwrap_err();
        match err {
            crate::domain::error::PipelineError::Shape(e) => {
                assert_eq!(e, ShapeError { row: 20, expected: 2, actual: 3 });
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(sink.epochs.borrow().is_empty());
    }

    #[test]
    fn test_nan_feature_diverges() {
        let sink  = RecordingSink::default();
        let train = vec![Sample::new(vec![f32::NAN, 1.0], 1.0), Sample::new(vec![0.5, 1.0], 2.0)];
        let err   = run_training(&config(3), &schema(2), train, Vec::new(), &sink).unwrap_err();
        assert!(matches!(
            err,
            crate::domain::error::PipelineError::Training(TrainingError::Diverged { epoch: 1, .. })
        ));
    }

    #[test]
    fn test_check_shapes() {
        let ok = linear_samples(4);
        assert!(check_shapes(&ok, &[], 2).is_ok());
        assert_eq!(
            check_shapes(&ok, &[], 3),
            Err(ShapeError { row: 0, expected: 3, actual: 2 })
        );
    }

    #[test]
    fn test_sink_error_stops_fit_at_first_epoch() {
        let err = run_training(&config(5), &schema(2), linear_samples(20), linear_samples(5), &FailingSink)
            .unwrap_err();
        match err {
            crate::domain::error::PipelineError::Training(TrainingError::Sink { epoch, message }) => {
                assert_eq!(epoch, 1);
                assert!(message.contains("read-only"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
