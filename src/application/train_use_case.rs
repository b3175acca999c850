// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates one training run in order:
//
//   Step 1: Load + shuffle records       (Layer 4 - data)    Idle → Loaded
//   Step 2: Render dataset scatterplots  (Layer 2 - plot)
//   Step 3: Derive schema + vectorize    (Layer 4 - data)    → Vectorized
//   Step 4: Sample / split               (Layer 4 - data)    → Split
//   Step 5: Fit the model                (Layer 5 - ml)      → Fitting
//   Step 6: Save checkpoint              (Layer 6 - infra)   → Done
//
// Any error in steps 5 or 6 moves the run to Failed. Errors in
// the earlier steps abort before fitting starts.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::application::pipeline::{LoadedRun, SplitPlan};
use crate::application::plot_use_case::{PlotUseCase, DEFAULT_SCATTER_LIMIT};
use crate::data::loader::{DEFAULT_CSV_URL, DEFAULT_LABEL};
use crate::domain::run_state::{RunState, RunTracker};
use crate::domain::schema::{ColumnPolicy, FeatureSchema};
use crate::domain::traits::{RecordSource, VisualizationSink};
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::LinearRegression;
use crate::ml::trainer::{run_training, InferBackend, TrainingReport};

// ─── Training Configuration ──────────────────────────────────────────────────
// Everything a training run needs. Serialisable so it can be
// loaded from a JSON file and saved next to the checkpoint.
// Missing JSON fields fall back to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// CSV URL or local path
    pub source:          String,
    pub label:           String,
    /// Restrict features to these columns
    pub columns:         Option<Vec<String>>,
    pub policy:          ColumnPolicy,
    pub train_fraction:  f64,
    pub max_samples:     Option<usize>,
    /// Shuffle records once, right after loading
    pub shuffle:         bool,
    pub seed:            Option<u64>,
    pub epochs:          usize,
    pub batch_size:      usize,
    pub lr:              f64,
    pub checkpoint_dir:  String,
    pub chart_dir:       String,
    pub scatter_columns: Vec<String>,
    pub scatter_limit:   usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            source:          DEFAULT_CSV_URL.to_string(),
            label:           DEFAULT_LABEL.to_string(),
            columns:         None,
            policy:          ColumnPolicy::ExcludeLabel,
            train_fraction:  0.8,
            max_samples:     None,
            shuffle:         true,
            seed:            None,
            epochs:          100,
            batch_size:      32,
            lr:              0.1,
            checkpoint_dir:  "checkpoints".to_string(),
            chart_dir:       "charts".to_string(),
            scatter_columns: vec!["Temperature".to_string(), "Humidity".to_string()],
            scatter_limit:   DEFAULT_SCATTER_LIMIT,
        }
    }
}

impl TrainConfig {
    /// Read a config from a JSON file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&json)
            .with_context(|| format!("Malformed config '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.train_fraction) {
            bail!("train_fraction must be within [0, 1], got {}", self.train_fraction);
        }
        if self.epochs == 0 {
            bail!("epochs must be at least 1");
        }
        if self.batch_size == 0 {
            bail!("batch_size must be at least 1");
        }
        if !(self.lr > 0.0 && self.lr.is_finite()) {
            bail!("lr must be a positive number, got {}", self.lr);
        }
        if self.max_samples == Some(0) {
            bail!("max_samples must be at least 1 when set");
        }
        Ok(())
    }

    pub fn split_plan(&self) -> SplitPlan {
        SplitPlan {
            train_fraction: self.train_fraction,
            max_samples:    self.max_samples,
            seed:           self.seed,
        }
    }
}

/// What a finished run hands back to the CLI
#[derive(Debug)]
pub struct TrainOutcome {
    pub schema:  FeatureSchema,
    pub report:  TrainingReport,
    pub train_n: usize,
    pub valid_n: usize,
    pub states:  Vec<RunState>,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(
        &self,
        source: &dyn RecordSource,
        sink:   &dyn VisualizationSink,
    ) -> Result<TrainOutcome> {
        let cfg = &self.config;
        cfg.validate()?;

        let mut tracker = RunTracker::new();

        // ── Step 1: Load ──────────────────────────────────────────────────────
        let mut loaded = LoadedRun::load(source, &cfg.label).context("Loading records failed")?;
        if cfg.shuffle {
            loaded = loaded.shuffled(cfg.seed);
        }
        tracker.advance(RunState::Loaded)?;
        tracing::info!("Loaded {} records", loaded.records().len());

        // ── Step 2: Visualise the raw dataset ─────────────────────────────────
        PlotUseCase::new(&cfg.label, cfg.scatter_columns.clone(), cfg.scatter_limit)
            .render(loaded.records(), sink)?;

        self.train_loaded(&loaded, &mut tracker, sink)
    }

    /// Steps 3–6 on records that are already in memory.
    /// The tracker must be in Loaded (fresh or restarted run).
    pub fn train_loaded(
        &self,
        loaded:  &LoadedRun,
        tracker: &mut RunTracker,
        sink:    &dyn VisualizationSink,
    ) -> Result<TrainOutcome> {
        let cfg = &self.config;

        // ── Step 3: Schema + vectorize ────────────────────────────────────────
        let vectorized = loaded.vectorize(&cfg.policy).context("Vectorization failed")?;
        tracker.advance(RunState::Vectorized)?;

        // ── Step 4: Split ─────────────────────────────────────────────────────
        let split = vectorized.split(&cfg.split_plan());
        tracker.advance(RunState::Split)?;
        tracing::info!(
            "Training on {} samples, validating on {} samples",
            split.train.len(),
            split.valid.len()
        );
        let (train_n, valid_n) = (split.train.len(), split.valid.len());

        // ── Step 5: Fit ───────────────────────────────────────────────────────
        tracker.advance(RunState::Fitting)?;
        let (model, report) = match run_training(cfg, &split.schema, split.train, split.valid, sink) {
            Ok(fitted) => fitted,
            Err(e) => {
                tracker.fail()?;
                tracing::warn!("Run failed: {}", e);
                return Err(e).context("Training failed");
            }
        };

        // ── Step 6: Save checkpoint ───────────────────────────────────────────
        if let Err(e) = self.save_checkpoint(&split.schema, &model) {
            tracker.fail()?;
            tracing::warn!("Run failed: {:#}", e);
            return Err(e.context("Saving checkpoint failed"));
        }
        tracker.advance(RunState::Done)?;
        tracing::info!("Checkpoint saved to '{}'", cfg.checkpoint_dir);

        Ok(TrainOutcome {
            schema: split.schema,
            report,
            train_n,
            valid_n,
            states: tracker.history().to_vec(),
        })
    }

    fn save_checkpoint(
        &self,
        schema: &FeatureSchema,
        model:  &LinearRegression<InferBackend>,
    ) -> Result<()> {
        let ckpt = CheckpointManager::new(&self.config.checkpoint_dir);
        ckpt.save_config(&self.config)?;
        ckpt.save_schema(schema)?;
        ckpt.save_model(model)
    }
}
