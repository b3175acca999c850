// ============================================================
// Layer 2 — Run Stages
// ============================================================
// Each stage of a run is a value that owns its data and is
// consumed (or borrowed) by the next stage:
//
//   LoadedRun      records + label name
//       │ shuffled(seed)         optional, once, before anything
//       │                        reads the records (plots included)
//       │ vectorize(policy)      borrows: a failed run can
//       ▼                        restart from the same records
//   VectorizedRun  schema + samples
//       │ split(plan)
//       ▼
//   SplitRun       schema + training + validation
//
// Nothing here is shared between runs, so repeated runs can
// never see each other's data or model.

use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::Sample,
    features::select_features,
    sampler::sample_capped,
    splitter::{shuffle, split_train_val},
    vectorizer::vectorize_all,
};
use crate::domain::error::PipelineResult;
use crate::domain::record::Record;
use crate::domain::schema::{ColumnPolicy, FeatureSchema};
use crate::domain::traits::RecordSource;

// ─── Split plan ───────────────────────────────────────────────────────────────
/// How vectorized samples become training and validation sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitPlan {
    /// Fraction of rows used for training, in [0, 1]
    pub train_fraction: f64,
    /// Uniformly sample at most this many rows first
    pub max_samples:    Option<usize>,
    /// Seed for sampling
    pub seed:           Option<u64>,
}

impl Default for SplitPlan {
    fn default() -> Self {
        Self { train_fraction: 0.8, max_samples: None, seed: None }
    }
}

// ─── LoadedRun ────────────────────────────────────────────────────────────────
pub struct LoadedRun {
    label:   String,
    records: Vec<Record>,
}

impl LoadedRun {
    pub fn load(source: &dyn RecordSource, label: impl Into<String>) -> PipelineResult<Self> {
        let records = source.load_all()?;
        Ok(Self::from_records(records, label))
    }

    pub fn from_records(records: Vec<Record>, label: impl Into<String>) -> Self {
        Self { label: label.into(), records }
    }

    /// Replace file order with a random order (seeded when given).
    pub fn shuffled(mut self, seed: Option<u64>) -> Self {
        shuffle(&mut self.records, seed);
        tracing::debug!("Shuffled {} records (seed {:?})", self.records.len(), seed);
        self
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Derive the schema from the first record and vectorize every record.
    pub fn vectorize(&self, policy: &ColumnPolicy) -> PipelineResult<VectorizedRun> {
        let schema  = select_features(&self.records, &self.label, policy)?;
        let samples = vectorize_all(&self.records, &schema)?;
        Ok(VectorizedRun { schema, samples })
    }
}

// ─── VectorizedRun ────────────────────────────────────────────────────────────
#[derive(Debug)]
pub struct VectorizedRun {
    pub schema:  FeatureSchema,
    pub samples: Vec<Sample>,
}

impl VectorizedRun {
    /// sample (optional) → index cut. Sample order is kept, so a
    /// shuffled LoadedRun gives a shuffled split.
    pub fn split(self, plan: &SplitPlan) -> SplitRun {
        let samples = match plan.max_samples {
            Some(cap) => sample_capped(self.samples, cap, plan.seed),
            None      => self.samples,
        };

        let (train, valid) = split_train_val(samples, plan.train_fraction);
        SplitRun { schema: self.schema, train, valid }
    }
}

// ─── SplitRun ─────────────────────────────────────────────────────────────────
#[derive(Debug)]
pub struct SplitRun {
    pub schema: FeatureSchema,
    pub train:  Vec<Sample>,
    pub valid:  Vec<Sample>,
}
