// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from the raw weather CSV
// all the way to tensor batches.
//
// The pipeline flows in this order:
//
//   weather CSV (URL or file)
//       │
//       ▼
//   CsvLoader         → parses rows into Records
//       │
//       ▼
//   shuffle           → optional, once, right after loading
//       │
//       ▼
//   select_features   → derives the FeatureSchema from record 0
//       │
//       ▼
//   vectorize_all     → Records → Samples (features + label)
//       │
//       ▼
//   sample_capped     → optional uniform subset of at most N rows
//       │
//       ▼
//   split_train_val   → training / validation by index cut
//       │
//       ▼
//   WeatherDataset    → implements Burn's Dataset trait
//       │
//       ▼
//   RegressionBatcher → stacks samples into [N, W] / [N, 1] tensors
//
// Each module is responsible for exactly one step and is
// testable without the network or a trained model.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Loads weather rows over HTTP or from disk
pub mod loader;

/// Derives the ordered feature columns
pub mod features;

/// Converts records into fixed-order feature vectors
pub mod vectorizer;

/// Uniform capped sampling
pub mod sampler;

/// Order-preserving train/validation split and shuffling
pub mod splitter;

/// Implements Burn's Dataset trait for samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
