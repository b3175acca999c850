// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that touch the file system:
//
//   checkpoint.rs — Saving and loading model weights with
//                   Burn's CompactRecorder, plus the feature
//                   schema and TrainConfig as JSON so the
//                   predictor can rebuild the model.
//
//   metrics.rs    — Epoch metrics (loss, mse, val_loss,
//                   val_mse) appended to a CSV file.
//
//   charts.rs     — File-based VisualizationSink: scatter
//                   JSON files and per-target metrics CSVs.
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;

/// Chart data files for scatterplots and learning curves
pub mod charts;
