// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn model and optimiser code.
// The data layer only touches Burn's Dataset and Batcher
// traits; nothing else outside this layer builds a model.
//
// What's in this layer:
//
//   model.rs     — One dense layer (input_width → 1), no
//                  activation, plus its MSE loss
//
//   trainer.rs   — The training loop
//                  Shape checks, Adam updates, per-epoch
//                  validation, divergence detection and
//                  metrics forwarding to the visualization sink
//
//   predictor.rs — Loads a checkpoint and predicts the
//                  apparent temperature for named features
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// Dense linear regression model
pub mod model;

/// Training loop with validation
pub mod trainer;

/// Checkpoint-backed prediction
pub mod predictor;
