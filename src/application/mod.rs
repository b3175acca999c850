// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (plotting, training or predicting).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No argument parsing or console output (that's Layer 1)
//   - Record sources and chart sinks arrive as trait objects
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Run stages: LoadedRun → VectorizedRun → SplitRun
pub mod pipeline;

// Dataset scatterplots
pub mod plot_use_case;

// The training workflow
pub mod train_use_case;

// Checkpoint-backed prediction
pub mod predict_use_case;
