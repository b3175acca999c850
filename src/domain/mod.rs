// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, enums and traits describing the concepts
// of the regression pipeline.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or network calls
//   - Only plain Rust structs, enums, and traits
//
// Everything the other layers pass between each other
// (records, schemas, chart points, epoch metrics, errors)
// is defined here so each layer is testable on its own.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// One loaded observation (features + label)
pub mod record;

// The ordered feature column list and the column policy
pub mod schema;

// Chart targets, scatter points and per-epoch metrics
pub mod chart;

// Error taxonomy shared by every layer below the CLI
pub mod error;

// Per-run lifecycle state machine
pub mod run_state;

// Core abstractions (traits) that other layers implement
pub mod traits;
