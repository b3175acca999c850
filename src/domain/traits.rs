// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer only talks to record sources and
// visualization sinks through these traits:
//   - CsvLoader implements RecordSource (HTTP or local file)
//   - ChartWriter implements VisualizationSink (JSON + CSV files)
//   - tests use in-memory implementations of both
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::chart::{AxisLabels, ChartTarget, EpochMetrics, Point};
use crate::domain::error::LoadError;
use crate::domain::record::Record;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can produce the full list of records for a run.
pub trait RecordSource {
    /// Load every record, in source order.
    fn load_all(&self) -> Result<Vec<Record>, LoadError>;
}

// ─── VisualizationSink ────────────────────────────────────────────────────────
/// Receives chart data. Rendering is a side effect; nothing
/// returned here is consumed by the pipeline apart from errors.
pub trait VisualizationSink {
    /// Render a scatterplot of `points` into `target`.
    fn render_scatter(
        &self,
        target: &ChartTarget,
        points: &[Point],
        axes:   &AxisLabels,
    ) -> Result<()>;

    /// Called once at the end of every training epoch.
    fn on_epoch_end(&self, target: &ChartTarget, metrics: &EpochMetrics) -> Result<()>;
}
