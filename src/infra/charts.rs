// ============================================================
// Layer 6 — Chart Writer
// ============================================================
// File-based VisualizationSink. Each chart becomes a data file
// any plotting tool can render:
//
//   charts/
//     charts/temp_vs_apparent_temp.json        ← scatterplot
//     charts/humidity_vs_apparent_temp.json    ← scatterplot
//     training/training_performance.csv        ← epoch metrics
//
// Scatter JSON layout:
//   { "name": ..., "tab": ..., "x_label": ..., "y_label": ...,
//     "values": [ { "x": 9.47, "y": 7.38 }, ... ] }

use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    cell::RefCell,
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::domain::chart::{slug, AxisLabels, ChartTarget, EpochMetrics, Point};
use crate::domain::traits::VisualizationSink;
use crate::infra::metrics::MetricsLogger;

#[derive(Serialize)]
struct ScatterFile<'a> {
    name:    &'a str,
    tab:     &'a str,
    x_label: &'a str,
    y_label: &'a str,
    values:  &'a [Point],
}

/// Writes every chart under one output directory.
pub struct ChartWriter {
    dir:     PathBuf,
    /// One metrics CSV per chart target, created on first epoch
    loggers: RefCell<HashMap<String, MetricsLogger>>,
}

impl ChartWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), loggers: RefCell::new(HashMap::new()) }
    }

    /// `<dir>/<tab>/<name>.<ext>` with both parts slugged
    pub fn chart_path(&self, target: &ChartTarget, ext: &str) -> PathBuf {
        self.dir.join(slug(&target.tab)).join(format!("{}.{ext}", slug(&target.name)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl VisualizationSink for ChartWriter {
    fn render_scatter(
        &self,
        target: &ChartTarget,
        points: &[Point],
        axes:   &AxisLabels,
    ) -> Result<()> {
        let path = self.chart_path(target, "json");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create '{}'", parent.display()))?;
        }

        let file = ScatterFile {
            name:    &target.name,
            tab:     &target.tab,
            x_label: &axes.x_label,
            y_label: &axes.y_label,
            values:  points,
        };
        fs::write(&path, serde_json::to_string_pretty(&file)?)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;

        tracing::info!("Rendered '{}' ({} points) → {}", target.name, points.len(), path.display());
        Ok(())
    }

    fn on_epoch_end(&self, target: &ChartTarget, metrics: &EpochMetrics) -> Result<()> {
        let mut loggers = self.loggers.borrow_mut();
        let logger = loggers
            .entry(target.name.clone())
            .or_insert_with(|| MetricsLogger::new(self.chart_path(target, "csv")));
        logger.log(metrics)
    }
}
