// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records training metrics to a CSV file after each epoch.
//
// Metrics recorded per epoch:
//   - epoch:    the epoch number (1, 2, 3, ...)
//   - loss:     average MSE loss over the training batches
//   - mse:      MSE over every training row
//   - val_loss: average MSE loss over the validation batches
//   - val_mse:  MSE over every validation row
//
// Validation columns are left empty when the run had no
// validation rows.
//
// Example CSV output:
//   epoch,loss,mse,val_loss,val_mse
//   1,182.402100,181.977300,97.120400,96.884000
//   2,61.019800,60.871200,40.337100,40.211500
//   ...
//
// The file is truncated on the first write of a logger and
// again whenever epoch 1 comes in, so each training run gets
// its own learning curve even when the logger is reused.

use anyhow::Result;
use std::{
    cell::Cell,
    fs::{self, File, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::chart::EpochMetrics;

pub const METRICS_HEADER: &str = "epoch,loss,mse,val_loss,val_mse";

/// Logs epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
    started:  Cell<bool>,
}

impl MetricsLogger {
    /// Nothing is written until the first call to `log`.
    pub fn new(csv_path: impl Into<PathBuf>) -> Self {
        Self { csv_path: csv_path.into(), started: Cell::new(false) }
    }

    /// Append one epoch's metrics as a new row in the CSV.
    /// Epoch 1 starts a fresh file.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = if self.started.get() && m.epoch > 1 {
            OpenOptions::new().append(true).open(&self.csv_path)?
        } else {
            if let Some(parent) = self.csv_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut f = File::create(&self.csv_path)?;
            writeln!(f, "{METRICS_HEADER}")?;
            self.started.set(true);
            tracing::debug!("Created metrics CSV: '{}'", self.csv_path.display());
            f
        };

        writeln!(
            f,
            "{},{:.6},{:.6},{},{}",
            m.epoch,
            m.loss,
            m.mse,
            fmt_cell(m.val_loss),
            fmt_cell(m.val_mse),
        )?;

        tracing::debug!(
            "Logged epoch {} metrics: loss={:.4}, val_loss={:?}",
            m.epoch,
            m.loss,
            m.val_loss,
        );

        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

fn fmt_cell(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.6}")).unwrap_or_default()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_header_then_rows() {
        let dir    = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path().join("run/metrics.csv"));
        assert!(!logger.csv_path().exists());

        logger.log(&EpochMetrics::new(1, 2.5, 2.4, Some(3.0), Some(2.9))).unwrap();
        logger.log(&EpochMetrics::new(2, 1.5, 1.4, None, None)).unwrap();

        let text  = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], METRICS_HEADER);
        assert_eq!(lines[1], "1,2.500000,2.400000,3.000000,2.900000");
        assert_eq!(lines[2], "2,1.500000,1.400000,,");
    }

    #[test]
    fn test_new_logger_truncates_previous_run() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.csv");

        let first = MetricsLogger::new(&path);
        first.log(&EpochMetrics::new(1, 1.0, 1.0, None, None)).unwrap();
        first.log(&EpochMetrics::new(2, 1.0, 1.0, None, None)).unwrap();

        let second = MetricsLogger::new(&path);
        second.log(&EpochMetrics::new(1, 1.0, 1.0, None, None)).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_epoch_one_restarts_the_curve() {
        let dir    = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path().join("metrics.csv"));

        for epoch in [1, 2, 3, 1, 2] {
            logger.log(&EpochMetrics::new(epoch, 1.0, 1.0, None, None)).unwrap();
        }

        let text  = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], METRICS_HEADER);
        assert!(lines[1].starts_with("1,"));
        assert!(lines[2].starts_with("2,"));
    }
}
