// ============================================================
// Layer 3 — Chart and Metrics Domain Types
// ============================================================
// Plain data handed to a VisualizationSink:
//
//   ChartTarget  — where a chart goes (name + tab)
//   Point        — one {x, y} scatter point
//   AxisLabels   — axis captions
//   EpochMetrics — one row of training progress
//
// Metrics recorded per epoch:
//   - loss / mse         : mean squared error on the training set
//   - val_loss / val_mse : mean squared error on the validation set
//                          (None when the validation set is empty)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartTarget {
    pub name: String,
    pub tab:  String,
}

impl ChartTarget {
    pub fn new(name: impl Into<String>, tab: impl Into<String>) -> Self {
        Self { name: name.into(), tab: tab.into() }
    }
}

/// File-system friendly version of a chart or tab name,
/// e.g. "Temp vs Apparent Temp" → "temp_vs_apparent_temp"
pub fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabels {
    pub x_label: String,
    pub y_label: String,
}

impl AxisLabels {
    pub fn new(x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self { x_label: x_label.into(), y_label: y_label.into() }
    }
}

/// One row of training progress for a single epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Average MSE loss over all training batches
    pub loss: f64,

    /// MSE metric over the training set
    pub mse: f64,

    /// Average MSE loss on the validation set
    pub val_loss: Option<f64>,

    /// MSE metric over the validation set
    pub val_mse: Option<f64>,
}

impl EpochMetrics {
    pub fn new(
        epoch:    usize,
        loss:     f64,
        mse:      f64,
        val_loss: Option<f64>,
        val_mse:  Option<f64>,
    ) -> Self {
        Self { epoch, loss, mse, val_loss, val_mse }
    }

    /// Returns true if this epoch improved over the previous best val_loss.
    /// Epochs without a validation loss never count as an improvement.
    pub fn is_improvement(&self, best_val_loss: f64) -> bool {
        self.val_loss.is_some_and(|v| v < best_val_loss)
    }
}
