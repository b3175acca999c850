// ============================================================
// Layer 4 — Regression Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec<Sample> into
// two float tensors:
//
//   Input:  N Samples, each with `width` features
//   Output: inputs  [N, width]
//           targets [N, 1]
//
// All features are flattened row by row and reshaped:
//   [s1_f1, s1_f2, ..., sN_fW] → [N, W]
//
// Widths are checked against the schema before any batch is
// built (see ml::trainer::check_shapes), so every row here has
// the same length.
//
// Reference: Burn Book §4 (Batcher)

use std::marker::PhantomData;

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::Sample;

// ─── RegressionBatch ──────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct RegressionBatch<B: Backend> {
    /// Feature rows — shape: [batch_size, width]
    pub inputs: Tensor<B, 2>,

    /// Labels as length-1 rows — shape: [batch_size, 1]
    pub targets: Tensor<B, 2>,
}

// ─── RegressionBatcher ────────────────────────────────────────────────────────
/// Stateless; the data loader passes the target device to every call.
#[derive(Clone, Debug)]
pub struct RegressionBatcher<B: Backend> {
    backend: PhantomData<B>,
}

impl<B: Backend> RegressionBatcher<B> {
    pub fn new() -> Self {
        Self { backend: PhantomData }
    }
}

impl<B: Backend> Batcher<B, Sample, RegressionBatch<B>> for RegressionBatcher<B> {
    fn batch(&self, items: Vec<Sample>, device: &B::Device) -> RegressionBatch<B> {
        let batch_size = items.len();
        let width      = items.first().map(Sample::width).unwrap_or(0);

        let flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.features.iter().copied())
            .collect();

        let labels: Vec<f32> = items.iter().map(|s| s.label).collect();

        let inputs = Tensor::<B, 2>::from_data(
            TensorData::new(flat, [batch_size, width]),
            device,
        );

        let targets = Tensor::<B, 2>::from_data(
            TensorData::new(labels, [batch_size, 1]),
            device,
        );

        RegressionBatch { inputs, targets }
    }
}
