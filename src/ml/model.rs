use burn::{
    nn::{
        loss::{MseLoss, Reduction},
        Linear, LinearConfig,
    },
    prelude::*,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct LinearRegressionConfig {
    /// Number of features per row (FeatureSchema length)
    pub input_width: usize,
    #[config(default = 1)]
    pub units: usize,
}

impl LinearRegressionConfig {
    /// Always builds a freshly initialised model.
    pub fn init<B: Backend>(&self, device: &B::Device) -> LinearRegression<B> {
        let dense = LinearConfig::new(self.input_width, self.units).init(device);
        LinearRegression { dense }
    }
}

/// One dense layer, no activation: y = x·W + b
#[derive(Module, Debug)]
pub struct LinearRegression<B: Backend> {
    pub dense: Linear<B>,
}

impl<B: Backend> LinearRegression<B> {
    /// inputs: [batch, input_width] → predictions: [batch, units]
    pub fn forward(&self, inputs: Tensor<B, 2>) -> Tensor<B, 2> {
        self.dense.forward(inputs)
    }

    /// Mean squared error of the predictions against `targets` ([batch, 1]).
    pub fn forward_loss(
        &self,
        inputs:  Tensor<B, 2>,
        targets: Tensor<B, 2>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let predictions = self.forward(inputs);
        let loss = MseLoss::new().forward(predictions.clone(), targets, Reduction::Mean);
        (loss, predictions)
    }

    /// Declared input width (rows of the weight matrix)
    pub fn input_width(&self) -> usize {
        self.dense.weight.val().dims()[0]
    }
}
