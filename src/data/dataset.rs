use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// One vectorized record: feature values in schema order plus the label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub features: Vec<f32>,
    pub label:    f32,
}

impl Sample {
    pub fn new(features: Vec<f32>, label: f32) -> Self {
        Self { features, label }
    }

    pub fn width(&self) -> usize {
        self.features.len()
    }
}

pub struct WeatherDataset {
    samples: Vec<Sample>,
}

impl WeatherDataset {
    pub fn new(samples: Vec<Sample>) -> Self { Self { samples } }
}

impl Dataset<Sample> for WeatherDataset {
    fn get(&self, index: usize) -> Option<Sample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
