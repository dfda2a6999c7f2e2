//! Logistic regression over a feature row.
//!
//! Covers both linear pieces of the pipeline: the cascade gate over the
//! scaled features, and the meta-combiner over the four base-model
//! probabilities. Weights are exported to JSON at training time.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::Error;

/// Logistic regression weights: p = sigmoid(bias + w · x).
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticModel {
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl LogisticModel {
    /// Load weights from a JSON export.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let file = File::open(path)?;
        let model: Self = serde_json::from_reader(BufReader::new(file))?;
        if model.weights.is_empty() {
            return Err(Error::Model(format!(
                "{}: empty weight vector",
                path.display()
            )));
        }
        Ok(model)
    }

    pub fn dimension(&self) -> usize {
        self.weights.len()
    }

    /// Positive-class probability for one row.
    pub fn probability(&self, row: &[f32]) -> Result<f64, Error> {
        if row.len() != self.weights.len() {
            return Err(Error::Model(format!(
                "logistic input has {} values, model expects {}",
                row.len(),
                self.weights.len()
            )));
        }
        let z = self.bias
            + self
                .weights
                .iter()
                .zip(row)
                .map(|(w, &x)| w * x as f64)
                .sum::<f64>();
        Ok(sigmoid(z))
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
