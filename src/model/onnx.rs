//! ONNX-backed scorers for the exported ensemble members.
//!
//! The tree ensembles (XGBoost, LightGBM, CatBoost) are exported with the
//! ZipMap wrapper disabled, so their probability output is a plain `[1, 2]`
//! tensor with the positive class last. The feed-forward network emits a
//! single sigmoid probability.

use std::path::Path;
use std::sync::Mutex;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;

use crate::model::{InputKind, ModelInput, Scorer};
use crate::Error;

pub struct OnnxScorer {
    name: String,
    input_kind: InputKind,
    input_name: &'static str,
    output_name: &'static str,
    session: Mutex<Session>,
}

impl OnnxScorer {
    /// Load a session from an exported `.onnx` file.
    pub fn load(
        name: &str,
        path: &Path,
        input_kind: InputKind,
        input_name: &'static str,
        output_name: &'static str,
    ) -> Result<Self, Error> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_file(path)?;

        Ok(Self {
            name: name.to_string(),
            input_kind,
            input_name,
            output_name,
            session: Mutex::new(session),
        })
    }
}

impl Scorer for OnnxScorer {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_kind(&self) -> InputKind {
        self.input_kind
    }

    fn score(&self, input: &ModelInput) -> Result<f64, Error> {
        let row = input.view(self.input_kind);
        let arr = Array2::from_shape_vec((1, row.len()), row.to_vec())?;
        let tensor = Tensor::from_array(arr)?;

        // Lock the mutex to get mutable access to the session
        let mut session = self
            .session
            .lock()
            .map_err(|_| Error::Model(format!("{}: session mutex poisoned", self.name)))?;

        let outputs = session.run(ort::inputs![self.input_name => tensor])?;
        let probs = outputs[self.output_name].try_extract_array::<f32>()?;
        let values: Vec<f32> = probs.iter().cloned().collect();

        // [p_neg, p_pos] from the tree exports, [p_pos] from the network
        let p = match values.as_slice() {
            [] => {
                return Err(Error::Model(format!("{}: empty output tensor", self.name)));
            }
            [single] => *single,
            [.., positive] => *positive,
        } as f64;

        if !p.is_finite() {
            return Err(Error::Model(format!(
                "{}: non-finite probability {}",
                self.name, p
            )));
        }
        Ok(p.clamp(0.0, 1.0))
    }
}
