//! Pretrained model artifacts behind a common scoring capability.
//!
//! Tree ensembles run as ONNX sessions over the raw ternary features; the
//! logistic models and the feed-forward network consume the standard-scaled
//! view. `ModelInput` carries both views so each scorer picks the one it was
//! trained on.

pub mod bundle;
pub mod linear;
pub mod onnx;
pub mod scaler;

pub use bundle::{BundleConfig, ModelBundle};
pub use linear::LogisticModel;
pub use onnx::OnnxScorer;
pub use scaler::StandardScaler;

use crate::Error;

/// Which view of the feature row a model consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// The ternary features as extracted.
    Raw,
    /// The standard-scaled features.
    Scaled,
}

/// Both views of one feature row, computed once per prediction.
#[derive(Debug, Clone)]
pub struct ModelInput {
    pub raw: Vec<f32>,
    pub scaled: Vec<f32>,
}

impl ModelInput {
    pub fn view(&self, kind: InputKind) -> &[f32] {
        match kind {
            InputKind::Raw => &self.raw,
            InputKind::Scaled => &self.scaled,
        }
    }
}

/// A model scoring one feature row to a phishing probability in [0, 1].
pub trait Scorer: Send + Sync {
    fn name(&self) -> &str;

    fn input_kind(&self) -> InputKind;

    fn score(&self, input: &ModelInput) -> Result<f64, Error>;
}
