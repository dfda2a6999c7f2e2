//! Phishsieve - phishing URL classifier
//!
//! A two-layer URL classifier: a fast logistic cascade resolves the
//! confidently-easy cases, and a four-model stacking ensemble handles
//! everything that falls inside the cascade's uncertain band.
//!
//! # Architecture
//!
//! 1. Deterministic feature extraction: URL string → 90 named features,
//!    each normalized to {-1, 0, 1}
//! 2. Layer 1: logistic cascade over the scaled vector; probabilities
//!    outside the (low, high) band are final
//! 3. Layer 2: XGBoost, LightGBM, CatBoost and a feed-forward network
//!    score the hard cases; a linear meta-combiner merges their outputs
//!
//! # Example
//!
//! ```no_run
//! use phishsieve::{ModelBundle, Predictor};
//!
//! let bundle = ModelBundle::load("models/".as_ref()).unwrap();
//! let predictor = Predictor::new(bundle);
//! let result = predictor.predict("https://www.google.com").unwrap();
//!
//! println!("Label: {}", result.label);
//! println!("Score: {:.4}", result.phishing_score);
//! println!("Risk: {}", result.risk);
//! ```

pub use error::Error;

// URL feature extraction and normalization
pub mod features;

// Pretrained model artifacts behind a common scoring capability
pub mod model;

// Cascade/stacking prediction pipeline
pub mod pipeline;

pub use features::{FeatureExtractor, FeatureVector};
pub use model::ModelBundle;
pub use pipeline::{BatchItem, PredictionResult, Predictor};

mod error {
    use std::fmt;

    #[derive(Debug)]
    pub enum Error {
        Io(std::io::Error),
        Json(serde_json::Error),
        Ort(ort::Error),
        Shape(ndarray::ShapeError),
        Model(String),
        Bundle(String),
    }

    impl fmt::Display for Error {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Error::Io(e) => write!(f, "IO error: {}", e),
                Error::Json(e) => write!(f, "JSON error: {}", e),
                Error::Ort(e) => write!(f, "ORT error: {}", e),
                Error::Shape(e) => write!(f, "Shape error: {}", e),
                Error::Model(e) => write!(f, "Model error: {}", e),
                Error::Bundle(e) => write!(f, "Bundle error: {}", e),
            }
        }
    }

    impl std::error::Error for Error {}

    impl From<std::io::Error> for Error {
        fn from(e: std::io::Error) -> Self {
            Error::Io(e)
        }
    }

    impl From<serde_json::Error> for Error {
        fn from(e: serde_json::Error) -> Self {
            Error::Json(e)
        }
    }

    impl From<ort::Error> for Error {
        fn from(e: ort::Error) -> Self {
            Error::Ort(e)
        }
    }

    impl From<ndarray::ShapeError> for Error {
        fn from(e: ndarray::ShapeError) -> Self {
            Error::Shape(e)
        }
    }
}
