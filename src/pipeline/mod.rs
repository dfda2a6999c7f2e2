//! Two-layer prediction pipeline.
//!
//! Layer 1 is a logistic cascade over the scaled feature vector: a
//! probability outside the (low, high) band is confident enough to be final.
//! Everything inside the band goes to layer 2, where the four base models
//! score independently and a logistic meta-combiner merges their outputs.

pub mod types;

pub use types::{BatchError, BatchItem, Confidence, Label, Method, PredictionResult, RiskLevel};

use log::{debug, warn};
use rayon::prelude::*;

use crate::features::FeatureExtractor;
use crate::model::{ModelBundle, ModelInput};
use crate::Error;

/// Cascade probabilities strictly below this resolve as easy legitimate.
pub const EASY_THRESHOLD_LOW: f64 = 0.15;
/// Cascade probabilities strictly above this resolve as easy phishing.
pub const EASY_THRESHOLD_HIGH: f64 = 0.85;

/// Orchestrates extraction, the cascade gate and the stacking ensemble.
pub struct Predictor {
    bundle: ModelBundle,
    extractor: FeatureExtractor,
    easy_low: f64,
    easy_high: f64,
}

impl Predictor {
    /// Predictor with live network probes for the SSL/DNS features.
    pub fn new(bundle: ModelBundle) -> Self {
        Self::with_extractor(bundle, FeatureExtractor::new())
    }

    /// Predictor that never touches the network.
    pub fn offline(bundle: ModelBundle) -> Self {
        Self::with_extractor(bundle, FeatureExtractor::offline())
    }

    /// The cascade band comes from the bundle's exported config.
    pub fn with_extractor(bundle: ModelBundle, extractor: FeatureExtractor) -> Self {
        let easy_low = bundle.config.easy_threshold_low;
        let easy_high = bundle.config.easy_threshold_high;
        Self {
            bundle,
            extractor,
            easy_low,
            easy_high,
        }
    }

    /// Override the cascade band, e.g. to trade latency for accuracy.
    pub fn with_thresholds(mut self, low: f64, high: f64) -> Self {
        self.easy_low = low;
        self.easy_high = high;
        self
    }

    /// Score one URL through the full pipeline.
    pub fn predict(&self, url: &str) -> Result<PredictionResult, Error> {
        let features = self.extractor.extract(url);
        let degraded = features.is_degraded();
        let raw = features.raw_row();
        let scaled = self.bundle.scaler.transform(&raw)?;
        let input = ModelInput { raw, scaled };

        let cascade_score = self.bundle.cascade.probability(&input.scaled)?;
        // A score sitting exactly on a threshold is not confident enough
        // to skip the ensemble.
        let is_easy = cascade_score < self.easy_low || cascade_score > self.easy_high;

        let (score, method, confidence) = if is_easy {
            debug!("cascade resolved {:?} at {:.4}", url, cascade_score);
            let confidence = if cascade_score < 0.05 || cascade_score > 0.95 {
                Confidence::VeryHigh
            } else {
                Confidence::High
            };
            (cascade_score, Method::CascadeLr, confidence)
        } else {
            let mut base_scores = Vec::with_capacity(self.bundle.base_models.len());
            for model in &self.bundle.base_models {
                let p = model.score(&input)?;
                debug!("{} scored {:.4} for {:?}", model.name(), p, url);
                base_scores.push(p as f32);
            }
            let score = self.bundle.meta.probability(&base_scores)?;
            let confidence = if score < 0.3 || score > 0.7 {
                Confidence::High
            } else {
                Confidence::Medium
            };
            (score, Method::StackingEnsemble, confidence)
        };

        let label = if score >= 0.5 {
            Label::Phishing
        } else {
            Label::Legitimate
        };

        Ok(PredictionResult {
            url: url.to_string(),
            label,
            phishing_score: score,
            legitimate_score: 1.0 - score,
            confidence,
            method,
            is_easy_case: is_easy,
            risk: RiskLevel::from_score(score),
            degraded,
            features,
        })
    }

    /// Score many URLs in parallel.
    ///
    /// Output order matches input order, and a failing entry is recorded as
    /// an error marker instead of dropping its neighbors.
    pub fn predict_batch(&self, urls: &[String]) -> Vec<BatchItem> {
        urls.par_iter()
            .map(|url| match self.predict(url) {
                Ok(result) => BatchItem::Ok(result),
                Err(e) => {
                    warn!("prediction failed for {:?}: {}", url, e);
                    BatchItem::Err(BatchError::new(url.clone(), e.to_string()))
                }
            })
            .collect()
    }
}
