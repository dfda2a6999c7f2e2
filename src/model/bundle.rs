//! Loading and validation of the exported model directory.
//!
//! A bundle directory holds these artifacts:
//!
//! | file                     | role                                  |
//! |--------------------------|---------------------------------------|
//! | `feature_names.json`     | canonical feature order (validated)   |
//! | `config.json`            | cascade thresholds (optional)         |
//! | `lr_cascade.json`        | layer-1 logistic gate (scaled input)  |
//! | `scaler.json`            | standard scaler fitted at training    |
//! | `xgboost_stacking.onnx`  | layer-2 base model (raw input)        |
//! | `lightgbm_stacking.onnx` | layer-2 base model (raw input)        |
//! | `catboost_stacking.onnx` | layer-2 base model (raw input)        |
//! | `neural_network.onnx`    | layer-2 base model (scaled input)     |
//! | `meta_learner.json`      | logistic combiner over base outputs   |
//!
//! Loading is fail-loud: any missing file or dimension mismatch is an error,
//! never a silently degraded predictor. The one exception is `config.json`,
//! which may be absent; the thresholds then take their defaults.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::features::{FEATURE_COUNT, FEATURE_NAMES};
use crate::model::{InputKind, LogisticModel, OnnxScorer, Scorer, StandardScaler};
use crate::pipeline::{EASY_THRESHOLD_HIGH, EASY_THRESHOLD_LOW};
use crate::Error;

pub const FEATURE_NAMES_FILE: &str = "feature_names.json";
pub const CONFIG_FILE: &str = "config.json";
pub const CASCADE_FILE: &str = "lr_cascade.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const META_FILE: &str = "meta_learner.json";
pub const XGBOOST_FILE: &str = "xgboost_stacking.onnx";
pub const LIGHTGBM_FILE: &str = "lightgbm_stacking.onnx";
pub const CATBOOST_FILE: &str = "catboost_stacking.onnx";
pub const NEURAL_FILE: &str = "neural_network.onnx";

fn default_low() -> f64 {
    EASY_THRESHOLD_LOW
}

fn default_high() -> f64 {
    EASY_THRESHOLD_HIGH
}

/// Tunables exported alongside the models at training time.
#[derive(Debug, Clone, Deserialize)]
pub struct BundleConfig {
    #[serde(default = "default_low")]
    pub easy_threshold_low: f64,
    #[serde(default = "default_high")]
    pub easy_threshold_high: f64,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            easy_threshold_low: EASY_THRESHOLD_LOW,
            easy_threshold_high: EASY_THRESHOLD_HIGH,
        }
    }
}

/// The full set of pretrained artifacts the predictor runs on.
pub struct ModelBundle {
    pub(crate) cascade: LogisticModel,
    pub(crate) scaler: StandardScaler,
    pub(crate) base_models: Vec<Box<dyn Scorer>>,
    pub(crate) meta: LogisticModel,
    pub(crate) config: BundleConfig,
}

impl ModelBundle {
    /// Load every artifact from `dir` and cross-validate dimensions.
    pub fn load(dir: &Path) -> Result<Self, Error> {
        validate_feature_names(&dir.join(FEATURE_NAMES_FILE))?;
        let config = load_config(&dir.join(CONFIG_FILE))?;
        let cascade = LogisticModel::load(&dir.join(CASCADE_FILE))?;
        let scaler = StandardScaler::load(&dir.join(SCALER_FILE))?;
        let meta = LogisticModel::load(&dir.join(META_FILE))?;

        // The tree exports consume the raw ternary features; the network
        // was trained on the scaled view.
        let base_models: Vec<Box<dyn Scorer>> = vec![
            Box::new(OnnxScorer::load(
                "xgboost",
                &dir.join(XGBOOST_FILE),
                InputKind::Raw,
                "input",
                "probabilities",
            )?),
            Box::new(OnnxScorer::load(
                "lightgbm",
                &dir.join(LIGHTGBM_FILE),
                InputKind::Raw,
                "input",
                "probabilities",
            )?),
            Box::new(OnnxScorer::load(
                "catboost",
                &dir.join(CATBOOST_FILE),
                InputKind::Raw,
                "input",
                "probabilities",
            )?),
            Box::new(OnnxScorer::load(
                "neural_network",
                &dir.join(NEURAL_FILE),
                InputKind::Scaled,
                "input",
                "output",
            )?),
        ];

        let mut bundle = Self::from_parts(cascade, scaler, base_models, meta)?;
        bundle.config = config;
        info!(
            "model bundle loaded from {} ({} features, {} base models, cascade band {}..{})",
            dir.display(),
            FEATURE_COUNT,
            bundle.base_models.len(),
            bundle.config.easy_threshold_low,
            bundle.config.easy_threshold_high
        );
        Ok(bundle)
    }

    /// Assemble a bundle from already-constructed parts, with the default
    /// cascade thresholds.
    pub fn from_parts(
        cascade: LogisticModel,
        scaler: StandardScaler,
        base_models: Vec<Box<dyn Scorer>>,
        meta: LogisticModel,
    ) -> Result<Self, Error> {
        if cascade.dimension() != FEATURE_COUNT {
            return Err(Error::Bundle(format!(
                "cascade expects {} features, pipeline produces {}",
                cascade.dimension(),
                FEATURE_COUNT
            )));
        }
        if scaler.dimension() != FEATURE_COUNT {
            return Err(Error::Bundle(format!(
                "scaler expects {} features, pipeline produces {}",
                scaler.dimension(),
                FEATURE_COUNT
            )));
        }
        if base_models.is_empty() {
            return Err(Error::Bundle("no base models".to_string()));
        }
        if meta.dimension() != base_models.len() {
            return Err(Error::Bundle(format!(
                "meta-combiner expects {} inputs, bundle has {} base models",
                meta.dimension(),
                base_models.len()
            )));
        }

        Ok(Self {
            cascade,
            scaler,
            base_models,
            meta,
            config: BundleConfig::default(),
        })
    }
}

/// The exported feature order must match the extractor's canonical order
/// exactly; anything else means the weights were fitted against different
/// columns.
fn validate_feature_names(path: &Path) -> Result<(), Error> {
    let file = File::open(path)?;
    let names: Vec<String> = serde_json::from_reader(BufReader::new(file))?;
    if names.len() != FEATURE_COUNT {
        return Err(Error::Bundle(format!(
            "{}: {} feature names, expected {}",
            path.display(),
            names.len(),
            FEATURE_COUNT
        )));
    }
    for (i, (exported, canonical)) in names.iter().zip(FEATURE_NAMES).enumerate() {
        if exported != canonical {
            return Err(Error::Bundle(format!(
                "{}: feature {} is {:?}, expected {:?}",
                path.display(),
                i,
                exported,
                canonical
            )));
        }
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<BundleConfig, Error> {
    let config = match File::open(path) {
        Ok(file) => serde_json::from_reader(BufReader::new(file))?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("no {}, using default thresholds", path.display());
            BundleConfig::default()
        }
        Err(e) => return Err(e.into()),
    };
    if !(0.0..=1.0).contains(&config.easy_threshold_low)
        || !(0.0..=1.0).contains(&config.easy_threshold_high)
        || config.easy_threshold_low >= config.easy_threshold_high
    {
        return Err(Error::Bundle(format!(
            "invalid cascade band {}..{}",
            config.easy_threshold_low, config.easy_threshold_high
        )));
    }
    Ok(config)
}
