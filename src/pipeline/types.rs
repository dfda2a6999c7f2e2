//! Prediction result types.

use std::fmt;

use serde::Serialize;

use crate::features::FeatureVector;

/// Final verdict for a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Phishing,
    Legitimate,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Phishing => write!(f, "phishing"),
            Label::Legitimate => write!(f, "legitimate"),
        }
    }
}

/// Which layer produced the final probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    CascadeLr,
    StackingEnsemble,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::CascadeLr => write!(f, "cascade_lr"),
            Method::StackingEnsemble => write!(f, "stacking_ensemble"),
        }
    }
}

/// Confidence band for the final probability, per producing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    VeryHigh,
    High,
    Medium,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::VeryHigh => write!(f, "very_high"),
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
        }
    }
}

/// Risk tier derived from the phishing probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// Tier boundaries are inclusive at the lower edge.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            RiskLevel::Critical
        } else if score >= 0.7 {
            RiskLevel::High
        } else if score >= 0.5 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Critical => write!(f, "critical"),
            RiskLevel::High => write!(f, "high"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::Low => write!(f, "low"),
        }
    }
}

/// Full prediction output for one URL.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub url: String,
    #[serde(rename = "prediction")]
    pub label: Label,
    pub phishing_score: f64,
    pub legitimate_score: f64,
    pub confidence: Confidence,
    pub method: Method,
    pub is_easy_case: bool,
    #[serde(rename = "risk_level")]
    pub risk: RiskLevel,
    /// Extraction fell back to the all-zero vector; the score reflects the
    /// models' neutral-input behavior rather than real URL signals.
    pub degraded: bool,
    pub features: FeatureVector,
}

/// One entry of a batch response. Failures are recorded per URL so a bad
/// entry never drops its neighbors.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchItem {
    Ok(PredictionResult),
    Err(BatchError),
}

impl BatchItem {
    pub fn is_ok(&self) -> bool {
        matches!(self, BatchItem::Ok(_))
    }

    pub fn url(&self) -> &str {
        match self {
            BatchItem::Ok(result) => &result.url,
            BatchItem::Err(error) => &error.url,
        }
    }
}

/// Error marker for one failed batch entry.
#[derive(Debug, Clone, Serialize)]
pub struct BatchError {
    pub url: String,
    pub prediction: &'static str,
    pub error: String,
}

impl BatchError {
    pub fn new(url: String, error: String) -> Self {
        Self {
            url,
            prediction: "error",
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_boundaries() {
        assert_eq!(RiskLevel::from_score(1.0), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(0.9), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(0.8999), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0.7), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0.6999), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.5), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.4999), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
    }

    #[test]
    fn test_display_wire_names() {
        assert_eq!(Label::Phishing.to_string(), "phishing");
        assert_eq!(Method::CascadeLr.to_string(), "cascade_lr");
        assert_eq!(Confidence::VeryHigh.to_string(), "very_high");
        assert_eq!(RiskLevel::Critical.to_string(), "critical");
    }

    #[test]
    fn test_enum_serialization_matches_display() {
        assert_eq!(
            serde_json::to_string(&Method::StackingEnsemble).unwrap(),
            "\"stacking_ensemble\""
        );
        assert_eq!(
            serde_json::to_string(&Confidence::VeryHigh).unwrap(),
            "\"very_high\""
        );
        assert_eq!(
            serde_json::to_string(&Label::Legitimate).unwrap(),
            "\"legitimate\""
        );
    }

    #[test]
    fn test_batch_error_marker_shape() {
        let item = BatchItem::Err(BatchError::new("http://x".into(), "boom".into()));
        assert!(!item.is_ok());
        assert_eq!(item.url(), "http://x");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["prediction"], "error");
        assert_eq!(json["error"], "boom");
    }
}
