//! Evaluation configuration.

use crate::error::{ApError, Result};
use serde::{Deserialize, Serialize};

/// Default IoU threshold used by PascalVOC.
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.5;

/// What to do with a requested class that has no ground-truth boxes.
///
/// Recall is `TP / ground_truth_count`, so such a class has no defined AP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroGroundTruthPolicy {
    /// Fail with [`ApError::ZeroGroundTruth`].
    #[default]
    Error,
    /// Score the class as AP = 0.0. It still counts toward the mAP denominator.
    ScoreZero,
}

/// Parameters for an AP evaluation run.
///
/// # Example
///
/// ```
/// use pascalvoc_ap::config::{EvalConfig, ZeroGroundTruthPolicy};
///
/// let config = EvalConfig::from_json_str(r#"{"iou_threshold": 0.75}"#).unwrap();
/// assert_eq!(config.iou_threshold, 0.75);
/// assert_eq!(config.zero_ground_truth, ZeroGroundTruthPolicy::Error);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Minimum IoU for a prediction to count as a true positive.
    pub iou_threshold: f64,
    pub zero_ground_truth: ZeroGroundTruthPolicy,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            zero_ground_truth: ZeroGroundTruthPolicy::default(),
        }
    }
}

impl EvalConfig {
    /// Create a configuration with the given IoU threshold and default policy.
    pub fn with_iou_threshold(iou_threshold: f64) -> Self {
        Self {
            iou_threshold,
            ..Self::default()
        }
    }

    /// Set the zero-ground-truth policy.
    pub fn zero_ground_truth(mut self, policy: ZeroGroundTruthPolicy) -> Self {
        self.zero_ground_truth = policy;
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json_str: &str) -> Result<Self> {
        let config: EvalConfig = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate that the IoU threshold is in the range [0.0, 1.0].
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err(ApError::InvalidThreshold(format!(
                "IoU threshold must be between 0.0 and 1.0, got {}",
                self.iou_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EvalConfig::default();
        assert_eq!(config.iou_threshold, 0.5);
        assert_eq!(config.zero_ground_truth, ZeroGroundTruthPolicy::Error);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_threshold() {
        assert!(EvalConfig::with_iou_threshold(1.5).validate().is_err());
        assert!(EvalConfig::with_iou_threshold(-0.1).validate().is_err());
        assert!(EvalConfig::with_iou_threshold(f64::NAN).validate().is_err());
        assert!(EvalConfig::with_iou_threshold(0.0).validate().is_ok());
        assert!(EvalConfig::with_iou_threshold(1.0).validate().is_ok());
    }

    #[test]
    fn test_from_json() {
        let config =
            EvalConfig::from_json_str(r#"{"zero_ground_truth": "score_zero"}"#).unwrap();
        assert_eq!(config.iou_threshold, 0.5);
        assert_eq!(config.zero_ground_truth, ZeroGroundTruthPolicy::ScoreZero);

        assert!(EvalConfig::from_json_str(r#"{"iou_threshold": 2.0}"#).is_err());
        assert!(EvalConfig::from_json_str(r#"{"zero_ground_truth": "maybe"}"#).is_err());
    }
}
