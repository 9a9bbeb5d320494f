//! Precision and Recall calculation.

use crate::error::{ApError, Result};
use crate::types::PrecisionRecallPoint;

/// Cumulative precision and recall at every rank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrecisionRecallCurve {
    pub precisions: Vec<f64>,
    pub recalls: Vec<f64>,
    pub true_positives: usize,
    pub false_positives: usize,
}

impl PrecisionRecallCurve {
    /// Zip the curve into points, in rank order.
    pub fn points(&self) -> Vec<PrecisionRecallPoint> {
        self.precisions
            .iter()
            .zip(&self.recalls)
            .map(|(&precision, &recall)| PrecisionRecallPoint { precision, recall })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.precisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.precisions.is_empty()
    }
}

/// Calculate the precision-recall curve from ranked match decisions.
///
/// # Arguments
///
/// * `is_match` - Whether each prediction is a true positive (sorted by confidence)
/// * `num_ground_truth` - Total number of ground-truth boxes (the recall denominator)
///
/// # Errors
///
/// Returns [`ApError::ZeroGroundTruth`] if `num_ground_truth` is zero.
///
/// # Example
///
/// ```
/// use pascalvoc_ap::metrics::precision_recall::build_precision_recall;
///
/// let curve = build_precision_recall(&[true, false, true], 4).unwrap();
/// assert_eq!(curve.precisions, vec![1.0, 0.5, 2.0 / 3.0]);
/// assert_eq!(curve.recalls, vec![0.25, 0.25, 0.5]);
/// ```
pub fn build_precision_recall(is_match: &[bool], num_ground_truth: usize) -> Result<PrecisionRecallCurve> {
    if num_ground_truth == 0 {
        return Err(ApError::ZeroGroundTruth(
            "Recall is undefined without ground-truth boxes".to_string(),
        ));
    }

    let mut curve = PrecisionRecallCurve {
        precisions: Vec::with_capacity(is_match.len()),
        recalls: Vec::with_capacity(is_match.len()),
        ..Default::default()
    };

    for &matched in is_match {
        if matched {
            curve.true_positives += 1;
        } else {
            curve.false_positives += 1;
        }

        let tp = curve.true_positives as f64;
        curve.precisions.push(tp / (curve.true_positives + curve.false_positives) as f64);
        curve.recalls.push(tp / num_ground_truth as f64);
    }

    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_recall_curve() {
        let curve = build_precision_recall(&[true, true, false, true, false], 4).unwrap();
        assert_eq!(curve.len(), 5);
        assert_eq!(curve.true_positives, 3);
        assert_eq!(curve.false_positives, 2);

        // First detection: TP
        assert_eq!(curve.precisions[0], 1.0);
        assert_eq!(curve.recalls[0], 0.25);

        assert!((curve.precisions[4] - 0.6).abs() < 1e-10);
        assert_eq!(curve.recalls[4], 0.75);
    }

    #[test]
    fn test_all_false_positives() {
        let curve = build_precision_recall(&[false, false], 2).unwrap();
        assert_eq!(curve.precisions, vec![0.0, 0.0]);
        assert_eq!(curve.recalls, vec![0.0, 0.0]);
    }

    #[test]
    fn test_empty_predictions() {
        let curve = build_precision_recall(&[], 3).unwrap();
        assert!(curve.is_empty());
        assert!(curve.points().is_empty());
    }

    #[test]
    fn test_zero_ground_truth() {
        let result = build_precision_recall(&[false], 0);
        assert!(matches!(result, Err(ApError::ZeroGroundTruth(_))));
    }

    #[test]
    fn test_points() {
        let curve = build_precision_recall(&[true, false], 1).unwrap();
        let points = curve.points();
        assert_eq!(points[0], PrecisionRecallPoint { precision: 1.0, recall: 1.0 });
        assert_eq!(points[1], PrecisionRecallPoint { precision: 0.5, recall: 1.0 });
    }
}
