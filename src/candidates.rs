//! Per-class candidate extraction.
//!
//! Narrows the full detection and ground-truth collections down to one class:
//! predictions ranked by confidence and a fresh per-image index of ground-truth
//! boxes whose match state belongs to a single evaluation pass.

use crate::types::{BoundingBox, Detection, GroundTruth, ImageId};
use std::collections::HashMap;

/// A prediction of the class under evaluation, in rank order.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPrediction {
    pub confidence: f64,
    pub bbox: BoundingBox,
    pub image_id: ImageId,
}

/// A ground-truth box together with its match state.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundTruthEntry {
    pub bbox: BoundingBox,
    /// Set once a prediction has been matched to this box.
    pub used: bool,
}

impl GroundTruthEntry {
    pub fn new(bbox: BoundingBox) -> Self {
        Self { bbox, used: false }
    }
}

/// Ground-truth boxes grouped by image, in input order within each image.
pub type GroundTruthIndex = HashMap<ImageId, Vec<GroundTruthEntry>>;

/// Everything needed to evaluate one class.
///
/// Owns its ground-truth index exclusively, so separate classes (or repeated
/// evaluations of the same class) never share match state.
#[derive(Debug, Clone)]
pub struct ClassCandidates {
    pub label: String,
    /// Sorted by confidence, descending. Ties keep input order.
    pub predictions: Vec<RankedPrediction>,
    pub ground_truth_index: GroundTruthIndex,
    /// Recall denominator. May be zero.
    pub ground_truth_count: usize,
}

impl ClassCandidates {
    /// Extract the predictions and ground truth for `label`.
    ///
    /// # Example
    ///
    /// ```
    /// use pascalvoc_ap::candidates::ClassCandidates;
    /// use pascalvoc_ap::types::{Detection, GroundTruth};
    ///
    /// let detections = vec![
    ///     Detection::from_ltrb("cat", 0.4, 0.0, 0.0, 10.0, 10.0, "a.jpg"),
    ///     Detection::from_ltrb("dog", 0.9, 0.0, 0.0, 10.0, 10.0, "a.jpg"),
    ///     Detection::from_ltrb("cat", 0.8, 5.0, 5.0, 15.0, 15.0, "a.jpg"),
    /// ];
    /// let ground_truths = vec![GroundTruth::from_ltrb("cat", 0.0, 0.0, 10.0, 10.0, "a.jpg")];
    ///
    /// let candidates = ClassCandidates::extract(&detections, &ground_truths, "cat");
    /// assert_eq!(candidates.predictions.len(), 2);
    /// assert_eq!(candidates.predictions[0].confidence, 0.8);
    /// assert_eq!(candidates.ground_truth_count, 1);
    /// ```
    pub fn extract(detections: &[Detection], ground_truths: &[GroundTruth], label: &str) -> Self {
        let (ground_truth_index, ground_truth_count) = build_ground_truth_index(ground_truths, label);
        Self {
            label: label.to_string(),
            predictions: rank_predictions(detections, label),
            ground_truth_index,
            ground_truth_count,
        }
    }
}

/// Filter detections to `label` and sort them by confidence, descending.
///
/// The sort is stable, so equal confidences keep their input order. NaN
/// confidences follow `f64::total_cmp` and are not rejected.
pub fn rank_predictions(detections: &[Detection], label: &str) -> Vec<RankedPrediction> {
    let mut predictions: Vec<RankedPrediction> = detections
        .iter()
        .filter(|det| det.label == label)
        .map(|det| RankedPrediction {
            confidence: det.confidence,
            bbox: det.bbox,
            image_id: det.image_id.clone(),
        })
        .collect();

    predictions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    predictions
}

/// Group the ground truth of `label` by image, with every entry unused.
///
/// Returns the index and the total number of boxes in it.
pub fn build_ground_truth_index(ground_truths: &[GroundTruth], label: &str) -> (GroundTruthIndex, usize) {
    let mut index: GroundTruthIndex = HashMap::new();
    let mut count = 0;

    for gt in ground_truths.iter().filter(|gt| gt.label == label) {
        index
            .entry(gt.image_id.clone())
            .or_default()
            .push(GroundTruthEntry::new(gt.bbox));
        count += 1;
    }

    (index, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_predictions_filters_and_sorts() {
        let detections = vec![
            Detection::from_ltrb("cat", 0.5, 0.0, 0.0, 1.0, 1.0, 1u64),
            Detection::from_ltrb("dog", 0.99, 0.0, 0.0, 1.0, 1.0, 1u64),
            Detection::from_ltrb("cat", 0.9, 0.0, 0.0, 1.0, 1.0, 2u64),
            Detection::from_ltrb("cat", 0.7, 0.0, 0.0, 1.0, 1.0, 3u64),
        ];

        let ranked = rank_predictions(&detections, "cat");
        let confidences: Vec<f64> = ranked.iter().map(|p| p.confidence).collect();
        assert_eq!(confidences, vec![0.9, 0.7, 0.5]);
        assert_eq!(ranked[0].image_id, ImageId::Number(2));
    }

    #[test]
    fn test_rank_predictions_stable_ties() {
        let detections = vec![
            Detection::from_ltrb("cat", 0.5, 0.0, 0.0, 1.0, 1.0, "first"),
            Detection::from_ltrb("cat", 0.8, 0.0, 0.0, 1.0, 1.0, "top"),
            Detection::from_ltrb("cat", 0.5, 0.0, 0.0, 1.0, 1.0, "second"),
            Detection::from_ltrb("cat", 0.5, 0.0, 0.0, 1.0, 1.0, "third"),
        ];

        let ranked = rank_predictions(&detections, "cat");
        let ids: Vec<String> = ranked.iter().map(|p| p.image_id.to_string()).collect();
        assert_eq!(ids, vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_ground_truth_index() {
        let ground_truths = vec![
            GroundTruth::from_ltrb("cat", 0.0, 0.0, 10.0, 10.0, "a"),
            GroundTruth::from_ltrb("dog", 0.0, 0.0, 10.0, 10.0, "a"),
            GroundTruth::from_ltrb("cat", 20.0, 20.0, 30.0, 30.0, "a"),
            GroundTruth::from_ltrb("cat", 5.0, 5.0, 8.0, 8.0, "b"),
        ];

        let (index, count) = build_ground_truth_index(&ground_truths, "cat");
        assert_eq!(count, 3);
        assert_eq!(index.len(), 2);

        let image_a = &index[&ImageId::from("a")];
        assert_eq!(image_a.len(), 2);
        assert_eq!(image_a[0].bbox.left, 0.0);
        assert_eq!(image_a[1].bbox.left, 20.0);
        assert!(index.values().flatten().all(|entry| !entry.used));
    }

    #[test]
    fn test_empty_inputs() {
        let candidates = ClassCandidates::extract(&[], &[], "cat");
        assert!(candidates.predictions.is_empty());
        assert!(candidates.ground_truth_index.is_empty());
        assert_eq!(candidates.ground_truth_count, 0);
    }

    #[test]
    fn test_extract_is_fresh_each_call() {
        let ground_truths = vec![GroundTruth::from_ltrb("cat", 0.0, 0.0, 10.0, 10.0, 1u64)];

        let mut first = ClassCandidates::extract(&[], &ground_truths, "cat");
        for entry in first.ground_truth_index.values_mut().flatten() {
            entry.used = true;
        }

        let second = ClassCandidates::extract(&[], &ground_truths, "cat");
        assert!(second.ground_truth_index.values().flatten().all(|entry| !entry.used));
    }
}
