//! Greedy matching of ranked predictions to ground truth.

use crate::candidates::{GroundTruthIndex, RankedPrediction};
use crate::metrics::iou::calculate_iou;
use log::trace;
use std::cmp::Ordering;

/// Why a prediction was or was not counted as a true positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Claimed an unused ground-truth box with IoU at or above the threshold.
    TruePositive,
    /// Best overlap cleared the threshold, but that box was already claimed.
    Duplicate,
    /// Best overlap is below the threshold.
    BelowThreshold,
    /// The prediction's image has no ground truth of this class.
    NoGroundTruth,
}

/// Outcome for a single ranked prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionMatch {
    /// Best IoU against the image's ground truth, 0.0 if there is none.
    pub iou: f64,
    /// Index of the best-IoU entry within the image's ground-truth list.
    pub ground_truth_idx: Option<usize>,
    pub kind: MatchKind,
}

impl PredictionMatch {
    pub fn is_match(&self) -> bool {
        self.kind == MatchKind::TruePositive
    }
}

/// Match each prediction, in rank order, to the best-IoU ground truth in its image.
///
/// For every prediction the whole ground-truth list of its image is scanned and
/// the first entry with the maximum IoU is selected, whether or not it is already
/// used. The prediction is a match only if that IoU is `>= iou_threshold` and the
/// entry is still unused; the entry is then marked used. A prediction whose best
/// entry is already used is not reassigned to another box.
///
/// Returns one [`PredictionMatch`] per prediction, aligned with `predictions`.
///
/// # Example
///
/// ```
/// use pascalvoc_ap::candidates::ClassCandidates;
/// use pascalvoc_ap::matching::{match_predictions, MatchKind};
/// use pascalvoc_ap::types::{Detection, GroundTruth};
///
/// let detections = vec![
///     Detection::from_ltrb("cat", 0.9, 0.0, 0.0, 10.0, 10.0, 1u64),
///     Detection::from_ltrb("cat", 0.8, 0.0, 0.0, 10.0, 10.0, 1u64),
/// ];
/// let ground_truths = vec![GroundTruth::from_ltrb("cat", 0.0, 0.0, 10.0, 10.0, 1u64)];
///
/// let mut candidates = ClassCandidates::extract(&detections, &ground_truths, "cat");
/// let matches = match_predictions(&candidates.predictions, &mut candidates.ground_truth_index, 0.5);
/// assert_eq!(matches[0].kind, MatchKind::TruePositive);
/// assert_eq!(matches[1].kind, MatchKind::Duplicate);
/// ```
pub fn match_predictions(
    predictions: &[RankedPrediction],
    ground_truth_index: &mut GroundTruthIndex,
    iou_threshold: f64,
) -> Vec<PredictionMatch> {
    predictions
        .iter()
        .enumerate()
        .map(|(rank, pred)| {
            let outcome = match ground_truth_index.get_mut(&pred.image_id) {
                Some(entries) if !entries.is_empty() => {
                    let mut best_idx = 0;
                    let mut best_iou = calculate_iou(&pred.bbox, &entries[0].bbox);
                    for (idx, entry) in entries.iter().enumerate().skip(1) {
                        let iou = calculate_iou(&pred.bbox, &entry.bbox);
                        if iou > best_iou {
                            best_iou = iou;
                            best_idx = idx;
                        }
                    }

                    let best = &mut entries[best_idx];
                    // A NaN threshold or IoU never matches
                    let kind = if matches!(best_iou.partial_cmp(&iou_threshold), Some(Ordering::Less) | None) {
                        MatchKind::BelowThreshold
                    } else if best.used {
                        MatchKind::Duplicate
                    } else {
                        best.used = true;
                        MatchKind::TruePositive
                    };

                    PredictionMatch {
                        iou: best_iou,
                        ground_truth_idx: Some(best_idx),
                        kind,
                    }
                }
                _ => PredictionMatch {
                    iou: 0.0,
                    ground_truth_idx: None,
                    kind: MatchKind::NoGroundTruth,
                },
            };

            trace!(
                "rank {} (image {}, confidence {:.4}): iou {:.4} -> {:?}",
                rank,
                pred.image_id,
                pred.confidence,
                outcome.iou,
                outcome.kind
            );
            outcome
        })
        .collect()
}

/// Split matches into the aligned `(ious, is_match)` sequences.
pub fn split_matches(matches: &[PredictionMatch]) -> (Vec<f64>, Vec<bool>) {
    matches.iter().map(|m| (m.iou, m.is_match())).unzip()
}
