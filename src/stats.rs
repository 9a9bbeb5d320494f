//! Match statistics for a single class evaluation
//!
//! Breaks the false positives of one matching pass down by cause and counts
//! the ground-truth boxes that no prediction claimed.

use crate::candidates::GroundTruthIndex;
use crate::matching::{MatchKind, PredictionMatch};
use serde::{Deserialize, Serialize};

/// Counters collected from one class's matching pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    /// Number of ranked predictions of the class
    pub total_predictions: usize,

    /// Number of ground-truth boxes of the class
    pub total_ground_truths: usize,

    /// Predictions that claimed a ground-truth box
    pub true_positives: usize,

    /// Predictions whose best box was already claimed by a higher-ranked one
    pub duplicates: usize,

    /// Predictions whose best overlap is under the IoU threshold
    pub below_threshold: usize,

    /// Predictions on images with no ground truth of the class
    pub no_ground_truth: usize,

    /// Ground-truth boxes left unused after the pass
    pub missed_ground_truths: usize,
}

impl MatchStats {
    /// Create a new `MatchStats` with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally a finished matching pass
    ///
    /// `ground_truth_index` must be the index the pass mutated.
    pub fn from_matches(matches: &[PredictionMatch], ground_truth_index: &GroundTruthIndex) -> Self {
        let mut stats = Self::new();
        for m in matches {
            stats.record(m.kind);
        }

        for entry in ground_truth_index.values().flatten() {
            stats.total_ground_truths += 1;
            if !entry.used {
                stats.missed_ground_truths += 1;
            }
        }

        stats
    }

    /// Record one prediction outcome
    pub fn record(&mut self, kind: MatchKind) {
        self.total_predictions += 1;
        match kind {
            MatchKind::TruePositive => self.true_positives += 1,
            MatchKind::Duplicate => self.duplicates += 1,
            MatchKind::BelowThreshold => self.below_threshold += 1,
            MatchKind::NoGroundTruth => self.no_ground_truth += 1,
        }
    }

    /// Total number of false positives
    pub fn false_positives(&self) -> usize {
        self.duplicates + self.below_threshold + self.no_ground_truth
    }

    /// Get a formatted string summary of the statistics
    pub fn summary_string(&self) -> String {
        format!(
            "MatchStats {{ predictions: {}, ground_truths: {}, tp: {}, fp: {} (duplicate: {}, below_threshold: {}, no_ground_truth: {}), missed: {} }}",
            self.total_predictions,
            self.total_ground_truths,
            self.true_positives,
            self.false_positives(),
            self.duplicates,
            self.below_threshold,
            self.no_ground_truth,
            self.missed_ground_truths
        )
    }
}
