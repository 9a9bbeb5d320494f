//! Per-class evaluation and mAP aggregation.

use crate::candidates::ClassCandidates;
use crate::config::{EvalConfig, ZeroGroundTruthPolicy};
use crate::error::{ApError, Result};
use crate::matching::{match_predictions, split_matches};
use crate::metrics::ap::{calculate_map, voc_ap};
use crate::metrics::precision_recall::{build_precision_recall, PrecisionRecallCurve};
use crate::stats::MatchStats;
use crate::types::{Detection, GroundTruth};
use log::{debug, info, warn};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Key of the aggregate entry in [`ApReport::to_map`].
pub const MAP_KEY: &str = "mAP";

/// The classes to evaluate: a single label or a list of labels.
///
/// Repeated labels are kept once, at their first position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassLabels(Vec<String>);

impl ClassLabels {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let labels = labels
            .into_iter()
            .map(|label| label.as_ref().to_string())
            .filter(|label| seen.insert(label.clone()))
            .collect();
        Self(labels)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ClassLabels {
    fn from(label: &str) -> Self {
        Self::new([label])
    }
}

impl From<String> for ClassLabels {
    fn from(label: String) -> Self {
        Self::new([label])
    }
}

impl<S: AsRef<str>> From<Vec<S>> for ClassLabels {
    fn from(labels: Vec<S>) -> Self {
        Self::new(labels)
    }
}

impl<S: AsRef<str>> From<&[S]> for ClassLabels {
    fn from(labels: &[S]) -> Self {
        Self::new(labels)
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for ClassLabels {
    fn from(labels: [S; N]) -> Self {
        Self::new(labels)
    }
}

/// Result of evaluating one class.
#[derive(Debug, Clone)]
pub struct ClassEvaluation {
    pub label: String,
    pub ap: f64,
    /// Best IoU of each prediction, in rank order.
    pub ious: Vec<f64>,
    /// Whether each prediction is a true positive, in rank order.
    pub matches: Vec<bool>,
    /// Cumulative precision/recall per rank. Empty when the class has no ground truth.
    pub curve: PrecisionRecallCurve,
    /// Interpolated precision envelope including the boundary sentinels.
    pub interpolated_precisions: Vec<f64>,
    /// Recall including the boundary sentinels.
    pub padded_recalls: Vec<f64>,
    pub stats: MatchStats,
}

/// AP per requested class plus their mean.
#[derive(Debug, Clone)]
pub struct ApReport {
    pub iou_threshold: f64,
    /// In request order.
    pub classes: Vec<ClassEvaluation>,
    /// Unweighted mean of the class APs.
    pub map: f64,
}

impl ApReport {
    /// AP of a single class, if it was evaluated.
    pub fn ap(&self, label: &str) -> Option<f64> {
        self.class(label).map(|eval| eval.ap)
    }

    pub fn class(&self, label: &str) -> Option<&ClassEvaluation> {
        self.classes.iter().find(|eval| eval.label == label)
    }

    /// Flatten into `label -> AP` with an extra `"mAP"` entry.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        let mut map: BTreeMap<String, f64> = self
            .classes
            .iter()
            .map(|eval| (eval.label.clone(), eval.ap))
            .collect();
        map.insert(MAP_KEY.to_string(), self.map);
        map
    }
}

/// Evaluate a single class.
///
/// Consumes the candidates, so the ground-truth match state cannot leak into
/// another evaluation. Independent classes can be evaluated on separate
/// threads, each with its own [`ClassCandidates`].
///
/// # Errors
///
/// Returns [`ApError::ZeroGroundTruth`] if the class has no ground truth and
/// `config.zero_ground_truth` is [`ZeroGroundTruthPolicy::Error`], and
/// [`ApError::InvalidThreshold`] if the IoU threshold is outside [0, 1].
pub fn evaluate_class(candidates: ClassCandidates, config: &EvalConfig) -> Result<ClassEvaluation> {
    config.validate()?;

    let ClassCandidates {
        label,
        predictions,
        mut ground_truth_index,
        ground_truth_count,
    } = candidates;

    if ground_truth_count == 0 && config.zero_ground_truth == ZeroGroundTruthPolicy::Error {
        return Err(ApError::ZeroGroundTruth(format!(
            "Class '{}' has no ground-truth boxes",
            label
        )));
    }

    let outcomes = match_predictions(&predictions, &mut ground_truth_index, config.iou_threshold);
    let stats = MatchStats::from_matches(&outcomes, &ground_truth_index);
    let (ious, matches) = split_matches(&outcomes);

    let curve = if ground_truth_count == 0 {
        warn!(
            "Class '{}' has no ground-truth boxes, scoring AP as 0.0 ({} predictions)",
            label,
            predictions.len()
        );
        PrecisionRecallCurve::default()
    } else {
        build_precision_recall(&matches, ground_truth_count)?
    };

    let voc = voc_ap(&curve.precisions, &curve.recalls);

    debug!(
        "Class '{}': AP {:.4} at IoU {} ({})",
        label,
        voc.ap,
        config.iou_threshold,
        stats.summary_string()
    );

    Ok(ClassEvaluation {
        label,
        ap: voc.ap,
        ious,
        matches,
        curve,
        interpolated_precisions: voc.precisions,
        padded_recalls: voc.recalls,
        stats,
    })
}

/// Extract the candidates of `label` and evaluate them.
pub fn evaluate_class_label(
    detections: &[Detection],
    ground_truths: &[GroundTruth],
    label: &str,
    config: &EvalConfig,
) -> Result<ClassEvaluation> {
    evaluate_class(ClassCandidates::extract(detections, ground_truths, label), config)
}

/// Compute PascalVOC AP for each requested class and their mAP.
///
/// Every class is evaluated independently with fresh ground-truth match state.
/// Repeated labels are evaluated once, so the mAP divides by the number of
/// distinct labels: `["cat", "cat"]` yields the AP of `cat`, not half of it.
///
/// # Arguments
///
/// * `detections` - All predicted boxes
/// * `ground_truths` - All ground-truth boxes
/// * `classes` - A single label or a list of labels
/// * `config` - IoU threshold and zero-ground-truth policy
///
/// # Errors
///
/// * [`ApError::EmptyClassList`] if no class is requested
/// * [`ApError::ReservedClassLabel`] if a class is named `"mAP"`
/// * [`ApError::InvalidThreshold`] if the IoU threshold is outside [0, 1]
/// * [`ApError::ZeroGroundTruth`] per the configured policy
///
/// # Example
///
/// ```
/// use pascalvoc_ap::config::EvalConfig;
/// use pascalvoc_ap::evaluator::get_ap;
/// use pascalvoc_ap::types::{Detection, GroundTruth};
///
/// let ground_truths = vec![
///     GroundTruth::from_ltrb("cat", 0.0, 0.0, 10.0, 10.0, "img.jpg"),
///     GroundTruth::from_ltrb("cat", 20.0, 20.0, 30.0, 30.0, "img.jpg"),
/// ];
/// let detections = vec![
///     Detection::from_ltrb("cat", 0.9, 0.0, 0.0, 10.0, 10.0, "img.jpg"),
///     Detection::from_ltrb("cat", 0.5, 20.0, 20.0, 30.0, 30.0, "img.jpg"),
/// ];
///
/// let report = get_ap(&detections, &ground_truths, "cat", &EvalConfig::default()).unwrap();
/// assert_eq!(report.ap("cat"), Some(1.0));
/// assert_eq!(report.map, 1.0);
/// ```
pub fn get_ap(
    detections: &[Detection],
    ground_truths: &[GroundTruth],
    classes: impl Into<ClassLabels>,
    config: &EvalConfig,
) -> Result<ApReport> {
    config.validate()?;

    let classes = classes.into();
    if classes.is_empty() {
        return Err(ApError::EmptyClassList(
            "At least one class label is required".to_string(),
        ));
    }
    if let Some(label) = classes.as_slice().iter().find(|label| label.as_str() == MAP_KEY) {
        return Err(ApError::ReservedClassLabel(format!(
            "'{}' is used for the mean over classes",
            label
        )));
    }

    let evaluations = classes
        .as_slice()
        .iter()
        .map(|label| evaluate_class_label(detections, ground_truths, label, config))
        .collect::<Result<Vec<_>>>()?;

    let class_aps: Vec<f64> = evaluations.iter().map(|eval| eval.ap).collect();
    let map = calculate_map(&class_aps)?;

    info!(
        "mAP {:.4} over {} classes at IoU {}",
        map,
        evaluations.len(),
        config.iou_threshold
    );

    Ok(ApReport {
        iou_threshold: config.iou_threshold,
        classes: evaluations,
        map,
    })
}

/// Compute the `label -> AP` mapping plus `"mAP"` at the given IoU threshold.
///
/// Classes without ground truth are rejected; use [`get_ap`] with a custom
/// [`EvalConfig`] to score them as zero instead.
///
/// # Example
///
/// ```
/// use pascalvoc_ap::evaluator::compute_ap;
/// use pascalvoc_ap::types::{Detection, GroundTruth};
///
/// let ground_truths = vec![GroundTruth::from_ltrb("cat", 0.0, 0.0, 10.0, 10.0, 1u64)];
/// let detections = vec![Detection::from_ltrb("cat", 0.9, 100.0, 100.0, 110.0, 110.0, 1u64)];
///
/// let aps = compute_ap(&detections, &ground_truths, ["cat"], 0.5).unwrap();
/// assert_eq!(aps["cat"], 0.0);
/// assert_eq!(aps["mAP"], 0.0);
/// ```
pub fn compute_ap(
    detections: &[Detection],
    ground_truths: &[GroundTruth],
    classes: impl Into<ClassLabels>,
    iou_threshold: f64,
) -> Result<BTreeMap<String, f64>> {
    let config = EvalConfig::with_iou_threshold(iou_threshold);
    Ok(get_ap(detections, ground_truths, classes, &config)?.to_map())
}

/// Every label present in the ground truth, sorted.
pub fn ground_truth_labels(ground_truths: &[GroundTruth]) -> Vec<String> {
    ground_truths
        .iter()
        .map(|gt| gt.label.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Evaluate every class that appears in the ground truth.
pub fn get_ap_for_all_classes(
    detections: &[Detection],
    ground_truths: &[GroundTruth],
    config: &EvalConfig,
) -> Result<ApReport> {
    get_ap(detections, ground_truths, ground_truth_labels(ground_truths), config)
}
