//! Edge case and boundary condition tests.

use pascalvoc_ap::candidates::ClassCandidates;
use pascalvoc_ap::config::EvalConfig;
use pascalvoc_ap::evaluator::{evaluate_class, get_ap};
use pascalvoc_ap::matching::{match_predictions, MatchKind};
use pascalvoc_ap::metrics::ap::voc_ap;
use pascalvoc_ap::metrics::iou::calculate_iou;
use pascalvoc_ap::types::{BoundingBox, Detection, GroundTruth, ImageId};

fn det(confidence: f64, ltrb: [f64; 4], image: u64) -> Detection {
    Detection::from_ltrb("car", confidence, ltrb[0], ltrb[1], ltrb[2], ltrb[3], image)
}

fn gt(ltrb: [f64; 4], image: u64) -> GroundTruth {
    GroundTruth::from_ltrb("car", ltrb[0], ltrb[1], ltrb[2], ltrb[3], image)
}

// ============================================================================
// MATCHING EDGE CASES
// ============================================================================

#[test]
fn test_empty_predictions_with_ground_truth() {
    let ground_truths = vec![gt([10.0, 10.0, 50.0, 50.0], 1)];

    let candidates = ClassCandidates::extract(&[], &ground_truths, "car");
    let eval = evaluate_class(candidates, &EvalConfig::default()).unwrap();

    assert!(eval.curve.is_empty());
    assert!(eval.ious.is_empty());
    assert_eq!(eval.ap, 0.0);
    assert_eq!(eval.stats.missed_ground_truths, 1);
}

#[test]
fn test_many_predictions_one_ground_truth() {
    let ground_truths = vec![gt([50.0, 50.0, 150.0, 150.0], 1)];
    let detections = vec![
        det(0.95, [50.0, 50.0, 150.0, 150.0], 1),
        det(0.90, [52.0, 52.0, 152.0, 152.0], 1),
        det(0.85, [48.0, 48.0, 148.0, 148.0], 1),
        det(0.80, [55.0, 55.0, 155.0, 155.0], 1),
    ];

    let mut candidates = ClassCandidates::extract(&detections, &ground_truths, "car");
    let matches = match_predictions(&candidates.predictions, &mut candidates.ground_truth_index, 0.5);

    let tp_count = matches.iter().filter(|m| m.is_match()).count();
    assert_eq!(tp_count, 1, "Only one prediction should match the GT");
    assert!(matches[0].is_match());
    assert!(matches[1..].iter().all(|m| m.kind == MatchKind::Duplicate));
}

#[test]
fn test_one_prediction_many_ground_truths() {
    let ground_truths = vec![
        gt([10.0, 10.0, 60.0, 60.0], 1),
        gt([100.0, 100.0, 150.0, 150.0], 1),
        gt([200.0, 200.0, 250.0, 250.0], 1),
    ];
    let detections = vec![det(0.9, [100.0, 100.0, 150.0, 150.0], 1)];

    let mut candidates = ClassCandidates::extract(&detections, &ground_truths, "car");
    let matches = match_predictions(&candidates.predictions, &mut candidates.ground_truth_index, 0.5);

    assert_eq!(matches[0].ground_truth_idx, Some(1));
    let used: Vec<bool> = candidates.ground_truth_index[&ImageId::Number(1)]
        .iter()
        .map(|entry| entry.used)
        .collect();
    assert_eq!(used, vec![false, true, false]);
}

#[test]
fn test_equal_confidence_keeps_input_order() {
    // Both predictions overlap the only box fully; the earlier one claims it
    let ground_truths = vec![gt([0.0, 0.0, 10.0, 10.0], 1)];
    let detections = vec![
        det(0.5, [0.0, 0.0, 10.0, 10.0], 1),
        det(0.5, [0.0, 0.0, 10.0, 12.0], 1),
    ];

    let mut candidates = ClassCandidates::extract(&detections, &ground_truths, "car");
    assert_eq!(candidates.predictions[0].bbox.bottom, 10.0);

    let matches = match_predictions(&candidates.predictions, &mut candidates.ground_truth_index, 0.5);
    assert_eq!(matches[0].iou, 1.0);
    assert!(matches[0].is_match());
    assert!(!matches[1].is_match());
}

#[test]
fn test_zero_threshold_matches_any_unused_box() {
    let ground_truths = vec![gt([0.0, 0.0, 10.0, 10.0], 1)];
    let detections = vec![det(0.9, [500.0, 500.0, 510.0, 510.0], 1)];

    let report = get_ap(&detections, &ground_truths, "car", &EvalConfig::with_iou_threshold(0.0))
        .unwrap();
    assert_eq!(report.ap("car"), Some(1.0));
}

#[test]
fn test_threshold_of_one_requires_exact_overlap() {
    let ground_truths = vec![gt([0.0, 0.0, 10.0, 10.0], 1), gt([20.0, 0.0, 30.0, 10.0], 1)];
    let detections = vec![
        det(0.9, [0.0, 0.0, 10.0, 10.0], 1),
        det(0.8, [20.0, 0.0, 30.0, 11.0], 1),
    ];

    let report = get_ap(&detections, &ground_truths, "car", &EvalConfig::with_iou_threshold(1.0))
        .unwrap();
    assert_eq!(report.class("car").unwrap().matches, vec![true, false]);
}

#[test]
fn test_string_and_numeric_image_ids_differ() {
    let ground_truths = vec![GroundTruth::from_ltrb("car", 0.0, 0.0, 10.0, 10.0, "1")];
    let detections = vec![Detection::from_ltrb("car", 0.9, 0.0, 0.0, 10.0, 10.0, 1u64)];

    let report = get_ap(&detections, &ground_truths, "car", &EvalConfig::default()).unwrap();
    assert_eq!(report.ap("car"), Some(0.0));
}

// ============================================================================
// GEOMETRY EDGE CASES
// ============================================================================

#[test]
fn test_degenerate_prediction_is_false_positive() {
    let ground_truths = vec![gt([0.0, 0.0, 10.0, 10.0], 1)];
    let detections = vec![det(0.9, [10.0, 10.0, 0.0, 0.0], 1)];

    let report = get_ap(&detections, &ground_truths, "car", &EvalConfig::default()).unwrap();
    let car = report.class("car").unwrap();
    assert_eq!(car.ious, vec![0.0]);
    assert_eq!(car.ap, 0.0);
}

#[test]
fn test_single_pixel_boxes() {
    // Inclusive edges: a box with left == right is one pixel wide
    let point = BoundingBox::new(5.0, 5.0, 5.0, 5.0);
    assert_eq!(calculate_iou(&point, &point), 1.0);
    assert_eq!(point.area(), 1.0);
}

#[test]
fn test_negative_coordinates() {
    let bbox1 = BoundingBox::new(-10.0, -10.0, -1.0, -1.0);
    let bbox2 = BoundingBox::new(-10.0, -10.0, -1.0, -1.0);
    assert_eq!(calculate_iou(&bbox1, &bbox2), 1.0);
}

#[test]
fn test_huge_coordinates() {
    let bbox1 = BoundingBox::new(0.0, 0.0, 1e6, 1e6);
    let bbox2 = BoundingBox::new(0.0, 0.0, 1e6, 5e5);
    let iou = calculate_iou(&bbox1, &bbox2);
    assert!(iou > 0.49 && iou < 0.51, "got {}", iou);
}

// ============================================================================
// INTEGRATION EDGE CASES
// ============================================================================

#[test]
fn test_duplicate_recall_points_do_not_add_area() {
    // Recall stays at 0.5 for three ranks; only the first counts
    let result = voc_ap(&[1.0, 0.5, 1.0 / 3.0], &[0.5, 0.5, 0.5]);
    assert_eq!(result.ap, 0.5);
}

#[test]
fn test_late_true_positive_lifts_earlier_precision() {
    // FP then TP: envelope raises the first rank to 0.5
    let result = voc_ap(&[0.0, 0.5], &[0.0, 1.0]);
    assert_eq!(result.precisions, vec![0.5, 0.5, 0.5, 0.0]);
    assert_eq!(result.ap, 0.5);
}
