//! Average Precision (AP) and mean Average Precision (mAP) calculation.

use crate::error::{ApError, Result};

/// AP together with the padded, interpolated curve it was integrated from.
#[derive(Debug, Clone, PartialEq)]
pub struct VocAp {
    pub ap: f64,
    /// Precision envelope, with the `0.0` sentinels at both ends.
    pub precisions: Vec<f64>,
    /// Recall, with the `0.0` and `1.0` sentinels at both ends.
    pub recalls: Vec<f64>,
}

/// Calculate PascalVOC Average Precision from a ranked precision-recall curve.
///
/// The curve is padded with `(recall 0.0, precision 0.0)` in front and
/// `(recall 1.0, precision 0.0)` at the end, precision is replaced by its
/// non-increasing envelope (scanning from the end), and the envelope is
/// integrated as a step function over every point where recall changes.
///
/// # Arguments
///
/// * `precisions` - Precision values in rank order
/// * `recalls` - Recall values in rank order, same length as `precisions`
///
/// If the lengths differ, the extra values of the longer slice are ignored.
///
/// # Example
///
/// ```
/// use pascalvoc_ap::metrics::ap::voc_ap;
///
/// let result = voc_ap(&[1.0, 0.5, 2.0 / 3.0], &[0.5, 0.5, 1.0]);
/// assert!((result.ap - (0.5 + 0.5 * 2.0 / 3.0)).abs() < 1e-12);
/// assert_eq!(result.recalls, vec![0.0, 0.5, 0.5, 1.0, 1.0]);
/// ```
pub fn voc_ap(precisions: &[f64], recalls: &[f64]) -> VocAp {
    let len = precisions.len().min(recalls.len());

    let mut padded_precisions = Vec::with_capacity(len + 2);
    let mut padded_recalls = Vec::with_capacity(len + 2);
    padded_precisions.push(0.0);
    padded_recalls.push(0.0);
    for (&precision, &recall) in precisions.iter().zip(recalls) {
        padded_precisions.push(precision);
        padded_recalls.push(recall);
    }
    padded_precisions.push(0.0);
    padded_recalls.push(1.0);

    interpolate_precision(&mut padded_precisions);

    let ap = (1..padded_recalls.len())
        .filter(|&idx| padded_recalls[idx] != padded_recalls[idx - 1])
        .map(|idx| (padded_recalls[idx] - padded_recalls[idx - 1]) * padded_precisions[idx])
        .sum();

    VocAp {
        ap,
        precisions: padded_precisions,
        recalls: padded_recalls,
    }
}

/// Replace every precision with the maximum of itself and all later values.
///
/// After this the sequence is non-increasing.
pub fn interpolate_precision(precisions: &mut [f64]) {
    for i in (0..precisions.len().saturating_sub(1)).rev() {
        precisions[i] = precisions[i].max(precisions[i + 1]);
    }
}

/// Calculate mean Average Precision (mAP) across multiple classes.
///
/// The mean is unweighted: every class counts once regardless of how many
/// ground-truth boxes it has.
///
/// # Errors
///
/// Returns [`ApError::EmptyClassList`] if `class_aps` is empty.
///
/// # Example
///
/// ```
/// use pascalvoc_ap::metrics::ap::calculate_map;
///
/// let class_aps = vec![0.8, 0.9, 0.75, 0.85];
/// let map = calculate_map(&class_aps).unwrap();
/// assert!((map - 0.825).abs() < 1e-10);
/// ```
pub fn calculate_map(class_aps: &[f64]) -> Result<f64> {
    if class_aps.is_empty() {
        return Err(ApError::EmptyClassList(
            "mAP needs at least one class".to_string(),
        ));
    }

    Ok(class_aps.iter().sum::<f64>() / class_aps.len() as f64)
}
