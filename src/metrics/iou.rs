//! Intersection over Union (IoU) calculation.

use crate::types::BoundingBox;

/// Calculate the Intersection over Union (IoU) between two bounding boxes.
///
/// Uses the inclusive-edge convention: the overlap of `[l, r]` spans
/// `r - l + 1` units. When the overlap width or height is not positive the
/// result is exactly `0.0`, which also covers degenerate boxes.
///
/// # Arguments
///
/// * `bbox1` - First bounding box
/// * `bbox2` - Second bounding box
///
/// # Returns
///
/// Returns a value between 0.0 (no overlap) and 1.0 (perfect overlap).
///
/// # Example
///
/// ```
/// use pascalvoc_ap::metrics::iou::calculate_iou;
/// use pascalvoc_ap::types::BoundingBox;
///
/// let bbox1 = BoundingBox::new(0.0, 0.0, 9.0, 9.0);
/// let bbox2 = BoundingBox::new(5.0, 5.0, 14.0, 14.0);
/// let iou = calculate_iou(&bbox1, &bbox2);
/// assert!((iou - 25.0 / 175.0).abs() < 1e-12);
/// ```
pub fn calculate_iou(bbox1: &BoundingBox, bbox2: &BoundingBox) -> f64 {
    let left = bbox1.left.max(bbox2.left);
    let top = bbox1.top.max(bbox2.top);
    let right = bbox1.right.min(bbox2.right);
    let bottom = bbox1.bottom.min(bbox2.bottom);

    let intersection_width = right - left + 1.0;
    let intersection_height = bottom - top + 1.0;

    // Disjoint or degenerate: no union is computed
    if !(intersection_width > 0.0 && intersection_height > 0.0) {
        return 0.0;
    }

    let intersection_area = intersection_width * intersection_height;
    let union_area = bbox1.area() + bbox2.area() - intersection_area;

    if union_area <= 0.0 {
        return 0.0;
    }

    intersection_area / union_area
}

/// Calculate IoU matrix between two sets of bounding boxes.
///
/// `result[i][j]` is the IoU between `bboxes1[i]` and `bboxes2[j]`.
///
/// # Example
///
/// ```
/// use pascalvoc_ap::metrics::iou::calculate_iou_matrix;
/// use pascalvoc_ap::types::BoundingBox;
///
/// let bboxes1 = vec![BoundingBox::new(0.0, 0.0, 10.0, 10.0)];
/// let bboxes2 = vec![BoundingBox::new(5.0, 5.0, 15.0, 15.0)];
/// let iou_matrix = calculate_iou_matrix(&bboxes1, &bboxes2);
/// assert_eq!(iou_matrix.len(), 1);
/// assert_eq!(iou_matrix[0].len(), 1);
/// ```
pub fn calculate_iou_matrix(bboxes1: &[BoundingBox], bboxes2: &[BoundingBox]) -> Vec<Vec<f64>> {
    bboxes1
        .iter()
        .map(|bbox1| {
            bboxes2
                .iter()
                .map(|bbox2| calculate_iou(bbox1, bbox2))
                .collect()
        })
        .collect()
}
