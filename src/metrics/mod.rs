//! Metrics calculation modules for PascalVOC evaluation.

pub mod iou;
pub mod ap;
pub mod precision_recall;

pub use iou::{calculate_iou, calculate_iou_matrix};
pub use ap::{calculate_map, interpolate_precision, voc_ap, VocAp};
pub use precision_recall::{build_precision_recall, PrecisionRecallCurve};
