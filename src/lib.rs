//! # pascalvoc-ap
//!
//! A Rust library for PascalVOC-style Average Precision (AP) and mean Average
//! Precision (mAP) for object detection evaluation.
//!
//! For every requested class the evaluation:
//! - ranks the class's predictions by confidence (ties keep input order)
//! - greedily matches each prediction to the best-IoU ground-truth box of its
//!   image, where each ground-truth box can be claimed at most once
//! - accumulates precision and recall at every rank
//! - integrates the monotone precision envelope over recall into AP
//!
//! mAP is the unweighted mean of the class APs.
//!
//! ## Quick Start
//!
//! ```rust
//! use pascalvoc_ap::{get_ap, Detection, EvalConfig, GroundTruth};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ground_truths = vec![
//!     GroundTruth::from_ltrb("cat", 0.0, 0.0, 10.0, 10.0, "img1.jpg"),
//!     GroundTruth::from_ltrb("dog", 50.0, 50.0, 80.0, 90.0, "img1.jpg"),
//! ];
//! let detections = vec![
//!     Detection::from_ltrb("cat", 0.92, 0.0, 0.0, 10.0, 10.0, "img1.jpg"),
//!     Detection::from_ltrb("dog", 0.40, 200.0, 200.0, 220.0, 220.0, "img1.jpg"),
//! ];
//!
//! let report = get_ap(&detections, &ground_truths, ["cat", "dog"], &EvalConfig::default())?;
//! assert_eq!(report.ap("cat"), Some(1.0));
//! assert_eq!(report.ap("dog"), Some(0.0));
//! assert_eq!(report.map, 0.5);
//! # Ok(())
//! # }
//! ```
//!
//! ## Box convention
//!
//! Boxes are `(left, top, right, bottom)` with inclusive edges, so a box's
//! width is `right - left + 1`. COCO `[x, y, w, h]` boxes are converted to
//! `(x, y, x + w, y + h)` by the [`loader`].

pub mod error;
pub mod types;
pub mod config;
pub mod loader;
pub mod metrics;
pub mod candidates;
pub mod matching;
pub mod stats;
pub mod evaluator;

// Re-export commonly used types and functions
pub use error::{ApError, Result};
pub use types::{BoundingBox, Detection, GroundTruth, ImageId, PrecisionRecallPoint};
pub use config::{EvalConfig, ZeroGroundTruthPolicy};
pub use evaluator::{compute_ap, get_ap, get_ap_for_all_classes, ApReport, ClassEvaluation, ClassLabels};
pub use loader::{detections_from_coco_results, ground_truths_from_coco, load_from_file, load_from_string};
