//! Evaluate COCO-format results against COCO-format ground truth.
//!
//! Run with file paths, or without arguments to use the embedded sample:
//!
//! ```text
//! cargo run --example coco_ground_truth -- annotations.json results.json 0.5
//! ```

use pascalvoc_ap::loader::{load_results_from_file, load_results_from_string};
use pascalvoc_ap::{
    detections_from_coco_results, get_ap_for_all_classes, ground_truths_from_coco, load_from_file,
    load_from_string, EvalConfig,
};
use std::env;

const SAMPLE_GROUND_TRUTH: &str = r#"{
    "images": [
        {"id": 1, "file_name": "000001.jpg", "height": 480, "width": 640},
        {"id": 2, "file_name": "000002.jpg", "height": 480, "width": 640}
    ],
    "annotations": [
        {"id": 1, "image_id": 1, "category_id": 1, "bbox": [100.0, 100.0, 200.0, 150.0]},
        {"id": 2, "image_id": 1, "category_id": 2, "bbox": [350.0, 200.0, 100.0, 120.0]},
        {"id": 3, "image_id": 2, "category_id": 1, "bbox": [20.0, 40.0, 60.0, 160.0]}
    ],
    "categories": [
        {"id": 1, "name": "person", "supercategory": "human"},
        {"id": 2, "name": "car", "supercategory": "vehicle"}
    ]
}"#;

const SAMPLE_RESULTS: &str = r#"[
    {"image_id": 1, "category_id": 1, "bbox": [105.0, 98.0, 195.0, 155.0], "score": 0.95},
    {"image_id": 1, "category_id": 2, "bbox": [348.0, 198.0, 105.0, 125.0], "score": 0.87},
    {"image_id": 1, "category_id": 1, "bbox": [50.0, 50.0, 80.0, 90.0], "score": 0.42},
    {"image_id": 2, "category_id": 1, "bbox": [25.0, 45.0, 58.0, 150.0], "score": 0.66}
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let (dataset, results) = if args.len() >= 3 {
        println!("Loading ground truth from {}", args[1]);
        println!("Loading results from {}", args[2]);
        (load_from_file(&args[1])?, load_results_from_file(&args[2])?)
    } else {
        println!("No files given, using the embedded sample");
        (load_from_string(SAMPLE_GROUND_TRUTH)?, load_results_from_string(SAMPLE_RESULTS)?)
    };

    let iou_threshold = match args.get(3) {
        Some(value) => value.parse::<f64>()?,
        None => pascalvoc_ap::config::DEFAULT_IOU_THRESHOLD,
    };

    let ground_truths = ground_truths_from_coco(&dataset)?;
    let detections = detections_from_coco_results(&dataset, &results)?;
    println!(
        "{} images, {} ground-truth boxes, {} detections",
        dataset.images.as_ref().map_or(0, |images| images.len()),
        ground_truths.len(),
        detections.len()
    );

    let report = get_ap_for_all_classes(&detections, &ground_truths, &EvalConfig::with_iou_threshold(iou_threshold))?;

    println!();
    println!("{:<20} {:>8}", "class", "AP");
    println!("{:-<29}", "");
    for (label, ap) in report.to_map() {
        println!("{:<20} {:>8.4}", label, ap);
    }

    Ok(())
}
