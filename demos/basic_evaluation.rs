//! Basic evaluation example demonstrating core functionality.

use pascalvoc_ap::{
    get_ap, metrics::calculate_iou, BoundingBox, Detection, EvalConfig, GroundTruth, ZeroGroundTruthPolicy,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== PascalVOC AP Example ===\n");

    // Example 1: IoU Calculation
    println!("1. IoU Calculation (inclusive pixel edges)");
    let bbox1 = BoundingBox::new(10.0, 10.0, 50.0, 50.0);
    let bbox2 = BoundingBox::new(30.0, 30.0, 70.0, 70.0);
    println!("   IoU between overlapping boxes: {:.4}", calculate_iou(&bbox1, &bbox2));
    println!();

    // Example 2: Build a small dataset
    println!("2. Building Detections and Ground Truth");
    let ground_truths = vec![
        GroundTruth::from_ltrb("person", 100.0, 100.0, 300.0, 250.0, "street.jpg"),
        GroundTruth::from_ltrb("person", 400.0, 120.0, 480.0, 300.0, "street.jpg"),
        GroundTruth::from_ltrb("car", 350.0, 200.0, 450.0, 320.0, "parking.jpg"),
    ];
    let detections = vec![
        Detection::from_ltrb("person", 0.95, 105.0, 98.0, 300.0, 253.0, "street.jpg"),
        Detection::from_ltrb("person", 0.81, 110.0, 105.0, 290.0, 245.0, "street.jpg"),
        Detection::from_ltrb("person", 0.42, 50.0, 50.0, 130.0, 140.0, "street.jpg"),
        Detection::from_ltrb("car", 0.87, 348.0, 198.0, 453.0, 323.0, "parking.jpg"),
    ];
    println!("   {} ground-truth boxes, {} detections", ground_truths.len(), detections.len());
    println!();

    // Example 3: Evaluation
    println!("3. Running Evaluation");
    let config = EvalConfig::default();
    let report = get_ap(&detections, &ground_truths, ["person", "car"], &config)?;
    println!("   IoU threshold: {:.2}", report.iou_threshold);
    println!("   mAP: {:.4}", report.map);
    println!();

    // Example 4: Per-class breakdown
    println!("4. Per-Class Results");
    for class in &report.classes {
        println!("   ├─ {}: AP {:.4}", class.label, class.ap);
        println!("   │  {}", class.stats.summary_string());
        for (rank, point) in class.curve.points().iter().enumerate() {
            println!(
                "   │  rank {}: iou {:.3} match {:<5} precision {:.3} recall {:.3}",
                rank + 1,
                class.ious[rank],
                class.matches[rank],
                point.precision,
                point.recall
            );
        }
    }
    println!();

    // Example 5: Classes without ground truth
    println!("5. Requesting a Class With No Ground Truth");
    match get_ap(&detections, &ground_truths, ["person", "bicycle"], &config) {
        Ok(_) => println!("   unexpected success"),
        Err(e) => println!("   default policy: {}", e),
    }
    let lenient = config.zero_ground_truth(ZeroGroundTruthPolicy::ScoreZero);
    let report = get_ap(&detections, &ground_truths, ["person", "bicycle"], &lenient)?;
    println!("   score-zero policy: {:?}", report.to_map());
    println!();

    // Example 6: Stricter matching
    println!("6. Stricter IoU Threshold");
    let strict = EvalConfig::with_iou_threshold(0.9);
    let report = get_ap(&detections, &ground_truths, ["person", "car"], &strict)?;
    println!("   mAP @ 0.90: {:.4}", report.map);
    println!();

    println!("=== Example Complete ===");

    Ok(())
}
