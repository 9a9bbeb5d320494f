//! COCO JSON loading and conversion into ground truth and detections.
//!
//! Category ids are resolved to category names and, when the document lists
//! its images, image ids are resolved to file names. Ground truth and
//! detections converted against the same document therefore share labels and
//! image keys.

use crate::error::{ApError, Result};
use crate::types::{Annotation, CocoDataset, Detection, GroundTruth, ImageId};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load a COCO dataset from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or fails validation.
///
/// # Example
///
/// ```no_run
/// use pascalvoc_ap::loader::load_from_file;
///
/// let dataset = load_from_file("annotations.json").unwrap();
/// println!("Loaded {} annotations", dataset.annotations.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<CocoDataset> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let dataset: CocoDataset = serde_json::from_reader(reader)?;

    validate_dataset(&dataset)?;

    Ok(dataset)
}

/// Load a COCO dataset from a JSON string.
///
/// # Example
///
/// ```
/// use pascalvoc_ap::loader::load_from_string;
///
/// let json = r#"{
///     "annotations": [],
///     "categories": [{"id": 1, "name": "person"}]
/// }"#;
/// let dataset = load_from_string(json).unwrap();
/// assert_eq!(dataset.categories.len(), 1);
/// ```
pub fn load_from_string(json_str: &str) -> Result<CocoDataset> {
    let dataset: CocoDataset = serde_json::from_str(json_str)?;
    validate_dataset(&dataset)?;
    Ok(dataset)
}

/// Load a COCO result list (a JSON array of annotations with `score`) from a file.
pub fn load_results_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Annotation>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let results: Vec<Annotation> = serde_json::from_reader(reader)?;

    validate_annotations(&results)?;

    Ok(results)
}

/// Load a COCO result list from a JSON string.
pub fn load_results_from_string(json_str: &str) -> Result<Vec<Annotation>> {
    let results: Vec<Annotation> = serde_json::from_str(json_str)?;
    validate_annotations(&results)?;
    Ok(results)
}

/// Load a COCO file and convert its annotations into ground truth.
pub fn ground_truths_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<GroundTruth>> {
    let dataset = load_from_file(path)?;
    ground_truths_from_coco(&dataset)
}

/// Convert the annotations of a COCO dataset into ground-truth boxes.
///
/// Boxes go from `[x, y, w, h]` to `(x, y, x + w, y + h)`.
///
/// # Errors
///
/// Returns [`ApError::InvalidAnnotation`] for an unknown category or image id.
///
/// # Example
///
/// ```
/// use pascalvoc_ap::loader::{load_from_string, ground_truths_from_coco};
/// use pascalvoc_ap::types::{BoundingBox, ImageId};
///
/// let json = r#"{
///     "images": [{"id": 3, "file_name": "street.jpg"}],
///     "annotations": [{"id": 1, "image_id": 3, "category_id": 1, "bbox": [10, 20, 30, 40]}],
///     "categories": [{"id": 1, "name": "person"}]
/// }"#;
/// let dataset = load_from_string(json).unwrap();
/// let ground_truths = ground_truths_from_coco(&dataset).unwrap();
///
/// assert_eq!(ground_truths[0].label, "person");
/// assert_eq!(ground_truths[0].image_id, ImageId::from("street.jpg"));
/// assert_eq!(ground_truths[0].bbox, BoundingBox::new(10.0, 20.0, 40.0, 60.0));
/// ```
pub fn ground_truths_from_coco(dataset: &CocoDataset) -> Result<Vec<GroundTruth>> {
    let resolver = IdResolver::new(dataset);

    dataset
        .annotations
        .iter()
        .map(|ann| -> Result<GroundTruth> {
            let (label, image_id) = resolver.resolve(ann)?;
            Ok(GroundTruth::new(label, ann.to_bbox()?, image_id))
        })
        .collect()
}

/// Convert COCO results into detections, resolving ids against `dataset`.
///
/// A result without a `score` gets confidence 1.0.
pub fn detections_from_coco_results(dataset: &CocoDataset, results: &[Annotation]) -> Result<Vec<Detection>> {
    let resolver = IdResolver::new(dataset);

    results
        .iter()
        .map(|ann| -> Result<Detection> {
            let (label, image_id) = resolver.resolve(ann)?;
            Ok(Detection::new(label, ann.confidence(), ann.to_bbox()?, image_id))
        })
        .collect()
}

/// Category id -> name and image id -> file name lookups.
struct IdResolver<'a> {
    categories: HashMap<u64, &'a str>,
    images: Option<HashMap<u64, &'a str>>,
}

impl<'a> IdResolver<'a> {
    fn new(dataset: &'a CocoDataset) -> Self {
        let categories = dataset
            .categories
            .iter()
            .map(|cat| (cat.id, cat.name.as_str()))
            .collect();

        let images = dataset.images.as_ref().map(|images| {
            images
                .iter()
                .map(|img| (img.id, img.file_name.as_str()))
                .collect()
        });

        Self { categories, images }
    }

    fn resolve(&self, ann: &Annotation) -> Result<(&'a str, ImageId)> {
        let label = self.categories.get(&ann.category_id).copied().ok_or_else(|| {
            ApError::InvalidAnnotation(format!(
                "Annotation {} references unknown category {}",
                describe(ann),
                ann.category_id
            ))
        })?;

        let image_id = match &self.images {
            Some(images) => {
                let file_name = images.get(&ann.image_id).copied().ok_or_else(|| {
                    ApError::InvalidAnnotation(format!(
                        "Annotation {} references unknown image {}",
                        describe(ann),
                        ann.image_id
                    ))
                })?;
                ImageId::from(file_name)
            }
            None => ImageId::Number(ann.image_id),
        };

        Ok((label, image_id))
    }
}

fn describe(ann: &Annotation) -> String {
    ann.id.map_or_else(|| "<no id>".to_string(), |id| id.to_string())
}

/// Validate that a COCO dataset has the required structure.
fn validate_dataset(dataset: &CocoDataset) -> Result<()> {
    if dataset.categories.is_empty() {
        return Err(ApError::EmptyDataset(
            "Dataset must contain at least one category".to_string(),
        ));
    }

    validate_annotations(&dataset.annotations)
}

/// Validate that all annotations have a valid bbox format.
fn validate_annotations(annotations: &[Annotation]) -> Result<()> {
    for annotation in annotations {
        if annotation.bbox.len() != 4 {
            return Err(ApError::InvalidAnnotation(format!(
                "Annotation {} has invalid bbox length: {}",
                describe(annotation),
                annotation.bbox.len()
            )));
        }

        // Check for non-negative dimensions
        if annotation.bbox[2] < 0.0 || annotation.bbox[3] < 0.0 {
            return Err(ApError::InvalidBoundingBox(format!(
                "Annotation {} has negative dimensions",
                describe(annotation)
            )));
        }
    }

    Ok(())
}
