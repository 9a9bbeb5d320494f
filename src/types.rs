//! Core data types for detections, ground truth and COCO documents.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned bounding box in LTRB (Left-Top-Right-Bottom) format.
///
/// Edges are inclusive, so a box spanning `left..=right` is
/// `right - left + 1` wide. Boxes with `right < left` or `bottom < top`
/// are accepted; they simply never overlap anything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    /// Create a bounding box from COCO `[x, y, width, height]`.
    ///
    /// The right/bottom edges are `x + width` and `y + height`.
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Width under the inclusive-edge convention.
    pub fn width(&self) -> f64 {
        self.right - self.left + 1.0
    }

    /// Height under the inclusive-edge convention.
    pub fn height(&self) -> f64 {
        self.bottom - self.top + 1.0
    }

    /// Area under the inclusive-edge convention.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Check if the box is non-degenerate (right >= left and bottom >= top).
    pub fn is_valid(&self) -> bool {
        self.right >= self.left && self.bottom >= self.top
    }
}

/// Identifier used to group boxes by image.
///
/// Only equality and hashing are used; image ids are never ordered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageId {
    Number(u64),
    Name(String),
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageId::Number(id) => write!(f, "{}", id),
            ImageId::Name(name) => f.write_str(name),
        }
    }
}

impl From<u64> for ImageId {
    fn from(id: u64) -> Self {
        ImageId::Number(id)
    }
}

impl From<&str> for ImageId {
    fn from(name: &str) -> Self {
        ImageId::Name(name.to_string())
    }
}

impl From<String> for ImageId {
    fn from(name: String) -> Self {
        ImageId::Name(name)
    }
}

/// A predicted box produced by a detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub label: String,
    /// Higher means more confident.
    pub confidence: f64,
    pub bbox: BoundingBox,
    pub image_id: ImageId,
}

impl Detection {
    /// Create a new detection.
    pub fn new(
        label: impl Into<String>,
        confidence: f64,
        bbox: BoundingBox,
        image_id: impl Into<ImageId>,
    ) -> Self {
        Self {
            label: label.into(),
            confidence,
            bbox,
            image_id: image_id.into(),
        }
    }

    /// Build a detection from the flat
    /// `(label, confidence, left, top, right, bottom, image_id)` record.
    pub fn from_ltrb(
        label: impl Into<String>,
        confidence: f64,
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
        image_id: impl Into<ImageId>,
    ) -> Self {
        Self::new(label, confidence, BoundingBox::new(left, top, right, bottom), image_id)
    }
}

/// An annotated ground-truth box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTruth {
    pub label: String,
    pub bbox: BoundingBox,
    pub image_id: ImageId,
}

impl GroundTruth {
    /// Create a new ground-truth box.
    pub fn new(label: impl Into<String>, bbox: BoundingBox, image_id: impl Into<ImageId>) -> Self {
        Self {
            label: label.into(),
            bbox,
            image_id: image_id.into(),
        }
    }

    /// Build a ground truth from the flat
    /// `(label, left, top, right, bottom, image_id)` record.
    pub fn from_ltrb(
        label: impl Into<String>,
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
        image_id: impl Into<ImageId>,
    ) -> Self {
        Self::new(label, BoundingBox::new(left, top, right, bottom), image_id)
    }
}

/// Precision-Recall curve point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrecisionRecallPoint {
    pub precision: f64,
    pub recall: f64,
}

/// Represents a category in a COCO document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supercategory: Option<String>,
}

/// Represents an image in a COCO document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: u64,
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

/// Represents an annotation (or a detection result) in COCO format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Result files usually omit the id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub image_id: u64,
    pub category_id: u64,
    /// Bounding box in [x, y, width, height] format
    pub bbox: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Annotation {
    /// Convert the `[x, y, w, h]` array to an LTRB `BoundingBox`.
    pub fn to_bbox(&self) -> crate::error::Result<BoundingBox> {
        if self.bbox.len() != 4 {
            return Err(crate::error::ApError::InvalidBoundingBox(format!(
                "Expected 4 values, got {}",
                self.bbox.len()
            )));
        }
        Ok(BoundingBox::from_xywh(
            self.bbox[0],
            self.bbox[1],
            self.bbox[2],
            self.bbox[3],
        ))
    }

    /// Get the confidence score, defaulting to 1.0 if not present.
    pub fn confidence(&self) -> f64 {
        self.score.unwrap_or(1.0)
    }
}

/// Represents a complete COCO document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CocoDataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,
    pub annotations: Vec<Annotation>,
    pub categories: Vec<Category>,
}
