//! Error types for the pascalvoc-ap library.

use thiserror::Error;

/// Result type for pascalvoc-ap operations.
pub type Result<T> = std::result::Result<T, ApError>;

/// Error types that can occur during AP evaluation.
#[derive(Error, Debug)]
pub enum ApError {
    /// No class labels were requested, so mAP has no denominator.
    #[error("Empty class list: {0}")]
    EmptyClassList(String),

    /// A class has no ground-truth boxes, so recall has no denominator.
    #[error("Zero ground truth: {0}")]
    ZeroGroundTruth(String),

    /// A requested class label collides with the synthetic "mAP" key.
    #[error("Reserved class label: {0}")]
    ReservedClassLabel(String),

    /// Invalid IoU threshold.
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// Error during JSON parsing or serialization.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error during I/O operations.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid annotation data.
    #[error("Invalid annotation: {0}")]
    InvalidAnnotation(String),

    /// Invalid bounding box coordinates.
    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    /// Empty dataset provided.
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),
}
