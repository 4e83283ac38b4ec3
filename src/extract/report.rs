//! Extraction results: the instances that made it and the ones that did not.

use std::fmt;
use std::path::PathBuf;

use super::ReviewInstance;
use crate::coco::{AnnotationId, BBoxError, Category, ImageId};

/// Why an annotation produced no review instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// `image_id` does not match any entry in `images`.
    MissingImageRecord { image_id: ImageId },
    /// The image entry exists but its file is not in the images directory.
    MissingImageFile { path: PathBuf },
    /// The annotation has no `bbox`, or it is `null`.
    MissingBbox,
    /// The `bbox` is present but is not four numbers.
    MalformedBbox { message: String },
    /// The file exists but could not be opened or decoded.
    Decode { path: PathBuf, message: String },
    /// Padding and clipping left nothing to crop.
    DegenerateCrop { image_width: u32, image_height: u32 },
    /// The crop could not be written.
    Write { path: PathBuf, message: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingImageRecord { image_id } => {
                write!(f, "references non-existent image {}", image_id)
            }
            SkipReason::MissingImageFile { path } => {
                write!(f, "image file not found: {}", path.display())
            }
            SkipReason::MissingBbox => f.write_str("annotation has no bbox"),
            SkipReason::MalformedBbox { message } => write!(f, "unusable bbox: {}", message),
            SkipReason::Decode { path, message } => {
                write!(f, "failed to decode {}: {}", path.display(), message)
            }
            SkipReason::DegenerateCrop {
                image_width,
                image_height,
            } => write!(
                f,
                "bbox does not overlap the {}x{} image",
                image_width, image_height
            ),
            SkipReason::Write { path, message } => {
                write!(f, "failed to write {}: {}", path.display(), message)
            }
        }
    }
}

impl From<BBoxError> for SkipReason {
    fn from(err: BBoxError) -> Self {
        match err {
            BBoxError::Missing => SkipReason::MissingBbox,
            BBoxError::Malformed(message) => SkipReason::MalformedBbox { message },
        }
    }
}

/// An annotation the extractor gave up on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedAnnotation {
    pub annotation_id: AnnotationId,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "annotation {}: {}", self.annotation_id, self.reason)
    }
}

/// Result of extracting one category.
#[derive(Clone, Debug)]
pub struct Extraction {
    /// The category the instances belong to.
    pub category: Category,
    /// Review-ready instances, in annotation order.
    pub instances: Vec<ReviewInstance>,
    /// Annotations of the category that were dropped, in annotation order.
    pub skipped: Vec<SkippedAnnotation>,
}

impl Extraction {
    /// Number of annotations of the category that were looked at.
    pub fn attempted(&self) -> usize {
        self.instances.len() + self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl fmt::Display for Extraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Processed {} instance(s) of '{}'",
            self.instances.len(),
            self.category.name
        )?;

        if !self.skipped.is_empty() {
            writeln!(
                f,
                "Skipped {} of {} annotation(s):",
                self.skipped.len(),
                self.attempted()
            )?;
            for skipped in &self.skipped {
                writeln!(f, "  {}", skipped)?;
            }
        }

        Ok(())
    }
}
