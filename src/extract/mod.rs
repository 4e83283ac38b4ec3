//! Instance extraction: one padded crop per annotation of a category.
//!
//! For a selected category the extractor walks that category's annotations
//! in file order, resolves each one's image, cuts a padded rectangle out of
//! it and writes the crop to `<output>/<category>/<annotation_id>_<file>`.
//!
//! A single bad annotation never aborts the batch. Dangling image
//! references, missing files, absent or malformed boxes, undecodable images
//! and failed writes are recorded in [`Extraction::skipped`] and the walk
//! continues.

mod crop;
mod report;

pub use crop::{CropRect, DEFAULT_PADDING};
pub use report::{Extraction, SkipReason, SkippedAnnotation};

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::coco::{Annotation, Category, Dataset, Image, ImageId};
use crate::error::ReviewError;

/// Options for instance extraction.
#[derive(Clone, Debug)]
pub struct ExtractOptions {
    /// Pixels of context added on every side of the bounding box.
    pub padding: u32,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
        }
    }
}

/// One annotation paired with the crop that was cut for it.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewInstance {
    pub annotation: Annotation,
    pub image: Image,
    /// The full source image the crop was taken from.
    pub source_path: PathBuf,
    /// Where the crop was written.
    pub crop_path: PathBuf,
    pub crop_rect: CropRect,
}

impl ReviewInstance {
    /// File name of the crop, for status lines.
    pub fn crop_file_name(&self) -> String {
        self.crop_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Directory that holds the crops of `category`.
pub fn crop_dir(output_dir: &Path, category: &Category) -> PathBuf {
    output_dir.join(category.path_name())
}

/// Crop file name for an annotation: `<annotation_id>_<image file name>`.
///
/// Only the last component of `file_name` is used, so images listed with a
/// relative sub-path still land directly in the category directory. The
/// annotation id keeps names unique within a category.
pub fn crop_file_name(annotation: &Annotation, image: &Image) -> String {
    let base = Path::new(&image.file_name)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| image.file_name.clone());
    format!("{}_{}", annotation.id, base)
}

/// Extracts review instances for `category`.
///
/// # Errors
/// Only fails if the category's crop directory cannot be created.
/// Per-annotation problems end up in [`Extraction::skipped`]; an extraction
/// with no instances is still `Ok`.
pub fn extract_instances(
    dataset: &Dataset,
    category: &Category,
    images_dir: &Path,
    output_dir: &Path,
    opts: &ExtractOptions,
) -> Result<Extraction, ReviewError> {
    let out_dir = crop_dir(output_dir, category);
    fs::create_dir_all(&out_dir)?;

    let images: HashMap<ImageId, &Image> =
        dataset.images.iter().map(|img| (img.id, img)).collect();

    let mut instances = Vec::new();
    let mut skipped = Vec::new();

    for ann in dataset
        .annotations
        .iter()
        .filter(|ann| ann.category_id == category.id)
    {
        match extract_one(ann, &images, images_dir, &out_dir, opts) {
            Ok(instance) => instances.push(instance),
            Err(reason) => {
                tracing::warn!(annotation_id = %ann.id, %reason, "skipping annotation");
                skipped.push(SkippedAnnotation {
                    annotation_id: ann.id,
                    reason,
                });
            }
        }
    }

    tracing::info!(
        category = %category.name,
        instances = instances.len(),
        skipped = skipped.len(),
        "extraction finished"
    );

    Ok(Extraction {
        category: category.clone(),
        instances,
        skipped,
    })
}

fn extract_one(
    ann: &Annotation,
    images: &HashMap<ImageId, &Image>,
    images_dir: &Path,
    out_dir: &Path,
    opts: &ExtractOptions,
) -> Result<ReviewInstance, SkipReason> {
    let image = images
        .get(&ann.image_id)
        .copied()
        .ok_or(SkipReason::MissingImageRecord {
            image_id: ann.image_id,
        })?;

    let source_path = images_dir.join(&image.file_name);
    if !source_path.is_file() {
        return Err(SkipReason::MissingImageFile { path: source_path });
    }

    let bbox = ann.parse_bbox()?;

    // Dimensions come from the decoded pixels, not from the JSON entry.
    let decoded = decode_image(&source_path).map_err(|message| SkipReason::Decode {
        path: source_path.clone(),
        message,
    })?;
    let (width, height) = (decoded.width(), decoded.height());

    let crop_rect = CropRect::padded(&bbox, opts.padding, width, height).ok_or(
        SkipReason::DegenerateCrop {
            image_width: width,
            image_height: height,
        },
    )?;

    let crop_path = out_dir.join(crop_file_name(ann, image));
    decoded
        .crop_imm(crop_rect.x1, crop_rect.y1, crop_rect.width(), crop_rect.height())
        .save(&crop_path)
        .map_err(|e| SkipReason::Write {
            path: crop_path.clone(),
            message: e.to_string(),
        })?;

    tracing::debug!(
        annotation_id = %ann.id,
        rect = %crop_rect,
        path = %crop_path.display(),
        "wrote crop"
    );

    Ok(ReviewInstance {
        annotation: ann.clone(),
        image: image.clone(),
        source_path,
        crop_path,
        crop_rect,
    })
}

/// Decodes by content rather than extension, so a PNG named `.jpg` still opens.
fn decode_image(path: &Path) -> Result<image::DynamicImage, String> {
    image::ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| e.to_string())?
        .decode()
        .map_err(|e| e.to_string())
}
