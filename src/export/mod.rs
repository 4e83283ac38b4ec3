//! Rejection export: a COCO subset holding only what the reviewer rejected.
//!
//! The export lists the rejected annotations verbatim (unknown fields
//! included), the images they reference without duplicates, and the single
//! reviewed category. It is written to `<output>/rejected_<category>.json`,
//! replacing any earlier export for that category.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::coco::{write_coco_json, Annotation, Category, Dataset, Image, ImageId};
use crate::error::ReviewError;
use crate::review::ReviewSession;

/// Result of an export attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The export file was written.
    Written {
        path: PathBuf,
        annotations: usize,
        images: usize,
    },
    /// Nothing was rejected, so no file was written.
    NoneWritten,
}

impl ExportOutcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ExportOutcome::Written { path, .. } => Some(path),
            ExportOutcome::NoneWritten => None,
        }
    }
}

impl fmt::Display for ExportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportOutcome::Written {
                path,
                annotations,
                images,
            } => write!(
                f,
                "Wrote {} rejected annotation(s) across {} image(s) to {}",
                annotations,
                images,
                path.display()
            ),
            ExportOutcome::NoneWritten => write!(f, "No rejections; nothing exported"),
        }
    }
}

/// Path of the export file for `category` under `output_root`.
pub fn rejection_export_path(output_root: &Path, category: &Category) -> PathBuf {
    output_root.join(format!("rejected_{}.json", category.path_name()))
}

/// Assembles the COCO subset for a list of rejected annotations.
///
/// Images appear in the order their first rejected annotation appears, each
/// id at most once. Annotations whose image is not in `images` are kept but
/// contribute no image entry.
pub fn build_rejection_export(
    rejected: &[&Annotation],
    images: &[Image],
    category: &Category,
) -> Dataset {
    let by_id: HashMap<ImageId, &Image> = images.iter().map(|img| (img.id, img)).collect();

    let mut seen = HashSet::new();
    let export_images = rejected
        .iter()
        .filter(|ann| seen.insert(ann.image_id))
        .filter_map(|ann| by_id.get(&ann.image_id).map(|img| (*img).clone()))
        .collect();

    Dataset {
        images: export_images,
        annotations: rejected.iter().map(|ann| (*ann).clone()).collect(),
        categories: vec![category.clone()],
    }
}

/// Writes the rejection export for a session.
///
/// Can be called at any point, not only once the session is exhausted; the
/// session is only read, so a failed write can simply be retried.
///
/// # Errors
/// [`ReviewError::ExportWrite`] if the output directory or file cannot be
/// written.
pub fn export_rejections(
    session: &ReviewSession,
    dataset: &Dataset,
    output_root: &Path,
) -> Result<ExportOutcome, ReviewError> {
    let rejected = session.rejected_annotations();
    if rejected.is_empty() {
        tracing::info!(category = %session.category().name, "no rejections to export");
        return Ok(ExportOutcome::NoneWritten);
    }

    let export = build_rejection_export(&rejected, &dataset.images, session.category());

    fs::create_dir_all(output_root).map_err(|source| ReviewError::ExportWrite {
        path: output_root.to_path_buf(),
        source,
    })?;
    let path = rejection_export_path(output_root, session.category());
    write_coco_json(&path, &export)?;

    tracing::info!(
        path = %path.display(),
        annotations = export.annotations.len(),
        images = export.images.len(),
        "wrote rejection export"
    );

    Ok(ExportOutcome::Written {
        path,
        annotations: export.annotations.len(),
        images: export.images.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coco::{read_coco_json, BBoxXYWH};
    use crate::extract::{CropRect, ReviewInstance};

    fn ann(id: u64, image_id: u64) -> Annotation {
        Annotation::new(id, image_id, 1u64, BBoxXYWH::new(1.0, 1.0, 2.0, 2.0))
    }

    fn images() -> Vec<Image> {
        vec![
            Image::new(10u64, "a.jpg", 100, 100),
            Image::new(20u64, "b.jpg", 100, 100),
        ]
    }

    fn session(annotations: Vec<Annotation>) -> ReviewSession {
        let images = images();
        let instances = annotations
            .into_iter()
            .map(|annotation| {
                let image = images
                    .iter()
                    .find(|img| img.id == annotation.image_id)
                    .cloned()
                    .unwrap();
                ReviewInstance {
                    crop_path: PathBuf::from(format!("{}_{}", annotation.id, image.file_name)),
                    source_path: PathBuf::from(&image.file_name),
                    crop_rect: CropRect { x1: 0, y1: 0, x2: 13, y2: 13 },
                    annotation,
                    image,
                }
            })
            .collect();
        ReviewSession::new(Category::new(1u64, "A"), instances).unwrap()
    }

    #[test]
    fn test_images_deduplicated_in_first_seen_order() {
        let (a1, a2, a3) = (ann(1, 20), ann(2, 10), ann(3, 20));
        let export = build_rejection_export(&[&a1, &a2, &a3], &images(), &Category::new(1u64, "A"));

        let image_ids: Vec<u64> = export.images.iter().map(|i| i.id.as_u64()).collect();
        assert_eq!(image_ids, vec![20, 10]);
        assert_eq!(export.annotations.len(), 3);
        assert_eq!(export.categories.len(), 1);
    }

    #[test]
    fn test_dangling_image_contributes_no_entry() {
        let a = ann(1, 99);
        let export = build_rejection_export(&[&a], &images(), &Category::new(1u64, "A"));
        assert!(export.images.is_empty());
        assert_eq!(export.annotations.len(), 1);
    }

    #[test]
    fn test_no_rejections_writes_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let mut s = session(vec![ann(1, 10), ann(2, 10)]);
        s.accept().unwrap();
        s.accept().unwrap();

        let dataset = Dataset {
            images: images(),
            ..Default::default()
        };
        let outcome = export_rejections(&s, &dataset, temp.path()).unwrap();

        assert_eq!(outcome, ExportOutcome::NoneWritten);
        assert!(outcome.path().is_none());
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_written_and_overwritten() {
        let temp = tempfile::tempdir().unwrap();
        let out = temp.path().join("nested").join("output");
        let dataset = Dataset {
            images: images(),
            ..Default::default()
        };

        let mut s = session(vec![ann(1, 10), ann(2, 10), ann(3, 20)]);
        s.reject().unwrap();
        s.reject().unwrap();
        s.accept().unwrap();
        let outcome = export_rejections(&s, &dataset, &out).unwrap();
        assert_eq!(
            outcome,
            ExportOutcome::Written {
                path: out.join("rejected_A.json"),
                annotations: 2,
                images: 1,
            }
        );

        let mut s = session(vec![ann(3, 20)]);
        s.reject().unwrap();
        export_rejections(&s, &dataset, &out).unwrap();

        let written = read_coco_json(&out.join("rejected_A.json")).unwrap();
        assert_eq!(written.annotations.len(), 1);
        assert_eq!(written.annotations[0].id.as_u64(), 3);
        assert_eq!(written.images[0].id.as_u64(), 20);
    }

    #[test]
    fn test_unwritable_output_keeps_session() {
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("file");
        fs::write(&blocker, b"").unwrap();

        let mut s = session(vec![ann(1, 10)]);
        s.reject().unwrap();
        let dataset = Dataset {
            images: images(),
            ..Default::default()
        };

        let err = export_rejections(&s, &dataset, &blocker.join("out")).unwrap_err();
        assert!(matches!(err, ReviewError::ExportWrite { .. }));

        // Retry against a writable root.
        let outcome = export_rejections(&s, &dataset, temp.path()).unwrap();
        assert!(outcome.path().is_some());
    }
}
