//! COCO JSON reader and writer.
//!
//! COCO bounding boxes use `[x, y, width, height]` with `(x, y)` the
//! top-left corner in absolute pixels. The reader performs no referential
//! checks: dangling `image_id`s are the extractor's business.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use super::model::Dataset;
use crate::error::ReviewError;

/// Reads a dataset from a COCO JSON file.
///
/// # Errors
/// Returns [`ReviewError::DatasetRead`] if the file cannot be opened and
/// [`ReviewError::CocoJsonParse`] if it is not a COCO document.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use labelreview::coco::read_coco_json;
///
/// let dataset = read_coco_json(Path::new("annotations.json"))?;
/// println!("{} categories", dataset.categories.len());
/// # Ok::<(), labelreview::ReviewError>(())
/// ```
pub fn read_coco_json(path: &Path) -> Result<Dataset, ReviewError> {
    let file = File::open(path).map_err(|source| ReviewError::DatasetRead {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let dataset: Dataset =
        serde_json::from_reader(reader).map_err(|source| ReviewError::CocoJsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(
        path = %path.display(),
        images = dataset.images.len(),
        annotations = dataset.annotations.len(),
        categories = dataset.categories.len(),
        "loaded COCO dataset"
    );

    Ok(dataset)
}

/// Reads a dataset from a COCO JSON string.
///
/// Useful for testing without file I/O.
pub fn from_coco_str(json: &str) -> Result<Dataset, serde_json::Error> {
    serde_json::from_str(json)
}

/// Reads a dataset from a COCO JSON byte slice.
pub fn from_coco_slice(bytes: &[u8]) -> Result<Dataset, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Writes a dataset as pretty-printed COCO JSON, replacing any existing file.
///
/// Collections are written in the order they are held; nothing is sorted.
///
/// # Errors
/// Returns [`ReviewError::ExportWrite`] if the file cannot be written.
pub fn write_coco_json(path: &Path, dataset: &Dataset) -> Result<(), ReviewError> {
    let json = to_coco_string(dataset).map_err(|source| ReviewError::CocoJsonWrite {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, json).map_err(|source| ReviewError::ExportWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a dataset to a pretty-printed COCO JSON string.
pub fn to_coco_string(dataset: &Dataset) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(dataset)
}
