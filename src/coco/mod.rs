//! COCO dataset loading.
//!
//! A COCO document is three arrays (`images`, `annotations`, `categories`)
//! linked by integer ids. This module parses it into typed collections,
//! keeping source order and any fields it does not interpret.
//!
//! # Example
//!
//! ```
//! use labelreview::coco::from_coco_str;
//!
//! let dataset = from_coco_str(r#"{
//!     "images": [{"id": 1, "file_name": "a.jpg", "width": 64, "height": 48}],
//!     "annotations": [{"id": 1, "image_id": 1, "category_id": 3, "bbox": [1, 2, 10, 10]}],
//!     "categories": [{"id": 3, "name": "person"}]
//! }"#)?;
//! let bbox = dataset.annotations[0].parse_bbox()?;
//! assert_eq!(bbox.right(), 11.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod bbox;
mod ids;
mod io;
mod model;

pub use bbox::{BBoxError, BBoxXYWH};
pub use ids::{AnnotationId, CategoryId, ImageId};
pub use io::{from_coco_slice, from_coco_str, read_coco_json, to_coco_string, write_coco_json};
pub use model::{Annotation, Category, Dataset, Image};
