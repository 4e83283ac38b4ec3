//! In-memory COCO document model.
//!
//! The three collections are kept exactly as loaded: same order, no
//! reindexing. Fields this tool does not interpret are captured in an
//! `extra` map so an entity can be echoed back out without losing data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::bbox::{BBoxError, BBoxXYWH};
use super::ids::{AnnotationId, CategoryId, ImageId};

/// A COCO object-detection dataset.
///
/// A missing top-level array deserializes as an empty collection.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub images: Vec<Image>,

    #[serde(default)]
    pub annotations: Vec<Annotation>,

    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Dataset {
    /// Finds a category by exact name, returning its position and value.
    pub fn category_by_name(&self, name: &str) -> Option<(usize, &Category)> {
        self.categories
            .iter()
            .enumerate()
            .find(|(_, cat)| cat.name == name)
    }
}

/// An image entry. `file_name` is relative to the images directory.
///
/// `width` and `height` stay in `extra` as written: crops are sized from the
/// decoded file, so the declared dimensions are never read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,
    pub file_name: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Image {
    /// Builds an entry carrying the usual COCO `width` and `height` fields.
    pub fn new(
        id: impl Into<ImageId>,
        file_name: impl Into<String>,
        width: u32,
        height: u32,
    ) -> Self {
        let mut extra = Map::new();
        extra.insert("width".to_owned(), width.into());
        extra.insert("height".to_owned(), height.into());
        Self {
            id: id.into(),
            file_name: file_name.into(),
            extra,
        }
    }
}

/// A category (class label).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supercategory: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            supercategory: None,
            extra: Map::new(),
        }
    }

    /// Name made safe to use as a single path component.
    ///
    /// Crop directories and export files are named after the category, so
    /// path separators (and an empty name) must not leak into the path.
    pub fn path_name(&self) -> String {
        let cleaned: String = self
            .name
            .chars()
            .map(|c| match c {
                '/' | '\\' | '\0' => '_',
                other => other,
            })
            .collect();

        match cleaned.as_str() {
            "" | "." | ".." => format!("category_{}", self.id),
            _ => cleaned,
        }
    }
}

/// A bounding-box annotation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub image_id: ImageId,
    pub category_id: CategoryId,

    /// The `bbox` value exactly as loaded, so exports echo it unchanged.
    /// Use [`Annotation::parse_bbox`] to read it.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub bbox: Option<Value>,

    /// Everything else (`area`, `iscrowd`, `segmentation`, `score`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Annotation {
    pub fn new(
        id: impl Into<AnnotationId>,
        image_id: impl Into<ImageId>,
        category_id: impl Into<CategoryId>,
        bbox: BBoxXYWH,
    ) -> Self {
        Self {
            id: id.into(),
            image_id: image_id.into(),
            category_id: category_id.into(),
            bbox: serde_json::to_value(bbox.to_array()).ok(),
            extra: Map::new(),
        }
    }

    /// Parses the box. A missing, `null`, or ill-shaped `bbox` only affects
    /// this annotation, never the load.
    pub fn parse_bbox(&self) -> Result<BBoxXYWH, BBoxError> {
        self.bbox
            .as_ref()
            .map_or(Err(BBoxError::Missing), BBoxXYWH::from_json)
    }

    /// Attaches an extra field that will be carried through to exports.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

// Keeps an explicit `null` as `Some(Value::Null)`; only an absent key is `None`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
