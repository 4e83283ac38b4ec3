#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

/// Writes a black `width` x `height` BMP, creating parent directories.
pub fn write_bmp(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    image::RgbImage::new(width, height)
        .save(path)
        .expect("write bmp file");
}

pub fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).expect("write json file");
}

/// Two categories; category A has two annotations on a 100x100 image and
/// one pointing at an image that is not listed.
pub fn two_category_coco() -> Value {
    json!({
        "images": [
            {"id": 10, "file_name": "img10.bmp", "width": 100, "height": 100, "license": 3},
            {"id": 11, "file_name": "img11.bmp", "width": 64, "height": 48}
        ],
        "categories": [
            {"id": 1, "name": "A"},
            {"id": 2, "name": "B", "supercategory": "letters"}
        ],
        "annotations": [
            {"id": 1, "image_id": 10, "category_id": 1, "bbox": [5, 5, 20, 20],
             "area": 400, "iscrowd": 0, "segmentation": []},
            {"id": 3, "image_id": 11, "category_id": 2, "bbox": [0, 0, 64, 48]},
            {"id": 2, "image_id": 10, "category_id": 1, "bbox": [50, 50, 10, 10]},
            {"id": 4, "image_id": 99, "category_id": 1, "bbox": [1, 1, 1, 1]}
        ]
    })
}

/// A scratch layout: `<root>/coco.json`, `<root>/images/`, `<root>/output/`.
pub struct Fixture {
    pub dir: tempfile::TempDir,
    pub annotations: PathBuf,
    pub images: PathBuf,
    pub output: PathBuf,
}

impl Fixture {
    pub fn new(coco: &Value) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let annotations = dir.path().join("coco.json");
        let images = dir.path().join("images");
        let output = dir.path().join("output");
        fs::create_dir_all(&images).expect("create images dir");
        write_json(&annotations, coco);
        Self {
            dir,
            annotations,
            images,
            output,
        }
    }

    /// The two-category dataset with both of its images on disk.
    pub fn two_category() -> Self {
        let fixture = Self::new(&two_category_coco());
        write_bmp(&fixture.images.join("img10.bmp"), 100, 100);
        write_bmp(&fixture.images.join("img11.bmp"), 64, 48);
        fixture
    }
}
