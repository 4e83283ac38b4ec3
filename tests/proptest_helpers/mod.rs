#![allow(dead_code)]

use std::path::PathBuf;

use labelreview::coco::{Annotation, BBoxXYWH, Category, Dataset, Image};
use labelreview::extract::{CropRect, ReviewInstance};
use labelreview::review::ReviewSession;
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A reviewer action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Accept,
    Reject,
    Advance,
    Retreat,
}

pub fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Accept),
        3 => Just(Op::Reject),
        1 => Just(Op::Advance),
        2 => Just(Op::Retreat),
    ]
}

pub fn arb_ops(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(arb_op(), 0..=max_len)
}

/// Instances spread over a handful of images; no files are involved.
pub fn session_of(n: usize) -> ReviewSession {
    let instances = (0..n as u64)
        .map(|i| {
            let image = Image::new(i % 3 + 1, format!("img{}.jpg", i % 3 + 1), 64, 64);
            ReviewInstance {
                annotation: Annotation::new(i + 1, image.id, 1u64, BBoxXYWH::new(1.0, 1.0, 4.0, 4.0)),
                crop_path: PathBuf::from(format!("out/{}_{}", i + 1, image.file_name)),
                source_path: PathBuf::from(&image.file_name),
                crop_rect: CropRect { x1: 0, y1: 0, x2: 15, y2: 15 },
                image,
            }
        })
        .collect();
    ReviewSession::new(Category::new(1u64, "cat"), instances).expect("non-empty session")
}

pub fn arb_bbox() -> impl Strategy<Value = BBoxXYWH> {
    (
        -200.0f64..400.0,
        -200.0f64..400.0,
        -50.0f64..500.0,
        -50.0f64..500.0,
    )
        .prop_map(|(x, y, w, h)| BBoxXYWH::new(x, y, w, h))
}

/// A dataset whose annotations reference category ids 1..=categories+1, so
/// some annotations point at a category that does not exist.
pub fn arb_dataset(max_categories: u64, max_annotations: usize) -> impl Strategy<Value = Dataset> {
    (1..=max_categories).prop_flat_map(move |n_cats| {
        proptest::collection::vec((1..=n_cats + 1, arb_bbox()), 0..=max_annotations).prop_map(
            move |anns| Dataset {
                images: vec![Image::new(1u64, "img.jpg", 64, 64)],
                categories: (1..=n_cats)
                    .map(|id| Category::new(id, format!("c{id}")))
                    .collect(),
                annotations: anns
                    .into_iter()
                    .enumerate()
                    .map(|(i, (cat, bbox))| Annotation::new(i as u64 + 1, 1u64, cat, bbox))
                    .collect(),
            },
        )
    })
}
