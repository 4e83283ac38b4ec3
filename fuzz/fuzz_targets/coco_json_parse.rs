//! Fuzz target for COCO JSON parsing.
//!
//! Feeds arbitrary bytes to the COCO parser and, when they parse, runs the
//! category listing and bbox parsing over the result.
//!
//! Run with:
//!   cargo +nightly fuzz run coco_json_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use labelreview::coco::from_coco_slice;
use labelreview::index::list_categories;

fuzz_target!(|data: &[u8]| {
    // 10MB is generous for an annotation file.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(dataset) = from_coco_slice(data) {
        let listing = list_categories(&dataset);
        assert_eq!(listing.len(), dataset.categories.len());
        for ann in &dataset.annotations {
            let _ = ann.parse_bbox();
        }
    }
});
