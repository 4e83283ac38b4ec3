//! Fuzz target for padded crop rectangles.
//!
//! Run with:
//!   cargo +nightly fuzz run crop_rect

#![no_main]

use libfuzzer_sys::fuzz_target;
use labelreview::coco::BBoxXYWH;
use labelreview::extract::CropRect;

fuzz_target!(|input: ([f64; 4], u8, u16, u16)| {
    let ([x, y, w, h], padding, width, height) = input;
    let (width, height) = (u32::from(width), u32::from(height));

    let bbox = BBoxXYWH::new(x, y, w, h);
    if let Some(rect) = CropRect::padded(&bbox, u32::from(padding), width, height) {
        assert!(rect.fits_within(width, height));
    }
});
