//! Padded crop rectangles.

use std::fmt;

use crate::coco::BBoxXYWH;

/// Context, in pixels, added on every side of a bounding box before cropping.
pub const DEFAULT_PADDING: u32 = 10;

/// A non-empty pixel rectangle `[x1, x2) × [y1, y2)` inside an image.
///
/// Only [`CropRect::padded`] builds one, and it guarantees
/// `0 <= x1 < x2 <= width` and `0 <= y1 < y2 <= height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CropRect {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl CropRect {
    /// Grows `bbox` by `padding` on every side, snaps outward-left/top with
    /// `floor`, and clips to the image.
    ///
    /// Returns `None` when the clipped rectangle would be empty (the box lies
    /// entirely outside the image, has a negative size, or is not finite).
    pub fn padded(
        bbox: &BBoxXYWH,
        padding: u32,
        image_width: u32,
        image_height: u32,
    ) -> Option<Self> {
        if !bbox.is_finite() {
            return None;
        }

        let pad = f64::from(padding);
        // `as` saturates, so absurd coordinates clamp instead of wrapping.
        let x1 = ((bbox.x - pad).floor() as i64).max(0);
        let y1 = ((bbox.y - pad).floor() as i64).max(0);
        let x2 = ((bbox.right() + pad).floor() as i64).min(i64::from(image_width));
        let y2 = ((bbox.bottom() + pad).floor() as i64).min(i64::from(image_height));

        if x1 >= x2 || y1 >= y2 {
            return None;
        }

        Some(Self {
            x1: x1 as u32,
            y1: y1 as u32,
            x2: x2 as u32,
            y2: y2 as u32,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    /// Returns true if the rectangle lies within a `width × height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x1 < self.x2 && self.y1 < self.y2 && self.x2 <= width && self.y2 <= height
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, w: f64, h: f64, iw: u32, ih: u32) -> Option<CropRect> {
        CropRect::padded(&BBoxXYWH::new(x, y, w, h), DEFAULT_PADDING, iw, ih)
    }

    #[test]
    fn test_interior_box_gets_full_padding() {
        let r = rect(50.0, 50.0, 10.0, 10.0, 100, 100).unwrap();
        assert_eq!(r, CropRect { x1: 40, y1: 40, x2: 70, y2: 70 });
        assert_eq!((r.width(), r.height()), (30, 30));
    }

    #[test]
    fn test_clamps_at_top_left() {
        let r = rect(5.0, 5.0, 20.0, 20.0, 100, 100).unwrap();
        assert_eq!(r, CropRect { x1: 0, y1: 0, x2: 35, y2: 35 });
    }

    #[test]
    fn test_oversized_box_clamps_to_whole_image() {
        let r = rect(-5.0, -5.0, 200.0, 300.0, 64, 48).unwrap();
        assert_eq!(r, CropRect { x1: 0, y1: 0, x2: 64, y2: 48 });
    }

    #[test]
    fn test_fractional_coordinates_floor() {
        let r = rect(20.7, 30.2, 10.6, 10.5, 100, 100).unwrap();
        // 20.7 - 10 = 10.7 -> 10; 20.7 + 10.6 + 10 = 41.3 -> 41
        assert_eq!(r, CropRect { x1: 10, y1: 20, x2: 41, y2: 50 });
    }

    #[test]
    fn test_box_outside_image_is_degenerate() {
        assert!(rect(500.0, 10.0, 10.0, 10.0, 100, 100).is_none());
        assert!(rect(-100.0, 10.0, 10.0, 10.0, 100, 100).is_none());
    }

    #[test]
    fn test_negative_size_beyond_padding_is_degenerate() {
        assert!(rect(50.0, 50.0, -30.0, 10.0, 100, 100).is_none());
    }

    #[test]
    fn test_zero_size_box_still_gets_context() {
        let r = rect(50.0, 50.0, 0.0, 0.0, 100, 100).unwrap();
        assert_eq!((r.width(), r.height()), (20, 20));
    }

    #[test]
    fn test_non_finite_is_degenerate() {
        assert!(rect(f64::NAN, 0.0, 10.0, 10.0, 100, 100).is_none());
        assert!(rect(0.0, 0.0, f64::INFINITY, 10.0, 100, 100).is_none());
    }

    #[test]
    fn test_zero_sized_image_is_degenerate() {
        assert!(rect(0.0, 0.0, 10.0, 10.0, 0, 0).is_none());
    }

    #[test]
    fn test_fits_within() {
        let r = rect(5.0, 5.0, 20.0, 20.0, 100, 100).unwrap();
        assert!(r.fits_within(100, 100));
        assert!(!r.fits_within(30, 100));
        assert_eq!(r.to_string(), "(0, 0, 35, 35)");
    }
}
