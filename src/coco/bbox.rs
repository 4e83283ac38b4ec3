//! COCO bounding boxes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Why an annotation's `bbox` could not be used.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BBoxError {
    #[error("annotation has no bbox")]
    Missing,

    #[error("bbox is not an [x, y, width, height] array: {0}")]
    Malformed(String),
}

/// An axis-aligned bounding box in COCO `[x, y, width, height]` layout.
///
/// `(x, y)` is the top-left corner in absolute pixel coordinates. Nothing is
/// enforced at construction: negative sizes or non-finite values load fine
/// and are rejected later, when a crop is computed from them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BBoxXYWH {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl BBoxXYWH {
    #[inline]
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (`x + w`).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Bottom edge (`y + h`).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Returns true if all four components are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite()
    }

    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        [self.x, self.y, self.w, self.h]
    }

    /// Reads a box from a raw COCO `bbox` value. `null` counts as missing.
    pub fn from_json(value: &Value) -> Result<Self, BBoxError> {
        if value.is_null() {
            return Err(BBoxError::Missing);
        }
        Self::deserialize(value).map_err(|e| BBoxError::Malformed(e.to_string()))
    }
}

impl From<[f64; 4]> for BBoxXYWH {
    fn from([x, y, w, h]: [f64; 4]) -> Self {
        Self::new(x, y, w, h)
    }
}

// Serialized as the bare 4-element array COCO uses, not as a struct.
impl Serialize for BBoxXYWH {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BBoxXYWH {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <[f64; 4]>::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_area() {
        let bbox = BBoxXYWH::new(10.0, 20.0, 90.0, 60.0);
        assert_eq!(bbox.right(), 100.0);
        assert_eq!(bbox.bottom(), 80.0);
        assert_eq!(bbox.area(), 5400.0);
    }

    #[test]
    fn test_integer_array_deserializes() {
        let bbox: BBoxXYWH = serde_json::from_str("[5, 5, 20, 20]").unwrap();
        assert_eq!(bbox, BBoxXYWH::new(5.0, 5.0, 20.0, 20.0));
    }

    #[test]
    fn test_wrong_arity_is_rejected() {
        assert!(serde_json::from_str::<BBoxXYWH>("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_from_json_classifies_problems() {
        let ok = BBoxXYWH::from_json(&serde_json::json!([1, 2.5, 3, 4])).unwrap();
        assert_eq!(ok, BBoxXYWH::new(1.0, 2.5, 3.0, 4.0));

        assert_eq!(BBoxXYWH::from_json(&Value::Null), Err(BBoxError::Missing));
        assert!(matches!(
            BBoxXYWH::from_json(&serde_json::json!("1,2,3,4")),
            Err(BBoxError::Malformed(_))
        ));
        assert!(matches!(
            BBoxXYWH::from_json(&serde_json::json!([1, 2, 3])),
            Err(BBoxError::Malformed(_))
        ));
    }

    #[test]
    fn test_non_finite_detection() {
        assert!(BBoxXYWH::new(0.0, 0.0, 1.0, 1.0).is_finite());
        assert!(!BBoxXYWH::new(f64::NAN, 0.0, 1.0, 1.0).is_finite());
    }
}
