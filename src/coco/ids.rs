//! Newtype IDs for the three COCO entity kinds.
//!
//! COCO links images, annotations and categories purely through integer ids,
//! so keeping them as distinct types stops an `image_id` from being looked up
//! in the category table by accident.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! coco_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            #[inline]
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the underlying u64 value.
            #[inline]
            pub fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

coco_id! {
    /// Identifier of an entry in the `images` array.
    ImageId
}

coco_id! {
    /// Identifier of an entry in the `annotations` array.
    AnnotationId
}

coco_id! {
    /// Identifier of an entry in the `categories` array.
    CategoryId
}
