//! Per-category annotation counts and category selection.
//!
//! Everything here is a read-only projection of a loaded [`Dataset`].
//! Categories keep the order they have in the source file; selection is by
//! position in that order.

mod report;

pub use report::{CategoryCount, CategoryListing};

use std::collections::HashMap;

use crate::coco::{Annotation, Category, CategoryId, Dataset};
use crate::error::ReviewError;

/// Counts annotations per `category_id` in a single pass.
///
/// Ids referenced by annotations but absent from `categories` are counted
/// too; they simply never show up in a [`CategoryListing`].
pub fn count_by_category(annotations: &[Annotation]) -> HashMap<CategoryId, usize> {
    let mut counts: HashMap<CategoryId, usize> = HashMap::new();
    for ann in annotations {
        *counts.entry(ann.category_id).or_insert(0) += 1;
    }
    counts
}

/// Lists every category with its annotation count, in source order.
///
/// Categories without annotations are listed with a count of 0.
pub fn list_categories(dataset: &Dataset) -> CategoryListing {
    let counts = count_by_category(&dataset.annotations);

    let entries = dataset
        .categories
        .iter()
        .enumerate()
        .map(|(position, category)| CategoryCount {
            position,
            category: category.clone(),
            count: counts.get(&category.id).copied().unwrap_or(0),
        })
        .collect();

    CategoryListing { entries }
}

/// Selects a category by its position in the dataset's category list.
pub fn select_category(dataset: &Dataset, index: usize) -> Result<&Category, ReviewError> {
    dataset
        .categories
        .get(index)
        .ok_or(ReviewError::CategoryIndexOutOfRange {
            index,
            count: dataset.categories.len(),
        })
}

/// Resolves the position of a category by exact name.
pub fn position_by_name(dataset: &Dataset, name: &str) -> Result<usize, ReviewError> {
    dataset
        .category_by_name(name)
        .map(|(position, _)| position)
        .ok_or_else(|| ReviewError::CategoryNotFound(name.to_string()))
}
