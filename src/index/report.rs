//! Category listing shown to the reviewer before a category is chosen.

use std::fmt;

use crate::coco::Category;

/// One category together with the number of annotations that reference it.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryCount {
    /// Position in the dataset's category list; this is the selection index.
    pub position: usize,
    pub category: Category,
    pub count: usize,
}

/// All categories of a dataset with their counts, in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryListing {
    pub entries: Vec<CategoryCount>,
}

impl CategoryListing {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategoryCount> {
        self.entries.iter()
    }

    /// Sum of the listed counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }
}

impl<'a> IntoIterator for &'a CategoryListing {
    type Item = &'a CategoryCount;
    type IntoIter = std::slice::Iter<'a, CategoryCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for CategoryListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return writeln!(f, "No categories found");
        }

        let width = self.entries.len().saturating_sub(1).to_string().len();
        for entry in &self.entries {
            writeln!(
                f,
                "  [{:>width$}] {} ({} instances)",
                entry.position,
                entry.category.name,
                entry.count,
                width = width
            )?;
        }
        Ok(())
    }
}
