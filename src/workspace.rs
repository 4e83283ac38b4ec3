//! The review workflow as one object: load, pick a category, extract,
//! review, export.
//!
//! A presentation layer drives a [`Workspace`] and a [`ReviewSession`]; it
//! never needs to touch the pipeline modules directly.

use std::fmt;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::coco::{read_coco_json, Category, Dataset};
use crate::error::ReviewError;
use crate::export::{export_rejections, ExportOutcome};
use crate::extract::{extract_instances, ExtractOptions, Extraction};
use crate::index::{list_categories, position_by_name, select_category, CategoryListing};
use crate::review::{ReviewSession, ReviewSummary};

/// File extensions (lowercase) counted as images in the images directory.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Loads a COCO dataset. Any failure here is a load error.
pub fn load_dataset(path: &Path) -> Result<Dataset, ReviewError> {
    read_coco_json(path)
}

/// Counts image files directly inside `dir` (not recursive).
///
/// An unreadable or missing directory counts as empty.
pub fn count_image_files(dir: &Path) -> usize {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
        })
        .count()
}

/// Headline numbers shown after loading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadSummary {
    pub images: usize,
    pub annotations: usize,
    pub categories: usize,
    pub image_files: usize,
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Loaded {} images, {} annotations, {} categories ({} image files on disk)",
            self.images, self.annotations, self.categories, self.image_files
        )
    }
}

/// A loaded dataset plus where its images live and where output goes.
#[derive(Clone, Debug)]
pub struct Workspace {
    dataset: Dataset,
    images_dir: PathBuf,
    output_dir: PathBuf,
    options: ExtractOptions,
    selected: Option<usize>,
}

impl Workspace {
    pub fn new(
        dataset: Dataset,
        images_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            dataset,
            images_dir: images_dir.into(),
            output_dir: output_dir.into(),
            options: ExtractOptions::default(),
            selected: None,
        }
    }

    /// Loads `annotations` and sets up a workspace around it.
    pub fn open(
        annotations: &Path,
        images_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self, ReviewError> {
        let dataset = load_dataset(annotations)?;
        Ok(Self::new(dataset, images_dir, output_dir))
    }

    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn load_summary(&self) -> LoadSummary {
        LoadSummary {
            images: self.dataset.images.len(),
            annotations: self.dataset.annotations.len(),
            categories: self.dataset.categories.len(),
            image_files: count_image_files(&self.images_dir),
        }
    }

    pub fn categories(&self) -> CategoryListing {
        list_categories(&self.dataset)
    }

    /// Selects the category at `index` in source order.
    pub fn select(&mut self, index: usize) -> Result<&Category, ReviewError> {
        select_category(&self.dataset, index)?;
        self.selected = Some(index);
        self.selected_category()
    }

    pub fn select_by_name(&mut self, name: &str) -> Result<&Category, ReviewError> {
        let index = position_by_name(&self.dataset, name)?;
        self.select(index)
    }

    /// # Errors
    /// [`ReviewError::MissingCategorySelection`] if nothing was selected yet.
    pub fn selected_category(&self) -> Result<&Category, ReviewError> {
        let index = self.selected.ok_or(ReviewError::MissingCategorySelection)?;
        select_category(&self.dataset, index)
    }

    /// Crops every annotation of the selected category.
    pub fn extract(&self) -> Result<Extraction, ReviewError> {
        let category = self.selected_category()?;
        extract_instances(
            &self.dataset,
            category,
            &self.images_dir,
            &self.output_dir,
            &self.options,
        )
    }

    /// Extracts the selected category and opens a session over the result.
    ///
    /// # Errors
    /// [`ReviewError::EmptyExtractionResult`] if no instance survived
    /// extraction.
    pub fn start_review(&self) -> Result<ReviewSession, ReviewError> {
        ReviewSession::from_extraction(self.extract()?)
    }

    pub fn export(&self, session: &ReviewSession) -> Result<ExportOutcome, ReviewError> {
        export_rejections(session, &self.dataset, &self.output_dir)
    }

    /// Exports the session's rejections and summarizes the review.
    ///
    /// The session is only borrowed; on an export error it is still intact
    /// and `finish` can be called again.
    pub fn finish(&self, session: &ReviewSession) -> Result<ReviewSummary, ReviewError> {
        let outcome = self.export(session)?;
        Ok(summarize(session, outcome.path().map(Path::to_path_buf)))
    }

    /// Discards a session without exporting anything.
    pub fn abandon(&self, session: ReviewSession) -> ReviewSummary {
        tracing::info!(
            category = %session.category().name,
            decided = session.decided_count(),
            "review abandoned without export"
        );
        summarize(&session, None)
    }
}

fn summarize(session: &ReviewSession, export_path: Option<PathBuf>) -> ReviewSummary {
    ReviewSummary {
        category: session.category().name.clone(),
        total: session.len(),
        accepted: session.accepted_count(),
        rejected: session.rejected_count(),
        export_path,
        finished_early: !session.is_exhausted(),
    }
}
