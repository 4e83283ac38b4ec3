//! The review session: a single cursor walking an ordered list of instances.
//!
//! The cursor ranges over `[0, N]`. While it is below `N` it points at the
//! instance on screen; at `N` the session is exhausted and every further
//! decision or navigation call fails with [`ReviewError::SessionExhausted`].
//!
//! Decisions are stored per instance with last-write-wins semantics. If the
//! reviewer steps back and re-decides an instance, the old outcome is taken
//! off its tally before the new one is added, so `accepted + rejected` never
//! exceeds the number of distinct instances decided.

mod report;

pub use report::{Progress, ReviewSummary};

use std::collections::HashSet;

use crate::coco::{Annotation, Category};
use crate::error::ReviewError;
use crate::extract::{Extraction, ReviewInstance};

/// The reviewer's verdict on one instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Decision {
    #[default]
    Undecided,
    Accepted,
    Rejected,
}

/// Review state for one category.
#[derive(Clone, Debug)]
pub struct ReviewSession {
    category: Category,
    instances: Vec<ReviewInstance>,
    cursor: usize,
    decisions: Vec<Decision>,
    /// Instance indices in the order they were rejected; may repeat.
    rejection_log: Vec<usize>,
    accepted: usize,
    rejected: usize,
}

impl ReviewSession {
    /// Starts a session at cursor 0.
    ///
    /// # Errors
    /// [`ReviewError::EmptyExtractionResult`] if there is nothing to review.
    pub fn new(category: Category, instances: Vec<ReviewInstance>) -> Result<Self, ReviewError> {
        Self::with_skipped(category, instances, 0)
    }

    /// Starts a session from the output of the extractor.
    pub fn from_extraction(extraction: Extraction) -> Result<Self, ReviewError> {
        let skipped = extraction.skipped.len();
        Self::with_skipped(extraction.category, extraction.instances, skipped)
    }

    fn with_skipped(
        category: Category,
        instances: Vec<ReviewInstance>,
        skipped: usize,
    ) -> Result<Self, ReviewError> {
        if instances.is_empty() {
            return Err(ReviewError::EmptyExtractionResult {
                category: category.name,
                skipped,
            });
        }
        debug_assert!(
            instances
                .iter()
                .all(|i| i.annotation.category_id == category.id),
            "every instance must belong to the reviewed category"
        );

        let decisions = vec![Decision::Undecided; instances.len()];
        Ok(Self {
            category,
            instances,
            cursor: 0,
            decisions,
            rejection_log: Vec::new(),
            accepted: 0,
            rejected: 0,
        })
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn instances(&self) -> &[ReviewInstance] {
        &self.instances
    }

    /// Number of instances (`N`).
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Always false: a session cannot be built without instances.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.instances.len()
    }

    /// The instance under the cursor.
    ///
    /// # Errors
    /// [`ReviewError::OutOfRange`] once the session is exhausted.
    pub fn current_instance(&self) -> Result<&ReviewInstance, ReviewError> {
        self.instances
            .get(self.cursor)
            .ok_or(ReviewError::OutOfRange {
                index: self.cursor,
                total: self.instances.len(),
            })
    }

    /// The recorded decision for instance `index`, if it exists.
    pub fn decision(&self, index: usize) -> Option<Decision> {
        self.decisions.get(index).copied()
    }

    /// Accepts the current instance and moves to the next one.
    pub fn accept(&mut self) -> Result<(), ReviewError> {
        self.decide(Decision::Accepted)
    }

    /// Rejects the current instance and moves to the next one.
    pub fn reject(&mut self) -> Result<(), ReviewError> {
        self.decide(Decision::Rejected)
    }

    /// Moves forward one instance without deciding. Advancing from the last
    /// instance exhausts the session.
    pub fn advance(&mut self) -> Result<(), ReviewError> {
        self.ensure_active()?;
        self.cursor += 1;
        tracing::debug!(cursor = self.cursor, "advance");
        Ok(())
    }

    /// Moves back one instance without touching any decision. A no-op on
    /// the first instance.
    pub fn retreat(&mut self) -> Result<(), ReviewError> {
        self.ensure_active()?;
        self.cursor = self.cursor.saturating_sub(1);
        tracing::debug!(cursor = self.cursor, "retreat");
        Ok(())
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected
    }

    /// Number of distinct instances that currently carry a decision.
    pub fn decided_count(&self) -> usize {
        self.accepted + self.rejected
    }

    /// Annotations whose current decision is `Rejected`.
    ///
    /// Ordered by when each was first rejected; an instance rejected twice
    /// appears once, and one rejected and then re-accepted not at all.
    pub fn rejected_annotations(&self) -> Vec<&Annotation> {
        let mut seen = HashSet::new();
        self.rejection_log
            .iter()
            .filter(|&&index| self.decisions[index] == Decision::Rejected)
            .map(|&index| &self.instances[index].annotation)
            .filter(|ann| seen.insert(ann.id))
            .collect()
    }

    /// Snapshot for status lines.
    pub fn progress(&self) -> Progress {
        Progress {
            position: self.cursor,
            total: self.instances.len(),
            accepted: self.accepted,
            rejected: self.rejected,
            current_file: self.current_instance().ok().map(|i| i.crop_file_name()),
        }
    }

    fn ensure_active(&self) -> Result<usize, ReviewError> {
        if self.is_exhausted() {
            return Err(ReviewError::SessionExhausted {
                total: self.instances.len(),
            });
        }
        Ok(self.cursor)
    }

    fn decide(&mut self, decision: Decision) -> Result<(), ReviewError> {
        let index = self.ensure_active()?;

        let previous = std::mem::replace(&mut self.decisions[index], decision);
        if let Some(tally) = self.tally_mut(previous) {
            *tally -= 1;
        }
        if let Some(tally) = self.tally_mut(decision) {
            *tally += 1;
        }
        if decision == Decision::Rejected {
            self.rejection_log.push(index);
        }

        tracing::debug!(
            index,
            annotation_id = %self.instances[index].annotation.id,
            ?previous,
            ?decision,
            "decided"
        );

        self.cursor += 1;
        Ok(())
    }

    fn tally_mut(&mut self, decision: Decision) -> Option<&mut usize> {
        match decision {
            Decision::Accepted => Some(&mut self.accepted),
            Decision::Rejected => Some(&mut self.rejected),
            Decision::Undecided => None,
        }
    }
}
