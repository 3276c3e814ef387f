//! Row-count sources for sectioned lists.
//!
//! A [`RowSource`] is the row-count source of truth: how many sections the
//! list has and how many rows each section contains. Index paths, layout
//! metrics, and the selection controller all validate against it.
//!
//! Two concrete sources are provided:
//!
//! 1. **Table-backed**: [`SectionCounts`] wraps a plain `Vec<usize>`.
//! 2. **Closure-backed**: [`CountFn`] delegates to a host callback, for
//!    hosts whose counts live elsewhere.

use std::sync::Arc;

/// Type alias for a closure-backed row-count function.
pub type RowCountFn = Arc<dyn Fn(usize) -> usize + Send + Sync>;

/// The row-count source of truth for a sectioned list.
///
/// Implementations must be cheap to query: `section_count` and `row_count`
/// are called repeatedly during layout, reconciliation, and hit testing.
///
/// # Example
///
/// ```
/// use rowdeck::model::{RowSource, SectionCounts};
///
/// let rows = SectionCounts::new(vec![3, 0, 2]);
/// assert_eq!(rows.section_count(), 3);
/// assert_eq!(rows.row_count(0), 3);
/// assert_eq!(rows.total_rows(), 5);
/// assert!(rows.contains(2, 1));
/// assert!(!rows.contains(1, 0));
/// ```
pub trait RowSource: Send + Sync {
    /// Returns the number of sections.
    fn section_count(&self) -> usize;

    /// Returns the number of rows in the given section.
    ///
    /// Out-of-range sections must report zero rows.
    fn row_count(&self, section: usize) -> usize;

    // -------------------------------------------------------------------------
    // Provided helpers
    // -------------------------------------------------------------------------

    /// Returns the total number of rows across all sections.
    fn total_rows(&self) -> usize {
        (0..self.section_count()).map(|s| self.row_count(s)).sum()
    }

    /// Returns `true` if the given (section, row) pair addresses an
    /// existing row.
    fn contains(&self, section: usize, row: usize) -> bool {
        section < self.section_count() && row < self.row_count(section)
    }

    /// Returns `true` if the list holds no rows at all.
    ///
    /// Note that a list can have sections and still be empty.
    fn is_empty(&self) -> bool {
        self.total_rows() == 0
    }
}

/// A table-backed row source: one count per section.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionCounts {
    counts: Vec<usize>,
}

impl SectionCounts {
    /// Creates a row source from per-section row counts.
    pub fn new(counts: Vec<usize>) -> Self {
        Self { counts }
    }

    /// Returns the underlying per-section counts.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }
}

impl From<Vec<usize>> for SectionCounts {
    fn from(counts: Vec<usize>) -> Self {
        Self::new(counts)
    }
}

impl RowSource for SectionCounts {
    fn section_count(&self) -> usize {
        self.counts.len()
    }

    fn row_count(&self, section: usize) -> usize {
        self.counts.get(section).copied().unwrap_or(0)
    }
}

/// A closure-backed row source.
///
/// Mirrors hosts that expose row counts as a callback rather than a table.
///
/// # Example
///
/// ```
/// use rowdeck::model::{CountFn, RowSource};
///
/// // Sections 0..4, each with one more row than its index.
/// let rows = CountFn::new(4, |section| section + 1);
/// assert_eq!(rows.total_rows(), 10);
/// ```
pub struct CountFn {
    sections: usize,
    counts: RowCountFn,
}

impl CountFn {
    /// Creates a row source from a section count and a per-section row-count
    /// callback.
    pub fn new<F>(sections: usize, counts: F) -> Self
    where
        F: Fn(usize) -> usize + Send + Sync + 'static,
    {
        Self {
            sections,
            counts: Arc::new(counts),
        }
    }
}

impl RowSource for CountFn {
    fn section_count(&self) -> usize {
        self.sections
    }

    fn row_count(&self, section: usize) -> usize {
        if section < self.sections {
            (self.counts)(section)
        } else {
            0
        }
    }
}

impl std::fmt::Debug for CountFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountFn")
            .field("sections", &self.sections)
            .finish_non_exhaustive()
    }
}
