//! Index paths for addressing rows in a sectioned list.
//!
//! The `RowIndexPath` type is the fundamental way to reference a row. It
//! pairs the section-relative address (section, row) with the row's absolute
//! ordinal in the flattened list, which is what every comparison and every
//! piece of pixel math operates on.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};

use super::rows::RowSource;

/// The position of a row within a sectioned list.
///
/// A `RowIndexPath` carries both addressing schemes for a row:
///
/// - `(section, row)` - the section-relative address, used to look the row
///   up in a [`RowSource`]
/// - `absolute_row` - the row's ordinal in the flattened list (the count of
///   all rows in preceding sections plus `row`), used for equality,
///   ordering, and pixel-offset math
///
/// The absolute ordinal is derived at construction and is the *sole* input
/// to `PartialEq`, `Ord`, and `Hash`: two paths address the same row exactly
/// when their absolute ordinals match under the same row source. Section and
/// row are never compared directly.
///
/// # Path Validity
///
/// Paths are validated against a row source when built and should be used
/// promptly. After the source's counts change, previously obtained paths may
/// be stale; the selection controller reconciles its own stored paths, and
/// anything else should re-resolve.
///
/// # Example
///
/// ```
/// use rowdeck::model::{RowIndexPath, SectionCounts};
///
/// let rows = SectionCounts::new(vec![3, 2]);
///
/// let path = RowIndexPath::resolve(&rows, 1, 0)?;
/// assert_eq!(path.absolute_row(), 3);
///
/// // The reverse mapping recovers the section-relative address.
/// let same = RowIndexPath::from_absolute(&rows, 3).unwrap();
/// assert_eq!(same, path);
/// # Ok::<(), rowdeck::Error>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct RowIndexPath {
    /// The section containing the row.
    section: usize,
    /// The row's index within its section.
    row: usize,
    /// The row's ordinal in the flattened list.
    absolute: usize,
}

impl RowIndexPath {
    /// Builds a validated path for `(section, row)` against a row source.
    ///
    /// Computes the absolute ordinal by summing the row counts of all
    /// preceding sections.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] when `section` is past the section
    /// count or `row` is past that section's row count.
    pub fn resolve(rows: &dyn RowSource, section: usize, row: usize) -> Result<Self> {
        if !rows.contains(section, row) {
            return Err(Error::out_of_range(section, row));
        }
        let preceding: usize = (0..section).map(|s| rows.row_count(s)).sum();
        Ok(Self {
            section,
            row,
            absolute: preceding + row,
        })
    }

    /// Recovers the section-relative address of an absolute ordinal.
    ///
    /// Returns `None` when `absolute` is past the total row count.
    pub fn from_absolute(rows: &dyn RowSource, absolute: usize) -> Option<Self> {
        let mut preceding = 0;
        for section in 0..rows.section_count() {
            let count = rows.row_count(section);
            if absolute < preceding + count {
                return Some(Self {
                    section,
                    row: absolute - preceding,
                    absolute,
                });
            }
            preceding += count;
        }
        None
    }

    /// Assembles a path from parts already known to be consistent.
    ///
    /// Callers must guarantee that `(section, row)` exists and that
    /// `absolute` is its ordinal under the row source in play.
    pub(crate) const fn from_parts(section: usize, row: usize, absolute: usize) -> Self {
        Self {
            section,
            row,
            absolute,
        }
    }

    /// Returns the section containing the row.
    #[inline]
    pub fn section(&self) -> usize {
        self.section
    }

    /// Returns the row's index within its section.
    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Returns the row's ordinal in the flattened list.
    #[inline]
    pub fn absolute_row(&self) -> usize {
        self.absolute
    }
}

impl PartialEq for RowIndexPath {
    fn eq(&self, other: &Self) -> bool {
        self.absolute == other.absolute
    }
}

impl Eq for RowIndexPath {}

impl Hash for RowIndexPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.absolute.hash(state);
    }
}

impl PartialOrd for RowIndexPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RowIndexPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.absolute.cmp(&other.absolute)
    }
}
