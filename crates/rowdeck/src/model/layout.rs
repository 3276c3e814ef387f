//! Pixel layout metrics for sectioned lists.
//!
//! The layout is a single vertical strip: an optional top header, then for
//! each section one section header followed by that section's rows. All
//! heights are uniform per element kind, so every position is a closed-form
//! function of an index path, so no per-row measurement pass is needed.

use super::index::RowIndexPath;
use super::rows::RowSource;

/// Uniform heights for the elements of a sectioned list.
///
/// `section_header_height` is folded into every row offset (one header per
/// section up to and including the row's own), so hosts that render no
/// section headers leave it at zero. `top_header_height` is `None` when no
/// top header exists at all, which is distinct from a zero-height one.
///
/// # Example
///
/// ```
/// use rowdeck::model::{ListMetrics, RowIndexPath, SectionCounts};
///
/// let rows = SectionCounts::new(vec![2, 2]);
/// let metrics = ListMetrics::uniform(10.0).with_section_headers(4.0);
///
/// // First row of the second section: two headers and two rows above it.
/// let path = RowIndexPath::resolve(&rows, 1, 0)?;
/// assert_eq!(metrics.offset_of(path), 4.0 * 2.0 + 10.0 * 2.0);
/// # Ok::<(), rowdeck::Error>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ListMetrics {
    /// Height of every row.
    pub row_height: f32,
    /// Height of every section header; zero when sections have no headers.
    pub section_header_height: f32,
    /// Height of the top header, when one exists.
    pub top_header_height: Option<f32>,
}

impl ListMetrics {
    /// Creates metrics with the given row height and no headers.
    pub fn uniform(row_height: f32) -> Self {
        Self {
            row_height,
            section_header_height: 0.0,
            top_header_height: None,
        }
    }

    /// Sets the section header height using builder pattern.
    pub fn with_section_headers(mut self, height: f32) -> Self {
        self.section_header_height = height;
        self
    }

    /// Sets the top header height using builder pattern.
    pub fn with_top_header(mut self, height: f32) -> Self {
        self.top_header_height = Some(height);
        self
    }

    /// Returns the top header height, or zero when there is none.
    #[inline]
    pub fn top_height(&self) -> f32 {
        self.top_header_height.unwrap_or(0.0)
    }

    /// Returns the pixel offset of a row within the content strip.
    ///
    /// Every row sits below the top header, one section header per section
    /// up to and including its own, and all preceding rows.
    pub fn offset_of(&self, path: RowIndexPath) -> f32 {
        self.top_height()
            + self.section_header_height * (path.section() as f32 + 1.0)
            + self.row_height * path.absolute_row() as f32
    }

    /// Returns the pixel offset of a section's header.
    pub fn section_header_offset(&self, rows: &dyn RowSource, section: usize) -> f32 {
        let preceding: usize = (0..section).map(|s| rows.row_count(s)).sum();
        self.top_height()
            + self.section_header_height * section as f32
            + self.row_height * preceding as f32
    }

    /// Returns the total pixel height of the content strip.
    pub fn content_height(&self, rows: &dyn RowSource) -> f32 {
        self.top_height()
            + self.section_header_height * rows.section_count() as f32
            + self.row_height * rows.total_rows() as f32
    }

    /// Returns the row under a content-space pixel offset.
    ///
    /// The inverse of [`offset_of`](Self::offset_of): `None` over the top
    /// header, over a section header, or past the end of the content.
    pub fn row_at(&self, rows: &dyn RowSource, y: f32) -> Option<RowIndexPath> {
        if y < 0.0 || self.row_height <= 0.0 {
            return None;
        }

        let mut cursor = self.top_height();
        if y < cursor {
            return None;
        }

        let mut absolute = 0;
        for section in 0..rows.section_count() {
            cursor += self.section_header_height;
            if y < cursor {
                // Over this section's header.
                return None;
            }

            let count = rows.row_count(section);
            let section_end = cursor + self.row_height * count as f32;
            if y < section_end {
                let row = (((y - cursor) / self.row_height) as usize).min(count - 1);
                return Some(RowIndexPath::from_parts(
                    section,
                    row,
                    absolute + row,
                ));
            }

            cursor = section_end;
            absolute += count;
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RowIndexPath, SectionCounts};

    fn all_paths(rows: &SectionCounts) -> Vec<RowIndexPath> {
        (0..rows.total_rows())
            .map(|a| RowIndexPath::from_absolute(rows, a).unwrap())
            .collect()
    }

    #[test]
    fn test_offset_formula() {
        let rows = SectionCounts::new(vec![2, 3]);
        let metrics = ListMetrics::uniform(10.0)
            .with_section_headers(5.0)
            .with_top_header(20.0);

        let first = RowIndexPath::resolve(&rows, 0, 0).unwrap();
        assert_eq!(metrics.offset_of(first), 25.0);

        // Section 1, row 1: top (20) + two headers (10) + three rows (30).
        let path = RowIndexPath::resolve(&rows, 1, 1).unwrap();
        assert_eq!(metrics.offset_of(path), 60.0);
    }

    #[test]
    fn test_offsets_monotone_with_header_step_at_boundaries() {
        let rows = SectionCounts::new(vec![3, 1, 4]);
        let metrics = ListMetrics::uniform(8.0).with_section_headers(6.0);
        let paths = all_paths(&rows);

        for pair in paths.windows(2) {
            let step = metrics.offset_of(pair[1]) - metrics.offset_of(pair[0]);
            if pair[1].section() == pair[0].section() {
                assert_eq!(step, metrics.row_height);
            } else {
                // Crossing a section boundary adds exactly one header.
                assert_eq!(step, metrics.row_height + metrics.section_header_height);
            }
        }
    }

    #[test]
    fn test_content_height() {
        let rows = SectionCounts::new(vec![2, 0, 3]);
        let metrics = ListMetrics::uniform(10.0)
            .with_section_headers(4.0)
            .with_top_header(7.0);
        // 7 + 3 headers * 4 + 5 rows * 10
        assert_eq!(metrics.content_height(&rows), 69.0);

        let last = RowIndexPath::resolve(&rows, 2, 2).unwrap();
        assert_eq!(
            metrics.offset_of(last) + metrics.row_height,
            metrics.content_height(&rows)
        );
    }

    #[test]
    fn test_row_at_inverts_offset_of() {
        let rows = SectionCounts::new(vec![2, 0, 3]);
        let metrics = ListMetrics::uniform(10.0)
            .with_section_headers(4.0)
            .with_top_header(7.0);

        for path in all_paths(&rows) {
            let top = metrics.offset_of(path);
            assert_eq!(metrics.row_at(&rows, top), Some(path));
            assert_eq!(metrics.row_at(&rows, top + 9.9), Some(path));
        }
    }

    #[test]
    fn test_row_at_misses_headers_and_ends() {
        let rows = SectionCounts::new(vec![2, 2]);
        let metrics = ListMetrics::uniform(10.0)
            .with_section_headers(4.0)
            .with_top_header(7.0);

        assert_eq!(metrics.row_at(&rows, -1.0), None);
        // Over the top header.
        assert_eq!(metrics.row_at(&rows, 3.0), None);
        // Over the first section header.
        assert_eq!(metrics.row_at(&rows, 8.0), None);
        // Over the second section header (7 + 4 + 20 = 31 .. 35).
        assert_eq!(metrics.row_at(&rows, 33.0), None);
        // Past the end of the content.
        assert_eq!(metrics.row_at(&rows, metrics.content_height(&rows)), None);
    }

    #[test]
    fn test_section_header_offset() {
        let rows = SectionCounts::new(vec![2, 2]);
        let metrics = ListMetrics::uniform(10.0)
            .with_section_headers(4.0)
            .with_top_header(7.0);

        assert_eq!(metrics.section_header_offset(&rows, 0), 7.0);
        assert_eq!(metrics.section_header_offset(&rows, 1), 31.0);
    }
}
