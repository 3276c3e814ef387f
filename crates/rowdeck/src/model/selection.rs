//! Selection state for sectioned lists.
//!
//! [`RowSelection`] is a plain value: the currently highlighted row (if any)
//! plus the set of selected rows. Highlight is transient focus (the row the
//! pointer or keyboard is on) while selection is the committed choice; the
//! two move independently.
//!
//! The value is mutated only by the selection controller; consumers receive
//! clones through change notifications and can never reach the controller's
//! own copy. Mutating accessors are therefore crate-private,
//! while construction of an *initial* value (to seed a controller) and all
//! queries are public.

use std::collections::HashSet;

use super::index::RowIndexPath;

/// Highlight and selection state of a sectioned list.
///
/// # Example
///
/// ```
/// use rowdeck::model::{RowIndexPath, RowSelection, SectionCounts};
///
/// let rows = SectionCounts::new(vec![2, 2]);
/// let second = RowIndexPath::resolve(&rows, 0, 1)?;
///
/// let seed = RowSelection::new().with_highlighted(second);
/// assert_eq!(seed.highlighted_row(), Some(second));
/// assert!(!seed.has_selection());
/// # Ok::<(), rowdeck::Error>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowSelection {
    /// The row with transient focus, if any.
    highlighted: Option<RowIndexPath>,
    /// Selected rows in selection order.
    selected: Vec<RowIndexPath>,
    /// Absolute ordinals of selected rows for O(1) lookup.
    selected_ids: HashSet<usize>,
}

impl RowSelection {
    /// Creates an empty selection state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the highlighted row using builder pattern.
    pub fn with_highlighted(mut self, path: RowIndexPath) -> Self {
        self.highlighted = Some(path);
        self
    }

    /// Seeds the selected rows using builder pattern.
    ///
    /// Duplicate paths (same absolute ordinal) are kept once, first
    /// occurrence wins.
    pub fn with_selected<I>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = RowIndexPath>,
    {
        for path in paths {
            self.select(path);
        }
        self
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the highlighted row, if any.
    pub fn highlighted_row(&self) -> Option<RowIndexPath> {
        self.highlighted
    }

    /// Checks if a row is selected.
    pub fn is_selected(&self, path: RowIndexPath) -> bool {
        self.selected_ids.contains(&path.absolute_row())
    }

    /// Returns `true` if any rows are selected.
    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Returns the number of selected rows.
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Returns the selected rows in selection order.
    pub fn selected_rows(&self) -> &[RowIndexPath] {
        &self.selected
    }

    // =========================================================================
    // Mutators (controller only)
    // =========================================================================

    /// Sets or clears the highlight. Returns `true` if the state changed.
    pub(crate) fn set_highlight(&mut self, path: Option<RowIndexPath>) -> bool {
        if self.highlighted == path {
            return false;
        }
        self.highlighted = path;
        true
    }

    /// Overwrites the highlight without change detection.
    ///
    /// Reconciliation can rebuild a path whose (section, row) reading
    /// shifted while its absolute ordinal stayed put; absolute-only
    /// equality would treat that as a no-op and keep the stale parts.
    pub(crate) fn rebind_highlight(&mut self, path: Option<RowIndexPath>) {
        self.highlighted = path;
    }

    /// Adds a row to the selection. Returns `true` if it was not already
    /// selected.
    pub(crate) fn select(&mut self, path: RowIndexPath) -> bool {
        if self.selected_ids.insert(path.absolute_row()) {
            self.selected.push(path);
            true
        } else {
            false
        }
    }

    /// Removes a row from the selection. Returns `true` if it was selected.
    pub(crate) fn deselect(&mut self, path: RowIndexPath) -> bool {
        if self.selected_ids.remove(&path.absolute_row()) {
            self.selected.retain(|p| *p != path);
            true
        } else {
            false
        }
    }

    /// Removes all rows from the selection. Returns `true` if any were
    /// selected.
    pub(crate) fn clear_selection(&mut self) -> bool {
        if self.selected.is_empty() {
            return false;
        }
        self.selected.clear();
        self.selected_ids.clear();
        true
    }

    /// Replaces the selected rows wholesale, preserving the given order.
    ///
    /// Used by reconciliation, which rebuilds every surviving path against
    /// fresh row counts.
    pub(crate) fn replace_selected(&mut self, paths: Vec<RowIndexPath>) {
        self.selected_ids = paths.iter().map(|p| p.absolute_row()).collect();
        self.selected = paths;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RowSource, SectionCounts};

    fn paths(counts: &[usize]) -> (SectionCounts, Vec<RowIndexPath>) {
        let rows = SectionCounts::new(counts.to_vec());
        let all = (0..rows.total_rows())
            .map(|a| RowIndexPath::from_absolute(&rows, a).unwrap())
            .collect();
        (rows, all)
    }

    #[test]
    fn test_empty_state() {
        let state = RowSelection::new();
        assert_eq!(state.highlighted_row(), None);
        assert!(!state.has_selection());
        assert_eq!(state.selected_count(), 0);
    }

    #[test]
    fn test_select_deselect() {
        let (_, all) = paths(&[2, 2]);
        let mut state = RowSelection::new();

        assert!(state.select(all[1]));
        assert!(!state.select(all[1]));
        assert!(state.is_selected(all[1]));
        assert_eq!(state.selected_count(), 1);

        assert!(state.deselect(all[1]));
        assert!(!state.deselect(all[1]));
        assert!(!state.has_selection());
    }

    #[test]
    fn test_selection_order_preserved() {
        let (_, all) = paths(&[3, 1]);
        let mut state = RowSelection::new();
        state.select(all[3]);
        state.select(all[0]);
        state.select(all[2]);

        let order: Vec<usize> = state
            .selected_rows()
            .iter()
            .map(|p| p.absolute_row())
            .collect();
        assert_eq!(order, vec![3, 0, 2]);
    }

    #[test]
    fn test_set_highlight_reports_change() {
        let (_, all) = paths(&[2]);
        let mut state = RowSelection::new();

        assert!(state.set_highlight(Some(all[0])));
        assert!(!state.set_highlight(Some(all[0])));
        assert!(state.set_highlight(Some(all[1])));
        assert!(state.set_highlight(None));
        assert!(!state.set_highlight(None));
    }

    #[test]
    fn test_builder_seeding_dedups() {
        let (_, all) = paths(&[2, 1]);
        let state = RowSelection::new()
            .with_highlighted(all[2])
            .with_selected([all[0], all[2], all[0]]);

        assert_eq!(state.highlighted_row(), Some(all[2]));
        assert_eq!(state.selected_count(), 2);
    }

    #[test]
    fn test_replace_selected_rebuilds_ids() {
        let (_, all) = paths(&[4]);
        let mut state = RowSelection::new().with_selected([all[0], all[3]]);

        state.replace_selected(vec![all[1]]);
        assert!(state.is_selected(all[1]));
        assert!(!state.is_selected(all[0]));
        assert!(!state.is_selected(all[3]));
    }

    #[test]
    fn test_clone_equality() {
        let (_, all) = paths(&[3]);
        let mut state = RowSelection::new();
        state.select(all[1]);
        state.set_highlight(Some(all[0]));

        let snapshot = state.clone();
        assert_eq!(snapshot, state);

        state.set_highlight(Some(all[2]));
        assert_ne!(snapshot, state);
    }
}
