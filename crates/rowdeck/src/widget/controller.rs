//! The selection controller: highlight and selection state behind a
//! sectioned list.
//!
//! [`SelectionController`] owns a [`RowSelection`] and keeps it valid while
//! the host reconfigures the list out from under it. The host pushes a fresh
//! [`ListConfig`] through [`configure`] whenever row counts, heights,
//! callbacks, or policy flags change; the controller reconciles its stored
//! paths against the new counts, applies auto-highlighting, and announces
//! the result once, and only when something actually changed.
//!
//! Interactions (pointer hover, choose gestures, programmatic stepping) come
//! in through the imperative methods. Choosing is a pure notification: it
//! fires [`row_chosen`] and never mutates highlight or selection.
//!
//! The controller may hold the list's [`Viewport`] to scroll rows into view
//! and to watch for the scrolled-to-end edge. Viewports are single-holder:
//! [`attach_viewport`] acquires, [`detach`] releases, and dropping the
//! controller releases as a backstop, so a replaced controller can never
//! keep observing a viewport it no longer owns.
//!
//! [`configure`]: SelectionController::configure
//! [`row_chosen`]: SelectionController::row_chosen
//! [`attach_viewport`]: SelectionController::attach_viewport
//! [`detach`]: SelectionController::detach

use std::sync::Arc;

use parking_lot::Mutex;
use rowdeck_core::{ConnectionId, Signal};

use crate::error::{ConfigError, Result};
use crate::model::{ListMetrics, RowIndexPath, RowSelection, RowSource};

use super::scroll::ScrollEndDetector;
use super::viewport::Viewport;

/// Type alias for a row selectability predicate.
pub type RowPredicate = Arc<dyn Fn(&RowIndexPath) -> bool + Send + Sync>;

/// What to do with a highlighted row that no longer exists after the host
/// changed its row counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StaleHighlightPolicy {
    /// Retarget the highlight to the nearest existing row by absolute
    /// ordinal (default).
    #[default]
    Clamp,
    /// Clear the highlight.
    Clear,
}

/// Host-supplied configuration for a sectioned list.
///
/// None of this is owned by the controller: the host re-applies the whole
/// bag through [`SelectionController::configure`] every time any part of it
/// changes, and the controller holds only the most recent application.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use rowdeck::model::{ListMetrics, SectionCounts};
/// use rowdeck::widget::ListConfig;
///
/// let config = ListConfig::new(
///     Arc::new(SectionCounts::new(vec![3, 5])),
///     ListMetrics::uniform(24.0).with_section_headers(18.0),
/// )
/// .with_section_headers(true)
/// .with_keep_highlight(true)
/// .with_auto_highlight_first(true);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct ListConfig {
    /// The row-count source of truth.
    pub rows: Arc<dyn RowSource>,
    /// Pixel heights of rows and headers.
    pub metrics: ListMetrics,
    /// Whether a top header is rendered above the first section.
    pub has_top_header: bool,
    /// Whether a header is rendered above each section's rows.
    pub has_section_headers: bool,
    /// Selectability predicate; absent means every row is selectable.
    pub can_select: Option<RowPredicate>,
    /// Highlight the first selectable row whenever nothing is highlighted.
    pub auto_highlight_first: bool,
    /// Retain the highlight when the pointer leaves the list.
    pub keep_highlight: bool,
    /// Reconciliation policy for a highlight whose row vanished.
    pub stale_highlight: StaleHighlightPolicy,
}

impl ListConfig {
    /// Creates a configuration with the given row source and metrics; all
    /// policies default off and every row is selectable.
    pub fn new(rows: Arc<dyn RowSource>, metrics: ListMetrics) -> Self {
        Self {
            rows,
            metrics,
            has_top_header: false,
            has_section_headers: false,
            can_select: None,
            auto_highlight_first: false,
            keep_highlight: false,
            stale_highlight: StaleHighlightPolicy::default(),
        }
    }

    /// Sets whether a top header is rendered, using builder pattern.
    pub fn with_top_header(mut self, enabled: bool) -> Self {
        self.has_top_header = enabled;
        self
    }

    /// Sets whether section headers are rendered, using builder pattern.
    pub fn with_section_headers(mut self, enabled: bool) -> Self {
        self.has_section_headers = enabled;
        self
    }

    /// Sets the selectability predicate using builder pattern.
    pub fn with_can_select<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&RowIndexPath) -> bool + Send + Sync + 'static,
    {
        self.can_select = Some(Arc::new(predicate));
        self
    }

    /// Sets auto-highlighting of the first selectable row, using builder
    /// pattern.
    pub fn with_auto_highlight_first(mut self, enabled: bool) -> Self {
        self.auto_highlight_first = enabled;
        self
    }

    /// Sets highlight retention on pointer exit, using builder pattern.
    pub fn with_keep_highlight(mut self, enabled: bool) -> Self {
        self.keep_highlight = enabled;
        self
    }

    /// Sets the stale-highlight reconciliation policy, using builder
    /// pattern.
    pub fn with_stale_highlight(mut self, policy: StaleHighlightPolicy) -> Self {
        self.stale_highlight = policy;
        self
    }

    /// Checks the configuration's preconditions.
    ///
    /// Violations are host programming errors: a rendered header needs a
    /// height, and auto-highlighting a row only to drop it on the next
    /// pointer exit is contradictory.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.has_top_header && self.metrics.top_header_height.is_none() {
            return Err(ConfigError::TopHeaderHeightMissing);
        }
        if self.has_section_headers && self.metrics.section_header_height <= 0.0 {
            return Err(ConfigError::SectionHeaderHeightMissing);
        }
        if self.auto_highlight_first && !self.keep_highlight {
            return Err(ConfigError::AutoHighlightWithoutKeep);
        }
        if self.metrics.row_height <= 0.0 {
            return Err(ConfigError::NonPositiveRowHeight);
        }
        Ok(())
    }

    fn row_selectable(&self, path: &RowIndexPath) -> bool {
        self.can_select.as_ref().is_none_or(|f| f(path))
    }
}

/// Manages highlight and selection state for a sectioned list.
///
/// # Signals
///
/// - `selection_changed(RowSelection)`: Emitted with a clone of the state
///   after every observable change, whether from an interaction or from
///   reconfiguration. Re-applying an unchanged configuration emits nothing.
/// - `row_chosen(RowIndexPath)`: Emitted when a row receives a commit
///   gesture. Pure notification; state is untouched.
/// - `reached_end()`: Emitted when the attached viewport scrolls to within
///   the end threshold, once per crossing (see
///   [`ScrollEndDetector`]). Reachable via
///   [`reached_end`](Self::reached_end).
pub struct SelectionController {
    config: ListConfig,
    state: RowSelection,
    viewport: Option<Arc<Viewport>>,
    /// Latch shared with the viewport's scroll slot.
    end_watch: Arc<Mutex<ScrollEndDetector>>,
    reached_end: Arc<Signal<()>>,
    scroll_conn: Option<ConnectionId>,

    /// Emitted with a state clone after every observable change.
    pub selection_changed: Signal<RowSelection>,
    /// Emitted when a row receives a commit gesture.
    pub row_chosen: Signal<RowIndexPath>,
}

impl SelectionController {
    /// Creates a controller, optionally seeded with an initial selection.
    ///
    /// The seed is applied exactly once, here; it is immediately reconciled
    /// against the configuration (stale paths clamped or cleared,
    /// auto-highlight applied), so the controller never starts in an
    /// invalid state.
    ///
    /// # Errors
    ///
    /// Fails fast on configuration precondition violations.
    pub fn new(config: ListConfig, initial: Option<RowSelection>) -> Result<Self> {
        config.validate()?;
        let mut controller = Self {
            config,
            state: initial.unwrap_or_default(),
            viewport: None,
            end_watch: Arc::new(Mutex::new(ScrollEndDetector::new())),
            reached_end: Arc::new(Signal::new()),
            scroll_conn: None,
            selection_changed: Signal::new(),
            row_chosen: Signal::new(),
        };
        controller.reconcile();
        Ok(controller)
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Applies a new configuration and reconciles the state against it.
    ///
    /// Idempotent with respect to notifications: if the resulting state is
    /// unchanged, `selection_changed` stays silent. On error the previous
    /// configuration and state are untouched.
    ///
    /// # Errors
    ///
    /// Fails fast on configuration precondition violations.
    pub fn configure(&mut self, config: ListConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.reconcile();
        self.sync_viewport_extent();
        Ok(())
    }

    /// Forces a reconciliation pass with the current configuration.
    ///
    /// Useful when the host mutated data behind its [`RowSource`] in place
    /// rather than swapping configurations.
    pub fn refresh(&mut self) {
        self.reconcile();
        self.sync_viewport_extent();
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    // =========================================================================
    // State queries
    // =========================================================================

    /// Returns a clone of the current selection state.
    pub fn selection(&self) -> RowSelection {
        self.state.clone()
    }

    /// Returns the highlighted row, if any.
    pub fn highlighted_row(&self) -> Option<RowIndexPath> {
        self.state.highlighted_row()
    }

    /// Checks if a row is highlighted.
    pub fn is_row_highlighted(&self, path: RowIndexPath) -> bool {
        self.state.highlighted_row() == Some(path)
    }

    /// Checks if a row is selected.
    pub fn is_row_selected(&self, path: RowIndexPath) -> bool {
        self.state.is_selected(path)
    }

    // =========================================================================
    // Highlight operations
    // =========================================================================

    /// Highlights a row, if the selectability predicate permits.
    ///
    /// Used both for pointer entry onto a row and for programmatic
    /// highlighting. Returns `true` if the row is now highlighted.
    pub fn highlight_row(&mut self, path: RowIndexPath) -> bool {
        if !self.config.row_selectable(&path) {
            return false;
        }
        if self.state.set_highlight(Some(path)) {
            self.emit_selection();
        }
        true
    }

    /// Reacts to the pointer leaving the list.
    ///
    /// Clears the highlight unless the configuration keeps it.
    pub fn pointer_exited(&mut self) {
        if self.config.keep_highlight {
            return;
        }
        if self.state.set_highlight(None) {
            self.emit_selection();
        }
    }

    /// Clears the highlight unconditionally.
    pub fn clear_highlight(&mut self) {
        if self.state.set_highlight(None) {
            self.emit_selection();
        }
    }

    /// Moves the highlight to the next selectable row after the current
    /// one, in absolute order; starts from the top when nothing is
    /// highlighted. Returns `true` if the highlight moved.
    pub fn highlight_next(&mut self) -> bool {
        let start = self
            .state
            .highlighted_row()
            .map_or(0, |p| p.absolute_row() + 1);
        let total = self.config.rows.total_rows();
        self.highlight_scan(start..total)
    }

    /// Moves the highlight to the previous selectable row before the
    /// current one, in absolute order; starts from the bottom when nothing
    /// is highlighted. Returns `true` if the highlight moved.
    pub fn highlight_previous(&mut self) -> bool {
        let total = self.config.rows.total_rows();
        let end = match self.state.highlighted_row() {
            Some(p) => p.absolute_row(),
            None => total,
        };
        self.highlight_scan((0..end).rev())
    }

    fn highlight_scan<I>(&mut self, ordinals: I) -> bool
    where
        I: IntoIterator<Item = usize>,
    {
        let rows = self.config.rows.clone();
        for ordinal in ordinals {
            let Some(path) = RowIndexPath::from_absolute(&*rows, ordinal) else {
                break;
            };
            if self.config.row_selectable(&path) {
                if self.state.set_highlight(Some(path)) {
                    self.emit_selection();
                }
                return true;
            }
        }
        false
    }

    // =========================================================================
    // Selection operations
    // =========================================================================

    /// Adds a row to the selection, if the selectability predicate permits.
    /// Returns `true` if the selection changed.
    pub fn select_row(&mut self, path: RowIndexPath) -> bool {
        if !self.config.row_selectable(&path) {
            return false;
        }
        if self.state.select(path) {
            self.emit_selection();
            true
        } else {
            false
        }
    }

    /// Removes a row from the selection. Returns `true` if the selection
    /// changed.
    pub fn deselect_row(&mut self, path: RowIndexPath) -> bool {
        if self.state.deselect(path) {
            self.emit_selection();
            true
        } else {
            false
        }
    }

    /// Toggles a row's selection. Deselecting is always allowed; selecting
    /// goes through the selectability predicate.
    pub fn toggle_row(&mut self, path: RowIndexPath) -> bool {
        if self.state.is_selected(path) {
            self.deselect_row(path)
        } else {
            self.select_row(path)
        }
    }

    /// Clears the selection (the highlight is untouched).
    pub fn clear_selection(&mut self) {
        if self.state.clear_selection() {
            self.emit_selection();
        }
    }

    // =========================================================================
    // Choose
    // =========================================================================

    /// Reports a commit gesture on a row.
    ///
    /// Choosing is a notification, not a state mutation: highlight and
    /// selection are untouched.
    pub fn choose_row(&self, path: RowIndexPath) {
        tracing::trace!(
            target: "rowdeck::controller",
            section = path.section(),
            row = path.row(),
            "row chosen"
        );
        self.row_chosen.emit(path);
    }

    // =========================================================================
    // Viewport
    // =========================================================================

    /// Attaches the list's viewport to this controller.
    ///
    /// Acquires the viewport under the single-holder discipline and
    /// subscribes the scroll-edge watcher to its scroll notifications. An
    /// already-attached viewport is detached first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ViewportInUse`] if another controller holds
    /// the viewport; that controller must detach first.
    pub fn attach_viewport(&mut self, viewport: Arc<Viewport>) -> Result<()> {
        self.detach();
        viewport.acquire()?;

        let watch = self.end_watch.clone();
        let reached = self.reached_end.clone();
        let weak = Arc::downgrade(&viewport);
        let conn = viewport.scrolled.connect(move |_top| {
            let Some(vp) = weak.upgrade() else { return };
            let crossed = watch.lock().observe(vp.distance_to_bottom());
            if crossed {
                reached.emit(());
            }
        });

        self.scroll_conn = Some(conn);
        self.viewport = Some(viewport);
        self.sync_viewport_extent();
        tracing::debug!(target: "rowdeck::controller", "viewport attached");
        Ok(())
    }

    /// Detaches from the viewport, releasing it for the next holder.
    ///
    /// Unsubscribes from scroll notifications and resets the scroll-edge
    /// watcher, so no stale notification can fire after the handoff.
    pub fn detach(&mut self) {
        if let Some(viewport) = self.viewport.take() {
            if let Some(conn) = self.scroll_conn.take() {
                viewport.scrolled.disconnect(conn);
            }
            viewport.release();
            self.end_watch.lock().reset();
            tracing::debug!(target: "rowdeck::controller", "viewport detached");
        }
    }

    /// Returns the attached viewport, if any.
    pub fn viewport(&self) -> Option<&Arc<Viewport>> {
        self.viewport.as_ref()
    }

    /// The scrolled-to-end notification signal.
    pub fn reached_end(&self) -> &Signal<()> {
        &self.reached_end
    }

    /// Scrolls the attached viewport the minimal distance that brings a row
    /// fully into view. Does nothing without a viewport.
    pub fn reveal_row(&self, path: RowIndexPath) {
        let Some(viewport) = &self.viewport else {
            return;
        };
        let top = self.config.metrics.offset_of(path);
        let bottom = top + self.config.metrics.row_height;
        let view_top = viewport.scroll_top();
        let view_bottom = view_top + viewport.view_height();

        if top < view_top {
            viewport.set_scroll_top(top);
        } else if bottom > view_bottom {
            viewport.set_scroll_top(bottom - viewport.view_height());
        }
    }

    /// Scrolls the highlighted row into view, if there is one.
    pub fn reveal_highlight(&self) {
        if let Some(path) = self.state.highlighted_row() {
            self.reveal_row(path);
        }
    }

    // =========================================================================
    // Reconciliation
    // =========================================================================

    /// Brings the stored state back in line with the current row counts.
    ///
    /// Every stored path is rebuilt so its absolute ordinal reflects the
    /// new counts; a highlight whose row vanished is clamped to the nearest
    /// existing ordinal or cleared per policy; selected rows whose rows
    /// vanished are pruned; and auto-highlighting fills an empty highlight.
    /// Emits at most one `selection_changed`.
    fn reconcile(&mut self) {
        let rows = self.config.rows.clone();
        let before = self.state.clone();

        let next_highlight = match self.state.highlighted_row() {
            Some(path) if rows.contains(path.section(), path.row()) => {
                RowIndexPath::resolve(&*rows, path.section(), path.row()).ok()
            }
            Some(path) => match self.config.stale_highlight {
                StaleHighlightPolicy::Clamp => {
                    let total = rows.total_rows();
                    let clamped = total
                        .checked_sub(1)
                        .map(|last| path.absolute_row().min(last))
                        .and_then(|ordinal| RowIndexPath::from_absolute(&*rows, ordinal));
                    tracing::debug!(
                        target: "rowdeck::controller",
                        from = path.absolute_row(),
                        to = clamped.map(|p| p.absolute_row()),
                        "clamped stale highlight"
                    );
                    clamped
                }
                StaleHighlightPolicy::Clear => {
                    tracing::debug!(
                        target: "rowdeck::controller",
                        from = path.absolute_row(),
                        "cleared stale highlight"
                    );
                    None
                }
            },
            None => None,
        };
        self.state.rebind_highlight(next_highlight);

        let survivors: Vec<RowIndexPath> = self
            .state
            .selected_rows()
            .iter()
            .filter_map(|p| RowIndexPath::resolve(&*rows, p.section(), p.row()).ok())
            .collect();
        if survivors.len() != self.state.selected_count()
            || survivors.as_slice() != self.state.selected_rows()
        {
            self.state.replace_selected(survivors);
        }

        if self.state.highlighted_row().is_none()
            && self.config.auto_highlight_first
            && let Some(first) = self.first_selectable()
        {
            self.state.set_highlight(Some(first));
            tracing::debug!(
                target: "rowdeck::controller",
                section = first.section(),
                row = first.row(),
                "auto-highlighted first selectable row"
            );
        }

        if self.state != before {
            self.emit_selection();
        }
    }

    /// Scans sections in order, rows in order within a section, for the
    /// first row the selectability predicate accepts.
    fn first_selectable(&self) -> Option<RowIndexPath> {
        let rows = &*self.config.rows;
        let mut absolute = 0;
        for section in 0..rows.section_count() {
            for row in 0..rows.row_count(section) {
                let path = RowIndexPath::from_parts(section, row, absolute);
                if self.config.row_selectable(&path) {
                    return Some(path);
                }
                absolute += 1;
            }
        }
        None
    }

    fn sync_viewport_extent(&self) {
        if let Some(viewport) = &self.viewport {
            viewport.set_content_height(self.config.metrics.content_height(&*self.config.rows));
        }
    }

    fn emit_selection(&self) {
        self.selection_changed.emit(self.state.clone());
    }
}

impl Drop for SelectionController {
    fn drop(&mut self) {
        self.detach();
    }
}

static_assertions::assert_impl_all!(SelectionController: Send, Sync);

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::Error;
    use crate::model::SectionCounts;

    fn config(counts: Vec<usize>) -> ListConfig {
        ListConfig::new(
            Arc::new(SectionCounts::new(counts)),
            ListMetrics::uniform(10.0),
        )
    }

    fn path(counts: &[usize], section: usize, row: usize) -> RowIndexPath {
        let rows = SectionCounts::new(counts.to_vec());
        RowIndexPath::resolve(&rows, section, row).unwrap()
    }

    fn change_counter(controller: &SelectionController) -> Arc<AtomicUsize> {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();
        controller.selection_changed.connect(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });
        counter
    }

    #[test]
    fn test_precondition_validation() {
        let bad = config(vec![2]).with_top_header(true);
        assert!(matches!(
            SelectionController::new(bad, None),
            Err(Error::Config(ConfigError::TopHeaderHeightMissing))
        ));

        let bad = config(vec![2]).with_section_headers(true);
        assert!(matches!(
            SelectionController::new(bad, None),
            Err(Error::Config(ConfigError::SectionHeaderHeightMissing))
        ));

        let bad = config(vec![2]).with_auto_highlight_first(true);
        assert!(matches!(
            SelectionController::new(bad, None),
            Err(Error::Config(ConfigError::AutoHighlightWithoutKeep))
        ));

        let bad = ListConfig::new(
            Arc::new(SectionCounts::new(vec![2])),
            ListMetrics::uniform(0.0),
        );
        assert!(matches!(
            SelectionController::new(bad, None),
            Err(Error::Config(ConfigError::NonPositiveRowHeight))
        ));
    }

    #[test]
    fn test_failed_configure_leaves_state_untouched() {
        let mut controller = SelectionController::new(config(vec![3]), None).unwrap();
        controller.highlight_row(path(&[3], 0, 1));

        let bad = config(vec![3]).with_top_header(true);
        assert!(controller.configure(bad).is_err());
        assert_eq!(
            controller.highlighted_row().map(|p| p.absolute_row()),
            Some(1)
        );
    }

    #[test]
    fn test_reconfigure_is_idempotent() {
        let mut controller = SelectionController::new(config(vec![2, 3]), None).unwrap();
        controller.highlight_row(path(&[2, 3], 1, 0));
        let changes = change_counter(&controller);

        controller.configure(config(vec![2, 3])).unwrap();
        controller.configure(config(vec![2, 3])).unwrap();
        assert_eq!(changes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_auto_highlight_on_rows_appearing() {
        let mut controller = SelectionController::new(
            config(vec![])
                .with_keep_highlight(true)
                .with_auto_highlight_first(true),
            None,
        )
        .unwrap();
        assert_eq!(controller.highlighted_row(), None);

        let changes = change_counter(&controller);
        controller
            .configure(
                config(vec![0, 2])
                    .with_keep_highlight(true)
                    .with_auto_highlight_first(true),
            )
            .unwrap();

        let highlighted = controller.highlighted_row().unwrap();
        assert_eq!((highlighted.section(), highlighted.row()), (1, 0));
        assert_eq!(highlighted.absolute_row(), 0);
        assert_eq!(changes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_auto_highlight_skips_unselectable_rows() {
        let make = || {
            config(vec![3])
                .with_keep_highlight(true)
                .with_auto_highlight_first(true)
                .with_can_select(|p| p.absolute_row() != 0)
        };
        let controller = SelectionController::new(make(), None).unwrap();
        assert_eq!(
            controller.highlighted_row().map(|p| p.absolute_row()),
            Some(1)
        );
    }

    #[test]
    fn test_clamp_policy_retargets_highlight() {
        let mut controller = SelectionController::new(config(vec![5]), None).unwrap();
        controller.highlight_row(path(&[5], 0, 4));

        controller.configure(config(vec![3])).unwrap();
        let highlighted = controller.highlighted_row().unwrap();
        assert_eq!(highlighted.absolute_row(), 2);
    }

    #[test]
    fn test_clear_policy_drops_highlight() {
        let mut controller = SelectionController::new(
            config(vec![5]).with_stale_highlight(StaleHighlightPolicy::Clear),
            None,
        )
        .unwrap();
        controller.highlight_row(path(&[5], 0, 4));

        controller
            .configure(config(vec![3]).with_stale_highlight(StaleHighlightPolicy::Clear))
            .unwrap();
        assert_eq!(controller.highlighted_row(), None);
    }

    #[test]
    fn test_clamp_rebinds_section_and_row() {
        let mut controller = SelectionController::new(config(vec![5]), None).unwrap();
        controller.highlight_row(path(&[5], 0, 2));
        let changes = change_counter(&controller);

        // Redistributing rows across sections keeps ordinal 2 in place but
        // moves it to (1, 0); the stored path must follow.
        controller.configure(config(vec![2, 3])).unwrap();
        let highlighted = controller.highlighted_row().unwrap();
        assert_eq!((highlighted.section(), highlighted.row()), (1, 0));
        assert_eq!(highlighted.absolute_row(), 2);
        // Same flattened position: not an observable selection change.
        assert_eq!(changes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_clamp_to_empty_list_clears() {
        let mut controller = SelectionController::new(config(vec![2]), None).unwrap();
        controller.highlight_row(path(&[2], 0, 1));

        controller.configure(config(vec![0])).unwrap();
        assert_eq!(controller.highlighted_row(), None);
    }

    #[test]
    fn test_surviving_highlight_gets_fresh_ordinal() {
        let mut controller = SelectionController::new(config(vec![2, 2]), None).unwrap();
        // Highlight (1, 1): absolute 3 while section 0 has two rows.
        controller.highlight_row(path(&[2, 2], 1, 1));

        // Section 0 shrinks; the same (section, row) is now absolute 2.
        controller.configure(config(vec![1, 2])).unwrap();
        let highlighted = controller.highlighted_row().unwrap();
        assert_eq!((highlighted.section(), highlighted.row()), (1, 1));
        assert_eq!(highlighted.absolute_row(), 2);
    }

    #[test]
    fn test_selected_rows_pruned_and_rebuilt() {
        let mut controller = SelectionController::new(config(vec![2, 2]), None).unwrap();
        controller.select_row(path(&[2, 2], 0, 1));
        controller.select_row(path(&[2, 2], 1, 1));
        assert_eq!(controller.selection().selected_count(), 2);

        // Section 0 loses its second row; section 1 keeps both.
        controller.configure(config(vec![1, 2])).unwrap();
        let selection = controller.selection();
        assert_eq!(selection.selected_count(), 1);
        let survivor = selection.selected_rows()[0];
        assert_eq!((survivor.section(), survivor.row()), (1, 1));
        assert_eq!(survivor.absolute_row(), 2);
    }

    #[test]
    fn test_initial_selection_is_reconciled() {
        let rows = SectionCounts::new(vec![5]);
        let seed =
            RowSelection::new().with_highlighted(RowIndexPath::resolve(&rows, 0, 4).unwrap());

        // The controller is built against a shorter list than the seed
        // was: the seeded highlight is clamped on construction.
        let controller = SelectionController::new(config(vec![3]), Some(seed)).unwrap();
        assert_eq!(
            controller.highlighted_row().map(|p| p.absolute_row()),
            Some(2)
        );
    }

    #[test]
    fn test_pointer_exit_respects_keep_highlight() {
        let mut controller =
            SelectionController::new(config(vec![3]).with_keep_highlight(true), None).unwrap();
        controller.highlight_row(path(&[3], 0, 1));

        controller.pointer_exited();
        assert!(controller.highlighted_row().is_some());

        controller.configure(config(vec![3])).unwrap();
        controller.pointer_exited();
        assert_eq!(controller.highlighted_row(), None);
    }

    #[test]
    fn test_clear_highlight_is_unconditional() {
        let mut controller =
            SelectionController::new(config(vec![3]).with_keep_highlight(true), None).unwrap();
        controller.highlight_row(path(&[3], 0, 1));
        controller.clear_highlight();
        assert_eq!(controller.highlighted_row(), None);
    }

    #[test]
    fn test_highlight_respects_predicate() {
        let mut controller = SelectionController::new(
            config(vec![3]).with_can_select(|p| p.absolute_row() != 1),
            None,
        )
        .unwrap();

        assert!(!controller.highlight_row(path(&[3], 0, 1)));
        assert_eq!(controller.highlighted_row(), None);
        assert!(controller.highlight_row(path(&[3], 0, 2)));
    }

    #[test]
    fn test_highlight_stepping_skips_unselectable() {
        let mut controller = SelectionController::new(
            config(vec![2, 2]).with_can_select(|p| p.absolute_row() % 2 == 0),
            None,
        )
        .unwrap();

        assert!(controller.highlight_next());
        assert_eq!(
            controller.highlighted_row().map(|p| p.absolute_row()),
            Some(0)
        );
        assert!(controller.highlight_next());
        assert_eq!(
            controller.highlighted_row().map(|p| p.absolute_row()),
            Some(2)
        );
        // Nothing selectable past ordinal 2.
        assert!(!controller.highlight_next());

        assert!(controller.highlight_previous());
        assert_eq!(
            controller.highlighted_row().map(|p| p.absolute_row()),
            Some(0)
        );
        assert!(!controller.highlight_previous());
    }

    #[test]
    fn test_choose_emits_without_state_change() {
        let controller = SelectionController::new(config(vec![3]), None).unwrap();
        let chosen = Arc::new(Mutex::new(Vec::new()));
        let changes = change_counter(&controller);

        let chosen_clone = chosen.clone();
        controller.row_chosen.connect(move |p| {
            chosen_clone.lock().push(p.absolute_row());
        });

        controller.choose_row(path(&[3], 0, 2));
        assert_eq!(*chosen.lock(), vec![2]);
        assert_eq!(changes.load(Ordering::SeqCst), 0);
        assert_eq!(controller.highlighted_row(), None);
    }

    #[test]
    fn test_toggle_and_clear_selection() {
        let mut controller = SelectionController::new(config(vec![3]), None).unwrap();
        let target = path(&[3], 0, 1);

        assert!(controller.toggle_row(target));
        assert!(controller.is_row_selected(target));
        assert!(controller.toggle_row(target));
        assert!(!controller.is_row_selected(target));

        controller.select_row(target);
        controller.highlight_row(path(&[3], 0, 0));
        controller.clear_selection();
        assert!(!controller.selection().has_selection());
        // Clearing the selection leaves the highlight alone.
        assert!(controller.highlighted_row().is_some());
    }

    #[test]
    fn test_selection_returns_detached_snapshot() {
        let mut controller = SelectionController::new(config(vec![3]), None).unwrap();
        controller.select_row(path(&[3], 0, 0));

        let snapshot = controller.selection();
        controller.select_row(path(&[3], 0, 1));
        assert_eq!(snapshot.selected_count(), 1);
        assert_eq!(controller.selection().selected_count(), 2);
    }

    #[test]
    fn test_reached_end_fires_once_per_crossing() {
        let mut controller = SelectionController::new(config(vec![30]), None).unwrap();
        let viewport = Arc::new(Viewport::new(100.0));
        controller.attach_viewport(viewport.clone()).unwrap();
        // 30 rows at 10px: content is 300, max scroll 200.

        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = fired.clone();
        controller.reached_end().connect(move |_| {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });

        viewport.set_scroll_top(50.0); // distance 150
        viewport.set_scroll_top(130.0); // distance 70: crossing
        viewport.set_scroll_top(150.0); // distance 50: still at end
        viewport.set_scroll_top(40.0); // distance 160: re-arms
        viewport.set_scroll_top(180.0); // distance 20: crossing
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_viewport_handoff() {
        let viewport = Arc::new(Viewport::new(100.0));
        let mut first = SelectionController::new(config(vec![30]), None).unwrap();
        first.attach_viewport(viewport.clone()).unwrap();

        let mut second = SelectionController::new(config(vec![30]), None).unwrap();
        // The viewport refuses a second holder until the first lets go.
        assert!(matches!(
            second.attach_viewport(viewport.clone()),
            Err(Error::ViewportInUse)
        ));

        let first_fired = Arc::new(AtomicUsize::new(0));
        let first_clone = first_fired.clone();
        first.reached_end().connect(move |_| {
            first_clone.fetch_add(1, Ordering::SeqCst);
        });

        first.detach();
        second.attach_viewport(viewport.clone()).unwrap();

        // Scroll traffic after the handoff never reaches the old holder.
        viewport.set_scroll_top(190.0);
        assert_eq!(first_fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_drop_releases_viewport() {
        let viewport = Arc::new(Viewport::new(100.0));
        {
            let mut controller = SelectionController::new(config(vec![5]), None).unwrap();
            controller.attach_viewport(viewport.clone()).unwrap();
            assert!(viewport.is_held());
        }
        assert!(!viewport.is_held());
        assert_eq!(viewport.scrolled.connection_count(), 0);
    }

    #[test]
    fn test_attach_syncs_content_height() {
        let mut controller = SelectionController::new(config(vec![4]), None).unwrap();
        let viewport = Arc::new(Viewport::new(15.0));
        controller.attach_viewport(viewport.clone()).unwrap();
        assert_eq!(viewport.content_height(), 40.0);

        controller.configure(config(vec![7])).unwrap();
        assert_eq!(viewport.content_height(), 70.0);
    }

    #[test]
    fn test_reveal_row_scrolls_minimally() {
        let mut controller = SelectionController::new(config(vec![30]), None).unwrap();
        let viewport = Arc::new(Viewport::new(100.0));
        controller.attach_viewport(viewport.clone()).unwrap();

        // Row 20 sits at 200..210, below the 0..100 window.
        controller.reveal_row(path(&[30], 0, 20));
        assert_eq!(viewport.scroll_top(), 110.0);

        // Already visible: no movement.
        controller.reveal_row(path(&[30], 0, 15));
        assert_eq!(viewport.scroll_top(), 110.0);

        // Above the window: align its top edge.
        controller.reveal_row(path(&[30], 0, 5));
        assert_eq!(viewport.scroll_top(), 50.0);
    }
}
