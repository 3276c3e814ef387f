//! The stateless render shell over the selection controller.
//!
//! [`RowsView`] owns the wiring of a sectioned list, a
//! [`SelectionController`] attached to a [`Viewport`], and turns the
//! current configuration into an eager layout plan: one [`ListElement`] per
//! top header, section header, and row, each with its content-space offset
//! and height. The host walks the plan and paints whatever it likes; the
//! view itself renders nothing and keeps no state of its own.
//!
//! Pointer and wheel traffic flows back in through the view: vertical
//! coordinates are hit-tested against the layout (accounting for the scroll
//! position) and forwarded to the controller as highlight or choose
//! requests; wheel deltas move the viewport, which in turn drives the
//! scrolled-to-end watcher.

use std::sync::Arc;

use crate::error::Result;
use crate::model::{RowIndexPath, RowSelection};

use super::controller::{ListConfig, SelectionController};
use super::viewport::Viewport;

/// One element of the eager layout plan, in top-to-bottom order.
///
/// Offsets are in content space; subtract the viewport's scroll position to
/// place an element on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ListElement {
    /// The list-wide header above the first section.
    TopHeader { offset: f32, height: f32 },
    /// The header above one section's rows.
    SectionHeader {
        section: usize,
        offset: f32,
        height: f32,
    },
    /// One row, with its interaction state baked in for the paint pass.
    Row {
        path: RowIndexPath,
        offset: f32,
        height: f32,
        highlighted: bool,
        selected: bool,
    },
}

/// A sectioned, scrollable list of rows.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use rowdeck::model::{ListMetrics, SectionCounts};
/// use rowdeck::widget::{ListConfig, RowsView};
///
/// let config = ListConfig::new(
///     Arc::new(SectionCounts::new(vec![2, 3])),
///     ListMetrics::uniform(24.0).with_section_headers(18.0),
/// )
/// .with_section_headers(true);
///
/// let mut view = RowsView::new(config, 120.0)?;
/// // Two section headers plus five rows, ready for the host renderer.
/// assert_eq!(view.layout().len(), 7);
/// view.pointer_moved(60.0);
/// # Ok::<(), rowdeck::Error>(())
/// ```
pub struct RowsView {
    controller: SelectionController,
    viewport: Arc<Viewport>,
}

impl RowsView {
    /// Creates a view with the given configuration and visible height.
    ///
    /// # Errors
    ///
    /// Fails fast on configuration precondition violations.
    pub fn new(config: ListConfig, view_height: f32) -> Result<Self> {
        Self::with_selection(config, None, view_height)
    }

    /// Creates a view seeded with an initial selection.
    ///
    /// The seed is applied once, at construction; pushing it again later
    /// has no effect.
    pub fn with_selection(
        config: ListConfig,
        initial: Option<RowSelection>,
        view_height: f32,
    ) -> Result<Self> {
        let viewport = Arc::new(Viewport::new(view_height));
        let mut controller = SelectionController::new(config, initial)?;
        controller.attach_viewport(viewport.clone())?;
        Ok(Self {
            controller,
            viewport,
        })
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Pushes a fresh configuration through to the controller.
    ///
    /// # Errors
    ///
    /// Fails fast on configuration precondition violations; the previous
    /// configuration stays in effect.
    pub fn update(&mut self, config: ListConfig) -> Result<()> {
        self.controller.configure(config)
    }

    /// Updates the visible height (the host resized the list).
    pub fn set_view_height(&self, height: f32) {
        self.viewport.set_view_height(height);
    }

    // =========================================================================
    // Controller handle
    // =========================================================================

    /// The controller, for queries and connecting to its signals.
    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    /// The controller, for imperative highlight/selection operations.
    pub fn controller_mut(&mut self) -> &mut SelectionController {
        &mut self.controller
    }

    /// Replaces the controller, handing the viewport over.
    ///
    /// The old controller detaches first so at most one controller ever
    /// observes the viewport; it is then dropped.
    ///
    /// # Errors
    ///
    /// Fails if the replacement cannot attach; the view is left without an
    /// attached controller in that case, which only happens when something
    /// else holds the viewport.
    pub fn set_controller(&mut self, mut next: SelectionController) -> Result<()> {
        self.controller.detach();
        next.attach_viewport(self.viewport.clone())?;
        self.controller = next;
        Ok(())
    }

    /// The scroll viewport backing this view.
    pub fn viewport(&self) -> &Arc<Viewport> {
        &self.viewport
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Builds the eager layout plan for the current configuration.
    ///
    /// Every header and row appears, visible or not; offsets agree with the
    /// metrics' offset math.
    pub fn layout(&self) -> Vec<ListElement> {
        let config = self.controller.config();
        let rows = &*config.rows;
        let metrics = config.metrics;

        let mut plan =
            Vec::with_capacity(1 + rows.section_count() + rows.total_rows());

        if config.has_top_header {
            plan.push(ListElement::TopHeader {
                offset: 0.0,
                height: metrics.top_height(),
            });
        }
        let mut cursor = metrics.top_height();

        let mut absolute = 0;
        for section in 0..rows.section_count() {
            if config.has_section_headers {
                plan.push(ListElement::SectionHeader {
                    section,
                    offset: cursor,
                    height: metrics.section_header_height,
                });
            }
            cursor += metrics.section_header_height;

            for row in 0..rows.row_count(section) {
                let path = RowIndexPath::from_parts(section, row, absolute);
                plan.push(ListElement::Row {
                    path,
                    offset: cursor,
                    height: metrics.row_height,
                    highlighted: self.controller.is_row_highlighted(path),
                    selected: self.controller.is_row_selected(path),
                });
                cursor += metrics.row_height;
                absolute += 1;
            }
        }

        plan
    }

    /// Returns the row under a view-space vertical coordinate, accounting
    /// for the scroll position. `None` outside the visible window or over a
    /// header.
    pub fn row_at(&self, y: f32) -> Option<RowIndexPath> {
        if y < 0.0 || y > self.viewport.view_height() {
            return None;
        }
        let config = self.controller.config();
        config
            .metrics
            .row_at(&*config.rows, y + self.viewport.scroll_top())
    }

    // =========================================================================
    // Event forwarding
    // =========================================================================

    /// Forwards pointer movement: the row under the pointer (if any)
    /// becomes the highlight request.
    pub fn pointer_moved(&mut self, y: f32) {
        if let Some(path) = self.row_at(y) {
            self.controller.highlight_row(path);
        }
    }

    /// Forwards the pointer leaving the list.
    pub fn pointer_left(&mut self) {
        self.controller.pointer_exited();
    }

    /// Forwards a commit gesture; returns the chosen row, if the press
    /// landed on one.
    pub fn pointer_pressed(&mut self, y: f32) -> Option<RowIndexPath> {
        let path = self.row_at(y)?;
        self.controller.choose_row(path);
        Some(path)
    }

    /// Forwards wheel input as a scroll delta.
    pub fn wheel(&self, delta: f32) {
        self.viewport.scroll_by(delta);
    }
}

static_assertions::assert_impl_all!(RowsView: Send, Sync);
