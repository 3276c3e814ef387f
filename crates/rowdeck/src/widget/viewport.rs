//! Scroll viewport state for the list.
//!
//! [`Viewport`] models the host's scrollable element at the level the list
//! core cares about: a clamped vertical scroll position over a content strip
//! taller (or shorter) than the visible window, plus the distance remaining
//! to the bottom. The host mirrors its real element's geometry in here and
//! forwards wheel/scrollbar input through [`set_scroll_top`] /
//! [`scroll_by`]; every position change is announced on the [`scrolled`]
//! signal.
//!
//! A viewport is a shared, single-writer resource: at most one selection
//! controller may hold it at a time, enforced by [`acquire`] / [`release`].
//! Replacing a controller must release the old holder first, so a stale
//! controller can never keep observing scroll traffic.
//!
//! [`set_scroll_top`]: Viewport::set_scroll_top
//! [`scroll_by`]: Viewport::scroll_by
//! [`scrolled`]: Viewport::scrolled
//! [`acquire`]: Viewport::acquire
//! [`release`]: Viewport::release

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use rowdeck_core::Signal;

use crate::error::{Error, Result};

/// Interior scroll geometry.
#[derive(Clone, Copy, Debug, Default)]
struct ScrollState {
    scroll_top: f32,
    content_height: f32,
    view_height: f32,
}

/// Scroll state of the host's scrollable element.
///
/// # Signals
///
/// - `scrolled(f32)`: Emitted with the new scroll position whenever it
///   changes, whatever the cause (wheel input, programmatic scrolling, or a
///   re-clamp after the content shrank).
pub struct Viewport {
    state: Mutex<ScrollState>,
    /// Whether a controller currently holds this viewport.
    held: AtomicBool,
    /// Emitted when the scroll position changes.
    pub scrolled: Signal<f32>,
}

impl Viewport {
    /// Creates a viewport with the given visible height and no content.
    pub fn new(view_height: f32) -> Self {
        Self {
            state: Mutex::new(ScrollState {
                view_height,
                ..ScrollState::default()
            }),
            held: AtomicBool::new(false),
            scrolled: Signal::new(),
        }
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Returns the current scroll position.
    pub fn scroll_top(&self) -> f32 {
        self.state.lock().scroll_top
    }

    /// Returns the height of the content strip.
    pub fn content_height(&self) -> f32 {
        self.state.lock().content_height
    }

    /// Returns the height of the visible window.
    pub fn view_height(&self) -> f32 {
        self.state.lock().view_height
    }

    /// Returns the maximum scroll position.
    pub fn max_scroll_top(&self) -> f32 {
        let state = self.state.lock();
        (state.content_height - state.view_height).max(0.0)
    }

    /// Returns the distance from the bottom edge of the visible window to
    /// the bottom of the content.
    ///
    /// Negative when the content is shorter than the window.
    pub fn distance_to_bottom(&self) -> f32 {
        let state = self.state.lock();
        state.content_height - state.scroll_top - state.view_height
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    /// Sets the scroll position, clamped to the valid range.
    pub fn set_scroll_top(&self, top: f32) {
        let changed = {
            let mut state = self.state.lock();
            let max = (state.content_height - state.view_height).max(0.0);
            let clamped = top.clamp(0.0, max);
            if state.scroll_top == clamped {
                None
            } else {
                state.scroll_top = clamped;
                Some(clamped)
            }
        };

        // Emit outside the lock so slots can read geometry back.
        if let Some(top) = changed {
            tracing::trace!(target: "rowdeck::viewport", top, "scrolled");
            self.scrolled.emit(top);
        }
    }

    /// Adjusts the scroll position by a delta, clamped to the valid range.
    pub fn scroll_by(&self, delta: f32) {
        let top = self.scroll_top();
        self.set_scroll_top(top + delta);
    }

    /// Updates the content height, re-clamping the scroll position.
    ///
    /// Shrinking content can pull the position back up; that change is
    /// announced like any other scroll.
    pub fn set_content_height(&self, height: f32) {
        {
            let mut state = self.state.lock();
            state.content_height = height.max(0.0);
        }
        let top = self.scroll_top();
        self.set_scroll_top(top);
    }

    /// Updates the visible window height, re-clamping the scroll position.
    pub fn set_view_height(&self, height: f32) {
        {
            let mut state = self.state.lock();
            state.view_height = height.max(0.0);
        }
        let top = self.scroll_top();
        self.set_scroll_top(top);
    }

    // =========================================================================
    // Holder discipline
    // =========================================================================

    /// Marks this viewport as held by a controller.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ViewportInUse`] if another controller already holds
    /// it. The previous holder must [`release`](Self::release) first.
    pub fn acquire(&self) -> Result<()> {
        if self
            .held
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::ViewportInUse);
        }
        tracing::debug!(target: "rowdeck::viewport", "viewport acquired");
        Ok(())
    }

    /// Releases this viewport so another controller can hold it.
    pub fn release(&self) {
        self.held.store(false, Ordering::SeqCst);
        tracing::debug!(target: "rowdeck::viewport", "viewport released");
    }

    /// Returns `true` if a controller currently holds this viewport.
    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::SeqCst)
    }
}

static_assertions::assert_impl_all!(Viewport: Send, Sync);
