//! Stateful list machinery: controller, viewport, scroll watching, and the
//! render shell.
//!
//! Where `model` holds pure values, this module holds the pieces that react
//! to host events:
//!
//! - [`SelectionController`]: owns the selection state and reconciles it
//!   across reconfigurations
//! - [`ListConfig`]: the host knob bag pushed through on every change
//! - [`Viewport`]: clamped scroll state with single-holder discipline
//! - [`ScrollEndDetector`]: edge-triggered scrolled-to-end latch
//! - [`RowsView`]: the stateless shell that lays elements out and forwards
//!   events
//!
//! ```text
//! host config ──> SelectionController ──> selection_changed
//!                     │        ▲
//!                     ▼        │ pointer events
//!                 Viewport <── RowsView <── host events
//!                     │
//!                     └──> ScrollEndDetector ──> reached_end
//! ```

mod controller;
mod rows_view;
mod scroll;
mod viewport;

pub use controller::{ListConfig, RowPredicate, SelectionController, StaleHighlightPolicy};
pub use rows_view::{ListElement, RowsView};
pub use scroll::{REACHED_END_THRESHOLD, ScrollEndDetector};
pub use viewport::Viewport;
