//! rowdeck - the state core of a sectioned, scrollable row list.
//!
//! rowdeck manages which row of a sectioned list is *highlighted* (transient
//! pointer/keyboard focus) versus *selected* (committed choice), where every
//! row sits in the pixel layout, and when the user has scrolled to within
//! reach of the bottom - independent of what row content looks like. Hosts
//! bring their own rendering and event loop; rowdeck brings the bookkeeping
//! that is easy to get wrong:
//!
//! - **Addressing**: [`model::RowIndexPath`] linearizes (section, row) pairs
//!   into an absolute ordinal used for all equality and pixel math
//! - **Reconciliation**: [`widget::SelectionController`] keeps highlight and
//!   selection valid while the host changes row counts, predicates, and
//!   callbacks out from under it
//! - **Scroll edges**: [`widget::ScrollEndDetector`] reports scrolled-to-end
//!   exactly once per crossing
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use rowdeck::model::{ListMetrics, SectionCounts};
//! use rowdeck::widget::{ListConfig, RowsView};
//!
//! let config = ListConfig::new(
//!     Arc::new(SectionCounts::new(vec![3, 5])),
//!     ListMetrics::uniform(24.0).with_section_headers(18.0),
//! )
//! .with_section_headers(true)
//! .with_keep_highlight(true)
//! .with_auto_highlight_first(true);
//!
//! let mut view = RowsView::new(config, 120.0)?;
//! view.controller().selection_changed.connect(|selection| {
//!     println!("highlight: {:?}", selection.highlighted_row());
//! });
//!
//! // The first selectable row is auto-highlighted; pointer and wheel
//! // events flow in through the view.
//! view.pointer_moved(60.0);
//! view.wheel(48.0);
//! # Ok::<(), rowdeck::Error>(())
//! ```

pub mod error;
pub mod model;
pub mod prelude;
pub mod widget;

pub use error::{ConfigError, Error, Result};
pub use rowdeck_core::{ConnectionId, Signal};
