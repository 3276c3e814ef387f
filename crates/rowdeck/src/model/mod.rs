//! Data model for sectioned row lists.
//!
//! This module holds the pure, value-level half of rowdeck: addressing,
//! counting, geometry, and selection state. None of it renders anything or
//! reacts to events; that is the `widget` module's job.
//!
//! # Core Types
//!
//! - [`RowIndexPath`]: a row's address: (section, row) plus its absolute
//!   ordinal in the flattened list
//! - [`RowSource`]: the row-count source of truth, with table-backed
//!   ([`SectionCounts`]) and closure-backed ([`CountFn`]) implementations
//! - [`ListMetrics`]: uniform heights and the closed-form offset math
//! - [`RowSelection`]: highlighted row + selected-row set, cloned on every
//!   externally observable change
//!
//! # Example
//!
//! ```
//! use rowdeck::model::{ListMetrics, RowIndexPath, RowSource, SectionCounts};
//!
//! let rows = SectionCounts::new(vec![3, 2]);
//! let metrics = ListMetrics::uniform(24.0).with_section_headers(18.0);
//!
//! // Address the last row and locate it in the pixel layout.
//! let path = RowIndexPath::resolve(&rows, 1, 1)?;
//! assert_eq!(path.absolute_row(), 4);
//! assert_eq!(rows.total_rows(), 5);
//! assert_eq!(metrics.row_at(&rows, metrics.offset_of(path)), Some(path));
//! # Ok::<(), rowdeck::Error>(())
//! ```

mod index;
mod layout;
mod rows;
mod selection;

pub use index::RowIndexPath;
pub use layout::ListMetrics;
pub use rows::{CountFn, RowCountFn, RowSource, SectionCounts};
pub use selection::RowSelection;
