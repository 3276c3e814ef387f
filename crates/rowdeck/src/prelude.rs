//! Prelude module for rowdeck.
//!
//! This module re-exports the most commonly used types for convenient
//! importing:
//!
//! ```
//! use rowdeck::prelude::*;
//! ```

// ============================================================================
// Signal/Slot System
// ============================================================================

pub use rowdeck_core::{ConnectionId, Signal};

// ============================================================================
// Errors
// ============================================================================

pub use crate::error::{ConfigError, Error, Result};

// ============================================================================
// Model
// ============================================================================

pub use crate::model::{
    CountFn, ListMetrics, RowIndexPath, RowSelection, RowSource, SectionCounts,
};

// ============================================================================
// Widgets
// ============================================================================

pub use crate::widget::{
    ListConfig, ListElement, RowsView, ScrollEndDetector, SelectionController,
    StaleHighlightPolicy, Viewport,
};
