//! Core systems for rowdeck.
//!
//! This crate provides the notification plumbing the rowdeck list toolkit is
//! built on:
//!
//! - **Signal/Slot System**: Type-safe callbacks for state-change
//!   notifications
//!
//! Everything here is synchronous. rowdeck's processing model is
//! single-threaded and event-driven: every state transition happens inside
//! the handling of a single host event, so signal emission invokes connected
//! slots directly, in connection order, before returning to the caller.
//!
//! # Signal/Slot Example
//!
//! ```
//! use rowdeck_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

pub mod signal;

pub use signal::{ConnectionId, Signal};
