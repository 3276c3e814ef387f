//! Edge-triggered detection of scrolling to the end of the list.
//!
//! [`ScrollEndDetector`] is a latch over the distance between the bottom of
//! the visible window and the bottom of the content. It reports a crossing
//! exactly once each time that distance drops below the threshold; further
//! scroll traffic while the position stays near the bottom reports nothing,
//! and scrolling back up re-arms the latch for the next crossing.
//!
//! The latch is a pure value: feed it distances, read back crossings. The
//! selection controller owns one and wires it to viewport scroll
//! notifications, forwarding crossings through its `reached_end` signal.

/// Distance from the bottom, in pixels, under which the list counts as
/// scrolled to the end.
pub const REACHED_END_THRESHOLD: f32 = 80.0;

/// Edge-triggered latch over the distance to the bottom of the content.
///
/// # Example
///
/// ```
/// use rowdeck::widget::ScrollEndDetector;
///
/// let mut watch = ScrollEndDetector::new();
/// assert!(!watch.observe(200.0)); // far from the end
/// assert!(watch.observe(10.0));   // crossed: reports once
/// assert!(!watch.observe(5.0));   // still at the end: silent
/// assert!(!watch.observe(200.0)); // back up: re-arms, silent
/// assert!(watch.observe(70.0));   // next crossing reports again
/// ```
#[derive(Debug)]
pub struct ScrollEndDetector {
    threshold: f32,
    reached: bool,
}

impl Default for ScrollEndDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollEndDetector {
    /// Creates a detector with the default threshold.
    pub fn new() -> Self {
        Self::with_threshold(REACHED_END_THRESHOLD)
    }

    /// Creates a detector with a custom threshold.
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            threshold,
            reached: false,
        }
    }

    /// Returns the threshold distance.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Returns `true` while the last observed position counts as at the
    /// end.
    pub fn is_reached(&self) -> bool {
        self.reached
    }

    /// Feeds the latch a new distance-to-bottom reading.
    ///
    /// Returns `true` only on the transition from "not at the end" to "at
    /// the end"; the caller fires its notification on that edge.
    pub fn observe(&mut self, distance_to_bottom: f32) -> bool {
        let reached = distance_to_bottom < self.threshold;
        let crossed = reached && !self.reached;
        self.reached = reached;
        if crossed {
            tracing::trace!(
                target: "rowdeck::scroll",
                distance = distance_to_bottom,
                "reached end of content"
            );
        }
        crossed
    }

    /// Resets the latch to "not at the end" without reporting.
    ///
    /// Used when the viewport goes away (unmounted or detached): the next
    /// attach starts from a clean slate.
    pub fn reset(&mut self) {
        self.reached = false;
    }
}
