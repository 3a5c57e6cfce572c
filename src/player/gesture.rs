//! Click / double-click disambiguation
//!
//! A two-state debounce keyed on (timestamp, side), not a generic
//! multi-click counter. A click within the window on the same side as the
//! previous one is a double click; classifying it resets the stored
//! timestamp so a third rapid click starts over as a single click.

use crate::player::SurfaceSide;
use std::time::{Duration, Instant};

/// Outcome of classifying one surface click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    /// Lone click: toggles play/pause
    Single,

    /// Second same-side click within the window: directional seek
    Double,
}

/// Retained state between surface clicks
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureState {
    last_click_at: Option<Instant>,
    last_side: Option<SurfaceSide>,
}

impl GestureState {
    /// Classify a click at `now` on `side`, updating the retained state
    pub fn classify(&mut self, now: Instant, side: SurfaceSide, window: Duration) -> ClickKind {
        let within_window = self
            .last_click_at
            .is_some_and(|last| now.duration_since(last) < window);

        if within_window && self.last_side == Some(side) {
            // Clearing the timestamp blocks a third click from chaining
            // into another double
            self.last_click_at = None;
            ClickKind::Double
        } else {
            self.last_click_at = Some(now);
            self.last_side = Some(side);
            ClickKind::Single
        }
    }

    /// Forget any retained click, e.g. when the session resets
    pub fn reset(&mut self) {
        self.last_click_at = None;
        self.last_side = None;
    }
}
