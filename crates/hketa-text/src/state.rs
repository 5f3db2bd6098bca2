#![forbid(unsafe_code)]

//! Shared font-size negotiation as an immutable value.
//!
//! [`AutoResizeState`] records which text call sites (subscribers) share one
//! font size, the candidate size each has settled on so far, and which of
//! them are ready. Every transition consumes the state and returns the next
//! one, so a holder can compare old and new values to detect change.
//!
//! The effective size is the minimum candidate, or the range maximum while
//! no subscriber has reported one. The group is ready to draw once every
//! subscriber is ready.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use hketa_core::Sp;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::font_size::FontSizeRange;

/// Identity of one auto-resize call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

impl SubscriberId {
    /// A process-unique id.
    pub fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Font-size negotiation state shared by a group of subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoResizeState {
    range: FontSizeRange,
    prefer_single_line: bool,
    subscribers: FxHashSet<SubscriberId>,
    candidates: FxHashMap<SubscriberId, Sp>,
    ready: FxHashSet<SubscriberId>,
}

impl AutoResizeState {
    pub fn new(range: FontSizeRange, prefer_single_line: bool) -> Self {
        Self {
            range,
            prefer_single_line,
            subscribers: FxHashSet::default(),
            candidates: FxHashMap::default(),
            ready: FxHashSet::default(),
        }
    }

    #[inline]
    pub fn range(&self) -> FontSizeRange {
        self.range
    }

    #[inline]
    pub fn prefer_single_line(&self) -> bool {
        self.prefer_single_line
    }

    // --- transitions -------------------------------------------------------

    #[must_use]
    pub fn subscribe(mut self, id: SubscriberId) -> Self {
        self.subscribers.insert(id);
        self
    }

    /// Remove `id` from the group together with its candidate and readiness.
    #[must_use]
    pub fn unsubscribe(mut self, id: SubscriberId) -> Self {
        self.subscribers.remove(&id);
        self.candidates.remove(&id);
        self.ready.remove(&id);
        self
    }

    /// Set (`Some`) or clear (`None`) the candidate size of `id`.
    #[must_use]
    pub fn report_candidate(mut self, id: SubscriberId, size: Option<Sp>) -> Self {
        match size {
            Some(size) => {
                self.candidates.insert(id, size);
            }
            None => {
                self.candidates.remove(&id);
            }
        }
        self
    }

    #[must_use]
    pub fn mark_ready(mut self, id: SubscriberId, ready: bool) -> Self {
        if ready {
            self.ready.insert(id);
        } else {
            self.ready.remove(&id);
        }
        self
    }

    /// Clear every candidate and all readiness; subscribers stay.
    #[must_use]
    pub fn reset(mut self) -> Self {
        self.candidates.clear();
        self.ready.clear();
        self
    }

    /// Apply the outcome of one render of `id`.
    ///
    /// On overflow a subscriber that is not ready moves one step below the
    /// effective size (capped at the range maximum). Reaching the floor pins
    /// it at `min` and marks it ready. Without overflow it becomes ready at
    /// its current candidate. A ready subscriber ignores overflow.
    #[must_use]
    pub fn apply_render(self, id: SubscriberId, overflowed: bool) -> Self {
        if !overflowed {
            return self.mark_ready(id, true);
        }
        if self.is_ready(id) {
            return self;
        }

        let range = self.range;
        match range.step_below(self.font_size()) {
            Some(next) => {
                tracing::trace!(subscriber = %id, size = %next, "font size step");
                self.report_candidate(id, Some(next))
            }
            None => {
                tracing::trace!(subscriber = %id, size = %range.min(), "font size reached floor");
                self.report_candidate(id, Some(range.min())).mark_ready(id, true)
            }
        }
    }

    // --- queries -----------------------------------------------------------

    /// The group's effective size: the smallest candidate, or `max`.
    pub fn font_size(&self) -> Sp {
        self.candidates
            .values()
            .copied()
            .reduce(Sp::min)
            .unwrap_or(self.range.max())
    }

    /// Candidate of `id`, falling back to the effective size.
    pub fn font_size_for(&self, id: SubscriberId) -> Sp {
        self.candidates
            .get(&id)
            .copied()
            .unwrap_or_else(|| self.font_size())
    }

    /// Size `id` should render at: the effective size once ready, its own
    /// candidate until then.
    pub fn render_size(&self, id: SubscriberId) -> Sp {
        if self.is_ready(id) {
            self.font_size()
        } else {
            self.font_size_for(id)
        }
    }

    pub fn candidate(&self, id: SubscriberId) -> Option<Sp> {
        self.candidates.get(&id).copied()
    }

    #[inline]
    pub fn is_ready(&self, id: SubscriberId) -> bool {
        self.ready.contains(&id)
    }

    #[inline]
    pub fn is_subscribed(&self, id: SubscriberId) -> bool {
        self.subscribers.contains(&id)
    }

    /// Whether every subscriber is ready. Vacuously true for an empty group.
    pub fn ready_to_draw(&self) -> bool {
        self.subscribers.iter().all(|id| self.ready.contains(id))
    }

    #[inline]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// A fresh state for new inputs, keeping the current subscribers.
    #[must_use]
    pub(crate) fn reconfigured(self, range: FontSizeRange, prefer_single_line: bool) -> Self {
        Self {
            subscribers: self.subscribers,
            ..Self::new(range, prefer_single_line)
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// A lone subscriber's candidates never increase and stay at or above `min`.
        #[test]
        fn single_subscriber_shrinks_monotonically(
            min in 1.0f32..20.0,
            span in 1.0f32..40.0,
            step in 0.25f32..4.0,
            fits_below in 0.0f32..80.0,
        ) {
            let range = FontSizeRange::new(Sp(min), Sp(min + span), Sp(step)).unwrap();
            let id = SubscriberId::next();
            let mut state = AutoResizeState::new(range, false).subscribe(id);
            let mut last = state.render_size(id);

            for _ in 0..=range.steps() + 1 {
                let size = state.render_size(id);
                prop_assert!(size.0 <= last.0);
                prop_assert!(size.0 >= range.min().0);
                last = size;
                state = state.apply_render(id, size.0 > fits_below);
                if state.is_ready(id) {
                    break;
                }
            }
            prop_assert!(state.is_ready(id));

            let settled = state.render_size(id);
            let again = state.clone().apply_render(id, true).apply_render(id, false);
            prop_assert_eq!(again.render_size(id), settled);
        }
    }
}
