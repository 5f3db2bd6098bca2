#![forbid(unsafe_code)]

//! Shared ownership of an [`AutoResizeState`].
//!
//! The handle is the change signal: every transition is a read-modify-write
//! under one lock, and the version counter moves only when the state value
//! actually changed.

use std::sync::{Arc, Mutex, MutexGuard};

use hketa_core::{Density, DisplayConfig, Size};

use crate::font_size::FontSizeRange;
use crate::state::AutoResizeState;

/// Inputs whose change restarts a group's search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderEnv {
    pub density: Density,
    pub window_size: Size,
}

impl RenderEnv {
    pub const fn new(density: Density, window_size: Size) -> Self {
        Self {
            density,
            window_size,
        }
    }
}

impl From<&DisplayConfig> for RenderEnv {
    fn from(config: &DisplayConfig) -> Self {
        Self::new(config.density, config.window_size)
    }
}

#[derive(Debug)]
struct Shared {
    state: AutoResizeState,
    version: u64,
    env: Option<RenderEnv>,
}

/// Cloneable handle to one group's state.
#[derive(Debug, Clone)]
pub struct AutoResizeStateHandle {
    inner: Arc<Mutex<Shared>>,
}

/// Create the shared state for a group of auto-resizing texts.
pub fn remember_auto_resize_state(
    range: FontSizeRange,
    prefer_single_line: bool,
) -> AutoResizeStateHandle {
    AutoResizeStateHandle::new(AutoResizeState::new(range, prefer_single_line))
}

impl AutoResizeStateHandle {
    pub fn new(state: AutoResizeState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Shared {
                state,
                version: 0,
                env: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> AutoResizeState {
        self.lock().state.clone()
    }

    /// Incremented on every effective change.
    pub fn version(&self) -> u64 {
        self.lock().version
    }

    /// Replace the state with `transition(state)`.
    ///
    /// Returns `true` if the state changed.
    pub fn update<F>(&self, transition: F) -> bool
    where
        F: FnOnce(AutoResizeState) -> AutoResizeState,
    {
        let mut shared = self.lock();
        let before = shared.state.clone();
        shared.state = transition(before.clone());
        let changed = shared.state != before;
        if changed {
            shared.version += 1;
        }
        changed
    }

    /// Clear all candidates and readiness.
    pub fn reset(&self) -> bool {
        let changed = self.update(AutoResizeState::reset);
        if changed {
            tracing::debug!("auto-resize group reset");
        }
        changed
    }

    /// Start over with new inputs if either differs from the current ones.
    ///
    /// Subscribers are kept; candidates and readiness are dropped.
    pub fn reconfigure(&self, range: FontSizeRange, prefer_single_line: bool) -> bool {
        let mut shared = self.lock();
        if shared.state.range() == range && shared.state.prefer_single_line() == prefer_single_line
        {
            return false;
        }
        shared.state = shared.state.clone().reconfigured(range, prefer_single_line);
        shared.version += 1;
        tracing::debug!(
            min = %range.min(),
            max = %range.max(),
            prefer_single_line,
            "auto-resize group reconfigured"
        );
        true
    }

    /// Record the environment of a render pass, resetting the group when it
    /// differs from the previous one. The first observation never resets.
    pub fn observe_env(&self, env: RenderEnv) -> bool {
        let mut shared = self.lock();
        let previous = shared.env.replace(env);
        match previous {
            Some(previous) if previous != env => {
                let reset = shared.state.clone().reset();
                let changed = reset != shared.state;
                shared.state = reset;
                if changed {
                    shared.version += 1;
                }
                tracing::debug!(?previous, current = ?env, "display changed, auto-resize group reset");
                changed
            }
            _ => false,
        }
    }

    /// Whether two handles share one group.
    pub fn same_group(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
