#![forbid(unsafe_code)]

//! Auto-resizing text that shares one font size with its group.
//!
//! Each [`AutoResizeText`] is one subscriber of an [`AutoResizeStateHandle`].
//! A render pass measures the text at the size the shared state assigns it,
//! reports whether it overflowed, and hides the result until every member of
//! the group has settled. [`converge`] drives render passes until the group
//! is stable.
//!
//! # Example
//!
//! ```
//! use hketa_core::{Constraints, Density, Size, Sp};
//! use hketa_text::{
//!     AutoResizeText, FontSizeRange, MonospaceMeasurer, RenderEnv, converge,
//!     remember_auto_resize_state,
//! };
//!
//! let range = FontSizeRange::new(Sp(10.0), Sp(20.0), Sp(1.0)).unwrap();
//! let group = remember_auto_resize_state(range, true);
//! let mut texts = [
//!     AutoResizeText::new("Hello", &group),
//!     AutoResizeText::new("Supercalifragilisticexpialidocious", &group),
//! ];
//!
//! let mut measurer = MonospaceMeasurer::new().advance_ratio(1.0);
//! let env = RenderEnv::new(Density::ONE, Size::new(380, 800));
//! let rendered = converge(&mut texts, &mut measurer, Constraints::new(0, 380, 0, 800), env).unwrap();
//!
//! assert!(rendered.iter().all(|r| r.font_size == Sp(11.0) && r.opacity == 1.0));
//! ```

use std::fmt;

use hketa_core::{Constraints, Sp};

use crate::error::TextError;
use crate::handle::{AutoResizeStateHandle, RenderEnv};
use crate::measure::{TextLayoutResult, TextMeasurer, TextStyle};
use crate::state::SubscriberId;

type LayoutCallback = Box<dyn FnMut(&TextLayoutResult) + Send>;

/// What one render pass produced for one subscriber.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedText {
    pub font_size: Sp,
    /// Line limit the text was measured with.
    pub max_lines: usize,
    pub layout: TextLayoutResult,
    /// `0.0` until the whole group is ready, then `1.0`.
    pub opacity: f32,
}

impl RenderedText {
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

/// One text call site taking part in a shared font-size search.
///
/// Subscribes to its group on creation and unsubscribes when dropped.
pub struct AutoResizeText {
    id: SubscriberId,
    text: String,
    state: AutoResizeStateHandle,
    max_lines: usize,
    soft_wrap: bool,
    on_text_layout: Option<LayoutCallback>,
    notified: Option<TextLayoutResult>,
}

impl AutoResizeText {
    pub fn new(text: impl Into<String>, state: &AutoResizeStateHandle) -> Self {
        let id = SubscriberId::next();
        state.update(|s| s.subscribe(id));
        tracing::debug!(subscriber = %id, "auto-resize text subscribed");
        Self {
            id,
            text: text.into(),
            state: state.clone(),
            max_lines: usize::MAX,
            soft_wrap: true,
            on_text_layout: None,
            notified: None,
        }
    }

    /// Line limit once the group is ready. While it is not, a group that
    /// prefers single lines measures with one line.
    #[must_use]
    pub fn max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines.max(1);
        self
    }

    #[must_use]
    pub fn soft_wrap(mut self, soft_wrap: bool) -> Self {
        self.soft_wrap = soft_wrap;
        self
    }

    /// Called with the final layout once the group is ready to draw, and
    /// again whenever that layout changes.
    #[must_use]
    pub fn on_text_layout<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&TextLayoutResult) + Send + 'static,
    {
        self.on_text_layout = Some(Box::new(callback));
        self
    }

    #[inline]
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn handle(&self) -> &AutoResizeStateHandle {
        &self.state
    }

    /// Replace the text. A different text restarts the whole group.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.notified = None;
            self.state.reset();
        }
    }

    /// Measure once at the size the group assigns and report the outcome.
    pub fn render<M>(
        &mut self,
        measurer: &mut M,
        constraints: Constraints,
        env: RenderEnv,
    ) -> RenderedText
    where
        M: TextMeasurer + ?Sized,
    {
        let _span = tracing::debug_span!(
            "auto_resize_render",
            subscriber = %self.id,
            text_len = self.text.len()
        )
        .entered();

        self.state.observe_env(env);
        let before = self.state.snapshot();
        let font_size = before.render_size(self.id);
        let max_lines = if !before.ready_to_draw() && before.prefer_single_line() {
            1
        } else {
            self.max_lines
        };

        let style = TextStyle {
            font_size,
            max_lines,
            soft_wrap: self.soft_wrap,
        };
        let layout = measurer.measure(&self.text, &style, constraints, env.density);
        let overflowed = layout.overflows(before.prefer_single_line());

        let id = self.id;
        self.state.update(|s| s.apply_render(id, overflowed));
        let after = self.state.snapshot();
        if !before.is_ready(id) && after.is_ready(id) {
            tracing::debug!(subscriber = %id, size = %after.render_size(id), "subscriber ready");
        }

        let ready_to_draw = after.ready_to_draw();
        if ready_to_draw && self.notified != Some(layout) {
            if let Some(callback) = self.on_text_layout.as_mut() {
                callback(&layout);
            }
            self.notified = Some(layout);
        }

        RenderedText {
            font_size,
            max_lines,
            layout,
            opacity: if ready_to_draw { 1.0 } else { 0.0 },
        }
    }
}

impl Drop for AutoResizeText {
    fn drop(&mut self) {
        let id = self.id;
        self.state.update(|s| s.unsubscribe(id));
        tracing::debug!(subscriber = %id, "auto-resize text unsubscribed");
    }
}

impl fmt::Debug for AutoResizeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoResizeText")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("max_lines", &self.max_lines)
            .field("soft_wrap", &self.soft_wrap)
            .field("on_text_layout", &self.on_text_layout.is_some())
            .finish()
    }
}

/// Render `texts` repeatedly until no render pass changes any shared state.
///
/// Every text is measured with `constraints`. See [`converge_with`].
pub fn converge<M>(
    texts: &mut [AutoResizeText],
    measurer: &mut M,
    constraints: Constraints,
    env: RenderEnv,
) -> Result<Vec<RenderedText>, TextError>
where
    M: TextMeasurer + ?Sized,
{
    converge_with(texts, measurer, env, |_| constraints)
}

/// Render `texts` repeatedly until no render pass changes any shared state,
/// measuring text `i` with `constraints(i)`.
///
/// Returns the results of the final, stable pass, in which every group is
/// ready to draw. Each pass that changes something moves one subscriber one
/// step down or marks it ready, so the number of passes is bounded by
/// `(steps + 2) * texts.len() + 1`; exceeding it is
/// [`TextError::DidNotConverge`]. So is a pass that changes nothing while
/// some text is still hidden, such as a group member left out of `texts`.
pub fn converge_with<M, F>(
    texts: &mut [AutoResizeText],
    measurer: &mut M,
    env: RenderEnv,
    constraints: F,
) -> Result<Vec<RenderedText>, TextError>
where
    M: TextMeasurer + ?Sized,
    F: Fn(usize) -> Constraints,
{
    let _span = tracing::debug_span!("auto_resize_converge", subscribers = texts.len()).entered();

    let steps = texts
        .iter()
        .map(|t| t.state.snapshot().range().steps())
        .max()
        .unwrap_or(0);
    let max_passes = steps
        .saturating_add(2)
        .saturating_mul(texts.len())
        .saturating_add(1);

    for pass in 1..=max_passes {
        let versions: Vec<u64> = texts.iter().map(|t| t.state.version()).collect();
        let rendered: Vec<RenderedText> = texts
            .iter_mut()
            .enumerate()
            .map(|(i, text)| text.render(&mut *measurer, constraints(i), env))
            .collect();

        let stable = texts
            .iter()
            .zip(&versions)
            .all(|(text, &version)| text.state.version() == version);
        if stable {
            if rendered.iter().all(RenderedText::is_visible) {
                tracing::debug!(passes = pass, "auto-resize group converged");
                return Ok(rendered);
            }
            // Nothing moved, so every later pass would repeat this one.
            tracing::warn!(passes = pass, "auto-resize group stalled while hidden");
            return Err(TextError::DidNotConverge { passes: pass });
        }
    }

    tracing::warn!(passes = max_passes, "auto-resize group did not converge");
    Err(TextError::DidNotConverge { passes: max_passes })
}
