#![forbid(unsafe_code)]

//! Auto-resizing text for hketa.
//!
//! A group of texts shares one [`AutoResizeStateHandle`]. Each member
//! shrinks its candidate font size one step at a time until it fits, and
//! every member draws at the smallest size any of them needed. Members stay
//! invisible until the whole group has settled, so a half-resized frame is
//! never shown.
//!
//! Measurement is behind the [`TextMeasurer`] trait. [`MonospaceMeasurer`]
//! is a fixed-advance implementation with an LRU result cache, used by the
//! demo and the tests.

pub mod auto_resize;
pub mod error;
pub mod font_size;
pub mod handle;
pub mod measure;
pub mod measure_cache;
pub mod monospace;
pub mod state;
pub mod wrap;

pub use auto_resize::{AutoResizeText, RenderedText, converge, converge_with};
pub use error::TextError;
pub use font_size::FontSizeRange;
pub use handle::{AutoResizeStateHandle, RenderEnv, remember_auto_resize_state};
pub use measure::{TextLayoutResult, TextMeasurer, TextStyle};
pub use measure_cache::{CacheStats, DEFAULT_CACHE_CAPACITY, MeasureCache};
pub use monospace::MonospaceMeasurer;
pub use state::{AutoResizeState, SubscriberId};
pub use wrap::{WrapMode, display_width, wrap_text};
