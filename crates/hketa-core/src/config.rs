#![forbid(unsafe_code)]

//! Display configuration (density, font scale, direction, window size).
//!
//! Both engines react to these values: the table converts its `Dp` lengths
//! through the density, and auto-resizing text restarts its search whenever
//! the density, font scale, or window size change. Hosts normally build a
//! [`DisplayConfig`] from the platform; [`DisplayConfig::detect`] reads
//! overrides from the environment for headless runs and demos.

use crate::direction::LayoutDirection;
use crate::geometry::Size;
use crate::unit::Density;

/// Environment variable overriding the pixel density (e.g. `2.75`).
const ENV_DENSITY: &str = "HKETA_DENSITY";
/// Environment variable overriding the font scale (e.g. `1.3`).
const ENV_FONT_SCALE: &str = "HKETA_FONT_SCALE";
/// Environment variable overriding the layout direction (`ltr` or `rtl`).
const ENV_LAYOUT_DIRECTION: &str = "HKETA_LAYOUT_DIRECTION";
/// Environment variable overriding the window size (`WIDTHxHEIGHT` in px).
const ENV_WINDOW_SIZE: &str = "HKETA_WINDOW_SIZE";

/// Window size assumed when nothing else is known.
pub const DEFAULT_WINDOW_SIZE: Size = Size::new(1080, 2400);

/// Everything about the display that layout depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayConfig {
    /// Pixel density and font scale.
    pub density: Density,
    /// Reading direction.
    pub layout_direction: LayoutDirection,
    /// Window size in pixels.
    pub window_size: Size,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            density: Density::ONE,
            layout_direction: LayoutDirection::Ltr,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl DisplayConfig {
    /// Detect configuration from process environment variables.
    #[must_use]
    pub fn detect() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Detect configuration using a custom environment lookup (for tests).
    ///
    /// Unparseable values are ignored and the default is kept.
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let density = env_f32(&get_env, ENV_DENSITY).unwrap_or(defaults.density.density);
        let font_scale = env_f32(&get_env, ENV_FONT_SCALE).unwrap_or(defaults.density.font_scale);
        let layout_direction = get_env(ENV_LAYOUT_DIRECTION)
            .and_then(|value| {
                let parsed = LayoutDirection::parse(&value);
                if parsed.is_none() {
                    report_invalid(ENV_LAYOUT_DIRECTION, &value);
                }
                parsed
            })
            .unwrap_or(defaults.layout_direction);
        let window_size = get_env(ENV_WINDOW_SIZE)
            .and_then(|value| {
                let parsed = parse_size(&value);
                if parsed.is_none() {
                    report_invalid(ENV_WINDOW_SIZE, &value);
                }
                parsed
            })
            .unwrap_or(defaults.window_size);

        Self {
            density: Density::new(density, font_scale),
            layout_direction,
            window_size,
        }
    }

    /// Replace the density.
    #[must_use]
    pub fn with_density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    /// Replace the layout direction.
    #[must_use]
    pub fn with_layout_direction(mut self, direction: LayoutDirection) -> Self {
        self.layout_direction = direction;
        self
    }

    /// Replace the window size.
    #[must_use]
    pub fn with_window_size(mut self, size: Size) -> Self {
        self.window_size = size;
        self
    }
}

fn env_f32<F>(get_env: &F, key: &str) -> Option<f32>
where
    F: Fn(&str) -> Option<String>,
{
    let value = get_env(key)?;
    match value.trim().parse::<f32>() {
        Ok(parsed) if parsed.is_finite() && parsed > 0.0 => Some(parsed),
        _ => {
            report_invalid(key, &value);
            None
        }
    }
}

fn parse_size(value: &str) -> Option<Size> {
    let (width, height) = value.trim().split_once(['x', 'X'])?;
    let width = width.trim().parse().ok()?;
    let height = height.trim().parse().ok()?;
    Some(Size::new(width, height))
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn report_invalid(key: &str, value: &str) {
    #[cfg(feature = "tracing")]
    tracing::warn!(key, value, "ignoring invalid display override");
}
