#![forbid(unsafe_code)]

//! Global log subscriber for hketa binaries.
//!
//! Libraries only emit `tracing` spans and events; a binary calls [`init`]
//! once at startup to print them.
//!
//! # Env Var Contract
//!
//! - `HKETA_LOG` - an `EnvFilter` directive such as `hketa_text=debug`
//! - `RUST_LOG` - used when `HKETA_LOG` is unset
//! - `HKETA_LOG_FORMAT=json` - JSON lines (needs the `tracing-json` feature)
//!
//! With neither filter variable set only warnings and errors are shown.

use std::fmt;

use tracing_subscriber::EnvFilter;

const ENV_LOG: &str = "HKETA_LOG";
const ENV_RUST_LOG: &str = "RUST_LOG";
const ENV_LOG_FORMAT: &str = "HKETA_LOG_FORMAT";

/// Filter used when no variable provides one.
pub const DEFAULT_FILTER: &str = "warn";

/// Output format of the fmt subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" | "" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::Text,
        }
    }
}

impl LogConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Read settings through a custom lookup (for tests).
    ///
    /// Empty filter variables count as unset; an unknown format is text.
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let filter = [ENV_LOG, ENV_RUST_LOG]
            .into_iter()
            .filter_map(|key| get_env(key))
            .find(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());
        let format = get_env(ENV_LOG_FORMAT)
            .and_then(|value| LogFormat::parse(&value))
            .unwrap_or_default();
        Self { filter, format }
    }
}

/// Failure to install the global subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    /// The filter directive did not parse.
    InvalidFilter(String),
    /// Another global subscriber is already installed.
    AlreadyInitialized,
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFilter(msg) => write!(f, "invalid log filter: {msg}"),
            Self::AlreadyInitialized => write!(f, "a global tracing subscriber is already set"),
        }
    }
}

impl std::error::Error for LoggingError {}

/// Install a stderr fmt subscriber configured from the environment.
///
/// # Errors
///
/// Returns [`LoggingError::InvalidFilter`] for a malformed directive and
/// [`LoggingError::AlreadyInitialized`] when called twice.
pub fn init() -> Result<(), LoggingError> {
    init_with(&LogConfig::from_env())
}

/// Install a stderr fmt subscriber with explicit settings.
pub fn init_with(config: &LogConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|err| LoggingError::InvalidFilter(err.to_string()))?;
    let installed = match config.format {
        LogFormat::Text => init_text(filter),
        LogFormat::Json => init_json(filter),
    };
    installed.map_err(|_| LoggingError::AlreadyInitialized)
}

type InitResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

fn init_text(filter: EnvFilter) -> InitResult {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
}

#[cfg(feature = "tracing-json")]
fn init_json(filter: EnvFilter) -> InitResult {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
}

#[cfg(not(feature = "tracing-json"))]
fn init_json(filter: EnvFilter) -> InitResult {
    init_text(filter)?;
    tracing::warn!("JSON logs need the tracing-json feature, using text");
    Ok(())
}
