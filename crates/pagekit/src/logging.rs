//! Process-wide `tracing` subscriber setup.
//!
//! [`TracingSink`](crate::TracingSink) emits one INFO event per action. Call
//! [`init_logging`] once near the start of a test binary to see them; later
//! calls are no-ops.

use crate::result::{UiError, UiResult};
use std::str::FromStr;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable selecting the log format
pub const LOG_FORMAT_ENV: &str = "PAGEKIT_LOG_FORMAT";

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info";

static INITIALIZED: OnceLock<LogFormat> = OnceLock::new();

/// Output encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    /// Format named by `PAGEKIT_LOG_FORMAT`, text when unset or unknown
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(LOG_FORMAT_ENV)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for LogFormat {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(UiError::Config {
                message: format!("unknown log format '{other}'"),
            }),
        }
    }
}

/// Install the global subscriber writing to stderr.
///
/// Honours `RUST_LOG`, falling back to [`DEFAULT_FILTER`]. Returns the format
/// actually in effect, which is the first caller's.
///
/// # Errors
///
/// [`UiError::Config`] if another subscriber was installed elsewhere
pub fn init_logging(format: LogFormat) -> UiResult<LogFormat> {
    if let Some(active) = INITIALIZED.get() {
        return Ok(*active);
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let installed = match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };
    installed.map_err(|e| UiError::Config {
        message: format!("tracing setup failed: {e}"),
    })?;

    Ok(*INITIALIZED.get_or_init(|| format))
}
