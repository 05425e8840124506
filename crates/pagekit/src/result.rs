//! Result and error types for pagekit.

use thiserror::Error;

/// Result type for pagekit operations
pub type UiResult<T> = Result<T, UiError>;

/// Errors that can occur while driving pages and elements.
///
/// Nothing in this crate retries or recovers: every variant propagates to the
/// calling test.
#[derive(Debug, Error)]
pub enum UiError {
    /// A bounded wait never became true
    #[error("Timed out after {ms}ms waiting for {waited_for}")]
    Timeout {
        /// Description of the awaited condition
        waited_for: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// The locator matched no node in the current document
    #[error("No element matches {locator}")]
    NotFound {
        /// Locator expression
        locator: String,
    },

    /// The locator matched several nodes where exactly one was expected
    #[error("{count} elements match {locator}, expected exactly one")]
    Ambiguous {
        /// Locator expression
        locator: String,
        /// Number of matching nodes
        count: usize,
    },

    /// An action's precondition was not met
    #[error("Precondition failed: {message}")]
    Precondition {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Failure reported by the browser driver
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Browser kind has no driver backend
    #[error("Unsupported browser: {browser}")]
    UnsupportedBrowser {
        /// Configured browser kind
        browser: String,
    },

    /// Missing or malformed configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Fixture error (setup/teardown failed)
    #[error("Fixture error: {message}")]
    Fixture {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl UiError {
    /// Build a driver error from anything printable
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Whether this error means "no node matched" and a wait may keep polling
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
