//! Bounded waits.
//!
//! A wait polls a predicate until it holds or the timeout elapses. The
//! calling thread blocks for the whole wait; the timeout is the only way a
//! wait ends early.

use crate::result::{UiError, UiResult};
use std::time::{Duration, Instant};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default timeout for element waits (10 seconds)
pub const DEFAULT_ELEMENT_TIMEOUT_MS: u64 = 10_000;

/// Default timeout for the page load contract (10 seconds)
pub const DEFAULT_PAGE_LOAD_TIMEOUT_MS: u64 = 10_000;

/// Default page load timeout as a `Duration`
pub const DEFAULT_PAGE_LOAD_TIMEOUT: Duration = Duration::from_millis(DEFAULT_PAGE_LOAD_TIMEOUT_MS);

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_ELEMENT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set timeout from a `Duration`
    #[must_use]
    pub fn with_timeout_duration(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

// =============================================================================
// WAIT RESULT
// =============================================================================

/// Result of a successful wait
#[derive(Debug, Clone)]
pub struct WaitResult {
    /// Time spent waiting
    pub elapsed: Duration,
    /// Number of predicate evaluations
    pub attempts: u32,
    /// Description of what was waited for
    pub waited_for: String,
}

// =============================================================================
// WAITER IMPLEMENTATION
// =============================================================================

/// Polls predicates against the live document
#[derive(Debug, Clone, Copy, Default)]
pub struct Waiter {
    options: WaitOptions,
}

impl Waiter {
    /// Create a new waiter with default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom options
    #[must_use]
    pub const fn with_options(options: WaitOptions) -> Self {
        Self { options }
    }

    /// Options in effect
    #[must_use]
    pub const fn options(&self) -> &WaitOptions {
        &self.options
    }

    /// Poll `predicate` until it returns `Ok(true)`.
    ///
    /// The predicate runs at least once, even with a zero timeout.
    /// `NotFound` counts as "not yet"; any other error ends the wait.
    ///
    /// # Errors
    ///
    /// [`UiError::Timeout`] when the bound elapses, or the predicate's error.
    pub fn wait_for<F>(&self, waited_for: &str, mut predicate: F) -> UiResult<WaitResult>
    where
        F: FnMut() -> UiResult<bool>,
    {
        let start = Instant::now();
        let timeout = self.options.timeout();
        let poll_interval = self.options.poll_interval();
        let mut attempts = 0u32;

        loop {
            attempts = attempts.saturating_add(1);
            match predicate() {
                Ok(true) => {
                    return Ok(WaitResult {
                        elapsed: start.elapsed(),
                        attempts,
                        waited_for: waited_for.to_string(),
                    });
                }
                Ok(false) => {}
                Err(e) if e.is_not_found() => {}
                Err(e) => return Err(e),
            }

            let elapsed = start.elapsed();
            if elapsed >= timeout {
                return Err(UiError::Timeout {
                    waited_for: waited_for.to_string(),
                    ms: self.options.timeout_ms,
                });
            }
            std::thread::sleep(poll_interval.min(timeout - elapsed));
        }
    }
}

// =============================================================================
// CONVENIENCE FUNCTIONS
// =============================================================================

/// Wait for a condition with the default poll interval
pub fn wait_until<F>(waited_for: &str, predicate: F, timeout_ms: u64) -> UiResult<()>
where
    F: FnMut() -> UiResult<bool>,
{
    Waiter::with_options(WaitOptions::new().with_timeout(timeout_ms))
        .wait_for(waited_for, predicate)
        .map(|_| ())
}
