//! The browser session shared by every element and page.

use crate::driver::BrowserDriver;
use crate::events::{EventKind, EventSink, TracingSink, UiEvent};
use crate::wait::{WaitOptions, Waiter};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// One driver, one event sink, one default wait policy.
///
/// Cloning is cheap; every clone talks to the same browser.
#[derive(Clone)]
pub struct Session {
    id: String,
    driver: Arc<dyn BrowserDriver>,
    sink: Arc<dyn EventSink>,
    wait: WaitOptions,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("sink", &self.sink)
            .field("wait", &self.wait)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Wrap a driver; events go to `tracing`
    pub fn new(driver: impl BrowserDriver + 'static) -> Self {
        Self::from_arc(Arc::new(driver))
    }

    /// Wrap a shared driver
    #[must_use]
    pub fn from_arc(driver: Arc<dyn BrowserDriver>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            driver,
            sink: Arc::new(TracingSink),
            wait: WaitOptions::default(),
        }
    }

    /// Send events to `sink` instead
    #[must_use]
    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Send events to an already shared sink
    #[must_use]
    pub fn with_shared_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Default options for element waits
    #[must_use]
    pub const fn with_wait_options(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// Default element wait timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.wait = self.wait.with_timeout_duration(timeout);
        self
    }

    /// Unique session id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The underlying driver
    #[must_use]
    pub fn driver(&self) -> &dyn BrowserDriver {
        self.driver.as_ref()
    }

    /// Default element wait options
    #[must_use]
    pub const fn wait_options(&self) -> &WaitOptions {
        &self.wait
    }

    /// Waiter using the session defaults
    #[must_use]
    pub const fn waiter(&self) -> Waiter {
        Waiter::with_options(self.wait)
    }

    /// Waiter bounded by `timeout`, keeping the session poll interval
    #[must_use]
    pub fn waiter_within(&self, timeout: Duration) -> Waiter {
        Waiter::with_options(self.wait.with_timeout_duration(timeout))
    }

    /// Report an action
    pub fn emit(&self, kind: EventKind, component: &str, target: &str, detail: Option<&str>) {
        let mut event = UiEvent::new(self.id.as_str(), kind, component, target);
        if let Some(detail) = detail {
            event = event.with_detail(detail);
        }
        self.sink.record(&event);
    }

    /// Close the browser
    pub fn close(&self) -> crate::UiResult<()> {
        self.driver.close()
    }
}
