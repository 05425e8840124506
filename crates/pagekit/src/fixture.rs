//! Per-test set-up and tear-down.
//!
//! A [`BrowserFixture`] turns [`Settings`] into a live [`Session`] and closes
//! the browser afterwards. [`FixtureScope`] tears down on drop, so a failing
//! test still releases its browser.

use crate::config::Settings;
use crate::driver::BrowserDriver;
use crate::events::EventSink;
use crate::result::{UiError, UiResult};
use crate::session::Session;
use std::fmt;
use std::sync::Arc;

/// Something a test sets up before running and tears down after.
///
/// # Example
///
/// ```ignore
/// let mut scope = FixtureScope::enter(BrowserFixture::new(settings, factory))?;
/// let session = scope.get().session()?.clone();
/// ```
pub trait Fixture {
    /// Acquire resources.
    ///
    /// # Errors
    ///
    /// Returns an error if set-up fails.
    fn setup(&mut self) -> UiResult<()>;

    /// Release resources. Calling it twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns an error if tear-down fails.
    fn teardown(&mut self) -> UiResult<()>;

    /// Fixture name for logging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Builds a driver from the run settings
pub type DriverFactory = Box<dyn Fn(&Settings) -> UiResult<Arc<dyn BrowserDriver>> + Send + Sync>;

/// One browser session per test
pub struct BrowserFixture {
    settings: Settings,
    factory: DriverFactory,
    sink: Option<Arc<dyn EventSink>>,
    session: Option<Session>,
}

impl fmt::Debug for BrowserFixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowserFixture")
            .field("settings", &self.settings)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl BrowserFixture {
    /// Create a fixture; nothing is launched until [`Fixture::setup`]
    pub fn new<F>(settings: Settings, factory: F) -> Self
    where
        F: Fn(&Settings) -> UiResult<Arc<dyn BrowserDriver>> + Send + Sync + 'static,
    {
        Self {
            settings,
            factory: Box::new(factory),
            sink: None,
            session: None,
        }
    }

    /// Route session events to `sink` instead of `tracing`
    #[must_use]
    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Settings the session is built from
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The live session
    ///
    /// # Errors
    ///
    /// [`UiError::Fixture`] before set-up or after tear-down
    pub fn session(&self) -> UiResult<&Session> {
        self.session.as_ref().ok_or_else(|| UiError::Fixture {
            message: "browser fixture is not set up".to_string(),
        })
    }

    /// Whether a session is live
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.session.is_some()
    }
}

impl Fixture for BrowserFixture {
    fn setup(&mut self) -> UiResult<()> {
        if self.session.is_some() {
            return Err(UiError::Fixture {
                message: "browser fixture is already set up".to_string(),
            });
        }

        let driver = (self.factory)(&self.settings)?;
        let mut session =
            Session::from_arc(driver).with_wait_options(self.settings.browser.wait_options());
        if let Some(sink) = &self.sink {
            session = session.with_shared_sink(Arc::clone(sink));
        }

        tracing::info!(
            session = %session.id(),
            browser = %self.settings.browser.kind,
            size = %self.settings.browser.size,
            timeout_ms = self.settings.browser.timeout_ms,
            "browser session started"
        );
        self.session = Some(session);
        Ok(())
    }

    fn teardown(&mut self) -> UiResult<()> {
        if let Some(session) = self.session.take() {
            session.close()?;
            tracing::info!(session = %session.id(), "browser session closed");
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "browser"
    }
}

/// Sets a fixture up on entry and tears it down on drop
#[derive(Debug)]
pub struct FixtureScope<F: Fixture> {
    fixture: F,
}

impl<F: Fixture> FixtureScope<F> {
    /// Set up `fixture`
    ///
    /// # Errors
    ///
    /// The fixture's set-up error
    pub fn enter(mut fixture: F) -> UiResult<Self> {
        fixture.setup()?;
        Ok(Self { fixture })
    }

    /// The fixture
    #[must_use]
    pub const fn get(&self) -> &F {
        &self.fixture
    }

    /// The fixture, mutably
    #[must_use]
    pub fn get_mut(&mut self) -> &mut F {
        &mut self.fixture
    }
}

impl<F: Fixture> Drop for FixtureScope<F> {
    fn drop(&mut self) {
        if let Err(e) = self.fixture.teardown() {
            tracing::warn!(fixture = self.fixture.name(), error = %e, "teardown failed");
        }
    }
}
