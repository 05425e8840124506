//! Page abstraction and the page object trait.
//!
//! A [`Page`] is a URL plus a main element. The page counts as loaded once the
//! main element is visible; nothing else is checked.
//!
//! ```text
//!  Unopened ──open_page──► Loading ──main element visible──► Loaded
//!                             ▲                                │
//!                             └──────────refresh_page──────────┘
//! ```
//!
//! A timed-out wait leaves the page in `Loading`. No transition leads back to
//! `Unopened`.

use crate::element::{Element, Locatable, VisibilityCheckable};
use crate::events::EventKind;
use crate::locator::Locator;
use crate::result::{UiError, UiResult};
use crate::session::Session;
use crate::wait::DEFAULT_PAGE_LOAD_TIMEOUT;
use std::time::Duration;

/// Load state of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageState {
    /// Never navigated to or waited on
    #[default]
    Unopened,
    /// Navigated, main element not yet seen
    Loading,
    /// Main element visible
    Loaded,
}

/// A screen identified by its URL and main element
#[derive(Debug, Clone)]
pub struct Page {
    url: String,
    main: Element,
    state: PageState,
    load_timeout: Duration,
}

impl Page {
    /// Declare a page whose load signal is `main_locator`
    #[must_use]
    pub fn new(
        session: &Session,
        url: impl Into<String>,
        main_locator: impl Into<Locator>,
    ) -> Self {
        let page = Self {
            url: url.into(),
            main: Element::typed(session, main_locator, "page"),
            state: PageState::Unopened,
            load_timeout: DEFAULT_PAGE_LOAD_TIMEOUT,
        };
        page.emit(EventKind::PageInitialized, None);
        page
    }

    /// Declare a page whose load signal is an already declared element
    #[must_use]
    pub fn with_main_element(
        session: &Session,
        url: impl Into<String>,
        main: &impl Locatable,
    ) -> Self {
        Self::new(session, url, main.locator().clone())
    }

    /// Change the default bound of [`Self::wait_for_page_to_load`]
    #[must_use]
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    /// Page URL
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Current load state
    #[must_use]
    pub const fn state(&self) -> PageState {
        self.state
    }

    /// Default load bound
    #[must_use]
    pub const fn load_timeout(&self) -> Duration {
        self.load_timeout
    }

    /// The load signal element
    #[must_use]
    pub const fn main_element(&self) -> &Element {
        &self.main
    }

    /// Navigate to the page URL and wait for the main element.
    ///
    /// # Errors
    ///
    /// [`UiError::Navigation`] if the driver cannot navigate (state stays
    /// unchanged), [`UiError::Timeout`] if the main element never shows (state
    /// stays `Loading`)
    pub fn open_page(&mut self) -> UiResult<()> {
        self.session()
            .driver()
            .navigate(&self.url)
            .map_err(|e| UiError::Navigation {
                url: self.url.clone(),
                message: e.to_string(),
            })?;
        self.state = PageState::Loading;
        self.emit(EventKind::PageOpened, None);
        self.wait_for_page_to_load()
    }

    /// Reload the current document and wait for the main element again.
    ///
    /// # Errors
    ///
    /// Driver error on reload, [`UiError::Timeout`] if the main element never
    /// shows
    pub fn refresh_page(&mut self) -> UiResult<()> {
        self.session().driver().refresh()?;
        self.state = PageState::Loading;
        self.emit(EventKind::PageRefreshed, None);
        self.wait_for_page_to_load()
    }

    /// Wait for the main element within the page's load timeout
    ///
    /// # Errors
    ///
    /// [`UiError::Timeout`] if the main element never shows
    pub fn wait_for_page_to_load(&mut self) -> UiResult<()> {
        self.wait_for_page_to_load_within(self.load_timeout)
    }

    /// Wait for the main element within `timeout`
    ///
    /// # Errors
    ///
    /// [`UiError::Timeout`] if the main element never shows
    pub fn wait_for_page_to_load_within(&mut self, timeout: Duration) -> UiResult<()> {
        if self.state == PageState::Unopened {
            self.state = PageState::Loading;
        }
        let detail = format!("{}ms", timeout.as_millis());
        self.emit(EventKind::WaitingForLoad, Some(&detail));
        self.main.is_displayed_within(timeout)?;
        self.state = PageState::Loaded;
        self.emit(EventKind::PageLoaded, None);
        Ok(())
    }

    fn emit(&self, kind: EventKind, detail: Option<&str>) {
        self.session().emit(kind, "page", &self.url, detail);
    }
}

impl Locatable for Page {
    fn locator(&self) -> &Locator {
        self.main.locator()
    }

    fn session(&self) -> &Session {
        self.main.session()
    }

    fn component(&self) -> &'static str {
        "page"
    }
}

/// Composition point for concrete pages.
///
/// Implement [`page`](Self::page) and [`page_mut`](Self::page_mut); the load
/// contract comes with the default methods.
///
/// # Example
///
/// ```ignore
/// struct SearchPage {
///     page: Page,
///     query: TextInput,
/// }
///
/// impl PageObject for SearchPage {
///     fn page(&self) -> &Page { &self.page }
///     fn page_mut(&mut self) -> &mut Page { &mut self.page }
/// }
/// ```
pub trait PageObject {
    /// The underlying page
    fn page(&self) -> &Page;

    /// The underlying page, mutably
    fn page_mut(&mut self) -> &mut Page;

    /// Navigate and wait for the main element
    ///
    /// # Errors
    ///
    /// See [`Page::open_page`]
    fn open_page(&mut self) -> UiResult<()> {
        self.page_mut().open_page()
    }

    /// Reload and wait for the main element
    ///
    /// # Errors
    ///
    /// See [`Page::refresh_page`]
    fn refresh_page(&mut self) -> UiResult<()> {
        self.page_mut().refresh_page()
    }

    /// Wait for the main element within the page's load timeout
    ///
    /// # Errors
    ///
    /// See [`Page::wait_for_page_to_load`]
    fn wait_for_page_to_load(&mut self) -> UiResult<()> {
        self.page_mut().wait_for_page_to_load()
    }

    /// Wait for the main element within `timeout`
    ///
    /// # Errors
    ///
    /// See [`Page::wait_for_page_to_load_within`]
    fn wait_for_page_to_load_within(&mut self, timeout: Duration) -> UiResult<()> {
        self.page_mut().wait_for_page_to_load_within(timeout)
    }

    /// Wait until the main element is visible, bounded by the session timeout
    ///
    /// # Errors
    ///
    /// [`UiError::Timeout`] if it is not
    fn is_displayed(&self) -> UiResult<()> {
        VisibilityCheckable::is_displayed(self.page())
    }

    /// Current load state
    fn state(&self) -> PageState {
        self.page().state()
    }

    /// Short type name for logging
    fn page_name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}
