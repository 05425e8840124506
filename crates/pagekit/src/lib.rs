//! Pagekit: page-object UI test automation.
//!
//! Pages and elements are thin typed wrappers over a [`BrowserDriver`]. A page
//! is a URL plus a main element whose visibility signals "loaded"; elements
//! are locators resolved lazily against whatever the browser shows now.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌───────────────┐
//! │ Concrete     │   │ Page /       │   │ Variants     │   │ BrowserDriver │
//! │ page objects │──►│ PageObject   │──►│ Button, Link │──►│ Chromium/Mock │
//! │              │   │ (load wait)  │   │ Checkbox ... │   │               │
//! └──────────────┘   └──────────────┘   └──────────────┘   └───────────────┘
//!                                              │
//!                                              ▼
//!                                   XPathBuilder ─► Locator
//! ```
//!
//! Every action reports a [`UiEvent`] to the session's [`EventSink`].
//!
//! # Example
//!
//! ```ignore
//! use pagekit::prelude::*;
//!
//! let session = Session::new(driver);
//! let login = Button::by_id(&session, "loginbtn");
//! let mut page = Page::with_main_element(&session, "https://vec.etu.ru/moodle/login/", &login);
//! page.open_page()?;
//! TextInput::by_id(&session, "username").set_value("student")?;
//! login.click()?;
//! ```

#![warn(missing_docs)]

pub mod config;
mod driver;
pub mod element;
pub mod events;
pub mod fixture;
mod locator;
pub mod logging;
pub mod mock;
pub mod page;
mod result;
mod session;
pub mod variants;
pub mod wait;

#[cfg(feature = "browser")]
#[allow(clippy::significant_drop_tightening, clippy::missing_errors_doc)]
mod browser;

#[cfg(feature = "browser")]
pub use browser::ChromiumDriver;
pub use config::{BrowserKind, BrowserSettings, Credentials, Settings};
pub use driver::{BrowserDriver, NodeHandle};
pub use element::{Condition, Element, Locatable, VisibilityCheckable};
pub use events::{EventKind, EventSink, NullSink, RecordingSink, TracingSink, UiEvent};
pub use fixture::{BrowserFixture, DriverFactory, Fixture, FixtureScope};
pub use locator::{xpath_literal, Locator, XPathBuilder};
pub use logging::{init_logging, LogFormat};
pub use mock::{MockDriver, MockNode, MockState, NodeKind, Reaction};
pub use page::{Page, PageObject, PageState};
pub use result::{UiError, UiResult};
pub use session::Session;
pub use variants::{Button, Checkbox, Link, RadioButton, TextInput, Variant};
pub use wait::{
    wait_until, WaitOptions, WaitResult, Waiter, DEFAULT_ELEMENT_TIMEOUT_MS,
    DEFAULT_PAGE_LOAD_TIMEOUT, DEFAULT_PAGE_LOAD_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS,
};

/// Prelude for convenient imports
pub mod prelude {
    #[cfg(feature = "browser")]
    pub use super::browser::ChromiumDriver;
    pub use super::config::*;
    pub use super::driver::*;
    pub use super::element::*;
    pub use super::events::*;
    pub use super::fixture::*;
    pub use super::locator::*;
    pub use super::page::*;
    pub use super::result::*;
    pub use super::session::*;
    pub use super::variants::*;
    pub use super::wait::{WaitOptions, Waiter, DEFAULT_PAGE_LOAD_TIMEOUT};
}
