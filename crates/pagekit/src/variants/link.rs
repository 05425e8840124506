//! `<a>` elements.

use super::{locatable_via_element, Variant};
use crate::element::{Condition, Element, Locatable};
use crate::locator::XPathBuilder;
use crate::result::UiResult;
use crate::session::Session;

/// An `<a>`; clicks wait for it to be visible
#[derive(Debug, Clone)]
pub struct Link {
    element: Element,
}

impl Variant for Link {
    const COMPONENT: &'static str = "link";

    fn base() -> XPathBuilder {
        XPathBuilder::create("a")
    }

    fn from_element(element: Element) -> Self {
        Self { element }
    }

    fn element(&self) -> &Element {
        &self.element
    }
}

locatable_via_element!(Link);

impl Link {
    /// Exact text content
    #[must_use]
    pub fn by_text(session: &Session, text: &str) -> Self {
        Self::by_locator(session, Self::base().with_text(text).build())
    }

    /// Text content contains
    #[must_use]
    pub fn by_contains_text(session: &Session, text: &str) -> Self {
        Self::by_locator(session, Self::base().contains_text(text).build())
    }

    /// Exact `title`
    #[must_use]
    pub fn by_title(session: &Session, title: &str) -> Self {
        Self::by_attribute(session, "title", title)
    }

    /// `title` contains
    #[must_use]
    pub fn by_contains_title(session: &Session, title: &str) -> Self {
        Self::by_contains_attribute(session, "title", title)
    }

    /// Exact `href`
    #[must_use]
    pub fn by_href(session: &Session, href: &str) -> Self {
        Self::by_attribute(session, "href", href)
    }

    /// `href` contains
    #[must_use]
    pub fn by_contains_href(session: &Session, href: &str) -> Self {
        Self::by_contains_attribute(session, "href", href)
    }

    /// Wait until visible, then click.
    ///
    /// # Errors
    ///
    /// [`UiError::Precondition`](crate::UiError::Precondition) if the link
    /// never becomes visible
    pub fn click(&self) -> UiResult<()> {
        self.element.click_when(&Condition::Visible)
    }

    /// The `href` attribute once visible, `None` when absent
    ///
    /// # Errors
    ///
    /// [`UiError::Precondition`](crate::UiError::Precondition) if the link
    /// never becomes visible
    pub fn href(&self) -> UiResult<Option<String>> {
        let node = self.element.require(&Condition::Visible)?;
        self.element.session().driver().attribute(&node, "href")
    }

    /// Text content once visible
    ///
    /// # Errors
    ///
    /// [`UiError::Precondition`](crate::UiError::Precondition) if the link
    /// never becomes visible
    pub fn text(&self) -> UiResult<String> {
        let node = self.element.require(&Condition::Visible)?;
        self.element.session().driver().text(&node)
    }
}
