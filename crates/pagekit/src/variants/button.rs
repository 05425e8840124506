//! `<button>` elements.

use super::{locatable_via_element, Variant};
use crate::element::{Condition, Element};
use crate::locator::XPathBuilder;
use crate::result::UiResult;
use crate::session::Session;

/// A `<button>`; clicks wait for it to be enabled
#[derive(Debug, Clone)]
pub struct Button {
    element: Element,
}

impl Variant for Button {
    const COMPONENT: &'static str = "button";

    fn base() -> XPathBuilder {
        XPathBuilder::create("button")
    }

    fn from_element(element: Element) -> Self {
        Self { element }
    }

    fn element(&self) -> &Element {
        &self.element
    }
}

locatable_via_element!(Button);

impl Button {
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

    /// Exact `type`
    #[must_use]
    pub fn by_type(session: &Session, kind: &str) -> Self {
        Self::by_attribute(session, "type", kind)
    }

    /// `type` contains
    #[must_use]
    pub fn by_contains_type(session: &Session, kind: &str) -> Self {
        Self::by_contains_attribute(session, "type", kind)
    }

    /// Wait until enabled, then click.
    ///
    /// # Errors
    ///
    /// [`UiError::Precondition`](crate::UiError::Precondition) if the button
    /// never becomes enabled
    pub fn click(&self) -> UiResult<()> {
        self.element.click_when(&Condition::Enabled)
    }

    /// Text content
    ///
    /// # Errors
    ///
    /// Timeout if the button never appears
    pub fn text(&self) -> UiResult<String> {
        self.element.text()
    }
}
