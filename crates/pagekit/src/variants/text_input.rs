//! `<input>` text fields.

use super::{locatable_via_element, Variant};
use crate::element::{Condition, Element, Locatable};
use crate::events::EventKind;
use crate::locator::XPathBuilder;
use crate::result::UiResult;
use crate::session::Session;

/// Detail recorded instead of a secret value
const REDACTED: &str = "<redacted>";

/// A text `<input>`; every action waits for it to be visible first
#[derive(Debug, Clone)]
pub struct TextInput {
    element: Element,
}

impl Variant for TextInput {
    const COMPONENT: &'static str = "text_input";

    fn base() -> XPathBuilder {
        XPathBuilder::create("input")
    }

    fn from_element(element: Element) -> Self {
        Self { element }
    }

    fn element(&self) -> &Element {
        &self.element
    }
}

locatable_via_element!(TextInput);

impl TextInput {
    /// Exact `placeholder`
    #[must_use]
    pub fn by_placeholder(session: &Session, placeholder: &str) -> Self {
        Self::by_attribute(session, "placeholder", placeholder)
    }

    /// `placeholder` contains
    #[must_use]
    pub fn by_contains_placeholder(session: &Session, placeholder: &str) -> Self {
        Self::by_contains_attribute(session, "placeholder", placeholder)
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

    /// Replace the field value
    ///
    /// # Errors
    ///
    /// Precondition failure if the field never becomes visible
    pub fn set_value(&self, value: &str) -> UiResult<()> {
        self.write(value, value)
    }

    /// Replace the field value without recording it
    ///
    /// # Errors
    ///
    /// Precondition failure if the field never becomes visible
    pub fn set_secret_value(&self, value: &str) -> UiResult<()> {
        self.write(value, REDACTED)
    }

    fn write(&self, value: &str, detail: &str) -> UiResult<()> {
        let node = self.element.require(&Condition::Visible)?;
        self.element.session().driver().set_value(&node, value)?;
        self.element.emit(EventKind::ValueSet, Some(detail));
        Ok(())
    }

    /// Current field value
    ///
    /// # Errors
    ///
    /// Precondition failure if the field never becomes visible
    pub fn value(&self) -> UiResult<String> {
        let node = self.element.require(&Condition::Visible)?;
        let value = self.element.session().driver().value(&node)?;
        self.element.emit(EventKind::ValueRead, None);
        Ok(value)
    }

    /// Empty the field
    ///
    /// # Errors
    ///
    /// Precondition failure if the field never becomes visible
    pub fn clear(&self) -> UiResult<()> {
        let node = self.element.require(&Condition::Visible)?;
        self.element.session().driver().clear(&node)?;
        self.element.emit(EventKind::Cleared, None);
        Ok(())
    }

    /// Whether the field is empty right now
    ///
    /// # Errors
    ///
    /// Precondition failure if the field never becomes visible
    pub fn is_empty(&self) -> UiResult<bool> {
        Ok(self.value()?.is_empty())
    }

    /// Wait until the field is empty
    ///
    /// # Errors
    ///
    /// Timeout if it keeps a value
    pub fn should_be_empty(&self) -> UiResult<()> {
        self.element.should_be(Condition::Value(String::new()))
    }
}
