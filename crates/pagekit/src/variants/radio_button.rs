//! `<input type="radio">` elements.

use super::{locatable_via_element, Variant};
use crate::element::{Condition, Element};
use crate::events::EventKind;
use crate::locator::XPathBuilder;
use crate::result::UiResult;
use crate::session::Session;

/// A radio button. Selection is exclusive, so there is no deselect.
#[derive(Debug, Clone)]
pub struct RadioButton {
    element: Element,
}

impl Variant for RadioButton {
    const COMPONENT: &'static str = "radio_button";

    fn base() -> XPathBuilder {
        XPathBuilder::create("input").with_attribute("type", "radio")
    }

    fn from_element(element: Element) -> Self {
        Self { element }
    }

    fn element(&self) -> &Element {
        &self.element
    }
}

locatable_via_element!(RadioButton);

impl RadioButton {
    /// Exact `value`
    #[must_use]
    pub fn by_value(session: &Session, value: &str) -> Self {
        Self::by_attribute(session, "value", value)
    }

    /// Select unless already selected
    ///
    /// # Errors
    ///
    /// Timeout if absent, precondition failure if disabled
    pub fn select(&self) -> UiResult<()> {
        if self.is_selected()? {
            self.element
                .emit(EventKind::AlreadyInState, Some("selected=true"));
            return Ok(());
        }
        self.element.click_when(&Condition::Enabled)?;
        self.element.emit(EventKind::Selected, None);
        Ok(())
    }

    /// Current selection state
    ///
    /// # Errors
    ///
    /// Timeout if absent
    pub fn is_selected(&self) -> UiResult<bool> {
        self.element.state(&Condition::Selected)
    }

    /// Wait until selected
    ///
    /// # Errors
    ///
    /// Timeout if it stays unselected
    pub fn should_be_selected(&self) -> UiResult<()> {
        self.element.should_be(Condition::Selected)
    }

    /// Wait until not selected
    ///
    /// # Errors
    ///
    /// Timeout if it stays selected
    pub fn should_not_be_selected(&self) -> UiResult<()> {
        self.element.should_not_be(Condition::Selected)
    }
}
