//! `<input type="checkbox">` elements.

use super::{locatable_via_element, Variant};
use crate::element::{Condition, Element};
use crate::events::EventKind;
use crate::locator::XPathBuilder;
use crate::result::UiResult;
use crate::session::Session;

/// A checkbox. [`check`](Self::check) and [`uncheck`](Self::uncheck) click at
/// most once and only when the state differs.
#[derive(Debug, Clone)]
pub struct Checkbox {
    element: Element,
}

impl Variant for Checkbox {
    const COMPONENT: &'static str = "checkbox";

    fn base() -> XPathBuilder {
        XPathBuilder::create("input").with_attribute("type", "checkbox")
    }

    fn from_element(element: Element) -> Self {
        Self { element }
    }

    fn element(&self) -> &Element {
        &self.element
    }
}

locatable_via_element!(Checkbox);

impl Checkbox {
    /// Exact `value`
    #[must_use]
    pub fn by_value(session: &Session, value: &str) -> Self {
        Self::by_attribute(session, "value", value)
    }

    /// Ensure checked
    ///
    /// # Errors
    ///
    /// Timeout if absent, precondition failure if disabled
    pub fn check(&self) -> UiResult<()> {
        self.set_checked(true)
    }

    /// Ensure unchecked
    ///
    /// # Errors
    ///
    /// Timeout if absent, precondition failure if disabled
    pub fn uncheck(&self) -> UiResult<()> {
        self.set_checked(false)
    }

    fn set_checked(&self, target: bool) -> UiResult<()> {
        if self.is_checked()? == target {
            self.element
                .emit(EventKind::AlreadyInState, Some(&format!("checked={target}")));
            return Ok(());
        }
        self.element.click_when(&Condition::Enabled)?;
        let kind = if target {
            EventKind::Checked
        } else {
            EventKind::Unchecked
        };
        self.element.emit(kind, None);
        Ok(())
    }

    /// Current checked state
    ///
    /// # Errors
    ///
    /// Timeout if absent
    pub fn is_checked(&self) -> UiResult<bool> {
        self.element.state(&Condition::Selected)
    }

    /// Wait until checked
    ///
    /// # Errors
    ///
    /// Timeout if it stays unchecked
    pub fn should_be_checked(&self) -> UiResult<()> {
        self.element.should_be(Condition::Selected)
    }

    /// Wait until unchecked
    ///
    /// # Errors
    ///
    /// Timeout if it stays checked
    pub fn should_not_be_checked(&self) -> UiResult<()> {
        self.element.should_not_be(Condition::Selected)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::element::Locatable;
    use crate::events::RecordingSink;
    use crate::mock::{MockDriver, MockNode};
    use crate::result::UiError;
    use crate::variants::test_support::session_with;
    use std::sync::Arc;

    const REMEMBER: &str = "//input[@type='checkbox'][@id='remember']";

    fn remember(checked: bool) -> (Arc<MockDriver>, Checkbox, RecordingSink) {
        let (driver, session, sink) =
            session_with(vec![(REMEMBER.into(), MockNode::checkbox().selected(checked))]);
        (driver, Checkbox::by_id(&session, "remember"), sink)
    }

    #[test]
    fn test_by_value() {
        let (_, session, _) = session_with(vec![]);
        assert_eq!(
            Checkbox::by_value(&session, "on").locator().as_str(),
            "//input[@type='checkbox'][@value='on']"
        );
    }

    #[test]
    fn test_check_twice_clicks_once() {
        let (driver, checkbox, sink) = remember(false);
        checkbox.check().unwrap();
        checkbox.check().unwrap();

        assert_eq!(driver.clicks(REMEMBER), 1);
        assert!(checkbox.is_checked().unwrap());
        assert_eq!(sink.count(EventKind::Checked), 1);
        assert_eq!(sink.count(EventKind::AlreadyInState), 1);
    }

    #[test]
    fn test_uncheck_unchecked_clicks_never() {
        let (driver, checkbox, _) = remember(false);
        checkbox.uncheck().unwrap();
        assert_eq!(driver.clicks(REMEMBER), 0);
        assert!(!checkbox.is_checked().unwrap());
    }

    #[test]
    fn test_uncheck_checked_clicks_once() {
        let (driver, checkbox, sink) = remember(true);
        checkbox.uncheck().unwrap();
        checkbox.should_not_be_checked().unwrap();
        assert_eq!(driver.clicks(REMEMBER), 1);
        assert_eq!(sink.count(EventKind::Unchecked), 1);
    }

    #[test]
    fn test_should_be_checked() {
        let (_, checkbox, _) = remember(true);
        checkbox.should_be_checked().unwrap();
        assert!(matches!(
            checkbox.should_not_be_checked(),
            Err(UiError::Timeout { .. })
        ));
    }

    #[test]
    fn test_disabled_checkbox_is_not_clicked() {
        let (driver, session, _) = session_with(vec![(
            REMEMBER.into(),
            MockNode::checkbox().disabled(),
        )]);
        let err = Checkbox::by_id(&session, "remember").check().unwrap_err();
        assert!(matches!(err, UiError::Precondition { .. }));
        assert_eq!(driver.clicks(REMEMBER), 0);
    }
}
