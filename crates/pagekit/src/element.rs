//! Element abstraction and the capability traits shared with pages.
//!
//! An [`Element`] is a locator bound to a [`Session`]. It holds no node: every
//! action resolves the locator against the current document, so an element
//! declared before navigation keeps working after it.

use crate::driver::{BrowserDriver, NodeHandle};
use crate::events::EventKind;
use crate::locator::Locator;
use crate::result::{UiError, UiResult};
use crate::session::Session;
use std::fmt;
use std::time::Duration;

// =============================================================================
// CONDITIONS
// =============================================================================

/// A state an element can be asserted to be in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Rendered and visible
    Visible,
    /// Accepts interaction
    Enabled,
    /// Checked or selected
    Selected,
    /// Field value equals the given text
    Value(String),
}

impl Condition {
    /// Evaluate against a resolved node, once
    ///
    /// # Errors
    ///
    /// Returns the driver's error
    pub fn evaluate(&self, driver: &dyn BrowserDriver, node: &NodeHandle) -> UiResult<bool> {
        match self {
            Self::Visible => driver.is_visible(node),
            Self::Enabled => driver.is_enabled(node),
            Self::Selected => driver.is_selected(node),
            Self::Value(expected) => Ok(driver.value(node)? == *expected),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visible => f.write_str("visible"),
            Self::Enabled => f.write_str("enabled"),
            Self::Selected => f.write_str("selected"),
            Self::Value(value) => write!(f, "value {value:?}"),
        }
    }
}

// =============================================================================
// CAPABILITY TRAITS
// =============================================================================

/// Anything backed by one locator in one session
pub trait Locatable {
    /// The locator
    fn locator(&self) -> &Locator;

    /// The session the locator is resolved in
    fn session(&self) -> &Session;

    /// Component name used in events
    fn component(&self) -> &'static str {
        "element"
    }
}

/// Bounded visibility checks for anything [`Locatable`].
///
/// Absent nodes count as not displayed.
pub trait VisibilityCheckable: Locatable {
    /// Wait until visible, bounded by the session timeout
    ///
    /// # Errors
    ///
    /// [`UiError::Timeout`] if the node is not visible in time
    fn is_displayed(&self) -> UiResult<()> {
        self.is_displayed_within(self.session().wait_options().timeout())
    }

    /// Wait until visible, bounded by `timeout`
    ///
    /// # Errors
    ///
    /// [`UiError::Timeout`] if the node is not visible in time
    fn is_displayed_within(&self, timeout: Duration) -> UiResult<()> {
        expect_condition(self, &Condition::Visible, true, timeout)
    }

    /// Wait until hidden or absent, bounded by the session timeout
    ///
    /// # Errors
    ///
    /// [`UiError::Timeout`] if the node stays visible
    fn is_not_displayed(&self) -> UiResult<()> {
        self.is_not_displayed_within(self.session().wait_options().timeout())
    }

    /// Wait until hidden or absent, bounded by `timeout`
    ///
    /// # Errors
    ///
    /// [`UiError::Timeout`] if the node stays visible
    fn is_not_displayed_within(&self, timeout: Duration) -> UiResult<()> {
        expect_condition(self, &Condition::Visible, false, timeout)
    }
}

impl<T: Locatable + ?Sized> VisibilityCheckable for T {}

/// Resolve and evaluate once. Absent nodes satisfy `expected == false`.
fn check_once(
    session: &Session,
    locator: &Locator,
    condition: &Condition,
    expected: bool,
) -> UiResult<bool> {
    let driver = session.driver();
    match driver.resolve(locator) {
        Ok(node) => Ok(condition.evaluate(driver, &node)? == expected),
        Err(e) if e.is_not_found() && !expected => Ok(true),
        Err(e) => Err(e),
    }
}

/// Blocking assertion shared by elements, variants and pages
pub(crate) fn expect_condition<L: Locatable + ?Sized>(
    target: &L,
    condition: &Condition,
    expected: bool,
    timeout: Duration,
) -> UiResult<()> {
    let session = target.session();
    let locator = target.locator();
    let detail = if expected {
        condition.to_string()
    } else {
        format!("not {condition}")
    };

    let waited = session
        .waiter_within(timeout)
        .wait_for(&format!("{locator} to be {detail}"), || {
            check_once(session, locator, condition, expected)
        });

    match waited {
        Ok(_) => {
            session.emit(
                EventKind::AssertionPassed,
                target.component(),
                locator.as_str(),
                Some(&detail),
            );
            Ok(())
        }
        Err(e) => {
            session.emit(
                EventKind::AssertionFailed,
                target.component(),
                locator.as_str(),
                Some(&e.to_string()),
            );
            Err(e)
        }
    }
}

// =============================================================================
// ELEMENT
// =============================================================================

/// One locator in one session
#[derive(Debug, Clone)]
pub struct Element {
    locator: Locator,
    session: Session,
    component: &'static str,
}

impl Element {
    /// Declare an element
    #[must_use]
    pub fn new(session: &Session, locator: impl Into<Locator>) -> Self {
        Self::typed(session, locator, "element")
    }

    /// Declare an element reporting events under `component`
    #[must_use]
    pub fn typed(session: &Session, locator: impl Into<Locator>, component: &'static str) -> Self {
        let element = Self {
            locator: locator.into(),
            session: session.clone(),
            component,
        };
        element.emit(EventKind::ElementInitialized, None);
        element
    }

    /// Resolve against the current document, without waiting
    ///
    /// # Errors
    ///
    /// [`UiError::NotFound`] or [`UiError::Ambiguous`] from the driver
    pub fn resolve(&self) -> UiResult<NodeHandle> {
        self.session.driver().resolve(&self.locator)
    }

    /// Hover over the element
    ///
    /// # Errors
    ///
    /// Returns the driver's error
    pub fn focus(&self) -> UiResult<()> {
        let node = self.resolve()?;
        self.session.driver().hover(&node)?;
        self.emit(EventKind::Focused, None);
        Ok(())
    }

    /// Whether the element accepts interaction right now
    ///
    /// # Errors
    ///
    /// Returns the driver's error, including [`UiError::NotFound`]
    pub fn is_enabled(&self) -> UiResult<bool> {
        let node = self.resolve()?;
        let enabled = self.session.driver().is_enabled(&node)?;
        self.emit(EventKind::StateRead, Some(&format!("enabled={enabled}")));
        Ok(enabled)
    }

    /// Whether the element is visible right now; absent counts as not visible
    ///
    /// # Errors
    ///
    /// Driver errors other than [`UiError::NotFound`]
    pub fn is_visible_now(&self) -> UiResult<bool> {
        let driver = self.session.driver();
        let visible = match driver.resolve(&self.locator) {
            Ok(node) => driver.is_visible(&node)?,
            Err(e) if e.is_not_found() => false,
            Err(e) => return Err(e),
        };
        self.emit(EventKind::StateRead, Some(&format!("visible={visible}")));
        Ok(visible)
    }

    /// Wait until `condition` holds, bounded by the session timeout
    ///
    /// # Errors
    ///
    /// [`UiError::Timeout`] if it never holds
    pub fn should_be(&self, condition: Condition) -> UiResult<()> {
        self.should_be_within(condition, self.session.wait_options().timeout())
    }

    /// Wait until `condition` holds, bounded by `timeout`
    ///
    /// # Errors
    ///
    /// [`UiError::Timeout`] if it never holds
    pub fn should_be_within(&self, condition: Condition, timeout: Duration) -> UiResult<()> {
        expect_condition(self, &condition, true, timeout)
    }

    /// Wait until `condition` does not hold, bounded by the session timeout.
    /// An absent element satisfies every negated condition.
    ///
    /// # Errors
    ///
    /// [`UiError::Timeout`] if it keeps holding
    pub fn should_not_be(&self, condition: Condition) -> UiResult<()> {
        self.should_not_be_within(condition, self.session.wait_options().timeout())
    }

    /// Wait until `condition` does not hold, bounded by `timeout`
    ///
    /// # Errors
    ///
    /// [`UiError::Timeout`] if it keeps holding
    pub fn should_not_be_within(&self, condition: Condition, timeout: Duration) -> UiResult<()> {
        expect_condition(self, &condition, false, timeout)
    }

    /// Wait until `condition` holds and return the node it held on.
    ///
    /// # Errors
    ///
    /// [`UiError::Precondition`] when the session timeout elapses first
    pub fn require(&self, condition: &Condition) -> UiResult<NodeHandle> {
        let driver = self.session.driver();
        let mut found = None;
        let waited = self.session.waiter().wait_for(
            &format!("{} to be {condition}", self.locator),
            || {
                let node = driver.resolve(&self.locator)?;
                let holds = condition.evaluate(driver, &node)?;
                if holds {
                    found = Some(node);
                }
                Ok(holds)
            },
        );

        match waited {
            Ok(_) => found.ok_or_else(|| UiError::NotFound {
                locator: self.locator.to_string(),
            }),
            Err(UiError::Timeout { ms, .. }) => Err(UiError::Precondition {
                message: format!(
                    "{} {} was not {condition} within {ms}ms",
                    self.component, self.locator
                ),
            }),
            Err(e) => Err(e),
        }
    }

    /// Wait until the locator resolves, bounded by the session timeout
    ///
    /// # Errors
    ///
    /// [`UiError::Timeout`] if nothing ever matches
    pub fn present(&self) -> UiResult<NodeHandle> {
        let mut found = None;
        self.session
            .waiter()
            .wait_for(&format!("{} to be present", self.locator), || {
                found = Some(self.resolve()?);
                Ok(true)
            })?;
        found.ok_or_else(|| UiError::NotFound {
            locator: self.locator.to_string(),
        })
    }

    /// Read `condition` once the element is present
    ///
    /// # Errors
    ///
    /// [`UiError::Timeout`] if the element never appears
    pub fn state(&self, condition: &Condition) -> UiResult<bool> {
        let node = self.present()?;
        let holds = condition.evaluate(self.session.driver(), &node)?;
        self.emit(EventKind::StateRead, Some(&format!("{condition}={holds}")));
        Ok(holds)
    }

    /// Wait for `condition`, then click
    ///
    /// # Errors
    ///
    /// [`UiError::Precondition`] if the condition is not met in time
    pub fn click_when(&self, condition: &Condition) -> UiResult<()> {
        let node = self.require(condition)?;
        self.session.driver().click(&node)?;
        self.emit(EventKind::Clicked, None);
        Ok(())
    }

    /// Text content once present
    ///
    /// # Errors
    ///
    /// [`UiError::Timeout`] if the element never appears
    pub fn text(&self) -> UiResult<String> {
        let node = self.present()?;
        self.session.driver().text(&node)
    }

    /// Attribute value once present
    ///
    /// # Errors
    ///
    /// [`UiError::Timeout`] if the element never appears
    pub fn attribute(&self, name: &str) -> UiResult<Option<String>> {
        let node = self.present()?;
        self.session.driver().attribute(&node, name)
    }

    /// Report an action on this element
    pub fn emit(&self, kind: EventKind, detail: Option<&str>) {
        self.session
            .emit(kind, self.component, self.locator.as_str(), detail);
    }
}

impl Locatable for Element {
    fn locator(&self) -> &Locator {
        &self.locator
    }

    fn session(&self) -> &Session {
        &self.session
    }

    fn component(&self) -> &'static str {
        self.component
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::events::RecordingSink;
    use crate::mock::{MockDriver, MockNode};
    use crate::wait::WaitOptions;
    use std::sync::Arc;

    const URL: &str = "https://example.test/";

    fn setup(locator: &str, node: MockNode) -> (Arc<MockDriver>, Session, RecordingSink) {
        let driver = Arc::new(MockDriver::new());
        driver.add_node(URL, locator, node);
        driver.navigate(URL).unwrap();
        let sink = RecordingSink::new();
        let session = Session::from_arc(driver.clone())
            .with_sink(sink.clone())
            .with_wait_options(WaitOptions::new().with_timeout(100).with_poll_interval(1));
        (driver, session, sink)
    }

    mod condition_tests {
        use super::*;

        #[test]
        fn test_display() {
            assert_eq!(Condition::Visible.to_string(), "visible");
            assert_eq!(Condition::Value("x".into()).to_string(), "value \"x\"");
        }

        #[test]
        fn test_value_condition() {
            let (driver, _, _) = setup("//input", MockNode::input().with_value("abc"));
            let node = driver.resolve(&Locator::xpath("//input")).unwrap();
            assert!(Condition::Value("abc".into())
                .evaluate(driver.as_ref(), &node)
                .unwrap());
            assert!(!Condition::Selected.evaluate(driver.as_ref(), &node).unwrap());
        }
    }

    mod visibility_tests {
        use super::*;

        #[test]
        fn test_is_displayed_passes() {
            let (_, session, sink) = setup("//div", MockNode::new("div"));
            let element = Element::new(&session, "//div");
            element.is_displayed().unwrap();
            assert_eq!(sink.count(EventKind::AssertionPassed), 1);
        }

        #[test]
        fn test_is_displayed_waits_for_delayed_node() {
            let (_, session, _) = setup("//div", MockNode::new("div").visible_after(3));
            Element::new(&session, "//div").is_displayed().unwrap();
        }

        #[test]
        fn test_is_displayed_times_out() {
            let (_, session, sink) = setup("//div", MockNode::new("div").hidden());
            let err = Element::new(&session, "//div")
                .is_displayed_within(Duration::from_millis(10))
                .unwrap_err();
            assert!(matches!(err, UiError::Timeout { ms: 10, .. }));
            assert_eq!(sink.count(EventKind::AssertionFailed), 1);
        }

        #[test]
        fn test_absent_is_not_displayed() {
            let (_, session, _) = setup("//div", MockNode::new("div"));
            Element::new(&session, "//missing").is_not_displayed().unwrap();
        }

        #[test]
        fn test_absent_is_displayed_times_out() {
            let (_, session, _) = setup("//div", MockNode::new("div"));
            let err = Element::new(&session, "//missing")
                .is_displayed()
                .unwrap_err();
            assert!(matches!(err, UiError::Timeout { .. }));
        }

        #[test]
        fn test_ambiguous_aborts_wait() {
            let (driver, session, _) = setup("//p", MockNode::new("p"));
            driver.add_node(URL, "//p", MockNode::new("p"));
            driver.navigate(URL).unwrap();
            let err = Element::new(&session, "//p").is_displayed().unwrap_err();
            assert!(matches!(err, UiError::Ambiguous { count: 2, .. }));
        }
    }

    mod action_tests {
        use super::*;

        #[test]
        fn test_focus_hovers() {
            let (driver, session, sink) = setup("//a", MockNode::link("/"));
            Element::new(&session, "//a").focus().unwrap();
            assert!(driver.was_called("hover://a"));
            assert_eq!(sink.count(EventKind::Focused), 1);
        }

        #[test]
        fn test_is_enabled_does_not_wait() {
            let (_, session, _) = setup("//button", MockNode::button().disabled());
            let element = Element::new(&session, "//button");
            assert!(!element.is_enabled().unwrap());
            assert!(Element::new(&session, "//missing")
                .is_enabled()
                .unwrap_err()
                .is_not_found());
        }

        #[test]
        fn test_require_maps_timeout_to_precondition() {
            let (driver, session, _) = setup("//button", MockNode::button().disabled());
            let err = Element::typed(&session, "//button", "button")
                .click_when(&Condition::Enabled)
                .unwrap_err();
            assert!(matches!(err, UiError::Precondition { .. }));
            assert!(err.to_string().contains("button //button"));
            assert_eq!(driver.clicks("//button"), 0);
        }

        #[test]
        fn test_click_when_enabled() {
            let (driver, session, sink) = setup("//button", MockNode::button());
            Element::new(&session, "//button")
                .click_when(&Condition::Enabled)
                .unwrap();
            assert_eq!(driver.clicks("//button"), 1);
            assert_eq!(sink.count(EventKind::Clicked), 1);
        }

        #[test]
        fn test_should_be_value_and_not_selected() {
            let (_, session, _) = setup("//input", MockNode::input().with_value("x"));
            let element = Element::new(&session, "//input");
            element.should_be(Condition::Value("x".into())).unwrap();
            element.should_not_be(Condition::Selected).unwrap();
            assert!(element
                .should_be_within(Condition::Selected, Duration::from_millis(5))
                .is_err());
        }

        #[test]
        fn test_text_and_attribute() {
            let (_, session, _) = setup("//a", MockNode::link("/personal").with_text("Me"));
            let element = Element::new(&session, "//a");
            assert_eq!(element.text().unwrap(), "Me");
            assert_eq!(
                element.attribute("href").unwrap().as_deref(),
                Some("/personal")
            );
            assert_eq!(element.attribute("title").unwrap(), None);
        }

        #[test]
        fn test_is_visible_now_does_not_wait() {
            let (driver, session, sink) =
                setup("//div[@id='toast']", MockNode::button().visible_after(1));
            let element = Element::new(&session, "//div[@id='toast']");
            assert!(!element.is_visible_now().unwrap());
            assert!(element.is_visible_now().unwrap());
            assert_eq!(sink.count(EventKind::StateRead), 2);

            driver.navigate("https://elsewhere.test/").unwrap();
            assert!(!element.is_visible_now().unwrap());
        }

        #[test]
        fn test_construction_is_reported() {
            let (_, session, sink) = setup("//a", MockNode::link("/"));
            let element = Element::typed(&session, "//a", "link");
            let events = sink.events();
            assert_eq!(events[0].kind, EventKind::ElementInitialized);
            assert_eq!(events[0].component, "link");
            assert_eq!(element.component(), "link");
        }
    }
}
