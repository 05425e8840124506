//! Typed element variants.
//!
//! Each variant wraps one [`Element`] and injects its implicit tag (and type,
//! for checkboxes and radio buttons) into every locator factory. The shared
//! factories live on [`Variant`] as default methods; variant-specific ones are
//! inherent.
//!
//! ```ignore
//! let login = Button::by_id(&session, "loginbtn");
//! let remember = Checkbox::by_name(&session, "rememberusername");
//! remember.check()?;
//! login.click()?;
//! ```

/// Delegate [`Locatable`] to the wrapped element
macro_rules! locatable_via_element {
    ($variant:ty) => {
        impl $crate::element::Locatable for $variant {
            fn locator(&self) -> &$crate::locator::Locator {
                $crate::element::Locatable::locator(&self.element)
            }

            fn session(&self) -> &$crate::session::Session {
                $crate::element::Locatable::session(&self.element)
            }

            fn component(&self) -> &'static str {
                <$variant as $crate::variants::Variant>::COMPONENT
            }
        }
    };
}
pub(crate) use locatable_via_element;

mod button;
mod checkbox;
mod link;
mod radio_button;
mod text_input;

pub use button::Button;
pub use checkbox::Checkbox;
pub use link::Link;
pub use radio_button::RadioButton;
pub use text_input::TextInput;

use crate::element::{Element, Locatable};
use crate::locator::{Locator, XPathBuilder};
use crate::session::Session;

/// Locator factories shared by every variant
pub trait Variant: Locatable + Sized {
    /// Component name used in events
    const COMPONENT: &'static str;

    /// Builder pre-loaded with the implicit tag and type
    fn base() -> XPathBuilder;

    /// Wrap an element already typed with [`Self::COMPONENT`]
    fn from_element(element: Element) -> Self;

    /// The wrapped element
    fn element(&self) -> &Element;

    /// Wrap an arbitrary locator
    #[must_use]
    fn by_locator(session: &Session, locator: Locator) -> Self {
        Self::from_element(Element::typed(session, locator, Self::COMPONENT))
    }

    /// Hand-written XPath, no implicit tag
    #[must_use]
    fn by_xpath(session: &Session, xpath: &str) -> Self {
        Self::by_locator(session, Locator::xpath(xpath))
    }

    /// Base locator plus `[@name='value']`
    #[must_use]
    fn xpath_by_attribute(name: &str, value: &str) -> Locator {
        Self::base().with_attribute(name, value).build()
    }

    /// Base locator plus `[contains(@name,'value')]`
    #[must_use]
    fn xpath_by_contains_attribute(name: &str, value: &str) -> Locator {
        Self::base().contains_attribute(name, value).build()
    }

    /// Exact attribute match
    #[must_use]
    fn by_attribute(session: &Session, name: &str, value: &str) -> Self {
        Self::by_locator(session, Self::xpath_by_attribute(name, value))
    }

    /// Substring attribute match
    #[must_use]
    fn by_contains_attribute(session: &Session, name: &str, value: &str) -> Self {
        Self::by_locator(session, Self::xpath_by_contains_attribute(name, value))
    }

    /// Exact `class`
    #[must_use]
    fn by_class(session: &Session, class: &str) -> Self {
        Self::by_attribute(session, "class", class)
    }

    /// `class` contains
    #[must_use]
    fn by_contains_class(session: &Session, class: &str) -> Self {
        Self::by_contains_attribute(session, "class", class)
    }

    /// Exact `id`
    #[must_use]
    fn by_id(session: &Session, id: &str) -> Self {
        Self::by_attribute(session, "id", id)
    }

    /// `id` contains
    #[must_use]
    fn by_contains_id(session: &Session, id: &str) -> Self {
        Self::by_contains_attribute(session, "id", id)
    }

    /// Exact `name`
    #[must_use]
    fn by_name(session: &Session, name: &str) -> Self {
        Self::by_attribute(session, "name", name)
    }

    /// `name` contains
    #[must_use]
    fn by_contains_name(session: &Session, name: &str) -> Self {
        Self::by_contains_attribute(session, "name", name)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::mock::MockNode;

    mod factory_tests {
        use super::*;

        #[test]
        fn test_shared_factories_inject_tag() {
            let (_, session, _) = session_with(vec![]);
            assert_eq!(
                Button::by_id(&session, "loginbtn").locator().as_str(),
                "//button[@id='loginbtn']"
            );
            assert_eq!(
                TextInput::by_name(&session, "username").locator().as_str(),
                "//input[@name='username']"
            );
            assert_eq!(
                Link::by_contains_class(&session, "nav").locator().as_str(),
                "//a[contains(@class,'nav')]"
            );
            assert_eq!(
                Button::by_contains_id(&session, "login").locator().as_str(),
                "//button[contains(@id,'login')]"
            );
            assert_eq!(
                TextInput::by_contains_name(&session, "user").locator().as_str(),
                "//input[contains(@name,'user')]"
            );
            assert_eq!(
                Button::by_class(&session, "btn").locator().as_str(),
                "//button[@class='btn']"
            );
        }

        #[test]
        fn test_typed_variants_keep_type_predicate_first() {
            let (_, session, _) = session_with(vec![]);
            assert_eq!(
                Checkbox::by_contains_name(&session, "remember")
                    .locator()
                    .as_str(),
                "//input[@type='checkbox'][contains(@name,'remember')]"
            );
            assert_eq!(
                RadioButton::by_value(&session, "65").locator().as_str(),
                "//input[@type='radio'][@value='65']"
            );
        }

        #[test]
        fn test_xpath_helpers_use_variant_base() {
            assert_eq!(
                Checkbox::xpath_by_attribute("id", "x").as_str(),
                "//input[@type='checkbox'][@id='x']"
            );
            assert_eq!(
                RadioButton::xpath_by_contains_attribute("id", "x").as_str(),
                "//input[@type='radio'][contains(@id,'x')]"
            );
        }

        #[test]
        fn test_by_xpath_is_raw() {
            let (_, session, _) = session_with(vec![]);
            let link = Link::by_xpath(&session, "//header//a[1]");
            assert_eq!(link.locator().as_str(), "//header//a[1]");
            assert_eq!(link.component(), "link");
        }

        #[test]
        fn test_variants_are_visibility_checkable() {
            use crate::element::VisibilityCheckable;

            let (_, session, _) =
                session_with(vec![("//button[@id='go']".into(), MockNode::button())]);
            let button = Button::by_id(&session, "go");
            assert!(button.is_displayed().is_ok());
            assert!(Button::by_id(&session, "gone").is_not_displayed().is_ok());
        }
    }
}
