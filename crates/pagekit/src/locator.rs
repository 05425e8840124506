//! Locator abstraction and the fluent XPath builder.
//!
//! # Design Philosophy
//!
//! - **Fluent API**: chainable predicates, one per call, rendered left to right
//! - **Single use**: [`XPathBuilder::build`] consumes the builder
//! - **Literal safety**: values are rendered as XPath string literals, so a
//!   value carrying a quote cannot break out of its predicate

use std::fmt;

/// An XPath expression selecting nodes in the rendered document.
///
/// Locators are immutable once built. Resolution happens lazily, on every
/// element action, against whatever document the session currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    xpath: String,
}

impl Locator {
    /// Wrap a hand-written XPath expression
    #[must_use]
    pub fn xpath(expression: impl Into<String>) -> Self {
        Self {
            xpath: expression.into(),
        }
    }

    /// The expression text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.xpath
    }

    /// Convert to a JavaScript expression returning the first matching node
    #[must_use]
    pub fn to_query(&self) -> String {
        format!(
            "document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue",
            self.js_literal()
        )
    }

    /// Convert to a JavaScript expression counting matching nodes
    #[must_use]
    pub fn to_count_query(&self) -> String {
        format!(
            "document.evaluate({}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null).snapshotLength",
            self.js_literal()
        )
    }

    fn js_literal(&self) -> String {
        serde_json::Value::from(self.xpath.as_str()).to_string()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.xpath)
    }
}

impl From<&str> for Locator {
    fn from(expression: &str) -> Self {
        Self::xpath(expression)
    }
}

impl From<String> for Locator {
    fn from(expression: String) -> Self {
        Self::xpath(expression)
    }
}

/// Render `value` as an XPath 1.0 string literal.
///
/// Single quotes are used when possible, double quotes when the value holds
/// a single quote, and `concat()` when it holds both.
#[must_use]
pub fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        format!("'{value}'")
    } else if !value.contains('"') {
        format!("\"{value}\"")
    } else {
        let parts: Vec<String> = value.split('\'').map(|p| format!("'{p}'")).collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}

/// Fluent builder for tag-scoped XPath expressions.
///
/// ```ignore
/// let locator = XPathBuilder::create("input")
///     .with_attribute("type", "checkbox")
///     .contains_attribute("name", "remember")
///     .build();
/// assert_eq!(
///     locator.as_str(),
///     "//input[@type='checkbox'][contains(@name,'remember')]"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct XPathBuilder {
    xpath: String,
}

impl XPathBuilder {
    /// Start an expression matching `tag` anywhere in the document
    #[must_use]
    pub fn create(tag: &str) -> Self {
        Self {
            xpath: format!("//{tag}"),
        }
    }

    /// Attribute equals `value`
    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.xpath
            .push_str(&format!("[@{name}={}]", xpath_literal(value)));
        self
    }

    /// Attribute contains `value` as a substring
    #[must_use]
    pub fn contains_attribute(mut self, name: &str, value: &str) -> Self {
        self.xpath
            .push_str(&format!("[contains(@{name},{})]", xpath_literal(value)));
        self
    }

    /// Text content equals `text`
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.xpath
            .push_str(&format!("[text()={}]", xpath_literal(text)));
        self
    }

    /// Text content contains `text`
    #[must_use]
    pub fn contains_text(mut self, text: &str) -> Self {
        self.xpath
            .push_str(&format!("[contains(text(),{})]", xpath_literal(text)));
        self
    }

    /// Finish the expression
    #[must_use]
    pub fn build(self) -> Locator {
        Locator { xpath: self.xpath }
    }
}
