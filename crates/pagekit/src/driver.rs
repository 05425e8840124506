//! BrowserDriver - the seam to the browser automation engine.
//!
//! Everything non-trivial (DOM queries, click simulation, navigation) happens
//! behind this trait. Elements and pages only sequence calls on it.
//!
//! # Implementations
//!
//! - [`MockDriver`](crate::MockDriver) - in-memory documents for unit tests
//! - `ChromiumDriver` - real Chromium/Edge over CDP (feature `browser`)

use crate::locator::Locator;
use crate::result::UiResult;
use serde::{Deserialize, Serialize};

/// Handle to one resolved node.
///
/// Handles are only valid until the next navigation; callers resolve again
/// for every action instead of caching them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeHandle {
    /// Backend-specific node identifier
    pub id: String,
    /// Locator the node was resolved from
    pub locator: String,
}

impl NodeHandle {
    /// Create a new node handle
    #[must_use]
    pub fn new(id: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            locator: locator.into(),
        }
    }
}

/// Blocking browser automation contract.
///
/// Every call acts on the live document immediately; waiting is layered on
/// top by [`crate::wait`].
pub trait BrowserDriver: Send + Sync {
    /// Navigate to URL
    fn navigate(&self, url: &str) -> UiResult<()>;

    /// Reload the current document
    fn refresh(&self) -> UiResult<()>;

    /// Get current URL
    fn current_url(&self) -> UiResult<String>;

    /// Resolve a locator to exactly one node.
    ///
    /// # Errors
    ///
    /// [`UiError::NotFound`](crate::UiError::NotFound) when nothing matches,
    /// [`UiError::Ambiguous`](crate::UiError::Ambiguous) when several nodes do.
    fn resolve(&self, locator: &Locator) -> UiResult<NodeHandle>;

    /// Whether the node is rendered and visible
    fn is_visible(&self, node: &NodeHandle) -> UiResult<bool>;

    /// Whether the node accepts interaction
    fn is_enabled(&self, node: &NodeHandle) -> UiResult<bool>;

    /// Whether a checkbox, radio button or option is selected
    fn is_selected(&self, node: &NodeHandle) -> UiResult<bool>;

    /// Click the node
    fn click(&self, node: &NodeHandle) -> UiResult<()>;

    /// Move the pointer over the node
    fn hover(&self, node: &NodeHandle) -> UiResult<()>;

    /// Replace the field value with `text`
    fn set_value(&self, node: &NodeHandle, text: &str) -> UiResult<()>;

    /// Current field value
    fn value(&self, node: &NodeHandle) -> UiResult<String>;

    /// Attribute value, `None` when absent
    fn attribute(&self, node: &NodeHandle, name: &str) -> UiResult<Option<String>>;

    /// Rendered text content
    fn text(&self, node: &NodeHandle) -> UiResult<String>;

    /// Empty the field
    fn clear(&self, node: &NodeHandle) -> UiResult<()>;

    /// Close the browser
    fn close(&self) -> UiResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_handle_creation() {
        let node = NodeHandle::new("n-1", "//button");
        assert_eq!(node.id, "n-1");
        assert_eq!(node.locator, "//button");
    }

    #[test]
    fn test_driver_is_object_safe() {
        fn takes(_driver: Option<&dyn BrowserDriver>) {}
        takes(None);
    }
}
