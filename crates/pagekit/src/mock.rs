//! Mock driver for unit testing.
//!
//! Documents are registered per URL; nodes are keyed by the exact locator
//! expression that should find them. Navigation and refresh load a fresh copy
//! of the registered document, so live state (typed values, checked boxes)
//! resets the way a real reload does.

use crate::driver::{BrowserDriver, NodeHandle};
use crate::locator::Locator;
use crate::result::{UiError, UiResult};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Interaction semantics of a mock node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    /// Clicking has no built-in effect
    #[default]
    Plain,
    /// Clicking toggles `selected`
    Checkbox,
    /// Clicking selects and clears other radios sharing the `name` attribute
    Radio,
}

/// A node in a mock document
#[derive(Debug, Clone)]
pub struct MockNode {
    /// Tag name
    pub tag: String,
    /// Click semantics
    pub kind: NodeKind,
    /// Rendered and visible
    pub visible: bool,
    /// Accepts interaction
    pub enabled: bool,
    /// Checked or selected
    pub selected: bool,
    /// Field value
    pub value: String,
    /// Text content
    pub text: String,
    /// Attributes
    pub attributes: HashMap<String, String>,
    /// Visibility checks that still report hidden before `visible` applies
    pub visible_after: u32,
}

impl MockNode {
    /// Visible, enabled node with the given tag
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            kind: NodeKind::Plain,
            visible: true,
            enabled: true,
            selected: false,
            value: String::new(),
            text: String::new(),
            attributes: HashMap::new(),
            visible_after: 0,
        }
    }

    /// `<button>`
    #[must_use]
    pub fn button() -> Self {
        Self::new("button")
    }

    /// `<a href=...>`
    #[must_use]
    pub fn link(href: &str) -> Self {
        Self::new("a").with_attribute("href", href)
    }

    /// `<input>`
    #[must_use]
    pub fn input() -> Self {
        Self::new("input")
    }

    /// `<input type="checkbox">`
    #[must_use]
    pub fn checkbox() -> Self {
        let mut node = Self::new("input").with_attribute("type", "checkbox");
        node.kind = NodeKind::Checkbox;
        node
    }

    /// `<input type="radio" name=group>`
    #[must_use]
    pub fn radio(group: &str) -> Self {
        let mut node = Self::new("input")
            .with_attribute("type", "radio")
            .with_attribute("name", group);
        node.kind = NodeKind::Radio;
        node
    }

    /// Not rendered
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Not interactable
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Initial checked/selected state
    #[must_use]
    pub const fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Initial field value
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set an attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    /// Report hidden for the first `checks` visibility checks
    #[must_use]
    pub const fn visible_after(mut self, checks: u32) -> Self {
        self.visible_after = checks;
        self
    }
}

/// Custom click reaction
pub type ReactionFn = Arc<dyn Fn(&mut MockState) + Send + Sync>;

/// What a click on a registered node does, besides its built-in semantics
#[derive(Clone)]
pub enum Reaction {
    /// Load another document
    Navigate(String),
    /// Make the node at this locator visible
    Show(String),
    /// Make the node at this locator hidden
    Hide(String),
    /// Empty the value of the node at this locator
    ClearValue(String),
    /// Arbitrary change to the live state
    Custom(ReactionFn),
}

impl fmt::Debug for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigate(url) => f.debug_tuple("Navigate").field(url).finish(),
            Self::Show(locator) => f.debug_tuple("Show").field(locator).finish(),
            Self::Hide(locator) => f.debug_tuple("Hide").field(locator).finish(),
            Self::ClearValue(locator) => f.debug_tuple("ClearValue").field(locator).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct MockDocument {
    nodes: Vec<(String, MockNode)>,
}

/// Live state of the mock browser, handed to custom reactions
#[derive(Debug, Default)]
pub struct MockState {
    templates: HashMap<String, MockDocument>,
    reactions: HashMap<(String, String), Vec<Reaction>>,
    input_reactions: HashMap<(String, String), Vec<Reaction>>,
    current_url: String,
    live: MockDocument,
    generation: u64,
    history: Vec<String>,
    clicks: HashMap<String, usize>,
    closed: bool,
}

impl MockState {
    /// URL of the loaded document
    #[must_use]
    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    /// Load a fresh copy of the document registered for `url`
    pub fn load(&mut self, url: &str) {
        self.current_url = url.to_string();
        self.live = self.templates.get(url).cloned().unwrap_or_default();
        self.generation += 1;
    }

    /// First live node registered under `locator`
    #[must_use]
    pub fn node(&self, locator: &str) -> Option<&MockNode> {
        self.live
            .nodes
            .iter()
            .find(|(key, _)| key == locator)
            .map(|(_, node)| node)
    }

    /// Mutable access to the first live node registered under `locator`
    pub fn node_mut(&mut self, locator: &str) -> Option<&mut MockNode> {
        self.live
            .nodes
            .iter_mut()
            .find(|(key, _)| key == locator)
            .map(|(_, node)| node)
    }

    /// Field value of the live node at `locator`
    #[must_use]
    pub fn value_of(&self, locator: &str) -> Option<String> {
        self.node(locator).map(|node| node.value.clone())
    }

    fn apply(&mut self, reaction: &Reaction) {
        match reaction {
            Reaction::Navigate(url) => self.load(url),
            Reaction::Show(locator) => {
                if let Some(node) = self.node_mut(locator) {
                    node.visible = true;
                    node.visible_after = 0;
                }
            }
            Reaction::Hide(locator) => {
                if let Some(node) = self.node_mut(locator) {
                    node.visible = false;
                }
            }
            Reaction::ClearValue(locator) => {
                if let Some(node) = self.node_mut(locator) {
                    node.value.clear();
                }
            }
            Reaction::Custom(f) => f(self),
        }
    }

    fn react(&mut self, inputs: bool, locator: &str) {
        let key = (self.current_url.clone(), locator.to_string());
        let table = if inputs {
            &self.input_reactions
        } else {
            &self.reactions
        };
        let reactions = table.get(&key).cloned().unwrap_or_default();
        for reaction in &reactions {
            self.apply(reaction);
        }
    }

    fn index_of(&self, node: &NodeHandle) -> UiResult<usize> {
        let stale = || UiError::driver(format!("stale element reference: {}", node.locator));
        let (generation, index) = node.id.split_once(':').ok_or_else(stale)?;
        if generation.parse::<u64>().ok() != Some(self.generation) {
            return Err(stale());
        }
        let index: usize = index.parse().map_err(|_| stale())?;
        if index < self.live.nodes.len() {
            Ok(index)
        } else {
            Err(stale())
        }
    }

    fn live_node(&self, node: &NodeHandle) -> UiResult<&MockNode> {
        let index = self.index_of(node)?;
        Ok(&self.live.nodes[index].1)
    }

    fn live_node_mut(&mut self, node: &NodeHandle) -> UiResult<&mut MockNode> {
        let index = self.index_of(node)?;
        Ok(&mut self.live.nodes[index].1)
    }
}

/// In-memory browser for tests
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a node in the document served at `url`.
    ///
    /// Registering the same locator twice makes it ambiguous.
    pub fn add_node(&self, url: &str, locator: impl Into<String>, node: MockNode) {
        let mut state = self.lock();
        state
            .templates
            .entry(url.to_string())
            .or_default()
            .nodes
            .push((locator.into(), node));
    }

    /// Register a click reaction for the node at `locator` on `url`
    pub fn on_click(&self, url: &str, locator: impl Into<String>, reaction: Reaction) {
        let mut state = self.lock();
        state
            .reactions
            .entry((url.to_string(), locator.into()))
            .or_default()
            .push(reaction);
    }

    /// Register a custom click reaction
    pub fn on_click_with<F>(&self, url: &str, locator: impl Into<String>, f: F)
    where
        F: Fn(&mut MockState) + Send + Sync + 'static,
    {
        self.on_click(url, locator, Reaction::Custom(Arc::new(f)));
    }

    /// Register a reaction to value changes (typing or clearing) of the
    /// field at `locator` on `url`
    pub fn on_input(&self, url: &str, locator: impl Into<String>, reaction: Reaction) {
        let mut state = self.lock();
        state
            .input_reactions
            .entry((url.to_string(), locator.into()))
            .or_default()
            .push(reaction);
    }

    /// Register a custom value-change reaction
    pub fn on_input_with<F>(&self, url: &str, locator: impl Into<String>, f: F)
    where
        F: Fn(&mut MockState) + Send + Sync + 'static,
    {
        self.on_input(url, locator, Reaction::Custom(Arc::new(f)));
    }

    /// Change the live node at `locator` in place
    pub fn update_node<F>(&self, locator: &str, f: F) -> bool
    where
        F: FnOnce(&mut MockNode),
    {
        let mut state = self.lock();
        state.node_mut(locator).map(f).is_some()
    }

    /// Snapshot of the live node at `locator`
    #[must_use]
    pub fn node(&self, locator: &str) -> Option<MockNode> {
        self.lock().node(locator).cloned()
    }

    /// Clicks delivered to nodes registered under `locator`
    #[must_use]
    pub fn clicks(&self, locator: &str) -> usize {
        self.lock().clicks.get(locator).copied().unwrap_or(0)
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.lock().history.iter().any(|c| c.starts_with(method))
    }

    /// Whether `close` was called
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn session(&self) -> UiResult<MutexGuard<'_, MockState>> {
        let state = self.lock();
        if state.closed {
            return Err(UiError::driver("browser session is closed"));
        }
        Ok(state)
    }
}

impl BrowserDriver for MockDriver {
    fn navigate(&self, url: &str) -> UiResult<()> {
        let mut state = self.session()?;
        state.history.push(format!("navigate:{url}"));
        state.load(url);
        Ok(())
    }

    fn refresh(&self) -> UiResult<()> {
        let mut state = self.session()?;
        state.history.push("refresh".to_string());
        let url = state.current_url.clone();
        state.load(&url);
        Ok(())
    }

    fn current_url(&self) -> UiResult<String> {
        Ok(self.session()?.current_url.clone())
    }

    fn resolve(&self, locator: &Locator) -> UiResult<NodeHandle> {
        let state = self.session()?;
        let matches: Vec<usize> = state
            .live
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, (key, _))| key == locator.as_str())
            .map(|(i, _)| i)
            .collect();

        match matches.as_slice() {
            [] => Err(UiError::NotFound {
                locator: locator.to_string(),
            }),
            [index] => Ok(NodeHandle::new(
                format!("{}:{index}", state.generation),
                locator.as_str(),
            )),
            many => Err(UiError::Ambiguous {
                locator: locator.to_string(),
                count: many.len(),
            }),
        }
    }

    fn is_visible(&self, node: &NodeHandle) -> UiResult<bool> {
        let mut state = self.session()?;
        let live = state.live_node_mut(node)?;
        if live.visible_after > 0 {
            live.visible_after -= 1;
            return Ok(false);
        }
        Ok(live.visible)
    }

    fn is_enabled(&self, node: &NodeHandle) -> UiResult<bool> {
        Ok(self.session()?.live_node(node)?.enabled)
    }

    fn is_selected(&self, node: &NodeHandle) -> UiResult<bool> {
        Ok(self.session()?.live_node(node)?.selected)
    }

    fn click(&self, node: &NodeHandle) -> UiResult<()> {
        let mut state = self.session()?;
        let index = state.index_of(node)?;
        let (kind, group) = {
            let live = &state.live.nodes[index].1;
            if !live.visible || !live.enabled || live.visible_after > 0 {
                return Err(UiError::driver(format!(
                    "element not interactable: {}",
                    node.locator
                )));
            }
            (live.kind, live.attributes.get("name").cloned())
        };

        match kind {
            NodeKind::Plain => {}
            NodeKind::Checkbox => {
                let live = &mut state.live.nodes[index].1;
                live.selected = !live.selected;
            }
            NodeKind::Radio => {
                for (i, (_, other)) in state.live.nodes.iter_mut().enumerate() {
                    if other.kind == NodeKind::Radio
                        && other.attributes.get("name") == group.as_ref()
                    {
                        other.selected = i == index;
                    }
                }
            }
        }

        state.history.push(format!("click:{}", node.locator));
        *state.clicks.entry(node.locator.clone()).or_insert(0) += 1;

        state.react(false, &node.locator);
        Ok(())
    }

    fn hover(&self, node: &NodeHandle) -> UiResult<()> {
        let mut state = self.session()?;
        let _ = state.live_node(node)?;
        state.history.push(format!("hover:{}", node.locator));
        Ok(())
    }

    fn set_value(&self, node: &NodeHandle, text: &str) -> UiResult<()> {
        let mut state = self.session()?;
        state.live_node_mut(node)?.value = text.to_string();
        state.history.push(format!("set_value:{}", node.locator));
        state.react(true, &node.locator);
        Ok(())
    }

    fn value(&self, node: &NodeHandle) -> UiResult<String> {
        Ok(self.session()?.live_node(node)?.value.clone())
    }

    fn attribute(&self, node: &NodeHandle, name: &str) -> UiResult<Option<String>> {
        let state = self.session()?;
        let live = state.live_node(node)?;
        if name == "value" {
            return Ok(Some(live.value.clone()));
        }
        Ok(live.attributes.get(name).cloned())
    }

    fn text(&self, node: &NodeHandle) -> UiResult<String> {
        Ok(self.session()?.live_node(node)?.text.clone())
    }

    fn clear(&self, node: &NodeHandle) -> UiResult<()> {
        let mut state = self.session()?;
        state.live_node_mut(node)?.value.clear();
        state.history.push(format!("clear:{}", node.locator));
        state.react(true, &node.locator);
        Ok(())
    }

    fn close(&self) -> UiResult<()> {
        let mut state = self.lock();
        state.history.push("close".to_string());
        state.closed = true;
        Ok(())
    }
}
