//! Structured action events and the sinks that receive them.
//!
//! Every element and page action reports one [`UiEvent`] to the
//! [`EventSink`] carried by its [`Session`](crate::Session). The default sink
//! forwards to `tracing`; tests swap in a [`RecordingSink`] to assert on what
//! happened.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex};

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// An element was declared
    ElementInitialized,
    /// A page was declared
    PageInitialized,
    /// Navigation to the page URL started
    PageOpened,
    /// The current document was reloaded
    PageRefreshed,
    /// Waiting for the main element
    WaitingForLoad,
    /// The main element became visible
    PageLoaded,
    /// An element was clicked
    Clicked,
    /// An element received hover focus
    Focused,
    /// A value was typed into a field
    ValueSet,
    /// A field value was read
    ValueRead,
    /// A field was cleared
    Cleared,
    /// A checkbox was checked
    Checked,
    /// A checkbox was unchecked
    Unchecked,
    /// A radio button was selected
    Selected,
    /// A toggle action found the element already in its target state
    AlreadyInState,
    /// A state was read without waiting
    StateRead,
    /// A blocking assertion passed
    AssertionPassed,
    /// A blocking assertion failed
    AssertionFailed,
}

impl EventKind {
    /// Stable snake_case name used in log output
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ElementInitialized => "element_initialized",
            Self::PageInitialized => "page_initialized",
            Self::PageOpened => "page_opened",
            Self::PageRefreshed => "page_refreshed",
            Self::WaitingForLoad => "waiting_for_load",
            Self::PageLoaded => "page_loaded",
            Self::Clicked => "clicked",
            Self::Focused => "focused",
            Self::ValueSet => "value_set",
            Self::ValueRead => "value_read",
            Self::Cleared => "cleared",
            Self::Checked => "checked",
            Self::Unchecked => "unchecked",
            Self::Selected => "selected",
            Self::AlreadyInState => "already_in_state",
            Self::StateRead => "state_read",
            Self::AssertionPassed => "assertion_passed",
            Self::AssertionFailed => "assertion_failed",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observable action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiEvent {
    /// Session that produced the event
    pub session_id: String,
    /// What happened
    pub kind: EventKind,
    /// Locator expression or page URL
    pub target: String,
    /// Element or page type, e.g. `checkbox`
    pub component: String,
    /// Extra detail (typed value, read state, assertion description)
    pub detail: Option<String>,
    /// When it happened
    pub timestamp: DateTime<Utc>,
}

impl UiEvent {
    /// Create an event stamped now
    #[must_use]
    pub fn new(
        session_id: impl Into<String>,
        kind: EventKind,
        component: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            kind,
            target: target.into(),
            component: component.into(),
            detail: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach detail text
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Serialize to a JSON line
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Receiver of action events
pub trait EventSink: Send + Sync + fmt::Debug {
    /// Record one event
    fn record(&self, event: &UiEvent);
}

/// Forwards events to `tracing` at INFO level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &UiEvent) {
        tracing::info!(
            session = %event.session_id,
            kind = %event.kind,
            component = %event.component,
            target = %event.target,
            detail = event.detail.as_deref().unwrap_or(""),
            "ui action"
        );
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&self, _event: &UiEvent) {}
}

/// Keeps every event in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<UiEvent>>>,
}

impl RecordingSink {
    /// Create an empty recording sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events
    #[must_use]
    pub fn events(&self) -> Vec<UiEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Kinds of recorded events, in order
    #[must_use]
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events().iter().map(|e| e.kind).collect()
    }

    /// Number of events of `kind`
    #[must_use]
    pub fn count(&self, kind: EventKind) -> usize {
        self.events().iter().filter(|e| e.kind == kind).count()
    }

    /// Drop recorded events
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl EventSink for RecordingSink {
    fn record(&self, event: &UiEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
