//! Display-ready shapes shared by the pages.
//!
//! View models carry no business logic. Pages compute them from their loaded
//! data, and the embedding shell renders them as it sees fit.

use serde::Serialize;

/// Placeholder shown when a list has nothing to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyState {
    /// Primary message (e.g. "No orders found").
    pub title: String,

    /// Secondary explanatory text.
    pub description: String,

    /// Label of the call-to-action, if the state offers one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_label: Option<String>,
}

impl EmptyState {
    #[must_use]
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            action_label: None,
        }
    }

    #[must_use]
    pub fn with_action(mut self, label: &str) -> Self {
        self.action_label = Some(label.to_string());
        self
    }
}

/// How many items of a list carry a given status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount<S> {
    pub status: S,
    pub count: usize,
}

/// Headline figure on a dashboard card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCard {
    pub title: String,
    pub value: String,
    /// Signed change versus the previous period, in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,
}

impl StatCard {
    #[must_use]
    pub fn new(title: &str, value: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            value: value.into(),
            change_percent: None,
        }
    }

    #[must_use]
    pub fn with_change(mut self, percent: f64) -> Self {
        self.change_percent = Some(percent);
        self
    }
}
