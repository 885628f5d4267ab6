use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::DEFAULT_JURISDICTION;

/// The user's current query and jurisdiction filter.
///
/// Mutated only through the setters; submissions take a [`QueryState::snapshot`]
/// so later edits never reach a request that is already in flight.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct QueryState {
    text: String,
    jurisdiction_filter: String,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new("", DEFAULT_JURISDICTION)
    }
}

impl QueryState {
    pub fn new(text: impl Into<String>, jurisdiction_filter: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            jurisdiction_filter: jurisdiction_filter.into(),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_jurisdiction(&mut self, jurisdiction: impl Into<String>) {
        self.jurisdiction_filter = jurisdiction.into();
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn jurisdiction(&self) -> &str {
        &self.jurisdiction_filter
    }

    #[must_use]
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.trimmed_text().is_empty()
    }

    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }
}
