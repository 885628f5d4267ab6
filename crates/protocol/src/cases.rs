use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One case returned by the search service.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct CaseSummary {
    pub case_name: String,
    pub citation: String,
    pub year: i32,
    pub court: String,
    pub summary: String,
    #[serde(default)]
    pub key_takeaways: Vec<String>,
    #[serde(default)]
    pub facts: String,
    #[serde(default)]
    pub legal_principle: String,
    #[serde(default)]
    pub ruling: String,
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
}

/// Hint attached to a search result when the query was too vague.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct QueryClarification {
    pub needs_clarification: bool,
    pub clarification_message: String,
    #[serde(default)]
    pub suggested_refinements: Vec<String>,
    pub original_query: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct SearchResult {
    pub query: String,
    #[serde(default)]
    pub results: Vec<CaseSummary>,
    #[serde(default)]
    pub total_results: usize,
    #[serde(default)]
    pub processing_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarification: Option<QueryClarification>,
}

impl SearchResult {
    /// Number of cases actually carried by the response.
    ///
    /// `total_results` is reported by the service and may disagree with the
    /// list; the report phase is gated on the list itself.
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    #[must_use]
    pub fn needs_clarification(&self) -> bool {
        self.clarification
            .as_ref()
            .is_some_and(|c| c.needs_clarification)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
}
