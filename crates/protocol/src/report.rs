use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::CaseSummary;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct Insight {
    pub category: String,
    pub insight: String,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default)]
    pub legal_considerations: Vec<String>,
}

/// Actionable-insights report produced from a set of search results.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct ReportResult {
    pub query: String,
    pub executive_summary: String,
    #[serde(default)]
    pub key_insights: Vec<Insight>,
    #[serde(default)]
    pub procedural_recommendations: Vec<String>,
    #[serde(default)]
    pub legal_warnings: Vec<String>,
    #[serde(default)]
    pub jurisdiction_specific_notes: Vec<String>,
    /// Opaque timestamp as produced by the report service.
    pub generated_at: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct ReportRequest {
    pub query: String,
    pub case_results: Vec<CaseSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
}
