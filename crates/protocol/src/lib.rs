//! Data model shared by the case-law query front-end.
//!
//! These types mirror the JSON bodies exchanged with the search and report
//! services. Field names are snake_case on the wire and in Rust.

use anyhow::Result;
use serde::Serialize;

mod cases;
mod jurisdiction;
mod query;
mod report;

pub use cases::{CaseSummary, QueryClarification, SearchRequest, SearchResult};
pub use jurisdiction::{
    fallback_jurisdictions, Jurisdiction, JurisdictionList, DEFAULT_JURISDICTION,
};
pub use query::QueryState;
pub use report::{Insight, ReportRequest, ReportResult};

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}

pub fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}
