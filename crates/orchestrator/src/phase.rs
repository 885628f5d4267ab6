use casequery_protocol::{CaseSummary, QueryState, ReportResult, SearchResult};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum SearchPhase {
    #[default]
    Idle,
    Loading,
    Success(Arc<SearchResult>),
    Error(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum ReportPhase {
    #[default]
    Idle,
    Loading,
    Success(Arc<ReportResult>),
    /// Search returned no cases; no report was requested.
    Skipped,
    /// The report call failed. Rendered as "no insights", never as an error.
    Unavailable,
}

/// Observable state of the most recent submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PhaseState {
    pub generation: u64,
    pub query: Option<QueryState>,
    pub search: SearchPhase,
    pub report: ReportPhase,
}

impl PhaseState {
    pub(crate) fn started(generation: u64, query: QueryState) -> Self {
        Self {
            generation,
            query: Some(query),
            search: SearchPhase::Loading,
            report: ReportPhase::Idle,
        }
    }

    #[must_use]
    pub fn is_search_loading(&self) -> bool {
        matches!(self.search, SearchPhase::Loading)
    }

    #[must_use]
    pub fn search_error(&self) -> Option<&str> {
        match &self.search {
            SearchPhase::Error(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn search_result(&self) -> Option<&SearchResult> {
        match &self.search {
            SearchPhase::Success(result) => Some(result),
            _ => None,
        }
    }

    /// Cases to display; empty while loading or after an error.
    #[must_use]
    pub fn results(&self) -> &[CaseSummary] {
        self.search_result()
            .map(|result| result.results.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_report_loading(&self) -> bool {
        matches!(self.report, ReportPhase::Loading)
    }

    #[must_use]
    pub fn report(&self) -> Option<&ReportResult> {
        match &self.report {
            ReportPhase::Success(report) => Some(report),
            _ => None,
        }
    }

    /// True once both phases have reached a terminal status.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        match self.search {
            SearchPhase::Idle | SearchPhase::Error(_) => true,
            SearchPhase::Loading => false,
            SearchPhase::Success(_) => {
                !matches!(self.report, ReportPhase::Loading | ReportPhase::Idle)
            }
        }
    }
}
