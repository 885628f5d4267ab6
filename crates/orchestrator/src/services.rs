use async_trait::async_trait;
use casequery_protocol::{CaseSummary, Jurisdiction, ReportResult, SearchResult};

use crate::Result;

#[async_trait]
pub trait SearchService: Send + Sync {
    async fn search_cases(&self, query: &str, jurisdiction: &str) -> Result<SearchResult>;
}

#[async_trait]
pub trait ReportService: Send + Sync {
    async fn generate_report(
        &self,
        query: &str,
        case_results: &[CaseSummary],
        jurisdiction: &str,
    ) -> Result<ReportResult>;
}

/// Source of the jurisdiction picker's options. Used by the shell, not by
/// the orchestrator itself.
#[async_trait]
pub trait JurisdictionSource: Send + Sync {
    async fn list_jurisdictions(&self) -> Result<Vec<Jurisdiction>>;
}
