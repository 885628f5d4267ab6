use anyhow::{Context as AnyhowContext, Result};
use async_trait::async_trait;
use casequery_orchestrator::{JurisdictionSource, ReportService, SearchService, ServiceError};
use casequery_protocol::{
    CaseSummary, Jurisdiction, JurisdictionList, ReportRequest, ReportResult, SearchRequest,
    SearchResult,
};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// REST client for the case-law search and report service.
#[derive(Clone)]
pub struct HttpCaseService {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

impl HttpCaseService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        log::debug!("POST {url}");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| ServiceError::Unavailable(err.to_string()))?;
        decode(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let url = self.url(path);
        log::debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| ServiceError::Unavailable(err.to_string()))?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ServiceError::Rejected {
            status: status.as_u16(),
            detail: error_detail(&body),
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|err| ServiceError::Decode(err.to_string()))
}

/// Extract `detail` from an error body. Validation errors carry a JSON
/// array there rather than a string.
fn error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(text) if !text.trim().is_empty() => Some(text),
        serde_json::Value::String(_) | serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn optional_jurisdiction(jurisdiction: &str) -> Option<String> {
    let trimmed = jurisdiction.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[async_trait]
impl SearchService for HttpCaseService {
    async fn search_cases(
        &self,
        query: &str,
        jurisdiction: &str,
    ) -> Result<SearchResult, ServiceError> {
        let request = SearchRequest {
            query: query.to_string(),
            jurisdiction: optional_jurisdiction(jurisdiction),
        };
        self.post_json("/search", &request).await
    }
}

#[async_trait]
impl ReportService for HttpCaseService {
    async fn generate_report(
        &self,
        query: &str,
        case_results: &[CaseSummary],
        jurisdiction: &str,
    ) -> Result<ReportResult, ServiceError> {
        let request = ReportRequest {
            query: query.to_string(),
            case_results: case_results.to_vec(),
            jurisdiction: optional_jurisdiction(jurisdiction),
        };
        self.post_json("/generate-report", &request).await
    }
}

#[async_trait]
impl JurisdictionSource for HttpCaseService {
    async fn list_jurisdictions(&self) -> Result<Vec<Jurisdiction>, ServiceError> {
        let list: JurisdictionList = self.get_json("/jurisdictions").await?;
        Ok(list.jurisdictions)
    }
}
