use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Failure reported by a remote collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Service rejected request (HTTP {status})")]
    Rejected { status: u16, detail: Option<String> },

    #[error("Malformed service response: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

impl ServiceError {
    /// Human-readable message sent by the service, if any.
    ///
    /// Transport and decode failures carry client-side text that is only
    /// fit for the log, so they have no detail.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Other(message) => Some(message),
            Self::Rejected { detail, .. } => detail.as_deref(),
            Self::Unavailable(_) | Self::Decode(_) => None,
        }
    }
}

/// Failure kinds of one submission.
///
/// `SearchFailed` becomes visible phase state; `ReportFailed` is only logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorError {
    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("Report generation failed: {0}")]
    ReportFailed(String),
}
