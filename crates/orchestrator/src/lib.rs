//! # Case Query Orchestrator
//!
//! Drives one submission through the search service and, when the search
//! returns cases, through the report service.
//!
//! ```text
//! submit(QueryState)
//!     │
//!     ├──> SearchService::search_cases
//!     │      ├─ error ──────> SearchPhase::Error      (report stays Idle)
//!     │      ├─ 0 cases ────> ReportPhase::Skipped
//!     │      └─ N cases
//!     │
//!     └──> ReportService::generate_report
//!            ├─ ok ─────────> ReportPhase::Success
//!            └─ error ──────> ReportPhase::Unavailable (logged, never surfaced)
//! ```
//!
//! Every submission carries a generation number. Results are applied only
//! while their generation is still the newest, so a slow earlier submission
//! can never overwrite a later one.

mod error;
mod orchestrator;
mod phase;
mod services;

pub use error::{OrchestratorError, Result, ServiceError};
pub use orchestrator::{QueryOrchestrator, SubmitOutcome, SEARCH_FAILED_FALLBACK};
pub use phase::{PhaseState, ReportPhase, SearchPhase};
pub use services::{JurisdictionSource, ReportService, SearchService};
