use casequery_protocol::QueryState;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use crate::{
    OrchestratorError, PhaseState, ReportPhase, ReportService, SearchPhase, SearchService,
};

/// Message shown when the search service failed without explaining why.
pub const SEARCH_FAILED_FALLBACK: &str = "Failed to search case law";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank query; nothing happened.
    Ignored,
    /// The submission ran to its last phase and its results are visible.
    Completed,
    /// A newer submission started first; this one's late results were dropped.
    Superseded,
}

pub struct QueryOrchestrator {
    search: Arc<dyn SearchService>,
    report: Arc<dyn ReportService>,
    generation: AtomicU64,
    state_tx: watch::Sender<PhaseState>,
}

impl QueryOrchestrator {
    pub fn new(search: Arc<dyn SearchService>, report: Arc<dyn ReportService>) -> Self {
        let (state_tx, _) = watch::channel(PhaseState::default());
        Self {
            search,
            report,
            generation: AtomicU64::new(0),
            state_tx,
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PhaseState> {
        self.state_tx.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> PhaseState {
        self.state_tx.borrow().clone()
    }

    #[must_use]
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Run one submission: search, then report when the search found cases.
    ///
    /// Never fails. Search errors land in [`SearchPhase::Error`]; report
    /// errors are logged and degrade to [`ReportPhase::Unavailable`].
    pub async fn submit(&self, query: QueryState) -> SubmitOutcome {
        if query.is_blank() {
            debug!("submit: blank query ignored");
            return SubmitOutcome::Ignored;
        }

        let text = query.trimmed_text().to_string();
        let jurisdiction = query.jurisdiction().to_string();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!("Submission #{generation}: {text:?} in {jurisdiction}");

        let submitted = QueryState::new(text.clone(), jurisdiction.clone());
        let started = self.state_tx.send_if_modified(|state| {
            if state.generation > generation {
                return false;
            }
            *state = PhaseState::started(generation, submitted);
            true
        });
        if !started {
            debug!("Submission #{generation} superseded before it started");
            return SubmitOutcome::Superseded;
        }

        let result = match self.search.search_cases(&text, &jurisdiction).await {
            Ok(result) => Arc::new(result),
            Err(err) => {
                let message = err.detail().unwrap_or(SEARCH_FAILED_FALLBACK).to_string();
                let failure = OrchestratorError::SearchFailed(message.clone());
                warn!("Submission #{generation}: {failure} ({err})");
                return outcome(self.apply(generation, |state| {
                    state.search = SearchPhase::Error(message);
                    state.report = ReportPhase::Idle;
                }));
            }
        };

        let has_matches = !result.is_empty();
        debug!(
            "Submission #{generation}: search returned {} case(s) in {:.2}s",
            result.match_count(),
            result.processing_time
        );
        let applied = self.apply(generation, |state| {
            state.search = SearchPhase::Success(result.clone());
            state.report = if has_matches {
                ReportPhase::Loading
            } else {
                ReportPhase::Skipped
            };
        });
        if !applied || !has_matches {
            return outcome(applied);
        }

        let report = match self
            .report
            .generate_report(&text, &result.results, &jurisdiction)
            .await
        {
            Ok(report) => ReportPhase::Success(Arc::new(report)),
            Err(err) => {
                let failure = OrchestratorError::ReportFailed(err.to_string());
                warn!("Submission #{generation}: {failure}; continuing without insights");
                ReportPhase::Unavailable
            }
        };

        outcome(self.apply(generation, |state| state.report = report))
    }

    /// Apply `update` only if `generation` is still the newest submission.
    /// Check and update happen under the channel's lock.
    fn apply(&self, generation: u64, update: impl FnOnce(&mut PhaseState)) -> bool {
        let applied = self.state_tx.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            update(state);
            true
        });
        if !applied {
            debug!("Dropping stale result of submission #{generation}");
        }
        applied
    }
}

const fn outcome(applied: bool) -> SubmitOutcome {
    if applied {
        SubmitOutcome::Completed
    } else {
        SubmitOutcome::Superseded
    }
}
