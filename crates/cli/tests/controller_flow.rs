use async_trait::async_trait;
use casequery_cli::controller::{InputController, KeyEffect};
use casequery_orchestrator::{
    QueryOrchestrator, ReportPhase, ReportService, SearchPhase, SearchService, ServiceError,
    SubmitOutcome,
};
use casequery_protocol::{CaseSummary, ReportResult, SearchResult};
use casequery_suggest::{
    default_corpus, example_queries, NavKey, SuggestConfig, SuggestionMatcher,
};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct Recorder {
    searches: Mutex<Vec<(String, String)>>,
    reports: AtomicUsize,
}

struct OneCaseSearch(Arc<Recorder>);

#[async_trait]
impl SearchService for OneCaseSearch {
    async fn search_cases(
        &self,
        query: &str,
        jurisdiction: &str,
    ) -> Result<SearchResult, ServiceError> {
        self.0
            .searches
            .lock()
            .expect("searches")
            .push((query.to_string(), jurisdiction.to_string()));
        Ok(SearchResult {
            query: query.to_string(),
            results: vec![CaseSummary {
                case_name: "Terry v. Ohio".to_string(),
                citation: "392 U.S. 1".to_string(),
                year: 1968,
                court: "Supreme Court".to_string(),
                summary: String::new(),
                key_takeaways: vec![],
                facts: String::new(),
                legal_principle: String::new(),
                ruling: String::new(),
                relevance_score: 0.97,
                full_text_link: None,
                jurisdiction: None,
            }],
            total_results: 1,
            processing_time: 0.4,
            jurisdiction_filter: Some(jurisdiction.to_string()),
            clarification: None,
        })
    }
}

struct SummaryReport(Arc<Recorder>);

#[async_trait]
impl ReportService for SummaryReport {
    async fn generate_report(
        &self,
        query: &str,
        case_results: &[CaseSummary],
        _jurisdiction: &str,
    ) -> Result<ReportResult, ServiceError> {
        self.0.reports.fetch_add(1, Ordering::SeqCst);
        Ok(ReportResult {
            query: query.to_string(),
            executive_summary: format!("{} case(s)", case_results.len()),
            key_insights: vec![],
            procedural_recommendations: vec![],
            legal_warnings: vec![],
            jurisdiction_specific_notes: vec![],
            generated_at: "2025-06-29T00:00:00Z".to_string(),
        })
    }
}

fn controller() -> (InputController, Arc<Recorder>, SuggestConfig) {
    let recorder = Arc::new(Recorder::default());
    let orchestrator = Arc::new(QueryOrchestrator::new(
        Arc::new(OneCaseSearch(recorder.clone())),
        Arc::new(SummaryReport(recorder.clone())),
    ));
    let config = SuggestConfig::default();
    let matcher = SuggestionMatcher::with_config(default_corpus().clone(), &config);
    let controller = InputController::new(orchestrator, matcher, &config, "federal");
    (controller, recorder, config)
}

async fn settle(period: Duration) {
    tokio::time::sleep(period + Duration::from_millis(1)).await;
    tokio::task::yield_now().await;
}

#[tokio::test(start_paused = true)]
async fn typing_burst_produces_one_suggestion_refresh() {
    let (mut controller, _, config) = controller();
    let mut views = controller.subscribe_suggestions();

    for text in ["t", "te", "ter", "terr", "terry"] {
        controller.on_input_change(text);
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(!controller.suggestions().open, "no refresh inside the burst");

    settle(config.debounce()).await;
    let view = controller.suggestions();
    assert!(view.open);
    assert_eq!(view.selected, None);
    assert_eq!(view.items.first().map(String::as_str), Some("Terry stop"));
    assert!(views.has_changed().expect("sender alive"));
}

#[tokio::test(start_paused = true)]
async fn arrows_wrap_and_enter_commits_highlighted_phrase() {
    let (mut controller, recorder, config) = controller();
    controller.on_input_change("terry");
    settle(config.debounce()).await;
    let count = controller.suggestions().items.len();
    assert!(count >= 2);

    assert_eq!(controller.on_key_event(NavKey::Up), KeyEffect::Highlighted(count - 1));
    assert_eq!(controller.on_key_event(NavKey::Down), KeyEffect::Highlighted(0));

    let effect = controller.on_key_event(NavKey::Enter);
    assert_eq!(effect, KeyEffect::Committed("Terry stop".to_string()));
    assert_eq!(controller.query().text(), "Terry stop");
    assert!(!controller.suggestions().open);

    // Committing must not submit or re-open the list.
    settle(config.debounce()).await;
    assert!(!controller.suggestions().open);
    assert!(recorder.searches.lock().expect("searches").is_empty());
}

#[tokio::test(start_paused = true)]
async fn escape_closes_list_and_keeps_text() {
    let (mut controller, _, config) = controller();
    controller.on_input_change("miranda");
    settle(config.debounce()).await;
    assert!(controller.suggestions().open);

    assert_eq!(controller.on_key_event(NavKey::Escape), KeyEffect::Closed);
    assert!(!controller.suggestions().open);
    assert_eq!(controller.query().text(), "miranda");
}

#[tokio::test(start_paused = true)]
async fn clearing_input_cancels_pending_refresh() {
    let (mut controller, _, config) = controller();
    controller.on_input_change("search");
    tokio::time::sleep(Duration::from_millis(20)).await;
    controller.on_input_change("");

    settle(config.debounce()).await;
    let view = controller.suggestions();
    assert!(!view.open);
    assert!(view.items.is_empty());
}

#[tokio::test(start_paused = true)]
async fn blur_closes_after_grace_unless_click_lands_first() {
    let (mut controller, _, config) = controller();
    controller.on_input_change("terry");
    settle(config.debounce()).await;

    controller.on_blur();
    tokio::time::sleep(config.blur_grace() / 2).await;
    let effect = controller.click_suggestion(1);
    let clicked = controller.suggestions();
    assert!(matches!(effect, KeyEffect::Committed(_)));
    assert!(!clicked.open);

    controller.on_input_change("terry");
    settle(config.debounce()).await;
    assert!(controller.suggestions().open);
    controller.on_blur();
    settle(config.blur_grace()).await;
    assert!(!controller.suggestions().open);
    assert_eq!(controller.click_suggestion(7), KeyEffect::Ignored);
}

#[tokio::test(start_paused = true)]
async fn focus_within_grace_keeps_list_open() {
    let (mut controller, _, config) = controller();
    controller.on_input_change("terry");
    settle(config.debounce()).await;

    controller.on_blur();
    controller.on_focus();
    settle(config.blur_grace()).await;
    assert!(controller.suggestions().open);
}

#[tokio::test(start_paused = true)]
async fn enter_without_highlight_submits_snapshot() {
    let (mut controller, recorder, config) = controller();
    controller.set_jurisdiction("new_jersey");
    controller.on_input_change("search and seizure");
    assert_eq!(controller.on_key_event(NavKey::Enter), KeyEffect::Submit);

    let pending = controller.begin_submit();
    controller.on_input_change("something else");
    assert_eq!(pending.query().text(), "search and seizure");
    assert_eq!(pending.run().await, SubmitOutcome::Completed);

    assert_eq!(
        *recorder.searches.lock().expect("searches"),
        vec![("search and seizure".to_string(), "new_jersey".to_string())]
    );
    assert_eq!(recorder.reports.load(Ordering::SeqCst), 1);

    let phases = controller.orchestrator().snapshot();
    assert!(matches!(phases.search, SearchPhase::Success(_)));
    assert!(matches!(phases.report, ReportPhase::Success(_)));

    // The pending debounce from the post-submit edit still runs normally.
    settle(config.debounce()).await;
    assert_eq!(controller.query().text(), "something else");
}

#[tokio::test(start_paused = true)]
async fn submit_closes_suggestions_and_drops_pending_refresh() {
    let (mut controller, _, config) = controller();
    controller.on_input_change("terry");
    settle(config.debounce()).await;
    assert!(controller.suggestions().open);

    controller.on_input_change("terry stop");
    assert_eq!(controller.submit().await, SubmitOutcome::Completed);
    settle(config.debounce()).await;
    assert!(!controller.suggestions().open);
}

#[tokio::test(start_paused = true)]
async fn example_query_replaces_text_without_suggestions() {
    let (mut controller, _, config) = controller();
    assert!(controller.use_example(1));
    assert_eq!(controller.query().text(), example_queries()[1]);
    settle(config.debounce()).await;
    assert!(!controller.suggestions().open);
    assert!(!controller.use_example(99));
}

#[tokio::test(start_paused = true)]
async fn cycling_examples_walks_the_list_and_wraps() {
    let (mut controller, _, config) = controller();
    controller.on_input_change("terry");
    settle(config.debounce()).await;
    assert!(controller.suggestions().open);

    let examples = example_queries();
    assert_eq!(controller.cycle_example(), Some(examples[0]));
    assert!(!controller.suggestions().open);
    assert_eq!(controller.cycle_example(), Some(examples[1]));

    for _ in 2..examples.len() {
        controller.cycle_example();
    }
    assert_eq!(controller.query().text(), examples[examples.len() - 1]);
    assert_eq!(controller.cycle_example(), Some(examples[0]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn cleared_input_never_reopens_from_a_stale_refresh() {
    let recorder = Arc::new(Recorder::default());
    let orchestrator = Arc::new(QueryOrchestrator::new(
        Arc::new(OneCaseSearch(recorder.clone())),
        Arc::new(SummaryReport(recorder)),
    ));
    let config = SuggestConfig {
        debounce_ms: 1,
        ..SuggestConfig::default()
    };
    let matcher = SuggestionMatcher::with_config(default_corpus().clone(), &config);
    let mut controller = InputController::new(orchestrator, matcher, &config, "federal");

    for round in 0..200u64 {
        controller.on_input_change("terry");
        tokio::time::sleep(Duration::from_micros(900 + (round % 5) * 100)).await;
        controller.on_input_change("");
        let view = controller.suggestions();
        assert!(!view.open && view.items.is_empty(), "round {round}: {view:?}");
    }
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(!controller.suggestions().open);
}
