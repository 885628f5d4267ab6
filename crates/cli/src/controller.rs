use casequery_orchestrator::{PhaseState, QueryOrchestrator, SubmitOutcome};
use casequery_protocol::QueryState;
use casequery_suggest::{
    example_queries, DebounceScheduler, NavKey, NavOutcome, ScheduledTask, SuggestConfig,
    SuggestionMatcher, SuggestionNavigator, SuggestionSet,
};
use log::debug;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;

/// What the suggestion list looks like right now.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionView {
    pub items: Vec<String>,
    pub selected: Option<usize>,
    pub open: bool,
}

/// Result of a key event, for the host to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEffect {
    Ignored,
    Highlighted(usize),
    /// Query text was replaced by this suggestion.
    Committed(String),
    Closed,
    /// Enter with nothing highlighted: the host should submit.
    Submit,
}

/// Navigator plus its published view; shared with the debounce and blur timers.
struct SuggestionHub {
    navigator: Mutex<SuggestionNavigator>,
    view_tx: watch::Sender<SuggestionView>,
}

impl SuggestionHub {
    fn new() -> Self {
        let (view_tx, _) = watch::channel(SuggestionView::default());
        Self {
            navigator: Mutex::new(SuggestionNavigator::new()),
            view_tx,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SuggestionNavigator> {
        match self.navigator.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Run `f` on the navigator and publish the resulting view atomically.
    fn update<R>(&self, f: impl FnOnce(&mut SuggestionNavigator) -> R) -> R {
        let mut navigator = self.lock();
        let out = f(&mut navigator);
        let view = SuggestionView {
            items: navigator.suggestions().as_slice().to_vec(),
            selected: navigator.selected(),
            open: navigator.is_open(),
        };
        self.view_tx.send_if_modified(|current| {
            if *current == view {
                return false;
            }
            *current = view;
            true
        });
        out
    }
}

/// A submission detached from the controller so the host can run it on
/// its own task while keystrokes keep flowing.
pub struct PendingSubmit {
    orchestrator: Arc<QueryOrchestrator>,
    query: QueryState,
}

impl PendingSubmit {
    #[must_use]
    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub async fn run(self) -> SubmitOutcome {
        self.orchestrator.submit(self.query).await
    }
}

/// Glue between raw input events, the suggestion flow and the orchestrator.
pub struct InputController {
    query: QueryState,
    hub: Arc<SuggestionHub>,
    debouncer: DebounceScheduler<String>,
    blur_grace: Duration,
    blur_task: Option<ScheduledTask>,
    orchestrator: Arc<QueryOrchestrator>,
}

impl InputController {
    pub fn new(
        orchestrator: Arc<QueryOrchestrator>,
        matcher: SuggestionMatcher,
        config: &SuggestConfig,
        jurisdiction: &str,
    ) -> Self {
        let hub = Arc::new(SuggestionHub::new());
        let debouncer = {
            let hub = hub.clone();
            DebounceScheduler::new(config.debounce(), move |input: String| {
                let set = matcher.matches(&input);
                debug!("{} suggestion(s) for {input:?}", set.len());
                hub.update(|navigator| navigator.refresh(&input, set));
            })
        };

        Self {
            query: QueryState::new("", jurisdiction),
            hub,
            debouncer,
            blur_grace: config.blur_grace(),
            blur_task: None,
            orchestrator,
        }
    }

    #[must_use]
    pub fn query(&self) -> &QueryState {
        &self.query
    }

    #[must_use]
    pub fn orchestrator(&self) -> &Arc<QueryOrchestrator> {
        &self.orchestrator
    }

    #[must_use]
    pub fn subscribe_suggestions(&self) -> watch::Receiver<SuggestionView> {
        self.hub.view_tx.subscribe()
    }

    #[must_use]
    pub fn subscribe_phases(&self) -> watch::Receiver<PhaseState> {
        self.orchestrator.subscribe()
    }

    #[must_use]
    pub fn suggestions(&self) -> SuggestionView {
        self.hub.view_tx.borrow().clone()
    }

    /// New query text from the input box. Must run inside a tokio runtime.
    pub fn on_input_change(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.query.set_text(text.clone());
        if text.trim().is_empty() {
            self.debouncer.cancel();
            self.hub.update(|navigator| navigator.clear());
            return;
        }
        self.debouncer.schedule(text);
    }

    pub fn set_jurisdiction(&mut self, jurisdiction: impl Into<String>) {
        self.query.set_jurisdiction(jurisdiction);
    }

    /// Replace the query with one of the canned example questions.
    pub fn use_example(&mut self, index: usize) -> bool {
        let Some(example) = example_queries().get(index) else {
            return false;
        };
        self.set_text_quietly(example);
        true
    }

    /// Step to the next example question, starting from the first when the
    /// query isn't one of them.
    pub fn cycle_example(&mut self) -> Option<&'static str> {
        let examples = example_queries();
        let next = examples
            .iter()
            .position(|example| *example == self.query.text())
            .map_or(0, |index| (index + 1) % examples.len());
        let example = examples.get(next).copied()?;
        self.set_text_quietly(example);
        Some(example)
    }

    pub fn on_key_event(&mut self, key: NavKey) -> KeyEffect {
        let outcome = self.hub.update(|navigator| navigator.on_key(key));
        match outcome {
            NavOutcome::Ignored => KeyEffect::Ignored,
            NavOutcome::Moved(index) => KeyEffect::Highlighted(index),
            NavOutcome::Committed(text) => {
                self.set_text_quietly(&text);
                KeyEffect::Committed(text)
            }
            NavOutcome::Submit => KeyEffect::Submit,
            NavOutcome::Closed => KeyEffect::Closed,
        }
    }

    pub fn click_suggestion(&mut self, index: usize) -> KeyEffect {
        self.on_key_event(NavKey::Commit(index))
    }

    /// Input lost focus: close the list after the grace delay so a click
    /// on a suggestion still lands.
    pub fn on_blur(&mut self) {
        let hub = self.hub.clone();
        self.blur_task = Some(ScheduledTask::after(self.blur_grace, move || {
            hub.update(|navigator| navigator.close());
        }));
    }

    pub fn on_focus(&mut self) {
        if let Some(task) = self.blur_task.take() {
            task.cancel();
        }
    }

    /// Stop the suggestion flow and hand a snapshot of the query to the
    /// orchestrator.
    pub fn begin_submit(&mut self) -> PendingSubmit {
        self.debouncer.cancel();
        self.blur_task = None;
        self.hub.update(|navigator| navigator.close());
        PendingSubmit {
            orchestrator: self.orchestrator.clone(),
            query: self.query.snapshot(),
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        self.begin_submit().run().await
    }

    fn set_text_quietly(&mut self, text: &str) {
        self.debouncer.cancel();
        self.blur_task = None;
        self.query.set_text(text);
        self.hub
            .update(|navigator| navigator.refresh(text, SuggestionSet::default()));
    }
}
