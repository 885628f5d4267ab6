use crate::SuggestionSet;

/// Device-independent keyboard/pointer events for the suggestion list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Down,
    Up,
    Enter,
    Escape,
    /// Pointer click on the suggestion at this index.
    Commit(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Closed,
    Open,
    Selected(usize),
}

/// What the host should do after a navigation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// Event not consumed by the list.
    Ignored,
    /// Highlight moved to this index.
    Moved(usize),
    /// Replace the query text with this suggestion; the list is now closed.
    Committed(String),
    /// Enter without a highlighted suggestion: submit the query.
    Submit,
    /// List closed; query text untouched.
    Closed,
}

/// Selection state machine over the current [`SuggestionSet`].
#[derive(Debug, Clone, Default)]
pub struct SuggestionNavigator {
    suggestions: SuggestionSet,
    selected: Option<usize>,
    visible: bool,
}

impl SuggestionNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> NavState {
        match (self.visible, self.selected) {
            (false, _) => NavState::Closed,
            (true, None) => NavState::Open,
            (true, Some(index)) => NavState::Selected(index),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        if self.visible {
            self.selected
        } else {
            None
        }
    }

    /// Selection as the classic signed index, `-1` meaning none.
    #[must_use]
    pub fn selected_index(&self) -> isize {
        self.selected()
            .and_then(|index| isize::try_from(index).ok())
            .unwrap_or(-1)
    }

    #[must_use]
    pub fn suggestions(&self) -> &SuggestionSet {
        &self.suggestions
    }

    /// Install a freshly computed set for `input`. Selection always resets.
    pub fn refresh(&mut self, input: &str, suggestions: SuggestionSet) {
        self.selected = None;
        if input.trim().is_empty() {
            self.suggestions = SuggestionSet::default();
            self.visible = false;
            return;
        }
        self.visible = !suggestions.is_empty();
        self.suggestions = suggestions;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.selected = None;
    }

    pub fn clear(&mut self) {
        self.close();
        self.suggestions = SuggestionSet::default();
    }

    pub fn on_key(&mut self, key: NavKey) -> NavOutcome {
        match key {
            NavKey::Down => self.step(true),
            NavKey::Up => self.step(false),
            NavKey::Enter => match self.selected() {
                Some(index) => self.commit(index),
                None => NavOutcome::Submit,
            },
            NavKey::Escape => {
                let was_open = self.visible;
                self.close();
                if was_open {
                    NavOutcome::Closed
                } else {
                    NavOutcome::Ignored
                }
            }
            NavKey::Commit(index) => self.commit(index),
        }
    }

    /// Pointer click; behaves like Enter with `index` highlighted.
    pub fn click(&mut self, index: usize) -> NavOutcome {
        self.on_key(NavKey::Commit(index))
    }

    fn step(&mut self, forward: bool) -> NavOutcome {
        let len = self.suggestions.len();
        if !self.visible || len == 0 {
            return NavOutcome::Ignored;
        }
        let next = match (self.selected, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(index), true) => (index + 1) % len,
            (Some(0), false) => len - 1,
            (Some(index), false) => index - 1,
        };
        self.selected = Some(next);
        NavOutcome::Moved(next)
    }

    fn commit(&mut self, index: usize) -> NavOutcome {
        let Some(value) = self.suggestions.get(index).map(str::to_string) else {
            return NavOutcome::Ignored;
        };
        self.close();
        NavOutcome::Committed(value)
    }
}
