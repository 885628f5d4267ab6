//! # Case Query Suggest
//!
//! Live phrase suggestions for the query box.
//!
//! ```text
//! keystroke ──> DebounceScheduler ──(quiet period)──> SuggestionMatcher
//!                                                        │
//!                                                        └──> SuggestionNavigator
//!                                                               (Up/Down/Enter/Escape)
//! ```
//!
//! The matcher is pure. The scheduler and the blur grace timer run on the
//! tokio timer and must be driven from inside a runtime.

mod config;
mod corpus;
mod debounce;
mod error;
mod matcher;
mod navigator;
mod schedule;

pub use config::{SuggestConfig, MIN_BLUR_GRACE_MS};
pub use corpus::{default_corpus, example_queries, PhraseCorpus};
pub use debounce::DebounceScheduler;
pub use error::{Result, SuggestError};
pub use matcher::{match_phrases, SuggestionMatcher, SuggestionSet};
pub use navigator::{NavKey, NavOutcome, NavState, SuggestionNavigator};
pub use schedule::ScheduledTask;
