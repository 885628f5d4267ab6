use crate::{PhraseCorpus, SuggestConfig};

/// Ranked suggestions for one input. Recomputed wholesale, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionSet {
    items: Vec<String>,
}

impl SuggestionSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

impl From<Vec<String>> for SuggestionSet {
    fn from(items: Vec<String>) -> Self {
        Self { items }
    }
}

/// Substring / all-tokens matcher over a [`PhraseCorpus`]
#[derive(Debug, Clone)]
pub struct SuggestionMatcher {
    corpus: PhraseCorpus,
    max_results: usize,
    min_input_len: usize,
}

impl SuggestionMatcher {
    pub fn new(corpus: PhraseCorpus) -> Self {
        Self::with_config(corpus, &SuggestConfig::default())
    }

    pub fn with_config(corpus: PhraseCorpus, config: &SuggestConfig) -> Self {
        Self {
            corpus,
            max_results: config.max_suggestions,
            min_input_len: config.min_input_len,
        }
    }

    #[must_use]
    pub fn corpus(&self) -> &PhraseCorpus {
        &self.corpus
    }

    /// Rank corpus phrases against `input`.
    ///
    /// A phrase is kept when it contains the whole trimmed input, or when it
    /// contains every input token longer than one character. Phrases that
    /// start with the input come first, then shorter phrases; remaining ties
    /// keep corpus order.
    #[must_use]
    pub fn matches(&self, input: &str) -> SuggestionSet {
        let needle = input.trim().to_lowercase();
        if needle.chars().count() < self.min_input_len {
            return SuggestionSet::default();
        }

        let tokens: Vec<&str> = needle
            .split_whitespace()
            .filter(|token| token.chars().count() > 1)
            .collect();

        let mut ranked: Vec<(bool, usize, &str)> = self
            .corpus
            .iter()
            .filter_map(|phrase| {
                let lower = phrase.to_lowercase();
                let contiguous = lower.contains(&needle);
                let all_tokens =
                    !tokens.is_empty() && tokens.iter().all(|token| lower.contains(token));
                if !contiguous && !all_tokens {
                    return None;
                }
                let prefix = lower.starts_with(&needle);
                Some((!prefix, phrase.chars().count(), phrase))
            })
            .collect();

        // Stable: equal keys keep corpus order.
        ranked.sort_by_key(|(not_prefix, len, _)| (*not_prefix, *len));
        ranked.truncate(self.max_results);

        ranked
            .into_iter()
            .map(|(_, _, phrase)| phrase.to_string())
            .collect::<Vec<_>>()
            .into()
    }
}

/// [`SuggestionMatcher::matches`] with default limits.
#[must_use]
pub fn match_phrases(input: &str, corpus: &PhraseCorpus) -> SuggestionSet {
    SuggestionMatcher::new(corpus.clone()).matches(input)
}
