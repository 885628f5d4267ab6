use once_cell::sync::Lazy;
use std::sync::Arc;

const EXAMPLE_QUERIES: &[&str] = &[
    "Can I search a vehicle without consent if I smell marijuana?",
    "What are the legal requirements for a Terry stop?",
    "Case law on plain view doctrine",
    "When can I order a driver out of their vehicle?",
    "Drug dog searches during traffic stops",
];

const LEGAL_PHRASES: &[&str] = &[
    "Terry stop",
    "Terry frisk for weapons",
    "Reasonable suspicion for a traffic stop",
    "Probable cause to search a vehicle",
    "Automobile exception to the warrant requirement",
    "Plain view doctrine",
    "Plain smell doctrine marijuana",
    "Search incident to arrest",
    "Consent search voluntariness",
    "Knock and announce rule",
    "Exigent circumstances warrantless entry",
    "Hot pursuit exception",
    "Community caretaking exception",
    "Inventory search of impounded vehicle",
    "Canine sniff during traffic stop",
    "Prolonged traffic stop for dog sniff",
    "Ordering passengers out of a vehicle",
    "Pat down of vehicle passengers",
    "Miranda warnings custodial interrogation",
    "Invocation of the right to counsel",
    "Fruit of the poisonous tree",
    "Good faith exception to the exclusionary rule",
    "Inevitable discovery doctrine",
    "Independent source doctrine",
    "Standing to challenge a search",
    "Expectation of privacy in a cell phone",
    "Cell phone search warrant requirement",
    "Cell site location information warrant",
    "GPS tracking of a vehicle",
    "Protective sweep of a residence",
    "Curtilage and open fields",
    "Anonymous tip reasonable suspicion",
    "Flight from police as reasonable suspicion",
    "High crime area reasonable suspicion",
    "Driving under the influence checkpoint",
    "Field sobriety test refusal",
    "Blood draw without a warrant",
    "Use of force excessive force claim",
    "Qualified immunity for officers",
    "Eyewitness identification procedures",
    "Stop and identify statutes",
    "Border search exception",
    "Administrative search of a business",
    "Search of a probationer's home",
];

static DEFAULT_CORPUS: Lazy<PhraseCorpus> = Lazy::new(|| {
    let mut phrases: Vec<String> = EXAMPLE_QUERIES
        .iter()
        .chain(LEGAL_PHRASES.iter())
        .map(|s| (*s).to_string())
        .collect();
    phrases.shrink_to_fit();
    PhraseCorpus::new(phrases)
});

/// Ordered, immutable list of phrases used for autocomplete.
///
/// Cloning is cheap; clones share the same backing storage.
#[derive(Debug, Clone, Default)]
pub struct PhraseCorpus {
    phrases: Arc<[String]>,
}

impl PhraseCorpus {
    pub fn new(phrases: Vec<String>) -> Self {
        Self {
            phrases: phrases.into(),
        }
    }

    pub fn from_static(phrases: &[&str]) -> Self {
        Self::new(phrases.iter().map(|s| (*s).to_string()).collect())
    }

    #[must_use]
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

/// The built-in legal-research corpus, initialised on first use.
pub fn default_corpus() -> &'static PhraseCorpus {
    &DEFAULT_CORPUS
}

/// Canned questions offered next to the query box.
pub fn example_queries() -> &'static [&'static str] {
    EXAMPLE_QUERIES
}
