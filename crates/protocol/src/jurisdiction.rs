use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_JURISDICTION: &str = "federal";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct Jurisdiction {
    pub value: String,
    pub label: String,
}

impl Jurisdiction {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Envelope returned by `GET /jurisdictions`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct JurisdictionList {
    pub jurisdictions: Vec<Jurisdiction>,
}

/// Built-in list used when the service cannot be reached.
#[must_use]
pub fn fallback_jurisdictions() -> Vec<Jurisdiction> {
    vec![
        Jurisdiction::new("all", "All Jurisdictions"),
        Jurisdiction::new("federal", "Federal Courts"),
        Jurisdiction::new("new_jersey", "New Jersey"),
        Jurisdiction::new("pennsylvania", "Pennsylvania"),
        Jurisdiction::new("new_york", "New York"),
    ]
}
