use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{Result, SuggestError};

/// Smallest blur grace delay that still lets a pointer click land on a
/// suggestion before the list is closed.
pub const MIN_BLUR_GRACE_MS: u64 = 50;

/// Timing and sizing knobs for the suggestion flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    /// Quiet period before the matcher runs (ms)
    pub debounce_ms: u64,

    /// Delay between focus loss and closing the list (ms)
    pub blur_grace_ms: u64,

    /// Maximum number of suggestions shown
    pub max_suggestions: usize,

    /// Minimum trimmed input length before matching
    pub min_input_len: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 200,
            blur_grace_ms: 150,
            max_suggestions: 6,
            min_input_len: 2,
        }
    }
}

impl SuggestConfig {
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub const fn blur_grace(&self) -> Duration {
        Duration::from_millis(self.blur_grace_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.debounce_ms == 0 {
            return Err(SuggestError::InvalidConfig(
                "debounce_ms must be > 0".to_string(),
            ));
        }

        if self.blur_grace_ms < MIN_BLUR_GRACE_MS {
            return Err(SuggestError::InvalidConfig(format!(
                "blur_grace_ms ({}) must be at least {MIN_BLUR_GRACE_MS}",
                self.blur_grace_ms
            )));
        }

        if self.max_suggestions == 0 {
            return Err(SuggestError::InvalidConfig(
                "max_suggestions must be > 0".to_string(),
            ));
        }

        if self.min_input_len == 0 {
            return Err(SuggestError::InvalidConfig(
                "min_input_len must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SuggestConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.debounce(), Duration::from_millis(200));
        assert_eq!(config.blur_grace(), Duration::from_millis(150));
    }

    #[test]
    fn rejects_blur_grace_too_short_for_clicks() {
        let config = SuggestConfig {
            blur_grace_ms: 10,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("blur_grace_ms"));
    }

    #[test]
    fn rejects_zero_sizes() {
        let config = SuggestConfig {
            max_suggestions: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SuggestConfig {
            debounce_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
