use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::HeroResult;

const DEFAULT_TRANSLATION_DELAY_MS: u64 = 100;
const DEFAULT_SKIP_EXAMPLES: usize = 3;
const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Pause after every call that actually reached the translation backend.
    pub translation_delay_ms: u64,
    pub multi_user: bool,
    /// Skip records kept verbatim per category. Counts are always complete.
    pub skip_examples_per_category: usize,
    pub similarity_threshold: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            translation_delay_ms: DEFAULT_TRANSLATION_DELAY_MS,
            multi_user: false,
            skip_examples_per_category: DEFAULT_SKIP_EXAMPLES,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl ResolverConfig {
    pub fn from_json(raw: &str) -> HeroResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Defaults overridden by `HERO_TRANSLATION_DELAY_MS`, `HERO_MULTI_USER`
    /// and `HERO_SKIP_EXAMPLES` when they parse.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let translation_delay_ms = std::env::var("HERO_TRANSLATION_DELAY_MS")
            .ok()
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(defaults.translation_delay_ms);
        let multi_user = std::env::var("HERO_MULTI_USER")
            .ok()
            .map(|val| matches!(val.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.multi_user);
        let skip_examples_per_category = std::env::var("HERO_SKIP_EXAMPLES")
            .ok()
            .and_then(|val| val.trim().parse::<usize>().ok())
            .unwrap_or(defaults.skip_examples_per_category);
        Self {
            translation_delay_ms,
            multi_user,
            skip_examples_per_category,
            ..defaults
        }
    }

    pub fn translation_delay(&self) -> Duration {
        Duration::from_millis(self.translation_delay_ms)
    }
}
