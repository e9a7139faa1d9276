//! Villain/scenario heuristics.
//!
//! Registry membership first, then fixed marker substrings. False positives
//! and negatives are expected; they surface in the skip report.

use serde::{Deserialize, Serialize};

use crate::lexicon::VILLAIN_MARKERS;
use crate::registry::NameRegistry;
use crate::status::SkipCategory;

/// Why a candidate was filtered out instead of matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterReason {
    Villain,
    Scenario,
}

impl FilterReason {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterReason::Villain => "villain",
            FilterReason::Scenario => "scenario",
        }
    }

    pub fn skip_category(self) -> SkipCategory {
        match self {
            FilterReason::Villain => SkipCategory::Villains,
            FilterReason::Scenario => SkipCategory::Scenarios,
        }
    }
}

/// Classify a candidate, `None` when it looks like a hero.
pub fn classify(villains: &NameRegistry, name: &str) -> Option<FilterReason> {
    let normalized = name.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }
    if villains.lookup(&normalized).is_some() {
        return Some(FilterReason::Villain);
    }
    VILLAIN_MARKERS
        .iter()
        .find(|(marker, _)| normalized.contains(marker))
        .map(|(_, reason)| *reason)
}

pub fn is_villain_name(villains: &NameRegistry, name: &str) -> bool {
    classify(villains, name).is_some()
}
