//! Resolve a candidate string to an official hero name.
//!
//! Order: altered-hero prefix split, exact registry hit, alias
//! normalization plus punctuation variants against the normalized index,
//! curated known heroes, then give up and hand back the base name.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lexicon::{HERO_NORMALIZATION_MAP, KNOWN_HEROES};
use crate::registry::NameRegistry;

lazy_static! {
    // "AH - Hero", "AH-Hero", "ah -Hero"
    static ref ALTERED_PREFIX: Regex = Regex::new(r"(?i)^ah\s*-\s*(.+)$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroMatch {
    /// Official spelling when matched, otherwise the unnormalized base name.
    pub name: String,
    pub is_official: bool,
    pub is_fuzzy: bool,
    pub is_altered: bool,
}

impl HeroMatch {
    pub(crate) fn official(name: &str, is_fuzzy: bool, is_altered: bool) -> Self {
        Self {
            name: name.to_string(),
            is_official: true,
            is_fuzzy,
            is_altered,
        }
    }

    fn unmatched(name: &str, is_altered: bool) -> Self {
        Self {
            name: name.to_string(),
            is_official: false,
            is_fuzzy: false,
            is_altered,
        }
    }

    /// Whether the registry or the curated overrides vouched for this name.
    pub fn is_resolved(&self) -> bool {
        self.is_official || self.is_fuzzy
    }
}

/// Split the "Altered Hero" prefix off, returning the base name and whether
/// the prefix was present.
pub fn split_altered(name: &str) -> (&str, bool) {
    match ALTERED_PREFIX.captures(name).and_then(|c| c.get(1)) {
        Some(base) if !base.as_str().trim().is_empty() => (base.as_str().trim(), true),
        _ => (name, false),
    }
}

pub fn match_to_official_hero(heroes: &NameRegistry, name: &str) -> HeroMatch {
    let trimmed = name.trim();
    let (base, is_altered) = split_altered(trimmed);
    if is_altered {
        log::debug!("Altered hero detected: '{}' -> base '{}'", trimmed, base);
    }
    if base.is_empty() {
        return HeroMatch::unmatched(base, is_altered);
    }

    if heroes.contains_exact(base) {
        return HeroMatch::official(base, false, is_altered);
    }

    let lower = base.to_lowercase();
    let normalized = HERO_NORMALIZATION_MAP
        .get(lower.as_str())
        .map(|s| s.to_string())
        .unwrap_or(lower);

    for variant in lookup_variants(&normalized) {
        if let Some(official) = heroes.lookup(&variant) {
            return HeroMatch::official(official, variant != normalized, is_altered);
        }
    }

    if let Some((_, known)) = KNOWN_HEROES.iter().find(|(key, _)| *key == normalized) {
        log::debug!("Known hero outside registry: '{}' -> '{}'", base, known);
        return HeroMatch::official(known, true, is_altered);
    }

    HeroMatch::unmatched(base, is_altered)
}

/// Normalized lookup keys in priority order. The first registry hit wins,
/// even if a later variant would name a different hero.
fn lookup_variants(normalized: &str) -> Vec<String> {
    let mut variants = vec![
        normalized.to_string(),
        normalized.replace('-', " "),
        normalized.replace('.', ""),
        normalized.replace(' ', ""),
        normalized.replace(['-', '.', ' '], ""),
    ];
    if normalized.contains("spider") && normalized.contains("man") {
        variants.push("spider-man".to_string());
        variants.push("spidey".to_string());
    }
    variants
}

/// Diagnostic nearest name by character-set Jaccard similarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarName {
    pub name: String,
    pub score: f64,
}

/// Best candidate whose score is strictly above `threshold`. Reporting
/// only; a similar name is never treated as a match.
pub fn closest_name(name: &str, candidates: &[String], threshold: f64) -> Option<SimilarName> {
    let lower = name.to_lowercase();
    let chars: HashSet<char> = lower.chars().collect();
    if chars.is_empty() {
        return None;
    }

    let mut best: Option<SimilarName> = None;
    for candidate in candidates {
        let other: HashSet<char> = candidate.to_lowercase().chars().collect();
        let union = chars.union(&other).count();
        if union == 0 {
            continue;
        }
        let score = chars.intersection(&other).count() as f64 / union as f64;
        let best_score = best.as_ref().map(|b| b.score).unwrap_or(0.0);
        if score > best_score && score > threshold {
            best = Some(SimilarName {
                name: candidate.clone(),
                score,
            });
        }
    }
    best
}
