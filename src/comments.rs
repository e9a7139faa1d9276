//! Hero recovery from free-form play comments.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::lexicon::{CAMPAIGNS, GENERIC_MENTIONS, HERO_MENTIONS, STOP_WORDS, VILLAIN_MENTIONS};
use crate::matcher::{HeroMatch, match_to_official_hero};
use crate::model::PlayRecord;
use crate::registry::NameRegistry;

/// Shortest captured span worth sending to the matcher.
const MIN_MENTION_CHARS: usize = 3;

lazy_static! {
    static ref CAPITALIZED_RUN: Regex = Regex::new(r"\b[A-Z][a-z]+(?:[-\s][A-Z][a-z]+)*\b").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentionSource {
    /// Default hero of a campaign named in the comment.
    Campaign,
    /// A hero alias pattern.
    Alias,
    /// A syntactic shape such as "X vs Y" or "X (Aspect)".
    Generic,
}

/// One hero recovered from a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentHero {
    /// Captured text, or the campaign default's own name.
    pub mention: String,
    pub hero: HeroMatch,
    pub source: MentionSource,
    /// Label of the pattern that produced the mention.
    pub pattern: String,
}

/// Heroes named or implied by `comment`, unique by resolved name, in
/// pattern-library order. Only registry or curated matches are kept.
pub fn parse_heroes_from_comments(heroes: &NameRegistry, comment: &str) -> Vec<CommentHero> {
    let lower = comment.trim().to_lowercase();
    if lower.is_empty() {
        return Vec::new();
    }
    let mut found = Vec::new();

    if let Some((pattern, defaults)) = CAMPAIGNS.iter().find(|(pattern, _)| pattern.is_match(&lower)) {
        log::debug!("Campaign detected: {:?} from pattern '{}'", defaults, pattern.as_str());
        for name in defaults.iter() {
            found.push(CommentHero {
                mention: name.to_string(),
                hero: HeroMatch::official(name, false, false),
                source: MentionSource::Campaign,
                pattern: pattern.as_str().to_string(),
            });
        }
    }

    for (pattern, villain) in VILLAIN_MENTIONS.iter() {
        if let Some(caps) = pattern.captures(&lower) {
            let span = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            match villain {
                Some(name) => log::debug!("Villain mentioned in comment: {} ('{}')", name, span),
                None => log::debug!("Villain context in comment: '{}'", span),
            }
        }
    }

    for (label, pattern) in HERO_MENTIONS.iter() {
        collect_mentions(heroes, pattern, label, MentionSource::Alias, &lower, &mut found);
    }
    for (label, pattern) in GENERIC_MENTIONS.iter() {
        collect_mentions(heroes, pattern, label, MentionSource::Generic, &lower, &mut found);
    }

    let mut seen = HashSet::new();
    found.retain(|hero| seen.insert(hero.hero.name.clone()));
    if !found.is_empty() {
        log::debug!("{} unique heroes found in comment", found.len());
    }
    found
}

fn collect_mentions(
    heroes: &NameRegistry,
    pattern: &Regex,
    label: &str,
    source: MentionSource,
    text: &str,
    found: &mut Vec<CommentHero>,
) {
    for caps in pattern.captures_iter(text) {
        for span in capture_spans(&caps) {
            let candidate = span.trim();
            if candidate.chars().count() < MIN_MENTION_CHARS || STOP_WORDS.contains(candidate) {
                continue;
            }
            let hero = match_to_official_hero(heroes, candidate);
            if !hero.is_resolved() {
                continue;
            }
            log::debug!("Hero in comment via {}: '{}' -> '{}'", label, candidate, hero.name);
            found.push(CommentHero {
                mention: span.to_string(),
                hero,
                source,
                pattern: label.to_string(),
            });
        }
    }
}

/// Non-blank capture groups of one match, in group order.
fn capture_spans<'t>(caps: &Captures<'t>) -> Vec<&'t str> {
    caps.iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str())
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// How often a capitalized word run appeared across play comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionCount {
    pub mention: String,
    pub count: usize,
}

/// Count capitalized word runs ("Hulk", "She-Hulk", "Captain America") in
/// every play's comment. Lower-cased; most frequent first, ties in
/// first-seen order.
pub fn count_comment_mentions(plays: &[PlayRecord]) -> Vec<MentionCount> {
    let mut counts: Vec<MentionCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for play in plays {
        let comment = play.comment_text();
        if comment.is_empty() {
            continue;
        }
        for m in CAPITALIZED_RUN.find_iter(comment) {
            let mention = m.as_str().to_lowercase();
            match index.get(&mention) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(mention.clone(), counts.len());
                    counts.push(MentionCount { mention, count: 1 });
                }
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heroes() -> NameRegistry {
        NameRegistry::heroes(
            ["She-Hulk", "Wolverine", "Captain America", "Iron Man", "Storm", "Hulk", "Agent 13"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    fn names(found: &[CommentHero]) -> Vec<&str> {
        found.iter().map(|h| h.hero.name.as_str()).collect()
    }

    #[test]
    fn campaign_defaults_are_official() {
        let found = parse_heroes_from_comments(&heroes(), "SHIELD campaign session");
        assert_eq!(names(&found), vec!["Agent 13", "Nick Fury"]);
        assert!(found.iter().all(|h| h.hero.is_official && !h.hero.is_fuzzy));
        assert!(found.iter().all(|h| h.source == MentionSource::Campaign));
    }

    #[test]
    fn only_first_campaign_contributes() {
        let found = parse_heroes_from_comments(&heroes(), "mutant genesis then next evolution");
        assert_eq!(names(&found), vec!["Wolverine", "Storm", "Cyclops"]);
    }

    #[test]
    fn alias_mentions_resolve_through_matcher() {
        let found = parse_heroes_from_comments(&heroes(), "Captain America with Wolverine, fun game");
        assert_eq!(names(&found), vec!["Captain America", "Wolverine"]);
        assert!(found.iter().all(|h| h.source == MentionSource::Alias));
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let found = parse_heroes_from_comments(&heroes(), "mutant genesis: wolverine and storm rocked");
        assert_eq!(names(&found), vec!["Wolverine", "Storm", "Cyclops"]);
        assert_eq!(found[0].source, MentionSource::Campaign);
    }

    #[test]
    fn unresolvable_mentions_are_dropped() {
        let found = parse_heroes_from_comments(&heroes(), "lost to the scheme again");
        assert!(found.is_empty());

        // "Hulk" resolves, the villain never does.
        let found = parse_heroes_from_comments(&heroes(), "Hulk vs Rhino");
        assert_eq!(names(&found), vec!["Hulk"]);
    }

    #[test]
    fn empty_comment_yields_nothing() {
        assert!(parse_heroes_from_comments(&heroes(), "").is_empty());
        assert!(parse_heroes_from_comments(&heroes(), "   ").is_empty());
    }

    #[test]
    fn counts_capitalized_runs() {
        let plays: Vec<PlayRecord> = [
            Some("played with Captain America and Hulk"),
            Some("Hulk again"),
            None,
            Some("Captain America"),
            Some("Storm"),
        ]
        .iter()
        .map(|c| PlayRecord {
            comments: c.map(str::to_string),
            ..Default::default()
        })
        .collect();

        let counts = count_comment_mentions(&plays);
        assert_eq!(
            counts,
            vec![
                MentionCount { mention: "captain america".into(), count: 2 },
                MentionCount { mention: "hulk".into(), count: 2 },
                MentionCount { mention: "storm".into(), count: 1 },
            ]
        );
    }
}
