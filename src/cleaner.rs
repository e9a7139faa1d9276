//! Color-field cleaning: strip aspect, team and punctuation noise down to a
//! candidate hero name.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::lexicon::{ASPECTS, is_aspect};

lazy_static! {
    static ref ASPECT_ALT: String = ASPECTS.join("|");

    static ref TEAM_ONLY: Regex = Regex::new(r"(?i)^(?:team\s*\d+|팀\s*\d+|team\s*[a-z]?)$").unwrap();

    // "Aspect: Justice／She-Hulk"
    static ref ASPECT_LABEL_PAIR: Regex = Regex::new(r"(?i)^aspect:\s*[^／/]+[／/](.+)$").unwrap();

    /// Aspect/hero pairings, tried in order. The first pattern that matches
    /// decides; its capture is used unless it is itself an aspect.
    static ref ASPECT_HERO_PATTERNS: Vec<Regex> = {
        let a = ASPECT_ALT.as_str();
        vec![
            // Aspect／Hero
            Regex::new(&format!(r"(?i)^(?:{a})[／/](.+)$")).unwrap(),
            // Hero／Aspect
            Regex::new(&format!(r"(?i)^(.+)[／/](?:{a})(?:\s|$)")).unwrap(),
            // Aspect - Hero
            Regex::new(&format!(r"(?i)^(?:{a})\s*[-–]\s*(.+)$")).unwrap(),
            // Hero - Aspect
            Regex::new(&format!(r"(?i)^(.+)\s*[-–]\s*(?:{a})(?:\s|$)")).unwrap(),
            // Aspect Hero
            Regex::new(&format!(r"(?i)^(?:{a})\s+(.+)$")).unwrap(),
            // Hero Aspect
            Regex::new(&format!(r"(?i)^(.+)\s+(?:{a})(?:\s|$)")).unwrap(),
            // .Aggression／-Gambit
            Regex::new(&format!(r"(?i)^\.(?:{a})[／/]-?(.+)$")).unwrap(),
            // -Gambit
            Regex::new(r"^-(.+)$").unwrap(),
        ]
    };

    /// Trailing noise removed after extraction, in order.
    static ref TRAILING_NOISE: Vec<Regex> = vec![
        Regex::new(r"[／/].*$").unwrap(),
        Regex::new(r"(?i)\s*-\s*(?:aggr|prot|just|lead|pool).*$").unwrap(),
        Regex::new(r"\s*\(.*\).*$").unwrap(),
        Regex::new(r"\s*\([^)]*$").unwrap(),
        Regex::new(r"(?i)aspect:.*").unwrap(),
        Regex::new(r"(?i)\bteam\s*\d+.*").unwrap(),
        Regex::new(r"팀\s*\d+.*").unwrap(),
    ];

    static ref LEADING_ASPECT: Regex = Regex::new(&format!(r"(?i)^(?:{})\s+(.+)$", *ASPECT_ALT)).unwrap();
    static ref TRAILING_ASPECT: Regex = Regex::new(&format!(r"(?i)^(.+)\s+(?:{})$", *ASPECT_ALT)).unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref TRAILING_SEPARATORS: Regex = Regex::new(r"[\s\-–:,]+$").unwrap();
}

/// Clean a raw color field into a candidate hero name, or `""` when nothing
/// meaningful remains.
///
/// Passes repeat until the value stops changing, so the result is a fixed
/// point: `clean_hero_name(&clean_hero_name(s)) == clean_hero_name(s)`.
/// After the first pass has normalized the text, a pass can only remove
/// characters or collapse whitespace, so the loop terminates.
pub fn clean_hero_name(raw: &str) -> String {
    let mut name = raw.to_string();
    loop {
        let next = clean_pass(&name);
        if next == name {
            break;
        }
        name = next;
    }
    name
}

fn clean_pass(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect();
    let mut name = normalized.trim().to_string();
    if name.is_empty() || TEAM_ONLY.is_match(&name) {
        return String::new();
    }

    if let Some(hero) = ASPECT_LABEL_PAIR.captures(&name).and_then(|c| c.get(1)) {
        name = hero.as_str().trim().to_string();
    }

    for pattern in ASPECT_HERO_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(&name) {
            let candidate = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            if !candidate.is_empty() && !is_aspect(candidate) {
                name = candidate.to_string();
            }
            break;
        }
    }

    for pattern in TRAILING_NOISE.iter() {
        name = pattern.replace(&name, "").into_owned();
    }
    name = LEADING_ASPECT.replace(&name, "$1").into_owned();
    name = TRAILING_ASPECT.replace(&name, "$1").into_owned();

    name = WHITESPACE.replace_all(&name, " ").trim().to_string();
    name = TRAILING_SEPARATORS.replace(&name, "").into_owned();

    if name.chars().count() < 2 || name.chars().all(|c| c.is_ascii_digit()) || is_aspect(&name) {
        return String::new();
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_hero_from_fullwidth_aspect_pair() {
        assert_eq!(clean_hero_name("Justice／She-hulk"), "She-hulk");
        assert_eq!(clean_hero_name("Leadership/Captain Marvel"), "Captain Marvel");
        assert_eq!(clean_hero_name("Hulk／Aggression"), "Hulk");
    }

    #[test]
    fn team_markers_are_meaningless() {
        assert_eq!(clean_hero_name("Team 3"), "");
        assert_eq!(clean_hero_name("team2"), "");
        assert_eq!(clean_hero_name("팀 1"), "");
        assert_eq!(clean_hero_name("Team"), "");
        assert_eq!(clean_hero_name("Wolverine Team 2"), "Wolverine");
    }

    #[test]
    fn strips_aspects_in_every_position() {
        assert_eq!(clean_hero_name("Justice Maria Hill"), "Maria Hill");
        assert_eq!(clean_hero_name("Bishop Justice"), "Bishop");
        assert_eq!(clean_hero_name("Protection - Black Widow"), "Black Widow");
        assert_eq!(clean_hero_name("Black Widow - Protection"), "Black Widow");
        assert_eq!(clean_hero_name("Storm - aggr"), "Storm");
        assert_eq!(clean_hero_name(".Aggression／-Gambit"), "Gambit");
        assert_eq!(clean_hero_name("Aspect: Pool／Deadpool"), "Deadpool");
    }

    #[test]
    fn strips_parentheticals_and_aspect_markers() {
        assert_eq!(clean_hero_name("Bishop (Protection)"), "Bishop");
        assert_eq!(clean_hero_name("Spider-Man - Miles Morales (aggr"), "Spider-Man - Miles Morales");
        assert_eq!(clean_hero_name("Thor ASPECT: Aggression"), "Thor");
        assert_eq!(clean_hero_name("-Gambit"), "Gambit");
    }

    #[test]
    fn keeps_altered_hero_prefix() {
        assert_eq!(clean_hero_name("AH - Wolverine"), "AH - Wolverine");
        assert_eq!(clean_hero_name("  AH-Storm  "), "AH-Storm");
    }

    #[test]
    fn combined_noise_is_fully_removed() {
        assert_eq!(clean_hero_name("Justice Hulk Team 2"), "Hulk");
        assert_eq!(clean_hero_name("Leadership／Iron Man (solo) Team 1"), "Iron Man");
    }

    #[test]
    fn short_numeric_and_bare_aspects_are_empty() {
        assert_eq!(clean_hero_name(""), "");
        assert_eq!(clean_hero_name("   "), "");
        assert_eq!(clean_hero_name("X"), "");
        assert_eq!(clean_hero_name("42"), "");
        assert_eq!(clean_hero_name("Justice"), "");
        assert_eq!(clean_hero_name("Justice Justice"), "");
    }

    #[test]
    fn collapses_whitespace_and_fullwidth_letters() {
        assert_eq!(clean_hero_name("Captain\t  America"), "Captain America");
        assert_eq!(clean_hero_name("Ｈｕｌｋ"), "Hulk");
    }

    #[test]
    fn cleaning_is_idempotent() {
        let samples = [
            "Justice／She-hulk",
            "Team 3",
            "AH - Wolverine",
            "Justice Justice Justice Hulk",
            "Bishop (Protection) Team 4",
            ".Aggression／-Gambit",
            "Aspect: Justice／Spider-Woman",
            "Constructed／Captain Marvel",
            "金刚狼",
            "Hombre Araña",
            "Storm - Leadership - Pool",
            "  -  ",
            "Ｊｕｓｔｉｃｅ／Ｈｕｌｋ",
            "Hulk -",
        ];
        for raw in samples {
            let once = clean_hero_name(raw);
            assert_eq!(clean_hero_name(&once), once, "not idempotent for {raw:?}");
        }

        let stacked = format!("{}Hulk", "Justice ".repeat(40));
        let once = clean_hero_name(&stacked);
        assert_eq!(once, "Hulk");
        assert_eq!(clean_hero_name(&once), once);
    }
}
