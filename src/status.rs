//! Provenance tags attached to resolved heroes, and skip reason codes.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusTag {
    Official,
    Translated,
    FuzzyMatched,
    AlteredHero,
    FromComments,
    Unmatched,
    NoPlayers,
    EmptyPlayers,
    EmptyColor,
}

impl StatusTag {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusTag::Official => "OFFICIAL",
            StatusTag::Translated => "TRANSLATED",
            StatusTag::FuzzyMatched => "FUZZY_MATCHED",
            StatusTag::AlteredHero => "ALTERED_HERO",
            StatusTag::FromComments => "FROM_COMMENTS",
            StatusTag::Unmatched => "UNMATCHED",
            StatusTag::NoPlayers => "NO_PLAYERS",
            StatusTag::EmptyPlayers => "EMPTY_PLAYERS",
            StatusTag::EmptyColor => "EMPTY_COLOR",
        }
    }
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered set of status tags. Iteration order is the declaration order of
/// [`StatusTag`], so rendering is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusSet(BTreeSet<StatusTag>);

impl StatusSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: StatusTag) {
        self.0.insert(tag);
    }

    pub fn contains(&self, tag: StatusTag) -> bool {
        self.0.contains(&tag)
    }

    pub fn extend(&mut self, other: &StatusSet) {
        self.0.extend(other.0.iter().copied());
    }

    pub fn iter(&self) -> impl Iterator<Item = StatusTag> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<StatusTag> for StatusSet {
    fn from_iter<I: IntoIterator<Item = StatusTag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for StatusSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for tag in self.iter() {
            if !first {
                f.write_str("|")?;
            }
            f.write_str(tag.as_str())?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipCategory {
    NoPlayers,
    EmptyColor,
    MeaninglessNames,
    Villains,
    Scenarios,
    TranslationErrors,
}

impl SkipCategory {
    pub const ALL: [SkipCategory; 6] = [
        SkipCategory::NoPlayers,
        SkipCategory::EmptyColor,
        SkipCategory::MeaninglessNames,
        SkipCategory::Villains,
        SkipCategory::Scenarios,
        SkipCategory::TranslationErrors,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SkipCategory::NoPlayers => "no_players",
            SkipCategory::EmptyColor => "empty_color",
            SkipCategory::MeaninglessNames => "meaningless_names",
            SkipCategory::Villains => "villains",
            SkipCategory::Scenarios => "scenarios",
            SkipCategory::TranslationErrors => "translation_errors",
        }
    }

    /// `no_players` is counted per play; every other category is counted per
    /// player record.
    pub fn is_player_level(self) -> bool {
        !matches!(self, SkipCategory::NoPlayers)
    }
}

impl fmt::Display for SkipCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
