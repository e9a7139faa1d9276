use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::status::{SkipCategory, StatusSet};

/// One logged play as delivered by the play-record source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayRecord {
    pub id: String,
    pub date: String,
    pub user_id: String,
    pub comments: Option<String>,
    /// `None` when the play carried no players element at all, `Some(vec![])`
    /// when the element was present but empty.
    pub players: Option<Vec<PlayerRecord>>,
}

impl PlayRecord {
    pub fn comment_text(&self) -> &str {
        self.comments.as_deref().map(str::trim).unwrap_or("")
    }

    pub fn origin(&self) -> RecordOrigin {
        RecordOrigin {
            play_id: self.id.clone(),
            date: self.date.clone(),
            user_id: self.user_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerRecord {
    pub color: String,
}

impl PlayerRecord {
    pub fn new(color: impl Into<String>) -> Self {
        Self { color: color.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOrigin {
    pub play_id: String,
    pub date: String,
    pub user_id: String,
}

/// How a structured color field was transformed on its way to the matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTrace {
    pub original: String,
    pub cleaned: String,
    pub translated: String,
    pub comments: String,
}

/// One resolved hero identity. Always contributes exactly one play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub hero: String,
    pub tags: StatusSet,
    pub is_altered: bool,
    pub origin: RecordOrigin,
    /// Present for results that came through the structured color field.
    pub trace: Option<FieldTrace>,
}

impl ResolutionResult {
    pub const CONTRIBUTION: u64 = 1;
}

/// A player record (or whole play) that produced no hero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkipRecord {
    pub category: SkipCategory,
    pub origin: RecordOrigin,
    pub comments: String,
    pub original_color: Option<String>,
    pub cleaned_name: Option<String>,
    pub translated_name: Option<String>,
    pub reason: String,
}

impl SkipRecord {
    /// Skip carrying only the play's identifiers and comment.
    pub fn for_play(category: SkipCategory, play: &PlayRecord, reason: impl Into<String>) -> Self {
        Self {
            category,
            origin: play.origin(),
            comments: play.comment_text().to_string(),
            original_color: None,
            cleaned_name: None,
            translated_name: None,
            reason: reason.into(),
        }
    }
}

/// Distinct non-empty user ids in first-seen order.
pub fn distinct_user_ids(plays: &[PlayRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    plays
        .iter()
        .map(|p| p.user_id.trim())
        .filter(|id| !id.is_empty())
        .filter(|id| seen.insert(id.to_string()))
        .map(str::to_string)
        .collect()
}
