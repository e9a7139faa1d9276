//! Per-record resolution: structured color field first, comment mining when
//! the field yields nothing usable.
//!
//! Every player record ends in exactly one [`PlayerOutcome`]: one or more
//! results, or one skip.

use crate::cleaner::clean_hero_name;
use crate::comments::parse_heroes_from_comments;
use crate::config::ResolverConfig;
use crate::matcher::{HeroMatch, match_to_official_hero};
use crate::model::{FieldTrace, PlayRecord, PlayerRecord, ResolutionResult, SkipRecord};
use crate::registry::Catalog;
use crate::status::{SkipCategory, StatusSet, StatusTag};
use crate::translate::{HeroTranslator, Translate, Translation};

#[derive(Debug, Clone)]
pub enum PlayerOutcome {
    /// Never empty.
    Resolved(Vec<ResolutionResult>),
    Skipped(SkipRecord),
}

/// Everything one play contributed.
#[derive(Debug, Clone, Default)]
pub struct PlayResolution {
    pub results: Vec<ResolutionResult>,
    pub skips: Vec<SkipRecord>,
    /// Player records present in the play.
    pub player_count: usize,
    /// Player records whose color field was non-blank.
    pub players_with_color: usize,
    /// Structured players were present, or comments recovered a hero.
    pub has_usable_data: bool,
}

/// Status tags implied by a match.
pub fn match_tags(hero: &HeroMatch, was_translated: bool) -> StatusSet {
    let mut tags = StatusSet::new();
    if was_translated {
        tags.insert(StatusTag::Translated);
    }
    if hero.is_official {
        tags.insert(StatusTag::Official);
    } else {
        tags.insert(StatusTag::Unmatched);
    }
    if hero.is_fuzzy {
        tags.insert(StatusTag::FuzzyMatched);
    }
    if hero.is_altered {
        tags.insert(StatusTag::AlteredHero);
    }
    tags
}

pub struct Resolver<'a> {
    catalog: &'a Catalog,
    translator: HeroTranslator<'a>,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a Catalog, backend: &'a dyn Translate, config: &ResolverConfig) -> Self {
        Self {
            catalog,
            translator: HeroTranslator::new(backend, &catalog.villains, config.translation_delay()),
        }
    }

    pub fn translator(&self) -> &HeroTranslator<'a> {
        &self.translator
    }

    pub fn resolve_play(&mut self, play: &PlayRecord) -> PlayResolution {
        let mut resolution = PlayResolution::default();

        let players = match play.players.as_deref() {
            Some(players) if !players.is_empty() => players,
            missing => {
                let (context, reason) = match missing {
                    None => (StatusTag::NoPlayers, "No players element found, no heroes in comments"),
                    Some(_) => (StatusTag::EmptyPlayers, "Empty players list, no heroes in comments"),
                };
                let results = self.comment_results(play, Some(context));
                if results.is_empty() {
                    log::debug!("Play {} skipped: {}", play.id, reason);
                    resolution
                        .skips
                        .push(SkipRecord::for_play(SkipCategory::NoPlayers, play, reason));
                } else {
                    resolution.results = results;
                    resolution.has_usable_data = true;
                }
                return resolution;
            }
        };

        resolution.has_usable_data = true;
        resolution.player_count = players.len();
        for player in players {
            if !player.color.trim().is_empty() {
                resolution.players_with_color += 1;
            }
            match self.resolve_player(play, player) {
                PlayerOutcome::Resolved(results) => resolution.results.extend(results),
                PlayerOutcome::Skipped(skip) => resolution.skips.push(skip),
            }
        }
        resolution
    }

    pub fn resolve_player(&mut self, play: &PlayRecord, player: &PlayerRecord) -> PlayerOutcome {
        let color = player.color.trim();
        if color.is_empty() {
            return self.comments_or_skip(play, Some(StatusTag::EmptyColor), || {
                SkipRecord::for_play(
                    SkipCategory::EmptyColor,
                    play,
                    "Empty color field, no heroes in comments",
                )
            });
        }

        let cleaned = clean_hero_name(color);
        if cleaned.is_empty() {
            return self.comments_or_skip(play, None, || SkipRecord {
                original_color: Some(color.to_string()),
                cleaned_name: Some(cleaned.clone()),
                ..SkipRecord::for_play(
                    SkipCategory::MeaninglessNames,
                    play,
                    "Meaningless name after cleaning, no heroes in comments",
                )
            });
        }

        let translation = self.translator.translate(&cleaned);
        let was_translated = translation.was_translated();
        let translated = match translation {
            Translation::Filtered { reason, .. } => {
                log::debug!("'{}' filtered as {}", cleaned, reason.as_str());
                return PlayerOutcome::Skipped(SkipRecord {
                    original_color: Some(color.to_string()),
                    cleaned_name: Some(cleaned),
                    ..SkipRecord::for_play(
                        reason.skip_category(),
                        play,
                        format!("Filtered as {}", reason.as_str()),
                    )
                });
            }
            Translation::Unchanged(text) | Translation::Translated(text) => text,
        };

        if translated.trim().is_empty() {
            return PlayerOutcome::Skipped(SkipRecord {
                original_color: Some(color.to_string()),
                cleaned_name: Some(cleaned),
                translated_name: Some(translated),
                ..SkipRecord::for_play(
                    SkipCategory::TranslationErrors,
                    play,
                    "Translation resulted in empty string",
                )
            });
        }

        let hero = match_to_official_hero(&self.catalog.heroes, &translated);
        let tags = match_tags(&hero, was_translated);
        log::debug!("'{}' -> '{}' [{}]", color, hero.name, tags);
        PlayerOutcome::Resolved(vec![ResolutionResult {
            hero: hero.name,
            tags,
            is_altered: hero.is_altered,
            origin: play.origin(),
            trace: Some(FieldTrace {
                original: color.to_string(),
                cleaned,
                translated,
                comments: play.comment_text().to_string(),
            }),
        }])
    }

    fn comments_or_skip(
        &self,
        play: &PlayRecord,
        context: Option<StatusTag>,
        skip: impl FnOnce() -> SkipRecord,
    ) -> PlayerOutcome {
        let results = self.comment_results(play, context);
        if results.is_empty() {
            PlayerOutcome::Skipped(skip())
        } else {
            PlayerOutcome::Resolved(results)
        }
    }

    fn comment_results(&self, play: &PlayRecord, context: Option<StatusTag>) -> Vec<ResolutionResult> {
        parse_heroes_from_comments(&self.catalog.heroes, play.comment_text())
            .into_iter()
            .map(|found| {
                let mut tags = match_tags(&found.hero, false);
                tags.insert(StatusTag::FromComments);
                if let Some(context) = context {
                    tags.insert(context);
                }
                ResolutionResult {
                    hero: found.hero.name,
                    tags,
                    is_altered: found.hero.is_altered,
                    origin: play.origin(),
                    trace: None,
                }
            })
            .collect()
    }
}
