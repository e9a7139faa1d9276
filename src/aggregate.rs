//! Hero-usage aggregation and report assembly.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ResolverConfig;
use crate::matcher::{SimilarName, closest_name};
use crate::model::{FieldTrace, PlayRecord, RecordOrigin, ResolutionResult, SkipRecord};
use crate::registry::Catalog;
use crate::resolver::{PlayResolution, Resolver};
use crate::status::{SkipCategory, StatusSet, StatusTag};
use crate::translate::Translate;
use crate::villain::is_villain_name;

/// One row of the ranked usage table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroUsageEntry {
    pub hero: String,
    pub play_count: u64,
    pub total_plays: u64,
    pub altered_plays: u64,
    /// Union of every tag seen on a contributing result.
    pub statuses: StatusSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_plays_per_user: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayStats {
    pub plays_analyzed: usize,
    /// Plays with structured players, or whose comments recovered a hero.
    pub plays_with_players: usize,
    pub total_players: usize,
    pub players_with_color: usize,
}

/// Complete count plus the first few records of one skip category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkipSummary {
    pub count: usize,
    pub examples: Vec<SkipRecord>,
}

/// First structured record behind an unmatched hero name, with diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnmatchedExample {
    pub hero: String,
    pub trace: FieldTrace,
    pub origin: RecordOrigin,
    pub is_altered: bool,
    pub looks_like_villain: bool,
    pub closest_hero: Option<SimilarName>,
    pub closest_villain: Option<SimilarName>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_hero_plays: u64,
    pub official_plays: u64,
    pub translated_plays: u64,
    pub fuzzy_plays: u64,
    pub altered_plays: u64,
    pub unmatched_plays: u64,
    pub comment_plays: u64,
    pub skipped_player_records: usize,
    pub plays_without_usable_data: usize,
    /// Share of hero plays not tagged UNMATCHED, in percent.
    pub resolved_percent: f64,
    pub avg_hero_plays_per_play: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroReport {
    pub heroes: Vec<HeroUsageEntry>,
    pub skips: BTreeMap<SkipCategory, SkipSummary>,
    pub unmatched: Vec<UnmatchedExample>,
    pub stats: PlayStats,
    pub summary: ReportSummary,
}

impl HeroReport {
    pub fn hero(&self, name: &str) -> Option<&HeroUsageEntry> {
        self.heroes.iter().find(|entry| entry.hero == name)
    }

    pub fn skip_count(&self, category: SkipCategory) -> usize {
        self.skips.get(&category).map(|s| s.count).unwrap_or(0)
    }
}

/// A user's plays, for multi-user analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPlays {
    pub user_id: String,
    pub plays: Vec<PlayRecord>,
}

#[derive(Debug)]
struct HeroTally {
    hero: String,
    count: u64,
    altered: u64,
    tags: StatusSet,
    users: BTreeSet<String>,
}

struct PendingUnmatched {
    hero: String,
    trace: FieldTrace,
    origin: RecordOrigin,
    is_altered: bool,
}

/// Accumulates results in arrival order. Arrival order is the tie-break
/// for equal counts, so feed it deterministically.
pub struct Aggregator {
    multi_user: bool,
    skip_examples: usize,
    tallies: Vec<HeroTally>,
    index: HashMap<String, usize>,
    tag_counts: BTreeMap<StatusTag, u64>,
    total_results: u64,
    skips: BTreeMap<SkipCategory, SkipSummary>,
    unmatched: Vec<PendingUnmatched>,
    unmatched_seen: HashSet<String>,
    stats: PlayStats,
}

impl Aggregator {
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            multi_user: config.multi_user,
            skip_examples: config.skip_examples_per_category,
            tallies: Vec::new(),
            index: HashMap::new(),
            tag_counts: BTreeMap::new(),
            total_results: 0,
            skips: SkipCategory::ALL
                .iter()
                .map(|c| (*c, SkipSummary::default()))
                .collect(),
            unmatched: Vec::new(),
            unmatched_seen: HashSet::new(),
            stats: PlayStats::default(),
        }
    }

    pub fn add_play(&mut self, resolution: PlayResolution) {
        self.stats.plays_analyzed += 1;
        if resolution.has_usable_data {
            self.stats.plays_with_players += 1;
        }
        self.stats.total_players += resolution.player_count;
        self.stats.players_with_color += resolution.players_with_color;

        for result in resolution.results {
            self.add_result(result);
        }
        for skip in resolution.skips {
            self.add_skip(skip);
        }
    }

    pub fn add_result(&mut self, result: ResolutionResult) {
        let contribution = ResolutionResult::CONTRIBUTION;
        self.total_results += contribution;
        for tag in result.tags.iter() {
            *self.tag_counts.entry(tag).or_insert(0) += contribution;
        }

        let slot = match self.index.get(&result.hero) {
            Some(&slot) => slot,
            None => {
                self.index.insert(result.hero.clone(), self.tallies.len());
                self.tallies.push(HeroTally {
                    hero: result.hero.clone(),
                    count: 0,
                    altered: 0,
                    tags: StatusSet::new(),
                    users: BTreeSet::new(),
                });
                self.tallies.len() - 1
            }
        };
        let tally = &mut self.tallies[slot];
        tally.count += contribution;
        if result.is_altered {
            tally.altered += contribution;
        }
        tally.tags.extend(&result.tags);
        if !result.origin.user_id.is_empty() {
            tally.users.insert(result.origin.user_id.clone());
        }

        if result.tags.contains(StatusTag::Unmatched) && !self.unmatched_seen.contains(&result.hero) {
            if let Some(trace) = result.trace {
                self.unmatched_seen.insert(result.hero.clone());
                self.unmatched.push(PendingUnmatched {
                    hero: result.hero,
                    trace,
                    origin: result.origin,
                    is_altered: result.is_altered,
                });
            }
        }
    }

    pub fn add_skip(&mut self, skip: SkipRecord) {
        let summary = self.skips.entry(skip.category).or_default();
        summary.count += 1;
        if summary.examples.len() < self.skip_examples {
            summary.examples.push(skip);
        }
    }

    pub fn finish(self, catalog: &Catalog, config: &ResolverConfig) -> HeroReport {
        let multi_user = self.multi_user;
        let mut heroes: Vec<HeroUsageEntry> = self
            .tallies
            .into_iter()
            .map(|tally| {
                let users = tally.users.len();
                HeroUsageEntry {
                    hero: tally.hero,
                    play_count: tally.count,
                    total_plays: tally.count,
                    altered_plays: tally.altered,
                    statuses: tally.tags,
                    user_count: multi_user.then_some(users),
                    avg_plays_per_user: (multi_user && users > 0).then(|| tally.count as f64 / users as f64),
                }
            })
            .collect();
        heroes.sort_by(|a, b| {
            b.total_plays
                .cmp(&a.total_plays)
                .then(b.play_count.cmp(&a.play_count))
        });

        let unmatched = self
            .unmatched
            .into_iter()
            .map(|pending| {
                let probe = pending.trace.cleaned.as_str();
                UnmatchedExample {
                    looks_like_villain: is_villain_name(&catalog.villains, probe),
                    closest_hero: closest_name(probe, catalog.heroes.names(), config.similarity_threshold),
                    closest_villain: closest_name(
                        probe,
                        catalog.villains.names(),
                        config.similarity_threshold,
                    ),
                    hero: pending.hero,
                    trace: pending.trace,
                    origin: pending.origin,
                    is_altered: pending.is_altered,
                }
            })
            .collect();

        let tag = |t: StatusTag| self.tag_counts.get(&t).copied().unwrap_or(0);
        let total = self.total_results;
        let unmatched_plays = tag(StatusTag::Unmatched);
        let summary = ReportSummary {
            total_hero_plays: total,
            official_plays: tag(StatusTag::Official),
            translated_plays: tag(StatusTag::Translated),
            fuzzy_plays: tag(StatusTag::FuzzyMatched),
            altered_plays: tag(StatusTag::AlteredHero),
            unmatched_plays,
            comment_plays: tag(StatusTag::FromComments),
            skipped_player_records: self
                .skips
                .iter()
                .filter(|(category, _)| category.is_player_level())
                .map(|(_, summary)| summary.count)
                .sum(),
            plays_without_usable_data: self.stats.plays_analyzed - self.stats.plays_with_players,
            resolved_percent: if total > 0 {
                (total - unmatched_plays) as f64 / total as f64 * 100.0
            } else {
                0.0
            },
            avg_hero_plays_per_play: if self.stats.plays_analyzed > 0 {
                total as f64 / self.stats.plays_analyzed as f64
            } else {
                0.0
            },
        };

        log::info!(
            "Analyzed {} plays: {} hero plays across {} heroes, {} player records skipped, {:.1}% resolved",
            self.stats.plays_analyzed,
            summary.total_hero_plays,
            heroes.len(),
            summary.skipped_player_records,
            summary.resolved_percent
        );

        HeroReport {
            heroes,
            skips: self.skips,
            unmatched,
            stats: self.stats,
            summary,
        }
    }
}

/// Resolve and aggregate a flat, ordered sequence of plays.
pub fn analyze_plays(
    catalog: &Catalog,
    backend: &dyn Translate,
    config: &ResolverConfig,
    plays: &[PlayRecord],
) -> HeroReport {
    let mut resolver = Resolver::new(catalog, backend, config);
    let mut aggregator = Aggregator::new(config);
    for play in plays {
        aggregator.add_play(resolver.resolve_play(play));
    }
    log::debug!(
        "{} translation backend calls",
        resolver.translator().backend_calls()
    );
    aggregator.finish(catalog, config)
}

/// Resolve each user's plays on its own worker and translation cache, then
/// aggregate in input order. Per-hero user counts are always reported.
pub fn analyze_users(
    catalog: &Catalog,
    backend: &dyn Translate,
    config: &ResolverConfig,
    batches: &[UserPlays],
) -> HeroReport {
    let resolved: Vec<Vec<PlayResolution>> = batches
        .par_iter()
        .map(|batch| {
            let mut resolver = Resolver::new(catalog, backend, config);
            let resolutions: Vec<PlayResolution> = batch
                .plays
                .iter()
                .map(|play| {
                    let mut resolution = resolver.resolve_play(play);
                    for result in &mut resolution.results {
                        if result.origin.user_id.is_empty() {
                            result.origin.user_id = batch.user_id.clone();
                        }
                    }
                    resolution
                })
                .collect();
            log::debug!(
                "User {}: {} plays resolved, {} translation backend calls",
                batch.user_id,
                resolutions.len(),
                resolver.translator().backend_calls()
            );
            resolutions
        })
        .collect();

    let config = ResolverConfig {
        multi_user: true,
        ..config.clone()
    };
    let mut aggregator = Aggregator::new(&config);
    for resolution in resolved.into_iter().flatten() {
        aggregator.add_play(resolution);
    }
    aggregator.finish(catalog, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PlayerRecord;
    use crate::translate::NoTranslation;

    fn catalog() -> Catalog {
        Catalog::new(
            ["She-Hulk", "Wolverine", "Hulk", "Storm", "Agent 13", "Nick Fury"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            vec!["Rhino".into(), "Ultron".into()],
        )
    }

    fn config() -> ResolverConfig {
        ResolverConfig {
            translation_delay_ms: 0,
            ..Default::default()
        }
    }

    fn result(hero: &str, tags: &[StatusTag], altered: bool) -> ResolutionResult {
        ResolutionResult {
            hero: hero.to_string(),
            tags: tags.iter().copied().collect(),
            is_altered: altered,
            origin: RecordOrigin::default(),
            trace: None,
        }
    }

    fn play(id: &str, user: &str, colors: &[&str], comments: &str) -> PlayRecord {
        PlayRecord {
            id: id.into(),
            date: "2024-06-01".into(),
            user_id: user.into(),
            comments: Some(comments.into()),
            players: Some(colors.iter().map(|c| PlayerRecord::new(*c)).collect()),
        }
    }

    #[test]
    fn ranks_by_count_with_first_seen_ties() {
        let mut agg = Aggregator::new(&config());
        for hero in ["Storm", "Hulk", "Wolverine", "Hulk", "Storm", "Wolverine", "Wolverine"] {
            agg.add_result(result(hero, &[StatusTag::Official], false));
        }
        let report = agg.finish(&catalog(), &config());
        let order: Vec<_> = report.heroes.iter().map(|e| (e.hero.as_str(), e.total_plays)).collect();
        assert_eq!(order, vec![("Wolverine", 3), ("Storm", 2), ("Hulk", 2)]);
    }

    #[test]
    fn altered_count_and_tag_union() {
        let mut agg = Aggregator::new(&config());
        agg.add_result(result("Wolverine", &[StatusTag::Official], false));
        agg.add_result(result("Wolverine", &[StatusTag::Official, StatusTag::AlteredHero], true));
        agg.add_result(result("Nobody", &[StatusTag::Unmatched, StatusTag::AlteredHero], true));
        let report = agg.finish(&catalog(), &config());

        let wolverine = report.hero("Wolverine").unwrap();
        assert_eq!(wolverine.total_plays, 2);
        assert_eq!(wolverine.altered_plays, 1);
        assert_eq!(wolverine.statuses.to_string(), "OFFICIAL|ALTERED_HERO");
        assert_eq!(report.hero("Nobody").unwrap().altered_plays, 1);
        assert!(wolverine.user_count.is_none());
    }

    #[test]
    fn skip_examples_are_capped_but_counts_are_complete() {
        let cfg = ResolverConfig {
            skip_examples_per_category: 2,
            ..config()
        };
        let mut agg = Aggregator::new(&cfg);
        let source = play("9", "1", &[], "");
        for _ in 0..5 {
            agg.add_skip(SkipRecord::for_play(SkipCategory::Villains, &source, "Filtered as villain"));
        }
        let report = agg.finish(&catalog(), &cfg);
        assert_eq!(report.skip_count(SkipCategory::Villains), 5);
        assert_eq!(report.skips[&SkipCategory::Villains].examples.len(), 2);
        assert_eq!(report.skip_count(SkipCategory::Scenarios), 0);
        assert_eq!(report.summary.skipped_player_records, 5);
    }

    #[test]
    fn player_records_are_conserved() {
        let plays = vec![
            play("1", "a", &["Justice／She-hulk", "Team 3", "Rhino"], "quiet night"),
            play("2", "a", &["AH - Wolverine", "", "Wolverin"], ""),
            play("3", "b", &[], ""),
            PlayRecord {
                players: None,
                ..play("4", "b", &[], "")
            },
        ];
        let report = analyze_plays(&catalog(), &NoTranslation, &config(), &plays);

        let hero_plays: u64 = report.heroes.iter().map(|e| e.play_count).sum();
        assert_eq!(
            hero_plays as usize + report.summary.skipped_player_records,
            report.stats.total_players
        );
        assert_eq!(report.stats.plays_analyzed, 4);
        assert_eq!(report.stats.plays_with_players, 2);
        assert_eq!(report.stats.total_players, 6);
        assert_eq!(report.stats.players_with_color, 5);
        assert_eq!(report.skip_count(SkipCategory::NoPlayers), 2);
        assert_eq!(report.summary.plays_without_usable_data, 2);
    }

    #[test]
    fn unmatched_names_carry_diagnostics() {
        let plays = vec![play("7", "u", &["Wolverin", "Wolverin"], "")];
        let report = analyze_plays(&catalog(), &NoTranslation, &config(), &plays);

        let entry = report.hero("Wolverin").unwrap();
        assert!(entry.statuses.contains(StatusTag::Unmatched));
        assert_eq!(entry.play_count, 2);

        assert_eq!(report.unmatched.len(), 1);
        let example = &report.unmatched[0];
        assert_eq!(example.trace.original, "Wolverin");
        assert_eq!(example.origin.play_id, "7");
        assert!(!example.looks_like_villain);
        assert_eq!(example.closest_hero.as_ref().map(|s| s.name.as_str()), Some("Wolverine"));
        assert_eq!(report.summary.resolved_percent, 0.0);
    }

    #[test]
    fn summary_counts_tags() {
        let plays = vec![
            play("1", "a", &["She-Hulk", "AH-Hulk"], ""),
            play("2", "a", &[""], "SHIELD campaign"),
        ];
        let report = analyze_plays(&catalog(), &NoTranslation, &config(), &plays);
        let summary = &report.summary;
        assert_eq!(summary.total_hero_plays, 4);
        assert_eq!(summary.official_plays, 4);
        assert_eq!(summary.altered_plays, 1);
        assert_eq!(summary.comment_plays, 2);
        assert_eq!(summary.unmatched_plays, 0);
        assert_eq!(summary.resolved_percent, 100.0);
        assert_eq!(summary.avg_hero_plays_per_play, 2.0);
    }

    #[test]
    fn multi_user_matches_sequential_order_and_counts_users() {
        let batches = vec![
            UserPlays {
                user_id: "a".into(),
                plays: vec![play("1", "a", &["Storm", "Hulk"], ""), play("2", "a", &["Hulk"], "")],
            },
            UserPlays {
                user_id: "b".into(),
                plays: vec![play("3", "", &["Storm", "Wolverine"], "")],
            },
        ];
        let report = analyze_users(&catalog(), &NoTranslation, &config(), &batches);

        let flat: Vec<PlayRecord> = batches.iter().flat_map(|b| b.plays.clone()).collect();
        let sequential = analyze_plays(&catalog(), &NoTranslation, &config(), &flat);
        let names = |r: &HeroReport| r.heroes.iter().map(|e| e.hero.clone()).collect::<Vec<_>>();
        assert_eq!(names(&report), names(&sequential));

        let storm = report.hero("Storm").unwrap();
        assert_eq!(storm.user_count, Some(2));
        assert_eq!(storm.avg_plays_per_user, Some(1.0));
        let hulk = report.hero("Hulk").unwrap();
        assert_eq!(hulk.user_count, Some(1));
        assert_eq!(hulk.avg_plays_per_user, Some(2.0));
    }

    #[test]
    fn report_serializes_to_json() {
        let plays = vec![play("1", "a", &["Storm"], "")];
        let report = analyze_plays(&catalog(), &NoTranslation, &config(), &plays);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["heroes"][0]["hero"], "Storm");
        assert_eq!(json["heroes"][0]["statuses"][0], "OFFICIAL");
        assert_eq!(json["skips"]["no_players"]["count"], 0);
        assert!(json["heroes"][0].get("user_count").is_none());
    }
}
