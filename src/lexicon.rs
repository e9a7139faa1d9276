//! Process-wide lookup tables and pattern libraries.
//!
//! Everything here is read-only after first use. Pipeline code consults
//! these tables but never owns literals of its own, so entries can be added
//! without touching resolution logic.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use regex::Regex;

use crate::villain::FilterReason;

/// The five deckbuilding aspects. Noise in a color field, never a hero.
pub const ASPECTS: &[&str] = &["Justice", "Aggression", "Leadership", "Protection", "Pool"];

/// Substrings that mark a candidate as villain/scenario-like before any
/// translation is attempted.
pub const VILLAIN_MARKERS: &[(&str, FilterReason)] = &[
    ("vs ", FilterReason::Villain),
    (" vs", FilterReason::Villain),
    ("versus", FilterReason::Villain),
    ("villain", FilterReason::Villain),
    ("boss", FilterReason::Villain),
    ("enemy", FilterReason::Villain),
    ("scenario", FilterReason::Scenario),
    ("campaign", FilterReason::Scenario),
    ("mission", FilterReason::Scenario),
];

/// Words that, found in machine-translated text, mean the field named a
/// villain or scenario.
pub const TRANSLATED_NON_HERO_KEYWORDS: &[(&str, FilterReason)] = &[
    ("villain", FilterReason::Villain),
    ("boss", FilterReason::Villain),
    ("enemy", FilterReason::Villain),
    ("scheme", FilterReason::Scenario),
    ("escape", FilterReason::Scenario),
    ("siege", FilterReason::Scenario),
    ("attack", FilterReason::Scenario),
];

pub const VILLAIN_TAG: &str = "[VILLAIN]";
pub const SCENARIO_TAG: &str = "[SCENARIO]";

/// Exact-string translations, consulted before the external translator.
/// Values carrying a villain/scenario tag are filtered, not matched.
const MANUAL_TRANSLATIONS: &[(&str, &str)] = &[
    // Spanish
    ("Halcón", "Falcon"),
    ("Soldado de invierno", "Winter Soldier"),
    ("Araña", "Spider"),
    ("Hombre Araña", "Spider-Man"),
    ("Mujer Araña", "Spider-Woman"),
    ("Máquina de Guerra", "War Machine"),
    ("Ojo de Halcón", "Hawkeye"),
    ("Capitán América", "Captain America"),
    ("Hombre Hormiga", "Ant-Man"),
    ("Avispa", "Wasp"),
    ("Viuda Negra", "Black Widow"),
    ("Pantera Negra", "Black Panther"),
    ("Bruja Escarlata", "Scarlet Witch"),
    ("Visión", "Vision"),
    ("Thor", "Thor"),
    ("Hulk", "Hulk"),
    ("Iron Man", "Iron Man"),
    ("Capitana Marvel", "Captain Marvel"),
    ("Doctor Extraño", "Doctor Strange"),
    ("Estrella Señora", "Star-Lord"),
    ("Gamora", "Gamora"),
    ("Drax", "Drax"),
    ("Rocket", "Rocket"),
    ("Groot", "Groot"),
    // Chinese
    ("凤凰女", "Phoenix"),
    ("钢铁侠", "Iron Man"),
    ("美国队长", "Captain America"),
    ("蜘蛛侠", "Spider-Man"),
    ("蜘蛛女侠", "Spider-Woman"),
    ("金刚狼", "Wolverine"),
    ("雷神", "Thor"),
    ("绿巨人", "Hulk"),
    ("黑寡妇", "Black Widow"),
    ("鹰眼", "Hawkeye"),
    ("奇异博士", "Doctor Strange"),
    ("万磁王", "Magneto"),
    ("红坦克", "[VILLAIN] Juggernaut"),
    ("惊恶先生", "[VILLAIN] Mister Sinister"),
    ("纷争", "[SCENARIO] Strife"),
    ("围攻", "[SCENARIO] Siege"),
    ("逃出", "[SCENARIO] Escape"),
    ("毁灭博士", "[VILLAIN] Doctor Doom"),
    ("绿魔", "[VILLAIN] Green Goblin"),
];

/// Nicknames and alternate spellings, keyed and valued in normalized
/// (lower-case) form. Applied before variant generation.
const HERO_NORMALIZATIONS: &[(&str, &str)] = &[
    ("spiderman", "spidey"),
    ("spider-man", "spidey"),
    ("spider man", "spidey"),
    ("spider-woman", "spiderwoman"),
    ("spider woman", "spiderwoman"),
    ("spider-man - miles morales", "miles morales"),
    ("spider-man - miles morales (aggr", "miles morales"),
    ("ant-man", "ant man"),
    ("dr strange", "doctor strange"),
    ("dr. strange", "doctor strange"),
    ("cap marvel", "captain marvel"),
    ("capmarv", "captain marvel"),
    ("wolvie", "wolverine"),
    ("panther", "black panther"),
    ("nickfury", "nick fury"),
    ("drax the destroyer", "drax"),
];

/// Heroes known to be real but possibly absent from the canonical registry.
/// Last-resort match, always reported as fuzzy.
pub const KNOWN_HEROES: &[(&str, &str)] = &[
    ("falcon", "Falcon"),
    ("adam warlock", "Adam Warlock"),
    ("spectrum", "Spectrum"),
    ("miles morales", "Miles Morales"),
    ("black panther", "Black Panther"),
    ("captain marvel", "Captain Marvel"),
    ("drax", "Drax"),
    ("spidey", "Spider-Man"),
    ("spider-man", "Spider-Man"),
    ("spiderman", "Spider-Man"),
];

/// Generic play-session vocabulary that comment patterns tend to capture.
const COMMENT_STOP_WORDS: &[&str] = &[
    "with", "and", "the", "vs", "against", "lose", "lost", "win", "won", "play", "played",
    "game", "solo", "duo", "team", "mode", "standard", "expert", "heroic", "campaign",
    "scenario", "deck", "card", "pack", "experto", "normal", "oturum", "kazandik", "kazandık",
];

lazy_static! {
    pub static ref MANUAL_TRANSLATION_MAP: HashMap<&'static str, &'static str> =
        MANUAL_TRANSLATIONS.iter().copied().collect();

    pub static ref HERO_NORMALIZATION_MAP: HashMap<&'static str, &'static str> =
        HERO_NORMALIZATIONS.iter().copied().collect();

    pub static ref STOP_WORDS: HashSet<&'static str> = COMMENT_STOP_WORDS.iter().copied().collect();

    /// Campaign name patterns (several languages) and the heroes that ship
    /// with each campaign. First match wins.
    pub static ref CAMPAIGNS: Vec<(Regex, &'static [&'static str])> = {
        const SHIELD: &[&str] = &["Agent 13", "Nick Fury"];
        vec![
            (Regex::new(r"(?i)\b(?:shield|s\.?h\.?i\.?e\.?l\.?d\.?)\s+campaign\b").unwrap(), SHIELD),
            (Regex::new(r"(?i)\bagents?\s+of\s+shield\b").unwrap(), SHIELD),
            (Regex::new(r"(?i)\bmutant\s+genesis\b").unwrap(), &["Wolverine", "Storm", "Cyclops"][..]),
            (Regex::new(r"(?i)\bnext\s+evolution\b").unwrap(), &["Colossus", "Shadowcat"][..]),
            (Regex::new(r"(?i)\bsinister\s+motives\b").unwrap(), &["Ghost-Spider", "Miles Morales"][..]),
            (Regex::new(r"(?i)\bmad\s+titan'?s?\s+shadow\b").unwrap(), &["Adam Warlock", "Spectrum"][..]),
            (Regex::new(r"(?i)\bgalaxy'?s?\s+most\s+wanted\b").unwrap(), &["Groot", "Rocket Raccoon"][..]),
            (Regex::new(r"(?i)\brise\s+of\s+red\s+skull\b").unwrap(), &["Hawkeye", "Spider-Woman"][..]),
            (Regex::new(r"(?i)\bhood\b.*\bcampaign\b").unwrap(), &["Captain America", "Iron Man"][..]),
            // French
            (Regex::new(r"(?i)\bcampagne\s+shield\b").unwrap(), SHIELD),
            (Regex::new(r"(?i)\bcampagne\s+s\.?h\.?i\.?e\.?l\.?d\.?").unwrap(), SHIELD),
            // Spanish
            (Regex::new(r"(?i)\bcampaña\s+shield\b").unwrap(), SHIELD),
            (Regex::new(r"(?i)\bcampaña\s+s\.?h\.?i\.?e\.?l\.?d\.?").unwrap(), SHIELD),
            // German
            (Regex::new(r"(?i)\bschild\s+kampagne\b").unwrap(), SHIELD),
            (Regex::new(r"(?i)\bs\.?h\.?i\.?e\.?l\.?d\.?\s+kampagne\b").unwrap(), SHIELD),
        ]
    };

    /// Villain mentions in comments. Diagnostic only; never yields heroes.
    /// `None` marks the "against X" context pattern whose capture is the
    /// villain candidate itself.
    pub static ref VILLAIN_MENTIONS: Vec<(Regex, Option<&'static str>)> = vec![
        (Regex::new(r"(?i)\b(?:against|vs\.?|versus|contre|contra)\s+([a-z\s-]+)\b").unwrap(), None),
        (Regex::new(r"(?i)\b(batroc|bartoc)\b").unwrap(), Some("Batroc")),
        (Regex::new(r"(?i)\b(red skull|crâne rouge|calavera roja)\b").unwrap(), Some("Red Skull")),
        (Regex::new(r"(?i)\b(green goblin|goblin vert|duende verde)\b").unwrap(), Some("Green Goblin")),
        (Regex::new(r"(?i)\b(ultron)\b").unwrap(), Some("Ultron")),
        (Regex::new(r"(?i)\b(rhino|rhinocéros|rinoceronte)\b").unwrap(), Some("Rhino")),
        (Regex::new(r"(?i)\b(klaw|garra)\b").unwrap(), Some("Klaw")),
        (Regex::new(r"(?i)\b(taskmaster|supervisor de tareas)\b").unwrap(), Some("Taskmaster")),
        (Regex::new(r"(?i)\b(crossbones|huesos cruzados)\b").unwrap(), Some("Crossbones")),
        (Regex::new(r"(?i)\b(absorbing man|hombre absorbente)\b").unwrap(), Some("Absorbing Man")),
        (Regex::new(r"(?i)\b(titania)\b").unwrap(), Some("Titania")),
        (Regex::new(r"(?i)\b(wrecker|demoledor)\b").unwrap(), Some("Wrecker")),
        (Regex::new(r"(?i)\b(thunderball)\b").unwrap(), Some("Thunderball")),
        (Regex::new(r"(?i)\b(piledriver|piloteador)\b").unwrap(), Some("Piledriver")),
        (Regex::new(r"(?i)\b(bulldozer)\b").unwrap(), Some("Bulldozer")),
        (Regex::new(r"(?i)\b(nebula)\b").unwrap(), Some("Nebula")),
        (Regex::new(r"(?i)\b(ronan|ronan el acusador)\b").unwrap(), Some("Ronan")),
        (Regex::new(r"(?i)\b(collector|coleccionista)\b").unwrap(), Some("Collector")),
        (Regex::new(r"(?i)\b(drang)\b").unwrap(), Some("Drang")),
        (Regex::new(r"(?i)\b(ebony maw)\b").unwrap(), Some("Ebony Maw")),
        (Regex::new(r"(?i)\b(thanos)\b").unwrap(), Some("Thanos")),
        (Regex::new(r"(?i)\b(magneto|magnéto)\b").unwrap(), Some("Magneto")),
        (Regex::new(r"(?i)\b(sentinel|centinela)\b").unwrap(), Some("Sentinel")),
        (Regex::new(r"(?i)\b(mystique|mística)\b").unwrap(), Some("Mystique")),
        (Regex::new(r"(?i)\b(sabretooth|dientes de sable)\b").unwrap(), Some("Sabretooth")),
        (Regex::new(r"(?i)\b(juggernaut|mole)\b").unwrap(), Some("Juggernaut")),
        (Regex::new(r"(?i)\b(apocalypse|apocalipsis)\b").unwrap(), Some("Apocalypse")),
        (Regex::new(r"(?i)\b(mojo)\b").unwrap(), Some("MojoMania")),
        (Regex::new(r"(?i)\b(spiral)\b").unwrap(), Some("Spiral")),
        (Regex::new(r"(?i)\b(dark beast|bestia oscura)\b").unwrap(), Some("Dark Beast")),
    ];

    /// Direct hero mentions: one pattern per hero, alternation over its
    /// aliases. The label is for logging; the captured span is what gets
    /// matched.
    pub static ref HERO_MENTIONS: Vec<(&'static str, Regex)> = vec![
        ("Spider-Man", Regex::new(r"(?i)\b(spider-?man|spiderman)\b").unwrap()),
        ("Iron Man", Regex::new(r"(?i)\b(iron-?man|ironman)\b").unwrap()),
        ("Captain America", Regex::new(r"(?i)\b(captain america|cap america|steve rogers)\b").unwrap()),
        ("Black Widow", Regex::new(r"(?i)\b(black widow|natasha)\b").unwrap()),
        ("She-Hulk", Regex::new(r"(?i)\b(she-?hulk|jennifer walters)\b").unwrap()),
        ("Ms. Marvel", Regex::new(r"(?i)\b(ms\.?\s*marvel|kamala|kamala khan)\b").unwrap()),
        ("Doctor Strange", Regex::new(r"(?i)\b(doctor strange|dr\.?\s*strange|stephen strange)\b").unwrap()),
        ("Captain Marvel", Regex::new(r"(?i)\b(captain marvel|carol danvers)\b").unwrap()),
        ("Ant-Man", Regex::new(r"(?i)\b(ant-?man|antman|scott lang)\b").unwrap()),
        ("Wasp", Regex::new(r"(?i)\b(wasp|janet|hope van dyne)\b").unwrap()),
        ("Quicksilver", Regex::new(r"(?i)\b(quicksilver|pietro)\b").unwrap()),
        ("Scarlet Witch", Regex::new(r"(?i)\b(scarlet witch|wanda|wanda maximoff)\b").unwrap()),
        ("Hawkeye", Regex::new(r"(?i)\b(hawkeye|clint barton)\b").unwrap()),
        ("Black Panther", Regex::new(r"(?i)\b(black panther|t'?challa)\b").unwrap()),
        ("Spider-Woman", Regex::new(r"(?i)\b(spider-?woman|jessica drew)\b").unwrap()),
        ("Valkyrie", Regex::new(r"(?i)\b(valkyrie|brunnhilde)\b").unwrap()),
        ("Vision", Regex::new(r"(?i)\b(vision|the vision)\b").unwrap()),
        ("War Machine", Regex::new(r"(?i)\b(war machine|james rhodes|rhodey)\b").unwrap()),
        ("Falcon", Regex::new(r"(?i)\b(falcon|sam wilson)\b").unwrap()),
        ("Winter Soldier", Regex::new(r"(?i)\b(winter soldier|bucky|bucky barnes)\b").unwrap()),
        ("Hulk", Regex::new(r"(?i)\b(hulk|bruce banner)\b").unwrap()),
        ("Thor", Regex::new(r"(?i)\b(thor|god of thunder)\b").unwrap()),
        ("Wolverine", Regex::new(r"(?i)\b(wolverine|logan|james howlett)\b").unwrap()),
        ("Storm", Regex::new(r"(?i)\b(storm|ororo)\b").unwrap()),
        ("Cyclops", Regex::new(r"(?i)\b(cyclops|scott summers)\b").unwrap()),
        ("Phoenix", Regex::new(r"(?i)\b(phoenix|jean grey)\b").unwrap()),
        ("Colossus", Regex::new(r"(?i)\b(colossus|piotr)\b").unwrap()),
        ("Nightcrawler", Regex::new(r"(?i)\b(nightcrawler|kurt wagner)\b").unwrap()),
        ("Shadowcat", Regex::new(r"(?i)\b(shadowcat|kitty pryde)\b").unwrap()),
        ("Gambit", Regex::new(r"(?i)\b(gambit|remy lebeau)\b").unwrap()),
        ("Rogue", Regex::new(r"(?i)\b(rogue|marie)\b").unwrap()),
        ("Deadpool", Regex::new(r"(?i)\b(deadpool|wade wilson)\b").unwrap()),
        ("Cable", Regex::new(r"(?i)\b(cable|nathan summers)\b").unwrap()),
        ("Domino", Regex::new(r"(?i)\b(domino|neena thurman)\b").unwrap()),
        ("Psylocke", Regex::new(r"(?i)\b(psylocke|betsy braddock)\b").unwrap()),
        ("Angel", Regex::new(r"(?i)\b(angel|warren worthington)\b").unwrap()),
        ("Iceman", Regex::new(r"(?i)\b(iceman|bobby drake)\b").unwrap()),
        ("Magik", Regex::new(r"(?i)\b(magik|illyana rasputin)\b").unwrap()),
        ("Nova", Regex::new(r"(?i)\b(nova|richard rider|sam alexander)\b").unwrap()),
        ("Spider-Ham", Regex::new(r"(?i)\b(spider-?ham|peter porker)\b").unwrap()),
        ("Ghost-Spider", Regex::new(r"(?i)\b(ghost-?spider|spider-?gwen|gwen stacy)\b").unwrap()),
        ("Miles Morales", Regex::new(r"(?i)\b(miles morales|miles|ultimate spider-?man)\b").unwrap()),
        ("Silk", Regex::new(r"(?i)\b(silk|cindy moon)\b").unwrap()),
        ("Spider-Man 2099", Regex::new(r"(?i)\b(spider-?man 2099|miguel o'?hara)\b").unwrap()),
        ("Venom", Regex::new(r"(?i)\b(venom|eddie brock)\b").unwrap()),
        ("Groot", Regex::new(r"(?i)\b(groot|i am groot)\b").unwrap()),
        ("Rocket Raccoon", Regex::new(r"(?i)\b(rocket raccoon|rocket)\b").unwrap()),
        ("Star-Lord", Regex::new(r"(?i)\b(star-?lord|peter quill)\b").unwrap()),
        ("Gamora", Regex::new(r"(?i)\b(gamora|deadliest woman)\b").unwrap()),
        ("Drax", Regex::new(r"(?i)\b(drax|the destroyer)\b").unwrap()),
        ("Nebula", Regex::new(r"(?i)\b(nebula|blue meanie)\b").unwrap()),
        ("Adam Warlock", Regex::new(r"(?i)\b(adam warlock|adam)\b").unwrap()),
        ("Maria Hill", Regex::new(r"(?i)\b(maria hill|agent hill)\b").unwrap()),
        ("Ironheart", Regex::new(r"(?i)\b(ironheart|riri williams)\b").unwrap()),
        ("X-23", Regex::new(r"(?i)\b(x-?23|laura kinney)\b").unwrap()),
        ("Jubilee", Regex::new(r"(?i)\b(jubilee|jubilation lee)\b").unwrap()),
        ("Bishop", Regex::new(r"(?i)\b(bishop|lucas bishop)\b").unwrap()),
        // community nicknames
        ("Captain Marvel", Regex::new(r"(?i)\b(cap marvel|capmarv)\b").unwrap()),
        ("Black Panther", Regex::new(r"(?i)\b(panther)\b").unwrap()),
        ("Spider-Man", Regex::new(r"(?i)\b(spidey)\b").unwrap()),
        ("Wolverine", Regex::new(r"(?i)\b(wolverine|wolvie|logan)\b").unwrap()),
    ];

    /// Syntactic shapes that frame a hero name without naming it.
    pub static ref GENERIC_MENTIONS: Vec<(&'static str, Regex)> = vec![
        ("hero vs villain", Regex::new(r"(?i)\b([a-z\s-]+)\s+vs?\s+[a-z\s-]+\b").unwrap()),
        ("hero (aspect)", Regex::new(r"(?i)\b([a-z\s-]+)\s*\([^)]*(?:aggression|justice|protection|leadership|pool)[^)]*\)").unwrap()),
        ("hero - aspect", Regex::new(r"(?i)\b([a-z\s-]+)\s*[-–]\s*(?:aggression|justice|protection|leadership|pool)\b").unwrap()),
        ("aspect/hero", Regex::new(r"(?i)(?:aggression|justice|protection|leadership|pool)[／/]([a-z\s-]+)").unwrap()),
        ("hero/aspect", Regex::new(r"(?i)([a-z\s-]+)[／/](?:aggression|justice|protection|leadership|pool)").unwrap()),
        ("hero & hero", Regex::new(r"(?i)\b([a-z\s-]+)\s*[&+]\s*([a-z\s-]+)").unwrap()),
        ("hero, hero", Regex::new(r"(?i)\b([a-z\s-]+),\s*([a-z\s-]+)(?:,\s*([a-z\s-]+))?").unwrap()),
        ("hero x villain", Regex::new(r"(?i)\b([a-z\s-]+)\s+x\s+[a-z\s-]+\b").unwrap()),
    ];
}

/// Manual translation for an exact candidate string.
pub fn manual_translation(candidate: &str) -> Option<&'static str> {
    MANUAL_TRANSLATION_MAP.get(candidate).copied()
}

/// Classify a lexicon value: `Some(reason)` when it names a non-hero.
pub fn tagged_non_hero(value: &str) -> Option<FilterReason> {
    if value.starts_with(VILLAIN_TAG) {
        Some(FilterReason::Villain)
    } else if value.starts_with(SCENARIO_TAG) {
        Some(FilterReason::Scenario)
    } else {
        None
    }
}

pub fn is_aspect(text: &str) -> bool {
    let text = text.trim();
    ASPECTS.iter().any(|a| a.eq_ignore_ascii_case(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_tables_compile() {
        assert!(!CAMPAIGNS.is_empty());
        assert!(!VILLAIN_MENTIONS.is_empty());
        assert!(!HERO_MENTIONS.is_empty());
        assert!(!GENERIC_MENTIONS.is_empty());
    }

    #[test]
    fn lexicon_tags_non_heroes() {
        let value = manual_translation("红坦克").unwrap();
        assert_eq!(tagged_non_hero(value), Some(FilterReason::Villain));

        let value = manual_translation("围攻").unwrap();
        assert_eq!(tagged_non_hero(value), Some(FilterReason::Scenario));

        let value = manual_translation("金刚狼").unwrap();
        assert_eq!(value, "Wolverine");
        assert_eq!(tagged_non_hero(value), None);
    }

    #[test]
    fn normalization_targets_are_lower_case() {
        for (from, to) in HERO_NORMALIZATIONS {
            assert_eq!(*from, from.to_lowercase());
            assert_eq!(*to, to.to_lowercase());
        }
    }

    #[test]
    fn aspects_match_case_insensitively() {
        assert!(is_aspect("justice"));
        assert!(is_aspect(" POOL "));
        assert!(!is_aspect("Hulk"));
    }
}
