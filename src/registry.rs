//! Canonical hero and villain/scenario name registries.
//!
//! Each registry keeps the ordered official list plus a normalized-key index
//! (lower-cased, with hyphen/period/space variants) pointing back at the
//! official spelling. Built once per run, read-only afterwards.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::HeroResult;

/// Official names plus their normalized lookup index.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    names: Vec<String>,
    exact: HashSet<String>,
    index: HashMap<String, String>,
}

impl NameRegistry {
    /// Registry of playable heroes.
    pub fn heroes(names: Vec<String>) -> Self {
        Self::build(names, false)
    }

    /// Registry of villains and scenarios. Multi-stage villains ("Rhino 1/2",
    /// "Klaw A") are also reachable by their first word.
    pub fn villains(names: Vec<String>) -> Self {
        Self::build(names, true)
    }

    fn build(names: Vec<String>, index_stage_base: bool) -> Self {
        let mut index = HashMap::new();
        for name in &names {
            for key in normalized_keys(name) {
                // First registry entry to claim a key keeps it.
                index.entry(key).or_insert_with(|| name.clone());
            }
            if index_stage_base {
                let lower = name.to_lowercase();
                if lower.contains(" 1/") || lower.contains(" 2/") || lower.ends_with(" a") {
                    if let Some(base) = lower.split(' ').next().filter(|b| !b.is_empty()) {
                        index.entry(base.to_string()).or_insert_with(|| name.clone());
                    }
                }
            }
        }
        let exact = names.iter().cloned().collect();
        Self { names, exact, index }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Exact, case-sensitive membership.
    pub fn contains_exact(&self, name: &str) -> bool {
        self.exact.contains(name)
    }

    /// Look up an already-normalized key.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(String::as_str)
    }
}

/// Index keys for one official name, in insertion order.
pub fn normalized_keys(name: &str) -> [String; 5] {
    let lower = name.to_lowercase();
    [
        lower.clone(),
        lower.replace('-', " "),
        lower.replace('.', ""),
        lower.replace(' ', ""),
        lower.replace(['-', '.', ' '], ""),
    ]
}

/// Both registries for one run.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub heroes: NameRegistry,
    pub villains: NameRegistry,
}

impl Catalog {
    pub fn new(heroes: Vec<String>, villains: Vec<String>) -> Self {
        Self {
            heroes: NameRegistry::heroes(heroes),
            villains: NameRegistry::villains(villains),
        }
    }

    /// Load both registries from cached JSON arrays. A missing or unreadable
    /// file yields an empty registry so that resolution degrades to
    /// "everything unmatched" instead of failing.
    pub fn load(hero_path: &Path, villain_path: &Path) -> Self {
        let catalog = Self::new(load_names(hero_path), load_names(villain_path));
        log::info!("{}", catalog.stats());
        catalog
    }

    /// Store into a process-wide slot. Returns false, leaving the slot
    /// untouched, when it was already filled.
    pub fn install(self, slot: &OnceLock<Catalog>) -> bool {
        let stored = slot.set(self).is_ok();
        if !stored {
            log::warn!("Registries already initialized");
        }
        stored
    }

    pub fn stats(&self) -> String {
        format!(
            "Registries loaded: heroes={}, villains={}",
            self.heroes.len(),
            self.villains.len()
        )
    }
}

/// Parse a JSON array of names.
pub fn names_from_json(raw: &str) -> HeroResult<Vec<String>> {
    Ok(serde_json::from_str(raw)?)
}

/// Read a JSON name list, logging and returning an empty list on failure.
pub fn load_names(path: &Path) -> Vec<String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("Failed to read name list {}: {}", path.display(), e);
            return Vec::new();
        }
    };
    match names_from_json(&content) {
        Ok(names) => {
            log::debug!("Loaded {} names from {}", names.len(), path.display());
            names
        }
        Err(e) => {
            log::warn!("Failed to parse name list {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn hero_index_covers_punctuation_variants() {
        let reg = NameRegistry::heroes(names(&["She-Hulk", "Dr. Strange", "Star-Lord"]));
        assert_eq!(reg.lookup("she-hulk"), Some("She-Hulk"));
        assert_eq!(reg.lookup("she hulk"), Some("She-Hulk"));
        assert_eq!(reg.lookup("shehulk"), Some("She-Hulk"));
        assert_eq!(reg.lookup("dr strange"), Some("Dr. Strange"));
        assert_eq!(reg.lookup("drstrange"), Some("Dr. Strange"));
        assert_eq!(reg.lookup("starlord"), Some("Star-Lord"));
        assert!(reg.lookup("She-Hulk").is_none());
    }

    #[test]
    fn exact_membership_is_case_sensitive() {
        let reg = NameRegistry::heroes(names(&["Wolverine"]));
        assert!(reg.contains_exact("Wolverine"));
        assert!(!reg.contains_exact("wolverine"));
    }

    #[test]
    fn first_entry_wins_normalized_collisions() {
        let reg = NameRegistry::heroes(names(&["Ant-Man", "Ant Man"]));
        assert_eq!(reg.lookup("ant man"), Some("Ant-Man"));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn villain_stages_index_first_word() {
        let reg = NameRegistry::villains(names(&["Rhino 1/2", "Klaw A", "Red Skull"]));
        assert_eq!(reg.lookup("rhino"), Some("Rhino 1/2"));
        assert_eq!(reg.lookup("klaw"), Some("Klaw A"));
        assert!(reg.lookup("red").is_none());
    }

    #[test]
    fn missing_file_yields_empty_registry() {
        let catalog = Catalog::load(
            Path::new("does/not/exist/heroes.json"),
            Path::new("does/not/exist/villains.json"),
        );
        assert!(catalog.heroes.is_empty());
        assert!(catalog.villains.is_empty());
        assert_eq!(catalog.stats(), "Registries loaded: heroes=0, villains=0");
    }

    #[test]
    fn names_parse_from_json_array() {
        assert_eq!(names_from_json(r#"["Hulk","Thor"]"#).unwrap(), names(&["Hulk", "Thor"]));
        assert!(names_from_json(r#"{"Hulk":1}"#).is_err());
    }

    #[test]
    fn second_install_is_rejected() {
        let slot = OnceLock::new();
        assert!(Catalog::new(names(&["Hulk"]), Vec::new()).install(&slot));
        assert!(!Catalog::new(names(&["Thor", "Storm"]), Vec::new()).install(&slot));

        let kept = slot.get().unwrap();
        assert_eq!(kept.heroes.len(), 1);
        assert!(kept.heroes.contains_exact("Hulk"));
    }
}
