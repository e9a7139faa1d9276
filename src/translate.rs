//! Candidate translation.
//!
//! Stages: villain filter, manual lexicon, external backend for non-ASCII
//! text, otherwise pass-through. Results are cached per candidate for the
//! lifetime of one [`HeroTranslator`].

use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use crate::error::TranslateError;
use crate::lexicon::{TRANSLATED_NON_HERO_KEYWORDS, manual_translation, tagged_non_hero};
use crate::registry::NameRegistry;
use crate::villain::{FilterReason, classify};

/// External translation capability.
pub trait Translate: Send + Sync {
    /// Translate `text` to English. `source_lang` is an ISO 639-3 hint, or
    /// `None` to let the backend detect it.
    fn translate(&self, text: &str, source_lang: Option<&str>) -> Result<String, TranslateError>;
}

/// Backend used when no translator is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranslation;

impl Translate for NoTranslation {
    fn translate(&self, _text: &str, _source_lang: Option<&str>) -> Result<String, TranslateError> {
        Err(TranslateError::Unavailable)
    }
}

/// Outcome of translating one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// Passed through untranslated (ASCII input, or the backend failed).
    Unchanged(String),
    Translated(String),
    /// Names a villain or scenario. `after_translation` is set when the
    /// verdict came from the lexicon or the backend's output.
    Filtered {
        reason: FilterReason,
        after_translation: bool,
    },
}

impl Translation {
    /// Text to hand to the matcher, `None` when filtered.
    pub fn text(&self) -> Option<&str> {
        match self {
            Translation::Unchanged(text) | Translation::Translated(text) => Some(text),
            Translation::Filtered { .. } => None,
        }
    }

    pub fn was_translated(&self) -> bool {
        match self {
            Translation::Unchanged(_) => false,
            Translation::Translated(_) => true,
            Translation::Filtered { after_translation, .. } => *after_translation,
        }
    }

    /// `(text or None, was_translated)`.
    pub fn into_pair(self) -> (Option<String>, bool) {
        let translated = self.was_translated();
        match self {
            Translation::Unchanged(text) | Translation::Translated(text) => (Some(text), translated),
            Translation::Filtered { .. } => (None, translated),
        }
    }
}

/// ISO 639-3 code of the detected language, if detection is confident
/// enough to return anything.
pub fn detect_language(text: &str) -> Option<&'static str> {
    whatlang::detect(text).map(|info| info.lang().code())
}

/// Caching translator bound to one backend and one villain registry.
///
/// The cache is single-owner; concurrent callers each build their own.
pub struct HeroTranslator<'a> {
    backend: &'a dyn Translate,
    villains: &'a NameRegistry,
    delay: Duration,
    cache: HashMap<String, Translation>,
    backend_calls: usize,
}

impl<'a> HeroTranslator<'a> {
    pub fn new(backend: &'a dyn Translate, villains: &'a NameRegistry, delay: Duration) -> Self {
        Self {
            backend,
            villains,
            delay,
            cache: HashMap::new(),
            backend_calls: 0,
        }
    }

    /// Number of calls that actually reached the backend.
    pub fn backend_calls(&self) -> usize {
        self.backend_calls
    }

    pub fn translate(&mut self, candidate: &str) -> Translation {
        if let Some(hit) = self.cache.get(candidate) {
            return hit.clone();
        }
        let outcome = self.translate_uncached(candidate);
        self.cache.insert(candidate.to_string(), outcome.clone());
        outcome
    }

    fn translate_uncached(&mut self, candidate: &str) -> Translation {
        if let Some(reason) = classify(self.villains, candidate) {
            return Translation::Filtered {
                reason,
                after_translation: false,
            };
        }

        if let Some(value) = manual_translation(candidate) {
            if let Some(reason) = tagged_non_hero(value) {
                log::debug!("Lexicon marks '{}' as non-hero: {}", candidate, value);
                return Translation::Filtered {
                    reason,
                    after_translation: true,
                };
            }
            log::debug!("Lexicon translation: '{}' -> '{}'", candidate, value);
            return Translation::Translated(value.to_string());
        }

        if !candidate.is_ascii() {
            return self.call_backend(candidate);
        }
        Translation::Unchanged(candidate.to_string())
    }

    fn call_backend(&mut self, candidate: &str) -> Translation {
        let hint = detect_language(candidate);
        let result = self.backend.translate(candidate, hint);

        if let Err(TranslateError::Unavailable) = result {
            return Translation::Unchanged(candidate.to_string());
        }
        self.backend_calls += 1;
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        match result {
            Ok(text) => {
                let lower = text.to_lowercase();
                if let Some((keyword, reason)) = TRANSLATED_NON_HERO_KEYWORDS
                    .iter()
                    .find(|(keyword, _)| lower.contains(keyword))
                {
                    log::debug!(
                        "Translation of '{}' ('{}') contains '{}', filtering",
                        candidate,
                        text,
                        keyword
                    );
                    return Translation::Filtered {
                        reason: *reason,
                        after_translation: true,
                    };
                }
                log::debug!("Translated '{}' ({:?}) -> '{}'", candidate, hint, text);
                Translation::Translated(text)
            }
            Err(e) => {
                log::warn!("Translation failed for '{}': {}", candidate, e);
                Translation::Unchanged(candidate.to_string())
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::Translate;
    use crate::error::TranslateError;

    /// Backend with canned replies. Unknown inputs fail with a backend error.
    #[derive(Default)]
    pub struct ScriptedTranslator {
        replies: HashMap<String, String>,
        calls: AtomicUsize,
    }

    impl ScriptedTranslator {
        pub fn new(replies: &[(&str, &str)]) -> Self {
            Self {
                replies: replies
                    .iter()
                    .map(|(from, to)| (from.to_string(), to.to_string()))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Translate for ScriptedTranslator {
        fn translate(&self, text: &str, _source_lang: Option<&str>) -> Result<String, TranslateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.replies
                .get(text)
                .cloned()
                .ok_or_else(|| TranslateError::Backend(format!("no reply scripted for {text}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedTranslator;
    use super::*;

    fn villains() -> NameRegistry {
        NameRegistry::villains(vec!["Rhino".into(), "Ultron".into()])
    }

    #[test]
    fn villains_are_filtered_before_translation() {
        let backend = ScriptedTranslator::default();
        let reg = villains();
        let mut translator = HeroTranslator::new(&backend, &reg, Duration::ZERO);

        assert_eq!(
            translator.translate("Rhino"),
            Translation::Filtered {
                reason: FilterReason::Villain,
                after_translation: false
            }
        );
        assert_eq!(backend.calls(), 0);
    }

    #[test]
    fn lexicon_wins_over_backend() {
        let backend = ScriptedTranslator::default();
        let reg = villains();
        let mut translator = HeroTranslator::new(&backend, &reg, Duration::ZERO);

        assert_eq!(translator.translate("金刚狼"), Translation::Translated("Wolverine".into()));
        let filtered = translator.translate("红坦克");
        assert_eq!(filtered.text(), None);
        assert!(filtered.was_translated());
        assert_eq!(translator.translate("围攻").into_pair(), (None, true));
        assert_eq!(backend.calls(), 0);
    }

    #[test]
    fn ascii_passes_through() {
        let backend = ScriptedTranslator::default();
        let reg = villains();
        let mut translator = HeroTranslator::new(&backend, &reg, Duration::ZERO);

        let out = translator.translate("She-Hulk");
        assert_eq!(out, Translation::Unchanged("She-Hulk".into()));
        assert!(!out.was_translated());
        assert_eq!(backend.calls(), 0);
    }

    #[test]
    fn backend_results_are_cached() {
        let backend = ScriptedTranslator::new(&[("蚁人", "Ant-Man")]);
        let reg = villains();
        let mut translator = HeroTranslator::new(&backend, &reg, Duration::ZERO);

        assert_eq!(translator.translate("蚁人"), Translation::Translated("Ant-Man".into()));
        assert_eq!(translator.translate("蚁人"), Translation::Translated("Ant-Man".into()));
        assert_eq!(backend.calls(), 1);
        assert_eq!(translator.backend_calls(), 1);
    }

    #[test]
    fn non_hero_keywords_in_output_are_filtered() {
        let backend = ScriptedTranslator::new(&[("毁灭围城", "Siege of Doom")]);
        let reg = villains();
        let mut translator = HeroTranslator::new(&backend, &reg, Duration::ZERO);

        assert_eq!(
            translator.translate("毁灭围城"),
            Translation::Filtered {
                reason: FilterReason::Scenario,
                after_translation: true
            }
        );
    }

    #[test]
    fn backend_failure_degrades_to_original() {
        let backend = ScriptedTranslator::default();
        let reg = villains();
        let mut translator = HeroTranslator::new(&backend, &reg, Duration::ZERO);

        assert_eq!(translator.translate("Fénix"), Translation::Unchanged("Fénix".into()));
        assert_eq!(backend.calls(), 1);
    }

    #[test]
    fn missing_backend_is_not_counted_as_a_call() {
        let reg = villains();
        let mut translator = HeroTranslator::new(&NoTranslation, &reg, Duration::from_secs(60));

        assert_eq!(translator.translate("Fénix"), Translation::Unchanged("Fénix".into()));
        assert_eq!(translator.backend_calls(), 0);
    }
}
