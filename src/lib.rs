pub mod aggregate;
pub mod cleaner;
pub mod comments;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod matcher;
pub mod model;
pub mod registry;
pub mod resolver;
pub mod status;
pub mod translate;
pub mod villain;

pub use aggregate::{Aggregator, HeroReport, HeroUsageEntry, UserPlays, analyze_plays, analyze_users};
pub use cleaner::clean_hero_name;
pub use comments::{CommentHero, MentionCount, count_comment_mentions, parse_heroes_from_comments};
pub use config::ResolverConfig;
pub use error::{HeroError, HeroResult, TranslateError};
pub use matcher::{HeroMatch, match_to_official_hero};
pub use model::{PlayRecord, PlayerRecord, ResolutionResult, SkipRecord, distinct_user_ids};
pub use registry::{Catalog, NameRegistry};
pub use resolver::{PlayResolution, PlayerOutcome, Resolver};
pub use status::{SkipCategory, StatusSet, StatusTag};
pub use translate::{HeroTranslator, NoTranslation, Translate, Translation};
pub use villain::{FilterReason, is_villain_name};

#[cfg(feature = "python")]
mod python {
    use std::path::Path;
    use std::sync::OnceLock;

    use lazy_static::lazy_static;
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::aggregate::{self, UserPlays};
    use crate::config::ResolverConfig;
    use crate::error::TranslateError;
    use crate::model::PlayRecord;
    use crate::registry::Catalog;
    use crate::translate::{HeroTranslator, NoTranslation, Translate};
    use crate::{cleaner, comments, matcher, villain};

    /// Registries for the process (loaded once, reused)
    static CATALOG: OnceLock<Catalog> = OnceLock::new();

    lazy_static! {
        static ref EMPTY_CATALOG: Catalog = Catalog::default();
    }

    fn catalog() -> &'static Catalog {
        CATALOG.get().unwrap_or(&EMPTY_CATALOG)
    }

    /// Python callable `(text, source_lang) -> str | None` as a backend.
    /// Exceptions and `None` count as translation failures.
    struct PyTranslator(Py<PyAny>);

    impl Translate for PyTranslator {
        fn translate(&self, text: &str, source_lang: Option<&str>) -> Result<String, TranslateError> {
            Python::attach(|py| {
                let reply = self
                    .0
                    .bind(py)
                    .call1((text, source_lang))
                    .map_err(|e| TranslateError::Backend(e.to_string()))?;
                let translated: Option<String> = reply
                    .extract()
                    .map_err(|e: PyErr| TranslateError::Backend(e.to_string()))?;
                translated.ok_or(TranslateError::Empty)
            })
        }
    }

    fn backend(translator: Option<Py<PyAny>>) -> Box<dyn Translate> {
        match translator {
            Some(callable) => Box::new(PyTranslator(callable)),
            None => Box::new(NoTranslation),
        }
    }

    fn config(config_json: Option<String>) -> PyResult<ResolverConfig> {
        match config_json {
            Some(raw) => ResolverConfig::from_json(&raw).map_err(|e| PyValueError::new_err(e.to_string())),
            None => Ok(ResolverConfig::from_env()),
        }
    }

    fn from_json<T: serde::de::DeserializeOwned>(raw: &str, what: &str) -> PyResult<T> {
        serde_json::from_str(raw).map_err(|e| PyValueError::new_err(format!("Invalid {} JSON: {}", what, e)))
    }

    /// Load hero and villain registries from cached JSON name lists.
    /// Missing files load as empty registries. Returns false when the
    /// registries were already initialized and the paths were ignored.
    #[pyfunction]
    fn init_registries(hero_path: String, villain_path: String) -> bool {
        Catalog::load(Path::new(&hero_path), Path::new(&villain_path)).install(&CATALOG)
    }

    #[pyfunction]
    fn registry_stats() -> String {
        catalog().stats()
    }

    #[pyfunction]
    fn clean_hero_name(raw: String) -> String {
        cleaner::clean_hero_name(&raw)
    }

    #[pyfunction]
    fn is_villain_name(name: String) -> bool {
        villain::is_villain_name(&catalog().villains, &name)
    }

    /// Returns: (name, is_official, is_fuzzy, is_altered)
    #[pyfunction]
    fn match_to_official_hero(name: String) -> (String, bool, bool, bool) {
        let m = matcher::match_to_official_hero(&catalog().heroes, &name);
        (m.name, m.is_official, m.is_fuzzy, m.is_altered)
    }

    /// Returns: (translated or None when filtered, was_translated)
    #[pyfunction]
    #[pyo3(signature = (name, translator=None))]
    fn translate_hero_name(py: Python<'_>, name: String, translator: Option<Py<PyAny>>) -> (Option<String>, bool) {
        let backend = backend(translator);
        let delay = ResolverConfig::from_env().translation_delay();
        py.detach(|| {
            let mut translator = HeroTranslator::new(backend.as_ref(), &catalog().villains, delay);
            translator.translate(&name).into_pair()
        })
    }

    /// Returns: [(mention, matched, is_official, is_fuzzy, is_altered)]
    #[pyfunction]
    fn parse_heroes_from_comments(text: String) -> Vec<(String, String, bool, bool, bool)> {
        comments::parse_heroes_from_comments(&catalog().heroes, &text)
            .into_iter()
            .map(|found| {
                (
                    found.mention,
                    found.hero.name,
                    found.hero.is_official,
                    found.hero.is_fuzzy,
                    found.hero.is_altered,
                )
            })
            .collect()
    }

    /// Resolve a JSON list of plays; returns the report as JSON.
    #[pyfunction]
    #[pyo3(signature = (plays_json, translator=None, config_json=None))]
    fn analyze_plays(
        py: Python<'_>,
        plays_json: String,
        translator: Option<Py<PyAny>>,
        config_json: Option<String>,
    ) -> PyResult<String> {
        let plays: Vec<PlayRecord> = from_json(&plays_json, "plays")?;
        let config = config(config_json)?;
        let backend = backend(translator);
        let report = py.detach(|| aggregate::analyze_plays(catalog(), backend.as_ref(), &config, &plays));
        serde_json::to_string(&report).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Resolve a JSON list of `{user_id, plays}` batches in parallel; returns
    /// the report as JSON with per-hero user counts.
    #[pyfunction]
    #[pyo3(signature = (batches_json, translator=None, config_json=None))]
    fn analyze_users(
        py: Python<'_>,
        batches_json: String,
        translator: Option<Py<PyAny>>,
        config_json: Option<String>,
    ) -> PyResult<String> {
        let batches: Vec<UserPlays> = from_json(&batches_json, "user batches")?;
        let config = config(config_json)?;
        let backend = backend(translator);
        let report = py.detach(|| aggregate::analyze_users(catalog(), backend.as_ref(), &config, &batches));
        serde_json::to_string(&report).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Returns: [(mention_lower, count)] most frequent first
    #[pyfunction]
    fn count_comment_mentions(plays_json: String) -> PyResult<Vec<(String, usize)>> {
        let plays: Vec<PlayRecord> = from_json(&plays_json, "plays")?;
        Ok(comments::count_comment_mentions(&plays)
            .into_iter()
            .map(|m| (m.mention, m.count))
            .collect())
    }

    #[pyfunction]
    fn distinct_user_ids(plays_json: String) -> PyResult<Vec<String>> {
        let plays: Vec<PlayRecord> = from_json(&plays_json, "plays")?;
        Ok(crate::model::distinct_user_ids(&plays))
    }

    #[pymodule]
    fn rust_hero_resolve(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(init_registries, m)?)?;
        m.add_function(wrap_pyfunction!(registry_stats, m)?)?;
        m.add_function(wrap_pyfunction!(clean_hero_name, m)?)?;
        m.add_function(wrap_pyfunction!(is_villain_name, m)?)?;
        m.add_function(wrap_pyfunction!(match_to_official_hero, m)?)?;
        m.add_function(wrap_pyfunction!(translate_hero_name, m)?)?;
        m.add_function(wrap_pyfunction!(parse_heroes_from_comments, m)?)?;
        m.add_function(wrap_pyfunction!(analyze_plays, m)?)?;
        m.add_function(wrap_pyfunction!(analyze_users, m)?)?;
        m.add_function(wrap_pyfunction!(count_comment_mentions, m)?)?;
        m.add_function(wrap_pyfunction!(distinct_user_ids, m)?)?;
        Ok(())
    }
}
