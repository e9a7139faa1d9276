use thiserror::Error;

/// Failure of the external translation capability.
///
/// The translator never lets these escape: every variant degrades to the
/// untranslated candidate.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("no translation backend configured")]
    Unavailable,

    #[error("translation backend failed: {0}")]
    Backend(String),

    #[error("translation backend returned no text")]
    Empty,
}

#[derive(Debug, Error)]
pub enum HeroError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type HeroResult<T> = Result<T, HeroError>;
