use std::path::PathBuf;

use thiserror::Error;

use super::TranslationWarning;
use crate::config::InvalidLocale;

/// Fatal lookup errors.
///
/// These signal a programming error in the caller (an unchecked locale or a
/// mistyped key) and are never recovered from by falling back to another
/// locale.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// The locale is outside the configured set.
    #[error("Locale is not valid: \"{0}\"")]
    InvalidLocale(String),
    /// The locale is valid but this table has no entry for it.
    #[error("Missing locale: {0}")]
    LocaleNotFound(String),
    /// The sentence has no entry for the key.
    #[error("Missing translation: \"{0}\"")]
    KeyNotFound(String),
    /// Construction in strict mode produced warnings.
    #[error("Translation table rejected in strict mode:\n{}", format_warnings(.0))]
    Strict(Vec<TranslationWarning>),
}

impl TranslationError {
    /// `true` for both the missing-locale and missing-key cases.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::LocaleNotFound(_) | Self::KeyNotFound(_))
    }
}

impl From<InvalidLocale> for TranslationError {
    fn from(err: InvalidLocale) -> Self {
        Self::InvalidLocale(err.0)
    }
}

/// One warning per line, indented.
fn format_warnings(warnings: &[TranslationWarning]) -> String {
    warnings.iter().map(|warning| format!("  - {warning}")).collect::<Vec<_>>().join("\n")
}

/// Errors raised while reading translation files from disk.
#[derive(Error, Debug)]
pub enum TranslationLoadError {
    #[error("Failed to read translation file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse translation file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Translation file {path:?} must be an object keyed by locale")]
    NotAnObject { path: PathBuf },

    #[error("Translation file {path:?}: entry for locale '{locale}' must be an object")]
    LocaleNotAnObject { path: PathBuf, locale: String },

    #[error(transparent)]
    Rejected(#[from] TranslationError),
}
