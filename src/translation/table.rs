use std::collections::{
    BTreeMap,
    BTreeSet,
};
use std::sync::Arc;

use super::warning::check_key_consistency;
use super::{
    Sentence,
    TranslationError,
    TranslationWarning,
};
use crate::config::LocaleConfig;

/// Immutable locale → [`Sentence`] table.
///
/// Both advisory checks (key consistency and locale validity) run once,
/// when the table is built. Lookups never fall back to another locale.
#[derive(Debug, Clone)]
pub struct Translation {
    /// Shared locale configuration used to classify lookups.
    config: Arc<LocaleConfig>,
    /// Sentences keyed by locale, exactly as supplied.
    data: BTreeMap<String, Sentence>,
}

impl Translation {
    /// Build the table and log any advisory warnings.
    #[must_use]
    pub fn new<I, L>(config: Arc<LocaleConfig>, data: I) -> Self
    where
        I: IntoIterator<Item = (L, Sentence)>,
        L: Into<String>,
    {
        let (translation, warnings) = Self::with_warnings(config, data);
        for warning in &warnings {
            warning.log();
        }
        translation
    }

    /// Build the table and hand the warnings back instead of logging them.
    ///
    /// Construction always succeeds; an empty warning list means the data is
    /// consistent.
    #[must_use]
    pub fn with_warnings<I, L>(
        config: Arc<LocaleConfig>,
        data: I,
    ) -> (Self, Vec<TranslationWarning>)
    where
        I: IntoIterator<Item = (L, Sentence)>,
        L: Into<String>,
    {
        let data: BTreeMap<String, Sentence> =
            data.into_iter().map(|(locale, sentence)| (locale.into(), sentence)).collect();

        let mut warnings = Vec::new();

        if let Some(warning) = check_key_consistency(
            data.iter()
                .map(|(locale, sentence)| (locale.as_str(), sentence.keys().into_iter().collect::<BTreeSet<_>>())),
        ) {
            warnings.push(warning);
        }

        let invalid_locales: Vec<String> =
            data.keys().filter(|locale| !config.is_valid_locale(locale)).cloned().collect();
        if !invalid_locales.is_empty() {
            warnings.push(TranslationWarning::InvalidLocales(invalid_locales));
        }

        tracing::debug!(
            locales = data.len(),
            warnings = warnings.len(),
            "Built translation table"
        );

        (Self { config, data }, warnings)
    }

    /// Build the table, rejecting it if any warning was produced.
    ///
    /// # Errors
    /// [`TranslationError::Strict`] carrying every warning.
    pub fn strict<I, L>(config: Arc<LocaleConfig>, data: I) -> Result<Self, TranslationError>
    where
        I: IntoIterator<Item = (L, Sentence)>,
        L: Into<String>,
    {
        let (translation, warnings) = Self::with_warnings(config, data);
        if warnings.is_empty() { Ok(translation) } else { Err(TranslationError::Strict(warnings)) }
    }

    /// Whether this table has an entry for `locale`, valid or not.
    #[must_use]
    pub fn has(&self, locale: &str) -> bool {
        self.data.contains_key(locale)
    }

    /// Locales present in this table, sorted.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    #[must_use]
    pub fn config(&self) -> &LocaleConfig {
        &self.config
    }

    /// The sentence for `locale`; callers then pick strings with
    /// [`Sentence::insert`], as in `t.sentence("en")?.insert("home")`.
    ///
    /// # Errors
    /// - [`TranslationError::InvalidLocale`] when the locale is outside the
    ///   configured set, even if the table happens to contain it
    /// - [`TranslationError::LocaleNotFound`] when the locale is valid but
    ///   absent from this table
    pub fn sentence(&self, locale: &str) -> Result<&Sentence, TranslationError> {
        self.config.ensure_valid_locale(locale)?;
        self.data.get(locale).ok_or_else(|| TranslationError::LocaleNotFound(locale.to_string()))
    }
}
