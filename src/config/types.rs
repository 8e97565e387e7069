use std::collections::HashSet;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "content.excludePatterns[0]")
    pub field_path: String,
    /// Human readable message
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// バリデーションエラーを番号付きで整形
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Returned when a locale is not part of the configured set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Locale is not valid: \"{0}\"")]
pub struct InvalidLocale(pub String);

/// The process-wide locale configuration.
///
/// Built once and shared (usually behind an `Arc`) by every translation
/// table and content repository, so all locale checks agree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocaleConfig {
    /// Ordered set of accepted locale identifiers.
    pub valid_locales: Vec<String>,
    /// Locale used when none is requested. Must be one of `valid_locales`.
    pub default_locale: String,
}

impl LocaleConfig {
    #[must_use]
    pub fn new<I, S>(valid_locales: I, default_locale: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            valid_locales: valid_locales.into_iter().map(Into::into).collect(),
            default_locale: default_locale.into(),
        }
    }

    #[must_use]
    pub fn is_valid_locale(&self, locale: &str) -> bool {
        self.valid_locales.iter().any(|valid| valid == locale)
    }

    /// # Errors
    /// Returns [`InvalidLocale`] when `locale` is outside the configured set.
    pub fn ensure_valid_locale(&self, locale: &str) -> Result<(), InvalidLocale> {
        if self.is_valid_locale(locale) { Ok(()) } else { Err(InvalidLocale(locale.to_string())) }
    }

    #[must_use]
    pub fn valid_locales(&self) -> &[String] {
        &self.valid_locales
    }

    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// # Errors
    /// - No locale configured
    /// - Empty or duplicated locale
    /// - Default locale outside the valid set
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        self.collect_errors("", &mut errors);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    fn collect_errors(&self, prefix: &str, errors: &mut Vec<ValidationError>) {
        if self.valid_locales.is_empty() {
            errors.push(ValidationError::new(
                format!("{prefix}validLocales"),
                "At least one locale is required. Example: [\"en\", \"ja\"]",
            ));
        }

        let mut seen = HashSet::new();
        for (index, locale) in self.valid_locales.iter().enumerate() {
            if locale.is_empty() {
                errors.push(ValidationError::new(
                    format!("{prefix}validLocales[{index}]"),
                    "The locale cannot be empty",
                ));
            } else if !seen.insert(locale.as_str()) {
                errors.push(ValidationError::new(
                    format!("{prefix}validLocales[{index}]"),
                    format!("Duplicate locale '{locale}'"),
                ));
            }
        }

        if !self.is_valid_locale(&self.default_locale) {
            errors.push(ValidationError::new(
                format!("{prefix}defaultLocale"),
                format!(
                    "The default locale '{}' must be one of validLocales [{}]",
                    self.default_locale,
                    self.valid_locales.join(", ")
                ),
            ));
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::new(["ja", "en"], "en")
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogSettings {
    pub locales: LocaleConfig,
    pub content: ContentConfig,
    pub translations: TranslationsConfig,

    /// Escalate advisory translation warnings to errors (CI builds).
    pub strict: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentConfig {
    /// Content root, relative to the workspace. Holds one directory per locale.
    pub root: String,
    /// Content file extension without the leading dot.
    pub extension: String,
    /// Globs matched against paths relative to a locale directory.
    pub exclude_patterns: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self { root: "posts".to_string(), extension: "mdx".to_string(), exclude_patterns: vec![] }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationsConfig {
    /// Directory of translation JSON files, relative to the workspace.
    pub directory: String,
    /// Joins nested JSON keys into flat translation keys.
    pub key_separator: String,
}

impl Default for TranslationsConfig {
    fn default() -> Self {
        Self { directory: "translations".to_string(), key_separator: ".".to_string() }
    }
}

impl BlogSettings {
    /// # Errors
    /// - Invalid locale configuration
    /// - Empty or dotted content extension
    /// - Invalid glob pattern
    /// - Empty key separator
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        self.locales.collect_errors("locales.", &mut errors);

        if self.content.extension.is_empty() {
            errors.push(ValidationError::new(
                "content.extension",
                "The extension cannot be empty. Example: \"mdx\"",
            ));
        } else if self.content.extension.starts_with('.') {
            errors.push(ValidationError::new(
                "content.extension",
                format!(
                    "The extension must not start with a dot. Use \"{}\" instead",
                    self.content.extension.trim_start_matches('.')
                ),
            ));
        }

        for (index, pattern) in self.content.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("content.excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if self.translations.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "translations.keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for BlogSettings {
    fn default() -> Self {
        Self {
            locales: LocaleConfig::default(),
            content: ContentConfig::default(),
            translations: TranslationsConfig::default(),
            strict: false,
        }
    }
}
