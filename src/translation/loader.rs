//! Translation file loading
//!
//! A translation file is a JSON object keyed by locale, each value a
//! (possibly nested) object of UI strings:
//!
//! ```json
//! { "en": { "nav": { "home": "Home" } }, "ja": { "nav": { "home": "ホーム" } } }
//! ```

use std::collections::{
    BTreeMap,
    HashMap,
};
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use super::{
    Sentence,
    Translation,
    TranslationLoadError,
};
use crate::config::LocaleConfig;

/// Translation file extension.
static JSON: &str = "json";

/// Flatten one locale's nested strings into separator-joined keys.
///
/// Array items get an `[index]` suffix; numbers, booleans and `null` are
/// kept as their JSON text. `prefix` is prepended to every key.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use blog_i18n::translation::flatten_json;
///
/// let blog = json!({
///     "blog": {
///         "allArticles": "All Articles",
///         "readMore": "Read more"
///     }
/// });
///
/// let keys = flatten_json(&blog, ".", None);
/// assert_eq!(keys.get("blog.allArticles").map(String::as_str), Some("All Articles"));
/// assert_eq!(keys.get("blog.readMore").map(String::as_str), Some("Read more"));
/// ```
#[must_use]
pub fn flatten_json(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
) -> HashMap<String, String> {
    let mut keys = HashMap::new();
    collect_leaves(json, separator, prefix.map(str::to_string), &mut keys);
    keys
}

/// Walk `value`, recording every leaf under its joined key.
fn collect_leaves(
    value: &Value,
    separator: &str,
    key: Option<String>,
    keys: &mut HashMap<String, String>,
) {
    match value {
        Value::Object(children) => {
            for (name, child) in children {
                let child_key = match &key {
                    Some(parent) => format!("{parent}{separator}{name}"),
                    None => name.clone(),
                };
                collect_leaves(child, separator, Some(child_key), keys);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let item_key = format!("{}[{index}]", key.as_deref().unwrap_or_default());
                collect_leaves(item, separator, Some(item_key), keys);
            }
        }
        leaf => {
            // A bare scalar at the top level has no key to live under.
            if let Some(key) = key {
                let text = leaf.as_str().map_or_else(|| leaf.to_string(), str::to_string);
                keys.insert(key, text);
            }
        }
    }
}

/// Split a parsed translation document into one sentence per locale.
fn sentences_from_json(
    path: &Path,
    json: &Value,
    separator: &str,
) -> Result<Vec<(String, Sentence)>, TranslationLoadError> {
    let Value::Object(locales) = json else {
        return Err(TranslationLoadError::NotAnObject { path: path.to_path_buf() });
    };

    locales
        .iter()
        .map(|(locale, entries)| {
            if !entries.is_object() {
                return Err(TranslationLoadError::LocaleNotAnObject {
                    path: path.to_path_buf(),
                    locale: locale.clone(),
                });
            }
            Ok((locale.clone(), Sentence::new(flatten_json(entries, separator, None))))
        })
        .collect()
}

/// Read and split a translation file without building a table.
fn read_sentences(
    file_path: &Path,
    separator: &str,
) -> Result<Vec<(String, Sentence)>, TranslationLoadError> {
    let content = std::fs::read_to_string(file_path)
        .map_err(|source| TranslationLoadError::Io { path: file_path.to_path_buf(), source })?;

    let json: Value = serde_json::from_str(&content)
        .map_err(|source| TranslationLoadError::Parse { path: file_path.to_path_buf(), source })?;

    let sentences = sentences_from_json(file_path, &json, separator)?;
    tracing::debug!(path = %file_path.display(), locales = sentences.len(), "Loaded translation file");
    Ok(sentences)
}

/// Load a translation file into a [`Translation`], logging its warnings.
///
/// # Errors
/// Returns error if file read or JSON parse fails, or if the document is
/// not shaped as `{ locale: { ... } }`.
pub fn load_translation_file(
    file_path: &Path,
    config: Arc<LocaleConfig>,
    separator: &str,
) -> Result<Translation, TranslationLoadError> {
    let sentences = read_sentences(file_path, separator)?;
    Ok(Translation::new(config, sentences))
}

/// Named translation tables, one per file (`common.json` → `common`).
#[derive(Debug, Clone, Default)]
pub struct TranslationCatalog {
    /// Tables keyed by file stem.
    tables: BTreeMap<String, Translation>,
}

impl TranslationCatalog {
    /// Load every `*.json` file directly inside `dir`.
    ///
    /// A missing directory yields an empty catalog. With `strict`, any
    /// advisory warning rejects the whole load.
    ///
    /// # Errors
    /// - Directory or file read errors
    /// - JSON parse errors or malformed documents
    /// - Warnings, when `strict` is set
    pub fn load_dir(
        dir: &Path,
        config: &Arc<LocaleConfig>,
        separator: &str,
        strict: bool,
    ) -> Result<Self, TranslationLoadError> {
        let mut tables = BTreeMap::new();

        if !dir.is_dir() {
            tracing::debug!("Translation directory not found: {:?}", dir);
            return Ok(Self { tables });
        }

        let io_err = |source| TranslationLoadError::Io { path: dir.to_path_buf(), source };
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == JSON) {
                files.push(path);
            }
        }
        files.sort();

        for path in files {
            let Some(name) = path.file_stem().map(|stem| stem.to_string_lossy().into_owned())
            else {
                continue;
            };
            let sentences = read_sentences(&path, separator)?;
            let table = if strict {
                Translation::strict(Arc::clone(config), sentences)?
            } else {
                Translation::new(Arc::clone(config), sentences)
            };
            tables.insert(name, table);
        }

        Ok(Self { tables })
    }

    /// Add or replace a named table.
    pub fn insert(&mut self, name: impl Into<String>, translation: Translation) {
        self.tables.insert(name.into(), translation);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Translation> {
        self.tables.get(name)
    }

    /// Table names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
