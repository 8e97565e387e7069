use std::collections::HashMap;

use super::TranslationError;

/// One locale's flat key → text dictionary.
///
/// Keys are fixed at construction. Plural variants are modelled as
/// distinct keys and chosen by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence {
    /// Key to text, verbatim.
    data: HashMap<String, String>,
}

impl Sentence {
    #[must_use]
    pub const fn new(data: HashMap<String, String>) -> Self {
        Self { data }
    }

    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// All keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.data.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Look up the text for `key`, verbatim.
    ///
    /// # Errors
    /// [`TranslationError::KeyNotFound`] when the key is absent.
    pub fn insert(&self, key: &str) -> Result<&str, TranslationError> {
        self.get(key).ok_or_else(|| TranslationError::KeyNotFound(key.to_string()))
    }
}

impl<K, V> FromIterator<(K, V)> for Sentence
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Sentence
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}
