//! Advisory diagnostics produced while building a translation table.

use std::collections::{
    BTreeMap,
    BTreeSet,
};
use std::fmt;

/// Keys one locale lacks (or has on top of) the union across all locales.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyInconsistency {
    pub missing: Vec<String>,
    pub extra: Vec<String>,
}

impl KeyInconsistency {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Non-fatal problems in authored translation data.
///
/// They never stop construction; the caller decides whether to log,
/// ignore or escalate them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationWarning {
    /// Some keys are present in some locales but not in others.
    InconsistentKeys(BTreeMap<String, KeyInconsistency>),
    /// The table contains locales outside the configured set.
    InvalidLocales(Vec<String>),
}

impl TranslationWarning {
    /// Diagnostic class name, e.g. `TranslationWarning.InvalidLocaleWarning`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::InconsistentKeys(_) => "TranslationWarning.InconsistentKeysWarning",
            Self::InvalidLocales(_) => "TranslationWarning.InvalidLocaleWarning",
        }
    }

    /// Emit this warning through `tracing`.
    pub fn log(&self) {
        tracing::warn!(kind = self.name(), "{self}");
    }
}

impl fmt::Display for TranslationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentKeys(inconsistencies) => {
                let details = inconsistencies
                    .iter()
                    .map(|(locale, inconsistency)| {
                        let mut parts = Vec::new();
                        if !inconsistency.missing.is_empty() {
                            parts.push(format!("missing: {}", inconsistency.missing.join(", ")));
                        }
                        if !inconsistency.extra.is_empty() {
                            parts.push(format!("extra: {}", inconsistency.extra.join(", ")));
                        }
                        format!("{locale} ({})", parts.join("; "))
                    })
                    .collect::<Vec<_>>()
                    .join("; ");
                write!(f, "Translation keys are inconsistent across locales: {details}")
            }
            Self::InvalidLocales(locales) => {
                write!(f, "Translation contains invalid locales: {}", locales.join(", "))
            }
        }
    }
}

/// Compare each locale's key set against the union of all keys.
///
/// `extra` can only be non-empty if a locale had keys outside the union,
/// which cannot happen; it is kept so the report shape matches the
/// diagnostic format.
pub(super) fn check_key_consistency<'a, I>(key_sets: I) -> Option<TranslationWarning>
where
    I: IntoIterator<Item = (&'a str, BTreeSet<&'a str>)>,
{
    let key_sets: Vec<_> = key_sets.into_iter().collect();
    if key_sets.is_empty() {
        return None;
    }

    let all_keys: BTreeSet<&str> = key_sets.iter().flat_map(|(_, keys)| keys.iter().copied()).collect();

    let inconsistencies: BTreeMap<String, KeyInconsistency> = key_sets
        .iter()
        .filter_map(|(locale, keys)| {
            let inconsistency = KeyInconsistency {
                missing: all_keys.difference(keys).map(|key| (*key).to_string()).collect(),
                extra: keys.difference(&all_keys).map(|key| (*key).to_string()).collect(),
            };
            (!inconsistency.is_empty()).then(|| ((*locale).to_string(), inconsistency))
        })
        .collect();

    (!inconsistencies.is_empty()).then_some(TranslationWarning::InconsistentKeys(inconsistencies))
}
