//! JSON summary of a workspace, printed by the CLI.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::content::{
    ContentError,
    ContentRepository,
    Document,
};
use crate::translation::TranslationCatalog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub category: String,
    pub featured: bool,
}

impl From<&Document> for DocumentSummary {
    fn from(document: &Document) -> Self {
        Self {
            slug: document.slug.as_path_string(),
            title: document.metadata.title.clone(),
            date: document.metadata.date.clone(),
            category: document.metadata.category.clone(),
            featured: document.metadata.is_featured(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleReport {
    /// Date-sorted, most recent first.
    pub documents: Vec<DocumentSummary>,
    /// Every content file's slug, including ones that failed to load.
    pub slugs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteReport {
    pub default_locale: String,
    /// Translation table name → locales it covers.
    pub translations: BTreeMap<String, Vec<String>>,
    pub locales: BTreeMap<String, LocaleReport>,
}

impl SiteReport {
    /// Collect documents and slugs for every configured locale.
    ///
    /// # Errors
    /// Propagates [`ContentError`] from the repository.
    pub fn collect(
        repository: &ContentRepository,
        catalog: &TranslationCatalog,
    ) -> Result<Self, ContentError> {
        let config = repository.locales();
        let mut locales = BTreeMap::new();

        for locale in config.valid_locales() {
            let documents =
                repository.list_documents(locale)?.iter().map(DocumentSummary::from).collect();
            let slugs =
                repository.list_slugs(locale)?.into_iter().map(|segments| segments.join("/")).collect();
            locales.insert(locale.clone(), LocaleReport { documents, slugs });
        }

        let translations = catalog
            .names()
            .filter_map(|name| {
                let table = catalog.get(name)?;
                Some((name.to_string(), table.locales().map(str::to_string).collect()))
            })
            .collect();

        Ok(Self { default_locale: config.default_locale().to_string(), translations, locales })
    }
}
