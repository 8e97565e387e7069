//! File-system backed catalogue of locale-scoped documents.

use std::fmt;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};
use ignore::WalkBuilder;

use super::{
    ContentError,
    Document,
    Slug,
};
use crate::config::{
    ContentConfig,
    LocaleConfig,
};

/// Read-only view over `<root>/<locale>/**/*.<extension>`.
///
/// Holds no document state: every query walks the locale directory again.
#[derive(Debug, Clone)]
pub struct ContentRepository {
    /// Content root holding one directory per locale.
    root: PathBuf,
    /// Content file extension without the dot.
    extension: String,
    /// Paths (relative to a locale directory) skipped by every walk.
    exclude: GlobSet,
    /// Shared locale configuration.
    locales: Arc<LocaleConfig>,
}

impl ContentRepository {
    #[must_use]
    pub fn new(
        root: impl Into<PathBuf>,
        extension: impl Into<String>,
        locales: Arc<LocaleConfig>,
    ) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
            exclude: GlobSet::empty(),
            locales,
        }
    }

    /// Build a repository from validated content settings.
    ///
    /// # Errors
    /// [`ContentError::Pattern`] when an exclude pattern is not a valid glob.
    pub fn from_settings(
        root: impl Into<PathBuf>,
        content: &ContentConfig,
        locales: Arc<LocaleConfig>,
    ) -> Result<Self, ContentError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &content.exclude_patterns {
            builder.add(Glob::new(pattern)?);
        }
        Ok(Self { exclude: builder.build()?, ..Self::new(root, content.extension.clone(), locales) })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    #[must_use]
    pub fn locales(&self) -> &LocaleConfig {
        &self.locales
    }

    /// Every loadable document of `locale`, most recent first.
    ///
    /// Files that fail to load are skipped with a warning. A missing locale
    /// directory yields an empty list. Equal dates keep walk order, which is
    /// by file name.
    ///
    /// # Errors
    /// [`ContentError::InvalidLocale`] when the locale is not configured.
    pub fn list_documents(&self, locale: &str) -> Result<Vec<Document>, ContentError> {
        let locale_dir = self.locale_dir(locale)?;

        let mut documents: Vec<Document> = self
            .find_content_files(&locale_dir)
            .into_iter()
            .filter_map(|(slug, path)| match Document::load(slug, locale, &path) {
                Ok(document) => Some(document),
                Err(err) => {
                    tracing::warn!("Skipping content file {:?}: {}", path, err);
                    None
                }
            })
            .collect();

        documents.sort_by(|a, b| b.published_at().cmp(&a.published_at()));

        tracing::debug!(locale, count = documents.len(), "Listed documents");
        Ok(documents)
    }

    /// The document at `<locale>/<slug>.<extension>`, if it loads.
    ///
    /// `slug` is a joined `"sub/y"` string, its segments (`["sub", "y"]`) or
    /// a [`Slug`]. A missing file, an unreadable one, malformed front matter,
    /// an unsafe slug and a path matched by an exclude pattern all come back
    /// as `Ok(None)`; the reason is logged.
    ///
    /// # Errors
    /// [`ContentError::InvalidLocale`] when the locale is not configured.
    pub fn get_document<S>(&self, locale: &str, slug: S) -> Result<Option<Document>, ContentError>
    where
        S: TryInto<Slug>,
        S::Error: fmt::Display,
    {
        let locale_dir = self.locale_dir(locale)?;

        let slug = match slug.try_into() {
            Ok(slug) => slug,
            Err(err) => {
                tracing::debug!(locale, "Rejected slug: {}", err);
                return Ok(None);
            }
        };

        let relative_path = slug.to_relative_path(&self.extension);
        if self.exclude.is_match(&relative_path) {
            tracing::debug!(locale, "Content file excluded: {:?}", relative_path);
            return Ok(None);
        }

        let path = locale_dir.join(relative_path);
        match Document::load(slug, locale, &path) {
            Ok(document) => Ok(Some(document)),
            Err(err) if err.is_not_found() => {
                tracing::debug!("Content file not found: {:?}", path);
                Ok(None)
            }
            Err(err) => {
                tracing::warn!("Failed to load content file {:?}: {}", path, err);
                Ok(None)
            }
        }
    }

    /// Slug segments of every content file of `locale`, without reading the
    /// files.
    ///
    /// # Errors
    /// [`ContentError::InvalidLocale`] when the locale is not configured.
    pub fn list_slugs(&self, locale: &str) -> Result<Vec<Vec<String>>, ContentError> {
        let locale_dir = self.locale_dir(locale)?;

        Ok(self
            .find_content_files(&locale_dir)
            .into_iter()
            .map(|(slug, _)| slug.into_segments())
            .collect())
    }

    /// [`Self::list_documents`] restricted to `featured: true`, same order.
    ///
    /// # Errors
    /// [`ContentError::InvalidLocale`] when the locale is not configured.
    pub fn list_featured(&self, locale: &str) -> Result<Vec<Document>, ContentError> {
        let mut documents = self.list_documents(locale)?;
        documents.retain(|document| document.metadata.is_featured());
        Ok(documents)
    }

    /// `<root>/<locale>`, after checking the locale is configured.
    fn locale_dir(&self, locale: &str) -> Result<PathBuf, ContentError> {
        self.locales.ensure_valid_locale(locale)?;
        Ok(self.root.join(locale))
    }

    /// Walk a locale directory for content files, in file-name order.
    fn find_content_files(&self, locale_dir: &Path) -> Vec<(Slug, PathBuf)> {
        let mut found_files = Vec::new();

        if !locale_dir.is_dir() {
            tracing::debug!("Locale directory not found: {:?}", locale_dir);
            return found_files;
        }

        for result in WalkBuilder::new(locale_dir)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            // ファイルのみを対象
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == self.extension.as_str()) {
                continue;
            }

            let Ok(relative_path) = path.strip_prefix(locale_dir) else {
                continue;
            };
            if self.exclude.is_match(relative_path) {
                continue;
            }

            match Slug::from_relative_path(relative_path) {
                Ok(slug) => found_files.push((slug, path.to_path_buf())),
                Err(err) => tracing::warn!("Skipping content file {:?}: {}", path, err),
            }
        }

        found_files
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::test_utils::{
        ContentTree,
        post,
    };

    fn repository(tree: &ContentTree) -> ContentRepository {
        ContentRepository::new(tree.root(), "mdx", Arc::new(LocaleConfig::new(["ja", "en"], "en")))
    }

    fn slugs(documents: &[Document]) -> Vec<String> {
        documents.iter().map(|document| document.slug.as_path_string()).collect()
    }

    #[googletest::test]
    fn test_list_documents_sorted_by_date_descending() {
        let tree = ContentTree::new();
        tree.write("en/x.mdx", &post("X", "2024-01-01", false));
        tree.write("en/sub/y.mdx", &post("Y", "2024-06-01", false));
        tree.write("en/z.mdx", &post("Z", "2023-12-31", false));

        let documents = repository(&tree).list_documents("en").unwrap();

        assert_eq!(slugs(&documents), ["sub/y", "x", "z"]);
        expect_that!(documents.iter().map(|d| d.locale.as_str()).collect::<Vec<_>>(), each(eq(&"en")));
    }

    #[googletest::test]
    fn test_list_documents_orders_mixed_date_formats_by_instant() {
        let tree = ContentTree::new();
        tree.write("en/a.mdx", &post("A", "2024-06-01", false));
        tree.write("en/b.mdx", &post("B", "2024-06-01T09:00:00+09:00", false));
        tree.write("en/c.mdx", &post("C", "2024-06-01T12:00:00Z", false));

        let documents = repository(&tree).list_documents("en").unwrap();

        // b is 00:00 UTC, the same instant as a bare date; walk order breaks the tie.
        assert_eq!(slugs(&documents), ["c", "a", "b"]);
    }

    #[googletest::test]
    fn test_list_documents_skips_broken_files_and_other_extensions() {
        let tree = ContentTree::new();
        tree.write("en/good.mdx", &post("Good", "2024-01-01", false));
        tree.write("en/no-front-matter.mdx", "# nothing here\n");
        tree.write("en/missing-title.mdx", "---\ndate: 2024-01-01\nexcerpt: E\ncategory: C\n---\n");
        tree.write("en/bad-date.mdx", &post("Bad", "yesterday", false));
        tree.write("en/readme.md", &post("Readme", "2024-01-01", false));

        let documents = repository(&tree).list_documents("en").unwrap();

        assert_eq!(slugs(&documents), ["good"]);
    }

    #[googletest::test]
    fn test_list_documents_only_reads_requested_locale() {
        let tree = ContentTree::new();
        tree.write("en/x.mdx", &post("X", "2024-01-01", false));
        tree.write("ja/x.mdx", &post("エックス", "2024-01-01", false));

        let documents = repository(&tree).list_documents("ja").unwrap();

        expect_that!(documents, elements_are![field!(Document.locale, eq("ja"))]);
        expect_that!(documents.first().map(|d| d.metadata.title.as_str()), some(eq("エックス")));
    }

    #[rstest]
    fn test_invalid_locale_fails_every_query() {
        let tree = ContentTree::new();
        tree.write("fr/x.mdx", &post("X", "2024-01-01", false));
        let repository = repository(&tree);

        assert!(matches!(repository.list_documents("fr"), Err(ContentError::InvalidLocale(_))));
        assert!(matches!(repository.list_slugs("fr"), Err(ContentError::InvalidLocale(_))));
        assert!(matches!(repository.list_featured("fr"), Err(ContentError::InvalidLocale(_))));
        assert!(matches!(
            repository.get_document("fr", ["x"]),
            Err(ContentError::InvalidLocale(_))
        ));
    }

    #[rstest]
    fn test_missing_locale_directory_is_empty() {
        let tree = ContentTree::new();
        let repository = repository(&tree);

        assert!(repository.list_documents("ja").unwrap().is_empty());
        assert!(repository.list_slugs("ja").unwrap().is_empty());
        assert!(repository.list_featured("ja").unwrap().is_empty());
    }

    #[googletest::test]
    fn test_get_document_matches_discovery() {
        let tree = ContentTree::new();
        tree.write("en/x.mdx", &post("X", "2024-01-01", false));
        tree.write("en/sub/y.mdx", &post("Y", "2024-06-01", true));
        let repository = repository(&tree);

        let found = repository.get_document("en", ["sub", "y"]).unwrap();
        let listed = repository.list_documents("en").unwrap();

        expect_that!(found.as_ref(), some(eq(&listed[0])));
    }

    #[rstest]
    #[case(&["missing"])]
    #[case(&["sub"])]
    #[case(&["..", "secret"])]
    #[case(&["sub/y"])]
    #[case(&[])]
    fn test_get_document_absent(#[case] segments: &[&str]) {
        let tree = ContentTree::new();
        tree.write("en/sub/y.mdx", &post("Y", "2024-06-01", false));
        tree.write("secret.mdx", &post("Secret", "2024-06-01", false));

        let result = repository(&tree).get_document("en", segments);

        assert!(matches!(result, Ok(None)));
    }

    #[rstest]
    fn test_get_document_corrupt_file_is_absent() {
        let tree = ContentTree::new();
        tree.write("en/broken.mdx", "---\ntitle: [unclosed\n---\n");

        let result = repository(&tree).get_document("en", ["broken"]);

        assert!(matches!(result, Ok(None)));
    }

    #[googletest::test]
    fn test_list_slugs_does_not_parse_files() {
        let tree = ContentTree::new();
        tree.write("en/a.mdx", "not even front matter");
        tree.write("en/nested/deep/b.mdx", &post("B", "2024-01-01", false));
        tree.write("en/nested/notes.txt", "ignored");

        let slugs = repository(&tree).list_slugs("en").unwrap();

        assert_eq!(slugs, [vec!["a"], vec!["nested", "deep", "b"]]);
    }

    #[googletest::test]
    fn test_list_featured_preserves_order() {
        let tree = ContentTree::new();
        tree.write("en/a.mdx", &post("A", "2024-01-01", true));
        tree.write("en/b.mdx", &post("B", "2024-03-01", false));
        tree.write("en/c.mdx", &post("C", "2024-05-01", true));
        tree.write(
            "en/d.mdx",
            "---\ntitle: D\ndate: 2024-07-01\nexcerpt: E\ncategory: C\nfeatured: \"true\"\n---\n",
        );

        let repository = repository(&tree);

        let all = repository.list_documents("en").unwrap();
        let featured = repository.list_featured("en").unwrap();

        assert_eq!(slugs(&all), ["d", "c", "b", "a"]);
        assert_eq!(slugs(&featured), ["c", "a"]);
    }

    #[googletest::test]
    fn test_exclude_patterns() {
        let tree = ContentTree::new();
        tree.write("en/x.mdx", &post("X", "2024-01-01", false));
        tree.write("en/archive/old.mdx", &post("Old", "2020-01-01", false));
        let content = ContentConfig {
            exclude_patterns: vec!["archive/**".to_string()],
            ..ContentConfig::default()
        };

        let repository = ContentRepository::from_settings(
            tree.root(),
            &content,
            Arc::new(LocaleConfig::default()),
        )
        .unwrap();

        assert_eq!(repository.list_slugs("en").unwrap(), [vec!["x"]]);
    }

    #[googletest::test]
    fn test_get_document_joined_and_segment_forms_agree() {
        let tree = ContentTree::new();
        tree.write("en/sub/y.mdx", &post("Y", "2024-06-01", false));
        let repository = repository(&tree);

        let joined = repository.get_document("en", "sub/y").unwrap();
        let segments = repository.get_document("en", ["sub", "y"]).unwrap();
        let owned = repository.get_document("en", vec!["sub".to_string(), "y".to_string()]).unwrap();

        expect_that!(joined.as_ref().map(|d| d.slug.as_path_string()), some(eq("sub/y")));
        assert_eq!(joined, segments);
        assert_eq!(joined, owned);
    }

    #[rstest]
    #[case("")]
    #[case("/sub/y")]
    #[case("sub//y")]
    #[case("sub/../y")]
    fn test_get_document_rejects_malformed_joined_slug(#[case] slug: &str) {
        let tree = ContentTree::new();
        tree.write("en/sub/y.mdx", &post("Y", "2024-06-01", false));
        tree.write("en/y.mdx", &post("Y", "2024-06-01", false));

        let result = repository(&tree).get_document("en", slug);

        assert!(matches!(result, Ok(None)));
    }

    #[rstest]
    fn test_get_document_honours_exclude_patterns() {
        let tree = ContentTree::new();
        tree.write("en/x.mdx", &post("X", "2024-01-01", false));
        tree.write("en/archive/old.mdx", &post("Old", "2020-01-01", false));
        let content = ContentConfig {
            exclude_patterns: vec!["archive/**".to_string()],
            ..ContentConfig::default()
        };
        let repository = ContentRepository::from_settings(
            tree.root(),
            &content,
            Arc::new(LocaleConfig::default()),
        )
        .unwrap();

        assert_eq!(repository.list_slugs("en").unwrap(), [vec!["x"]]);
        assert!(matches!(repository.get_document("en", ["archive", "old"]), Ok(None)));
        assert!(matches!(repository.get_document("en", "archive/old"), Ok(None)));
        assert!(matches!(repository.get_document("en", "x"), Ok(Some(_))));
    }

    #[googletest::test]
    fn test_mistyped_optional_fields_keep_post_listed() {
        let tree = ContentTree::new();
        tree.write(
            "en/a.mdx",
            "---\ntitle: A\ndate: 2024-01-01\nexcerpt: E\ncategory: C\nfeatured: \"true\"\n---\n",
        );
        tree.write(
            "en/b.mdx",
            "---\ntitle: B\ndate: 2024-02-01\nexcerpt: E\ncategory: C\ntags: rust\n---\n",
        );
        tree.write(
            "en/c.mdx",
            "---\ntitle: C\ndate: 2024-03-01\nexcerpt: E\ncategory: C\nfeatured: yes\n---\n",
        );
        let repository = repository(&tree);

        let documents = repository.list_documents("en").unwrap();

        assert_eq!(slugs(&documents), ["c", "b", "a"]);
        expect_that!(repository.list_featured("en").unwrap(), is_empty());
        let a = repository.get_document("en", ["a"]).unwrap();
        assert_eq!(a.map(|d| d.metadata.featured), Some(None));
    }

    #[rstest]
    fn test_from_settings_rejects_invalid_glob() {
        let content = ContentConfig {
            exclude_patterns: vec!["invalid[pattern".to_string()],
            ..ContentConfig::default()
        };

        let result =
            ContentRepository::from_settings("posts", &content, Arc::new(LocaleConfig::default()));

        assert!(matches!(result, Err(ContentError::Pattern(_))));
    }
}
