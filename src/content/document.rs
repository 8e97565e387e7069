use std::io;
use std::path::{
    Path,
    PathBuf,
};

use chrono::{
    DateTime,
    Utc,
};
use serde::Serialize;
use thiserror::Error;

use super::front_matter::{
    self,
    FrontMatterError,
};
use super::metadata::{
    Metadata,
    parse_date,
};
use super::slug::{
    Slug,
    SlugError,
};
use crate::config::InvalidLocale;

/// Errors raised by the content layer.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error(transparent)]
    InvalidLocale(#[from] InvalidLocale),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid front matter in {path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    #[error("Invalid metadata in {path:?}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid date '{date}' in {path:?}: expected YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDate { path: PathBuf, date: String },

    #[error("Invalid slug for {path:?}: {source}")]
    Slug {
        path: PathBuf,
        #[source]
        source: SlugError,
    },

    #[error("Invalid exclude pattern: {0}")]
    Pattern(#[from] globset::Error),
}

impl ContentError {
    /// `true` when the backing file does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// One parsed content file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub slug: Slug,
    pub locale: String,
    pub metadata: Metadata,
    /// Raw body after the front matter, left for the renderer.
    pub content: String,
    /// `metadata.date`, parsed. Used for ordering.
    #[serde(skip)]
    published_at: DateTime<Utc>,
}

impl Document {
    /// Parse the text of a content file.
    ///
    /// # Errors
    /// Front matter missing or unterminated, metadata invalid or lacking a
    /// required field, or a date in an unsupported format.
    pub fn parse(
        slug: Slug,
        locale: impl Into<String>,
        path: &Path,
        text: &str,
    ) -> Result<Self, ContentError> {
        let (front, body) = front_matter::split(text)
            .map_err(|source| ContentError::FrontMatter { path: path.to_path_buf(), source })?;

        let metadata: Metadata = serde_yaml::from_str(front)
            .map_err(|source| ContentError::Metadata { path: path.to_path_buf(), source })?;

        let Some(published_at) = parse_date(&metadata.date) else {
            return Err(ContentError::InvalidDate {
                path: path.to_path_buf(),
                date: metadata.date,
            });
        };

        Ok(Self { slug, locale: locale.into(), metadata, content: body.to_string(), published_at })
    }

    /// Read and parse the file at `path`.
    ///
    /// # Errors
    /// I/O errors plus everything [`Document::parse`] reports.
    pub fn load(slug: Slug, locale: impl Into<String>, path: &Path) -> Result<Self, ContentError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ContentError::Io { path: path.to_path_buf(), source })?;
        Self::parse(slug, locale, path, &text)
    }

    #[must_use]
    pub const fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }
}
