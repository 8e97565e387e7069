use std::fmt;
use std::path::{
    Component,
    Path,
    PathBuf,
};

use serde::{
    Serialize,
    Serializer,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    #[error("Slug has no segments")]
    Empty,
    #[error("Invalid slug segment '{0}'")]
    InvalidSegment(String),
}

/// Hierarchical document identifier, e.g. `["sub", "y"]` for `sub/y.mdx`.
///
/// Segments are never empty, never `.` or `..`, and never contain a path
/// separator, so a slug always resolves inside its locale directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slug {
    /// Path components, without the file extension.
    segments: Vec<String>,
}

impl Slug {
    /// # Errors
    /// Returns [`SlugError`] when there are no segments or one is unsafe.
    pub fn new<I, S>(segments: I) -> Result<Self, SlugError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(SlugError::Empty);
        }
        if let Some(bad) = segments.iter().find(|segment| !is_valid_segment(segment)) {
            return Err(SlugError::InvalidSegment(bad.clone()));
        }
        Ok(Self { segments })
    }

    /// Parse the joined routing form, e.g. `"sub/y"`.
    ///
    /// # Errors
    /// Returns [`SlugError`] for an empty string or an unsafe segment,
    /// including the empty segments of `"/y"` and `"sub//y"`.
    pub fn parse(joined: &str) -> Result<Self, SlugError> {
        if joined.is_empty() {
            return Err(SlugError::Empty);
        }
        Self::new(joined.split('/'))
    }

    /// Derive the slug from a content file path relative to its locale
    /// directory, dropping the extension of the last component.
    ///
    /// # Errors
    /// Returns [`SlugError`] for absolute paths, `..` components or
    /// non UTF-8 names.
    pub fn from_relative_path(path: &Path) -> Result<Self, SlugError> {
        let stripped = path.with_extension("");
        let mut segments = Vec::new();
        for component in stripped.components() {
            match component {
                Component::Normal(name) => {
                    let name = name.to_str().ok_or_else(|| {
                        SlugError::InvalidSegment(name.to_string_lossy().into_owned())
                    })?;
                    segments.push(name.to_string());
                }
                Component::CurDir => {}
                other => {
                    return Err(SlugError::InvalidSegment(
                        other.as_os_str().to_string_lossy().into_owned(),
                    ));
                }
            }
        }
        Self::new(segments)
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[must_use]
    pub fn into_segments(self) -> Vec<String> {
        self.segments
    }

    /// Segments joined with `/`, the routing form.
    #[must_use]
    pub fn as_path_string(&self) -> String {
        self.segments.join("/")
    }

    /// Platform path of the backing file relative to the locale directory.
    #[must_use]
    pub fn to_relative_path(&self, extension: &str) -> PathBuf {
        let mut path: PathBuf = self.segments.iter().collect();
        let file_name = format!(
            "{}.{extension}",
            path.file_name().map(|name| name.to_string_lossy()).unwrap_or_default()
        );
        path.set_file_name(file_name);
        path
    }
}

/// Non-empty, not `.`/`..`, no separator or NUL.
fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\'])
        && !segment.contains('\0')
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_path_string())
    }
}

impl TryFrom<&str> for Slug {
    type Error = SlugError;

    fn try_from(joined: &str) -> Result<Self, Self::Error> {
        Self::parse(joined)
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(joined: String) -> Result<Self, Self::Error> {
        Self::parse(&joined)
    }
}

impl<S: Into<String>, const N: usize> TryFrom<[S; N]> for Slug {
    type Error = SlugError;

    fn try_from(segments: [S; N]) -> Result<Self, Self::Error> {
        Self::new(segments)
    }
}

impl TryFrom<&[&str]> for Slug {
    type Error = SlugError;

    fn try_from(segments: &[&str]) -> Result<Self, Self::Error> {
        Self::new(segments.iter().copied())
    }
}

impl TryFrom<Vec<String>> for Slug {
    type Error = SlugError;

    fn try_from(segments: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(segments)
    }
}

impl TryFrom<&[String]> for Slug {
    type Error = SlugError;

    fn try_from(segments: &[String]) -> Result<Self, Self::Error> {
        Self::new(segments.iter().cloned())
    }
}

impl Serialize for Slug {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_path_string())
    }
}
