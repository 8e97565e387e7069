//! Locale-scoped content files: discovery, front matter and lookup.

mod document;
mod front_matter;
mod metadata;
mod repository;
mod slug;

pub use document::{
    ContentError,
    Document,
};
pub use front_matter::{
    FrontMatterError,
    split as split_front_matter,
};
pub use metadata::{
    Metadata,
    parse_date,
};
pub use repository::ContentRepository;
pub use slug::{
    Slug,
    SlugError,
};
