//! Locale-keyed UI strings with construction-time consistency checks.

mod error;
mod loader;
mod sentence;
mod table;
mod warning;

pub use error::{
    TranslationError,
    TranslationLoadError,
};
pub use loader::{
    TranslationCatalog,
    flatten_json,
    load_translation_file,
};
pub use sentence::Sentence;
pub use table::Translation;
pub use warning::{
    KeyInconsistency,
    TranslationWarning,
};
