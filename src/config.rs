//! Workspace settings and the shared locale configuration.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Configuration types and settings
mod types;

pub use manager::ConfigManager;
pub use types::{
    BlogSettings,
    ConfigError,
    ContentConfig,
    InvalidLocale,
    LocaleConfig,
    TranslationsConfig,
    ValidationError,
};
