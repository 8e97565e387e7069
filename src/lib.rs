//! blog-i18n
//!
//! 多言語ブログのための翻訳テーブルとコンテンツ読み込み

pub mod config;
pub mod content;
pub mod report;
pub mod translation;

#[cfg(test)]
mod test_utils;

pub use config::{
    ConfigManager,
    LocaleConfig,
};
pub use content::{
    ContentRepository,
    Document,
};
pub use translation::{
    Sentence,
    Translation,
};
