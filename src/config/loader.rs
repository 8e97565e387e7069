//! `.blog-i18n.json` の読み込み

use std::io;
use std::path::Path;

use super::{
    BlogSettings,
    ConfigError,
};

/// 設定ファイル名
pub(super) const CONFIG_FILE_NAME: &str = ".blog-i18n.json";

/// ワークスペース直下の設定ファイルを読み込む
///
/// ファイルが存在しなければ `Ok(None)` を返し、呼び出し側がデフォルト値を使う。
/// 読み込んだ設定のバリデーションは [`super::ConfigManager`] が行う。
///
/// # Errors
/// - 存在はするが読めないファイル
/// - JSON として不正な内容、または型の合わないフィールド
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<BlogSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    let content = match std::fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %config_path.display(), "No settings file, using defaults");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    let settings: BlogSettings = serde_json::from_str(&content)?;
    tracing::debug!(
        path = %config_path.display(),
        locales = ?settings.locales.valid_locales,
        "Loaded settings file"
    );

    Ok(Some(settings))
}
