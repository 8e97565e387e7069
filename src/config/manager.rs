//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use super::{
    BlogSettings,
    ConfigError,
    LocaleConfig,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: BlogSettings,

    /// 翻訳テーブルとコンテンツリポジトリで共有するロケール設定
    locales: Arc<LocaleConfig>,

    /// ワークスペースのルートパス
    workspace_root: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        let current_settings = BlogSettings::default();
        let locales = Arc::new(current_settings.locales.clone());
        Self { current_settings, locales, workspace_root: None }
    }

    /// 設定を読み込む
    ///
    /// # Arguments
    /// * `workspace_root` - ワークスペースのルートパス
    ///
    /// # Returns
    /// - `Ok(())`: 設定の読み込みとバリデーション成功
    /// - `Err(ConfigError)`: エラー
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", workspace_root);

        // ワークスペースの設定を読み込み
        let settings = if let Some(root) = &workspace_root {
            loader::load_from_workspace(root)?.map_or_else(BlogSettings::default, |ws| {
                tracing::debug!("Loaded workspace settings: {:?}", ws);
                ws
            })
        } else {
            BlogSettings::default()
        };

        // バリデーション
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        // 設定を保存
        self.locales = Arc::new(settings.locales.clone());
        self.current_settings = settings;
        self.workspace_root = workspace_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &BlogSettings {
        &self.current_settings
    }

    /// 共有ロケール設定を取得
    #[must_use]
    pub fn locales(&self) -> Arc<LocaleConfig> {
        Arc::clone(&self.locales)
    }

    /// ワークスペースルートを取得
    #[must_use]
    pub const fn workspace_root(&self) -> Option<&PathBuf> {
        self.workspace_root.as_ref()
    }

    /// 設定内の相対パスをワークスペースルート基準で解決する
    ///
    /// ワークスペースがない場合や絶対パスの場合はそのまま返す
    #[must_use]
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        match &self.workspace_root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// コンテンツルートの絶対パス
    #[must_use]
    pub fn content_root(&self) -> PathBuf {
        self.resolve(&self.current_settings.content.root)
    }

    /// 翻訳ファイルディレクトリの絶対パス
    #[must_use]
    pub fn translations_dir(&self) -> PathBuf {
        self.resolve(&self.current_settings.translations.directory)
    }
}
