//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::fs;
use std::io;
use std::path::Path;
use std::sync::{
    Arc,
    Mutex,
};

use tempfile::TempDir;

/// 一時ディレクトリ上のコンテンツツリー
pub(crate) struct ContentTree {
    /// ルートディレクトリ（drop 時に削除される）
    dir: TempDir,
}

impl ContentTree {
    /// 空のコンテンツツリーを作成する
    pub(crate) fn new() -> Self {
        Self { dir: TempDir::new().unwrap() }
    }

    /// ルートパスを取得
    pub(crate) fn root(&self) -> &Path {
        self.dir.path()
    }

    /// ルートからの相対パスにファイルを書き込む（親ディレクトリも作成）
    pub(crate) fn write(&self, relative: &str, content: &str) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

/// テスト用の記事ファイルの内容を作成する
///
/// # Arguments
/// * `title` - 記事タイトル
/// * `date` - 日付文字列
/// * `featured` - `featured: true` を付けるかどうか
pub(crate) fn post(title: &str, date: &str, featured: bool) -> String {
    let featured = if featured { "featured: true\n" } else { "" };
    format!(
        "---\ntitle: {title}\ndate: {date}\nexcerpt: About {title}\ncategory: Notes\n{featured}---\n# {title}\n"
    )
}

/// `tracing` の出力を捕捉するライター
///
/// `WARN` 以上のイベントだけを ANSI エスケープなしで記録する。
#[derive(Debug, Clone, Default)]
pub(crate) struct CapturedLogs {
    /// 書き込まれたバイト列
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    /// `f` の実行中に発生したログを捕捉する
    pub(crate) fn capture<R>(&self, f: impl FnOnce() -> R) -> R {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    /// 捕捉したログを行ごとに取得
    pub(crate) fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).lines().map(str::to_string).collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
