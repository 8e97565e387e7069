//! Entry point for the blog content checker.
//!
//! Loads `.blog-i18n.json`, every translation file and every post, then
//! prints a JSON summary to stdout. Diagnostics go to stderr.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use blog_i18n::config::{
    ConfigError,
    ConfigManager,
};
use blog_i18n::content::{
    ContentError,
    ContentRepository,
};
use blog_i18n::report::SiteReport;
use blog_i18n::translation::{
    TranslationCatalog,
    TranslationLoadError,
};
use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "blog-i18n")]
#[command(version)]
#[command(about = "Check a multilingual blog's translations and posts, then print a JSON summary")]
#[command(long_about = None)]
struct Cli {
    /// Workspace holding `.blog-i18n.json`
    #[arg(value_name = "WORKSPACE", default_value = ".")]
    workspace: PathBuf,

    /// Fail on any translation warning, whatever the settings file says
    #[arg(long)]
    strict: bool,
}

/// Anything that stops the report from being produced.
#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Translation(#[from] TranslationLoadError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("Failed to write report: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Load the workspace named on the command line and summarize it.
fn build_report(cli: &Cli) -> Result<SiteReport, AppError> {
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(Some(cli.workspace.clone()))?;
    let settings = config_manager.get_settings();
    let locales = config_manager.locales();
    let strict = cli.strict || settings.strict;

    let catalog = TranslationCatalog::load_dir(
        &config_manager.translations_dir(),
        &locales,
        &settings.translations.key_separator,
        strict,
    )?;
    tracing::info!(tables = catalog.len(), strict, "Loaded translations");

    let repository =
        ContentRepository::from_settings(config_manager.content_root(), &settings.content, locales)?;
    Ok(SiteReport::collect(&repository, &catalog)?)
}

/// Build the report and print it.
fn run(cli: &Cli) -> Result<(), AppError> {
    let report = build_report(cli)?;

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report)?;
    writeln!(stdout)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;
    use std::path::Path;

    use blog_i18n::translation::TranslationError;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    /// 翻訳キーが揃っていないワークスペースを作成
    fn inconsistent_workspace(settings: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".blog-i18n.json"), settings).unwrap();
        fs::create_dir_all(dir.path().join("translations")).unwrap();
        fs::write(
            dir.path().join("translations/common.json"),
            r#"{"en": {"home": "Home", "backToBlog": "Back to Blog"}, "ja": {"home": "ホーム"}}"#,
        )
        .unwrap();
        dir
    }

    fn cli(workspace: &Path, strict: bool) -> Cli {
        Cli { workspace: workspace.to_path_buf(), strict }
    }

    #[rstest]
    fn test_workspace_defaults_to_current_directory() {
        let cli = Cli::try_parse_from(["blog-i18n"]).unwrap();

        assert_eq!(cli.workspace, PathBuf::from("."));
        assert!(!cli.strict);
    }

    #[rstest]
    fn test_parse_workspace_and_strict() {
        let cli = Cli::try_parse_from(["blog-i18n", "site", "--strict"]).unwrap();

        assert_eq!(cli.workspace, PathBuf::from("site"));
        assert!(cli.strict);
    }

    #[rstest]
    #[case("--help")]
    #[case("--version")]
    fn test_help_and_version_are_not_workspaces(#[case] flag: &str) {
        let err = Cli::try_parse_from(["blog-i18n", flag]).unwrap_err();

        assert!(matches!(
            err.kind(),
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
        ));
    }

    #[rstest]
    fn test_strict_flag_overrides_settings() {
        let workspace = inconsistent_workspace("{}");

        let lenient = build_report(&cli(workspace.path(), false));
        let strict = build_report(&cli(workspace.path(), true));

        assert!(lenient.is_ok());
        assert!(matches!(
            strict,
            Err(AppError::Translation(TranslationLoadError::Rejected(TranslationError::Strict(_))))
        ));
    }

    #[rstest]
    fn test_strict_setting_applies_without_flag() {
        let workspace = inconsistent_workspace(r#"{"strict": true}"#);

        let result = build_report(&cli(workspace.path(), false));

        assert!(matches!(result, Err(AppError::Translation(_))));
    }
}
