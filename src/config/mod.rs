pub mod github;
pub mod local;
pub mod toml_config;

use crate::core::ContentStore;
use crate::utils::error::{ResolveError, Result};
use github::GithubStore;
use local::LocalStore;
use toml_config::{ResolverConfig, SourceKind, SourceSettings};

#[cfg(feature = "cli")]
use clap::Parser;

/// 依設定建立對應的內容來源
pub fn build_store(settings: &SourceSettings) -> Result<Box<dyn ContentStore>> {
    match settings.kind {
        SourceKind::Github => {
            let store = GithubStore::from_settings(settings)?;
            tracing::info!("🌐 Using GitHub source: {}", store.source_location());
            Ok(Box::new(store))
        }
        SourceKind::Local => {
            let root = settings
                .root
                .as_deref()
                .ok_or_else(|| ResolveError::MissingConfigError {
                    field: "source.root".to_string(),
                })?;
            tracing::info!("📁 Using local source: {}", root);
            Ok(Box::new(LocalStore::new(root)))
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "deck-resolver")]
#[command(about = "Resolve a presentation's configuration and template from its source folder")]
pub struct CliConfig {
    /// GitHub repository as owner/name
    #[arg(long)]
    pub repo: Option<String>,

    #[arg(long, help = "Branch to read from (default: main)")]
    pub branch: Option<String>,

    #[arg(long, help = "Folder of the presentation inside the repository")]
    pub path: Option<String>,

    /// Local presentation folder instead of a GitHub repository
    #[arg(long, conflicts_with = "repo")]
    pub local: Option<String>,

    /// Path to a TOML resolver configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, help = "Also fetch the content files listed in presentation.json")]
    pub with_contents: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 設定檔為基礎，命令列參數覆蓋
    pub fn resolver_config(&self) -> Result<ResolverConfig> {
        let mut config = match &self.config {
            Some(path) => ResolverConfig::from_file(path)?,
            None if self.repo.is_none() && self.local.is_none() => {
                return Err(ResolveError::MissingConfigError {
                    field: "--repo, --local or --config".to_string(),
                })
            }
            None => ResolverConfig::default(),
        };

        if let Some(root) = &self.local {
            config.source.kind = SourceKind::Local;
            config.source.root = Some(root.clone());
        }

        if let Some(repo) = &self.repo {
            let (owner, name) = repo.split_once('/').ok_or_else(|| {
                ResolveError::InvalidConfigValueError {
                    field: "--repo".to_string(),
                    value: repo.clone(),
                    reason: "Expected the form owner/name".to_string(),
                }
            })?;
            config.source.kind = SourceKind::Github;
            config.source.owner = Some(owner.to_string());
            config.source.repo = Some(name.to_string());
        }

        if let Some(branch) = &self.branch {
            config.source.branch = Some(branch.clone());
        }
        if let Some(path) = &self.path {
            config.source.path = Some(path.clone());
        }

        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_repo_flag_builds_github_source() {
        let cli = CliConfig::parse_from([
            "deck-resolver",
            "--repo",
            "radkovo/slides",
            "--branch",
            "gh-pages",
            "--path",
            "talk",
        ]);

        let config = cli.resolver_config().unwrap();

        assert_eq!(config.source.kind, SourceKind::Github);
        assert_eq!(config.source.owner.as_deref(), Some("radkovo"));
        assert_eq!(config.source.repo.as_deref(), Some("slides"));
        assert_eq!(config.source.branch(), "gh-pages");
        assert_eq!(config.source.folder(), "talk");
    }

    #[test]
    fn test_local_flag_builds_local_source() {
        let cli = CliConfig::parse_from(["deck-resolver", "--local", "./deck"]);
        let config = cli.resolver_config().unwrap();
        assert_eq!(config.source.kind, SourceKind::Local);
        assert_eq!(config.source.root.as_deref(), Some("./deck"));
    }

    #[test]
    fn test_no_source_is_missing_config() {
        let cli = CliConfig::parse_from(["deck-resolver"]);
        assert!(matches!(
            cli.resolver_config(),
            Err(ResolveError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_repo_without_owner_is_invalid() {
        let cli = CliConfig::parse_from(["deck-resolver", "--repo", "slides"]);
        assert!(matches!(
            cli.resolver_config(),
            Err(ResolveError::InvalidConfigValueError { .. })
        ));
    }

    #[tokio::test]
    async fn test_build_store_local() {
        let store = build_store(&SourceSettings::local("/tmp/deck")).unwrap();
        assert_eq!(store.source_location(), "/tmp/deck");
    }
}
