use crate::utils::error::{ResolveError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolverConfig {
    pub source: SourceSettings,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Github,
    Local,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(default)]
    pub kind: SourceKind,
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub branch: Option<String>,
    /// 簡報在儲存庫中的資料夾
    pub path: Option<String>,
    /// 本地來源的根目錄
    pub root: Option<String>,
    pub api_base: Option<String>,
    pub raw_base: Option<String>,
    pub token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl ResolverConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ResolveError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ResolveError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GITHUB_TOKEN})，未設定的保留原文
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref()?.level.as_deref()
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.json)
            .unwrap_or(false)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let source = &self.source;
        match source.kind {
            SourceKind::Github => {
                let owner = validation::validate_required_field("source.owner", &source.owner)?;
                validation::validate_repo_segment("source.owner", owner)?;
                let repo = validation::validate_required_field("source.repo", &source.repo)?;
                validation::validate_repo_segment("source.repo", repo)?;
                validation::validate_non_empty_string("source.branch", source.branch())?;
                validation::validate_url("source.api_base", source.api_base())?;
                validation::validate_url("source.raw_base", source.raw_base())?;
            }
            SourceKind::Local => {
                let root = validation::validate_required_field("source.root", &source.root)?;
                validation::validate_path("source.root", root)?;
            }
        }

        validation::validate_range("source.timeout_seconds", source.timeout_seconds(), 1, 300)?;
        Ok(())
    }
}

impl SourceSettings {
    pub fn github(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Github,
            owner: Some(owner.into()),
            repo: Some(repo.into()),
            ..Default::default()
        }
    }

    pub fn local(root: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Local,
            root: Some(root.into()),
            ..Default::default()
        }
    }

    pub fn branch(&self) -> &str {
        self.branch.as_deref().unwrap_or(DEFAULT_BRANCH)
    }

    pub fn folder(&self) -> &str {
        self.path.as_deref().unwrap_or_default().trim_matches('/')
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    pub fn raw_base(&self) -> &str {
        self.raw_base.as_deref().unwrap_or(DEFAULT_RAW_BASE)
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    /// 空字串或未被替換的 ${VAR} 視為沒有 token
    pub fn token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .filter(|t| !t.trim().is_empty() && !t.starts_with("${"))
    }
}

impl Validate for ResolverConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
