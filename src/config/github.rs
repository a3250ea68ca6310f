use crate::config::toml_config::SourceSettings;
use crate::core::{ContentStore, FileEntry, FolderListing};
use crate::utils::error::{ResolveError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;

const USER_AGENT: &str = concat!("deck-resolver/", env!("CARGO_PKG_VERSION"));

/// 透過 GitHub contents API 列出資料夾，從 raw 網域讀取檔案
#[derive(Debug, Clone)]
pub struct GithubStore {
    client: Client,
    api_base: String,
    raw_base: String,
    owner: String,
    repo: String,
    branch: String,
    folder: String,
    token: Option<String>,
}

impl GithubStore {
    pub fn from_settings(settings: &SourceSettings) -> Result<Self> {
        let owner = settings
            .owner
            .clone()
            .ok_or_else(|| ResolveError::MissingConfigError {
                field: "source.owner".to_string(),
            })?;
        let repo = settings
            .repo
            .clone()
            .ok_or_else(|| ResolveError::MissingConfigError {
                field: "source.repo".to_string(),
            })?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(settings.timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            api_base: settings.api_base().trim_end_matches('/').to_string(),
            raw_base: settings.raw_base().trim_end_matches('/').to_string(),
            owner,
            repo,
            branch: settings.branch().to_string(),
            folder: settings.folder().to_string(),
            token: settings.token().map(str::to_string),
        })
    }

    /// 來源資料夾底下的相對路徑
    fn repo_path(&self, sub: Option<&str>) -> String {
        [self.folder.as_str(), sub.unwrap_or_default().trim_matches('/')]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("/")
    }

    fn listing_url(&self, sub: Option<&str>) -> String {
        let path = self.repo_path(sub);
        let mut url = format!("{}/repos/{}/{}/contents", self.api_base, self.owner, self.repo);
        if !path.is_empty() {
            url.push('/');
            url.push_str(&path);
        }
        url
    }

    fn file_url(&self, name: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.raw_base,
            self.owner,
            self.repo,
            self.branch,
            self.repo_path(Some(name))
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl ContentStore for GithubStore {
    async fn list_folder(&self, path: Option<&str>) -> Result<FolderListing> {
        let url = self.listing_url(path);
        tracing::debug!("📡 Listing folder: {}", url);

        let request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .query(&[("ref", &self.branch)]);
        let response = self.authorize(request).send().await?;
        tracing::debug!("📡 Listing response status: {}", response.status());

        match response.status() {
            status if status.is_success() => Ok(response.json::<FolderListing>().await?),
            StatusCode::NOT_FOUND => Err(ResolveError::SourceNotFound { location: url }),
            status => Err(ResolveError::HttpStatus {
                url,
                status: status.as_u16(),
            }),
        }
    }

    async fn fetch_file(&self, name: &str) -> Result<Option<FileEntry>> {
        let url = self.file_url(name);
        tracing::debug!("📡 Fetching file: {}", url);

        let response = self.authorize(self.client.get(&url)).send().await?;

        match response.status() {
            status if status.is_success() => {
                let content = response.text().await?;
                Ok(Some(FileEntry::new(name, url).with_content(content)))
            }
            StatusCode::NOT_FOUND => {
                tracing::debug!("📡 File not found: {}", url);
                Ok(None)
            }
            status => Err(ResolveError::HttpStatus {
                url,
                status: status.as_u16(),
            }),
        }
    }

    fn source_location(&self) -> String {
        let mut location = format!(
            "https://github.com/{}/{}/tree/{}",
            self.owner, self.repo, self.branch
        );
        if !self.folder.is_empty() {
            location.push('/');
            location.push_str(&self.folder);
        }
        location
    }
}
