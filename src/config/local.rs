use crate::core::{ContentStore, FileEntry, FolderListing};
use crate::utils::error::{ResolveError, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use url::Url;

/// 以本地資料夾作為簡報來源
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn download_url(path: &Path) -> String {
        Url::from_file_path(path)
            .map(String::from)
            .unwrap_or_else(|_| path.display().to_string())
    }
}

#[async_trait]
impl ContentStore for LocalStore {
    async fn list_folder(&self, path: Option<&str>) -> Result<FolderListing> {
        let dir = match path {
            Some(sub) => self.root.join(sub),
            None => self.root.clone(),
        };
        tracing::debug!("📂 Listing local folder: {}", dir.display());

        let mut reader = match tokio::fs::read_dir(&dir).await {
            Ok(reader) => reader,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ResolveError::SourceNotFound {
                    location: dir.display().to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        let mut listing = Vec::new();
        while let Some(item) = reader.next_entry().await? {
            let name = item.file_name().to_string_lossy().into_owned();
            // 資料夾沒有下載網址，與 GitHub 清單一致
            let download_url = if item.file_type().await?.is_dir() {
                String::new()
            } else {
                Self::download_url(&item.path())
            };
            listing.push(FileEntry::new(name, download_url));
        }
        listing.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(listing)
    }

    async fn fetch_file(&self, name: &str) -> Result<Option<FileEntry>> {
        let path = self.root.join(name);
        tracing::debug!("📄 Reading local file: {}", path.display());

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(
                FileEntry::new(name, Self::download_url(&path)).with_content(content),
            )),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn source_location(&self) -> String {
        self.root.display().to_string()
    }
}
