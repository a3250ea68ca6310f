use crate::domain::model::{FileEntry, FolderListing};
use crate::domain::ports::ContentStore;
use crate::utils::error::{ResolveError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// 記憶體內的內容來源，供單元測試使用
#[derive(Clone, Default)]
pub struct MockStore {
    folders: HashMap<String, FolderListing>,
    files: HashMap<String, Option<String>>,
    fail_listing: bool,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.add_entry(path, Some(content.to_string()));
        self
    }

    pub fn with_empty_entry(mut self, path: &str) -> Self {
        self.add_entry(path, None);
        self
    }

    /// 讓資料夾存在但沒有任何檔案
    pub fn with_folder(mut self, folder: &str) -> Self {
        self.folders.entry(folder.to_string()).or_default();
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }

    fn add_entry(&mut self, path: &str, content: Option<String>) {
        let (folder, name) = match path.rsplit_once('/') {
            Some((folder, name)) => (folder, name),
            None => ("", path),
        };
        self.folders
            .entry(folder.to_string())
            .or_default()
            .push(FileEntry::new(name, format!("https://raw.example/deck/{}", path)));
        self.files.insert(path.to_string(), content);
    }
}

#[async_trait]
impl ContentStore for MockStore {
    async fn list_folder(&self, path: Option<&str>) -> Result<FolderListing> {
        let folder = path.unwrap_or_default();
        self.requests.lock().await.push(format!("list:{}", folder));

        if self.fail_listing {
            return Err(ResolveError::SourceNotFound {
                location: self.source_location(),
            });
        }
        self.folders
            .get(folder)
            .cloned()
            .ok_or_else(|| ResolveError::SourceNotFound {
                location: format!("{}/{}", self.source_location(), folder),
            })
    }

    async fn fetch_file(&self, name: &str) -> Result<Option<FileEntry>> {
        self.requests.lock().await.push(format!("fetch:{}", name));

        let Some(content) = self.files.get(name) else {
            return Ok(None);
        };
        let mut entry = FileEntry::new(name, format!("https://raw.example/deck/{}", name));
        entry.content = content.clone();
        Ok(Some(entry))
    }

    fn source_location(&self) -> String {
        "https://example.com/deck".to_string()
    }
}
