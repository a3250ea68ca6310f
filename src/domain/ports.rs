use crate::domain::model::{FileEntry, FolderListing};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 遠端（或本地）內容來源
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// 列出資料夾內容；`None` 代表來源根目錄
    async fn list_folder(&self, path: Option<&str>) -> Result<FolderListing>;

    /// 讀取單一檔案；檔案不存在時回傳 `Ok(None)`
    async fn fetch_file(&self, name: &str) -> Result<Option<FileEntry>>;

    /// 可顯示給使用者的來源位置，只用於錯誤訊息
    fn source_location(&self) -> String;
}

#[async_trait]
impl<S: ContentStore + ?Sized> ContentStore for Box<S> {
    async fn list_folder(&self, path: Option<&str>) -> Result<FolderListing> {
        (**self).list_folder(path).await
    }

    async fn fetch_file(&self, name: &str) -> Result<Option<FileEntry>> {
        (**self).fetch_file(name).await
    }

    fn source_location(&self) -> String {
        (**self).source_location()
    }
}

#[async_trait]
impl<S: ContentStore + ?Sized> ContentStore for &S {
    async fn list_folder(&self, path: Option<&str>) -> Result<FolderListing> {
        (**self).list_folder(path).await
    }

    async fn fetch_file(&self, name: &str) -> Result<Option<FileEntry>> {
        (**self).fetch_file(name).await
    }

    fn source_location(&self) -> String {
        (**self).source_location()
    }
}
