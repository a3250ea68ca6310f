use crate::domain::model::ConfigDocument;
use crate::domain::ports::ContentStore;
use crate::utils::error::{ResolveError, Result};
use serde_json::Value;

/// 讀取並解析 JSON 文件
///
/// 檔案不存在、沒有內容或內容為空字串時回傳 `Ok(None)`，這是正常情況；
/// 內容無法解析時回傳 `ResolveError::MalformedDocument`。
pub async fn load_document<S: ContentStore + ?Sized>(store: &S, name: &str) -> Result<Option<Value>> {
    let Some(entry) = store.fetch_file(name).await? else {
        tracing::debug!("📄 Document '{}' not present", name);
        return Ok(None);
    };
    let Some(content) = entry.content.filter(|content| !content.is_empty()) else {
        tracing::debug!("📄 Document '{}' has no content", name);
        return Ok(None);
    };

    let document = serde_json::from_str(&content).map_err(|source| {
        ResolveError::MalformedDocument {
            name: name.to_string(),
            source,
        }
    })?;
    Ok(Some(document))
}

/// 讀取 presentation.json 並轉成 `ConfigDocument`；只有 JSON 語法錯誤才算損壞
pub async fn load_config<S: ContentStore + ?Sized>(
    store: &S,
    name: &str,
) -> Result<Option<ConfigDocument>> {
    Ok(load_document(store, name)
        .await?
        .map(ConfigDocument::from_value))
}
