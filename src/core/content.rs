use crate::domain::model::{ConfigDocument, ContentBody};
use crate::domain::ports::ContentStore;
use crate::utils::error::{ResolveError, Result};
use serde_json::Value;

/// 依 `contents` 的順序讀取所有內容檔
pub async fn load_contents<S: ContentStore + ?Sized>(
    store: &S,
    config: &ConfigDocument,
) -> Result<Vec<ContentBody>> {
    let names = content_names(config.contents.as_ref())?;

    let mut bodies = Vec::with_capacity(names.len());
    for (index, name) in names.iter().enumerate() {
        tracing::debug!("📥 Fetching content {}/{}: {}", index + 1, names.len(), name);
        let content = store.fetch_file(name).await?.and_then(|entry| entry.content);
        if content.is_none() {
            tracing::warn!("🔶 Content file '{}' is missing", name);
        }
        bodies.push(ContentBody {
            name: name.clone(),
            content,
        });
    }

    tracing::info!("📥 Loaded {} content files", bodies.len());
    Ok(bodies)
}

fn content_names(contents: Option<&Value>) -> Result<Vec<String>> {
    let invalid = |reason: String| ResolveError::InvalidContents { reason };

    match contents {
        None | Some(Value::Null) => Err(invalid(
            "presentation config does not list any contents".to_string(),
        )),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| invalid(format!("content entry {} is not a file name", item)))
            })
            .collect(),
        Some(other) => Err(invalid(format!(
            "expected a list of file names, found {}",
            other
        ))),
    }
}
