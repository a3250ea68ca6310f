use crate::core::{health, loader, substitution::substitute};
use crate::domain::model::{
    find_entry, ConfigDocument, FileEntry, FolderListing, HealthStatus, CONFIG_FILE_NAME,
    TEMPLATE_FILE_PATH, TEMPLATE_FOLDER,
};
use crate::domain::ports::ContentStore;
use crate::utils::error::Result;
use serde::Serialize;
use serde_json::Value;

/// 一次 refresh 的完整結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Resolution {
    /// 來源不可用；設定與模板都不會被讀取
    Unavailable(HealthStatus),
    Resolved(ResolvedPresentation),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPresentation {
    pub status: HealthStatus,
    pub root_listing: FolderListing,
    pub template_listing: FolderListing,
    /// presentation.json 所在位置（已去掉檔名）
    pub base_url: Option<String>,
    pub config: Option<ConfigDocument>,
    /// 已替換佔位符的模板
    pub template: Option<Value>,
}

impl Resolution {
    pub fn status(&self) -> &HealthStatus {
        match self {
            Resolution::Unavailable(status) => status,
            Resolution::Resolved(resolved) => &resolved.status,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status().ok
    }

    pub fn resolved(&self) -> Option<&ResolvedPresentation> {
        match self {
            Resolution::Unavailable(_) => None,
            Resolution::Resolved(resolved) => Some(resolved),
        }
    }

    pub fn config(&self) -> Option<&ConfigDocument> {
        self.resolved()?.config.as_ref()
    }

    pub fn template(&self) -> Option<&Value> {
        self.resolved()?.template.as_ref()
    }
}

/// 依序讀取來源清單、健康檢查、設定與模板，並替換模板佔位符
pub struct PresentationResolver<S: ContentStore> {
    store: S,
}

impl<S: ContentStore> PresentationResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 每次呼叫都從頭重新計算，不依賴前一次結果
    ///
    /// 清單讀取失敗會轉成 404 狀態而不是錯誤；
    /// 設定或模板內容無法解析時回傳錯誤。
    pub async fn refresh(&self) -> Result<Resolution> {
        tracing::info!("🔄 Refreshing presentation from {}", self.store.source_location());

        let (root_listing, template_listing) = match self.fetch_listings().await {
            Ok(listings) => listings,
            Err(e) => {
                let location = self.store.source_location();
                tracing::warn!("⚠️ Could not list presentation source {}: {}", location, e);
                return Ok(Resolution::Unavailable(HealthStatus::not_found(location)));
            }
        };

        let status = health::evaluate(&root_listing);
        if !status.ok {
            tracing::warn!("⚠️ Presentation source is not usable: {}", status.message);
            return Ok(Resolution::Unavailable(status));
        }

        let base_url = detect_base_url(&root_listing);
        tracing::info!("📍 Base URL: {}", base_url.as_deref().unwrap_or("<none>"));

        let config = loader::load_config(&self.store, CONFIG_FILE_NAME).await?;
        if config.is_none() {
            tracing::warn!("⚠️ {} is listed but has no content", CONFIG_FILE_NAME);
        }

        let template = loader::load_document(&self.store, TEMPLATE_FILE_PATH).await?;
        let template = match (template, config.as_ref().and_then(ConfigDocument::properties)) {
            (Some(template), Some(properties)) => {
                tracing::debug!("🧩 Substituting {} template properties", properties.len());
                Some(substitute(&template, properties))
            }
            (template, _) => template,
        };

        tracing::info!(
            "✅ Presentation resolved: config={}, template={}",
            config.is_some(),
            template.is_some()
        );

        Ok(Resolution::Resolved(ResolvedPresentation {
            status,
            root_listing,
            template_listing,
            base_url,
            config,
            template,
        }))
    }

    async fn fetch_listings(&self) -> Result<(FolderListing, FolderListing)> {
        let root = self.store.list_folder(None).await?;
        tracing::debug!("📂 Root folder has {} entries", root.len());
        let template = self.store.list_folder(Some(TEMPLATE_FOLDER)).await?;
        tracing::debug!("📂 Template folder has {} entries", template.len());
        Ok((root, template))
    }
}

/// 去掉 presentation.json 下載網址結尾的檔名（依字元數截斷）
pub fn detect_base_url(listing: &[FileEntry]) -> Option<String> {
    let entry = find_entry(listing, CONFIG_FILE_NAME)?;
    let keep = entry
        .download_url
        .chars()
        .count()
        .saturating_sub(CONFIG_FILE_NAME.chars().count());
    Some(entry.download_url.chars().take(keep).collect())
}
