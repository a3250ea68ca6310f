use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// 設定檔必須存在的檔名
pub const CONFIG_FILE_NAME: &str = "presentation.json";
/// 模板定義檔（相對於來源根目錄）
pub const TEMPLATE_FILE_PATH: &str = "template/template.json";
/// 模板子資料夾
pub const TEMPLATE_FOLDER: &str = "template";

/// 佔位符名稱 -> 替換值
pub type Properties = Map<String, Value>;

/// 資料夾清單中的一個項目；`content` 只有在明確讀取檔案後才會有值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub download_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, download_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            download_url: download_url.into(),
            content: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

// GitHub 對資料夾項目回傳 "download_url": null
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

pub type FolderListing = Vec<FileEntry>;

/// 以完全相同的檔名（區分大小寫）查找項目
pub fn find_entry<'a>(listing: &'a [FileEntry], name: &str) -> Option<&'a FileEntry> {
    listing.iter().find(|entry| entry.name == name)
}

/// 來源健康狀態；`ok == false` 時一定帶有訊息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            ok: true,
            code: None,
            message: "presentation ok".to_string(),
            source: None,
        }
    }

    pub fn missing_config() -> Self {
        Self {
            ok: false,
            code: None,
            message: "presentation source missing required configuration document".to_string(),
            source: None,
        }
    }

    pub fn not_found(source_location: impl Into<String>) -> Self {
        Self {
            ok: false,
            code: Some(404),
            message: "presentation data not found in referenced source".to_string(),
            source: Some(source_location.into()),
        }
    }

    /// 給最終使用者看的訊息；有 code 時附上來源位置
    pub fn display_message(&self) -> String {
        match (&self.code, &self.source) {
            (Some(_), Some(source)) => format!("{}: {}", self.message, source),
            _ => self.message.clone(),
        }
    }
}

/// presentation.json 的內容
///
/// 已知欄位保留原始 JSON，形狀不符時不視為錯誤；
/// `template` 不是物件或 `properties` 不是物件時只是沒有可替換的屬性。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// 內容檔名清單，決定呈現順序；在讀取內容時才檢查形狀
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<Value>,
    /// 直接轉交給呈現層，不做解讀
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConfigDocument {
    /// 由已解析的 JSON 建立；頂層不是物件時視為空設定
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut extra) = value else {
            tracing::warn!("🔶 presentation config is not a JSON object, ignoring its fields");
            return Self::default();
        };
        Self {
            contents: extra.remove("contents"),
            template: extra.remove("template"),
            reveal: extra.remove("reveal"),
            extra,
        }
    }

    pub fn properties(&self) -> Option<&Properties> {
        self.template.as_ref()?.get("properties")?.as_object()
    }
}

/// 單一內容檔的讀取結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentBody {
    pub name: String,
    pub content: Option<String>,
}
