use crate::core::resolver::ResolvedPresentation;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// 呈現層需要的 reveal 選項與樣式表清單
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckSetup {
    pub reveal: Map<String, Value>,
    pub stylesheets: Vec<String>,
}

pub fn default_reveal_options() -> Map<String, Value> {
    let defaults = json!({
        "width": 1920,
        "height": 1080,
        "margin": 0,
        "hash": true,
        "center": true,
        "pdfMaxPagesPerSlide": 1,
        "pdfSeparateFragments": false
    });
    match defaults {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

impl DeckSetup {
    /// 預設值 < 模板的 reveal < presentation.json 的 reveal（淺層合併，後者覆蓋）
    pub fn from_resolved(resolved: &ResolvedPresentation) -> Self {
        let template = resolved.template.as_ref();
        let mut reveal = default_reveal_options();

        if let Some(layer) = template.and_then(|t| t.get("reveal")) {
            merge_layer(&mut reveal, layer);
        }
        if let Some(layer) = resolved.config.as_ref().and_then(|c| c.reveal.as_ref()) {
            merge_layer(&mut reveal, layer);
        }

        Self {
            reveal,
            stylesheets: template.map(stylesheets).unwrap_or_default(),
        }
    }
}

fn merge_layer(target: &mut Map<String, Value>, layer: &Value) {
    match layer {
        Value::Object(overrides) => {
            for (key, value) in overrides {
                target.insert(key.clone(), value.clone());
            }
        }
        other => tracing::warn!("🔶 Ignoring non-object reveal block: {}", other),
    }
}

/// 基礎主題在前，模板自訂樣式依序在後
pub fn stylesheets(template: &Value) -> Vec<String> {
    let mut sheets = Vec::new();

    if let Some(theme) = template.get("baseTheme").and_then(Value::as_str) {
        sheets.push(format!("/css/theme/{}.css", theme));
    }
    if let Some(styles) = template.get("styles").and_then(Value::as_array) {
        sheets.extend(
            styles
                .iter()
                .filter_map(Value::as_str)
                .map(|name| format!("template/{}", name)),
        );
    }
    sheets
}
