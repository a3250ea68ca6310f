use crate::domain::model::Properties;
use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::LazyLock;

// 整個字串剛好是一個佔位符
static EXACT_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$\{([^}]*)\}$").expect("valid exact placeholder pattern"));

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]*)\}").expect("valid placeholder pattern"));

/// 以 `properties` 遞迴替換模板中的 `${name}` 佔位符
///
/// 字串剛好等於一個佔位符時，直接回傳屬性值（可改變型別，例如變成數字或物件）；
/// 否則在字串中逐一替換，結果一定是字串。找不到的佔位符保留原文。
/// 替換後的文字不會再次掃描。
pub fn substitute(node: &Value, properties: &Properties) -> Value {
    match node {
        Value::String(text) => substitute_string(text, properties),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| substitute(item, properties))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), substitute(value, properties)))
                .collect(),
        ),
        Value::Number(_) | Value::Bool(_) | Value::Null => node.clone(),
    }
}

fn substitute_string(text: &str, properties: &Properties) -> Value {
    if let Some(caps) = EXACT_PLACEHOLDER.captures(text) {
        return match lookup(properties, &caps[1]) {
            Some(value) => value.clone(),
            None => Value::String(text.to_string()),
        };
    }

    let replaced = PLACEHOLDER.replace_all(text, |caps: &Captures| {
        match lookup(properties, &caps[1]) {
            Some(value) => to_display_string(value),
            None => caps[0].to_string(),
        }
    });
    Value::String(replaced.into_owned())
}

// null 視同未設定；0、false、"" 都是有效值
fn lookup<'a>(properties: &'a Properties, name: &str) -> Option<&'a Value> {
    properties.get(name).filter(|value| !value.is_null())
}

fn to_display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Properties {
        match value {
            Value::Object(map) => map,
            _ => panic!("properties must be an object"),
        }
    }

    #[test]
    fn test_empty_properties_is_identity() {
        let template = json!({
            "title": "${title}",
            "list": ["a", "${x} and ${y}", 3, null, true],
            "nested": {"deep": {"value": 1.5}}
        });
        assert_eq!(substitute(&template, &Properties::new()), template);
    }

    #[test]
    fn test_string_without_marker_unchanged() {
        let p = props(json!({"x": "ignored"}));
        assert_eq!(substitute(&json!("plain $ text {x}"), &p), json!("plain $ text {x}"));
    }

    #[test]
    fn test_exact_match_can_change_type() {
        let p = props(json!({"x": 42, "colors": ["red", "blue"], "font": {"size": 12}}));
        assert_eq!(substitute(&json!("${x}"), &p), json!(42));
        assert_eq!(substitute(&json!("${colors}"), &p), json!(["red", "blue"]));
        assert_eq!(substitute(&json!("${font}"), &p), json!({"size": 12}));
    }

    #[test]
    fn test_partial_match_always_yields_string() {
        let p = props(json!({"x": 42, "flag": true, "list": [1, 2]}));
        assert_eq!(substitute(&json!("a${x}b"), &p), json!("a42b"));
        assert_eq!(substitute(&json!("on=${flag}"), &p), json!("on=true"));
        assert_eq!(substitute(&json!("l=${list}"), &p), json!("l=[1,2]"));
    }

    #[test]
    fn test_partial_match_multiple_and_repeated_names() {
        let p = props(json!({"first": "Ada", "last": "Lovelace"}));
        assert_eq!(
            substitute(&json!("${first} ${last}, ${first}! ${missing}"), &p),
            json!("Ada Lovelace, Ada! ${missing}")
        );
    }

    #[test]
    fn test_adjacent_placeholders_are_not_an_exact_match() {
        let p = props(json!({"a": 1, "b": 2}));
        assert_eq!(substitute(&json!("${a}${b}"), &p), json!("12"));
    }

    #[test]
    fn test_unresolved_exact_placeholder_kept() {
        assert_eq!(
            substitute(&json!("${unknown}"), &props(json!({"x": 1}))),
            json!("${unknown}")
        );
    }

    #[test]
    fn test_replacement_is_not_rescanned() {
        let p = props(json!({"x": "${y}", "y": "deep"}));
        assert_eq!(substitute(&json!("${x}"), &p), json!("${y}"));
        assert_eq!(substitute(&json!("<${x}>"), &p), json!("<${y}>"));
    }

    #[test]
    fn test_null_property_is_treated_as_absent() {
        let p = props(json!({"x": null}));
        assert_eq!(substitute(&json!("${x}"), &p), json!("${x}"));
        assert_eq!(substitute(&json!("a${x}"), &p), json!("a${x}"));
    }

    #[test]
    fn test_falsy_but_present_values_are_substituted() {
        let p = props(json!({"zero": 0, "no": false, "empty": ""}));
        assert_eq!(substitute(&json!("${zero}"), &p), json!(0));
        assert_eq!(substitute(&json!("${no}"), &p), json!(false));
        assert_eq!(substitute(&json!("${empty}"), &p), json!(""));
        assert_eq!(substitute(&json!("[${zero}|${no}|${empty}]"), &p), json!("[0|false|]"));
    }

    #[test]
    fn test_name_may_contain_any_character_but_closing_brace() {
        let p = props(json!({"my key.with-dots": "ok", "": "empty-name"}));
        assert_eq!(substitute(&json!("${my key.with-dots}"), &p), json!("ok"));
        assert_eq!(substitute(&json!("${}"), &p), json!("empty-name"));
    }

    #[test]
    fn test_keys_are_never_substituted_and_shape_is_preserved() {
        let p = props(json!({"k": "value", "n": [1, 2, 3]}));
        let template = json!({
            "${k}": "${k}",
            "items": ["${n}", "x${k}", {"inner": "${n}"}],
            "count": 3
        });

        let result = substitute(&template, &p);

        assert_eq!(
            result,
            json!({
                "${k}": "value",
                "items": [[1, 2, 3], "xvalue", {"inner": [1, 2, 3]}],
                "count": 3
            })
        );
        let before: Vec<&String> = template.as_object().unwrap().keys().collect();
        let after: Vec<&String> = result.as_object().unwrap().keys().collect();
        assert_eq!(before, after);
        assert_eq!(result["items"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_scalars_pass_through() {
        let p = props(json!({"x": 1}));
        assert_eq!(substitute(&json!(7), &p), json!(7));
        assert_eq!(substitute(&json!(false), &p), json!(false));
        assert_eq!(substitute(&Value::Null, &p), Value::Null);
    }
}
