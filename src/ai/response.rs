use serde_json::Value;

use crate::ai::types::ApiKind;

/// 一条提取规则：在解析好的响应体里找回复文本
type ExtractRule = fn(&Value) -> Option<String>;

fn chat_message_content(v: &Value) -> Option<String> {
    v.get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
        .map(|s| s.to_string())
}

fn top_level_content(v: &Value) -> Option<String> {
    v.get("content")?.as_str().map(|s| s.to_string())
}

fn top_level_text(v: &Value) -> Option<String> {
    v.get("text")?.as_str().map(|s| s.to_string())
}

/// choices[0] 里没有 message 时，把整个 choice 串成文本
fn raw_choice(v: &Value) -> Option<String> {
    let choice = v.get("choices")?.get(0)?;
    if choice.get("message").is_some() {
        return None;
    }
    Some(choice.to_string())
}

const CHAT_RULES: &[ExtractRule] = &[chat_message_content, top_level_content, top_level_text];

const GENERIC_RULES: &[ExtractRule] = &[
    chat_message_content,
    top_level_content,
    top_level_text,
    raw_choice,
];

/// 按顺序尝试提取规则，第一条命中的生效；全不命中返回 None
pub fn extract_text(kind: ApiKind, payload: &Value) -> Option<String> {
    let rules = match kind {
        ApiKind::Generic => GENERIC_RULES,
        _ => CHAT_RULES,
    };
    rules.iter().find_map(|rule| rule(payload))
}
