use regex::Regex;
use serde_json::Value;

/// 组合改进调用的解析结果
#[derive(Clone, Debug, Default)]
pub struct ImprovedPrompt {
    pub improved: String,
    pub alternatives: Vec<String>,
}

/// 去掉模型喜欢加的一层引号
pub fn strip_quotes(s: &str) -> String {
    let mut t = s.trim();
    if t.len() >= 2 && t.starts_with('"') && t.ends_with('"') {
        t = &t[1..t.len() - 1];
    }
    if t.len() >= 2 && t.starts_with('\'') && t.ends_with('\'') {
        t = &t[1..t.len() - 1];
    }
    t.to_string()
}

/// 从模型回复里解析候选提示词，最多 3 条。
/// 依次尝试："OPTION n:" 分段 -> 编号列表 -> 非空行。
pub fn parse_alternatives(response: &str) -> Vec<String> {
    let marker = Regex::new(r"(?i)OPTION\s+\d+\s*:").unwrap();
    let mut parts: Vec<String> = marker
        .split(response)
        .skip(1)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if parts.is_empty() {
        // 兜底 1：编号列表 "1. xxx" / "2) xxx"
        let numbered = Regex::new(r"(?m)^\s*\d+[.)]\s*").unwrap();
        parts = numbered
            .split(response)
            .skip(1)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .take(3)
            .collect();
    }

    if parts.is_empty() {
        // 兜底 2：非空行直接当作候选
        parts = response
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .take(3)
            .collect();
    }

    // 清理残留的标记和引号
    let marker_residue = Regex::new(r"(?i)^OPTION\s+\d+\s*:\s*").unwrap();
    let number_residue = Regex::new(r"^\d+[.)]\s*").unwrap();
    let mut cleaned = Vec::new();
    for alt in parts {
        let alt = strip_quotes(&alt);
        let alt = marker_residue.replace(&alt, "");
        let alt = number_residue.replace(&alt, "");
        let alt = alt.trim().to_string();
        if !alt.is_empty() {
            cleaned.push(alt);
        }
    }
    cleaned.truncate(3);
    cleaned
}

fn improved_from_value(v: &Value) -> Option<ImprovedPrompt> {
    let improved = v.get("improved")?.as_str()?.to_string();
    let alternatives = v
        .get("alternatives")?
        .as_array()?
        .iter()
        .filter_map(|a| a.as_str())
        .map(|s| s.to_string())
        .take(3)
        .collect();
    Some(ImprovedPrompt {
        improved,
        alternatives,
    })
}

/// 解析组合回复的 JSON 格式：先找嵌在文本里的对象，再整体解析
pub fn parse_combined_json(response: &str) -> Option<ImprovedPrompt> {
    let embedded = Regex::new(r#"(?s)\{[^{}]*"improved"[^{}]*"alternatives"[^{}]*\}"#).unwrap();
    if let Some(m) = embedded.find(response) {
        if let Ok(v) = serde_json::from_str::<Value>(m.as_str()) {
            if let Some(parsed) = improved_from_value(&v) {
                return Some(parsed);
            }
        }
    }

    let v: Value = serde_json::from_str(response.trim()).ok()?;
    improved_from_value(&v)
}

/// 解析组合回复的文本格式（IMPROVED: / ALTERNATIVES:），
/// 没有标记时把第一行当改进结果、后续行当候选
pub fn parse_combined_text(response: &str) -> Option<ImprovedPrompt> {
    let imp_re = Regex::new(r"(?i)IMPROVED\s*:").unwrap();
    let alt_re = Regex::new(r"(?i)ALTERNATIVES\s*:").unwrap();

    let alt_at = alt_re.find(response);
    let mut improved = String::new();
    let mut alternatives = Vec::new();

    if let Some(m) = imp_re.find(response) {
        let end = alt_at.map(|a| a.start()).unwrap_or(response.len());
        if m.end() <= end {
            improved = response[m.end()..end].trim().to_string();
        }
    }
    if let Some(a) = alt_at {
        alternatives = parse_alternatives(&response[a.end()..]);
    }

    if improved.is_empty() {
        let lines: Vec<&str> = response
            .lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect();
        if let Some(first) = lines.first() {
            improved = first.to_string();
            alternatives = lines.iter().skip(1).take(3).map(|s| s.to_string()).collect();
        }
    }

    if improved.is_empty() {
        None
    } else {
        Some(ImprovedPrompt {
            improved,
            alternatives,
        })
    }
}
