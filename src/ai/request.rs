use serde_json::{json, Value};

use crate::ai::types::{ApiKind, EndpointConfig};

/// URL 里的域名标记，按表内顺序匹配，先中者胜
const KIND_MARKERS: &[(&str, ApiKind)] = &[
    ("openai.com", ApiKind::OpenAi),
    ("deepseek.com", ApiKind::DeepSeek),
    ("groq.com", ApiKind::Groq),
];

pub fn detect_api_kind(api_url: &str) -> ApiKind {
    let url = api_url.to_lowercase();
    for (marker, kind) in KIND_MARKERS {
        if url.contains(marker) {
            return *kind;
        }
    }
    ApiKind::Generic
}

const TEMPERATURE: f64 = 0.7;

fn openai_model_id(name: &str) -> String {
    let n = name.to_lowercase().replace(' ', "-");
    if n.contains("gpt-4") {
        "gpt-4".to_string()
    } else {
        // gpt-3.5 命中与兜底是同一个 id
        "gpt-3.5-turbo".to_string()
    }
}

fn groq_model_id(name: &str) -> String {
    let n = name.to_lowercase();
    if n.contains("llama") {
        "llama3-8b-8192".to_string()
    } else if n.contains("mixtral") {
        "mixtral-8x7b-32768".to_string()
    } else {
        "llama3-8b-8192".to_string()
    }
}

/// 按方言组请求体：单轮对话，提示词原样放进 user 消息
pub fn build_chat_body(kind: ApiKind, cfg: &EndpointConfig, prompt: &str) -> Value {
    match kind {
        ApiKind::OpenAi => json!({
            "model": openai_model_id(&cfg.name),
            "messages": [{"role": "user", "content": prompt}],
            "temperature": TEMPERATURE,
        }),
        ApiKind::DeepSeek => json!({
            "model": "deepseek-chat",
            "messages": [{"role": "user", "content": prompt}],
            "temperature": TEMPERATURE,
        }),
        // Groq 不带 temperature
        ApiKind::Groq => json!({
            "messages": [{"role": "user", "content": prompt}],
            "model": groq_model_id(&cfg.name),
        }),
        // 通用方言直接用端点名当 model id，不带 temperature
        ApiKind::Generic => json!({
            "model": cfg.name,
            "messages": [{"role": "user", "content": prompt}],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(name: &str, url: &str) -> EndpointConfig {
        EndpointConfig {
            name: name.to_string(),
            api_url: url.to_string(),
            api_id: "K".to_string(),
            is_active: true,
        }
    }

    #[test]
    fn detect_matches_known_domains() {
        assert_eq!(
            detect_api_kind("https://api.openai.com/v1/chat"),
            ApiKind::OpenAi
        );
        assert_eq!(
            detect_api_kind("https://api.deepseek.com/chat/completions"),
            ApiKind::DeepSeek
        );
        assert_eq!(detect_api_kind("https://api.groq.com/x"), ApiKind::Groq);
        assert_eq!(detect_api_kind("https://example.com/x"), ApiKind::Generic);
    }

    #[test]
    fn detect_is_case_insensitive_and_deterministic() {
        assert_eq!(detect_api_kind("https://API.OPENAI.COM/v1"), ApiKind::OpenAi);
        assert_eq!(
            detect_api_kind("https://api.groq.com/x"),
            detect_api_kind("https://api.groq.com/x")
        );
    }

    #[test]
    fn openai_model_heuristic() {
        assert_eq!(openai_model_id("My GPT-4 Turbo"), "gpt-4");
        // 空格会先换成连字符再匹配
        assert_eq!(openai_model_id("gpt 4"), "gpt-4");
        assert_eq!(openai_model_id("GPT-3.5 fast"), "gpt-3.5-turbo");
        assert_eq!(openai_model_id("something else"), "gpt-3.5-turbo");
    }

    #[test]
    fn groq_model_heuristic_prefers_llama_first() {
        assert_eq!(groq_model_id("Llama 3"), "llama3-8b-8192");
        assert_eq!(groq_model_id("Mixtral 8x7b"), "mixtral-8x7b-32768");
        // 同时出现时 llama 在前
        assert_eq!(groq_model_id("llama or mixtral"), "llama3-8b-8192");
        assert_eq!(groq_model_id("Groq Fast"), "llama3-8b-8192");
    }

    #[test]
    fn openai_body_has_temperature() {
        let cfg = config("GPT-4", "https://api.openai.com/v1/chat");
        let body = build_chat_body(ApiKind::OpenAi, &cfg, "hello");
        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hello");
    }

    #[test]
    fn deepseek_body_uses_fixed_model() {
        let cfg = config("DeepSeek Chat", "https://api.deepseek.com/chat");
        let body = build_chat_body(ApiKind::DeepSeek, &cfg, "hi");
        assert_eq!(body["model"], "deepseek-chat");
        assert_eq!(body["temperature"], 0.7);
    }

    #[test]
    fn groq_and_generic_bodies_omit_temperature() {
        let groq = build_chat_body(
            ApiKind::Groq,
            &config("Llama 3", "https://api.groq.com/x"),
            "hi",
        );
        assert!(groq.get("temperature").is_none());
        assert_eq!(groq["model"], "llama3-8b-8192");

        let generic = build_chat_body(
            ApiKind::Generic,
            &config("my-local-model", "https://example.com/x"),
            "hi",
        );
        assert!(generic.get("temperature").is_none());
        // 通用方言用端点名原样当 model id
        assert_eq!(generic["model"], "my-local-model");
    }

    #[test]
    fn prompt_is_passed_verbatim() {
        let prompt = "  line one\nline two  ";
        let body = build_chat_body(
            ApiKind::Generic,
            &config("m", "https://example.com"),
            prompt,
        );
        assert_eq!(body["messages"][0]["content"], prompt);
    }
}
