use serde::Deserialize;

/// 单个 AI 端点的配置，来自端点清单文件
#[derive(Clone, Debug, Deserialize)]
pub struct EndpointConfig {
    pub name: String,
    pub api_url: String,
    /// 存放 API-Key 的环境变量名，例如 OPENAI_API_KEY
    pub api_id: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl EndpointConfig {
    /// 基础校验：关键字段非空，URL 必须是 http(s)
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("端点名称不能为空".to_string());
        }
        if self.api_url.trim().is_empty() {
            return Err("API URL 不能为空".to_string());
        }
        if self.api_id.trim().is_empty() {
            return Err("API-Key 环境变量名不能为空".to_string());
        }
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(format!(
                "API URL 必须以 http:// 或 https:// 开头: {}",
                self.api_url
            ));
        }
        Ok(())
    }
}

/// 端点所讲的接口方言，由 URL 推断
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiKind {
    OpenAi,
    DeepSeek,
    Groq,
    Generic,
}

/// 一次派发里每个端点的最终结果
#[derive(Clone, Debug)]
pub struct DispatchResult {
    pub endpoint: String,
    pub success: bool,
    /// 成功时是模型回复文本，失败时是错误描述
    pub text: String,
}

#[derive(thiserror::Error, Debug)]
pub enum DispatchError {
    #[error("api key '{0}' is not set in environment")]
    MissingKey(String),
    #[error("request timed out ({0}s)")]
    Timeout(u64),
    #[error("network error: {0}")]
    Network(String),
    #[error("http status {0}: {1}")]
    HttpStatus(u16, String),
    #[error("unexpected response format")]
    MalformedResponse,
    #[error("unexpected error: {0}")]
    Unknown(String),
}

/// 每个端点完成时的回调，由派发器的接收侧串行调用
pub type DispatchCallback = Box<dyn Fn(&EndpointConfig, bool, &str) + Send + Sync>;
