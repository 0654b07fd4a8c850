use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::ai::types::DispatchError;

/// 真正把请求发出去的一层。抽成 trait 方便测试里换成假实现。
#[async_trait]
pub trait Transport: Send + Sync {
    /// 单次 POST，带 Bearer 认证和本次调用的超时；不做任何重试
    async fn post_chat(
        &self,
        api_url: &str,
        api_key: &str,
        body: &Value,
        timeout_secs: u64,
    ) -> Result<Value, DispatchError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn map_send_error(e: reqwest::Error, timeout_secs: u64) -> DispatchError {
    if e.is_timeout() {
        DispatchError::Timeout(timeout_secs)
    } else {
        DispatchError::Network(e.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_chat(
        &self,
        api_url: &str,
        api_key: &str,
        body: &Value,
        timeout_secs: u64,
    ) -> Result<Value, DispatchError> {
        let resp = self
            .client
            .post(api_url)
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .timeout(Duration::from_secs(timeout_secs))
            .json(body)
            .send()
            .await
            .map_err(|e| map_send_error(e, timeout_secs))?;

        let status = resp.status();
        let raw = resp
            .text()
            .await
            .map_err(|e| map_send_error(e, timeout_secs))?;

        if !status.is_success() {
            let snippet: String = raw.chars().take(500).collect();
            return Err(DispatchError::HttpStatus(status.as_u16(), snippet));
        }

        serde_json::from_str(&raw)
            .map_err(|e| DispatchError::Unknown(format!("json parse failed: {e}")))
    }
}
