use std::sync::Arc;

use log::{info, warn};
use tokio::sync::mpsc;

use crate::ai::build_llm_http_client;
use crate::ai::request::{build_chat_body, detect_api_kind};
use crate::ai::response::extract_text;
use crate::ai::transport::{HttpTransport, Transport};
use crate::ai::types::{DispatchCallback, DispatchError, DispatchResult, EndpointConfig};
use crate::settings;

/// 默认请求超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 并发派发器：一个端点一个 worker，全部完成后统一返回
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    timeout_secs: u64,
}

impl Dispatcher {
    pub fn new() -> Result<Self, DispatchError> {
        let client = build_llm_http_client()?;
        Ok(Self {
            transport: Arc::new(HttpTransport::new(client)),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// 单端点完整流水线：取 key -> 识别方言 -> 组包 -> 发送 -> 提取文本
    pub async fn send_to_endpoint(
        &self,
        cfg: &EndpointConfig,
        prompt: &str,
    ) -> Result<String, DispatchError> {
        // key 取不到就直接失败，不发网络请求
        let api_key = settings::get_api_key(&cfg.api_id)
            .ok_or_else(|| DispatchError::MissingKey(cfg.api_id.clone()))?;

        let kind = detect_api_kind(&cfg.api_url);
        let body = build_chat_body(kind, cfg, prompt);
        let payload = self
            .transport
            .post_chat(&cfg.api_url, &api_key, &body, self.timeout_secs)
            .await?;

        extract_text(kind, &payload).ok_or(DispatchError::MalformedResponse)
    }

    /// 并发发给所有端点，结果按完成顺序返回。
    /// 单个端点失败只影响自己的结果，不会中断其他 worker。
    pub async fn send_to_all(
        &self,
        endpoints: &[EndpointConfig],
        prompt: &str,
        callback: Option<DispatchCallback>,
    ) -> Vec<DispatchResult> {
        let total = endpoints.len();
        info!("🚀 开始并发派发: {} 个端点", total);

        let (tx, mut rx) = mpsc::unbounded_channel();
        for cfg in endpoints.iter().cloned() {
            let tx = tx.clone();
            let dispatcher = self.clone();
            let prompt = prompt.to_string();
            tokio::spawn(async move {
                let result = match dispatcher.send_to_endpoint(&cfg, &prompt).await {
                    Ok(text) => DispatchResult {
                        endpoint: cfg.name.clone(),
                        success: true,
                        text,
                    },
                    Err(e) => DispatchResult {
                        endpoint: cfg.name.clone(),
                        success: false,
                        text: e.to_string(),
                    },
                };
                // 发送是 worker 的最后一步，接收满 N 条即全部完成
                let _ = tx.send((cfg, result));
            });
        }
        drop(tx);

        let mut results = Vec::with_capacity(total);
        while let Some((cfg, result)) = rx.recv().await {
            if result.success {
                info!(
                    "✓ [{}] 响应成功 ({} 字符)",
                    result.endpoint,
                    result.text.chars().count()
                );
            } else {
                warn!("✗ [{}] 请求失败: {}", result.endpoint, result.text);
            }
            if let Some(cb) = &callback {
                cb(&cfg, result.success, &result.text);
            }
            results.push(result);
        }

        info!("全部端点已完成: {}/{}", results.len(), total);
        results
    }
}
