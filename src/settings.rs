use std::path::Path;

use anyhow::Context;

use crate::ai::EndpointConfig;

/// 先加载 .env，再加载 .env.local 补充（已存在的变量不会被覆盖）
pub fn load_env() {
    let _ = dotenv::dotenv();
    let _ = dotenv::from_filename(".env.local");
}

/// 按环境变量名取 API-Key；未设置或为空都视为缺失
pub fn get_api_key(api_id: &str) -> Option<String> {
    match std::env::var(api_id) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}

pub fn get_setting(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// 端点清单文件路径（默认 endpoints.json）
pub fn endpoints_path() -> String {
    get_setting("ENDPOINTS_PATH", "endpoints.json")
}

/// 从 JSON 文件加载端点清单，逐条校验
pub fn load_endpoints(path: impl AsRef<Path>) -> anyhow::Result<Vec<EndpointConfig>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("无法读取端点清单: {}", path.display()))?;
    let endpoints: Vec<EndpointConfig> = serde_json::from_str(&content)
        .with_context(|| format!("端点清单格式错误: {}", path.display()))?;
    for cfg in &endpoints {
        if let Err(msg) = cfg.validate() {
            anyhow::bail!("端点 '{}' 配置无效: {}", cfg.name, msg);
        }
    }
    Ok(endpoints)
}

pub fn active_endpoints(endpoints: &[EndpointConfig]) -> Vec<EndpointConfig> {
    endpoints.iter().filter(|e| e.is_active).cloned().collect()
}
