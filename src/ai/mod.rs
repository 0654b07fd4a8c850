pub mod dispatch;
pub mod request;
pub mod response;
pub mod transport;
pub mod types;

pub use dispatch::{Dispatcher, DEFAULT_TIMEOUT_SECS};
pub use request::detect_api_kind;
pub use transport::{HttpTransport, Transport};
pub use types::{ApiKind, DispatchCallback, DispatchError, DispatchResult, EndpointConfig};

pub(crate) fn build_llm_http_client() -> Result<reqwest::Client, DispatchError> {
    let mut builder = reqwest::Client::builder();

    if let Ok(raw) = std::env::var("LLM_PROXY") {
        let t = raw.trim();
        if !t.is_empty() {
            let url = if t.contains("://") {
                t.to_string()
            } else {
                format!("socks5h://{}", t)
            };
            let proxy =
                reqwest::Proxy::all(&url).map_err(|e| DispatchError::Network(e.to_string()))?;
            builder = builder.proxy(proxy);
        }
    }

    builder
        .build()
        .map_err(|e| DispatchError::Network(e.to_string()))
}
