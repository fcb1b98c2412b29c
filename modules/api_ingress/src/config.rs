use serde::{Deserialize, Serialize};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_TIMEOUT_SEC: u64 = 30;
const DEFAULT_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// HTTP host settings, read from `modules.api_ingress`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ApiIngressConfig {
    pub bind_addr: String,
    pub enable_docs: bool,
    pub cors_enabled: bool,
    pub request_timeout_sec: u64,
    pub body_limit_bytes: usize,
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            enable_docs: true,
            cors_enabled: false,
            request_timeout_sec: DEFAULT_TIMEOUT_SEC,
            body_limit_bytes: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ApiIngressConfig {
    /// Keep the configured host but listen on `port`.
    pub fn with_port(mut self, port: u16) -> Self {
        let host = self
            .bind_addr
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| self.bind_addr.clone());
        self.bind_addr = format!("{host}:{port}");
        self
    }
}
