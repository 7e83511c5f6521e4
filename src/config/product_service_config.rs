use std::time::Duration;

use serde::Deserialize;

/// Connection settings for the remote product service.
///
/// `base_url` left unset disables the gateway; every product call then
/// answers with a dependency error instead of reaching the network.
#[derive(Debug, Deserialize, Clone)]
pub struct ProductServiceConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "crate::config::defaults::default_product_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "crate::config::defaults::default_product_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl Default for ProductServiceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            request_timeout_ms: crate::config::defaults::default_product_request_timeout_ms(),
            connect_timeout_ms: crate::config::defaults::default_product_connect_timeout_ms(),
        }
    }
}

impl ProductServiceConfig {
    pub fn is_enabled(&self) -> bool {
        self.base_url
            .as_deref()
            .map(|url| !url.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}
