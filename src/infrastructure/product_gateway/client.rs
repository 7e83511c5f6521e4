use async_trait::async_trait;
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Client,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::config::ProductServiceConfig;
use crate::domain::{CategoryId, Product, ProductQueries};
use crate::error::{AppError, AppResult};

use super::dtos::{CountProductsRequest, GatewayReply, ListProductsRequest, ProductsCount};
use super::traits::ProductGateway;

pub(crate) const PRODUCT_SERVICE: &str = "product service";

/// HTTP client for the product service.
///
/// Holds one pooled `reqwest::Client`; build it once at startup and share it.
pub struct HttpProductGateway {
    base_url: String,
    client: Client,
}

impl HttpProductGateway {
    pub fn new(config: &ProductServiceConfig) -> AppResult<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                AppError::InternalError(anyhow::anyhow!("product service url not configured"))
            })?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| {
                AppError::InternalError(anyhow::anyhow!("failed to build product client: {e}"))
            })?;

        Ok(Self { base_url, client })
    }

    pub(crate) fn search_url(&self) -> String {
        format!("{}/products/search", self.base_url)
    }

    pub(crate) fn count_url(&self) -> String {
        format!("{}/products/count", self.base_url)
    }

    async fn post_json<B, T>(&self, url: String, body: &B) -> AppResult<GatewayReply<T>>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, url = %url, timeout = e.is_timeout(), "product service request failed");
                unavailable(if e.is_timeout() {
                    "product service request timed out"
                } else {
                    "product service is unreachable"
                })
            })?;

        let http_status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            error!(error = %e, url = %url, "failed to read product service response");
            unavailable("product service response could not be read")
        })?;

        match serde_json::from_slice::<GatewayReply<T>>(&bytes) {
            Ok(reply) => {
                debug!(url = %url, http_status = %http_status, status = reply.status, "product service replied");
                Ok(reply)
            }
            Err(e) => {
                error!(
                    error = %e,
                    url = %url,
                    http_status = %http_status,
                    "product service returned an unparsable response"
                );
                Err(unavailable("product service returned an unreadable response"))
            }
        }
    }
}

fn unavailable(message: &str) -> AppError {
    AppError::ServiceUnavailable {
        service: PRODUCT_SERVICE.to_string(),
        message: message.to_string(),
    }
}

#[async_trait]
impl ProductGateway for HttpProductGateway {
    async fn list_products(
        &self,
        category_ids: &[CategoryId],
        queries: Option<&ProductQueries>,
    ) -> AppResult<GatewayReply<Vec<Product>>> {
        let request = ListProductsRequest {
            categories: category_ids,
            queries: queries.filter(|q| !q.is_empty()),
        };
        self.post_json(self.search_url(), &request).await
    }

    async fn count_products(
        &self,
        category_ids: &[CategoryId],
        queries: Option<&ProductQueries>,
    ) -> AppResult<GatewayReply<ProductsCount>> {
        let request = CountProductsRequest {
            categories_ids: category_ids,
            queries: queries.filter(|q| !q.is_empty()),
        };
        self.post_json(self.count_url(), &request).await
    }
}

/// Gateway used when no product service is configured.
pub struct DisabledProductGateway;

#[async_trait]
impl ProductGateway for DisabledProductGateway {
    async fn list_products(
        &self,
        _category_ids: &[CategoryId],
        _queries: Option<&ProductQueries>,
    ) -> AppResult<GatewayReply<Vec<Product>>> {
        Err(unavailable(
            "product service is not configured. Please set PRODUCT_SERVICE_URL.",
        ))
    }

    async fn count_products(
        &self,
        _category_ids: &[CategoryId],
        _queries: Option<&ProductQueries>,
    ) -> AppResult<GatewayReply<ProductsCount>> {
        Err(unavailable(
            "product service is not configured. Please set PRODUCT_SERVICE_URL.",
        ))
    }
}
