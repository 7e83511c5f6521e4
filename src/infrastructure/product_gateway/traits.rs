use async_trait::async_trait;

use crate::domain::{CategoryId, Product, ProductQueries};
use crate::error::AppResult;

use super::dtos::{GatewayReply, ProductsCount};

/// Remote product service, scoped by category ids.
///
/// `Ok` carries the service's own reply, including failure statuses it
/// reported. `Err` means the service could not be reached or understood.
#[async_trait]
pub trait ProductGateway: Send + Sync {
    async fn list_products(
        &self,
        category_ids: &[CategoryId],
        queries: Option<&ProductQueries>,
    ) -> AppResult<GatewayReply<Vec<Product>>>;

    async fn count_products(
        &self,
        category_ids: &[CategoryId],
        queries: Option<&ProductQueries>,
    ) -> AppResult<GatewayReply<ProductsCount>>;
}
