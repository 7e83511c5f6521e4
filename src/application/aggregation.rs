use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::api::dtos::{CategoryDetail, SubcategorySummary};
use crate::application::hierarchy::DescendantResolver;
use crate::application::mapper;
use crate::domain::{Category, ProductQueries};
use crate::error::{AppError, AppResult};
use crate::infrastructure::product_gateway::{GatewayReply, ProductGateway};

/// A category with its parent and immediate children already loaded.
#[derive(Debug, Clone)]
pub struct LoadedCategory {
    pub category: Category,
    pub parent: Option<Category>,
    pub children: Vec<Category>,
}

/// Joins a category's subtree with product data from the remote service.
///
/// The whole aggregation fails on the first remote failure; no partial
/// detail is ever produced.
#[derive(Clone)]
pub struct CategoryAggregator {
    resolver: DescendantResolver,
    product_gateway: Arc<dyn ProductGateway>,
}

impl CategoryAggregator {
    pub fn new(resolver: DescendantResolver, product_gateway: Arc<dyn ProductGateway>) -> Self {
        Self {
            resolver,
            product_gateway,
        }
    }

    pub async fn aggregate(
        &self,
        loaded: LoadedCategory,
        queries: Option<&ProductQueries>,
    ) -> AppResult<CategoryDetail> {
        let LoadedCategory {
            category,
            parent,
            children,
        } = loaded;

        let category_ids = self.resolver.resolve(category.id).await?;
        if category_ids.is_empty() {
            debug!(category_id = category.id, "category vanished before aggregation");
            let subcategories = children
                .into_iter()
                .map(|child| mapper::map_subcategory(child, 0))
                .collect();
            return Ok(mapper::map_detail(category, parent, subcategories, Vec::new(), 0));
        }

        let listed = settle(
            self.product_gateway
                .list_products(&category_ids, queries)
                .await,
        );
        let counted = settle(
            self.product_gateway
                .count_products(&category_ids, queries)
                .await,
        );

        let products = listed.inspect_err(|err| {
            warn!(category_id = category.id, error = %err, "product listing failed");
        })?;
        let products_count = counted
            .inspect_err(|err| {
                warn!(category_id = category.id, error = %err, "product count failed");
            })?
            .products_count;

        let subcategories = self.count_per_child(children).await?;

        debug!(
            category_id = category.id,
            descendants = category_ids.len(),
            products = products.len(),
            products_count,
            "aggregated category products"
        );

        Ok(mapper::map_detail(
            category,
            parent,
            subcategories,
            products,
            products_count,
        ))
    }

    /// Counts run concurrently; the first failure in child order wins.
    async fn count_per_child(&self, children: Vec<Category>) -> AppResult<Vec<SubcategorySummary>> {
        let counts = join_all(children.iter().map(|child| async move {
            settle(self.product_gateway.count_products(&[child.id], None).await)
        }))
        .await;

        children
            .into_iter()
            .zip(counts)
            .map(|(child, counted)| {
                let child_id = child.id;
                counted
                    .map(|count| mapper::map_subcategory(child, count.products_count))
                    .inspect_err(|err| {
                        warn!(child_id, error = %err, "subcategory product count failed");
                    })
            })
            .collect()
    }
}

fn settle<T: Default>(reply: AppResult<GatewayReply<T>>) -> Result<T, AppError> {
    reply.and_then(GatewayReply::into_result)
}
