#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use category_service::domain::{CategoryId, Product, ProductQueries};
use category_service::error::{AppError, AppResult};
use category_service::infrastructure::product_gateway::{
    GatewayReply, ProductGateway, ProductsCount,
};

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    List(Vec<CategoryId>, Option<ProductQueries>),
    Count(Vec<CategoryId>, Option<ProductQueries>),
}

/// Scripted product service.
///
/// Products match a request by their `category`; counts default to the
/// number of matching products unless overridden per id set.
#[derive(Default)]
pub struct MockProductGateway {
    pub products: Mutex<Vec<Product>>,
    pub counts: Mutex<HashMap<Vec<CategoryId>, i64>>,
    pub list_failure: Mutex<Option<(u16, Vec<String>)>>,
    pub count_failures: Mutex<HashMap<Vec<CategoryId>, (u16, Vec<String>)>>,
    pub unavailable: Mutex<bool>,
    pub calls: Mutex<Vec<GatewayCall>>,
}

impl MockProductGateway {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
            ..Self::default()
        }
    }

    pub fn set_count(&self, ids: &[CategoryId], count: i64) {
        self.counts
            .lock()
            .expect("counts mutex poisoned")
            .insert(ids.to_vec(), count);
    }

    pub fn fail_list(&self, status: u16, errors: &[&str]) {
        *self.list_failure.lock().expect("list mutex poisoned") =
            Some((status, errors.iter().map(ToString::to_string).collect()));
    }

    pub fn fail_count(&self, ids: &[CategoryId], status: u16, errors: &[&str]) {
        self.count_failures
            .lock()
            .expect("count mutex poisoned")
            .insert(
                ids.to_vec(),
                (status, errors.iter().map(ToString::to_string).collect()),
            );
    }

    pub fn go_offline(&self) {
        *self.unavailable.lock().expect("unavailable mutex poisoned") = true;
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    fn check_available(&self) -> AppResult<()> {
        if *self.unavailable.lock().expect("unavailable mutex poisoned") {
            return Err(AppError::ServiceUnavailable {
                service: "product service".to_string(),
                message: "product service is unreachable".to_string(),
            });
        }
        Ok(())
    }

    fn matching(&self, ids: &[CategoryId]) -> Vec<Product> {
        self.products
            .lock()
            .expect("products mutex poisoned")
            .iter()
            .filter(|p| p.category.is_some_and(|c| ids.contains(&c)))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ProductGateway for MockProductGateway {
    async fn list_products(
        &self,
        category_ids: &[CategoryId],
        queries: Option<&ProductQueries>,
    ) -> AppResult<GatewayReply<Vec<Product>>> {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(GatewayCall::List(category_ids.to_vec(), queries.cloned()));
        self.check_available()?;

        if let Some((status, errors)) = self.list_failure.lock().expect("list mutex poisoned").clone()
        {
            return Ok(GatewayReply::failed(status, errors));
        }
        Ok(GatewayReply::ok(self.matching(category_ids)))
    }

    async fn count_products(
        &self,
        category_ids: &[CategoryId],
        queries: Option<&ProductQueries>,
    ) -> AppResult<GatewayReply<ProductsCount>> {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(GatewayCall::Count(category_ids.to_vec(), queries.cloned()));
        self.check_available()?;

        if let Some((status, errors)) = self
            .count_failures
            .lock()
            .expect("count mutex poisoned")
            .get(category_ids)
            .cloned()
        {
            return Ok(GatewayReply::failed(status, errors));
        }

        let products_count = self
            .counts
            .lock()
            .expect("counts mutex poisoned")
            .get(category_ids)
            .copied()
            .unwrap_or_else(|| self.matching(category_ids).len() as i64);
        Ok(GatewayReply::ok(ProductsCount { products_count }))
    }
}
