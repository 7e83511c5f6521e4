use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::CategoryId;

/// Product record as reported by the product service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub category: Option<CategoryId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Pagination and sort filters forwarded to the product service untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductQueries {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

impl ProductQueries {
    pub fn is_empty(&self) -> bool {
        self.page.is_none() && self.limit.is_none() && self.sort_by.is_none() && self.order.is_none()
    }
}
