use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::domain::{CategoryId, Product, ProductQueries, SortOrder};

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 255, message = "name must be between 1 and 255 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, message = "parent_id must not be negative"))]
    pub parent_id: Option<i32>,
    #[serde(default)]
    #[validate(custom(function = "validate_category_ids"))]
    pub subcategories_ids: Option<Vec<i32>>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Partial update. An absent field is left unchanged; an explicit `null`
/// clears `parent_id` or `description`.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_parent"))]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub parent_id: Option<Option<i32>>,
    #[serde(default)]
    #[validate(custom(function = "validate_category_ids"))]
    pub subcategories_ids: Option<Vec<i32>>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct GetCategoriesByIdsRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_category_ids"))]
    pub ids: Vec<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQueryParams {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<u32>,
    pub sort_by: Option<String>,
    pub order: Option<SortOrder>,
}

impl From<ProductQueryParams> for ProductQueries {
    fn from(params: ProductQueryParams) -> Self {
        Self {
            page: params.page,
            limit: params.limit,
            sort_by: params.sort_by.filter(|field| !field.trim().is_empty()),
            order: params.order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RelatedCategory {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SubcategorySummary {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub products_count: i64,
}

/// Deep view of one category with its product aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryDetail {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
    pub parent: Option<RelatedCategory>,
    pub subcategories: Vec<SubcategorySummary>,
    pub images: Vec<String>,
    pub products: Vec<Product>,
    pub products_count: i64,
}

/// Shallow forest node; no product data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryTreeNode {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
    pub images: Vec<String>,
    pub subcategories: Vec<CategoryTreeNode>,
}

/// Flat projection for inter-service lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryProjection {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub parent: Option<i32>,
    pub subcategories: Vec<i32>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn validate_category_ids(ids: &[CategoryId]) -> Result<(), ValidationError> {
    if ids.iter().any(|id| *id < 0) {
        let mut error = ValidationError::new("non_negative_ids");
        error.message = Some("ids must contain only positive numbers".into());
        return Err(error);
    }
    Ok(())
}

fn validate_update_parent(request: &UpdateCategoryRequest) -> Result<(), ValidationError> {
    if let Some(Some(parent_id)) = request.parent_id {
        if parent_id < 0 {
            let mut error = ValidationError::new("range");
            error.message = Some("parent_id must not be negative".into());
            return Err(error);
        }
    }
    Ok(())
}
