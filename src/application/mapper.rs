use std::collections::HashMap;

use crate::api::dtos::{
    CategoryDetail, CategoryProjection, CategoryTreeNode, RelatedCategory, SubcategorySummary,
};
use crate::domain::{Category, CategoryId, Product};

pub fn map_related(category: Category) -> RelatedCategory {
    RelatedCategory {
        id: category.id,
        name: category.name,
        description: category.description,
        images: category.images,
    }
}

pub fn map_subcategory(category: Category, products_count: i64) -> SubcategorySummary {
    SubcategorySummary {
        id: category.id,
        name: category.name,
        description: category.description,
        images: category.images,
        products_count,
    }
}

pub fn map_detail(
    category: Category,
    parent: Option<Category>,
    subcategories: Vec<SubcategorySummary>,
    products: Vec<Product>,
    products_count: i64,
) -> CategoryDetail {
    CategoryDetail {
        id: category.id,
        name: category.name,
        description: category.description,
        parent_id: category.parent_id,
        parent: parent.map(map_related),
        subcategories,
        images: category.images,
        products,
        products_count,
    }
}

pub fn map_tree_node(category: Category, subcategories: Vec<CategoryTreeNode>) -> CategoryTreeNode {
    CategoryTreeNode {
        id: category.id,
        name: category.name,
        description: category.description,
        parent_id: category.parent_id,
        images: category.images,
        subcategories,
    }
}

pub fn map_projection(category: Category, subcategories: Vec<CategoryId>) -> CategoryProjection {
    CategoryProjection {
        id: category.id,
        name: category.name,
        description: category.description,
        images: category.images,
        parent: category.parent_id,
        subcategories,
    }
}

/// Buckets categories by parent id, keeping input order within a bucket.
pub fn group_by_parent(categories: Vec<Category>) -> HashMap<CategoryId, Vec<Category>> {
    let mut grouped: HashMap<CategoryId, Vec<Category>> = HashMap::new();
    for category in categories {
        if let Some(parent_id) = category.parent_id {
            grouped.entry(parent_id).or_default().push(category);
        }
    }
    grouped
}
