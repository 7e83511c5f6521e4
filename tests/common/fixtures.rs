#![allow(dead_code)]

use category_service::domain::{Category, CategoryId, Product};
use chrono::{Duration, Utc};

pub fn category(id: CategoryId, name: &str, parent_id: Option<CategoryId>) -> Category {
    let created_at = Utc::now() - Duration::days(1);
    Category {
        id,
        name: name.to_string(),
        description: Some(format!("{name} description")),
        images: vec![format!("https://cdn.example.com/{id}.png")],
        parent_id,
        created_at,
        updated_at: created_at,
    }
}

pub fn product(id: i32, category: CategoryId) -> Product {
    Product {
        id,
        name: Some(format!("Product {id}")),
        sku: format!("SKU-{id:04}"),
        stock: 10,
        price: 99.5,
        brand: "Acme".to_string(),
        category: Some(category),
    }
}

/// Electronics(1) -> Phones(2) -> Android(3), plus Laptops(4) under
/// Electronics and a separate root Books(5).
pub fn electronics_tree() -> Vec<Category> {
    vec![
        category(1, "Electronics", None),
        category(2, "Phones", Some(1)),
        category(3, "Android", Some(2)),
        category(4, "Laptops", Some(1)),
        category(5, "Books", None),
    ]
}
