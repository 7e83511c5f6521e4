pub mod category;
pub mod errors;
pub mod product;

pub use category::{Category, CategoryId, CategoryLink, NewCategory};
pub use errors::DomainError;
pub use product::{Product, ProductQueries, SortOrder};
