mod aggregation;
mod category_service;
pub mod hierarchy;
mod mapper;

pub use aggregation::{CategoryAggregator, LoadedCategory};
pub use category_service::CategoryService;
pub use hierarchy::{collect_descendants, DescendantResolver, ForestBuilder};
