mod forest;
mod guard;
mod resolver;

pub use forest::ForestBuilder;
pub use guard::{validate_category_parent, validate_subcategories};
pub use resolver::{collect_descendants, DescendantResolver};
