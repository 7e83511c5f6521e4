#[allow(dead_code, unused_imports)]
pub mod category_repo;
#[allow(dead_code, unused_imports)]
pub mod product_gateway;

#[allow(dead_code, unused_imports)]
pub use category_repo::MockCategoryRepo;
#[allow(dead_code, unused_imports)]
pub use product_gateway::{GatewayCall, MockProductGateway};
