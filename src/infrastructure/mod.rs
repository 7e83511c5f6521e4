pub mod db;
pub mod product_gateway;
pub mod repositories;
