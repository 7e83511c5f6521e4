pub mod client;
pub mod dtos;
pub mod traits;


pub use client::{DisabledProductGateway, HttpProductGateway};
pub use dtos::{GatewayReply, ProductsCount};
pub use traits::ProductGateway;
