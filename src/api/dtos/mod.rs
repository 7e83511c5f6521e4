pub mod category_dto;
pub mod envelope;

pub use category_dto::*;
pub use envelope::*;
