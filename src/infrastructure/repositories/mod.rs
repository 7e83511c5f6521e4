mod category_repository;
mod traits;

pub use category_repository::CategoryRepositoryImpl;
pub use traits::CategoryRepository;
