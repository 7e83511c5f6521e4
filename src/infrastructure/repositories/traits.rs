use crate::domain::{Category, CategoryId, CategoryLink, NewCategory};
use crate::error::AppResult;
use async_trait::async_trait;

/// Category record store.
///
/// List lookups return rows ordered by ascending id.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: CategoryId) -> AppResult<Option<Category>>;
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>>;
    async fn find_roots(&self) -> AppResult<Vec<Category>>;
    async fn find_by_ids(&self, ids: &[CategoryId]) -> AppResult<Vec<Category>>;
    async fn find_by_parent_ids(&self, parent_ids: &[CategoryId]) -> AppResult<Vec<Category>>;
    async fn find_children(&self, parent_id: CategoryId) -> AppResult<Vec<Category>> {
        self.find_by_parent_ids(&[parent_id]).await
    }
    /// Parent links of every category reachable from `root_id`, root included.
    /// Empty when `root_id` does not exist.
    async fn find_subtree_links(&self, root_id: CategoryId) -> AppResult<Vec<CategoryLink>>;
    async fn create(&self, category: &NewCategory) -> AppResult<Category> {
        self.create_with_children(category, &[]).await
    }
    /// Inserts `category` and re-parents `child_ids` under it in one transaction.
    async fn create_with_children(
        &self,
        category: &NewCategory,
        child_ids: &[CategoryId],
    ) -> AppResult<Category>;
    async fn save(&self, category: &Category) -> AppResult<Category> {
        self.save_with_children(category, None).await
    }
    /// Updates `category` and, when `child_ids` is given, makes it the complete
    /// child set in the same transaction. Current children not listed become roots.
    async fn save_with_children(
        &self,
        category: &Category,
        child_ids: Option<&[CategoryId]>,
    ) -> AppResult<Category>;
}
