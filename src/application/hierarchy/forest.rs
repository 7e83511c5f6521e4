use std::sync::Arc;

use tracing::debug;

use crate::api::dtos::CategoryTreeNode;
use crate::application::mapper;
use crate::domain::CategoryId;
use crate::error::AppResult;
use crate::infrastructure::repositories::CategoryRepository;

/// Builds the browsing forest: roots, their children and grandchildren.
///
/// Three set-based queries; nodes deeper than two levels below a root are
/// never loaded.
#[derive(Clone)]
pub struct ForestBuilder {
    category_repo: Arc<dyn CategoryRepository>,
}

impl ForestBuilder {
    pub fn new(category_repo: Arc<dyn CategoryRepository>) -> Self {
        Self { category_repo }
    }

    pub async fn build(&self) -> AppResult<Vec<CategoryTreeNode>> {
        let roots = self.category_repo.find_roots().await?;
        if roots.is_empty() {
            return Ok(Vec::new());
        }

        let root_ids: Vec<CategoryId> = roots.iter().map(|root| root.id).collect();
        let children = self.category_repo.find_by_parent_ids(&root_ids).await?;

        let child_ids: Vec<CategoryId> = children.iter().map(|child| child.id).collect();
        let grandchildren = if child_ids.is_empty() {
            Vec::new()
        } else {
            self.category_repo.find_by_parent_ids(&child_ids).await?
        };

        debug!(
            roots = roots.len(),
            children = children.len(),
            grandchildren = grandchildren.len(),
            "loaded category forest"
        );

        let mut children_by_parent = mapper::group_by_parent(children);
        let mut grandchildren_by_parent = mapper::group_by_parent(grandchildren);

        Ok(roots
            .into_iter()
            .map(|root| {
                let subcategories = children_by_parent
                    .remove(&root.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|child| {
                        let leaves = grandchildren_by_parent
                            .remove(&child.id)
                            .unwrap_or_default()
                            .into_iter()
                            .map(|leaf| mapper::map_tree_node(leaf, Vec::new()))
                            .collect();
                        mapper::map_tree_node(child, leaves)
                    })
                    .collect();
                mapper::map_tree_node(root, subcategories)
            })
            .collect())
    }
}
