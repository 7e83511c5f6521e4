use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::domain::{CategoryId, CategoryLink};
use crate::error::AppResult;
use crate::infrastructure::repositories::CategoryRepository;

/// Computes the descendant-or-self set of a category.
///
/// The subtree is fetched with a single recursive query and ordered in
/// memory, so the cost is one round-trip regardless of depth.
#[derive(Clone)]
pub struct DescendantResolver {
    category_repo: Arc<dyn CategoryRepository>,
}

impl DescendantResolver {
    pub fn new(category_repo: Arc<dyn CategoryRepository>) -> Self {
        Self { category_repo }
    }

    /// Root first, then each subtree in pre-order with siblings by ascending
    /// id. An unknown root yields an empty list.
    pub async fn resolve(&self, root_id: CategoryId) -> AppResult<Vec<CategoryId>> {
        let links = self.category_repo.find_subtree_links(root_id).await?;
        let ids = collect_descendants(root_id, &links);
        debug!(root_id, descendants = ids.len(), "resolved category subtree");
        Ok(ids)
    }
}

/// Orders the ids reachable from `root_id` through `links`.
///
/// Every id appears once even if the links contain a cycle.
pub fn collect_descendants(root_id: CategoryId, links: &[CategoryLink]) -> Vec<CategoryId> {
    if !links.iter().any(|link| link.id == root_id) {
        return Vec::new();
    }

    let mut children: HashMap<CategoryId, Vec<CategoryId>> = HashMap::new();
    for link in links {
        if let Some(parent_id) = link.parent_id {
            children.entry(parent_id).or_default().push(link.id);
        }
    }
    for siblings in children.values_mut() {
        siblings.sort_unstable();
        siblings.dedup();
    }

    let mut ordered = Vec::new();
    let mut visited = HashSet::new();
    let mut stack = vec![root_id];

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        ordered.push(id);

        if let Some(siblings) = children.get(&id) {
            stack.extend(
                siblings
                    .iter()
                    .rev()
                    .filter(|child| !visited.contains(*child)),
            );
        }
    }

    ordered
}
