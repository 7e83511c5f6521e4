use std::collections::{BTreeSet, HashSet};

use crate::domain::{CategoryId, DomainError};
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::CategoryRepository;

/// Checks that `parent_id` exists and that attaching `category_id` under it
/// keeps the hierarchy acyclic.
///
/// Returns the ancestor chain starting at the parent, nearest first.
pub async fn validate_category_parent(
    category_repo: &dyn CategoryRepository,
    category_id: Option<CategoryId>,
    parent_id: Option<CategoryId>,
) -> AppResult<Vec<CategoryId>> {
    let Some(mut cursor) = parent_id else {
        return Ok(Vec::new());
    };

    if Some(cursor) == category_id {
        return Err(violation("category cannot be its own parent"));
    }

    let mut ancestors = Vec::new();
    let mut visited = HashSet::new();

    loop {
        if !visited.insert(cursor) {
            return Err(violation("category hierarchy contains a cycle"));
        }

        let parent = category_repo
            .find_by_id(cursor)
            .await?
            .ok_or_else(|| AppError::BadRequest("parent category not found".to_string()))?;

        if Some(parent.id) == category_id {
            return Err(violation(
                "category parent relationship would create a cycle",
            ));
        }
        ancestors.push(parent.id);

        let Some(next_cursor) = parent.parent_id else {
            return Ok(ancestors);
        };

        cursor = next_cursor;
    }
}

/// Checks a requested child set: every id must exist, and none may be the
/// category itself or one of its ancestors.
///
/// Returns the ids deduplicated in ascending order.
pub async fn validate_subcategories(
    category_repo: &dyn CategoryRepository,
    category_id: Option<CategoryId>,
    ancestors: &[CategoryId],
    subcategory_ids: &[CategoryId],
) -> AppResult<Vec<CategoryId>> {
    let requested: BTreeSet<CategoryId> = subcategory_ids.iter().copied().collect();

    if let Some(id) = category_id.filter(|id| requested.contains(id)) {
        return Err(violation(&format!(
            "category {id} cannot be its own subcategory"
        )));
    }
    if let Some(id) = requested.iter().find(|id| ancestors.contains(id)) {
        return Err(violation(&format!(
            "subcategory {id} is an ancestor of the category"
        )));
    }

    let ids: Vec<CategoryId> = requested.into_iter().collect();
    if ids.is_empty() {
        return Ok(ids);
    }

    let found: HashSet<CategoryId> = category_repo
        .find_by_ids(&ids)
        .await?
        .into_iter()
        .map(|category| category.id)
        .collect();
    let missing: Vec<String> = ids
        .iter()
        .filter(|id| !found.contains(id))
        .map(ToString::to_string)
        .collect();

    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!(
            "subcategories not found: {}",
            missing.join(", ")
        )));
    }

    Ok(ids)
}

fn violation(message: &str) -> AppError {
    DomainError::HierarchyViolation(message.to_string()).into()
}
