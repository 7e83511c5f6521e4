use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Hierarchy violation: {0}")]
    HierarchyViolation(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}
