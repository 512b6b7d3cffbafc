//! Manager error types

use thiserror::Error;

use crate::boards::reorder::DragError;
use crate::db::repository::RepoError;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("write failed: {0}")]
    Write(#[from] RepoError),

    #[error("invalid drag: {0}")]
    InvalidDrag(#[from] DragError),

    /// A multi-step cascade stopped partway; the counts say how far it got.
    /// Nothing is rolled back, the caller must retry the delete.
    #[error(
        "cascade delete of {entity} interrupted after {deleted_tasks} tasks and {deleted_lists} lists: {source}"
    )]
    PartialCascade {
        entity: String,
        deleted_tasks: usize,
        deleted_lists: usize,
        #[source]
        source: RepoError,
    },
}

pub type ManagerResult<T> = Result<T, ManagerError>;
