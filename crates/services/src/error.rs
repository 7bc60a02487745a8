//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use trivia_core::model::{CatalogError, RecordError};

/// Errors emitted by quiz sessions and the services around them.
///
/// The state-machine variants (`AlreadyAnswered`, `NotAnswered`,
/// `Completed`, `InProgress`, `OutOfQuestions`) are contract violations a
/// well-behaved presentation layer never triggers; the session still fails
/// loud on them instead of silently misscoring.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("participant name cannot be empty")]
    EmptyName,

    #[error("current question is already resolved")]
    AlreadyAnswered,

    #[error("current question has not been resolved yet")]
    NotAnswered,

    #[error("session has no current question: all questions were used")]
    OutOfQuestions,

    #[error("session is already complete")]
    Completed,

    #[error("session is still in progress")]
    InProgress,

    #[error("{choice:?} is not one of the current question's options")]
    UnknownChoice { choice: String },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
