//! Shared error types for the services crate.

use thiserror::Error;

use course_core::model::{LessonError, LessonId};
use storage::repository::StorageError;

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogServiceError {
    #[error("lesson {0} not found")]
    NotFound(LessonId),
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by series-navigation queries.
///
/// Absence of an adjacent lesson is a normal outcome and is expressed as
/// `Ok(None)` by the queries themselves, never as an error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NavigatorError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `PlayerService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlayerError {
    #[error("no lesson is currently open")]
    NoCurrentLesson,
    #[error("lesson {0} not found")]
    LessonNotFound(LessonId),
    #[error(transparent)]
    Navigator(#[from] NavigatorError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the remote catalog client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RemoteCatalogError {
    #[error("remote catalog request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl From<RemoteCatalogError> for StorageError {
    fn from(err: RemoteCatalogError) -> Self {
        StorageError::Connection(err.to_string())
    }
}
