#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    CompletionRepository, InMemoryRepository, LessonRecord, LessonRepository, Storage,
    StorageError,
};
pub use sqlite::{SqliteInitError, SqliteRepository};
