use async_trait::async_trait;
use chrono::{DateTime, Utc};
use course_core::model::{
    Category, CompletionSet, Lesson, LessonError, LessonId, Role, ViewerId,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by catalog storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape for a lesson.
///
/// This mirrors the domain `Lesson` so repositories can serialize and
/// deserialize without leaking storage concerns into the domain layer.
#[derive(Debug, Clone)]
pub struct LessonRecord {
    pub id: LessonId,
    pub title: String,
    pub category: Category,
    pub duration_minutes: u32,
    pub required_role: Role,
    pub media_reference: String,
    pub created_at: DateTime<Utc>,
}

impl LessonRecord {
    #[must_use]
    pub fn from_lesson(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id(),
            title: lesson.title().to_owned(),
            category: lesson.category().clone(),
            duration_minutes: lesson.duration_minutes(),
            required_role: lesson.required_role(),
            media_reference: lesson.media_reference().to_owned(),
            created_at: lesson.created_at(),
        }
    }

    /// Convert the record back into a domain `Lesson`.
    ///
    /// # Errors
    ///
    /// Returns `LessonError` if the persisted fields fail validation.
    pub fn into_lesson(self) -> Result<Lesson, LessonError> {
        Lesson::from_persisted(
            self.id,
            self.title,
            self.category,
            self.duration_minutes,
            self.required_role,
            self.media_reference,
            self.created_at,
        )
    }
}

/// Repository contract for the lesson catalog.
///
/// Every listing method returns lessons ascending by id; that ordering is the
/// series-navigation contract and backends must uphold it.
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Persist or update a lesson.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the lesson cannot be stored.
    async fn upsert_lesson(&self, lesson: &Lesson) -> Result<(), StorageError>;

    /// Fetch a lesson by id, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn get_lesson(&self, id: LessonId) -> Result<Option<Lesson>, StorageError>;

    /// List lessons ascending by id, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn list_lessons(&self, limit: u32) -> Result<Vec<Lesson>, StorageError>;

    /// List the lessons of one category ascending by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn lessons_by_category(&self, category: &Category) -> Result<Vec<Lesson>, StorageError>;

    /// List lessons requiring exactly the given role, ascending by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn lessons_by_role(&self, role: Role) -> Result<Vec<Lesson>, StorageError>;

    /// Delete a lesson; returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn delete_lesson(&self, id: LessonId) -> Result<bool, StorageError>;

    /// Highest assigned lesson id, `None` for an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn max_lesson_id(&self) -> Result<Option<LessonId>, StorageError>;
}

/// Repository contract for per-viewer lesson completions.
#[async_trait]
pub trait CompletionRepository: Send + Sync {
    /// Record a lesson as completed by a viewer. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the completion cannot be stored.
    async fn mark_completed(
        &self,
        viewer: ViewerId,
        lesson: LessonId,
        completed_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;

    /// Fetch the full completion set of a viewer.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn completed_lessons(&self, viewer: ViewerId) -> Result<CompletionSet, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    lessons: Arc<Mutex<HashMap<LessonId, Lesson>>>,
    completions: Arc<Mutex<HashMap<ViewerId, BTreeMap<LessonId, DateTime<Utc>>>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted_lessons<F>(&self, keep: F) -> Result<Vec<Lesson>, StorageError>
    where
        F: Fn(&Lesson) -> bool,
    {
        let guard = self
            .lessons
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut out: Vec<Lesson> = guard.values().filter(|l| keep(l)).cloned().collect();
        out.sort_by_key(Lesson::id);
        Ok(out)
    }
}

#[async_trait]
impl LessonRepository for InMemoryRepository {
    async fn upsert_lesson(&self, lesson: &Lesson) -> Result<(), StorageError> {
        let mut guard = self
            .lessons
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(lesson.id(), lesson.clone());
        Ok(())
    }

    async fn get_lesson(&self, id: LessonId) -> Result<Option<Lesson>, StorageError> {
        let guard = self
            .lessons
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&id).cloned())
    }

    async fn list_lessons(&self, limit: u32) -> Result<Vec<Lesson>, StorageError> {
        let mut out = self.sorted_lessons(|_| true)?;
        out.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(out)
    }

    async fn lessons_by_category(&self, category: &Category) -> Result<Vec<Lesson>, StorageError> {
        self.sorted_lessons(|lesson| lesson.category() == category)
    }

    async fn lessons_by_role(&self, role: Role) -> Result<Vec<Lesson>, StorageError> {
        self.sorted_lessons(|lesson| lesson.required_role() == role)
    }

    async fn delete_lesson(&self, id: LessonId) -> Result<bool, StorageError> {
        let mut guard = self
            .lessons
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.remove(&id).is_some())
    }

    async fn max_lesson_id(&self) -> Result<Option<LessonId>, StorageError> {
        let guard = self
            .lessons
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.keys().max().copied())
    }
}

#[async_trait]
impl CompletionRepository for InMemoryRepository {
    async fn mark_completed(
        &self,
        viewer: ViewerId,
        lesson: LessonId,
        completed_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .completions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .entry(viewer)
            .or_default()
            .entry(lesson)
            .or_insert(completed_at);
        Ok(())
    }

    async fn completed_lessons(&self, viewer: ViewerId) -> Result<CompletionSet, StorageError> {
        let guard = self
            .completions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .get(&viewer)
            .map(|per_viewer| per_viewer.keys().copied().collect())
            .unwrap_or_default())
    }
}

/// Aggregates catalog and completion repositories behind trait objects for
/// easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub lessons: Arc<dyn LessonRepository>,
    pub completions: Arc<dyn CompletionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let lessons: Arc<dyn LessonRepository> = Arc::new(repo.clone());
        let completions: Arc<dyn CompletionRepository> = Arc::new(repo);
        Self {
            lessons,
            completions,
        }
    }
}
