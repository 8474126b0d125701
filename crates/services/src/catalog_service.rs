use std::sync::Arc;

use course_core::Clock;
use course_core::model::{Category, Lesson, LessonDraft, LessonId, Role};
use storage::repository::LessonRepository;

use crate::error::CatalogServiceError;

/// Partial update for an existing lesson. Unset fields keep their current
/// value; `created_at` and the id never change.
#[derive(Debug, Clone, Default)]
pub struct LessonUpdate {
    pub title: Option<String>,
    pub category: Option<Category>,
    pub duration_minutes: Option<u32>,
    pub required_role: Option<Role>,
    pub media_reference: Option<String>,
}

/// Lesson catalog CRUD and queries over an injected repository.
#[derive(Clone)]
pub struct CatalogService {
    lessons: Arc<dyn LessonRepository>,
    clock: Clock,
}

impl CatalogService {
    #[must_use]
    pub fn new(lessons: Arc<dyn LessonRepository>) -> Self {
        Self {
            lessons,
            clock: Clock::default(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Validate a draft, assign the next id, and persist the lesson.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Lesson` on validation failure or
    /// `CatalogServiceError::Storage` on repository failure.
    pub async fn create_lesson(&self, draft: LessonDraft) -> Result<Lesson, CatalogServiceError> {
        let validated = draft.validate(self.clock.now())?;
        let next_id = self
            .lessons
            .max_lesson_id()
            .await?
            .map_or(1, |id| id.value() + 1);
        let lesson = validated.assign_id(LessonId::new(next_id));
        self.lessons.upsert_lesson(&lesson).await?;
        tracing::debug!(id = lesson.id().value(), title = lesson.title(), "created lesson");
        Ok(lesson)
    }

    /// Apply a partial update to an existing lesson.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::NotFound` if the lesson does not exist,
    /// `CatalogServiceError::Lesson` if the merged fields fail validation.
    pub async fn update_lesson(
        &self,
        id: LessonId,
        update: LessonUpdate,
    ) -> Result<Lesson, CatalogServiceError> {
        let current = self
            .lessons
            .get_lesson(id)
            .await?
            .ok_or(CatalogServiceError::NotFound(id))?;

        let merged = Lesson::from_persisted(
            id,
            update.title.unwrap_or_else(|| current.title().to_string()),
            update.category.unwrap_or_else(|| current.category().clone()),
            update.duration_minutes.unwrap_or(current.duration_minutes()),
            update.required_role.unwrap_or(current.required_role()),
            update
                .media_reference
                .unwrap_or_else(|| current.media_reference().to_string()),
            current.created_at(),
        )?;

        self.lessons.upsert_lesson(&merged).await?;
        Ok(merged)
    }

    /// Delete a lesson.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::NotFound` if the lesson does not exist.
    pub async fn delete_lesson(&self, id: LessonId) -> Result<(), CatalogServiceError> {
        if !self.lessons.delete_lesson(id).await? {
            return Err(CatalogServiceError::NotFound(id));
        }
        tracing::debug!(id = id.value(), "deleted lesson");
        Ok(())
    }

    /// Fetch a single lesson.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::NotFound` if the lesson does not exist.
    pub async fn get_lesson(&self, id: LessonId) -> Result<Lesson, CatalogServiceError> {
        self.lessons
            .get_lesson(id)
            .await?
            .ok_or(CatalogServiceError::NotFound(id))
    }

    /// All lessons, ascending by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Storage` on repository failure.
    pub async fn list_lessons(&self, limit: u32) -> Result<Vec<Lesson>, CatalogServiceError> {
        Ok(self.lessons.list_lessons(limit).await?)
    }

    /// Lessons filtered by required role; `None` lists everything.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Storage` on repository failure.
    pub async fn lessons_by_role(
        &self,
        role: Option<Role>,
    ) -> Result<Vec<Lesson>, CatalogServiceError> {
        match role {
            Some(role) => Ok(self.lessons.lessons_by_role(role).await?),
            None => Ok(self.lessons.list_lessons(u32::MAX).await?),
        }
    }

    /// The lessons of one series, ascending by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Storage` on repository failure.
    pub async fn lessons_by_series(
        &self,
        category: &Category,
    ) -> Result<Vec<Lesson>, CatalogServiceError> {
        Ok(self.lessons.lessons_by_category(category).await?)
    }
}
