use course_core::model::{Category, Lesson, LessonId, Role};

use super::{
    SqliteRepository,
    mapping::{lesson_id_from_i64, lesson_id_to_i64, map_lesson_row},
};
use crate::repository::{LessonRepository, StorageError};

const LESSON_COLUMNS: &str =
    "id, title, category, duration_minutes, required_role, media_reference, created_at";

#[async_trait::async_trait]
impl LessonRepository for SqliteRepository {
    async fn upsert_lesson(&self, lesson: &Lesson) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO lessons (
                id, title, category, duration_minutes, required_role,
                media_reference, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id) DO UPDATE SET
                -- keep created_at from the original insert; only update mutable fields
                title = excluded.title,
                category = excluded.category,
                duration_minutes = excluded.duration_minutes,
                required_role = excluded.required_role,
                media_reference = excluded.media_reference
            ",
        )
        .bind(lesson_id_to_i64(lesson.id())?)
        .bind(lesson.title().to_owned())
        .bind(lesson.category().as_str().to_owned())
        .bind(i64::from(lesson.duration_minutes()))
        .bind(lesson.required_role().as_str())
        .bind(lesson.media_reference().to_owned())
        .bind(lesson.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn get_lesson(&self, id: LessonId) -> Result<Option<Lesson>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons WHERE id = ?1"
        ))
        .bind(lesson_id_to_i64(id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_lesson_row).transpose()
    }

    async fn list_lessons(&self, limit: u32) -> Result<Vec<Lesson>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons ORDER BY id ASC LIMIT ?1"
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        rows.iter().map(map_lesson_row).collect()
    }

    async fn lessons_by_category(&self, category: &Category) -> Result<Vec<Lesson>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons WHERE category = ?1 ORDER BY id ASC"
        ))
        .bind(category.as_str().to_owned())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        rows.iter().map(map_lesson_row).collect()
    }

    async fn lessons_by_role(&self, role: Role) -> Result<Vec<Lesson>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons WHERE required_role = ?1 ORDER BY id ASC"
        ))
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        rows.iter().map(map_lesson_row).collect()
    }

    async fn delete_lesson(&self, id: LessonId) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM lessons WHERE id = ?1")
            .bind(lesson_id_to_i64(id)?)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn max_lesson_id(&self) -> Result<Option<LessonId>, StorageError> {
        // MAX over an empty table yields a single NULL row.
        let (max,): (Option<i64>,) = sqlx::query_as("SELECT MAX(id) FROM lessons")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        max.map(lesson_id_from_i64).transpose()
    }
}
