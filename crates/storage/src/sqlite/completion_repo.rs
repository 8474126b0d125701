use chrono::{DateTime, Utc};
use course_core::model::{CompletionSet, LessonId, ViewerId};
use sqlx::Row;

use super::{
    SqliteRepository,
    mapping::{lesson_id_from_i64, lesson_id_to_i64, viewer_id_to_i64},
};
use crate::repository::{CompletionRepository, StorageError};

#[async_trait::async_trait]
impl CompletionRepository for SqliteRepository {
    async fn mark_completed(
        &self,
        viewer: ViewerId,
        lesson: LessonId,
        completed_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO completions (viewer_id, lesson_id, completed_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(viewer_id, lesson_id) DO NOTHING
            ",
        )
        .bind(viewer_id_to_i64(viewer)?)
        .bind(lesson_id_to_i64(lesson)?)
        .bind(completed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn completed_lessons(&self, viewer: ViewerId) -> Result<CompletionSet, StorageError> {
        let rows = sqlx::query(
            "SELECT lesson_id FROM completions WHERE viewer_id = ?1 ORDER BY lesson_id ASC",
        )
        .bind(viewer_id_to_i64(viewer)?)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        rows.iter()
            .map(|row| {
                let raw: i64 = row
                    .try_get("lesson_id")
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;
                lesson_id_from_i64(raw)
            })
            .collect()
    }
}
