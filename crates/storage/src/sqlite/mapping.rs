use course_core::model::{Category, Lesson, LessonId, Role, ViewerId};
use sqlx::Row;

use crate::repository::{LessonRecord, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn lesson_id_from_i64(v: i64) -> Result<LessonId, StorageError> {
    Ok(LessonId::new(i64_to_u64("lesson_id", v)?))
}

pub(crate) fn lesson_id_to_i64(id: LessonId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("lesson_id overflow".into()))
}

pub(crate) fn viewer_id_to_i64(id: ViewerId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("viewer_id overflow".into()))
}

pub(crate) fn parse_role(s: &str) -> Result<Role, StorageError> {
    s.parse::<Role>().map_err(ser)
}

pub(crate) fn map_lesson_row(row: &sqlx::sqlite::SqliteRow) -> Result<Lesson, StorageError> {
    let record = LessonRecord {
        id: lesson_id_from_i64(row.try_get("id").map_err(ser)?)?,
        title: row.try_get("title").map_err(ser)?,
        category: Category::new(row.try_get::<String, _>("category").map_err(ser)?)
            .map_err(ser)?,
        duration_minutes: u32::try_from(row.try_get::<i64, _>("duration_minutes").map_err(ser)?)
            .map_err(|_| StorageError::Serialization("duration_minutes overflow".into()))?,
        required_role: parse_role(&row.try_get::<String, _>("required_role").map_err(ser)?)?,
        media_reference: row.try_get("media_reference").map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
    };

    record.into_lesson().map_err(ser)
}
