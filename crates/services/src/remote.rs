use std::env;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use course_core::model::{Category, Lesson, LessonId, Role};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::RemoteCatalogError;
use storage::repository::{LessonRepository, StorageError};

#[derive(Clone, Debug)]
pub struct RemoteCatalogConfig {
    pub base_url: String,
    pub api_key: String,
}

impl RemoteCatalogConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("ACADEMY_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url = env::var("ACADEMY_API_BASE_URL")
            .unwrap_or_else(|_| "https://api.academy.example/v1".into());
        Some(Self { base_url, api_key })
    }
}

/// Lesson catalog backed by the platform's REST backend.
///
/// Implements the same repository contract as the local backends, so the
/// navigator cannot tell them apart. No retry policy: transient failures
/// surface to the caller.
#[derive(Clone)]
pub struct RemoteCatalog {
    client: Client,
    config: RemoteCatalogConfig,
}

impl RemoteCatalog {
    #[must_use]
    pub fn new(config: RemoteCatalogConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    async fn fetch_lessons(&self, query: &[(&str, String)]) -> Result<Vec<Lesson>, StorageError> {
        let response = self
            .client
            .get(self.url("lessons"))
            .query(query)
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(RemoteCatalogError::Http)?;

        if !response.status().is_success() {
            return Err(RemoteCatalogError::HttpStatus(response.status()).into());
        }

        let body: Vec<LessonDto> = response.json().await.map_err(RemoteCatalogError::Http)?;
        let mut lessons = body
            .into_iter()
            .map(LessonDto::into_lesson)
            .collect::<Result<Vec<_>, _>>()?;
        // The repository contract is id-ascending regardless of backend order.
        lessons.sort_by_key(Lesson::id);
        Ok(lessons)
    }
}

#[async_trait]
impl LessonRepository for RemoteCatalog {
    async fn upsert_lesson(&self, lesson: &Lesson) -> Result<(), StorageError> {
        let response = self
            .client
            .put(self.url(&format!("lessons/{}", lesson.id())))
            .bearer_auth(&self.config.api_key)
            .json(&LessonDto::from_lesson(lesson))
            .send()
            .await
            .map_err(RemoteCatalogError::Http)?;

        if !response.status().is_success() {
            return Err(RemoteCatalogError::HttpStatus(response.status()).into());
        }
        Ok(())
    }

    async fn get_lesson(&self, id: LessonId) -> Result<Option<Lesson>, StorageError> {
        let response = self
            .client
            .get(self.url(&format!("lessons/{id}")))
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(RemoteCatalogError::Http)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(RemoteCatalogError::HttpStatus(response.status()).into());
        }

        let body: LessonDto = response.json().await.map_err(RemoteCatalogError::Http)?;
        Ok(Some(body.into_lesson()?))
    }

    async fn list_lessons(&self, limit: u32) -> Result<Vec<Lesson>, StorageError> {
        let mut lessons = self.fetch_lessons(&[]).await?;
        lessons.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(lessons)
    }

    async fn lessons_by_category(&self, category: &Category) -> Result<Vec<Lesson>, StorageError> {
        self.fetch_lessons(&[("category", category.as_str().to_owned())])
            .await
    }

    async fn lessons_by_role(&self, role: Role) -> Result<Vec<Lesson>, StorageError> {
        self.fetch_lessons(&[("required_role", role.as_str().to_owned())])
            .await
    }

    async fn delete_lesson(&self, id: LessonId) -> Result<bool, StorageError> {
        let response = self
            .client
            .delete(self.url(&format!("lessons/{id}")))
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(RemoteCatalogError::Http)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !response.status().is_success() {
            return Err(RemoteCatalogError::HttpStatus(response.status()).into());
        }
        Ok(true)
    }

    async fn max_lesson_id(&self) -> Result<Option<LessonId>, StorageError> {
        // The backend has no dedicated endpoint; derive it from the listing.
        let lessons = self.fetch_lessons(&[]).await?;
        Ok(lessons.last().map(Lesson::id))
    }
}

//
// ─── WIRE TYPES ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize, Deserialize)]
struct LessonDto {
    id: u64,
    title: String,
    category: String,
    duration_minutes: u32,
    required_role: String,
    media_reference: String,
    created_at: DateTime<Utc>,
}

impl LessonDto {
    fn from_lesson(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id().value(),
            title: lesson.title().to_owned(),
            category: lesson.category().as_str().to_owned(),
            duration_minutes: lesson.duration_minutes(),
            required_role: lesson.required_role().as_str().to_owned(),
            media_reference: lesson.media_reference().to_owned(),
            created_at: lesson.created_at(),
        }
    }

    fn into_lesson(self) -> Result<Lesson, StorageError> {
        let category = Category::new(self.category)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let role = self
            .required_role
            .parse::<Role>()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Lesson::from_persisted(
            LessonId::new(self.id),
            self.title,
            category,
            self.duration_minutes,
            role,
            self.media_reference,
            self.created_at,
        )
        .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::model::LessonDraft;
    use course_core::time::fixed_now;

    #[test]
    fn dto_roundtrips_through_domain() {
        let lesson = LessonDraft {
            title: "Intro".to_string(),
            category: Category::new("writing-basics").unwrap(),
            duration_minutes: 15,
            required_role: Role::Premium,
            media_reference: "vid-1".to_string(),
        }
        .validate(fixed_now())
        .unwrap()
        .assign_id(LessonId::new(1));

        let dto = LessonDto::from_lesson(&lesson);
        let json = serde_json::to_string(&dto).unwrap();
        let parsed: LessonDto = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.into_lesson().unwrap(), lesson);
    }

    #[test]
    fn dto_rejects_unknown_role() {
        let dto = LessonDto {
            id: 1,
            title: "Intro".to_string(),
            category: "writing-basics".to_string(),
            duration_minutes: 15,
            required_role: "admin".to_string(),
            media_reference: "vid-1".to_string(),
            created_at: fixed_now(),
        };
        assert!(matches!(
            dto.into_lesson(),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn config_requires_api_key() {
        // from_env reads process env; only exercise the empty-key rule here.
        let config = RemoteCatalogConfig {
            base_url: "https://api.academy.example/v1".to_string(),
            api_key: "k".to_string(),
        };
        let catalog = RemoteCatalog::new(config);
        assert_eq!(
            catalog.url("lessons/3"),
            "https://api.academy.example/v1/lessons/3"
        );
    }
}
