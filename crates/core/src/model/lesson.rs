use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::category::{Category, CategoryError};
use crate::model::ids::LessonId;
use crate::model::role::Role;

//
// ─── LESSON TYPES ──────────────────────────────────────────────────────────────
//

/// Unvalidated lesson input, as entered through the admin surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonDraft {
    pub title: String,
    pub category: Category,
    pub duration_minutes: u32,
    pub required_role: Role,
    pub media_reference: String,
}

impl LessonDraft {
    /// Validate the draft, stamping it with the creation time.
    ///
    /// # Errors
    ///
    /// Returns `LessonError` if the title or media reference are empty or the
    /// duration is zero.
    pub fn validate(self, now: DateTime<Utc>) -> Result<ValidatedLesson, LessonError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(LessonError::EmptyTitle);
        }
        if self.duration_minutes == 0 {
            return Err(LessonError::ZeroDuration);
        }
        let media_reference = self.media_reference.trim();
        if media_reference.is_empty() {
            return Err(LessonError::EmptyMediaReference);
        }

        Ok(ValidatedLesson {
            title: title.to_string(),
            category: self.category,
            duration_minutes: self.duration_minutes,
            required_role: self.required_role,
            media_reference: media_reference.to_string(),
            created_at: now,
        })
    }
}

/// A validated lesson awaiting id assignment from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLesson {
    title: String,
    category: Category,
    duration_minutes: u32,
    required_role: Role,
    media_reference: String,
    created_at: DateTime<Utc>,
}

impl ValidatedLesson {
    #[must_use]
    pub fn assign_id(self, id: LessonId) -> Lesson {
        Lesson {
            id,
            title: self.title,
            category: self.category,
            duration_minutes: self.duration_minutes,
            required_role: self.required_role,
            media_reference: self.media_reference,
            created_at: self.created_at,
        }
    }
}

/// A single playable unit of course content.
///
/// Immutable from the navigator's perspective; the id doubles as the
/// series-ordering key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    id: LessonId,
    title: String,
    category: Category,
    duration_minutes: u32,
    required_role: Role,
    media_reference: String,
    created_at: DateTime<Utc>,
}

impl Lesson {
    /// Rebuild a lesson from persisted fields, re-running draft validation.
    ///
    /// # Errors
    ///
    /// Returns `LessonError` if the persisted fields no longer validate.
    pub fn from_persisted(
        id: LessonId,
        title: String,
        category: Category,
        duration_minutes: u32,
        required_role: Role,
        media_reference: String,
        created_at: DateTime<Utc>,
    ) -> Result<Self, LessonError> {
        let draft = LessonDraft {
            title,
            category,
            duration_minutes,
            required_role,
            media_reference,
        };
        Ok(draft.validate(created_at)?.assign_id(id))
    }

    #[must_use]
    pub fn id(&self) -> LessonId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    #[must_use]
    pub fn required_role(&self) -> Role {
        self.required_role
    }

    #[must_use]
    pub fn media_reference(&self) -> &str {
        &self.media_reference
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

//
// ─── LESSON VALIDATION ERRORS ──────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LessonError {
    #[error("lesson title must not be empty")]
    EmptyTitle,

    #[error("lesson duration must be at least one minute")]
    ZeroDuration,

    #[error("lesson media reference must not be empty")]
    EmptyMediaReference,

    #[error(transparent)]
    Category(#[from] CategoryError),
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn draft(title: &str, duration: u32, media: &str) -> LessonDraft {
        LessonDraft {
            title: title.to_string(),
            category: Category::new("writing-basics").unwrap(),
            duration_minutes: duration,
            required_role: Role::Free,
            media_reference: media.to_string(),
        }
    }

    #[test]
    fn lesson_fails_if_title_empty() {
        let err = draft("   ", 12, "vid-1").validate(fixed_now()).unwrap_err();
        assert_eq!(err, LessonError::EmptyTitle);
    }

    #[test]
    fn lesson_fails_if_duration_zero() {
        let err = draft("Intro", 0, "vid-1").validate(fixed_now()).unwrap_err();
        assert_eq!(err, LessonError::ZeroDuration);
    }

    #[test]
    fn lesson_fails_if_media_reference_empty() {
        let err = draft("Intro", 12, " ").validate(fixed_now()).unwrap_err();
        assert_eq!(err, LessonError::EmptyMediaReference);
    }

    #[test]
    fn valid_lesson_validates_and_assigns_id() {
        let validated = draft(" Intro ", 12, " vid-1 ").validate(fixed_now()).unwrap();
        let lesson = validated.assign_id(LessonId::new(10));

        assert_eq!(lesson.id(), LessonId::new(10));
        assert_eq!(lesson.title(), "Intro");
        assert_eq!(lesson.media_reference(), "vid-1");
        assert_eq!(lesson.created_at(), fixed_now());
    }

    #[test]
    fn from_persisted_roundtrips() {
        let lesson = Lesson::from_persisted(
            LessonId::new(7),
            "Outlines".to_string(),
            Category::new("writing-basics").unwrap(),
            25,
            Role::Premium,
            "vid-7".to_string(),
            fixed_now(),
        )
        .unwrap();

        assert_eq!(lesson.id(), LessonId::new(7));
        assert_eq!(lesson.required_role(), Role::Premium);
        assert_eq!(lesson.duration_minutes(), 25);
    }
}
