use course_core::series::{Series, SeriesProgress};
use course_core::model::{Category, CompletionSet, Lesson, LessonId};
use storage::repository::LessonRepository;

use crate::error::NavigatorError;

/// Storage-backed series-navigation queries.
///
/// These are thin wrappers that load one series from the catalog and walk it
/// in memory; the ordering and progress rules live in `course_core::series`.
pub struct SeriesQueries;

impl SeriesQueries {
    /// The lesson immediately after `current` within its series, or `None`
    /// when `current` is last or not part of the category.
    ///
    /// # Errors
    ///
    /// Returns `NavigatorError::Storage` when the catalog fetch fails. A
    /// missing adjacent lesson is not an error.
    pub async fn next_lesson(
        lessons: &dyn LessonRepository,
        current: LessonId,
        category: &Category,
    ) -> Result<Option<Lesson>, NavigatorError> {
        let series = Self::load_series(lessons, category).await?;
        Ok(series.next_after(current).cloned())
    }

    /// The lesson immediately before `current` within its series, or `None`
    /// when `current` is first or not part of the category.
    ///
    /// # Errors
    ///
    /// Returns `NavigatorError::Storage` when the catalog fetch fails.
    pub async fn previous_lesson(
        lessons: &dyn LessonRepository,
        current: LessonId,
        category: &Category,
    ) -> Result<Option<Lesson>, NavigatorError> {
        let series = Self::load_series(lessons, category).await?;
        Ok(series.previous_before(current).cloned())
    }

    /// Completion report for a series with the given completion set.
    ///
    /// # Errors
    ///
    /// Returns `NavigatorError::Storage` when the catalog fetch fails.
    pub async fn series_progress(
        lessons: &dyn LessonRepository,
        category: &Category,
        completed: &CompletionSet,
    ) -> Result<SeriesProgress, NavigatorError> {
        let series = Self::load_series(lessons, category).await?;
        Ok(series.progress(completed))
    }

    async fn load_series(
        lessons: &dyn LessonRepository,
        category: &Category,
    ) -> Result<Series, NavigatorError> {
        let rows = lessons.lessons_by_category(category).await?;
        Ok(Series::from_lessons(category.clone(), rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::model::{LessonDraft, Role};
    use course_core::time::fixed_now;
    use storage::repository::InMemoryRepository;

    fn build_lesson(id: u64, category: &str) -> Lesson {
        LessonDraft {
            title: format!("Lesson {id}"),
            category: Category::new(category).unwrap(),
            duration_minutes: 15,
            required_role: Role::Free,
            media_reference: format!("vid-{id}"),
        }
        .validate(fixed_now())
        .unwrap()
        .assign_id(LessonId::new(id))
    }

    async fn seeded_repo() -> InMemoryRepository {
        let repo = InMemoryRepository::new();
        for id in [10, 11, 12, 13] {
            repo.upsert_lesson(&build_lesson(id, "writing-basics"))
                .await
                .unwrap();
        }
        repo.upsert_lesson(&build_lesson(20, "editing"))
            .await
            .unwrap();
        repo
    }

    #[tokio::test]
    async fn next_and_previous_walk_the_series() {
        let repo = seeded_repo().await;
        let category = Category::new("writing-basics").unwrap();

        let next = SeriesQueries::next_lesson(&repo, LessonId::new(11), &category)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(next.id(), LessonId::new(12));

        let previous = SeriesQueries::previous_lesson(&repo, LessonId::new(11), &category)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(previous.id(), LessonId::new(10));
    }

    #[tokio::test]
    async fn boundaries_are_none_not_errors() {
        let repo = seeded_repo().await;
        let category = Category::new("writing-basics").unwrap();

        assert!(
            SeriesQueries::next_lesson(&repo, LessonId::new(13), &category)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            SeriesQueries::previous_lesson(&repo, LessonId::new(10), &category)
                .await
                .unwrap()
                .is_none()
        );
        // Unknown current id behaves the same way.
        assert!(
            SeriesQueries::next_lesson(&repo, LessonId::new(999), &category)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn progress_counts_only_this_series() {
        let repo = seeded_repo().await;
        let category = Category::new("writing-basics").unwrap();
        let completed: CompletionSet = [
            LessonId::new(10),
            LessonId::new(11),
            LessonId::new(20), // belongs to "editing"
        ]
        .into_iter()
        .collect();

        let report = SeriesQueries::series_progress(&repo, &category, &completed)
            .await
            .unwrap();
        assert_eq!(report.total_lessons, 4);
        assert_eq!(report.completed_lessons, 2);
        assert_eq!(report.progress_percentage, 50);
        assert_eq!(report.next_lesson.unwrap().id(), LessonId::new(12));
    }

    #[tokio::test]
    async fn empty_category_reports_zero() {
        let repo = seeded_repo().await;
        let category = Category::new("does-not-exist").unwrap();

        let report =
            SeriesQueries::series_progress(&repo, &category, &CompletionSet::new())
                .await
                .unwrap();
        assert_eq!(report.total_lessons, 0);
        assert_eq!(report.progress_percentage, 0);
    }
}
