use crate::model::{Category, CompletionSet, Lesson, LessonId};

//
// ─── SERIES ────────────────────────────────────────────────────────────────────
//

/// The ordered subsequence of lessons sharing one category.
///
/// Lessons are held ascending by id. Ids are unique, so the ordering is
/// stable and total; ties are impossible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    category: Category,
    lessons: Vec<Lesson>,
}

impl Series {
    /// Build a series from a catalog slice, keeping only lessons in the given
    /// category and sorting them ascending by id.
    #[must_use]
    pub fn from_lessons(category: Category, lessons: Vec<Lesson>) -> Self {
        let mut lessons: Vec<Lesson> = lessons
            .into_iter()
            .filter(|lesson| lesson.category() == &category)
            .collect();
        lessons.sort_by_key(Lesson::id);
        Self { category, lessons }
    }

    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Lessons in ascending id order.
    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    fn position(&self, id: LessonId) -> Option<usize> {
        self.lessons.iter().position(|lesson| lesson.id() == id)
    }

    /// The lesson immediately following the given one, or `None` if the id is
    /// last in the series or not part of it.
    #[must_use]
    pub fn next_after(&self, id: LessonId) -> Option<&Lesson> {
        let at = self.position(id)?;
        self.lessons.get(at + 1)
    }

    /// The lesson immediately preceding the given one, or `None` if the id is
    /// first in the series or not part of it.
    #[must_use]
    pub fn previous_before(&self, id: LessonId) -> Option<&Lesson> {
        let at = self.position(id)?;
        at.checked_sub(1).map(|prev| &self.lessons[prev])
    }

    /// The lowest-id lesson not yet completed, or `None` when the whole
    /// series is done.
    #[must_use]
    pub fn first_incomplete(&self, completed: &CompletionSet) -> Option<&Lesson> {
        self.lessons
            .iter()
            .find(|lesson| !completed.contains(lesson.id()))
    }

    /// Completion report for this series.
    ///
    /// Only completed ids that belong to the series count toward the
    /// percentage; ids from other categories are ignored.
    #[must_use]
    pub fn progress(&self, completed: &CompletionSet) -> SeriesProgress {
        let total_lessons = self.lessons.len();
        let completed_lessons = self
            .lessons
            .iter()
            .filter(|lesson| completed.contains(lesson.id()))
            .count();

        SeriesProgress {
            category: self.category.clone(),
            total_lessons,
            completed_lessons,
            progress_percentage: percentage(completed_lessons, total_lessons),
            next_lesson: self.first_incomplete(completed).cloned(),
            lessons: self.lessons.clone(),
        }
    }
}

/// Rounded completion percentage, 0 for an empty series.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = completed as f64 / total as f64;
    (ratio * 100.0).round() as u8
}

//
// ─── PROGRESS REPORT ───────────────────────────────────────────────────────────
//

/// Aggregated view of series completion, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesProgress {
    pub category: Category,
    pub total_lessons: usize,
    pub completed_lessons: usize,
    pub progress_percentage: u8,
    pub next_lesson: Option<Lesson>,
    pub lessons: Vec<Lesson>,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
