mod category;
mod completion;
mod ids;
mod lesson;
mod role;

pub use category::{Category, CategoryError};
pub use completion::CompletionSet;
pub use ids::{LessonId, ParseIdError, ViewerId};
pub use lesson::{Lesson, LessonDraft, LessonError, ValidatedLesson};
pub use role::{ParseRoleError, Role};
